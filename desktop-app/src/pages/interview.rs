use crate::components::{ChatBubble, ScoreCard};
use crate::pages::{auth_gate, Page};
use crate::services::ApiService;
use crate::state::AppState;
use egui::{Context, Ui};

pub struct InterviewPage;

impl InterviewPage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InterviewPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for InterviewPage {
    fn name(&self) -> &'static str {
        "Interview"
    }

    fn ui(&mut self, _ctx: &Context, ui: &mut Ui, state: &mut AppState) {
        if !auth_gate(ui, state) {
            return;
        }

        if state.interview.is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label("No active session");
                if ui.button("Go to practice").clicked() {
                    state.ui_state.current_page = crate::state::Page::Practice;
                }
            });
            return;
        }

        let mut end_clicked = false;
        let mut retry_clicked = false;
        let mut submit_requested = false;

        let (can_submit, pending, complete) = match &state.interview {
            Some(interview) => (
                interview.sequencer.can_submit(),
                interview.sequencer.request_pending(),
                interview.sequencer.is_complete(),
            ),
            None => return,
        };

        if let Some(interview) = &state.interview {
            ui.horizontal(|ui| {
                ui.heading("Interview Session");
                ui.label(
                    egui::RichText::new(format!("{} @ {}", interview.role, interview.company))
                        .color(ui.style().visuals.weak_text_color()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!state.completing_session, egui::Button::new("End session"))
                        .clicked()
                    {
                        end_clicked = true;
                    }
                    if state.completing_session {
                        ui.add(egui::Spinner::new());
                    }
                });
            });
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .max_height((ui.available_height() - 140.0).max(120.0))
                .auto_shrink(false)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in &interview.transcript {
                        ChatBubble::show(ui, entry);
                    }
                    if pending {
                        ui.horizontal(|ui| {
                            ui.add(egui::Spinner::new());
                            ui.label(
                                egui::RichText::new("...")
                                    .color(ui.style().visuals.weak_text_color()),
                            );
                        });
                    }
                    if let Some(feedback) = &interview.feedback {
                        ui.add_space(8.0);
                        ScoreCard::show(ui, feedback);
                    }
                });

            if interview.sequencer.can_retry() {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("The last request did not go through.")
                            .color(ui.style().visuals.weak_text_color()),
                    );
                    if ui.button("Retry").clicked() {
                        retry_clicked = true;
                    }
                });
            }
        }

        ui.add_space(8.0);
        if complete {
            ui.label("Session complete. Review your feedback above.");
        } else {
            ui.add_enabled(
                can_submit,
                egui::TextEdit::multiline(&mut state.ui_state.answer_input)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("Type your answer... Use the STAR method for best results."),
            );
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_submit, egui::Button::new("Submit answer (Ctrl+Enter)"))
                    .clicked()
                {
                    submit_requested = true;
                }
                let shortcut =
                    ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));
                if shortcut && can_submit {
                    submit_requested = true;
                }
                if pending {
                    ui.add(egui::Spinner::new());
                }
            });
        }

        if end_clicked {
            ApiService::new().complete_session(state);
        }
        if retry_clicked {
            let command = state.interview.as_mut().and_then(|iv| iv.sequencer.retry());
            if let Some(command) = command {
                state.ui_state.notice = None;
                ApiService::new().run_command(state, command);
            }
        }
        if submit_requested {
            let answer = state.ui_state.answer_input.clone();
            let command = state
                .interview
                .as_mut()
                .and_then(|iv| iv.sequencer.submit(&answer));
            if let Some(command) = command {
                ApiService::new().run_command(state, command);
            }
        }
    }
}
