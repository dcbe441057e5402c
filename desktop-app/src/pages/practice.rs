use crate::pages::{auth_gate, Page};
use crate::services::ApiService;
use crate::state::AppState;
use egui::{Context, Ui};

pub struct PracticePage;

impl PracticePage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PracticePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for PracticePage {
    fn name(&self) -> &'static str {
        "Practice"
    }

    fn ui(&mut self, _ctx: &Context, ui: &mut Ui, state: &mut AppState) {
        if !auth_gate(ui, state) {
            return;
        }

        ui.heading("Practice Sessions");
        ui.label(
            egui::RichText::new("Sharpen your skills and build confidence for your next interview.")
                .color(ui.style().visuals.weak_text_color()),
        );
        ui.add_space(16.0);

        egui::Frame::NONE
            .fill(ui.style().visuals.widgets.inactive.bg_fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new("Recruiter career fair conversation")
                            .size(16.0)
                            .strong(),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(
                            "A short, impactful exchange with a simulated recruiter. \
                             Practice your pitch and make a great first impression.",
                        )
                        .size(12.0)
                        .color(ui.style().visuals.weak_text_color()),
                    );
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label("Target role:");
                            ui.text_edit_singleline(&mut state.ui_state.role_input);
                        });
                        ui.add_space(16.0);
                        ui.vertical(|ui| {
                            ui.label("Target company:");
                            ui.text_edit_singleline(&mut state.ui_state.company_input);
                        });
                    });

                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        let ready = !state.ui_state.role_input.trim().is_empty()
                            && !state.ui_state.company_input.trim().is_empty()
                            && !state.starting_session;
                        if ui
                            .add_enabled(ready, egui::Button::new("Start session"))
                            .clicked()
                        {
                            ApiService::new().start_session(state);
                        }
                        if state.starting_session {
                            ui.add(egui::Spinner::new());
                        }
                    });
                });
            });
    }
}
