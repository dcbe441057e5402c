use crate::auth::AuthState;
use crate::sequencer::{Phase, SCRIPTED_QUESTION_COUNT};
use crate::state::{AppState, InterviewState};
use egui::{Context, Vec2};
use egui_flex::{item, Flex, FlexAlignContent};
use egui_material_icons::icons;

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn ui(&mut self, ctx: &Context, state: &AppState) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(12.0, 0.0);

            Flex::horizontal()
                .gap(Vec2::new(12.0, 0.0))
                .align_content(FlexAlignContent::Center)
                .show(ui, |flex| {
                    // Identity section
                    match &state.auth {
                        AuthState::Resolving => {
                            flex.add(
                                item(),
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} Checking session...",
                                        icons::ICON_SYNC
                                    ))
                                    .color(egui::Color32::YELLOW),
                                ),
                            );
                        }
                        AuthState::SignedIn(session) => {
                            flex.add(
                                item(),
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} {}",
                                        icons::ICON_PERSON,
                                        session.user.email
                                    ))
                                    .color(egui::Color32::GREEN),
                                ),
                            );
                        }
                        AuthState::SignedOut => {
                            flex.add(
                                item(),
                                egui::Label::new(
                                    egui::RichText::new(format!(
                                        "{} Signed out",
                                        icons::ICON_PERSON_OFF
                                    ))
                                    .color(egui::Color32::RED),
                                ),
                            );
                        }
                    }

                    // Live session section
                    if let Some(interview) = &state.interview {
                        flex.add(
                            item(),
                            egui::Label::new(format!(
                                "{} {} @ {}: {}",
                                icons::ICON_CHAT,
                                interview.role,
                                interview.company,
                                Self::phase_label(interview)
                            )),
                        );
                    }

                    // Transient notice section
                    if let Some(notice) = &state.ui_state.notice {
                        flex.add(
                            item(),
                            egui::Label::new(
                                egui::RichText::new(format!("{} {}", icons::ICON_ERROR, notice))
                                    .color(egui::Color32::RED),
                            ),
                        );
                    }

                    flex.add_flex(
                        item().grow(1.0),
                        Flex::horizontal().align_content(FlexAlignContent::End),
                        |_flex| {},
                    );
                });
        });
    }

    fn phase_label(interview: &InterviewState) -> String {
        match interview.sequencer.phase() {
            Phase::AwaitingQuestion | Phase::AwaitingAnswer => format!(
                "question {} of {}",
                interview.sequencer.answers_accepted() + 1,
                SCRIPTED_QUESTION_COUNT
            ),
            Phase::AwaitingFollowup | Phase::AwaitingFollowupAnswer => "follow-up".to_string(),
            Phase::AwaitingFeedback => "awaiting feedback".to_string(),
            Phase::Complete => "complete".to_string(),
        }
    }
}
