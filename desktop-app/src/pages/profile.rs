use crate::pages::{auth_gate, Page};
use crate::services::ApiService;
use crate::state::AppState;
use egui::{Context, Ui};

pub struct ProfilePage;

impl ProfilePage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ProfilePage {
    fn name(&self) -> &'static str {
        "Profile"
    }

    fn ui(&mut self, _ctx: &Context, ui: &mut Ui, state: &mut AppState) {
        if !auth_gate(ui, state) {
            return;
        }

        let mut refresh_clicked = false;

        ui.horizontal(|ui| {
            ui.heading("Profile");
            if let Some(session) = state.auth.session() {
                ui.label(
                    egui::RichText::new(&session.user.email)
                        .color(ui.style().visuals.weak_text_color()),
                );
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Refresh").clicked() {
                    refresh_clicked = true;
                }
            });
        });
        ui.add_space(16.0);

        if state.loading_stats {
            ui.vertical_centered(|ui| {
                ui.label("Loading stats...");
                ui.add(egui::Spinner::new());
            });
        } else if let Some(stats) = &state.stats {
            ui.horizontal(|ui| {
                Self::stat_tile(ui, "Total sessions", stats.total_sessions.to_string());
                Self::stat_tile(ui, "Average score", format!("{:.1}", stats.average_score));
                Self::stat_tile(ui, "Best score", format!("{}/10", stats.best_score));
            });

            ui.add_space(16.0);
            ui.heading("Recent sessions");
            ui.add_space(8.0);

            if stats.recent_sessions.is_empty() {
                ui.label("No sessions yet. Start one from the Practice page.");
            } else {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui_extras::TableBuilder::new(ui)
                        .striped(true)
                        .column(egui_extras::Column::remainder().at_least(160.0)) // Role column
                        .column(egui_extras::Column::remainder().at_least(140.0)) // Company column
                        .column(egui_extras::Column::auto()) // Date column
                        .column(egui_extras::Column::auto()) // Score column
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.strong("Role");
                            });
                            header.col(|ui| {
                                ui.strong("Company");
                            });
                            header.col(|ui| {
                                ui.strong("Date");
                            });
                            header.col(|ui| {
                                ui.strong("Score");
                            });
                        })
                        .body(|mut body| {
                            for session in &stats.recent_sessions {
                                body.row(18.0, |mut row| {
                                    row.col(|ui| {
                                        ui.label(&session.role);
                                    });
                                    row.col(|ui| {
                                        ui.label(&session.company);
                                    });
                                    row.col(|ui| {
                                        ui.label(
                                            session
                                                .created_at
                                                .with_timezone(&chrono::Local)
                                                .format("%b %e, %Y %H:%M")
                                                .to_string(),
                                        );
                                    });
                                    row.col(|ui| match session.score {
                                        Some(score) => {
                                            ui.label(
                                                egui::RichText::new(format!("{}/10", score))
                                                    .color(Self::score_color(score)),
                                            );
                                        }
                                        None => {
                                            ui.label(
                                                egui::RichText::new("—").color(
                                                    ui.style().visuals.weak_text_color(),
                                                ),
                                            );
                                        }
                                    });
                                });
                            }
                        });
                });
            }
        } else {
            ui.vertical_centered(|ui| {
                ui.label("No stats loaded");
                if ui.button("Load").clicked() {
                    refresh_clicked = true;
                }
            });
        }

        if refresh_clicked {
            ApiService::new().refresh_stats(state);
        }
    }
}

impl ProfilePage {
    fn stat_tile(ui: &mut Ui, title: &str, value: String) {
        egui::Frame::NONE
            .fill(ui.style().visuals.widgets.inactive.bg_fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_min_width(140.0);
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(title)
                            .size(11.0)
                            .color(ui.style().visuals.weak_text_color()),
                    );
                    ui.label(egui::RichText::new(value).size(20.0).strong());
                });
            });
    }

    fn score_color(score: i32) -> egui::Color32 {
        if score >= 8 {
            egui::Color32::GREEN
        } else if score >= 6 {
            egui::Color32::YELLOW
        } else {
            egui::Color32::RED
        }
    }
}
