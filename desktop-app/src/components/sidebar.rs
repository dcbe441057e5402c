use crate::auth::AuthState;
use crate::services::ApiService;
use crate::state::{AppState, Page};
use egui::Context;

pub struct Sidebar;

impl Sidebar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn ui(&mut self, ctx: &Context, state: &mut AppState) {
        egui::SidePanel::left("sidebar")
            .exact_width(220.0)
            .show(ctx, |ui| {
                ui.style_mut().spacing.item_spacing = egui::vec2(0.0, 2.0);
                ui.vertical(|ui| {
                    let sidebar_bg = ui.style().visuals.panel_fill;
                    let button_bg = ui.style().visuals.widgets.inactive.bg_fill;

                    // Branding
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("prepdeck").size(20.0).strong());
                    ui.add_space(20.0);

                    if Self::sidebar_link(ui, "Practice", sidebar_bg, button_bg) {
                        state.ui_state.current_page = Page::Practice;
                    }

                    if state.interview.is_some()
                        && Self::sidebar_link(ui, "Interview", sidebar_bg, button_bg)
                    {
                        state.ui_state.current_page = Page::Interview;
                    }

                    if Self::sidebar_link(ui, "Profile", sidebar_bg, button_bg) {
                        state.ui_state.current_page = Page::Profile;
                        if state.stats.is_none() && !state.loading_stats {
                            ApiService::new().refresh_stats(state);
                        }
                    }

                    ui.add_space(50.0);

                    if Self::sidebar_link(ui, "Settings", sidebar_bg, button_bg) {
                        state.ui_state.current_page = Page::Settings;
                        state.ui_state.base_url_input = state.config.api.base_url.clone();
                    }

                    if let AuthState::SignedIn(session) = &state.auth {
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(&session.user.email)
                                .size(11.0)
                                .color(ui.style().visuals.weak_text_color()),
                        );
                        if Self::sidebar_link(ui, "Sign out", sidebar_bg, button_bg) {
                            ApiService::new().sign_out(state);
                        }
                    }
                });
            });
    }

    /// Flat navigation link: full-width hover-highlighted row.
    fn sidebar_link(
        ui: &mut egui::Ui,
        text: &str,
        default_bg: egui::Color32,
        hover_bg: egui::Color32,
    ) -> bool {
        let available_width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(available_width, 24.0), egui::Sense::click());

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let bg_color = if response.hovered() {
            hover_bg
        } else {
            default_bg
        };
        ui.painter().rect_filled(rect, 0.0, bg_color);

        let text_pos = rect.min + egui::vec2(8.0, 4.0);
        ui.painter().text(
            text_pos,
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::default(),
            ui.style().visuals.text_color(),
        );

        response.clicked()
    }
}
