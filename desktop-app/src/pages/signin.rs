use crate::pages::Page;
use crate::services::ApiService;
use crate::state::AppState;
use egui::{Context, Ui};

pub struct SignInPage;

impl SignInPage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SignInPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for SignInPage {
    fn name(&self) -> &'static str {
        "Sign in"
    }

    fn ui(&mut self, _ctx: &Context, ui: &mut Ui, state: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(360.0);
            ui.add_space(40.0);

            let title = if state.ui_state.signup_mode {
                "Sign up"
            } else {
                "Sign in"
            };
            ui.heading(title);
            ui.add_space(16.0);

            if let Some(error) = &state.ui_state.auth_error {
                ui.colored_label(egui::Color32::RED, error);
                ui.add_space(8.0);
            }

            ui.label("Email:");
            ui.text_edit_singleline(&mut state.ui_state.email_input);
            ui.add_space(8.0);

            ui.label("Password:");
            ui.add(egui::TextEdit::singleline(&mut state.ui_state.password_input).password(true));
            ui.add_space(16.0);

            let button_text = if state.ui_state.signup_mode {
                "Sign up"
            } else {
                "Sign in"
            };
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!state.signing_in, egui::Button::new(button_text))
                    .clicked()
                {
                    ApiService::new().sign_in(state);
                }
                if state.signing_in {
                    ui.add(egui::Spinner::new());
                }
            });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if state.ui_state.signup_mode {
                    ui.label("Already have an account?");
                    if ui.link("Sign in").clicked() {
                        state.ui_state.signup_mode = false;
                        state.ui_state.auth_error = None;
                    }
                } else {
                    ui.label("Need an account?");
                    if ui.link("Sign up").clicked() {
                        state.ui_state.signup_mode = true;
                        state.ui_state.auth_error = None;
                    }
                }
            });
        });
    }
}
