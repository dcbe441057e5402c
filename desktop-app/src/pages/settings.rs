use crate::api_client::ApiClient;
use crate::pages::Page;
use crate::state::AppState;
use egui::{Context, Ui};

pub struct SettingsPage;

impl SettingsPage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SettingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for SettingsPage {
    fn name(&self) -> &'static str {
        "Settings"
    }

    fn ui(&mut self, _ctx: &Context, ui: &mut Ui, state: &mut AppState) {
        ui.heading("Settings");
        ui.add_space(16.0);

        ui.label("Backend base URL:");
        ui.text_edit_singleline(&mut state.ui_state.base_url_input);
        ui.add_space(8.0);

        if ui.button("Save").clicked() {
            let base_url = state.ui_state.base_url_input.trim().to_string();
            if base_url.is_empty() {
                state.ui_state.notice = Some("Base URL cannot be empty".to_string());
                return;
            }
            state.config.api.base_url = base_url.clone();
            match state.config.save() {
                Ok(()) => {
                    // Rebuild the client against the new host, keeping the
                    // current bearer token.
                    let token = state.api.access_token();
                    state.api = ApiClient::new(base_url);
                    state.api.set_access_token(token);
                    state.ui_state.notice = Some("Settings saved".to_string());
                    tracing::info!("Backend base URL updated");
                }
                Err(e) => {
                    tracing::error!("Failed to save config: {}", e);
                    state.ui_state.notice = Some(format!("Failed to save settings: {}", e));
                }
            }
        }
    }
}
