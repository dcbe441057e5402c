use crate::auth::AuthState;
use crate::state::AppState;
use egui::{Context, Ui};

pub trait Page {
    fn name(&self) -> &'static str;
    fn ui(&mut self, ctx: &Context, ui: &mut Ui, state: &mut AppState);
}

/// Auth gate for protected pages. Returns true when the page may render its
/// content; while the session is still resolving it shows a placeholder,
/// and a signed-out state renders nothing (the app shell redirects).
pub fn auth_gate(ui: &mut Ui, state: &AppState) -> bool {
    match &state.auth {
        AuthState::SignedIn(_) => true,
        AuthState::Resolving => {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label("Checking session...");
                ui.add(egui::Spinner::new());
            });
            false
        }
        AuthState::SignedOut => false,
    }
}

pub mod interview;
pub mod practice;
pub mod profile;
pub mod settings;
pub mod signin;

pub use interview::*;
pub use practice::*;
pub use profile::*;
pub use settings::*;
pub use signin::*;
