pub mod chat_bubble;
pub mod score_card;
pub mod sidebar;
pub mod status_bar;

pub use chat_bubble::*;
pub use score_card::*;
pub use sidebar::*;
pub use status_bar::*;
