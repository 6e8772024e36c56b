mod actions;
mod app_state;
mod events;

pub use actions::*;
pub use app_state::*;
pub use events::*;
