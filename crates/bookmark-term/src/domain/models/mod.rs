mod action;
mod dialog;
mod event;
mod mode;
mod status;
mod tab;

pub use action::*;
pub use dialog::*;
pub use event::*;
pub use mode::*;
pub use status::*;
pub use tab::*;
