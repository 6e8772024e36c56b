//! Terminal user interface for browsing folder bookmarks.
//!
//! Bookmarks are loaded into memory once, then tabbed by category, filtered
//! and deleted against that in-memory set. Storage is only queried again
//! after a delete or a category edit.

pub mod application;
pub mod configuration;
pub mod domain;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Event, Mode, Tab};
pub use domain::services::{ActionsService, AppState, AppStateProps, EventsService};
