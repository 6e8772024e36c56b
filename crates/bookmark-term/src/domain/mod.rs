//! Core domain logic for the bookmark browser.
//!
//! This module contains the browsing state machine and the services feeding
//! it, independent of how the terminal is drawn.

pub mod models;
pub mod services;
