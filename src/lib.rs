//! Navigation history and context tracking for the stages viewer.
//!
//! [`state::Navigator`] owns a [`state::HistoryStore`] and the live
//! [`model::NavigationContext`]; destination content is resolved off the UI
//! thread by the worker in [`io`]. [`format`] derives the labels the viewer
//! shows for both.

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod logging;
pub mod model;
pub mod state;
pub mod subscription;

pub use error::{ConfigError, LoadError, NavigationError};
