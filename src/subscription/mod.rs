mod watcher;

pub use watcher::{content_watcher, drain_changes};
