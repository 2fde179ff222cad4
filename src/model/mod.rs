mod content;
mod context;
mod entry;
mod target;

pub use content::{Content, ContentLink};
pub use context::NavigationContext;
pub use entry::{Coordinates, NavigationEntry};
pub use target::{is_plain_slug, NavigationTarget, TargetKind, TargetRef};
