use super::entry::{Coordinates, NavigationEntry};
use super::target::NavigationTarget;

/// The live "current position". The default value is Home.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationContext {
    pub scene_slug: Option<String>,
    pub deck_slug: Option<String>,
    pub slide_id: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl NavigationContext {
    pub fn from_entry(entry: &NavigationEntry) -> Self {
        let mut context = match entry.target() {
            NavigationTarget::Scene(r) => Self {
                scene_slug: Some(r.key()),
                ..Self::default()
            },
            NavigationTarget::Deck(r) => Self {
                deck_slug: Some(r.key()),
                ..Self::default()
            },
            NavigationTarget::Context(r) => Self {
                scene_slug: r.slug.clone(),
                slide_id: Some(r.id.to_string()),
                ..Self::default()
            },
        };
        context.coordinates = entry.coordinates();
        context
    }

    pub fn is_home(&self) -> bool {
        *self == Self::default()
    }
}
