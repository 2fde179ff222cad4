use super::entry::Coordinates;
use super::target::NavigationTarget;

/// Data needed to render a destination.
#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub target: NavigationTarget,
    pub title: String,
    pub body: Option<String>,
    pub children: Vec<ContentLink>,
}

/// A navigable child of a destination (a deck's slides, a scene's nodes).
#[derive(Clone, Debug, PartialEq)]
pub struct ContentLink {
    pub label: String,
    pub target: NavigationTarget,
    pub position: Option<Coordinates>,
}
