use super::target::NavigationTarget;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One history record. Fields are read-only once created.
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationEntry {
    id: u64,
    target: NavigationTarget,
    timestamp: i64,
    coordinates: Option<Coordinates>,
}

impl NavigationEntry {
    pub(crate) fn new(
        id: u64,
        target: NavigationTarget,
        timestamp: i64,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id,
            target,
            timestamp,
            coordinates,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn target(&self) -> &NavigationTarget {
        &self.target
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}
