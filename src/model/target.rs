use crate::error::NavigationError;
use std::fmt;
use std::str::FromStr;

/// Identity of a navigable unit: numeric id plus an optional slug.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub id: i64,
    pub slug: Option<String>,
}

impl TargetRef {
    pub fn new(id: i64) -> Self {
        Self { id, slug: None }
    }

    pub fn with_slug(id: i64, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: Some(slug.into()),
        }
    }

    /// The slug when present, otherwise the decimal id.
    pub fn key(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => self.id.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Scene,
    Deck,
    Context,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Deck => "deck",
            Self::Context => "context",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Scene => "Scene",
            Self::Deck => "Deck",
            Self::Context => "Slide",
        }
    }
}

impl FromStr for TargetKind {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scene" => Ok(Self::Scene),
            "deck" => Ok(Self::Deck),
            "context" | "slide" => Ok(Self::Context),
            other => Err(NavigationError::InvalidTarget(format!(
                "unknown target type '{other}'"
            ))),
        }
    }
}

/// What was navigated to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigationTarget {
    Scene(TargetRef),
    Deck(TargetRef),
    /// A slide-level position; its slug, when set, names the owning scene.
    Context(TargetRef),
}

impl NavigationTarget {
    pub fn new(kind: TargetKind, target: TargetRef) -> Self {
        match kind {
            TargetKind::Scene => Self::Scene(target),
            TargetKind::Deck => Self::Deck(target),
            TargetKind::Context => Self::Context(target),
        }
    }

    /// Builds a target from untyped parts, rejecting unknown kinds and slugs
    /// that are not a single path component.
    pub fn from_parts(
        kind: &str,
        id: i64,
        slug: Option<String>,
    ) -> Result<Self, NavigationError> {
        let kind = kind.parse::<TargetKind>()?;
        let slug = slug.filter(|s| !s.trim().is_empty());
        if let Some(slug) = &slug {
            if !is_plain_slug(slug) {
                return Err(NavigationError::InvalidTarget(format!(
                    "'{slug}' is not a valid slug"
                )));
            }
        }
        Ok(Self::new(kind, TargetRef { id, slug }))
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Scene(_) => TargetKind::Scene,
            Self::Deck(_) => TargetKind::Deck,
            Self::Context(_) => TargetKind::Context,
        }
    }

    pub fn target_ref(&self) -> &TargetRef {
        match self {
            Self::Scene(r) | Self::Deck(r) | Self::Context(r) => r,
        }
    }

    pub fn id(&self) -> i64 {
        self.target_ref().id
    }

    pub fn slug(&self) -> Option<&str> {
        self.target_ref().slug.as_deref()
    }
}

/// A slug names one file or directory under the content root.
pub fn is_plain_slug(slug: &str) -> bool {
    !slug.contains(['/', '\\', '\0']) && slug != "." && !slug.contains("..")
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.target_ref();
        match &r.slug {
            Some(slug) => write!(f, "{}:{}:{}", self.kind().as_str(), r.id, slug),
            None => write!(f, "{}:{}", self.kind().as_str(), r.id),
        }
    }
}

/// Parses `<kind>:<id>[:<slug>]`.
impl FromStr for NavigationTarget {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let id = parts
            .next()
            .ok_or_else(|| NavigationError::InvalidTarget(format!("missing id in '{s}'")))?;
        let id = id.trim().parse::<i64>().map_err(|_| {
            NavigationError::InvalidTarget(format!("'{}' is not a numeric id", id.trim()))
        })?;
        let slug = parts.next().map(|slug| slug.trim().to_string());
        Self::from_parts(kind, id, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_target() {
        let target: NavigationTarget = "scene:3:intro".parse().unwrap();
        assert_eq!(target, NavigationTarget::Scene(TargetRef::with_slug(3, "intro")));
        assert_eq!(target.to_string(), "scene:3:intro");
    }

    #[test]
    fn test_parse_without_slug() {
        let target: NavigationTarget = "Deck:7".parse().unwrap();
        assert_eq!(target, NavigationTarget::Deck(TargetRef::new(7)));
        assert_eq!(target.target_ref().key(), "7");
    }

    #[test]
    fn test_slide_alias() {
        let target: NavigationTarget = "slide:4:intro".parse().unwrap();
        assert_eq!(target.kind(), TargetKind::Context);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = NavigationTarget::from_parts("stage", 1, None).unwrap_err();
        assert!(matches!(err, NavigationError::InvalidTarget(_)));
    }

    #[test]
    fn test_bad_id_rejected() {
        assert!("scene:abc".parse::<NavigationTarget>().is_err());
        assert!("scene".parse::<NavigationTarget>().is_err());
    }

    #[test]
    fn test_path_like_slug_rejected() {
        for input in ["scene:1:../../x", "deck:2:a/b", "slide:3:..", "scene:4:.", "deck:5:a\\b"] {
            let err = input.parse::<NavigationTarget>().unwrap_err();
            assert!(matches!(err, NavigationError::InvalidTarget(_)), "{input}");
        }
        assert!("scene:1:intro-2.v1".parse::<NavigationTarget>().is_ok());
    }

    #[test]
    fn test_blank_slug_dropped() {
        let target = NavigationTarget::from_parts("deck", 2, Some("  ".into())).unwrap();
        assert_eq!(target.slug(), None);
    }
}
