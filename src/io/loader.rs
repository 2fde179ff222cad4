use crate::error::LoadError;
use crate::model::{is_plain_slug, Content, ContentLink, Coordinates, NavigationTarget, TargetKind};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves a target into the data needed to render it.
pub trait ContentLoader: Send {
    fn load(&self, target: &NavigationTarget) -> Result<Content, LoadError>;
}

/// Reads TOML documents laid out as `<root>/{scenes,decks}/<slug-or-id>.toml`.
/// Slides live under their scene: `<root>/slides/<scene>/<id>.toml`, or
/// `<root>/slides/<id>.toml` when the scene is unknown.
pub struct FsContentLoader {
    root: PathBuf,
}

#[derive(Deserialize)]
struct ContentDoc {
    title: Option<String>,
    body: Option<String>,
    #[serde(default)]
    children: Vec<LinkDoc>,
}

#[derive(Deserialize)]
struct LinkDoc {
    label: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    slug: Option<String>,
    position: Option<PositionDoc>,
}

#[derive(Deserialize)]
struct PositionDoc {
    x: f64,
    y: f64,
}

impl FsContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(kind: TargetKind) -> &'static str {
        match kind {
            TargetKind::Scene => "scenes",
            TargetKind::Deck => "decks",
            TargetKind::Context => "slides",
        }
    }

    /// Slug file first, then the id file. Slugs that would leave the kind
    /// directory are skipped.
    fn candidates(&self, target: &NavigationTarget) -> Vec<PathBuf> {
        let dir = self.root.join(Self::kind_dir(target.kind()));
        let id_file = format!("{}.toml", target.id());
        let mut paths = Vec::with_capacity(2);
        match (target, target.slug().filter(|s| is_plain_slug(s))) {
            (NavigationTarget::Context(_), Some(scene)) => {
                paths.push(dir.join(scene).join(&id_file));
            }
            (_, Some(slug)) => paths.push(dir.join(format!("{slug}.toml"))),
            (_, None) => {}
        }
        paths.push(dir.join(id_file));
        paths
    }
}

impl ContentLoader for FsContentLoader {
    fn load(&self, target: &NavigationTarget) -> Result<Content, LoadError> {
        let Some(path) = self.candidates(target).into_iter().find(|p| p.is_file()) else {
            return Err(LoadError::NotFound {
                kind: target.kind().as_str(),
                key: target.target_ref().key(),
            });
        };
        debug!(path = %path.display(), "Reading content document");

        let doc: ContentDoc = toml::from_str(&fs::read_to_string(&path)?)?;

        let children = doc
            .children
            .into_iter()
            .map(|link| -> Result<ContentLink, LoadError> {
                let target = NavigationTarget::from_parts(&link.kind, link.id, link.slug)?;
                let label = link.label.unwrap_or_else(|| {
                    format!("{} {}", target.kind().title(), target.target_ref().key())
                });
                Ok(ContentLink {
                    label,
                    target,
                    position: link.position.map(|p| Coordinates::new(p.x, p.y)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Content {
            target: target.clone(),
            title: doc
                .title
                .unwrap_or_else(|| format!("{} {}", target.kind().title(), target.target_ref().key())),
            body: doc.body,
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetRef;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_loads_deck_with_children() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "decks/physics.toml",
            r#"
title = "Physics"
body = "Forces and motion"

[[children]]
label = "Intro"
type = "scene"
id = 3
slug = "intro"
position = { x = 10.5, y = 20.0 }

[[children]]
type = "slide"
id = 4
"#,
        );

        let loader = FsContentLoader::new(dir.path());
        let content = loader
            .load(&NavigationTarget::Deck(TargetRef::with_slug(1, "physics")))
            .unwrap();

        assert_eq!(content.title, "Physics");
        assert_eq!(content.body.as_deref(), Some("Forces and motion"));
        assert_eq!(content.children.len(), 2);
        assert_eq!(content.children[0].label, "Intro");
        assert_eq!(content.children[0].position, Some(Coordinates::new(10.5, 20.0)));
        assert_eq!(content.children[1].label, "Slide 4");
        assert_eq!(
            content.children[1].target,
            NavigationTarget::Context(TargetRef::new(4))
        );
    }

    #[test]
    fn test_falls_back_to_id_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "scenes/3.toml", "");

        let loader = FsContentLoader::new(dir.path());
        let content = loader
            .load(&NavigationTarget::Scene(TargetRef::with_slug(3, "intro")))
            .unwrap();
        assert_eq!(content.title, "Scene intro");
        assert!(content.children.is_empty());
    }

    #[test]
    fn test_slide_under_scene() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "slides/intro/3.toml", "title = \"Velocity\"\n");
        write(dir.path(), "slides/3.toml", "title = \"Other\"\n");

        let loader = FsContentLoader::new(dir.path());
        let scoped = loader
            .load(&NavigationTarget::Context(TargetRef::with_slug(3, "intro")))
            .unwrap();
        let bare = loader
            .load(&NavigationTarget::Context(TargetRef::new(3)))
            .unwrap();
        assert_eq!(scoped.title, "Velocity");
        assert_eq!(bare.title, "Other");
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let loader = FsContentLoader::new(dir.path());
        let err = loader
            .load(&NavigationTarget::Scene(TargetRef::new(42)))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { kind: "scene", .. }));
    }

    #[test]
    fn test_slug_cannot_escape_root() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "secret.toml", "title = \"Secret\"\n");
        write(dir.path(), "content/scenes/1.toml", "title = \"Intro\"\n");

        let loader = FsContentLoader::new(dir.path().join("content"));
        let content = loader
            .load(&NavigationTarget::Scene(TargetRef::with_slug(1, "../../secret")))
            .unwrap();
        assert_eq!(content.title, "Intro");

        let err = loader
            .load(&NavigationTarget::Deck(TargetRef::with_slug(9, "../../secret")))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { kind: "deck", .. }));
    }

    #[test]
    fn test_path_like_child_slug_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "decks/1.toml",
            "[[children]]\ntype = \"scene\"\nid = 1\nslug = \"../x\"\n",
        );
        let loader = FsContentLoader::new(dir.path());
        let err = loader
            .load(&NavigationTarget::Deck(TargetRef::new(1)))
            .unwrap_err();
        assert!(matches!(err, LoadError::Link(_)));
    }

    #[test]
    fn test_unknown_child_type_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "decks/1.toml",
            "[[children]]\ntype = \"stage\"\nid = 1\n",
        );
        let loader = FsContentLoader::new(dir.path());
        let err = loader
            .load(&NavigationTarget::Deck(TargetRef::new(1)))
            .unwrap_err();
        assert!(matches!(err, LoadError::Link(_)));
    }
}
