//! Pure label derivation for the context display and the history list.

use crate::model::{NavigationContext, NavigationEntry};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

pub const HOME_LABEL: &str = "Home";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextIcon {
    Slide,
    Scene,
    Deck,
    Home,
}

impl ContextIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Slide => "🖼",
            Self::Scene => "🎬",
            Self::Deck => "🗂",
            Self::Home => "🏠",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContextDisplay {
    pub label: String,
    pub icon: ContextIcon,
    pub subtitle: Option<String>,
}

pub fn format_context(context: &NavigationContext) -> ContextDisplay {
    let (label, icon) = match (&context.scene_slug, &context.slide_id, &context.deck_slug) {
        (Some(scene), Some(slide), _) => (format!("{scene} - Slide {slide}"), ContextIcon::Slide),
        (Some(scene), None, _) => (scene.clone(), ContextIcon::Scene),
        (None, _, Some(deck)) => (deck.clone(), ContextIcon::Deck),
        (None, _, None) => (HOME_LABEL.to_string(), ContextIcon::Home),
    };

    let subtitle = context
        .coordinates
        .map(|c| format!("Position: {}, {}", c.x.round() as i64, c.y.round() as i64));

    ContextDisplay {
        label,
        icon,
        subtitle,
    }
}

/// Relative label for an age in milliseconds, floored to the largest unit.
pub fn format_relative(diff_ms: i64) -> String {
    if diff_ms < MINUTE_MS {
        "Just now".to_string()
    } else if diff_ms < HOUR_MS {
        format!("{}m ago", diff_ms / MINUTE_MS)
    } else if diff_ms < DAY_MS {
        format!("{}h ago", diff_ms / HOUR_MS)
    } else {
        format!("{}d ago", diff_ms / DAY_MS)
    }
}

pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    format_relative(now_ms.saturating_sub(timestamp_ms))
}

/// e.g. `Scene intro`, `Deck #7`.
pub fn entry_title(entry: &NavigationEntry) -> String {
    let target = entry.target();
    match target.slug() {
        Some(slug) => format!("{} {}", target.kind().title(), slug),
        None => format!("{} #{}", target.kind().title(), target.id()),
    }
}

/// Hover text for a history row. Opening a past entry records a new one
/// rather than moving the cursor.
pub fn entry_hint(entry: &NavigationEntry, is_current: bool) -> String {
    if is_current {
        format!("{} (current)", entry.target())
    } else {
        format!("Open {} again as a new history entry", entry.target())
    }
}
