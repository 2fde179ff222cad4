use eframe::egui;

// --- Sizing ---
pub const ICON_COL_WIDTH: f32 = 24.0;
pub const ROW_HEIGHT: f32 = 24.0;
pub const NODE_RADIUS: f32 = 18.0;
pub const CANVAS_HEIGHT: f32 = 320.0;

// --- Panel constraints ---
pub const HISTORY_MIN: f32 = 160.0;
pub const HISTORY_MAX: f32 = 480.0;

// --- Modals ---
pub const MODAL_MIN_WIDTH: f32 = 300.0;
pub const MODAL_MAX_WIDTH: f32 = 500.0;
pub const MODAL_WIDTH_RATIO: f32 = 0.6;
pub const MODAL_HEIGHT_RATIO: f32 = 0.8;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(120, 180, 255);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        match self {
            Self::Light => egui::Visuals::light(),
            Self::Dark => egui::Visuals::dark(),
        }
    }
}

pub fn apply_font_size(ctx: &egui::Context, size: f32) {
    ctx.style_mut(|style| {
        for text_style in [egui::TextStyle::Body, egui::TextStyle::Button] {
            if let Some(font) = style.text_styles.get_mut(&text_style) {
                font.size = size;
            }
        }
    });
}

pub fn modal_width(ctx: &egui::Context) -> f32 {
    let width = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.width())
            .unwrap_or(800.0)
    });
    (width * MODAL_WIDTH_RATIO).clamp(MODAL_MIN_WIDTH, MODAL_MAX_WIDTH)
}

pub fn modal_max_height(ctx: &egui::Context) -> f32 {
    let height = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.height())
            .unwrap_or(600.0)
    });
    height * MODAL_HEIGHT_RATIO
}

pub fn truncated_label_with_sense(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
    sense: egui::Sense,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate().sense(sense))
}
