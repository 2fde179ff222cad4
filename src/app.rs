use crate::style::{self, Theme};
use crate::ui::{AppMode, ModeState, UIState};
use eframe::egui;
use notify::RecommendedWatcher;
use stagenav::config::Config;
use stagenav::io::{spawn_worker, FsContentLoader, IoResult};
use stagenav::model::{Coordinates, NavigationTarget};
use stagenav::state::Navigator;
use stagenav::subscription::{content_watcher, drain_changes};
use std::cell::RefCell;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::{info, warn};

/// Intents collected while rendering and applied once the frame is laid out.
#[derive(Debug, Clone)]
pub enum NavAction {
    Back,
    Forward,
    Reload,
    Go(NavigationTarget, Option<Coordinates>),
    SetPosition(Coordinates),
    Command(String),
    Reset,
    ToggleTheme,
}

pub struct StagesApp {
    pub navigator: Navigator,
    pub result_rx: Receiver<IoResult>,
    pub config: Config,
    pub ui: UIState,
    pub mode: ModeState,
    watch_rx: Option<Receiver<()>>,
    _watcher: Option<RecommendedWatcher>,
}

impl StagesApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let ctx = cc.egui_ctx.clone();
        style::apply_font_size(&ctx, config.font.font_size);

        let root = config.content.root.clone();
        info!(root = %root.display(), "Loading content");

        let repaint_ctx = ctx.clone();
        let (command_tx, result_rx) =
            spawn_worker(FsContentLoader::new(&root), move || repaint_ctx.request_repaint());

        let (watcher, watch_rx) = if config.content.watch {
            let watch_ctx = ctx.clone();
            match content_watcher(&root, move || watch_ctx.request_repaint()) {
                Ok((watcher, rx)) => (Some(watcher), Some(rx)),
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Content watching disabled");
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        let ui = UIState::new(
            if config.is_dark() { Theme::Dark } else { Theme::Light },
            config
                .panel
                .history_width
                .clamp(style::HISTORY_MIN, style::HISTORY_MAX),
        );

        let mut app = Self {
            navigator: Navigator::new(command_tx),
            result_rx,
            config,
            ui,
            mode: ModeState::new(),
            watch_rx,
            _watcher: watcher,
        };

        if let Some(start) = app.config.content.start.clone() {
            app.run(NavAction::Command(start));
        }
        app
    }

    pub fn run(&mut self, action: NavAction) {
        let result = match action {
            NavAction::Back => self.navigator.navigate_back().map(|_| ()),
            NavAction::Forward => self.navigator.navigate_forward().map(|_| ()),
            NavAction::Reload => self.navigator.reload().map(|_| ()),
            NavAction::Go(target, coordinates) => {
                self.navigator.navigate_to(target, coordinates).map(|_| ())
            }
            NavAction::SetPosition(coordinates) => {
                self.navigator.set_coordinates(Some(coordinates));
                Ok(())
            }
            NavAction::Command(input) => self.navigator.navigate_to_str(&input).map(|_| ()),
            NavAction::Reset => {
                self.navigator.reset();
                self.ui.set_info("History cleared".into());
                Ok(())
            }
            NavAction::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.ui.set_error(e.to_string());
        }
    }

    fn toggle_theme(&mut self) {
        self.ui.theme = self.ui.theme.toggle();
        self.config.theme.mode = self.ui.theme.as_str().to_string();
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to persist theme preference");
        }
    }

    fn process_io_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            if self.navigator.apply(result) {
                if let Some(message) = self.navigator.take_error() {
                    self.ui.set_error(message);
                }
            }
        }
    }

    fn process_content_changes(&mut self) {
        let Some(rx) = &self.watch_rx else {
            return;
        };
        if drain_changes(rx) {
            if let Err(e) = self.navigator.content_changed() {
                self.ui.set_error(e.to_string());
            }
        }
    }

    pub fn title(&self) -> String {
        let display = stagenav::format::format_context(self.navigator.context());
        format!("Stages - {}", display.label)
    }
}

impl eframe::App for StagesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_io_results();
        self.process_content_changes();
        self.ui.clear_expired_messages(style::MESSAGE_TIMEOUT_SECS);
        ctx.set_visuals(self.ui.theme.visuals());
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.title()));

        let next_action = RefCell::new(self.handle_input(ctx));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_navigation_controls(ui, &next_action);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        let history_panel = egui::SidePanel::left("history_panel")
            .resizable(true)
            .default_width(self.ui.history_width)
            .width_range(style::HISTORY_MIN..=style::HISTORY_MAX)
            .show(ctx, |ui| {
                self.render_history_pane(ui, &next_action);
            });
        self.ui.history_width = history_panel.response.rect.width();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_content_pane(ui, &next_action);
        });

        self.render_help_modal(ctx);
        self.render_command_modal(ctx, &next_action);
        self.render_reset_modal(ctx, &next_action);

        if let Some(action) = next_action.into_inner() {
            if matches!(self.mode.mode, AppMode::Command | AppMode::ResetConfirm) {
                self.mode.set_mode(AppMode::Normal);
            }
            self.run(action);
        }

        if self.navigator.is_loading() {
            ctx.request_repaint();
        } else {
            // Relative times in the history pane
            ctx.request_repaint_after(Duration::from_secs(30));
        }
    }
}
