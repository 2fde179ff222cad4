// Modal rendering functions (Help, Command input, Reset confirmation)

use crate::app::{NavAction, StagesApp};
use crate::style;
use crate::ui::AppMode;
use eframe::egui;
use std::cell::RefCell;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Alt + Left", "Back"),
    ("Alt + Right", "Forward"),
    ("r", "Reload Current"),
    (":", "Go to Target"),
    ("t", "Toggle Theme"),
    ("Ctrl+Shift+Delete", "Clear History"),
    ("?", "Toggle Help"),
    ("Esc", "Close"),
];

impl StagesApp {
    pub(crate) fn render_help_modal(&mut self, ctx: &egui::Context) {
        if self.mode.mode != AppMode::Help {
            return;
        }
        egui::Window::new("Help")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                ui.set_max_height(style::modal_max_height(ctx));
                ui.heading("Key Bindings");
                ui.separator();
                egui::Grid::new("help_grid").striped(true).show(ui, |ui| {
                    for (keys, action) in KEY_BINDINGS {
                        ui.label(*keys);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
                ui.add_space(8.0);
                ui.label("Targets are written kind:id[:slug], e.g. scene:3:intro.");
                ui.label("Kinds: scene, deck, context (or slide).");
            });
    }

    pub(crate) fn render_command_modal(
        &mut self,
        ctx: &egui::Context,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        if self.mode.mode != AppMode::Command {
            return;
        }
        egui::Window::new("Go to")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 80.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.mode.command_buffer)
                        .hint_text("deck:1:physics")
                        .desired_width(f32::INFINITY),
                );
                if self.mode.focus_input {
                    response.request_focus();
                    self.mode.focus_input = false;
                }
                ui.horizontal(|ui| {
                    if ui.button("Go").clicked() {
                        let input = self.mode.command_buffer.trim().to_string();
                        if !input.is_empty() {
                            *next_action.borrow_mut() = Some(NavAction::Command(input));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.mode.set_mode(AppMode::Normal);
                    }
                });
            });
    }

    pub(crate) fn render_reset_modal(
        &mut self,
        ctx: &egui::Context,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        if self.mode.mode != AppMode::ResetConfirm {
            return;
        }
        egui::Window::new("Clear history?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Discard {} history entries and return Home?",
                    self.navigator.history().len()
                ));
                ui.horizontal(|ui| {
                    if ui.button("Clear (y)").clicked() {
                        *next_action.borrow_mut() = Some(NavAction::Reset);
                    }
                    if ui.button("Keep (n)").clicked() {
                        self.mode.set_mode(AppMode::Normal);
                    }
                });
            });
    }
}
