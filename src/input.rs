// Keyboard input handling
use crate::app::{NavAction, StagesApp};
use crate::ui::AppMode;
use eframe::egui;

impl StagesApp {
    pub fn handle_input(&mut self, ctx: &egui::Context) -> Option<NavAction> {
        // 1. Modal inputs
        match self.mode.mode {
            AppMode::Command => {
                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    self.mode.set_mode(AppMode::Normal);
                    return None;
                }
                if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                    let input = self.mode.command_buffer.trim().to_string();
                    self.mode.set_mode(AppMode::Normal);
                    if !input.is_empty() {
                        return Some(NavAction::Command(input));
                    }
                }
                return None;
            }
            AppMode::Help => {
                if ctx.input(|i| {
                    i.key_pressed(egui::Key::Escape)
                        || i.key_pressed(egui::Key::Q)
                        || i.key_pressed(egui::Key::Questionmark)
                }) {
                    self.mode.set_mode(AppMode::Normal);
                }
                return None;
            }
            AppMode::ResetConfirm => {
                if ctx.input(|i| i.key_pressed(egui::Key::Y) || i.key_pressed(egui::Key::Enter)) {
                    return Some(NavAction::Reset);
                }
                if ctx.input(|i| i.key_pressed(egui::Key::N) || i.key_pressed(egui::Key::Escape)) {
                    self.mode.set_mode(AppMode::Normal);
                }
                return None;
            }
            AppMode::Normal => {}
        }

        // 2. Global history keys
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft)) {
            return Some(NavAction::Back);
        }
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight)) {
            return Some(NavAction::Forward);
        }
        if ctx.input(|i| {
            i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::Delete)
        }) {
            self.mode.set_mode(AppMode::ResetConfirm);
            return None;
        }

        // 3. Normal mode triggers
        if ctx.input(|i| i.key_pressed(egui::Key::Colon)) {
            self.mode.set_mode(AppMode::Command);
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
            self.mode.set_mode(AppMode::Help);
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::R) && i.modifiers.is_none()) {
            return Some(NavAction::Reload);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::T) && i.modifiers.is_none()) {
            return Some(NavAction::ToggleTheme);
        }

        None
    }
}
