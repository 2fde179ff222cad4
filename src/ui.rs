// UI state - presentation settings and transient messages
use crate::style::Theme;
use std::time::Instant;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AppMode {
    Normal,
    Command,
    Help,
    ResetConfirm,
}

pub struct ModeState {
    pub mode: AppMode,
    pub command_buffer: String,
    pub focus_input: bool,
}

impl ModeState {
    pub fn new() -> Self {
        Self {
            mode: AppMode::Normal,
            command_buffer: String::new(),
            focus_input: false,
        }
    }

    pub fn set_mode(&mut self, mode: AppMode) {
        self.focus_input = mode == AppMode::Command;
        if mode != AppMode::Command {
            self.command_buffer.clear();
        }
        self.mode = mode;
    }
}

pub struct UIState {
    pub theme: Theme,
    pub history_width: f32,
    pub error_message: Option<(String, Instant)>,
    pub info_message: Option<(String, Instant)>,
}

impl UIState {
    pub fn new(theme: Theme, history_width: f32) -> Self {
        Self {
            theme,
            history_width,
            error_message: None,
            info_message: None,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some((message, Instant::now()));
    }

    pub fn set_info(&mut self, message: String) {
        self.info_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_messages(&mut self, timeout_secs: u64) {
        if let Some((_, time)) = &self.error_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.error_message = None;
            }
        }
        if let Some((_, time)) = &self.info_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.info_message = None;
            }
        }
    }
}
