// Panel rendering: navigation controls, context display, history and content

use crate::app::{NavAction, StagesApp};
use crate::style;
use crate::ui::AppMode;
use eframe::egui;
use stagenav::format::{entry_hint, entry_title, format_context, relative_time};
use stagenav::model::{Content, Coordinates};
use std::cell::RefCell;

impl StagesApp {
    pub(crate) fn render_navigation_controls(
        &mut self,
        ui: &mut egui::Ui,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        ui.horizontal(|ui| {
            let back = ui
                .add_enabled(self.navigator.can_go_back(), egui::Button::new("◀"))
                .on_hover_text("Back (Alt+Left)");
            if back.clicked() {
                *next_action.borrow_mut() = Some(NavAction::Back);
            }
            let forward = ui
                .add_enabled(self.navigator.can_go_forward(), egui::Button::new("▶"))
                .on_hover_text("Forward (Alt+Right)");
            if forward.clicked() {
                *next_action.borrow_mut() = Some(NavAction::Forward);
            }
            if ui.button("⟳").on_hover_text("Reload (r)").clicked() {
                *next_action.borrow_mut() = Some(NavAction::Reload);
            }

            ui.separator();
            self.render_context_display(ui);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("?").on_hover_text("Help").clicked() {
                    self.mode.set_mode(AppMode::Help);
                }
                let theme_icon = match self.ui.theme {
                    style::Theme::Dark => "☀",
                    style::Theme::Light => "🌙",
                };
                if ui.button(theme_icon).on_hover_text("Toggle theme (t)").clicked() {
                    *next_action.borrow_mut() = Some(NavAction::ToggleTheme);
                }
                if ui.button(":").on_hover_text("Go to target").clicked() {
                    self.mode.set_mode(AppMode::Command);
                }
                if self.navigator.is_loading() {
                    ui.spinner();
                }
            });
        });
    }

    fn render_context_display(&self, ui: &mut egui::Ui) {
        let display = format_context(self.navigator.context());
        ui.label(
            egui::RichText::new(display.icon.glyph())
                .size(self.config.font.icon_size)
                .color(style::ACCENT),
        );
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&display.label).strong());
            if let Some(subtitle) = &display.subtitle {
                ui.label(egui::RichText::new(subtitle).small().weak());
            }
        });
    }

    pub(crate) fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let history = self.navigator.history();
            let position = history.cursor().map(|c| c + 1).unwrap_or(0);
            ui.label(format!("{}/{} in history", position, history.len()));

            if let Some((message, _)) = &self.ui.error_message {
                ui.colored_label(egui::Color32::RED, format!(" | {}", message));
            } else if let Some((message, _)) = &self.ui.info_message {
                ui.colored_label(style::ACCENT, format!(" | {}", message));
            }
        });
    }

    pub(crate) fn render_history_pane(
        &self,
        ui: &mut egui::Ui,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.heading("History");
        });
        ui.separator();

        let history = self.navigator.history();
        if history.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No history yet").weak());
            });
            return;
        }

        let now = chrono::Utc::now().timestamp_millis();
        let entries = history.entries();
        let cursor = history.cursor();
        let default_color = ui.visuals().text_color();

        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(style::ICON_COL_WIDTH))
                    .column(Column::remainder().clip(true))
                    .column(Column::auto())
                    .body(|body| {
                        body.rows(style::ROW_HEIGHT, entries.len(), |mut row| {
                            // Newest first
                            let index = entries.len() - 1 - row.index();
                            let entry = &entries[index];
                            let is_current = cursor == Some(index);
                            let color = if is_current { style::ACCENT } else { default_color };
                            row.set_selected(is_current);

                            row.col(|ui| {
                                ui.label(egui::RichText::new(if is_current { "●" } else { "○" }).color(color));
                            });
                            row.col(|ui| {
                                let response = style::truncated_label_with_sense(
                                    ui,
                                    egui::RichText::new(entry_title(entry)).color(color),
                                    egui::Sense::click(),
                                )
                                .on_hover_text(entry_hint(entry, is_current));
                                if response.clicked() && !is_current {
                                    *next_action.borrow_mut() = Some(NavAction::Go(
                                        entry.target().clone(),
                                        entry.coordinates(),
                                    ));
                                }
                            });
                            row.col(|ui| {
                                ui.label(
                                    egui::RichText::new(relative_time(entry.timestamp(), now))
                                        .small()
                                        .weak(),
                                );
                            });
                        });
                    });
            });
    }

    pub(crate) fn render_content_pane(
        &self,
        ui: &mut egui::Ui,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        if self.navigator.is_loading() && self.navigator.content().is_none() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        let Some(content) = self.navigator.content() else {
            ui.centered_and_justified(|ui| {
                let hint = if self.navigator.history().is_empty() {
                    "Press : and enter a target such as deck:1:physics"
                } else {
                    "Nothing to show for this destination"
                };
                ui.label(egui::RichText::new(hint).weak());
            });
            return;
        };

        ui.heading(&content.title);
        if let Some(body) = &content.body {
            ui.add_space(6.0);
            ui.label(body);
        }
        ui.add_space(10.0);

        if content.children.iter().any(|c| c.position.is_some()) {
            self.render_canvas(ui, content, next_action);
            ui.add_space(10.0);
        }

        egui::ScrollArea::vertical()
            .id_salt("content_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for child in &content.children {
                    let text = format!("{}  {}", child.target.kind().title(), child.label);
                    if ui.link(text).clicked() {
                        *next_action.borrow_mut() =
                            Some(NavAction::Go(child.target.clone(), child.position));
                    }
                }
            });
    }

    /// Positioned children drawn as a node graph. Clicking a node navigates to
    /// it; clicking empty space moves the current position.
    fn render_canvas(
        &self,
        ui: &mut egui::Ui,
        content: &Content,
        next_action: &RefCell<Option<NavAction>>,
    ) {
        let size = egui::vec2(ui.available_width(), style::CANVAS_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let origin = response.rect.min;
        let visuals = ui.visuals();

        painter.rect_filled(response.rect, 4.0, visuals.extreme_bg_color);

        let nodes: Vec<(egui::Pos2, &stagenav::model::ContentLink)> = content
            .children
            .iter()
            .filter_map(|child| {
                child
                    .position
                    .map(|p| (origin + egui::vec2(p.x as f32, p.y as f32), child))
            })
            .collect();

        let hovered = response.hover_pos();
        for (center, child) in &nodes {
            let is_hovered = hovered.is_some_and(|p| p.distance(*center) <= style::NODE_RADIUS);
            let fill = if is_hovered {
                style::ACCENT
            } else {
                visuals.widgets.inactive.bg_fill
            };
            painter.circle_filled(*center, style::NODE_RADIUS, fill);
            painter.text(
                *center + egui::vec2(0.0, style::NODE_RADIUS + 4.0),
                egui::Align2::CENTER_TOP,
                &child.label,
                egui::FontId::proportional(12.0),
                visuals.text_color(),
            );
        }

        if let Some(coordinates) = self.navigator.context().coordinates {
            let marker = origin + egui::vec2(coordinates.x as f32, coordinates.y as f32);
            painter.circle_stroke(marker, 5.0, egui::Stroke::new(2.0, style::ACCENT));
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let hit = nodes
                    .iter()
                    .find(|(center, _)| pos.distance(*center) <= style::NODE_RADIUS);
                *next_action.borrow_mut() = Some(match hit {
                    Some((_, child)) => NavAction::Go(child.target.clone(), child.position),
                    None => {
                        let local = pos - origin;
                        NavAction::SetPosition(Coordinates::new(local.x as f64, local.y as f64))
                    }
                });
            }
        }
    }
}
