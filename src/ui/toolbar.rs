use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotations::{FibLevels, ShapeKind, ToolSettings};
use crate::config::{AppConfig, SaveConfigRequest};
use crate::editor::{Board, Canvas, ChartTool};
use crate::theme;

use super::file_menu::{FileMenuState, annotations_dir, suggested_export_name};

/// Ratio typed into the "add level" field of the fibonacci editor
pub struct NewLevelInput(f32);

impl Default for NewLevelInput {
    fn default() -> Self {
        Self(1.618)
    }
}

/// Main toolbar showing the file menu, tools and history commands
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut board: ResMut<Board>,
    mut menu_state: ResMut<FileMenuState>,
    config: Res<AppConfig>,
    canvas: Res<Canvas>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                ui.menu_button("File", |ui| {
                    if ui.button("Open Chart Image...").clicked() {
                        let start_dir = config
                            .data
                            .last_background_path
                            .as_deref()
                            .and_then(|p| p.parent())
                            .map(|p| p.to_path_buf());
                        menu_state.browse_background(start_dir);
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Import Annotations...").clicked() {
                        menu_state.browse_import(annotations_dir(&config));
                        ui.close();
                    }

                    if ui.button("Export Annotations...").clicked() {
                        menu_state.browse_export(
                            annotations_dir(&config),
                            suggested_export_name(canvas.image_path.as_deref()),
                        );
                        ui.close();
                    }
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                // Tool buttons with keyboard shortcuts
                for tool in ChartTool::all() {
                    let selected = board.tool() == *tool;
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        board.set_tool(*tool);
                    }
                    response.on_hover_text(tool.display_name());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .add_enabled(board.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    board.undo();
                }
                if ui
                    .add_enabled(board.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y / Ctrl+Shift+Z")
                    .clicked()
                {
                    board.redo();
                }

                let can_delete = board.is_idle() && board.selected().is_some();
                if ui
                    .add_enabled(can_delete, egui::Button::new("Delete"))
                    .on_hover_text("Delete / Backspace")
                    .clicked()
                {
                    board.delete_selected();
                }

                let can_clear = board.is_idle() && !board.shapes().is_empty();
                if ui
                    .add_enabled(can_clear, egui::Button::new("Clear All"))
                    .clicked()
                {
                    menu_state.show_clear_confirmation = true;
                }

                // Right-aligned canvas info
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let name = canvas
                        .image_path
                        .as_deref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No chart loaded".to_string());
                    ui.label(
                        egui::RichText::new(format!(
                            "{}  {}x{}",
                            name, canvas.size.x as u32, canvas.size.y as u32
                        ))
                        .color(theme::ui::HINT_TEXT),
                    );
                });
            });
        });
    Ok(())
}

/// Secondary toolbar with the settings new shapes are created with
pub fn tool_settings_ui(
    mut contexts: EguiContexts,
    mut board: ResMut<Board>,
    mut settings: ResMut<ToolSettings>,
    mut new_level: Local<NewLevelInput>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let mut committed = false;

    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                // Edit a copy so change detection only fires on real edits
                let mut edited = settings.clone();

                ui.label(egui::RichText::new("Color:").color(theme::ui::LABEL_TEXT));
                for (color, name) in theme::annotation_colors() {
                    let is_selected = same_color(edited.color, color);
                    let button = egui::Button::new("")
                        .fill(theme::bevy_to_egui(color))
                        .min_size(egui::vec2(18.0, 18.0))
                        .stroke(if is_selected {
                            egui::Stroke::new(2.0, theme::ui::SELECTED_BORDER)
                        } else {
                            egui::Stroke::new(1.0, theme::ui::UNSELECTED_BORDER)
                        });

                    let response = ui.add(button);
                    if response.clicked() {
                        edited.color = color;
                        committed = true;
                    }
                    response.on_hover_text(name);
                }

                let mut custom = theme::bevy_to_egui(edited.color);
                let response = ui.color_edit_button_srgba(&mut custom);
                if response.changed() {
                    edited.color = theme::egui_to_bevy(custom);
                }
                committed |= response.lost_focus() || response.clicked_elsewhere();

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);

                ui.label("Width:");
                let response = ui.add(
                    egui::DragValue::new(&mut edited.stroke_width)
                        .range(1.0..=20.0)
                        .speed(0.5)
                        .suffix(" px"),
                );
                committed |= value_committed(&response);

                ui.label("Font Size:");
                let response = ui.add(
                    egui::DragValue::new(&mut edited.font_size)
                        .range(8.0..=72.0)
                        .speed(1.0)
                        .suffix(" pt"),
                );
                committed |= value_committed(&response);

                committed |= ui.checkbox(&mut edited.text_bold, "Bold").changed();
                committed |= ui.checkbox(&mut edited.text_italic, "Italic").changed();

                if edited != *settings {
                    *settings = edited;
                }
            });

            // Fibonacci levels: edit the selected retracement, otherwise the defaults
            let selected_levels = board
                .selected_shape()
                .filter(|shape| shape.kind() == ShapeKind::Fibonacci)
                .and_then(|shape| shape.fibonacci_levels().cloned());
            let editing_shape = selected_levels.is_some();

            if editing_shape || board.tool() == ChartTool::Fibonacci {
                let mut levels =
                    selected_levels.unwrap_or_else(|| settings.fibonacci_levels.clone());
                let heading = if editing_shape {
                    "Selected Retracement:"
                } else {
                    "Fibonacci Levels:"
                };

                let changed = ui
                    .horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(heading).color(theme::ui::LABEL_TEXT));
                        fibonacci_levels_editor(ui, &mut levels, &mut new_level.0)
                    })
                    .inner;

                if changed {
                    if editing_shape {
                        board.set_selected_fibonacci_levels(levels);
                    } else {
                        settings.fibonacci_levels = levels;
                        committed = true;
                    }
                }
            }
        });

    if committed {
        save_events.write(SaveConfigRequest);
    }
    Ok(())
}

/// Checkbox per level, remove buttons for removable levels and an add field.
/// Returns true when `levels` changed.
fn fibonacci_levels_editor(
    ui: &mut egui::Ui,
    levels: &mut FibLevels,
    new_ratio: &mut f32,
) -> bool {
    let mut toggle = None;
    let mut remove = None;

    for level in levels.iter() {
        let mut enabled = level.enabled;
        if ui.checkbox(&mut enabled, level.label()).changed() {
            toggle = Some(level.ratio);
        }
        if !level.is_permanent() && ui.small_button("x").on_hover_text("Remove level").clicked() {
            remove = Some(level.ratio);
        }
    }

    let mut changed = false;
    if let Some(ratio) = toggle {
        changed |= levels.toggle(ratio).is_some();
    }
    if let Some(ratio) = remove {
        changed |= levels.remove(ratio);
    }

    ui.add_space(8.0);
    ui.add(
        egui::DragValue::new(new_ratio)
            .range(-5.0..=5.0)
            .speed(0.001)
            .fixed_decimals(3),
    );
    let can_add = !levels.contains(*new_ratio);
    if ui.add_enabled(can_add, egui::Button::new("Add Level")).clicked() {
        changed |= levels.add(*new_ratio);
    }

    changed
}

/// A drag finished or a typed value was confirmed
fn value_committed(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

fn same_color(a: Color, b: Color) -> bool {
    let (a, b) = (a.to_srgba(), b.to_srgba());
    (a.red - b.red).abs() < 0.01
        && (a.green - b.green).abs() < 0.01
        && (a.blue - b.blue).abs() < 0.01
}

/// Get the button label for a tool (with keyboard shortcut)
fn tool_button_label(tool: &ChartTool) -> &'static str {
    match tool {
        ChartTool::Select => "Select [V]",
        ChartTool::Trendline => "Trend [T]",
        ChartTool::HorizontalRay => "Ray [H]",
        ChartTool::Rectangle => "Rect [R]",
        ChartTool::Circle => "Circle [C]",
        ChartTool::Fibonacci => "Fib [F]",
        ChartTool::Angle => "Angle [A]",
        ChartTool::Text => "Text [X]",
    }
}
