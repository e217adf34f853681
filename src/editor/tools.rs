use bevy::prelude::*;
use bevy::window::{CursorIcon, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::annotations::ShapeKind;

use super::board::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartTool {
    #[default]
    Select,
    Trendline,
    HorizontalRay,
    Rectangle,
    Circle,
    Fibonacci,
    Angle,
    Text,
}

impl ChartTool {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartTool::Select => "Select (V)",
            ChartTool::Trendline => "Trendline (T)",
            ChartTool::HorizontalRay => "Horizontal Ray (H)",
            ChartTool::Rectangle => "Rectangle (R)",
            ChartTool::Circle => "Circle (C)",
            ChartTool::Fibonacci => "Fibonacci (F)",
            ChartTool::Angle => "Angle (A)",
            ChartTool::Text => "Text (X)",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ChartTool::Select => CursorIcon::System(SystemCursorIcon::Default),
            ChartTool::Text => CursorIcon::System(SystemCursorIcon::Text),
            _ => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }

    pub fn all() -> &'static [ChartTool] {
        &[
            ChartTool::Select,
            ChartTool::Trendline,
            ChartTool::HorizontalRay,
            ChartTool::Rectangle,
            ChartTool::Circle,
            ChartTool::Fibonacci,
            ChartTool::Angle,
            ChartTool::Text,
        ]
    }

    /// Shape kind created by this tool, `None` for the select tool
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            ChartTool::Select => None,
            ChartTool::Trendline => Some(ShapeKind::Trendline),
            ChartTool::HorizontalRay => Some(ShapeKind::HorizontalRay),
            ChartTool::Rectangle => Some(ShapeKind::Rectangle),
            ChartTool::Circle => Some(ShapeKind::Circle),
            ChartTool::Fibonacci => Some(ShapeKind::Fibonacci),
            ChartTool::Angle => Some(ShapeKind::Angle),
            ChartTool::Text => Some(ShapeKind::Text),
        }
    }

    pub fn is_drawing_tool(&self) -> bool {
        self.shape_kind().is_some()
    }

    fn from_key(keyboard: &ButtonInput<KeyCode>) -> Option<ChartTool> {
        const KEYS: [(KeyCode, ChartTool); 8] = [
            (KeyCode::KeyV, ChartTool::Select),
            (KeyCode::KeyT, ChartTool::Trendline),
            (KeyCode::KeyH, ChartTool::HorizontalRay),
            (KeyCode::KeyR, ChartTool::Rectangle),
            (KeyCode::KeyC, ChartTool::Circle),
            (KeyCode::KeyF, ChartTool::Fibonacci),
            (KeyCode::KeyA, ChartTool::Angle),
            (KeyCode::KeyX, ChartTool::Text),
        ];
        KEYS.iter()
            .find(|(key, _)| keyboard.just_pressed(*key))
            .map(|(_, tool)| *tool)
    }
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<Board>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    // Leave Ctrl+<key> combinations to the history shortcuts
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl {
        return;
    }

    if let Some(tool) = ChartTool::from_key(&keyboard)
        && tool != board.tool()
        && !board.set_tool(tool)
    {
        debug!("Ignoring switch to {:?} during an active gesture", tool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_contain_shortcuts() {
        for tool in ChartTool::all() {
            let name = tool.display_name();
            assert!(name.contains('('), "Display name should contain shortcut: {}", name);
            assert!(name.contains(')'), "Display name should contain shortcut: {}", name);
        }
    }

    #[test]
    fn test_every_shape_kind_has_a_tool() {
        let kinds: Vec<ShapeKind> = ChartTool::all().iter().filter_map(|t| t.shape_kind()).collect();
        assert_eq!(kinds.len(), 7);
        assert!(kinds.contains(&ShapeKind::Text));
        assert!(kinds.contains(&ShapeKind::Fibonacci));
    }

    #[test]
    fn test_default_tool_is_select() {
        assert_eq!(ChartTool::default(), ChartTool::Select);
        assert!(!ChartTool::Select.is_drawing_tool());
        assert!(ChartTool::Angle.is_drawing_tool());
    }

    #[test]
    fn test_drawing_tools_have_crosshair() {
        for tool in ChartTool::all() {
            let icon = tool.cursor_icon();
            assert!(matches!(icon, CursorIcon::System(_)));
        }
        assert_eq!(
            ChartTool::Rectangle.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
        assert_eq!(
            ChartTool::Text.cursor_icon(),
            CursorIcon::System(SystemCursorIcon::Text)
        );
    }

    #[test]
    fn test_shortcut_lookup() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert_eq!(ChartTool::from_key(&keyboard), None);
        keyboard.press(KeyCode::KeyF);
        assert_eq!(ChartTool::from_key(&keyboard), Some(ChartTool::Fibonacci));
    }
}
