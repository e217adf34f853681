//! The annotation board: shape collection, selection, gesture state and history.
//!
//! All mutation goes through [`Board`] methods driven by pointer and keyboard
//! systems. A gesture mutates shapes in place on every pointer move but only
//! records a history entry when it ends.

use std::mem;

use bevy::prelude::*;

use crate::annotations::{
    ApproxTextMetrics, FibLevels, Handle, Shape, ShapeId, ShapeKind, TextMetrics, ToolSettings,
    create_draft, create_text, extend_draft, handle_at, is_draft_valid, resolve,
};
use crate::common::DragMode;

use super::history::SnapshotHistory;
use super::interaction::{InteractionState, PointerDown};
use super::paint::{Background, PaintOp, paint_ops};
use super::tools::ChartTool;

#[cfg(test)]
mod tests;

#[derive(Resource)]
pub struct Board {
    shapes: Vec<Shape>,
    history: SnapshotHistory<Vec<Shape>>,
    selected: Option<ShapeId>,
    tool: ChartTool,
    interaction: InteractionState,
    next_id: u64,
    metrics: Box<dyn TextMetrics>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Box::new(ApproxTextMetrics))
    }
}

fn shape_mut(shapes: &mut [Shape], id: ShapeId) -> Option<&mut Shape> {
    shapes.iter_mut().find(|shape| shape.id == id)
}

impl Board {
    pub fn new(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            shapes: Vec::new(),
            history: SnapshotHistory::new(Vec::new()),
            selected: None,
            tool: ChartTool::default(),
            interaction: InteractionState::Idle,
            next_id: 1,
            metrics,
        }
    }

    /// Replace how text labels are measured for hit testing
    pub fn set_text_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.metrics = metrics;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    pub fn tool(&self) -> ChartTool {
        self.tool
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn is_idle(&self) -> bool {
        self.interaction.is_idle()
    }

    pub fn history(&self) -> &SnapshotHistory<Vec<Shape>> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.is_idle() && self.history.can_redo()
    }

    /// Switch the active tool. Rejected while a gesture is in progress.
    pub fn set_tool(&mut self, tool: ChartTool) -> bool {
        if !self.is_idle() {
            return false;
        }
        if tool != self.tool {
            // Clear selection when switching tools
            self.selected = None;
            debug!("Tool changed: {:?} -> {:?}", self.tool, tool);
        }
        self.tool = tool;
        true
    }

    pub fn pointer_down(&mut self, settings: &ToolSettings, pos: Vec2) -> PointerDown {
        if !self.is_idle() {
            return PointerDown::Ignored;
        }

        match self.tool.shape_kind() {
            None => self.press_select(pos),
            Some(ShapeKind::Text) => PointerDown::TextRequested(pos),
            Some(kind) => {
                let draft = create_draft(self.allocate_id(), kind, pos, settings);
                debug!("Drawing {} from {:?}", kind.display_name(), pos);
                self.interaction = InteractionState::Drawing { draft };
                PointerDown::DrawingStarted
            }
        }
    }

    fn press_select(&mut self, pos: Vec2) -> PointerDown {
        // Handles of the selected shape take priority over whole-shape hits
        let grabbed = self.selected_shape().and_then(|shape| {
            let handle = handle_at(pos, shape)?;
            Some((shape.id, handle, shape.text().map(|label| label.center)))
        });
        if let Some((id, handle, pivot)) = grabbed {
            return match (handle, pivot) {
                (Handle::Rotate, Some(pivot)) => {
                    self.interaction = InteractionState::Rotating { shape: id, pivot };
                    PointerDown::Rotating(id)
                }
                _ => {
                    self.interaction = InteractionState::Resizing { shape: id, handle };
                    PointerDown::Resizing(id, handle)
                }
            };
        }

        match resolve(pos, &self.shapes, self.metrics.as_ref()).map(|shape| shape.id) {
            Some(id) => {
                self.selected = Some(id);
                self.interaction = InteractionState::Moving {
                    shape: id,
                    last: pos,
                };
                PointerDown::Selected(id)
            }
            None => {
                self.selected = None;
                PointerDown::Deselected
            }
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        match &mut self.interaction {
            InteractionState::Idle => {}
            InteractionState::Drawing { draft } => extend_draft(draft, pos),
            InteractionState::Moving { shape, last } => {
                let delta = pos - *last;
                *last = pos;
                if let Some(target) = shape_mut(&mut self.shapes, *shape) {
                    *target = target.translate(delta);
                }
            }
            InteractionState::Resizing { shape, handle } => {
                if let Some(index) = handle.index()
                    && let Some(target) = shape_mut(&mut self.shapes, *shape)
                {
                    target.drag_control_point(index, pos);
                }
            }
            InteractionState::Rotating { shape, pivot } => {
                let degrees = (pos.y - pivot.y).atan2(pos.x - pivot.x).to_degrees() + 90.0;
                if let Some(target) = shape_mut(&mut self.shapes, *shape) {
                    target.set_rotation(degrees);
                }
            }
        }
    }

    /// End the gesture at `pos`. Returns true when a history entry was recorded.
    pub fn pointer_up(&mut self, pos: Vec2) -> bool {
        self.pointer_move(pos);
        self.finish_gesture()
    }

    /// The pointer left the surface mid-gesture. Ends it like a release.
    pub fn pointer_cancel(&mut self) -> bool {
        self.finish_gesture()
    }

    fn finish_gesture(&mut self) -> bool {
        match mem::take(&mut self.interaction) {
            InteractionState::Idle => false,
            InteractionState::Drawing { draft } => {
                if !is_draft_valid(&draft) {
                    debug!("Discarding degenerate {}", draft.kind().display_name());
                    return false;
                }
                self.shapes.push(draft);
                self.commit("draw")
            }
            InteractionState::Moving { .. } => self.commit("move"),
            InteractionState::Resizing { .. } => self.commit("resize"),
            InteractionState::Rotating { .. } => self.commit("rotate"),
        }
    }

    /// Create a text label in one step after a [`PointerDown::TextRequested`].
    pub fn place_text(
        &mut self,
        settings: &ToolSettings,
        anchor: Vec2,
        text: &str,
    ) -> Option<ShapeId> {
        if !self.is_idle() {
            return None;
        }
        let label = create_text(ShapeId(self.next_id), anchor, text, settings);
        if !is_draft_valid(&label) {
            return None;
        }
        let id = self.allocate_id();
        self.shapes.push(label);
        self.commit("text");
        Some(id)
    }

    pub fn delete_selected(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(id) = self.selected.take() else {
            return false;
        };
        let before = self.shapes.len();
        self.shapes.retain(|shape| shape.id != id);
        self.shapes.len() != before && self.commit("delete")
    }

    pub fn clear_all(&mut self) -> bool {
        if !self.is_idle() || self.shapes.is_empty() {
            return false;
        }
        self.shapes.clear();
        self.selected = None;
        self.commit("clear")
    }

    pub fn undo(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.shapes = snapshot.clone();
        self.selected = None;
        debug!("Undo -> history entry {}", self.history.cursor());
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.shapes = snapshot.clone();
        self.selected = None;
        debug!("Redo -> history entry {}", self.history.cursor());
        true
    }

    /// Replace the level set of the selected fibonacci shape
    pub fn set_selected_fibonacci_levels(&mut self, levels: FibLevels) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(id) = self.selected else {
            return false;
        };
        match shape_mut(&mut self.shapes, id).map(|shape| shape.set_fibonacci_levels(levels)) {
            Some(true) => self.commit("fibonacci levels"),
            _ => false,
        }
    }

    /// Replace the whole collection with imported shapes as one undoable step.
    ///
    /// Shapes get fresh ids so the collection stays unique.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) -> bool {
        if !self.is_idle() {
            return false;
        }
        let mut renumbered = shapes;
        for shape in &mut renumbered {
            shape.id = self.allocate_id();
        }
        self.shapes = renumbered;
        self.selected = None;
        self.commit("import")
    }

    /// Read-only copy of the committed collection
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn paint_ops(&self, background: Background) -> Vec<PaintOp<'_>> {
        paint_ops(
            background,
            &self.shapes,
            self.interaction.draft(),
            self.selected_shape(),
        )
    }

    /// What a press at `pos` would start, for cursor feedback
    pub fn hover_mode(&self, pos: Vec2) -> DragMode {
        if !self.is_idle() {
            return self.interaction.drag_mode();
        }
        if self.tool != ChartTool::Select {
            return DragMode::None;
        }
        if let Some(shape) = self.selected_shape()
            && let Some(handle) = handle_at(pos, shape)
        {
            return match handle {
                Handle::Rotate => DragMode::Rotate,
                Handle::Start | Handle::End => DragMode::Resize,
            };
        }
        if resolve(pos, &self.shapes, self.metrics.as_ref()).is_some() {
            DragMode::Move
        } else {
            DragMode::None
        }
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record the collection as a history entry unless nothing changed
    fn commit(&mut self, action: &str) -> bool {
        if self.history.current() == Some(&self.shapes) {
            debug!("Skipping {} commit with no net change", action);
            return false;
        }
        self.history.commit(self.shapes.clone());
        debug!(
            "Committed {} ({} shapes, history entry {})",
            action,
            self.shapes.len(),
            self.history.cursor()
        );
        true
    }
}
