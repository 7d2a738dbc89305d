//! Editing modes and the element-creation state machine.

use crate::hit_test::{self, NODE_TOLERANCE};
use crate::viewport::Viewport;
use beamsketch_model::{ElementKind, Model, ModelIntent, NodeId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Top-level editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Inspect mode; plain clicks mutate nothing.
    #[default]
    Select,
    /// Each click places a node at the cursor's world position.
    PlaceNode,
    /// Two-click creation of a beam or truss between existing nodes.
    PlaceElement(ElementKind),
}

/// Sub-state of two-click element creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCreationState {
    /// Waiting for a click on the start node.
    #[default]
    AwaitingStart,
    /// Start node chosen; waiting for a click on a different end node.
    AwaitingEnd { start: NodeId },
}

/// Owns the current editing mode and any in-progress element creation.
///
/// The state machine never mutates the model; clicks that should create
/// something return a [`ModelIntent`] for the caller to apply.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    line_state: LineCreationState,
    /// Cursor position in screen space, tracked for the rubber-band
    /// preview while a start node is selected.
    cursor: Option<Point>,
}

impl InteractionState {
    /// Create a state machine in `Select` mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current top-level mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Current element-creation sub-state.
    pub fn line_state(&self) -> LineCreationState {
        self.line_state
    }

    /// Switch the top-level mode. Any pending start-node selection is
    /// abandoned, not committed; this includes switching between beam
    /// and truss placement.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            self.reset_line_state();
        }
        self.mode = mode;
    }

    /// Cancel any in-progress element creation (Escape). The mode itself
    /// is unchanged.
    pub fn cancel(&mut self) {
        self.reset_line_state();
    }

    fn reset_line_state(&mut self) {
        self.line_state = LineCreationState::AwaitingStart;
        self.cursor = None;
    }

    /// Track the cursor for the rubber-band preview.
    pub fn pointer_moved(&mut self, screen: Point) {
        if matches!(self.line_state, LineCreationState::AwaitingEnd { .. }) {
            self.cursor = Some(screen);
        }
    }

    /// Process a click that is not part of a pan gesture.
    ///
    /// Returns at most one intent. Clicks that satisfy no transition
    /// (miss in `AwaitingStart`, self-loop in `AwaitingEnd`, any click in
    /// `Select`) change nothing and return `None`.
    pub fn click(
        &mut self,
        screen: Point,
        model: &Model,
        viewport: &Viewport,
        dims: Size,
    ) -> Option<ModelIntent> {
        match self.mode {
            InteractionMode::Select => None,
            InteractionMode::PlaceNode => Some(ModelIntent::CreateNode {
                at: viewport.screen_to_world(screen, dims),
            }),
            InteractionMode::PlaceElement(kind) => {
                let hit = hit_test::hit_test_node(screen, model.nodes(), viewport, dims, NODE_TOLERANCE);
                match self.line_state {
                    LineCreationState::AwaitingStart => {
                        // An element may only begin at an existing node.
                        if let Some(start) = hit {
                            self.line_state = LineCreationState::AwaitingEnd { start };
                            self.cursor = Some(screen);
                        }
                        None
                    }
                    LineCreationState::AwaitingEnd { start } => match hit {
                        Some(end) if end != start => {
                            self.reset_line_state();
                            Some(ModelIntent::CreateElement { kind, start, end })
                        }
                        // Self-loop or miss: silent rejection, state kept.
                        _ => None,
                    },
                }
            }
        }
    }

    /// Screen-space rubber-band segment from the selected start node to
    /// the cursor, for the renderer. `None` unless a start node is
    /// selected, the cursor has moved, and the start node still exists.
    pub fn preview_segment(
        &self,
        model: &Model,
        viewport: &Viewport,
        dims: Size,
    ) -> Option<(Point, Point)> {
        let LineCreationState::AwaitingEnd { start } = self.line_state else {
            return None;
        };
        let cursor = self.cursor?;
        let node = model.node(start)?;
        Some((viewport.world_to_screen(node.coordinates, dims), cursor))
    }
}
