//! The editor session: one place that owns viewport, interaction and
//! gesture state and translates raw input events into viewport updates
//! and model intents.

use crate::error::CoreError;
use crate::input::{Modifiers, MouseButton, PointerEvent, WheelEvent};
use crate::interaction::{InteractionMode, InteractionState};
use crate::viewport::{PanGesture, Viewport, FIT_PADDING, ZOOM_STEP_FACTOR};
use beamsketch_model::{ElementKind, Model, ModelIntent};
use kurbo::{Point, Size};

/// Zoom factor applied per ctrl-wheel notch when zooming in.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Zoom factor applied per ctrl-wheel notch when zooming out.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// One editing session over a model.
///
/// All state is owned here and mutated synchronously in event arrival
/// order; there is no background work. The session reads the model only
/// for hit testing and bounds; mutations leave as [`ModelIntent`]s.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Pan/zoom state.
    pub viewport: Viewport,
    /// Mode and element-creation state machine.
    pub interaction: InteractionState,
    view_size: Size,
    pan_gesture: Option<PanGesture>,
}

impl EditorSession {
    /// Create a session for a render surface of the given pixel size.
    pub fn new(view_size: Size) -> Self {
        Self {
            viewport: Viewport::new(),
            interaction: InteractionState::new(),
            view_size,
            pan_gesture: None,
        }
    }

    /// Current render-surface size.
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Update the render-surface size (resize observation). Idempotent;
    /// it never invalidates an in-flight gesture's anchor.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Whether a middle-button pan drag is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan_gesture.is_some()
    }

    /// World position under a screen point, for the cursor readout.
    pub fn world_at(&self, screen: Point) -> Point {
        self.viewport.screen_to_world(screen, self.view_size)
    }

    /// Dispatch a pointer event.
    ///
    /// Returns at most one model intent (from a mode-specific click).
    /// A pan gesture active at click time suppresses every click-driven
    /// transition for that pointer cycle.
    pub fn handle_pointer(&mut self, event: PointerEvent, model: &Model) -> Option<ModelIntent> {
        let position = event.position();
        match event {
            PointerEvent::Down {
                button: MouseButton::Middle,
                ..
            } => {
                self.pan_gesture = Some(self.viewport.begin_pan(position));
                None
            }
            PointerEvent::Down {
                button: MouseButton::Left,
                ..
            } => {
                if self.is_panning() {
                    return None;
                }
                self.interaction
                    .click(position, model, &self.viewport, self.view_size)
            }
            PointerEvent::Down { .. } => None,
            PointerEvent::Move { .. } => {
                if let Some(gesture) = self.pan_gesture {
                    self.viewport.continue_pan(&gesture, position);
                }
                self.interaction.pointer_moved(position);
                None
            }
            PointerEvent::Up {
                button: MouseButton::Middle,
                ..
            } => {
                self.pan_gesture = None;
                None
            }
            PointerEvent::Up { .. } => None,
        }
    }

    /// Dispatch a wheel event. Only ctrl-wheel zooms; anything else is
    /// left to the surrounding UI.
    pub fn handle_wheel(&mut self, event: WheelEvent) -> Result<(), CoreError> {
        if !event.ctrl {
            return Ok(());
        }
        let factor = if event.delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.viewport
            .zoom_at(self.view_size, event.position, factor)
    }

    /// Dispatch a key press. Escape cancels a pending element creation;
    /// ctrl+1..4 select the editing modes. Accelerators go through
    /// [`EditorSession::set_mode`] so a mode change always ends a pan
    /// drag, whichever surface requested it.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) {
        if modifiers.ctrl {
            match key {
                "1" => self.set_mode(InteractionMode::Select),
                "2" => self.set_mode(InteractionMode::PlaceNode),
                "3" => self.set_mode(InteractionMode::PlaceElement(ElementKind::Truss)),
                "4" => self.set_mode(InteractionMode::PlaceElement(ElementKind::Beam)),
                _ => {}
            }
            return;
        }
        if key == "Escape" {
            self.interaction.cancel();
        }
    }

    /// Switch editing mode from the UI. Ends any pan drag as well, since
    /// panning and mode-specific clicking are mutually exclusive.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.pan_gesture = None;
        self.interaction.set_mode(mode);
    }

    /// Toolbar zoom in.
    pub fn zoom_in(&mut self) {
        // Constant factor, validated by construction.
        let _ = self.viewport.zoom_step(ZOOM_STEP_FACTOR);
    }

    /// Toolbar zoom out.
    pub fn zoom_out(&mut self) {
        let _ = self.viewport.zoom_step(1.0 / ZOOM_STEP_FACTOR);
    }

    /// Fit the view to the model, or reset it for an empty model.
    pub fn zoom_to_fit(&mut self, model: &Model) {
        self.viewport
            .fit_to_bounds(model.bounds(), self.view_size, FIT_PADDING);
    }

    /// Reset zoom to 100%, keeping the pan.
    pub fn zoom_to_actual(&mut self) {
        self.viewport.zoom_to_actual();
    }
}
