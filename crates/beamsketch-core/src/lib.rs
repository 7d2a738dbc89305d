//! BeamSketch Core Library
//!
//! Platform-agnostic editor core for the BeamSketch structural diagram
//! editor: world/screen viewport transforms, adaptive grid, hit testing,
//! and the interaction state machine that turns pointer and key events
//! into model intents. No rendering or windowing lives here; the core
//! only hands geometry to a renderer and intents to the model store.

pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod session;
pub mod viewport;

pub use error::CoreError;
pub use geometry::{grid_spacing, point_to_segment_dist, visible_grid_points, BASE_GRID_SIZE};
pub use hit_test::{hit_test_element, hit_test_node, ELEMENT_TOLERANCE, NODE_TOLERANCE};
pub use input::{Modifiers, MouseButton, PointerEvent, WheelEvent};
pub use interaction::{InteractionMode, InteractionState, LineCreationState};
pub use session::EditorSession;
pub use viewport::{PanGesture, Viewport, FIT_PADDING, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP_FACTOR};
