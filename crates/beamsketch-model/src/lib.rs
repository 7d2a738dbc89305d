//! BeamSketch Model Library
//!
//! Data structures and storage for plane frame and truss models: nodes
//! with supports and loads, and the beam/truss elements connecting them.

pub mod element;
pub mod model;
pub mod node;

pub use element::{ElementId, ElementKind, LineElement, SectionProperties};
pub use model::{AppliedIntent, Model, ModelError, ModelIntent, ModelStatistics, MODEL_VERSION};
pub use node::{Constraints, Loads, Node, NodeId, LOAD_EPSILON};
