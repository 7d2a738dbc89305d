//! Line elements connecting pairs of nodes.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for line elements.
pub type ElementId = Uuid;

/// Kind of line element.
///
/// Beams carry bending moments; trusses carry axial forces only. For the
/// editor both are a straight segment between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElementKind {
    Beam,
    #[default]
    Truss,
}

/// Cross-section and material properties of a line element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub material: String,
    pub section: String,
    pub width: f64,
    pub height: f64,
    pub elastic_modulus: f64,
    pub moment_of_inertia: f64,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            material: "steel".to_string(),
            section: "rectangular".to_string(),
            width: 1.0,
            height: 1.0,
            elastic_modulus: 200_000.0,
            moment_of_inertia: 1.0,
        }
    }
}

/// A beam or truss connecting exactly two nodes.
///
/// The endpoint ids are stored by reference; whether they resolve depends
/// on the model snapshot the element is read against. An element whose
/// endpoint is missing is unrenderable and unhittable, never a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    /// Unique element identifier.
    pub id: ElementId,
    /// User-facing label (empty by default).
    #[serde(default)]
    pub label: String,
    /// Beam or truss.
    pub kind: ElementKind,
    /// First endpoint node.
    pub start: NodeId,
    /// Second endpoint node.
    pub end: NodeId,
    /// Cross-section and material properties.
    #[serde(default)]
    pub section: SectionProperties,
}

impl LineElement {
    /// Create a new element between two nodes with default section properties.
    pub fn new(kind: ElementKind, start: NodeId, end: NodeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            kind,
            start,
            end,
            section: SectionProperties::default(),
        }
    }

    /// Check whether the element touches the given node.
    pub fn connects(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}
