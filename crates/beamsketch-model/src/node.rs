//! Node definitions for structural models.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for nodes.
pub type NodeId = Uuid;

/// Support conditions for a node.
///
/// Each flag locks one degree of freedom: horizontal translation (`x`),
/// vertical translation (`z`) and rotation (`r`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub x: bool,
    pub z: bool,
    pub r: bool,
}

impl Constraints {
    /// Create a free (unconstrained) node support.
    pub fn free() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all three degrees of freedom locked).
    pub fn fixed() -> Self {
        Self {
            x: true,
            z: true,
            r: true,
        }
    }

    /// Number of locked degrees of freedom.
    pub fn count(&self) -> usize {
        usize::from(self.x) + usize::from(self.z) + usize::from(self.r)
    }
}

/// Nodal loads: horizontal force, vertical force and moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Loads {
    pub fx: f64,
    pub fz: f64,
    pub m: f64,
}

/// Load magnitudes below this threshold count as "no load applied".
pub const LOAD_EPSILON: f64 = 1e-3;

impl Loads {
    /// Number of load components with a non-negligible magnitude.
    pub fn applied_count(&self) -> usize {
        usize::from(self.fx.abs() > LOAD_EPSILON)
            + usize::from(self.fz.abs() > LOAD_EPSILON)
            + usize::from(self.m.abs() > LOAD_EPSILON)
    }

    /// Check that all components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.fx.is_finite() && self.fz.is_finite() && self.m.is_finite()
    }
}

/// A node in the structural model.
///
/// Coordinates live in world space. The structural convention names the
/// vertical axis `z`; it is carried in [`Point::y`] and maps screen-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,
    /// User-facing label (empty by default).
    #[serde(default)]
    pub label: String,
    /// Position in world coordinates.
    pub coordinates: Point,
    /// Support conditions.
    #[serde(default)]
    pub constraints: Constraints,
    /// Applied nodal loads.
    #[serde(default)]
    pub loads: Loads,
}

impl Node {
    /// Create a free, unloaded node at the given world position.
    pub fn new(coordinates: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: String::new(),
            coordinates,
            constraints: Constraints::free(),
            loads: Loads::default(),
        }
    }
}
