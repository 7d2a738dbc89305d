//! The structural model store.
//!
//! Owns all nodes and line elements of one model. The editor core never
//! mutates the store directly; it emits [`ModelIntent`] values which the
//! surrounding application applies through [`Model::apply`].

use crate::element::{ElementId, ElementKind, LineElement};
use crate::node::{Node, NodeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Model format version written into serialized documents.
pub const MODEL_VERSION: &str = "1.0";

/// Errors raised by model mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// An endpoint id does not resolve to a node in this model.
    #[error("node {0} does not exist in the model")]
    UnknownNode(NodeId),
    /// A line element's endpoints must be two distinct nodes.
    #[error("element endpoints must be two distinct nodes")]
    DuplicateEndpoints,
    /// Coordinates and load values must be finite.
    #[error("coordinates must be finite, got ({0}, {1})")]
    NonFiniteCoordinate(f64, f64),
}

/// A mutation request emitted by the editor core.
///
/// Intents are the only channel through which interaction reaches the
/// model, consistent with a unidirectional data flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModelIntent {
    /// Create a free, unloaded node at the given world position.
    CreateNode { at: Point },
    /// Create a line element between two existing, distinct nodes.
    CreateElement {
        kind: ElementKind,
        start: NodeId,
        end: NodeId,
    },
}

/// Identifier of the entity created by a successfully applied intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedIntent {
    Node(NodeId),
    Element(ElementId),
}

/// Aggregate counts over a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub node_count: usize,
    pub element_count: usize,
    /// Total locked degrees of freedom across all nodes.
    pub constraint_count: usize,
    /// Total non-negligible load components across all nodes.
    pub applied_load_count: usize,
}

/// A structural model: nodes plus the line elements connecting them.
///
/// Insertion order of nodes and elements is preserved; the editor's hit
/// testing relies on it as a first-match tie-break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Unique model identifier.
    pub id: String,
    /// User-facing model name.
    pub name: String,
    /// Format version, currently [`MODEL_VERSION`].
    pub version: String,
    nodes: Vec<Node>,
    elements: Vec<LineElement>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            name: format!("Model {id}"),
            id,
            version: MODEL_VERSION.to_string(),
            nodes: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All line elements in insertion order.
    pub fn elements(&self) -> &[LineElement] {
        &self.elements
    }

    /// Check if the model has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node by id, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Look up an element by id.
    pub fn element(&self, id: ElementId) -> Option<&LineElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Look up an element by id, mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut LineElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Resolve both endpoints of an element against this model.
    ///
    /// Returns `None` when either endpoint is missing; such elements are
    /// skipped by rendering and hit testing.
    pub fn resolve(&self, element: &LineElement) -> Option<(&Node, &Node)> {
        Some((self.node(element.start)?, self.node(element.end)?))
    }

    /// Add a node at the given world position.
    pub fn add_node(&mut self, coordinates: Point) -> Result<NodeId, ModelError> {
        if !coordinates.x.is_finite() || !coordinates.y.is_finite() {
            return Err(ModelError::NonFiniteCoordinate(coordinates.x, coordinates.y));
        }
        let node = Node::new(coordinates);
        let id = node.id;
        self.nodes.push(node);
        Ok(id)
    }

    /// Add a line element between two existing, distinct nodes.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        start: NodeId,
        end: NodeId,
    ) -> Result<ElementId, ModelError> {
        if start == end {
            return Err(ModelError::DuplicateEndpoints);
        }
        if self.node(start).is_none() {
            return Err(ModelError::UnknownNode(start));
        }
        if self.node(end).is_none() {
            return Err(ModelError::UnknownNode(end));
        }
        let element = LineElement::new(kind, start, end);
        let id = element.id;
        self.elements.push(element);
        Ok(id)
    }

    /// Remove a node and every element connected to it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        self.elements.retain(|e| !e.connects(id));
        Some(self.nodes.remove(index))
    }

    /// Remove a single element.
    pub fn remove_element(&mut self, id: ElementId) -> Option<LineElement> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Apply a mutation intent emitted by the editor core.
    pub fn apply(&mut self, intent: ModelIntent) -> Result<AppliedIntent, ModelError> {
        match intent {
            ModelIntent::CreateNode { at } => self.add_node(at).map(AppliedIntent::Node),
            ModelIntent::CreateElement { kind, start, end } => self
                .add_element(kind, start, end)
                .map(AppliedIntent::Element),
        }
    }

    /// World-space bounding box over all node coordinates.
    ///
    /// Returns `None` for an empty model.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.nodes.first()?.coordinates;
        let mut bounds = Rect::from_points(first, first);
        for node in &self.nodes[1..] {
            bounds = bounds.union_pt(node.coordinates);
        }
        Some(bounds)
    }

    /// Aggregate counts for the status display.
    pub fn statistics(&self) -> ModelStatistics {
        ModelStatistics {
            node_count: self.nodes.len(),
            element_count: self.elements.len(),
            constraint_count: self.nodes.iter().map(|n| n.constraints.count()).sum(),
            applied_load_count: self.nodes.iter().map(|n| n.loads.applied_count()).sum(),
        }
    }

    /// Check model consistency and return human-readable findings.
    ///
    /// An empty vec means the model is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if !node.coordinates.x.is_finite() || !node.coordinates.y.is_finite() {
                issues.push(format!("node {index}: coordinates are not finite"));
            }
            if !node.loads.is_finite() {
                issues.push(format!("node {index}: load values are not finite"));
            }
        }
        for (index, element) in self.elements.iter().enumerate() {
            if element.start == element.end {
                issues.push(format!("element {index}: endpoints are the same node"));
            }
            if self.node(element.start).is_none() {
                issues.push(format!("element {index}: start node does not exist"));
            }
            if self.node(element.end).is_none() {
                issues.push(format!("element {index}: end node does not exist"));
            }
        }
        issues
    }

    /// Serialize the model to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a model from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
