//! Directed graph with validated, copy-out node state.
//!
//! Nodes live in a [`Graph`] arena and reference each other through [`NodeId`]s. A node never
//! owns what it targets, so self-loops and cycles are plain data. Every id remembers which graph
//! minted it; ids from another graph are rejected like any other invalid reference.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::float_check::ensure_finite;

/// JSON object holding a node's arbitrary properties.
pub type Properties = Map<String, Value>;

static NEXT_GRAPH: AtomicU32 = AtomicU32::new(0);

/// Handle to a node inside a specific [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	graph: u32,
	index: u32,
}

impl NodeId {
	/// Position of the node in creation order.
	pub fn index(self) -> usize {
		self.index as usize
	}
}

/// Validation failures raised by graph construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// A target id does not belong to this graph.
	#[error("invalid targets: {0:?} is not a node of this graph")]
	UnknownTarget(NodeId),
	/// The properties did not serialize to a JSON object.
	#[error("invalid properties: expected a JSON object, found {0}")]
	PropertiesNotObject(&'static str),
	/// The properties have no faithful JSON form.
	#[error("invalid properties: {0}")]
	Unserializable(String),
	/// The addressed node does not belong to this graph.
	#[error("unknown node {0:?}")]
	UnknownNode(NodeId),
}

/// A vertex: its outgoing edges and a property bag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	targets: Vec<NodeId>,
	properties: Properties,
}

impl GraphNode {
	/// Copy of the outgoing edge list, in insertion order.
	pub fn targets(&self) -> Vec<NodeId> {
		self.targets.clone()
	}

	/// Deep copy of the property object.
	pub fn properties(&self) -> Properties {
		self.properties.clone()
	}

	/// Whether `id` appears among the outgoing edges.
	pub fn targets_node(&self, id: NodeId) -> bool {
		self.targets.contains(&id)
	}
}

/// Arena owning every node of one directed graph.
#[derive(Clone, Debug)]
pub struct Graph {
	id: u32,
	nodes: Vec<GraphNode>,
}

impl Default for Graph {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for Graph {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && self.nodes == other.nodes
	}
}

impl Graph {
	/// Empty graph with a fresh identity.
	pub fn new() -> Self {
		Self {
			id: NEXT_GRAPH.fetch_add(1, Ordering::Relaxed),
			nodes: Vec::new(),
		}
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// True when `id` was minted by this graph.
	pub fn contains(&self, id: NodeId) -> bool {
		id.graph == self.id && id.index() < self.nodes.len()
	}

	/// Borrow a node, if `id` belongs to this graph.
	pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
		if self.contains(id) {
			self.nodes.get(id.index())
		} else {
			None
		}
	}

	/// All node ids in creation order.
	pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		(0..self.nodes.len()).map(move |index| NodeId {
			graph: self.id,
			index: index as u32,
		})
	}

	/// Adds a node with no targets and empty properties.
	pub fn add_node(&mut self) -> NodeId {
		self.push(GraphNode::default())
	}

	/// Adds a node after validating its targets and properties.
	///
	/// Nothing is inserted when either argument is rejected.
	pub fn insert_node<P>(&mut self, targets: &[NodeId], properties: &P) -> Result<NodeId, GraphError>
	where
		P: Serialize + ?Sized,
	{
		self.check_targets(targets)?;
		let properties = to_properties(properties)?;
		Ok(self.push(GraphNode {
			targets: targets.to_vec(),
			properties,
		}))
	}

	/// Copy of the outgoing edge list of `id`.
	pub fn targets(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
		self.node(id)
			.map(GraphNode::targets)
			.ok_or(GraphError::UnknownNode(id))
	}

	/// Replaces the whole outgoing edge list of `id`.
	pub fn set_targets(&mut self, id: NodeId, targets: &[NodeId]) -> Result<&mut Self, GraphError> {
		self.check_targets(targets)?;
		self.node_mut(id)?.targets = targets.to_vec();
		Ok(self)
	}

	/// Deep copy of the properties of `id`.
	pub fn properties(&self, id: NodeId) -> Result<Properties, GraphError> {
		self.node(id)
			.map(GraphNode::properties)
			.ok_or(GraphError::UnknownNode(id))
	}

	/// Replaces the whole property object of `id`.
	pub fn set_properties<P>(&mut self, id: NodeId, properties: &P) -> Result<&mut Self, GraphError>
	where
		P: Serialize + ?Sized,
	{
		let properties = to_properties(properties)?;
		self.node_mut(id)?.properties = properties;
		Ok(self)
	}

	/// The candidates, in scan order, whose targets include `id`.
	///
	/// Returns `None` when `id` or any candidate does not belong to this graph.
	pub fn find_nodes_targeting(&self, id: NodeId, candidates: &[NodeId]) -> Option<Vec<NodeId>> {
		if !self.contains(id) || candidates.iter().any(|&c| !self.contains(c)) {
			return None;
		}
		Some(
			candidates
				.iter()
				.copied()
				.filter(|&c| self.nodes[c.index()].targets_node(id))
				.collect(),
		)
	}

	fn push(&mut self, node: GraphNode) -> NodeId {
		let id = NodeId {
			graph: self.id,
			index: self.nodes.len() as u32,
		};
		self.nodes.push(node);
		id
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut GraphNode, GraphError> {
		if !self.contains(id) {
			return Err(GraphError::UnknownNode(id));
		}
		Ok(&mut self.nodes[id.index()])
	}

	fn check_targets(&self, targets: &[NodeId]) -> Result<(), GraphError> {
		match targets.iter().find(|&&t| !self.contains(t)) {
			Some(&bad) => Err(GraphError::UnknownTarget(bad)),
			None => Ok(()),
		}
	}
}

fn to_properties<P: Serialize + ?Sized>(properties: &P) -> Result<Properties, GraphError> {
	ensure_finite(properties).map_err(|e| GraphError::Unserializable(e.to_string()))?;
	let value =
		serde_json::to_value(properties).map_err(|e| GraphError::Unserializable(e.to_string()))?;
	match value {
		Value::Object(map) => Ok(map),
		Value::Array(_) => Err(GraphError::PropertiesNotObject("an array")),
		Value::Null => Err(GraphError::PropertiesNotObject("null")),
		Value::Bool(_) => Err(GraphError::PropertiesNotObject("a boolean")),
		Value::Number(_) => Err(GraphError::PropertiesNotObject("a number")),
		Value::String(_) => Err(GraphError::PropertiesNotObject("a string")),
	}
}
