//! Which cells relate to the hovered node, and the lines between them.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::types::{Cell, EdgeKind, EdgeLine, Emphasis};
use crate::graph::{Graph, GraphError, NodeId};

/// Lines and emphasis for one hover state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoverScene {
	/// Node under the pointer, if any.
	pub hovered: Option<NodeId>,
	/// One line per neighbor, in cell order.
	pub edges: Vec<EdgeLine>,
	related: HashSet<NodeId>,
}

impl HoverScene {
	/// Classifies every cell against `hovered` and lays out one line per neighbor.
	///
	/// Lines are produced in cell order. A neighbor that is both a target and a source
	/// gets a single outgoing line.
	pub fn build(
		graph: &Graph,
		cells: &[Cell],
		hovered: NodeId,
		offset_step: f64,
	) -> Result<Self, GraphError> {
		let outgoing: HashSet<NodeId> = graph.targets(hovered)?.into_iter().collect();
		let all: Vec<NodeId> = graph.ids().collect();
		let incoming: HashSet<NodeId> = graph
			.find_nodes_targeting(hovered, &all)
			.ok_or(GraphError::UnknownNode(hovered))?
			.into_iter()
			.collect();

		let mut scene = Self {
			hovered: Some(hovered),
			..Self::default()
		};
		let Some(from) = cells.iter().find(|c| c.node == hovered).map(|c| c.position) else {
			return Ok(scene);
		};

		// milliradian bucket -> lines already drawn in it
		let mut buckets: HashMap<i64, usize> = HashMap::new();
		for cell in cells.iter().filter(|c| c.node != hovered) {
			let kind = if outgoing.contains(&cell.node) {
				EdgeKind::Outgoing
			} else if incoming.contains(&cell.node) {
				EdgeKind::Incoming
			} else {
				continue;
			};
			let to = cell.position;
			let bucket = ((from.y - to.y).atan2(from.x - to.x) * 1000.0).round() as i64;
			let direction = bucket as f64 / 1000.0;
			let seen = buckets.entry(bucket).or_insert(0);
			let offset = *seen as f64 * offset_step;
			*seen += 1;
			debug!("edge {:?} -> {:?} direction {direction}", hovered, cell.node);

			scene.related.insert(cell.node);
			scene.edges.push(EdgeLine {
				kind,
				from,
				to,
				direction,
				offset,
			});
		}
		Ok(scene)
	}

	/// How `node`'s cell should be drawn.
	pub fn emphasis(&self, node: NodeId) -> Emphasis {
		match self.hovered {
			None => Emphasis::Normal,
			Some(h) if h == node => Emphasis::Hovered,
			Some(_) if self.related.contains(&node) => Emphasis::Related,
			Some(_) => Emphasis::Dimmed,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::Position;

	fn cells_for(graph: &Graph, positions: &[(f64, f64)]) -> Vec<Cell> {
		graph
			.ids()
			.zip(positions)
			.map(|(node, &(x, y))| Cell {
				node,
				position: Position::new(x, y),
				label: None,
			})
			.collect()
	}

	#[test]
	fn classifies_outgoing_incoming_and_dimmed() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..4).map(|_| graph.add_node()).collect();
		graph.set_targets(ids[0], &[ids[1]]).unwrap();
		graph.set_targets(ids[2], &[ids[0]]).unwrap();
		let cells = cells_for(&graph, &[(0.0, 0.0), (120.0, 0.0), (0.0, 120.0), (-120.0, 0.0)]);

		let scene = HoverScene::build(&graph, &cells, ids[0], 10.0).unwrap();
		let kinds: Vec<_> = scene.edges.iter().map(|e| e.kind).collect();
		assert_eq!(kinds, vec![EdgeKind::Outgoing, EdgeKind::Incoming]);
		assert_eq!(scene.emphasis(ids[0]), Emphasis::Hovered);
		assert_eq!(scene.emphasis(ids[1]), Emphasis::Related);
		assert_eq!(scene.emphasis(ids[2]), Emphasis::Related);
		assert_eq!(scene.emphasis(ids[3]), Emphasis::Dimmed);
		assert_eq!(HoverScene::default().emphasis(ids[3]), Emphasis::Normal);
	}

	#[test]
	fn mutual_neighbor_draws_once_as_outgoing() {
		let mut graph = Graph::new();
		let a = graph.add_node();
		let b = graph.add_node();
		graph.set_targets(a, &[b, b]).unwrap();
		graph.set_targets(b, &[a]).unwrap();
		let cells = cells_for(&graph, &[(0.0, 0.0), (120.0, 0.0)]);

		let scene = HoverScene::build(&graph, &cells, a, 10.0).unwrap();
		assert_eq!(scene.edges.len(), 1);
		assert_eq!(scene.edges[0].kind, EdgeKind::Outgoing);
	}

	#[test]
	fn same_direction_lines_are_offset() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..3).map(|_| graph.add_node()).collect();
		graph.set_targets(ids[0], &[ids[1], ids[2]]).unwrap();
		let cells = cells_for(&graph, &[(0.0, 0.0), (120.0, 0.0), (240.0, 0.0)]);

		let scene = HoverScene::build(&graph, &cells, ids[0], 10.0).unwrap();
		assert_eq!(scene.edges[0].offset, 0.0);
		assert_eq!(scene.edges[1].offset, 10.0);

		// atan2(0, -240) = pi, rounded to 3.142
		let line = &scene.edges[1];
		assert_eq!(line.direction, 3.142);
		let (from, to) = line.shifted();
		let angle = 3.142 + std::f64::consts::FRAC_PI_2;
		assert!((from.x - angle.cos() * 10.0).abs() < 1e-9);
		assert!((from.y - angle.sin() * 10.0).abs() < 1e-9);
		assert!((to.x - (240.0 + angle.cos() * 10.0)).abs() < 1e-9);
		assert!((from.y + 10.0).abs() < 1e-3);
	}

	#[test]
	fn unknown_hover_is_an_error() {
		let graph = Graph::new();
		let mut other = Graph::new();
		let stranger = other.add_node();
		assert_eq!(
			HoverScene::build(&graph, &[], stranger, 10.0),
			Err(GraphError::UnknownNode(stranger))
		);
	}

	#[test]
	fn incoming_lines_orient_toward_hovered_cell() {
		let mut graph = Graph::new();
		let a = graph.add_node();
		let b = graph.add_node();
		graph.set_targets(b, &[a]).unwrap();
		let cells = cells_for(&graph, &[(0.0, 0.0), (0.0, 120.0)]);

		let scene = HoverScene::build(&graph, &cells, a, 10.0).unwrap();
		let (source, target) = scene.edges[0].oriented();
		assert_eq!(source, Position::new(0.0, 120.0));
		assert_eq!(target, Position::new(0.0, 0.0));
	}
}
