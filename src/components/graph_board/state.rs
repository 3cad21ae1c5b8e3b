//! Board model: laid-out cells, hit testing and hover.

use log::{error, info, warn};

use super::scene::HoverScene;
use super::types::Cell;
use crate::config::BoardConfig;
use crate::graph::{Graph, NodeId};
use crate::layout::Position;

/// Everything the board needs to draw one frame.
pub struct BoardState {
	/// Graph being shown.
	pub graph: Graph,
	/// Layout and drawing settings.
	pub config: BoardConfig,
	/// Drawing width in pixels.
	pub width: f64,
	/// Drawing height in pixels.
	pub height: f64,
	cells: Vec<Cell>,
	hover: Option<NodeId>,
}

impl BoardState {
	/// Lays out every node around the board center, in creation order.
	///
	/// Positions are fixed from here on; [`BoardState::resize`] does not move cells.
	pub fn new(graph: Graph, config: BoardConfig, width: f64, height: f64) -> Self {
		let anchor = Position::new(width / 2.0, height / 2.0);
		let finder = config.space_finder();
		let mut occupied = Vec::with_capacity(graph.len());
		let mut cells = Vec::with_capacity(graph.len());

		for node in graph.ids() {
			let Some(position) = finder.place(&mut occupied, anchor) else {
				warn!("no free space left for node {}", node.index());
				continue;
			};
			let label = graph
				.node(node)
				.and_then(|n| n.properties().get("label").and_then(|l| l.as_str()).map(String::from));
			cells.push(Cell {
				node,
				position,
				label,
			});
		}
		info!("placed {} of {} nodes", cells.len(), graph.len());

		Self {
			graph,
			config,
			width,
			height,
			cells,
			hover: None,
		}
	}

	/// Placed cells, in node creation order.
	pub fn cells(&self) -> &[Cell] {
		&self.cells
	}

	/// Node currently under the pointer.
	pub fn hovered(&self) -> Option<NodeId> {
		self.hover
	}

	/// Node whose cell covers the board point `(x, y)`; the latest placed cell wins.
	pub fn cell_at(&self, x: f64, y: f64) -> Option<NodeId> {
		let half = self.config.cell_size / 2.0;
		self.cells
			.iter()
			.rev()
			.find(|c| (c.position.x - x).abs() <= half && (c.position.y - y).abs() <= half)
			.map(|c| c.node)
	}

	/// Returns true when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeId>) -> bool {
		if self.hover == node {
			return false;
		}
		self.hover = node;
		true
	}

	/// Lines and emphasis for the current hover.
	pub fn scene(&self) -> HoverScene {
		let Some(hovered) = self.hover else {
			return HoverScene::default();
		};
		match HoverScene::build(&self.graph, &self.cells, hovered, self.config.edge_offset_step) {
			Ok(scene) => scene,
			Err(e) => {
				error!("cannot show connections: {e}");
				HoverScene::default()
			}
		}
	}

	/// Changes the drawing size; cells keep their positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::demo::demo_graph;

	fn board() -> BoardState {
		BoardState::new(demo_graph().unwrap(), BoardConfig::default(), 800.0, 600.0)
	}

	#[test]
	fn first_cell_sits_on_the_board_center() {
		let state = board();
		assert_eq!(state.cells().len(), 8);
		assert_eq!(state.cells()[0].position, Position::new(400.0, 300.0));
		assert_eq!(state.cells()[1].position, Position::new(280.0, 180.0));
		assert_eq!(state.cells()[3].label.as_deref(), Some("Node 3"));
	}

	#[test]
	fn hit_test_uses_cell_squares() {
		let state = board();
		let first = state.cells()[0].node;
		assert_eq!(state.cell_at(400.0, 300.0), Some(first));
		assert_eq!(state.cell_at(439.0, 261.0), Some(first));
		assert_eq!(state.cell_at(345.0, 300.0), None);
	}

	#[test]
	fn set_hover_reports_changes() {
		let mut state = board();
		let node = state.cells()[2].node;
		assert!(state.set_hover(Some(node)));
		assert!(!state.set_hover(Some(node)));
		assert_eq!(state.hovered(), Some(node));
		assert!(state.set_hover(None));
		assert!(state.scene().edges.is_empty());
	}

	#[test]
	fn exhausted_layout_skips_nodes() {
		let config = BoardConfig {
			spacing: 1.0e9,
			..BoardConfig::default()
		};
		let state = BoardState::new(demo_graph().unwrap(), config, 800.0, 600.0);
		assert_eq!(state.cells().len(), 1);
	}

	#[test]
	fn resize_keeps_positions() {
		let mut state = board();
		let before = state.cells().to_vec();
		state.resize(1024.0, 768.0);
		assert_eq!(state.cells(), &before[..]);
		assert_eq!(state.width, 1024.0);
	}
}
