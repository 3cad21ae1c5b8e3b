//! Plain data shared by the board's scene, state and renderer.

use std::f64::consts::FRAC_PI_2;

use crate::graph::NodeId;
use crate::layout::Position;

/// A node's visual cell, centered on its assigned position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
	/// Node drawn by this cell.
	pub node: NodeId,
	/// Center of the cell in board coordinates.
	pub position: Position,
	/// Text from the node's `label` property.
	pub label: Option<String>,
}

/// How strongly a cell is drawn for the current hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	/// Nothing is hovered.
	Normal,
	/// The cell under the pointer.
	Hovered,
	/// Connected to the hovered cell by an edge.
	Related,
	/// Unrelated to the hovered cell.
	Dimmed,
}

/// Which way an edge runs relative to the hovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// The hovered node targets the neighbor.
	Outgoing,
	/// The neighbor targets the hovered node.
	Incoming,
}

/// A line between the hovered cell and one neighbor.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLine {
	/// Direction relative to the hovered node.
	pub kind: EdgeKind,
	/// Center of the hovered cell.
	pub from: Position,
	/// Center of the neighbor cell.
	pub to: Position,
	/// Angle of `to -> from` in radians, rounded to three decimals.
	pub direction: f64,
	/// Perpendicular shift applied to both endpoints.
	pub offset: f64,
}

impl EdgeLine {
	/// Endpoints after the perpendicular shift, hovered end first.
	pub fn shifted(&self) -> (Position, Position) {
		let angle = self.direction + FRAC_PI_2;
		let (dx, dy) = (angle.cos() * self.offset, angle.sin() * self.offset);
		(
			Position::new(self.from.x + dx, self.from.y + dy),
			Position::new(self.to.x + dx, self.to.y + dy),
		)
	}

	/// Shifted endpoints in edge direction: source first, target second.
	pub fn oriented(&self) -> (Position, Position) {
		let (hovered, neighbor) = self.shifted();
		match self.kind {
			EdgeKind::Outgoing => (hovered, neighbor),
			EdgeKind::Incoming => (neighbor, hovered),
		}
	}
}
