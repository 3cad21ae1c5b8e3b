//! Ring-search placement of cells around an anchor.

/// Number of square rings searched around the anchor before giving up.
pub const RING_LIMIT: u32 = 24;

/// A point in board coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal coordinate, growing rightwards.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Position {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Squared Euclidean distance to `other`.
	pub fn distance_sq(self, other: Position) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}
}

/// Finds the nearest free point on expanding square rings around an anchor.
///
/// The search is pure: the returned point is not recorded anywhere, so callers
/// must add it to their occupied set before asking again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceFinder {
	/// Grid increment between tested points.
	pub step_size: f64,
	/// Minimum center-to-center distance to any occupied point.
	pub spacing: f64,
}

impl Default for SpaceFinder {
	fn default() -> Self {
		Self {
			step_size: 120.0,
			spacing: 100.0,
		}
	}
}

impl SpaceFinder {
	/// Finder with the given grid step and minimum spacing.
	pub fn new(step_size: f64, spacing: f64) -> Self {
		Self { step_size, spacing }
	}

	fn is_clear(&self, occupied: &[Position], candidate: Position) -> bool {
		let min = self.spacing * self.spacing;
		!occupied.iter().any(|p| p.distance_sq(candidate) < min)
	}

	/// First clear point in walk order, or `None` once [`RING_LIMIT`] rings are exhausted.
	///
	/// Ring `i` starts at the corner `anchor - i * step` on both axes and walks clockwise
	/// (+x, +y, -x, -y) in four segments of `2 * i` steps.
	pub fn find(&self, occupied: &[Position], anchor: Position) -> Option<Position> {
		if self.is_clear(occupied, anchor) {
			return Some(anchor);
		}
		let step = self.step_size;
		let segments = [(step, 0.0), (0.0, step), (-step, 0.0), (0.0, -step)];

		for ring in 1..=RING_LIMIT {
			let reach = ring as f64 * step;
			let mut candidate = Position::new(anchor.x - reach, anchor.y - reach);
			if self.is_clear(occupied, candidate) {
				return Some(candidate);
			}
			for (dx, dy) in segments {
				for _ in 0..ring * 2 {
					candidate.x += dx;
					candidate.y += dy;
					if self.is_clear(occupied, candidate) {
						return Some(candidate);
					}
				}
			}
		}
		None
	}

	/// Finds a point and records it as occupied.
	pub fn place(&self, occupied: &mut Vec<Position>, anchor: Position) -> Option<Position> {
		let found = self.find(occupied, anchor)?;
		occupied.push(found);
		Some(found)
	}
}

/// Free-function form of [`SpaceFinder::find`].
pub fn find_free_space(
	step_size: f64,
	occupied: &[Position],
	spacing: f64,
	anchor: Position,
) -> Option<Position> {
	SpaceFinder::new(step_size, spacing).find(occupied, anchor)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_board_returns_anchor() {
		let anchor = Position::new(50.0, 50.0);
		assert_eq!(find_free_space(120.0, &[], 100.0, anchor), Some(anchor));
	}

	#[test]
	fn occupied_anchor_moves_to_ring_one_corner() {
		let anchor = Position::new(50.0, 50.0);
		assert_eq!(
			find_free_space(120.0, &[anchor], 100.0, anchor),
			Some(Position::new(-70.0, -70.0))
		);
	}

	#[test]
	fn walk_continues_along_top_edge() {
		let finder = SpaceFinder::default();
		let anchor = Position::new(0.0, 0.0);
		let occupied = [anchor, Position::new(-120.0, -120.0)];
		assert_eq!(finder.find(&occupied, anchor), Some(Position::new(0.0, -120.0)));
	}

	#[test]
	fn collision_is_strictly_less_than_spacing() {
		let finder = SpaceFinder::new(120.0, 100.0);
		let anchor = Position::new(0.0, 0.0);
		let touching = [Position::new(100.0, 0.0)];
		assert_eq!(finder.find(&touching, anchor), Some(anchor));
		let inside = [Position::new(99.0, 0.0)];
		assert_ne!(finder.find(&inside, anchor), Some(anchor));
	}

	#[test]
	fn placed_points_keep_their_distance() {
		let finder = SpaceFinder::default();
		let anchor = Position::new(400.0, 300.0);
		let mut occupied = Vec::new();
		for _ in 0..30 {
			finder.place(&mut occupied, anchor).unwrap();
		}
		for (i, a) in occupied.iter().enumerate() {
			for b in &occupied[i + 1..] {
				assert!(a.distance_sq(*b) >= 100.0 * 100.0);
			}
		}
	}

	#[test]
	fn identical_inputs_give_identical_output() {
		let finder = SpaceFinder::default();
		let anchor = Position::new(10.0, 20.0);
		let occupied = [anchor, Position::new(-110.0, -100.0)];
		assert_eq!(finder.find(&occupied, anchor), finder.find(&occupied, anchor));
	}

	#[test]
	fn dense_rings_exhaust_the_search() {
		let step = 120.0;
		let anchor = Position::new(0.0, 0.0);
		let bound = RING_LIMIT as i32;
		let mut occupied = Vec::new();
		for gx in -bound..=bound {
			for gy in -bound..=bound {
				occupied.push(Position::new(gx as f64 * step, gy as f64 * step));
			}
		}
		assert_eq!(find_free_space(step, &occupied, 100.0, anchor), None);
	}

	#[test]
	fn huge_spacing_exhausts_the_search() {
		let anchor = Position::new(0.0, 0.0);
		assert_eq!(find_free_space(120.0, &[anchor], 1.0e9, anchor), None);
	}
}
