//! Drawing the board through a pluggable [`Surface`].

use web_sys::CanvasRenderingContext2d;

use super::state::BoardState;
use super::types::{Cell, EdgeKind, EdgeLine, Emphasis};
use crate::config::BoardConfig;

/// Drawing backend for the board.
pub trait Surface {
	/// Wipes everything drawn so far.
	fn clear(&mut self, width: f64, height: f64);
	/// Draws the marker for one node at its position.
	fn place_cell(&mut self, cell: &Cell, emphasis: Emphasis);
	/// Draws a directed edge, already offset, in `color`.
	fn draw_edge(&mut self, edge: &EdgeLine, color: &str);
}

/// Draws one full frame: background, cells, then the hovered node's edges.
pub fn render<S: Surface>(state: &BoardState, surface: &mut S) {
	surface.clear(state.width, state.height);
	let scene = state.scene();
	for cell in state.cells() {
		surface.place_cell(cell, scene.emphasis(cell.node));
	}
	for edge in &scene.edges {
		let color = match edge.kind {
			EdgeKind::Outgoing => &state.config.outgoing_color,
			EdgeKind::Incoming => &state.config.incoming_color,
		};
		surface.draw_edge(edge, color);
	}
}

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
	config: &'a BoardConfig,
}

impl<'a> CanvasSurface<'a> {
	/// Surface drawing on `ctx` with the colors and sizes of `config`.
	pub fn new(ctx: &'a CanvasRenderingContext2d, config: &'a BoardConfig) -> Self {
		Self { ctx, config }
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.set_fill_style_str(&self.config.background);
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn place_cell(&mut self, cell: &Cell, emphasis: Emphasis) {
		let ctx = self.ctx;
		let size = self.config.cell_size;
		let (x, y) = (cell.position.x - size / 2.0, cell.position.y - size / 2.0);
		let alpha = if emphasis == Emphasis::Dimmed {
			self.config.dim_alpha
		} else {
			1.0
		};

		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(if emphasis == Emphasis::Hovered {
			&self.config.hovered_color
		} else {
			&self.config.cell_color
		});
		ctx.fill_rect(x, y, size, size);

		if emphasis == Emphasis::Hovered {
			ctx.set_stroke_style_str(&self.config.label_color);
			ctx.set_line_width(self.config.line_width);
			ctx.stroke_rect(x, y, size, size);
		}

		if let Some(label) = &cell.label {
			ctx.set_fill_style_str(&self.config.label_color);
			ctx.set_font("12px sans-serif");
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(label, cell.position.x, cell.position.y);
		}
		ctx.set_global_alpha(1.0);
	}

	fn draw_edge(&mut self, edge: &EdgeLine, color: &str) {
		let ctx = self.ctx;
		let (source, target) = edge.oriented();
		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(self.config.line_width);
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();

		// arrowhead stops at the target cell's border along the line
		let (ux, uy) = (dx / dist, dy / dist);
		let inset = (self.config.cell_size / 2.0) / ux.abs().max(uy.abs());
		let arrow = self.config.arrow_size;
		let (tip_x, tip_y) = (target.x - ux * inset, target.y - uy * inset);
		let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);
		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}
