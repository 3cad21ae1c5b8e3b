//! Leptos canvas component wiring the board to mouse and window events.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render::{CanvasSurface, render};
use super::state::BoardState;
use crate::config::BoardConfig;
use crate::graph::Graph;

type Shared<T> = Rc<RefCell<Option<T>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Fills `slot` with `make()` unless it is already set; true when it did.
fn install_once<T>(slot: &RefCell<Option<T>>, make: impl FnOnce() -> T) -> bool {
	let mut slot = slot.borrow_mut();
	if slot.is_some() {
		return false;
	}
	*slot = Some(make());
	true
}

fn draw(state: &BoardState, ctx: &CanvasRenderingContext2d) {
	render(state, &mut CanvasSurface::new(ctx, &state.config));
}

/// Canvas showing the graph as cells; hovering a cell draws its edges.
#[component]
pub fn GraphBoard(
	/// Graph to lay out; a new value rebuilds the board.
	#[prop(into)]
	graph: Signal<Graph>,
	/// Layout and drawing settings.
	#[prop(optional)]
	config: BoardConfig,
	/// Fill the window and follow its size.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<BoardState> = Rc::new(RefCell::new(None));
	let ctx: Shared<CanvasRenderingContext2d> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (state_init, ctx_init, resize_cb_init) = (state.clone(), ctx.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window available");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(context) = context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};
		let board = BoardState::new(graph.get(), config.clone(), w, h);
		draw(&board, &context);
		*state_init.borrow_mut() = Some(board);
		*ctx_init.borrow_mut() = Some(context);

		if fullscreen {
			let (state_resize, ctx_resize, canvas_resize) =
				(state_init.clone(), ctx_init.clone(), canvas.clone());
			// the listener reads the shared state cells, so one registration serves every rebuild
			let installed = install_once(&*resize_cb_init, move || {
				Closure::new(move || {
					let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
						return;
					};
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let (Some(s), Some(c)) =
						(state_resize.borrow_mut().as_mut(), ctx_resize.borrow().as_ref())
					{
						s.resize(nw, nh);
						draw(s, c);
					}
				})
			});
			if installed {
				if let Some(ref cb) = *resize_cb_init.borrow() {
					let _ = window
						.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}
		}
	});

	let (state_mm, ctx_mm) = (state.clone(), ctx.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let (Some(s), Some(c)) = (state_mm.borrow_mut().as_mut(), ctx_mm.borrow().as_ref()) {
			let hovered = s.cell_at(x, y);
			if s.set_hover(hovered) {
				draw(s, c);
			}
		}
	};

	let (state_ml, ctx_ml) = (state.clone(), ctx.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if let (Some(s), Some(c)) = (state_ml.borrow_mut().as_mut(), ctx_ml.borrow().as_ref()) {
			if s.set_hover(None) {
				draw(s, c);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-board-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: default;"
		/>
	}
}
