//! Home page showing the demo graph.

use leptos::prelude::*;
use log::warn;

use crate::components::graph_board::GraphBoard;
use crate::config::BoardConfig;
use crate::demo::demo_graph;
use crate::graph::Graph;

/// Reads `<meta name="board-config" content="{...}">` from the host page, if present.
fn config_from_document() -> BoardConfig {
	let raw = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.query_selector("meta[name=board-config]").ok().flatten())
		.and_then(|meta| meta.get_attribute("content"));
	let Some(raw) = raw else {
		return BoardConfig::default();
	};
	BoardConfig::from_json(&raw).unwrap_or_else(|e| {
		warn!("ignoring board config: {e}");
		BoardConfig::default()
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = Signal::derive(move || {
		demo_graph().unwrap_or_else(|e| {
			warn!("demo graph rejected: {e}");
			Graph::new()
		})
	});
	let config = config_from_document();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<GraphBoard graph=graph config=config fullscreen=true />
				<div class="graph-overlay">
					<h1>"Graph Board"</h1>
					<p class="subtitle">"Hover a cell to see its outgoing (cyan) and incoming (magenta) edges."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
