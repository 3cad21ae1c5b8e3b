//! The fixed graph shown on the home page.

use serde_json::json;

use crate::graph::{Graph, GraphError};

/// Number of nodes in [`demo_graph`].
pub const DEMO_NODE_COUNT: usize = 8;

/// Eight labelled nodes wired as 0 → {1, 2, 3}, 1 → {3, 5}, 2 → {4, 6}.
pub fn demo_graph() -> Result<Graph, GraphError> {
	let mut graph = Graph::new();
	let nodes: Vec<_> = (0..DEMO_NODE_COUNT)
		.map(|i| graph.insert_node(&[], &json!({ "label": format!("Node {i}") })))
		.collect::<Result<_, _>>()?;

	graph
		.set_targets(nodes[0], &[nodes[1], nodes[2], nodes[3]])?
		.set_targets(nodes[1], &[nodes[3], nodes[5]])?
		.set_targets(nodes[2], &[nodes[4], nodes[6]])?;
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn demo_graph_has_expected_edges() {
		let graph = demo_graph().unwrap();
		let ids: Vec<_> = graph.ids().collect();
		assert_eq!(ids.len(), DEMO_NODE_COUNT);
		assert_eq!(graph.targets(ids[2]).unwrap(), vec![ids[4], ids[6]]);
		assert!(graph.targets(ids[7]).unwrap().is_empty());
		assert_eq!(graph.properties(ids[5]).unwrap()["label"], "Node 5");
	}
}
