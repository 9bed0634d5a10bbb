//! Input data model for the lineage network graph.

use serde::Deserialize;

/// A dataset node in the lineage network.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Dataset name, shown as the node label.
	pub dataset: String,
	/// Library the dataset belongs to. Drives group coloring and the legend.
	pub library: String,
	/// Source line the dataset was created on, shown in the hover tooltip.
	pub line: u32,
}

/// A directed relationship between two datasets.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Relationship text, shown at the link midpoint.
	pub label: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_network_json() {
		let json = r#"{
			"nodes": [
				{"id": "a", "dataset": "A", "library": "L1", "line": 1},
				{"id": "b", "dataset": "B", "library": "L1", "line": 2}
			],
			"links": [
				{"source": "a", "target": "b", "label": "uses"}
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[0].dataset, "A");
		assert_eq!(data.nodes[1].line, 2);
		assert_eq!(data.links[0].label, "uses");
	}

	#[test]
	fn rejects_nodes_missing_required_fields() {
		let json = r#"{"nodes": [{"id": "a", "dataset": "A"}], "links": []}"#;
		assert!(serde_json::from_str::<GraphData>(json).is_err());
	}
}
