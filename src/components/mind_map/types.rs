use serde::{Deserialize, Serialize};

use crate::api::Id;
use crate::api::types::null_as_default;

/// Visual class of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
	Central,
	Main,
	Sub,
	Author,
	Concept,
	Connection,
	#[default]
	#[serde(other)]
	Other,
}

/// Visual class of an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCategory {
	MainConcept,
	Subconcept,
	Authored,
	#[default]
	Related,
	Cites,
	#[serde(other)]
	Other,
}

impl NodeCategory {
	pub fn label(self) -> &'static str {
		match self {
			NodeCategory::Central => "Central topic",
			NodeCategory::Main => "Main branch",
			NodeCategory::Sub => "Sub-topic",
			NodeCategory::Author => "Author",
			NodeCategory::Concept => "Concept",
			NodeCategory::Connection => "Connection",
			NodeCategory::Other => "Node",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DiagramNode {
	pub id: Id,
	#[serde(default, deserialize_with = "null_as_default")]
	pub label: String,
	#[serde(rename = "type", default, deserialize_with = "null_as_default")]
	pub category: NodeCategory,
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
	#[serde(default)]
	pub size: Option<f64>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub references: Vec<String>,
	#[serde(default)]
	pub connections_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DiagramEdge {
	pub from: Id,
	pub to: Id,
	#[serde(rename = "type", default, deserialize_with = "null_as_default")]
	pub category: EdgeCategory,
	#[serde(default)]
	pub strength: Option<f64>,
	#[serde(default)]
	pub label: Option<String>,
}

/// Nodes and edges of one mind map, as delivered by the backend.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DiagramData {
	#[serde(default)]
	pub id: Option<Id>,
	#[serde(default)]
	pub topic: Option<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub nodes: Vec<DiagramNode>,
	#[serde(
		rename = "connections",
		alias = "edges",
		default,
		deserialize_with = "null_as_default"
	)]
	pub edges: Vec<DiagramEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_categories_fall_back() {
		let data: DiagramData = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": "central", "label": "Topic", "type": "central", "x": 400, "y": 300},
					{"id": "p1", "label": "Paper", "type": "paper", "x": 0, "y": 0},
					{"id": 7, "label": "Untyped"}
				],
				"connections": [
					{"from": "central", "to": "p1", "type": "authored_by"},
					{"from": "central", "to": 7}
				]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].category, NodeCategory::Central);
		assert_eq!(data.nodes[1].category, NodeCategory::Other);
		assert_eq!(data.nodes[2].category, NodeCategory::Other);
		assert_eq!(data.nodes[2].id, Id::from(7));
		assert_eq!(data.edges[0].category, EdgeCategory::Other);
		assert_eq!(data.edges[1].category, EdgeCategory::Related);
	}

	#[test]
	fn interactive_fields_decode() {
		let node: DiagramNode = serde_json::from_str(
			r##"{
				"id": 10, "label": "Dr. Sarah Chen", "x": 250, "y": 350, "type": "author",
				"size": 15, "color": "#82E0AA", "description": "Leading researcher",
				"references": ["Paper 1", "Paper 3"], "connections_count": 2
			}"##,
		)
		.unwrap();
		assert_eq!(node.category, NodeCategory::Author);
		assert_eq!(node.size, Some(15.0));
		assert_eq!(node.references.len(), 2);
		assert_eq!(node.connections_count, Some(2));

		let edge: DiagramEdge = serde_json::from_str(
			r#"{"from": 1, "to": 2, "strength": 0.8, "type": "main_concept", "label": "faces"}"#,
		)
		.unwrap();
		assert_eq!(edge.category, EdgeCategory::MainConcept);
		assert_eq!(edge.strength, Some(0.8));
	}

	#[test]
	fn edges_alias_is_accepted() {
		let data: DiagramData =
			serde_json::from_str(r#"{"nodes": [], "edges": [{"from": 1, "to": 2}]}"#).unwrap();
		assert_eq!(data.edges.len(), 1);
	}
}
