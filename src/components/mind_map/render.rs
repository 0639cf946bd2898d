use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{DiagramState, node_radius};
use super::types::{EdgeCategory, NodeCategory};
use crate::api::Id;

pub const LABEL_BUDGET: usize = 15;
pub const DEFAULT_EDGE_WIDTH: f64 = 2.0;
pub const AUTHORED_DASH: [f64; 2] = [5.0, 5.0];
const BADGE_RADIUS: f64 = 8.0;
const BACKGROUND: &str = "#f8fafc";

pub fn node_color(category: NodeCategory) -> &'static str {
	match category {
		NodeCategory::Central => "#8B5CF6",
		NodeCategory::Main => "#3B82F6",
		NodeCategory::Sub => "#10B981",
		NodeCategory::Author => "#F72585",
		NodeCategory::Concept => "#06D6A0",
		NodeCategory::Connection => "#F59E0B",
		NodeCategory::Other => "#6B7280",
	}
}

pub fn edge_color(category: EdgeCategory) -> &'static str {
	match category {
		EdgeCategory::MainConcept => "#8B5CF6",
		EdgeCategory::Subconcept => "#3B82F6",
		EdgeCategory::Authored => "#F72585",
		EdgeCategory::Related => "#9CA3AF",
		EdgeCategory::Cites => "#F59E0B",
		EdgeCategory::Other => "#D1D5DB",
	}
}

/// Cut `label` to `budget` characters, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, budget: usize) -> String {
	if label.chars().count() <= budget {
		return label.to_owned();
	}
	let mut cut: String = label.chars().take(budget).collect();
	cut.push_str("...");
	cut
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	pub from: Id,
	pub to: Id,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub color: &'static str,
	pub width: f64,
	pub dash: Option<[f64; 2]>,
	pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	pub id: Id,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub fill: &'static str,
	pub label: String,
	pub badge: Option<u32>,
	pub selected: bool,
}

impl NodeShape {
	pub fn stroke(&self) -> (&'static str, f64) {
		if self.selected {
			("#1F2937", 3.0)
		} else {
			("#FFFFFF", 2.0)
		}
	}
}

/// Everything one frame draws, in diagram space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub edges: Vec<EdgeShape>,
	pub nodes: Vec<NodeShape>,
}

/// Project the current state into drawable shapes.
///
/// Edges resolve against the visible node set, so an edge is drawn only when
/// both ends exist and, under a search, both ends pass it.
pub fn build_scene(state: &DiagramState) -> Scene {
	let visible = state.visible_nodes();
	let find = |id: &Id| visible.iter().find(|n| &n.id == id);

	let edges = state
		.data
		.edges
		.iter()
		.filter_map(|edge| {
			let (a, b) = (find(&edge.from)?, find(&edge.to)?);
			Some(EdgeShape {
				from: edge.from.clone(),
				to: edge.to.clone(),
				x1: a.x,
				y1: a.y,
				x2: b.x,
				y2: b.y,
				color: edge_color(edge.category),
				width: edge.strength.map_or(DEFAULT_EDGE_WIDTH, |s| s * 2.0),
				dash: (edge.category == EdgeCategory::Authored).then_some(AUTHORED_DASH),
				label: edge.label.clone().filter(|l| !l.is_empty()),
			})
		})
		.collect();

	let selected = state.selected_id();
	let nodes = visible
		.iter()
		.map(|node| NodeShape {
			id: node.id.clone(),
			x: node.x,
			y: node.y,
			radius: node_radius(node),
			fill: node_color(node.category),
			label: truncate_label(&node.label, LABEL_BUDGET),
			badge: node.connections_count.filter(|c| *c > 0),
			selected: selected == Some(&node.id),
		})
		.collect();

	Scene { edges, nodes }
}

pub fn render(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	let scene = build_scene(state);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(&scene, ctx);
	draw_nodes(&scene, ctx);
	ctx.restore();
}

fn draw_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for edge in &scene.edges {
		ctx.set_stroke_style_str(edge.color);
		ctx.set_line_width(edge.width);
		let dash = match edge.dash {
			Some([on, off]) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
			None => js_sys::Array::new(),
		};
		let _ = ctx.set_line_dash(&dash);
		ctx.begin_path();
		ctx.move_to(edge.x1, edge.y1);
		ctx.line_to(edge.x2, edge.y2);
		ctx.stroke();

		if let Some(label) = &edge.label {
			ctx.set_fill_style_str("#4B5563");
			ctx.set_font("10px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, (edge.x1 + edge.x2) / 2.0, (edge.y1 + edge.y2) / 2.0 - 4.0);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	for node in &scene.nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.fill);
		ctx.fill();
		let (stroke, width) = node.stroke();
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(width);
		ctx.stroke();

		ctx.set_fill_style_str("#111827");
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text(&node.label, node.x, node.y + node.radius + 14.0);

		if let Some(count) = node.badge {
			let (bx, by) = (node.x + node.radius * 0.7, node.y - node.radius * 0.7);
			ctx.begin_path();
			let _ = ctx.arc(bx, by, BADGE_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str("#EF4444");
			ctx.fill();
			ctx.set_fill_style_str("white");
			ctx.set_font("bold 9px sans-serif");
			let _ = ctx.fill_text(&count.to_string(), bx, by + 3.0);
		}
	}
}
