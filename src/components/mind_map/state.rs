use super::types::{DiagramData, DiagramNode};
use crate::api::Id;

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 1.2;
pub const DEFAULT_NODE_SIZE: f64 = 20.0;

/// Pan offset and zoom factor, applied as `translate(x, y) scale(k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Nodes whose label or description contains `search`, ignoring case.
pub fn filter_nodes<'a>(nodes: &'a [DiagramNode], search: &str) -> Vec<&'a DiagramNode> {
	if search.is_empty() {
		return nodes.iter().collect();
	}
	let needle = search.to_lowercase();
	nodes.iter().filter(|n| node_matches(n, &needle)).collect()
}

fn node_matches(node: &DiagramNode, needle: &str) -> bool {
	node.label.to_lowercase().contains(needle)
		|| node
			.description
			.as_deref()
			.is_some_and(|d| d.to_lowercase().contains(needle))
}

pub fn node_radius(node: &DiagramNode) -> f64 {
	node.size.filter(|s| *s > 0.0).unwrap_or(DEFAULT_NODE_SIZE)
}

/// Zoom, pan, search and selection over one diagram payload.
pub struct DiagramState {
	pub data: DiagramData,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	search: String,
	selected: Option<Id>,
	dirty: bool,
}

impl DiagramState {
	pub fn new(data: DiagramData, width: f64, height: f64) -> Self {
		Self {
			data,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			width,
			height,
			search: String::new(),
			selected: None,
			dirty: true,
		}
	}

	/// Swap in a new payload; the view and selection start over.
	pub fn set_data(&mut self, data: DiagramData) {
		self.data = data;
		self.reset_view();
	}

	pub fn set_search(&mut self, search: &str) {
		if self.search != search {
			self.search = search.to_owned();
			self.dirty = true;
		}
	}

	pub fn visible_nodes(&self) -> Vec<&DiagramNode> {
		filter_nodes(&self.data.nodes, &self.search)
	}

	pub fn zoom(&self) -> f64 {
		self.transform.k
	}

	pub fn set_zoom(&mut self, k: f64) {
		let k = k.clamp(MIN_ZOOM, MAX_ZOOM);
		if k != self.transform.k {
			self.transform.k = k;
			self.dirty = true;
		}
	}

	pub fn zoom_in(&mut self) {
		self.set_zoom(self.transform.k * ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.set_zoom(self.transform.k / ZOOM_STEP);
	}

	/// One wheel step: down zooms out, up zooms in. A purely horizontal
	/// scroll is not a zoom gesture and returns `false`.
	pub fn wheel_zoom(&mut self, delta_y: f64) -> bool {
		if delta_y > 0.0 {
			self.zoom_out();
		} else if delta_y < 0.0 {
			self.zoom_in();
		} else {
			return false;
		}
		true
	}

	/// Zoom 1, no pan, nothing selected.
	pub fn reset_view(&mut self) {
		self.transform = ViewTransform::default();
		self.pan = PanState::default();
		self.selected = None;
		self.dirty = true;
	}

	pub fn selected_id(&self) -> Option<&Id> {
		self.selected.as_ref()
	}

	/// Select `id` if it names a node; returns the node.
	pub fn select(&mut self, id: &Id) -> Option<&DiagramNode> {
		let node = self.data.nodes.iter().find(|n| &n.id == id)?;
		self.selected = Some(node.id.clone());
		self.dirty = true;
		Some(node)
	}

	pub fn clear_selection(&mut self) {
		if self.selected.take().is_some() {
			self.dirty = true;
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Top-most visible node under a screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<Id> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for node in self.visible_nodes() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			if (dx * dx + dy * dy).sqrt() <= node_radius(node) {
				found = Some(node.id.clone());
			}
		}
		found
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn drag_pan(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if dx != 0.0 || dy != 0.0 {
			self.pan.moved = true;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
		self.dirty = true;
	}

	/// Finish a pan; reports whether the pointer actually moved.
	pub fn end_pan(&mut self) -> bool {
		let moved = self.pan.active && self.pan.moved;
		self.pan.active = false;
		self.pan.moved = false;
		moved
	}

	/// Whether a repaint is due; resets the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::types::NodeCategory;

	fn node(id: i64, label: &str, description: Option<&str>, x: f64, y: f64) -> DiagramNode {
		DiagramNode {
			id: Id::from(id),
			label: label.into(),
			category: NodeCategory::Main,
			x,
			y,
			size: None,
			description: description.map(Into::into),
			references: Vec::new(),
			connections_count: None,
		}
	}

	fn sample() -> DiagramData {
		DiagramData {
			nodes: vec![
				node(1, "Quantum Computing", Some("Central research topic"), 300.0, 200.0),
				node(2, "Key Concepts", Some("Fundamental concepts"), 150.0, 100.0),
				node(3, "Applications", None, 450.0, 100.0),
				node(4, "Dr. Sarah Chen", Some("Leading RESEARCHER"), 250.0, 350.0),
			],
			..Default::default()
		}
	}

	fn ids(nodes: &[&DiagramNode]) -> Vec<String> {
		nodes.iter().map(|n| n.id.to_string()).collect()
	}

	#[test]
	fn empty_search_shows_everything() {
		let data = sample();
		assert_eq!(filter_nodes(&data.nodes, "").len(), 4);
	}

	#[test]
	fn search_matches_label_or_description_ignoring_case() {
		let data = sample();
		assert_eq!(ids(&filter_nodes(&data.nodes, "QUANTUM")), ["1"]);
		assert_eq!(ids(&filter_nodes(&data.nodes, "research")), ["1", "4"]);
		assert_eq!(ids(&filter_nodes(&data.nodes, "concept")), ["2"]);
		assert!(filter_nodes(&data.nodes, "zzz").is_empty());
	}

	#[test]
	fn filter_agrees_with_predicate_for_many_needles() {
		let data = sample();
		for needle in ["a", "ap", "Dr.", "  ", "tion", "sarah", "x"] {
			let expected: Vec<String> = data
				.nodes
				.iter()
				.filter(|n| {
					let needle = needle.to_lowercase();
					n.label.to_lowercase().contains(&needle)
						|| n.description
							.as_ref()
							.is_some_and(|d| d.to_lowercase().contains(&needle))
				})
				.map(|n| n.id.to_string())
				.collect();
			assert_eq!(ids(&filter_nodes(&data.nodes, needle)), expected, "{needle:?}");
		}
	}

	#[test]
	fn clearing_search_restores_full_set() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.set_search("chen");
		assert_eq!(state.visible_nodes().len(), 1);
		state.set_search("");
		assert_eq!(state.visible_nodes().len(), 4);
	}

	fn offset(state: &DiagramState) -> (f64, f64) {
		(state.transform.x, state.transform.y)
	}

	#[test]
	fn zoom_stays_clamped() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		for _ in 0..50 {
			state.zoom_in();
			assert!(state.zoom() <= MAX_ZOOM);
		}
		assert_eq!(state.zoom(), MAX_ZOOM);
		for _ in 0..50 {
			state.zoom_out();
			assert!(state.zoom() >= MIN_ZOOM);
		}
		assert_eq!(state.zoom(), MIN_ZOOM);
	}

	#[test]
	fn zoom_steps_are_multiplicative() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.zoom_in();
		assert!((state.zoom() - 1.2).abs() < 1e-9);
		state.zoom_out();
		assert!((state.zoom() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn wheel_ignores_horizontal_scroll() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		assert!(!state.wheel_zoom(0.0));
		assert_eq!(state.zoom(), 1.0);

		assert!(state.wheel_zoom(-100.0));
		assert!((state.zoom() - 1.2).abs() < 1e-9);
		assert!(state.wheel_zoom(100.0));
		assert!((state.zoom() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn reset_view_restores_defaults() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.zoom_in();
		state.zoom_in();
		state.begin_pan(0.0, 0.0);
		state.drag_pan(35.0, -12.0);
		state.select(&Id::from(3));
		assert!(state.selected_id().is_some());

		state.reset_view();
		assert_eq!(state.zoom(), 1.0);
		assert_eq!(offset(&state), (0.0, 0.0));
		assert!(!state.pan.active);
		assert!(state.selected_id().is_none());
	}

	#[test]
	fn selecting_unknown_id_is_a_no_op() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		assert!(state.select(&Id::from("missing")).is_none());
		assert!(state.selected_id().is_none());
		assert_eq!(state.select(&Id::from(2)).map(|n| n.label.as_str()), Some("Key Concepts"));
		state.clear_selection();
		assert!(state.selected_id().is_none());
	}

	#[test]
	fn hit_test_respects_pan_zoom_and_filter() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		assert_eq!(state.node_at_position(300.0, 200.0), Some(Id::from(1)));
		assert_eq!(state.node_at_position(10.0, 10.0), None);

		state.begin_pan(0.0, 0.0);
		state.drag_pan(100.0, 50.0);
		state.end_pan();
		state.set_zoom(2.0);
		// node 1 at (300, 200) now sits at (700, 450) on screen
		assert_eq!(state.node_at_position(700.0, 450.0), Some(Id::from(1)));

		state.set_search("applications");
		assert_eq!(state.node_at_position(700.0, 450.0), None);
	}

	#[test]
	fn pan_drag_tracks_movement() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.begin_pan(10.0, 10.0);
		state.drag_pan(40.0, 30.0);
		assert_eq!(offset(&state), (30.0, 20.0));
		assert!(state.end_pan());

		state.begin_pan(5.0, 5.0);
		assert!(!state.end_pan());
	}

	#[test]
	fn new_payload_resets_view() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.zoom_in();
		state.select(&Id::from(1));
		state.set_data(DiagramData::default());
		assert_eq!(state.zoom(), 1.0);
		assert!(state.selected_id().is_none());
		assert!(state.visible_nodes().is_empty());
	}

	#[test]
	fn search_survives_new_payload() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		state.set_search("chen");
		state.set_data(DiagramData::default());
		state.set_data(sample());
		assert_eq!(ids(&state.visible_nodes()), ["4"]);
	}

	#[test]
	fn dirty_flag_is_consumed() {
		let mut state = DiagramState::new(sample(), 800.0, 600.0);
		assert!(state.take_dirty());
		assert!(!state.take_dirty());
		state.set_search("x");
		assert!(state.take_dirty());
		state.set_search("x");
		assert!(!state.take_dirty());
	}
}
