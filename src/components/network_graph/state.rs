//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node dataset metadata,
//! the adjacency index for highlight queries, the view transform for
//! pan/zoom, the legend model, and the focus state machine driving
//! hover/legend highlight transitions.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::hash::Hash;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::GraphData;

/// Lower bound of the zoom scale.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper bound of the zoom scale.
pub const MAX_ZOOM: f64 = 4.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub dataset: String,
	pub library: String,
	pub line: u32,
	/// CSS color derived from the library's legend entry.
	pub color: String,
}

/// Per-link metadata attached to each edge in the simulation.
#[derive(Clone, Debug, Default)]
pub struct LinkInfo {
	pub label: String,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to [`MIN_ZOOM`]..[`MAX_ZOOM`]).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Symmetric connectivity index over resolved link endpoints.
///
/// Pairs are stored under a canonical (min, max) encoding so that
/// `contains(a, b)` and `contains(b, a)` are the same O(1) lookup.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
	pairs: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl AdjacencyIndex {
	/// Canonical encoding of an endpoint pair.
	pub fn canonical(
		a: DefaultNodeIdx,
		b: DefaultNodeIdx,
	) -> (DefaultNodeIdx, DefaultNodeIdx) {
		if a.index() <= b.index() { (a, b) } else { (b, a) }
	}

	pub fn insert(&mut self, a: DefaultNodeIdx, b: DefaultNodeIdx) {
		self.pairs.insert(Self::canonical(a, b));
	}

	pub fn contains(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> bool {
		self.pairs.contains(&Self::canonical(a, b))
	}

	/// All pairs containing `idx`, i.e. the links incident to it.
	pub fn incident(
		&self,
		idx: DefaultNodeIdx,
	) -> impl Iterator<Item = (DefaultNodeIdx, DefaultNodeIdx)> + '_ {
		self.pairs
			.iter()
			.copied()
			.filter(move |&(a, b)| a == idx || b == idx)
	}

	/// All nodes sharing a pair with `idx`.
	pub fn neighbors(&self, idx: DefaultNodeIdx) -> impl Iterator<Item = DefaultNodeIdx> + '_ {
		self.incident(idx)
			.map(move |(a, b)| if a == idx { b } else { a })
	}

	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}
}

/// One legend row: a library and its swatch color.
#[derive(Clone, Debug)]
pub struct LegendEntry {
	pub library: String,
	pub color: String,
	/// Measured label width in pixels; set once the canvas context exists.
	pub text_width: f64,
}

/// Legend model: one entry per distinct library, in first-appearance order.
#[derive(Clone, Debug, Default)]
pub struct Legend {
	pub entries: Vec<LegendEntry>,
	pub swatch_size: f64,
	pub row_pitch: f64,
}

impl Legend {
	/// Record measured label widths so rows get an accurate hover region.
	pub fn set_text_widths(&mut self, widths: &[f64]) {
		for (entry, &w) in self.entries.iter_mut().zip(widths) {
			entry.text_width = w;
		}
	}

	/// Hit test in screen coordinates. Rows sit flush with the right edge of
	/// a canvas of the given width; the hover region spans swatch and text.
	pub fn entry_at(&self, sx: f64, sy: f64, width: f64) -> Option<usize> {
		for (i, entry) in self.entries.iter().enumerate() {
			let top = i as f64 * self.row_pitch;
			let left = width - self.swatch_size - 6.0 - entry.text_width;
			if sy >= top && sy <= top + self.swatch_size && sx >= left && sx <= width {
				return Some(i);
			}
		}
		None
	}
}

/// Active focus mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	Idle,
	/// Pointer over a node: the node and its direct neighbors are focused.
	Node(DefaultNodeIdx),
	/// Pointer over a legend row: the row's library group is focused.
	Legend(usize),
}

/// Minimum time (seconds) a highlight must be held before it can fade out.
/// This prevents flashing when the pointer briefly skirts a hover zone.
const MIN_HOLD_TIME: f64 = 0.12;

/// Smoothing speeds. At 60fps, fade-in reaches ~95% in roughly 150ms and
/// fade-out in roughly 250ms.
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

/// Rendered opacity of elements outside the focus target set.
pub const DIMMED_OPACITY: f64 = 0.1;

fn animate_towards<K: Copy + Eq + Hash>(
	intensity: &mut HashMap<K, f64>,
	hold: &mut HashMap<K, f64>,
	target: &HashSet<K>,
	dt: f64,
) -> f64 {
	let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
	let fade_out = (-FADE_OUT_SPEED * dt).exp();

	for &key in target {
		let value = intensity.entry(key).or_insert(0.0);
		*value += (1.0 - *value) * fade_in;
	}

	hold.retain(|key, timer| {
		if target.contains(key) {
			true
		} else {
			*timer -= dt;
			*timer > 0.0
		}
	});

	let mut max: f64 = 0.0;
	intensity.retain(|key, value| {
		if target.contains(key) {
			max = max.max(*value);
			true
		} else {
			if hold.get(key).copied().unwrap_or(0.0) <= 0.0 {
				*value *= fade_out;
			}
			max = max.max(*value);
			*value > 0.005
		}
	});
	max
}

/// Focus state machine with smooth per-element intensity transitions.
///
/// Nodes and links each animate an intensity value (0.0 to 1.0) towards
/// membership in the current target set, using exponential smoothing with a
/// short minimum hold so focus changes fade rather than flash. The renderer
/// maps intensity to opacity between [`DIMMED_OPACITY`] and 1.0.
#[derive(Clone, Debug, Default)]
pub struct FocusState {
	focus: Focus,
	node_target: HashSet<DefaultNodeIdx>,
	edge_target: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	edge_intensity: HashMap<(DefaultNodeIdx, DefaultNodeIdx), f64>,
	node_hold: HashMap<DefaultNodeIdx, f64>,
	edge_hold: HashMap<(DefaultNodeIdx, DefaultNodeIdx), f64>,
	cached_max: f64,
}

impl FocusState {
	pub fn focus(&self) -> Focus {
		self.focus
	}

	fn set(
		&mut self,
		focus: Focus,
		node_target: HashSet<DefaultNodeIdx>,
		edge_target: HashSet<(DefaultNodeIdx, DefaultNodeIdx)>,
	) {
		if self.focus == focus {
			return;
		}
		self.focus = focus;
		self.node_target = node_target;
		self.edge_target = edge_target;
		for &idx in &self.node_target {
			self.node_hold.insert(idx, MIN_HOLD_TIME);
		}
		for &pair in &self.edge_target {
			self.edge_hold.insert(pair, MIN_HOLD_TIME);
		}
	}

	fn clear(&mut self) {
		self.set(Focus::Idle, HashSet::new(), HashSet::new());
	}

	/// Animate all intensities towards their targets.
	pub fn tick(&mut self, dt: f64) {
		let node_max = animate_towards(
			&mut self.node_intensity,
			&mut self.node_hold,
			&self.node_target,
			dt,
		);
		let edge_max = animate_towards(
			&mut self.edge_intensity,
			&mut self.edge_hold,
			&self.edge_target,
			dt,
		);
		self.cached_max = node_max.max(edge_max);
	}

	/// Smoothed highlight intensity for a node.
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Smoothed highlight intensity for a link, symmetric in its endpoints.
	pub fn edge_intensity(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		self.edge_intensity
			.get(&AdjacencyIndex::canonical(a, b))
			.copied()
			.unwrap_or(0.0)
	}

	/// Maximum intensity of any element; drives dimming of the rest.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Layout energy, the decaying scalar that throttles the physics step.
///
/// Starts hot so the initial layout relaxes, then decays towards the target.
/// Dragging raises the target (reheat) so the simulation reacts; releasing
/// lets it decay back to rest.
#[derive(Clone, Debug)]
pub struct Energy {
	pub alpha: f64,
	target: f64,
}

const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY_RATE: f64 = 1.4;
const REHEAT_TARGET: f64 = 0.3;

impl Energy {
	fn new() -> Self {
		Self {
			alpha: 1.0,
			target: 0.0,
		}
	}

	pub fn reheat(&mut self) {
		self.target = REHEAT_TARGET;
	}

	pub fn cool(&mut self) {
		self.target = 0.0;
	}

	pub fn tick(&mut self, dt: f64) {
		self.alpha += (self.target - self.alpha) * (1.0 - (-ALPHA_DECAY_RATE * dt).exp());
	}

	/// Whether the physics step should still run.
	pub fn is_active(&self) -> bool {
		self.alpha > ALPHA_MIN
	}
}

impl Default for Energy {
	fn default() -> Self {
		Self::new()
	}
}

/// Hover tooltip payload with fade transitions.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
	pub title: String,
	pub line: String,
	pub x: f64,
	pub y: f64,
	alpha: f64,
	visible: bool,
}

const TOOLTIP_FADE_IN_SPEED: f64 = 12.0;
const TOOLTIP_FADE_OUT_SPEED: f64 = 5.0;

impl Tooltip {
	pub fn show(&mut self, title: String, line: String, x: f64, y: f64) {
		self.title = title;
		self.line = line;
		self.x = x;
		self.y = y;
		self.visible = true;
	}

	pub fn hide(&mut self) {
		self.visible = false;
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.visible {
			(1.0, TOOLTIP_FADE_IN_SPEED)
		} else {
			(0.0, TOOLTIP_FADE_OUT_SPEED)
		};
		self.alpha += (target - self.alpha) * (1.0 - (-speed * dt).exp());
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}
}

/// Core graph state combining the physics simulation with interaction,
/// focus, legend, and tooltip tracking.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop.
pub struct NetworkState {
	pub graph: ForceGraph<NodeInfo, LinkInfo>,
	pub adjacency: AdjacencyIndex,
	pub legend: Legend,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub focus: FocusState,
	pub tooltip: Tooltip,
	pub energy: Energy,
	pub width: f64,
	pub height: f64,
}

impl NetworkState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		// Legend entries and the ordinal color scale share first-appearance
		// order of library names.
		let mut legend_entries: Vec<LegendEntry> = Vec::new();
		let mut library_order: HashMap<&str, usize> = HashMap::new();
		for node in &data.nodes {
			if !library_order.contains_key(node.library.as_str()) {
				let index = legend_entries.len();
				library_order.insert(node.library.as_str(), index);
				legend_entries.push(LegendEntry {
					library: node.library.clone(),
					color: theme.palette.get(index).to_css_rgb(),
					text_width: 0.0,
				});
			}
		}

		let mut id_to_idx = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let group = library_order[node.library.as_str()];
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					dataset: node.dataset.clone(),
					library: node.library.clone(),
					line: node.line,
					color: legend_entries[group].color.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut adjacency = AdjacencyIndex::default();
		for link in &data.links {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(
						src,
						tgt,
						EdgeData {
							user_data: LinkInfo {
								label: link.label.clone(),
							},
						},
					);
					adjacency.insert(src, tgt);
				}
				_ => {
					warn!(
						"lineage-graph: dropping link {} -> {}: unknown node id",
						link.source, link.target
					);
				}
			}
		}

		Self {
			graph,
			adjacency,
			legend: Legend {
				entries: legend_entries,
				swatch_size: theme.legend.swatch_size,
				row_pitch: theme.legend.row_pitch,
			},
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			focus: FocusState::default(),
			tooltip: Tooltip::default(),
			energy: Energy::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Legend row under the pointer, if any (screen coordinates).
	pub fn legend_entry_at(&self, sx: f64, sy: f64) -> Option<usize> {
		self.legend.entry_at(sx, sy, self.width)
	}

	/// Display metadata for a node.
	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut info = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				info = Some(node.data.user_data.clone());
			}
		});
		info
	}

	/// Focus a node: it and its direct neighbors stay at full opacity, links
	/// incident to it stay visible, everything else dims.
	pub fn focus_node(&mut self, idx: DefaultNodeIdx) {
		let mut node_target: HashSet<DefaultNodeIdx> = self.adjacency.neighbors(idx).collect();
		node_target.insert(idx);
		let edge_target = self.adjacency.incident(idx).collect();
		self.focus.set(Focus::Node(idx), node_target, edge_target);
	}

	/// Focus a legend row: its library's nodes stay at full opacity, links
	/// internal to the library stay visible, everything else dims.
	pub fn focus_legend(&mut self, entry: usize) {
		let Some(library) = self.legend.entries.get(entry).map(|e| e.library.clone()) else {
			return;
		};
		let mut node_target = HashSet::new();
		self.graph.visit_nodes(|node| {
			if node.data.user_data.library == library {
				node_target.insert(node.index());
			}
		});
		let mut edge_target = HashSet::new();
		self.graph.visit_edges(|n1, n2, _| {
			if node_target.contains(&n1.index()) && node_target.contains(&n2.index()) {
				edge_target.insert(AdjacencyIndex::canonical(n1.index(), n2.index()));
			}
		});
		self.focus.set(Focus::Legend(entry), node_target, edge_target);
	}

	/// Shared unfocus reset: restores full opacity everywhere and hides the
	/// tooltip.
	pub fn clear_focus(&mut self) {
		self.focus.clear();
		self.tooltip.hide();
	}

	/// Pin a node and start dragging it from the given screen position.
	/// Clears any focus and reheats the layout so it can react.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		self.clear_focus();
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = sx;
		self.drag.start_y = sy;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				self.drag.node_start_x = node.x();
				self.drag.node_start_y = node.y();
				node.data.is_anchor = true;
			}
		});
		self.energy.reheat();
	}

	/// Move the pinned node so it follows the pointer.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
			}
		});
	}

	/// Unpin the dragged node; its position becomes free again and the
	/// layout energy decays.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
		self.drag.node_idx = None;
		self.energy.cool();
	}

	/// Advance one frame: energy decay, physics (while energetic), and the
	/// focus/tooltip transitions.
	pub fn tick(&mut self, dt: f32) {
		self.energy.tick(dt as f64);
		if self.energy.is_active() {
			self.graph.update(dt * self.energy.alpha as f32);
		}
		self.focus.tick(dt as f64);
		self.tooltip.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{GraphLink, GraphNode};

	fn node(id: &str, dataset: &str, library: &str, line: u32) -> GraphNode {
		GraphNode {
			id: id.into(),
			dataset: dataset.into(),
			library: library.into(),
			line,
		}
	}

	fn link(source: &str, target: &str, label: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		}
	}

	fn chain_data() -> GraphData {
		// a -> b -> c, with c in a second library.
		GraphData {
			nodes: vec![
				node("a", "A", "L1", 1),
				node("b", "B", "L1", 2),
				node("c", "C", "L2", 3),
			],
			links: vec![link("a", "b", "uses"), link("b", "c", "creates")],
		}
	}

	fn new_state(data: &GraphData) -> NetworkState {
		NetworkState::new(data, 700.0, 500.0, &Theme::default())
	}

	fn indices(state: &NetworkState) -> HashMap<String, DefaultNodeIdx> {
		let mut map = HashMap::new();
		state.graph.visit_nodes(|n| {
			map.insert(n.data.user_data.dataset.clone(), n.index());
		});
		map
	}

	fn edge_count(state: &NetworkState) -> usize {
		let mut count = 0;
		state.graph.visit_edges(|_, _, _| count += 1);
		count
	}

	// One large step is enough for the exponential transitions to converge
	// to within the renderer's visibility threshold.
	const SETTLE: f64 = 2.0;

	#[test]
	fn resolution_drops_dangling_links() {
		let mut data = chain_data();
		data.links.push(link("a", "nope", "broken"));
		let state = new_state(&data);
		assert_eq!(edge_count(&state), 2);
		assert_eq!(state.adjacency.len(), 2);
	}

	#[test]
	fn adjacency_lookup_is_symmetric() {
		let state = new_state(&chain_data());
		let idx = indices(&state);
		assert!(state.adjacency.contains(idx["A"], idx["B"]));
		assert!(state.adjacency.contains(idx["B"], idx["A"]));
		assert!(!state.adjacency.contains(idx["A"], idx["C"]));
	}

	#[test]
	fn legend_follows_first_appearance_order() {
		let state = new_state(&chain_data());
		let libraries: Vec<&str> = state
			.legend
			.entries
			.iter()
			.map(|e| e.library.as_str())
			.collect();
		assert_eq!(libraries, ["L1", "L2"]);
	}

	#[test]
	fn nodes_share_their_library_color() {
		let state = new_state(&chain_data());
		let idx = indices(&state);
		let a = state.node_info(idx["A"]).unwrap();
		let b = state.node_info(idx["B"]).unwrap();
		let c = state.node_info(idx["C"]).unwrap();
		assert_eq!(a.color, b.color);
		assert_ne!(a.color, c.color);
		assert_eq!(a.color, state.legend.entries[0].color);
	}

	#[test]
	fn node_focus_lights_neighbors_and_incident_links_only() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);

		state.focus_node(idx["B"]);
		state.focus.tick(SETTLE);
		assert!(state.focus.node_intensity(idx["A"]) > 0.99);
		assert!(state.focus.node_intensity(idx["B"]) > 0.99);
		assert!(state.focus.node_intensity(idx["C"]) > 0.99);
		assert!(state.focus.edge_intensity(idx["A"], idx["B"]) > 0.99);
		assert!(state.focus.edge_intensity(idx["B"], idx["C"]) > 0.99);

		state.focus_node(idx["A"]);
		state.focus.tick(SETTLE);
		assert!(state.focus.node_intensity(idx["A"]) > 0.99);
		assert!(state.focus.node_intensity(idx["B"]) > 0.99);
		assert!(state.focus.node_intensity(idx["C"]) < 0.01);
		// Only the link incident to A stays lit; B-C connects two dimmed-out
		// elements even though B itself is a neighbor.
		assert!(state.focus.edge_intensity(idx["A"], idx["B"]) > 0.99);
		assert!(state.focus.edge_intensity(idx["B"], idx["C"]) < 0.01);
	}

	#[test]
	fn legend_focus_restricts_to_the_library() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);

		state.focus_legend(0); // L1
		state.focus.tick(SETTLE);
		assert!(state.focus.node_intensity(idx["A"]) > 0.99);
		assert!(state.focus.node_intensity(idx["B"]) > 0.99);
		assert!(state.focus.node_intensity(idx["C"]) < 0.01);
		// A-B is internal to L1; B-C crosses into L2.
		assert!(state.focus.edge_intensity(idx["A"], idx["B"]) > 0.99);
		assert!(state.focus.edge_intensity(idx["B"], idx["C"]) < 0.01);
		assert_eq!(state.focus.focus(), Focus::Legend(0));
	}

	#[test]
	fn unfocus_restores_everything_and_hides_tooltip() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);

		state.focus_node(idx["A"]);
		state
			.tooltip
			.show("L1.A".into(), "Line: 1".into(), 10.0, 10.0);
		state.focus.tick(SETTLE);
		state.tooltip.tick(SETTLE);
		assert!(state.tooltip.alpha() > 0.99);

		state.clear_focus();
		state.focus.tick(SETTLE);
		state.tooltip.tick(SETTLE);
		assert_eq!(state.focus.focus(), Focus::Idle);
		assert!(state.focus.max_intensity() < 0.01);
		for i in [idx["A"], idx["B"], idx["C"]] {
			assert!(state.focus.node_intensity(i) < 0.01);
		}
		assert!(state.tooltip.alpha() < 0.01);
	}

	#[test]
	fn drag_pins_then_releases_the_node() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);
		let target = idx["A"];

		state.begin_drag(target, 350.0, 250.0);
		assert!(state.drag.active);
		let mut anchored = false;
		state.graph.visit_nodes(|n| {
			if n.index() == target {
				anchored = n.data.is_anchor;
			}
		});
		assert!(anchored);

		// Pointer moves 40px right, 20px down at zoom 1.
		state.drag_to(390.0, 270.0);
		let mut pos = (0.0f32, 0.0f32);
		state.graph.visit_nodes(|n| {
			if n.index() == target {
				pos = (n.x(), n.y());
			}
		});
		assert_eq!(pos.0, state.drag.node_start_x + 40.0);
		assert_eq!(pos.1, state.drag.node_start_y + 20.0);

		state.end_drag();
		assert!(!state.drag.active);
		assert_eq!(state.drag.node_idx, None);
		let mut released = true;
		state.graph.visit_nodes(|n| {
			if n.index() == target {
				released = !n.data.is_anchor;
			}
		});
		assert!(released);
	}

	#[test]
	fn drag_reheats_and_release_cools() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);

		// Let the initial energy die down.
		for _ in 0..600 {
			state.energy.tick(0.016);
		}
		assert!(!state.energy.is_active());

		state.begin_drag(idx["A"], 0.0, 0.0);
		for _ in 0..60 {
			state.energy.tick(0.016);
		}
		assert!(state.energy.is_active());
		assert!(state.energy.alpha > 0.1);

		state.end_drag();
		for _ in 0..600 {
			state.energy.tick(0.016);
		}
		assert!(!state.energy.is_active());
	}

	#[test]
	fn begin_drag_clears_focus() {
		let mut state = new_state(&chain_data());
		let idx = indices(&state);
		state.focus_node(idx["B"]);
		state.begin_drag(idx["A"], 0.0, 0.0);
		assert_eq!(state.focus.focus(), Focus::Idle);
	}

	#[test]
	fn node_hit_test_honors_the_view_transform() {
		let state = new_state(&GraphData {
			nodes: vec![node("a", "A", "L1", 1)],
			links: vec![],
		});
		// A single node seeds at world (100, 0); the default transform puts
		// it at screen (width/2 + 100, height/2).
		let hit = state.node_at_position(450.0, 250.0, &ScaleConfig::default());
		assert!(hit.is_some());
		assert!(
			state
				.node_at_position(100.0, 100.0, &ScaleConfig::default())
				.is_none()
		);
	}

	#[test]
	fn legend_hit_test_targets_rows_at_the_right_edge() {
		let mut state = new_state(&chain_data());
		state.legend.set_text_widths(&[20.0, 20.0]);
		// Second row swatch area: x within 18px of the right edge, y in
		// [20, 38).
		assert_eq!(state.legend_entry_at(695.0, 25.0), Some(1));
		assert_eq!(state.legend_entry_at(695.0, 5.0), Some(0));
		assert_eq!(state.legend_entry_at(350.0, 25.0), None);
		assert_eq!(state.legend_entry_at(695.0, 100.0), None);
	}
}
