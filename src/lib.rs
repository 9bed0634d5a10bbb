//! lineage-graph: Interactive force-directed visualization of dataset
//! lineage networks.
//!
//! This crate provides a WASM-based graph visualization component that
//! renders dataset/library networks inside documentation pages, with
//! physics-based layout, pan/zoom, drag, hover highlighting, a library
//! legend, and a dataset tooltip.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{HtmlElement, HtmlScriptElement, Window};

pub mod components;

pub use components::network_graph::{GraphData, GraphLink, GraphNode, NetworkGraphCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("lineage-graph: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"lineage-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("lineage-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Mount the graph into an existing container element at a fixed size.
///
/// This is the entry point for documentation pages that place the
/// visualization themselves: the page provides an empty container, the graph
/// JSON in a `<script id="graph-data">` element, and the drawing dimensions.
#[wasm_bindgen]
pub fn mount_graph(container: &str, width: f64, height: f64) {
	init_logging();

	let Some(parent) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(container))
		.and_then(|e| e.dyn_into::<HtmlElement>().ok())
	else {
		warn!("lineage-graph: container #{} not found", container);
		return;
	};

	leptos::mount::mount_to(parent, move || {
		let graph_data = load_graph_data().unwrap_or_default();
		let graph_signal = Signal::derive(move || graph_data.clone());
		view! {
			<NetworkGraphCanvas data=graph_signal width=Some(width) height=Some(height) />
		}
	})
	.forget();
}

/// Main application component.
/// Loads graph data from DOM and renders the visualization fullscreen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Load graph data from the DOM
	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Dataset Lineage" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<NetworkGraphCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Dataset Lineage"</h1>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
	}
}
