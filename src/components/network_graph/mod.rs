//! Lineage network visualization component.
//!
//! Renders an interactive force-directed dataset graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Hover focus dimming everything but a node and its direct neighbors
//! - A clickable library legend and a dataset tooltip
//!
//! # Example
//!
//! ```ignore
//! use lineage_graph::{NetworkGraphCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), dataset: "COSTS".into(), library: "work".into(), line: 12 },
//!         GraphNode { id: "b".into(), dataset: "FINAL".into(), library: "out".into(), line: 40 },
//!     ],
//!     links: vec![
//!         GraphLink { source: "a".into(), target: "b".into(), label: "uses".into() },
//!     ],
//! };
//!
//! view! { <NetworkGraphCanvas data=data.into() width=Some(700.0) height=Some(500.0) /> }
//! ```

mod component;
mod labels;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use component::NetworkGraphCanvas;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};
