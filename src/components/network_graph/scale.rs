//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Centralizes how drawn elements behave as the view zooms between the
//! clamped bounds (0.1x to 4x).
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// `(min_screen_px, max_screen_px)` - use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	///
	/// The returned value should be used directly in world-space drawing commands
	/// (after the canvas transform has been applied).
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so world bounds are screen bounds / k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "Constant/ScaleWithZoom variants available for custom alpha behaviors"
)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Alpha scales linearly with zoom, clamped to [0, 1].
	ScaleWithZoom,
	/// Alpha fades based on zoom thresholds.
	/// Fully visible at `full_alpha_k`, fades to zero at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Compute alpha multiplier for a given zoom level.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::ScaleWithZoom => k.clamp(0.0, 1.0),
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				let t = (k - zero_alpha_k) / (full_alpha_k - zero_alpha_k);
				t.clamp(0.0, 1.0)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
}

/// Configuration for link visual scaling.
#[derive(Clone, Debug)]
pub struct LinkScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Link label font size in screen pixels.
	pub label_size: f64,
}

/// Configuration for arrowhead visual scaling.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
	/// How arrow alpha scales with zoom.
	pub alpha_behavior: AlphaBehavior,
	/// Minimum alpha to bother drawing.
	pub cull_alpha: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub link: LinkScaleConfig,
	pub arrow: ArrowScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 5.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				label_size: 12.0,
				label_min_k: 0.5,
			},
			link: LinkScaleConfig {
				line_width: 1.0,
				label_size: 12.0,
			},
			arrow: ArrowScaleConfig {
				size: 8.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.15,
					full_alpha_k: 0.5,
				},
				cull_alpha: 0.05,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Node label font size in world-space pixels.
	pub node_label_size: f64,
	/// Node label font string (e.g., "12px Arial").
	pub node_label_font: String,
	/// Link line width in world-space.
	pub link_line_width: f64,
	/// Link label font size in world-space pixels.
	pub link_label_size: f64,
	/// Link label font string.
	pub link_label_font: String,
	/// Arrowhead size in world-space.
	pub arrow_size: f64,
	/// Arrowhead alpha multiplier [0, 1].
	pub arrow_alpha: f64,
	/// Whether to skip drawing arrowheads (alpha below threshold).
	pub cull_arrows: bool,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node.radius_behavior.apply(config.node.radius, k);
		let hit_radius = config.node.hit_behavior.apply(config.node.hit_radius, k);
		let node_label_size = config.node.label_size / k.max(config.node.label_min_k);
		let link_label_size = config.link.label_size / k.max(config.node.label_min_k);
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);

		Self {
			k,
			node_radius,
			hit_radius,
			node_label_size,
			node_label_font: format!("{}px Arial", node_label_size),
			link_line_width: config.link.line_width / k,
			link_label_size,
			link_label_font: format!("{}px Arial", link_label_size),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_behavior_counteracts_zoom() {
		let b = ScaleBehavior::Screen;
		assert_eq!(b.apply(10.0, 2.0), 5.0);
		assert_eq!(b.apply(10.0, 0.5), 20.0);
	}

	#[test]
	fn clamped_behavior_enforces_screen_minimum() {
		let b = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: f64::INFINITY,
		};
		// At k=0.1 a 5-unit radius would project to 0.5px; the clamp holds it
		// at 5px on screen (50 world units).
		assert_eq!(b.apply(5.0, 0.1), 50.0);
		// Zoomed in, the base world size projects above the minimum unchanged.
		assert_eq!(b.apply(5.0, 4.0), 5.0);
	}

	#[test]
	fn fade_behavior_interpolates_between_thresholds() {
		let f = AlphaBehavior::Fade {
			zero_alpha_k: 0.2,
			full_alpha_k: 0.6,
		};
		assert_eq!(f.apply(0.1), 0.0);
		assert_eq!(f.apply(0.6), 1.0);
		assert!((f.apply(0.4) - 0.5).abs() < 1e-9);
	}

	#[test]
	fn arrows_cull_when_zoomed_far_out() {
		let config = ScaleConfig::default();
		assert!(ScaledValues::new(&config, 0.1).cull_arrows);
		assert!(!ScaledValues::new(&config, 1.0).cull_arrows);
	}

	#[test]
	fn label_font_stops_growing_below_min_k() {
		let config = ScaleConfig::default();
		let at_floor = ScaledValues::new(&config, config.node.label_min_k);
		let below_floor = ScaledValues::new(&config, 0.1);
		assert_eq!(at_floor.node_label_size, below_floor.node_label_size);
	}
}
