//! Canvas rendering for the lineage graph.
//!
//! Handles all drawing operations, in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Links, arrowheads, link labels (world space)
//! 3. Nodes, then node labels via the de-overlap pass (world space)
//! 4. Vignette, legend, tooltip (screen space)
//!
//! Coordinates read from the simulation pass through a finite guard so
//! malformed geometry from layout startup never reaches the canvas.

use std::f64::consts::PI;

use force_graph::Node;
use web_sys::CanvasRenderingContext2d;

use super::labels::{self, LabelRequest};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{DIMMED_OPACITY, NetworkState, NodeInfo};
use super::theme::{Color, Theme};

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Substitute 0 for non-finite coordinates during layout startup.
fn finite_or_zero(x: f64) -> f64 {
	if x.is_finite() { x } else { 0.0 }
}

/// Rendered opacity for an element: fully focused elements reach 1.0, and
/// everything else sinks towards [`DIMMED_OPACITY`] as the strongest focus
/// intensity rises.
fn element_alpha(element_t: f64, max_t: f64) -> f64 {
	let dim = 1.0 - (1.0 - DIMMED_OPACITY) * smooth_step(max_t);
	dim + (1.0 - dim) * smooth_step(element_t)
}

fn node_pos(node: &Node<NodeInfo>) -> (f64, f64) {
	(
		finite_or_zero(node.x() as f64),
		finite_or_zero(node.y() as f64),
	)
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
	ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

/// Measure legend label widths so rows get accurate hover regions.
/// Call once after the canvas context exists.
pub fn measure_legend(state: &mut NetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_font(theme.legend.font);
	let widths: Vec<f64> = state
		.legend
		.entries
		.iter()
		.map(|e| text_width(ctx, &e.library))
		.collect();
	state.legend.set_text_widths(&widths);
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let max_t = state.focus.max_intensity();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_links(state, ctx, &scale, theme, max_t);
	draw_link_labels(state, ctx, &scale, theme, max_t);
	draw_nodes(state, ctx, &scale, theme, max_t);
	draw_node_labels(state, ctx, &scale, theme, max_t);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}

	draw_legend(state, ctx, theme);
	draw_tooltip(state, ctx, theme);
}

fn draw_background(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = ctx
		.create_radial_gradient(
			state.width / 2.0,
			state.height / 2.0,
			state.width.min(state.height) * 0.3,
			state.width / 2.0,
			state.height / 2.0,
			state.width.max(state.height) * 0.7,
		)
		.unwrap();

	gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)").unwrap();
	gradient
		.add_color_stop(
			1.0,
			&format!("rgba(0, 0, 0, {})", theme.background.vignette),
		)
		.unwrap();

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_links(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	max_t: f64,
) {
	let color = theme.link.color;

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1) = node_pos(n1);
		let (x2, y2) = node_pos(n2);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let alpha = element_alpha(state.focus.edge_intensity(n1.index(), n2.index()), max_t);
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&color.with_alpha(color.a * alpha).to_css());
		ctx.set_line_width(scale.link_line_width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
		ctx.line_to(
			x2 - ux * (scale.node_radius + scale.arrow_size),
			y2 - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		let arrow_alpha = theme.link.arrow_opacity * scale.arrow_alpha * alpha;
		if !scale.cull_arrows && arrow_alpha > 0.01 {
			ctx.set_fill_style_str(&color.with_alpha(color.a * arrow_alpha).to_css());

			let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	});
}

fn draw_link_labels(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	max_t: f64,
) {
	let color = theme.link.label_color;
	ctx.set_font(&scale.link_label_font);

	state.graph.visit_edges(|n1, n2, edge| {
		let label = &edge.user_data.label;
		if label.is_empty() {
			return;
		}

		let alpha = element_alpha(state.focus.edge_intensity(n1.index(), n2.index()), max_t);
		if alpha < 0.02 {
			return;
		}

		let (x1, y1) = node_pos(n1);
		let (x2, y2) = node_pos(n2);
		let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		let width = text_width(ctx, label);

		ctx.set_fill_style_str(&color.with_alpha(color.a * alpha).to_css());
		let _ = ctx.fill_text(label, mid_x - width / 2.0, mid_y);
	});
}

fn draw_nodes(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	max_t: f64,
) {
	// Dimmed nodes first, focused ones on top.
	state.graph.visit_nodes(|node| {
		if state.focus.node_intensity(node.index()) <= 0.001 {
			draw_node(state, ctx, node, scale, theme, max_t);
		}
	});
	state.graph.visit_nodes(|node| {
		if state.focus.node_intensity(node.index()) > 0.001 {
			draw_node(state, ctx, node, scale, theme, max_t);
		}
	});
}

fn draw_node(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	max_t: f64,
) {
	let (x, y) = node_pos(node);
	let radius = scale.node_radius;
	let color = &node.data.user_data.color;
	let alpha = element_alpha(state.focus.node_intensity(node.index()), max_t);

	ctx.set_global_alpha(alpha);

	if theme.node.use_gradient {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.unwrap();

		let base_color = parse_color(color);
		let highlight = base_color.lighten(0.4);
		let shadow = base_color.darken(0.2);

		gradient.add_color_stop(0.0, &highlight.to_css()).unwrap();
		gradient.add_color_stop(0.7, &base_color.to_css()).unwrap();
		gradient.add_color_stop(1.0, &shadow.to_css()).unwrap();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
	}

	if theme.node.border_width > 0.0 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_node_labels(
	state: &NetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	max_t: f64,
) {
	ctx.set_font(&scale.node_label_font);

	let mut requests = Vec::new();
	let mut texts: Vec<(String, f64)> = Vec::new();
	state.graph.visit_nodes(|node| {
		let alpha = element_alpha(state.focus.node_intensity(node.index()), max_t);
		if alpha < 0.02 {
			return;
		}
		let (x, y) = node_pos(node);
		let dataset = node.data.user_data.dataset.clone();
		requests.push(LabelRequest {
			x,
			y,
			width: text_width(ctx, &dataset),
			height: scale.node_label_size,
			clearance: scale.node_radius + 4.0,
		});
		texts.push((dataset, alpha));
	});

	let color = theme.legend.text_color;
	for (pos, (text, alpha)) in labels::place_labels(&requests).iter().zip(&texts) {
		ctx.set_fill_style_str(&color.with_alpha(color.a * alpha).to_css());
		let _ = ctx.fill_text(text, pos.0, pos.1);
	}
}

fn draw_legend(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let swatch = state.legend.swatch_size;
	let pitch = state.legend.row_pitch;

	ctx.set_font(theme.legend.font);
	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");

	for (i, entry) in state.legend.entries.iter().enumerate() {
		let top = i as f64 * pitch;
		ctx.set_fill_style_str(&entry.color);
		ctx.fill_rect(state.width - swatch, top, swatch, swatch);

		ctx.set_fill_style_str(&theme.legend.text_color.to_css());
		let _ = ctx.fill_text(&entry.library, state.width - swatch - 6.0, top + swatch / 2.0);
	}

	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}

fn draw_tooltip(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let alpha = state.tooltip.alpha() * theme.tooltip.opacity;
	if alpha < 0.02 {
		return;
	}

	let style = &theme.tooltip;
	ctx.set_font(style.title_font);
	let title_width = text_width(ctx, &state.tooltip.title);
	ctx.set_font(style.body_font);
	let body_width = text_width(ctx, &state.tooltip.line);

	let pad = 6.0;
	let line_height = 14.0;
	let box_width = title_width.max(body_width) + pad * 2.0;
	let box_height = line_height * 2.0 + pad * 2.0;
	// Panel sits just above-right of the pointer, like a cursor tooltip.
	let x = state.tooltip.x + 12.0;
	let y = state.tooltip.y - 28.0 - box_height;

	ctx.set_fill_style_str(&style.background.with_alpha(alpha).to_css());
	ctx.fill_rect(x, y, box_width, box_height);

	ctx.set_fill_style_str(&style.text_color.with_alpha(alpha).to_css());
	ctx.set_font(style.title_font);
	let _ = ctx.fill_text(&state.tooltip.title, x + pad, y + pad + line_height - 3.0);
	ctx.set_font(style.body_font);
	let _ = ctx.fill_text(&state.tooltip.line, x + pad, y + pad + line_height * 2.0 - 3.0);
}

/// Parses a CSS color string into a [`Color`].
/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
fn parse_color(color_str: &str) -> Color {
	if color_str.starts_with('#') && color_str.len() == 7 {
		let r = u8::from_str_radix(&color_str[1..3], 16).unwrap_or(128);
		let g = u8::from_str_radix(&color_str[3..5], 16).unwrap_or(128);
		let b = u8::from_str_radix(&color_str[5..7], 16).unwrap_or(128);
		Color::rgb(r, g, b)
	} else if color_str.starts_with("rgb") {
		let nums: Vec<&str> = color_str
			.trim_start_matches("rgba(")
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(',')
			.collect();
		let r = nums
			.first()
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let g = nums
			.get(1)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let b = nums
			.get(2)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let a = nums
			.get(3)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(1.0);
		Color::rgba(r, g, b, a)
	} else {
		Color::rgb(128, 128, 128)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finite_guard_masks_bad_coordinates() {
		assert_eq!(finite_or_zero(f64::NAN), 0.0);
		assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
		assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
		assert_eq!(finite_or_zero(42.5), 42.5);
	}

	#[test]
	fn smooth_step_is_clamped_and_monotone_at_ends() {
		assert_eq!(smooth_step(0.0), 0.0);
		assert_eq!(smooth_step(1.0), 1.0);
		assert!(smooth_step(0.25) < smooth_step(0.75));
	}

	#[test]
	fn element_alpha_spans_full_to_dimmed() {
		// No focus anywhere: everything fully opaque.
		assert_eq!(element_alpha(0.0, 0.0), 1.0);
		// Focused element under active focus: fully opaque.
		assert!((element_alpha(1.0, 1.0) - 1.0).abs() < 1e-9);
		// Unfocused element under active focus: dimmed.
		assert!((element_alpha(0.0, 1.0) - DIMMED_OPACITY).abs() < 1e-9);
	}

	#[test]
	fn parses_hex_and_rgb_colors() {
		assert_eq!(parse_color("#b3e2cd"), Color::rgb(179, 226, 205));
		assert_eq!(parse_color("rgb(10, 20, 30)"), Color::rgb(10, 20, 30));
		assert_eq!(
			parse_color("rgba(10, 20, 30, 0.5)"),
			Color::rgba(10, 20, 30, 0.5)
		);
		// Unknown notation falls back to gray.
		assert_eq!(parse_color("tomato"), Color::rgb(128, 128, 128));
	}
}
