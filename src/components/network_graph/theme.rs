//! Visual theming for the lineage graph.
//!
//! Provides the ordinal group palette, color helpers, and style configuration
//! for every drawn surface (background, links, nodes, legend, tooltip).

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Ordinal color palette for library groups.
///
/// Groups are assigned colors by first-appearance order, cycling when the
/// palette runs out.
#[derive(Clone, Debug)]
pub struct GroupPalette {
	pub colors: Vec<Color>,
}

impl GroupPalette {
	/// Soft pastel palette (default). Reads well on light documentation pages.
	pub fn pastel() -> Self {
		Self {
			colors: vec![
				Color::rgb(179, 226, 205), // Mint
				Color::rgb(253, 205, 172), // Apricot
				Color::rgb(203, 213, 232), // Periwinkle
				Color::rgb(244, 202, 228), // Orchid
				Color::rgb(230, 245, 201), // Pale lime
				Color::rgb(255, 242, 174), // Lemon
				Color::rgb(241, 226, 204), // Almond
				Color::rgb(204, 204, 204), // Silver
			],
		}
	}

	/// Muted slate blues and teals, for dark backgrounds.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Line and arrowhead color
	pub color: Color,
	/// Link label text color
	pub label_color: Color,
	/// Arrowhead opacity multiplier
	pub arrow_opacity: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
}

/// Legend visual style.
#[derive(Clone, Debug)]
pub struct LegendStyle {
	/// Swatch square side length in pixels
	pub swatch_size: f64,
	/// Vertical distance between rows in pixels
	pub row_pitch: f64,
	/// Label text color
	pub text_color: Color,
	/// Label font (CSS shorthand)
	pub font: &'static str,
}

/// Tooltip visual style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Panel fill color
	pub background: Color,
	/// Text color
	pub text_color: Color,
	/// Title font (CSS shorthand, rendered bold)
	pub title_font: &'static str,
	/// Body font (CSS shorthand)
	pub body_font: &'static str,
	/// Panel opacity when fully shown
	pub opacity: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub legend: LegendStyle,
	pub tooltip: TooltipStyle,
	pub palette: GroupPalette,
}

impl Theme {
	/// Light theme for embedding in documentation pages (default).
	pub fn document() -> Self {
		Self {
			name: "document",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
				vignette: 0.0,
			},
			link: LinkStyle {
				color: Color::rgb(170, 170, 170),
				label_color: Color::rgb(85, 85, 85),
				arrow_opacity: 0.3,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 0.0,
				border_color: Color::rgba(0, 0, 0, 0.0),
			},
			legend: LegendStyle {
				swatch_size: 18.0,
				row_pitch: 20.0,
				text_color: Color::rgb(51, 51, 51),
				font: "12px Arial",
			},
			tooltip: TooltipStyle {
				background: Color::rgb(245, 245, 245),
				text_color: Color::rgb(34, 34, 34),
				title_font: "bold 12px Arial",
				body_font: "12px Arial",
				opacity: 0.9,
			},
			palette: GroupPalette::pastel(),
		}
	}

	/// Dark theme with subtle gradient background.
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
				vignette: 0.2,
			},
			link: LinkStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				label_color: Color::rgba(170, 185, 200, 0.8),
				arrow_opacity: 0.4,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
			},
			legend: LegendStyle {
				swatch_size: 18.0,
				row_pitch: 20.0,
				text_color: Color::rgb(210, 215, 225),
				font: "12px Arial",
			},
			tooltip: TooltipStyle {
				background: Color::rgb(35, 40, 50),
				text_color: Color::rgb(225, 230, 240),
				title_font: "bold 12px Arial",
				body_font: "12px Arial",
				opacity: 0.9,
			},
			palette: GroupPalette::slate(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::document()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_format_as_hex() {
		assert_eq!(Color::rgb(170, 170, 170).to_css(), "#aaaaaa");
		assert_eq!(Color::rgb(255, 0, 16).to_css_rgb(), "#ff0010");
	}

	#[test]
	fn translucent_colors_format_as_rgba() {
		assert_eq!(Color::rgba(10, 20, 30, 0.5).to_css(), "rgba(10, 20, 30, 0.5)");
	}

	#[test]
	fn palette_cycles_past_its_length() {
		let palette = GroupPalette::pastel();
		let n = palette.colors.len();
		assert_eq!(palette.get(0), palette.get(n));
		assert_eq!(palette.get(3), palette.get(3 + 2 * n));
	}

	#[test]
	fn lighten_and_darken_move_towards_extremes() {
		let c = Color::rgb(100, 150, 200);
		let lighter = c.lighten(0.5);
		let darker = c.darken(0.5);
		assert!(lighter.r > c.r && lighter.g > c.g && lighter.b > c.b);
		assert!(darker.r < c.r && darker.g < c.g && darker.b < c.b);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
	}
}
