//! Node label placement with overlap avoidance.
//!
//! Each label is measured into a box anchored at its node, then placed
//! greedily in input order: candidate positions are tried in a fixed
//! sequence (right of the node, below, left, above) and the first one that
//! does not intersect an already-placed label wins. When every candidate
//! collides, the label stays in its primary position rather than drifting
//! arbitrarily far from its node.

/// A label to place: node anchor position, measured text extents, and the
/// clearance to keep from the anchor (node radius plus padding).
#[derive(Clone, Debug)]
pub struct LabelRequest {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub clearance: f64,
}

/// Axis-aligned box occupied by a placed label.
#[derive(Clone, Copy, Debug)]
struct Rect {
	x: f64,
	y: f64,
	w: f64,
	h: f64,
}

impl Rect {
	fn intersects(&self, other: &Rect) -> bool {
		self.x < other.x + other.w
			&& other.x < self.x + self.w
			&& self.y < other.y + other.h
			&& other.y < self.y + self.h
	}
}

/// Candidate baseline offsets for a label, relative to its anchor.
/// Order encodes preference; the first is the primary position.
fn candidates(req: &LabelRequest) -> [(f64, f64); 4] {
	let c = req.clearance;
	let h = req.height;
	[
		// Right of the node, baseline slightly below anchor center.
		(c, h * 0.3),
		// Centered below.
		(-req.width / 2.0, c + h),
		// Left of the node, text ending at the clearance edge.
		(-c - req.width, h * 0.3),
		// Centered above.
		(-req.width / 2.0, -c),
	]
}

fn box_at(req: &LabelRequest, offset: (f64, f64)) -> Rect {
	// Text is drawn at its baseline; the occupied box extends upward.
	Rect {
		x: req.x + offset.0,
		y: req.y + offset.1 - req.height,
		w: req.width,
		h: req.height,
	}
}

/// Compute baseline positions for a set of labels.
///
/// Returns one `(x, y)` per request, in order. Positions are absolute (anchor
/// plus chosen offset), ready to pass to `fill_text`.
pub fn place_labels(requests: &[LabelRequest]) -> Vec<(f64, f64)> {
	let mut placed: Vec<Rect> = Vec::with_capacity(requests.len());
	let mut positions = Vec::with_capacity(requests.len());

	for req in requests {
		let options = candidates(req);
		let chosen = options
			.iter()
			.find(|&&offset| {
				let rect = box_at(req, offset);
				!placed.iter().any(|p| rect.intersects(p))
			})
			.copied()
			.unwrap_or(options[0]);

		placed.push(box_at(req, chosen));
		positions.push((req.x + chosen.0, req.y + chosen.1));
	}

	positions
}

#[cfg(test)]
mod tests {
	use super::*;

	fn req(x: f64, y: f64) -> LabelRequest {
		LabelRequest {
			x,
			y,
			width: 40.0,
			height: 12.0,
			clearance: 9.0,
		}
	}

	#[test]
	fn distant_labels_all_take_the_primary_position() {
		let requests = [req(0.0, 0.0), req(200.0, 0.0), req(0.0, 200.0)];
		let positions = place_labels(&requests);
		for (pos, r) in positions.iter().zip(&requests) {
			assert_eq!(*pos, (r.x + r.clearance, r.y + r.height * 0.3));
		}
	}

	#[test]
	fn coincident_labels_do_not_overlap() {
		let requests = [req(0.0, 0.0), req(2.0, 0.0)];
		let positions = place_labels(&requests);
		assert_ne!(positions[0].1, positions[1].1);

		let boxes: Vec<Rect> = requests
			.iter()
			.zip(&positions)
			.map(|(r, p)| Rect {
				x: p.0,
				y: p.1 - r.height,
				w: r.width,
				h: r.height,
			})
			.collect();
		assert!(!boxes[0].intersects(&boxes[1]));
	}

	#[test]
	fn four_coincident_labels_exhaust_distinct_candidates() {
		let requests = vec![req(0.0, 0.0); 4];
		let positions = place_labels(&requests);
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				assert_ne!(positions[i], positions[j]);
			}
		}
	}

	#[test]
	fn saturated_cluster_falls_back_to_primary() {
		let requests = vec![req(0.0, 0.0); 6];
		let positions = place_labels(&requests);
		assert_eq!(positions.len(), 6);
		// Fifth and later labels have no free candidate left; they sit at the
		// primary offset instead of wandering.
		assert_eq!(positions[4], positions[0]);
	}

	#[test]
	fn empty_input_yields_empty_output() {
		assert!(place_labels(&[]).is_empty());
	}
}
