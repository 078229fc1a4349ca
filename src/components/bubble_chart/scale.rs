//! Value-to-visual scales.

use super::types::Category;

/// Square-root scale, so bubble *area* grows linearly with the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl SqrtScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = (self.domain.0.max(0.0).sqrt(), self.domain.1.max(0.0).sqrt());
		let (r0, r1) = self.range;
		// A collapsed domain maps everything onto the lower end of the range.
		if d1 - d0 <= f64::EPSILON {
			return r0;
		}
		let t = (value.max(0.0).sqrt() - d0) / (d1 - d0);
		r0 + (r1 - r0) * t
	}
}

/// Ordinal color scale over the five categories.
#[derive(Clone, Copy, Debug)]
pub struct CategoryColors<'a> {
	palette: &'a [&'static str; 5],
}

impl<'a> CategoryColors<'a> {
	pub fn new(palette: &'a [&'static str; 5]) -> Self {
		Self { palette }
	}

	pub fn fill(&self, category: Category) -> &'static str {
		self.palette[category.index()]
	}

	/// Stroke shade, `d3.rgb(c).darker()` style (each channel times 0.7).
	pub fn stroke(&self, category: Category) -> String {
		darker(self.fill(category))
	}
}

pub fn darker(hex: &str) -> String {
	match parse_hex(hex) {
		Some((r, g, b)) => {
			let k = 0.7;
			format!(
				"rgb({}, {}, {})",
				(r as f64 * k).round() as u8,
				(g as f64 * k).round() as u8,
				(b as f64 * k).round() as u8
			)
		}
		None => hex.to_string(),
	}
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
	let hex = hex.strip_prefix('#')?;
	if hex.len() != 6 {
		return None;
	}
	let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
	Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sqrt_scale_hits_range_ends() {
		let s = SqrtScale::new((0.0, 40.0), (2.0, 20.0));
		assert_eq!(s.apply(0.0), 2.0);
		assert!((s.apply(40.0) - 20.0).abs() < 1e-9);
		assert!((s.apply(10.0) - 11.0).abs() < 1e-9);
	}

	#[test]
	fn collapsed_domain_uses_min_radius() {
		let s = SqrtScale::new((0.0, 0.0), (2.0, 20.0));
		assert_eq!(s.apply(0.0), 2.0);
	}

	#[test]
	fn darker_scales_channels() {
		assert_eq!(darker("#FF1D25"), "rgb(179, 20, 26)");
		assert_eq!(darker("violet"), "violet");
	}

	#[test]
	fn colors_follow_category_order() {
		let palette = ["a", "b", "c", "d", "e"];
		let colors = CategoryColors::new(&palette);
		assert_eq!(colors.fill(Category::new(3).unwrap()), "c");
	}
}
