use super::types::Point;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
	#[error("chart area must be positive, got {width}x{height}")]
	EmptyArea { width: f64, height: f64 },
	#[error("radius range [{min}, {max}] must be positive and ordered")]
	RadiusRange { min: f64, max: f64 },
	#[error("year margin {0} leaves no room for columns")]
	YearMargin(f64),
	#[error("energy must start above {min} and decay in (0, 1), got start {start} decay {decay}")]
	Energy { start: f64, decay: f64, min: f64 },
	#[error("friction {0} must be in [0, 1)")]
	Friction(f64),
}

/// Chart geometry, physics and palette.
///
/// The defaults describe the staff chart: a 940x600 view with a
/// 100px legend strip below a 940x500 plotting area.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
	pub width: f64,
	pub full_height: f64,
	pub margin_bottom: f64,
	pub margin_left: f64,
	pub min_radius: f64,
	pub max_radius: f64,
	/// Horizontal inset of the first year column.
	pub year_margin: f64,
	pub damper: f64,
	/// Extra vertical pull used while split by year.
	pub split_boost: f64,
	/// Pairwise repulsion at full energy. Bubble mass is its radius, and
	/// the charge cools with alpha.
	pub charge: f64,
	/// Cap on a single pair's repulsion.
	pub charge_max: f64,
	pub friction: f64,
	pub alpha_start: f64,
	pub alpha_decay: f64,
	pub alpha_min: f64,
	/// Seconds for bubbles to grow to their full radius.
	pub grow_duration: f64,
	pub palette: [&'static str; 5],
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			width: 940.0,
			full_height: 600.0,
			margin_bottom: 100.0,
			margin_left: 0.0,
			min_radius: 2.0,
			max_radius: 20.0,
			year_margin: 20.0,
			damper: 0.102,
			split_boost: 1.1,
			charge: 40.0,
			charge_max: 20.0,
			friction: 0.9,
			alpha_start: 0.1,
			alpha_decay: 0.99,
			alpha_min: 0.005,
			grow_duration: 2.0,
			palette: ["#3FA9F5", "#7AC943", "#FF931E", "#FF1D25", "#EE82EE"],
		}
	}
}

impl ChartConfig {
	/// Height of the plotting area above the legend.
	pub fn height(&self) -> f64 {
		self.full_height - self.margin_bottom
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height() / 2.0)
	}

	/// Rejects geometry and physics settings the chart cannot run with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let (width, height) = (self.width, self.height());
		if !(width > 0.0 && height > 0.0) {
			return Err(ConfigError::EmptyArea { width, height });
		}
		if !(self.min_radius > 0.0 && self.max_radius >= self.min_radius) {
			return Err(ConfigError::RadiusRange {
				min: self.min_radius,
				max: self.max_radius,
			});
		}
		if !(self.year_margin >= 0.0 && 2.0 * self.year_margin < width) {
			return Err(ConfigError::YearMargin(self.year_margin));
		}
		let decays = self.alpha_decay > 0.0 && self.alpha_decay < 1.0;
		if !(decays && self.alpha_min > 0.0 && self.alpha_start > self.alpha_min) {
			return Err(ConfigError::Energy {
				start: self.alpha_start,
				decay: self.alpha_decay,
				min: self.alpha_min,
			});
		}
		if !(0.0..1.0).contains(&self.friction) {
			return Err(ConfigError::Friction(self.friction));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		assert_eq!(ChartConfig::default().validate(), Ok(()));
	}

	#[test]
	fn degenerate_geometry_is_rejected() {
		let config = ChartConfig {
			width: 0.0,
			..ChartConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::EmptyArea { .. })));

		let config = ChartConfig {
			margin_bottom: 600.0,
			..ChartConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::EmptyArea { .. })));

		let config = ChartConfig {
			min_radius: 0.0,
			..ChartConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::RadiusRange { .. })));

		let config = ChartConfig {
			year_margin: 470.0,
			..ChartConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::YearMargin(470.0)));
	}

	#[test]
	fn energy_must_cool() {
		let config = ChartConfig {
			alpha_decay: 1.0,
			..ChartConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::Energy { .. })));

		let config = ChartConfig {
			friction: 1.0,
			..ChartConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::Friction(1.0)));
	}
}
