use std::collections::BTreeMap;

use super::config::ChartConfig;
use super::types::{Node, Point};

/// Column centers for the split-by-year view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YearLayout {
	centers: BTreeMap<i32, Point>,
	title_x: BTreeMap<i32, f64>,
}

impl YearLayout {
	/// One column per year between the oldest and newest start date, spread
	/// evenly across the plot.
	pub fn plan(nodes: &[Node], config: &ChartConfig) -> Self {
		let (Some(min), Some(max)) = (
			nodes.iter().map(|n| n.year).min(),
			nodes.iter().map(|n| n.year).max(),
		) else {
			return Self::default();
		};

		let count = (i64::from(max) - i64::from(min) + 1) as f64;
		let step = (config.width - 2.0 * config.year_margin) / count;
		let y = config.height() / 2.0;
		let mut layout = Self::default();
		for (i, year) in (min..=max).enumerate() {
			let x = config.year_margin + step * i as f64;
			layout.centers.insert(year, Point::new(x, y));
			layout.title_x.insert(year, x);
		}
		layout
	}

	pub fn center(&self, year: i32) -> Option<Point> {
		self.centers.get(&year).copied()
	}

	pub fn len(&self) -> usize {
		self.centers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.centers.is_empty()
	}

	/// Years that get a text label. Every other year, to keep labels apart.
	pub fn label_years(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
		self.title_x.iter().step_by(2).map(|(&y, &x)| (y, x))
	}

	/// Years that get a separator line.
	pub fn line_years(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
		self.title_x.iter().map(|(&y, &x)| (y, x))
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::bubble_chart::types::{Category, Status};

	fn node(year: i32) -> Node {
		Node {
			id: year.to_string(),
			radius: 2.0,
			category: Category::new(1).unwrap(),
			status: Status::Temporary,
			literal_status: Status::Temporary,
			full_time: false,
			year,
			name: String::new(),
			magnitude: 0.0,
			started_at: String::new(),
			position: Point::default(),
			target: Point::default(),
			velocity: Point::default(),
		}
	}

	#[test]
	fn empty_nodes_give_empty_layout() {
		assert!(YearLayout::plan(&[], &ChartConfig::default()).is_empty());
	}

	#[test]
	fn columns_start_at_margin() {
		let config = ChartConfig::default();
		let layout = YearLayout::plan(&[node(2010), node(2008), node(2009)], &config);
		assert_eq!(layout.len(), 3);
		assert_eq!(layout.center(2008), Some(Point::new(20.0, 250.0)));
		assert_eq!(layout.center(2009).map(|p| p.x), Some(20.0 + 900.0 / 3.0));
		assert_eq!(layout.line_years().nth(2), Some((2010, 20.0 + 600.0)));
		assert_eq!(layout.center(2011), None);
	}

	#[test]
	fn labels_skip_odd_indices() {
		let layout = YearLayout::plan(&[node(2000), node(2004)], &ChartConfig::default());
		let labels: Vec<_> = layout.label_years().map(|(y, _)| y).collect();
		assert_eq!(labels, vec![2000, 2002, 2004]);
		assert_eq!(layout.line_years().count(), 5);
	}

	proptest! {
		#[test]
		fn one_evenly_spaced_column_per_year(min in 1950i32..2020, span in 0i32..40) {
			let config = ChartConfig::default();
			let layout = YearLayout::plan(&[node(min), node(min + span)], &config);
			prop_assert_eq!(layout.len(), (span + 1) as usize);
			let xs: Vec<f64> = layout.line_years().map(|(_, x)| x).collect();
			let step = (config.width - 2.0 * config.year_margin) / (span + 1) as f64;
			for pair in xs.windows(2) {
				prop_assert!((pair[1] - pair[0] - step).abs() < 1e-9);
			}
		}
	}
}
