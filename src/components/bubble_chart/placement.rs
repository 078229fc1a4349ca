//! Per-frame target nudges applied on top of the physics simulation.

use super::config::ChartConfig;
use super::layout::YearLayout;
use super::types::{DisplayMode, Node, Point};

/// Decaying simulation energy ("alpha").
#[derive(Clone, Debug, PartialEq)]
pub struct Energy {
	alpha: f64,
	start: f64,
	decay: f64,
	min: f64,
}

impl Energy {
	pub fn new(config: &ChartConfig) -> Self {
		Self {
			alpha: 0.0,
			start: config.alpha_start,
			decay: config.alpha_decay,
			min: config.alpha_min,
		}
	}

	pub fn is_hot(&self) -> bool {
		self.alpha > 0.0
	}

	pub fn restart(&mut self) {
		self.alpha = self.start;
	}

	/// Cools one frame. Returns the alpha to use for this frame, or `None`
	/// once the simulation has settled.
	pub fn step(&mut self) -> Option<f64> {
		if !self.is_hot() {
			return None;
		}
		self.alpha *= self.decay;
		if self.alpha < self.min {
			self.alpha = 0.0;
			return None;
		}
		Some(self.alpha)
	}
}

/// Target-seeking step for grouped and split-by-year modes.
#[derive(Clone, Debug)]
pub struct Placement {
	center: Point,
	damper: f64,
	split_boost: f64,
	friction: f64,
}

impl Placement {
	pub fn new(config: &ChartConfig) -> Self {
		Self {
			center: config.center(),
			damper: config.damper,
			split_boost: config.split_boost,
			friction: config.friction,
		}
	}

	/// Moves one node toward its target for this frame. Nodes are
	/// independent of each other, so update order does not matter.
	pub fn nudge(&self, mode: DisplayMode, layout: &YearLayout, node: &mut Node, alpha: f64) {
		let k = self.damper * alpha;
		let year_center = match mode {
			DisplayMode::Grouped => None,
			DisplayMode::SplitByYear => layout.center(node.year),
		};
		match year_center {
			Some(target) => {
				// Columns stay crisp: x snaps, only y eases.
				node.target = target;
				node.position.x = target.x;
				node.position.y += (target.y - node.position.y) * k * self.split_boost;
			}
			None => {
				node.target = self.center;
				node.position.x += (self.center.x - node.position.x) * k;
				node.position.y += (self.center.y - node.position.y) * k;
			}
		}
	}

	/// Applies the carried motion, nudges, and keeps the nudge as momentum
	/// for the following frames. Snapped columns carry no horizontal motion.
	pub fn advance(&self, mode: DisplayMode, layout: &YearLayout, node: &mut Node, alpha: f64) {
		node.position.x += node.velocity.x;
		node.position.y += node.velocity.y;
		let before = node.position;
		self.nudge(mode, layout, node, alpha);
		node.velocity = Point::new(
			(node.velocity.x + node.position.x - before.x) * self.friction,
			(node.velocity.y + node.position.y - before.y) * self.friction,
		);
		if mode == DisplayMode::SplitByYear && layout.center(node.year).is_some() {
			node.velocity.x = 0.0;
		}
	}
}
