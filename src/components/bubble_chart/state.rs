use force_graph::{ForceGraph, NodeData, SimulationParameters};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::{ChartConfig, ConfigError};
use super::layout::YearLayout;
use super::normalize::{RecordError, normalize_records};
use super::placement::{Energy, Placement};
use super::stats::StatusCounts;
use super::types::{DisplayMode, Node, Point, RawRecord};

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
	#[error("invalid chart config: {0}")]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Record(#[from] RecordError),
}

/// One bubble chart instance: nodes, cached statistics and layout, the
/// physics simulation and the current display mode.
pub struct BubbleChartState {
	pub config: ChartConfig,
	pub nodes: Vec<Node>,
	pub counts: StatusCounts,
	pub layout: YearLayout,
	/// Canvas pixels per logical unit. The view is anchored at the origin.
	pub scale: f64,
	pub hovered: Option<usize>,
	pub elapsed: f64,
	mode: DisplayMode,
	energy: Energy,
	placement: Placement,
	graph: ForceGraph<usize, ()>,
}

impl BubbleChartState {
	pub fn new(records: &[RawRecord], config: ChartConfig, seed: u64) -> Result<Self, ChartError> {
		config.validate()?;
		let mut rng = SmallRng::seed_from_u64(seed);
		let nodes = normalize_records(records, &config, &mut rng)?;
		let counts = StatusCounts::from_nodes(&nodes);
		let layout = YearLayout::plan(&nodes, &config);
		debug!("status counts {:?}, {} people", counts, counts.total());
		if layout.is_empty() {
			warn!("no staff records, the chart will be empty");
		} else {
			debug!("{} year columns", layout.len());
		}

		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.charge as f32,
			force_spring: 0.0,
			force_max: config.charge_max as f32,
			node_speed: 7000.0,
			damping_factor: config.friction as f32,
		});
		for (i, node) in nodes.iter().enumerate() {
			graph.add_node(NodeData {
				x: node.position.x as f32,
				y: node.position.y as f32,
				mass: node.radius as f32,
				is_anchor: false,
				user_data: i,
			});
		}

		info!("bubble chart built with {} nodes", nodes.len());
		let mut state = Self {
			energy: Energy::new(&config),
			placement: Placement::new(&config),
			config,
			nodes,
			counts,
			layout,
			scale: 1.0,
			hovered: None,
			elapsed: 0.0,
			mode: DisplayMode::Grouped,
			graph,
		};
		state.set_mode(DisplayMode::Grouped);
		Ok(state)
	}

	pub fn mode(&self) -> DisplayMode {
		self.mode
	}

	/// Year labels and separator lines are only shown while split by year.
	pub fn show_years(&self) -> bool {
		self.mode == DisplayMode::SplitByYear
	}

	/// Switches the placement target and reheats the simulation so the
	/// change animates. Re-selecting the current mode replays it.
	pub fn set_mode(&mut self, mode: DisplayMode) {
		info!("display mode -> {}", mode.key());
		self.mode = mode;
		self.energy.restart();
	}

	/// Toolbar entry point: `"year"` splits, anything else groups.
	pub fn toggle_display(&mut self, name: &str) {
		let mode = name.parse().unwrap_or_else(|err| {
			debug!("{err}, grouping");
			DisplayMode::Grouped
		});
		self.set_mode(mode);
	}

	/// Advances one animation frame of `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.elapsed += dt;
		let Some(alpha) = self.energy.step() else {
			return;
		};

		let Self {
			graph,
			nodes,
			placement,
			layout,
			mode,
			config,
			..
		} = self;
		// Repulsion cools with the energy so the clusters can close up.
		graph.parameters.force_charge = (config.charge * alpha / config.alpha_start) as f32;
		graph.update(dt as f32);
		graph.visit_nodes_mut(|g| {
			let Some(node) = nodes.get_mut(g.data.user_data) else {
				return;
			};
			node.position.x = g.data.x as f64;
			node.position.y = g.data.y as f64;
			placement.advance(*mode, layout, node, alpha);
			g.data.x = node.position.x as f32;
			g.data.y = node.position.y as f32;
		});
	}

	/// Grow-in progress in `[0, 1]`.
	pub fn grow_t(&self) -> f64 {
		if self.config.grow_duration <= 0.0 {
			return 1.0;
		}
		(self.elapsed / self.config.grow_duration).clamp(0.0, 1.0)
	}

	pub fn screen_to_chart(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx / self.scale, sy / self.scale)
	}

	/// Topmost bubble under a screen point. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (x, y) = self.screen_to_chart(sx, sy);
		let point = Point::new(x, y);
		self.nodes.iter().rposition(|n| n.position.distance(point) <= n.radius)
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hovered = node;
	}

	pub fn hovered_node(&self) -> Option<&Node> {
		self.hovered.and_then(|i| self.nodes.get(i))
	}

	/// Fits the logical view into a canvas `width` pixels wide.
	pub fn resize(&mut self, width: f64) {
		self.scale = if width > 0.0 {
			width / self.config.width
		} else {
			1.0
		};
	}
}
