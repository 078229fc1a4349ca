mod component;
mod config;
mod layout;
mod normalize;
mod placement;
mod render;
pub mod scale;
mod state;
mod stats;
mod types;

pub use component::BubbleChartCanvas;
pub use types::{Point, RawRecord};
