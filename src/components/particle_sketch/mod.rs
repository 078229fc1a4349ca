mod component;
mod noise;
mod render;
mod state;

pub use component::ParticleSketchCanvas;
