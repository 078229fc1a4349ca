pub mod bubble_chart;
pub mod particle_sketch;
