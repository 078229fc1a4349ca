use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::SketchState;

const BACKGROUND: &str = "rgb(13, 26, 10)";

pub fn render(state: &SketchState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	for star in &state.stars {
		ctx.begin_path();
		let _ = ctx.arc(star.position.x, star.position.y, star.diameter / 2.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&state.star_color(star));
		ctx.fill();
	}
}
