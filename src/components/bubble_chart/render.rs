use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::CategoryColors;
use super::state::BubbleChartState;
use super::types::{Category, Status};

const LEGEND_CIRCLE_RADIUS: f64 = 10.0;
const LEGEND_SHIFT_Y: f64 = 15.0;
const TOOLTIP_WIDTH: f64 = 240.0;

fn ease_cubic_in_out(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

pub fn render(state: &BubbleChartState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (
		state.config.width * state.scale,
		state.config.full_height * state.scale,
	);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, w, h);
	ctx.save();
	let _ = ctx.scale(state.scale, state.scale);
	if state.show_years() {
		draw_years(state, ctx);
	}
	draw_bubbles(state, ctx);
	draw_legend(state, ctx);
	draw_tooltip(state, ctx);
	ctx.restore();
}

fn draw_years(state: &BubbleChartState, ctx: &CanvasRenderingContext2d) {
	let bottom = state.config.height() - 10.0;
	ctx.set_global_alpha(0.4);
	ctx.set_stroke_style_str("black");
	ctx.set_line_width(1.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(3.0),
		&JsValue::from_f64(3.0),
	));
	for (_, x) in state.layout.line_years() {
		ctx.begin_path();
		ctx.move_to(x, 50.0);
		ctx.line_to(x, bottom);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str("black");
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("alphabetic");
	for (year, x) in state.layout.label_years() {
		let _ = ctx.fill_text(&year.to_string(), x, 40.0);
	}
}

fn draw_bubbles(state: &BubbleChartState, ctx: &CanvasRenderingContext2d) {
	let colors = CategoryColors::new(&state.config.palette);
	let grow = ease_cubic_in_out(state.grow_t());
	ctx.set_line_width(2.0);

	for (i, node) in state.nodes.iter().enumerate() {
		let radius = node.radius * grow;
		if radius <= 0.0 {
			continue;
		}
		ctx.begin_path();
		let _ = ctx.arc(node.position.x, node.position.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(colors.fill(node.category));
		ctx.fill();

		let stroke = if state.hovered == Some(i) {
			"cyan".to_string()
		} else if node.full_time {
			"black".to_string()
		} else {
			colors.stroke(node.category)
		};
		ctx.set_stroke_style_str(&stroke);
		ctx.stroke();
	}
}

fn draw_legend(state: &BubbleChartState, ctx: &CanvasRenderingContext2d) {
	let colors = CategoryColors::new(&state.config.palette);
	let row_step = LEGEND_CIRCLE_RADIUS * 2.0 + 4.0;
	let column_x = |i: usize| 100.0 + i as f64 * (LEGEND_CIRCLE_RADIUS + 40.0);

	ctx.save();
	let _ = ctx.translate(state.config.margin_left, state.config.height());

	ctx.set_font("16px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("alphabetic");
	for category in (1..=Category::COUNT as u8).filter_map(Category::new) {
		ctx.set_fill_style_str(colors.fill(category));
		let _ = ctx.fill_text(
			&format!("G{}", category.value()),
			column_x(category.index()),
			LEGEND_SHIFT_Y,
		);
	}

	ctx.set_line_width(2.0);
	for (row, status) in Status::ALL.into_iter().enumerate() {
		let y = LEGEND_SHIFT_Y + 15.0 + row as f64 * row_step;

		ctx.set_fill_style_str("black");
		ctx.set_font("16px sans-serif");
		ctx.set_text_align("end");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(status.label(), 70.0, y);

		for category in (1..=Category::COUNT as u8).filter_map(Category::new) {
			let x = column_x(category.index());
			ctx.begin_path();
			let _ = ctx.arc(x, y, LEGEND_CIRCLE_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(colors.fill(category));
			ctx.fill();
			ctx.set_stroke_style_str(&colors.stroke(category));
			ctx.stroke();

			ctx.set_fill_style_str("black");
			ctx.set_font("11px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(&state.counts.get(status, category).to_string(), x, y);
		}
	}
	ctx.restore();
}

fn draw_tooltip(state: &BubbleChartState, ctx: &CanvasRenderingContext2d) {
	let Some(node) = state.hovered_node() else {
		return;
	};
	let lines = [
		format!("Nombre: {}", node.name),
		format!("Tipo de cargo: {}", node.literal_status.label().to_uppercase()),
		format!("Horas: {}", node.magnitude),
		format!("Fecha de ingreso: {}", node.started_at),
	];
	let line_height = 16.0;
	let box_h = line_height * lines.len() as f64 + 12.0;
	// Keep the box inside the chart, flipping to the left near the edge.
	let mut x = node.position.x + node.radius + 10.0;
	if x + TOOLTIP_WIDTH > state.config.width {
		x = node.position.x - node.radius - 10.0 - TOOLTIP_WIDTH;
	}
	let y = (node.position.y - box_h / 2.0).clamp(0.0, (state.config.full_height - box_h).max(0.0));

	ctx.set_global_alpha(0.9);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(x, y, TOOLTIP_WIDTH, box_h);
	ctx.set_global_alpha(1.0);
	ctx.set_stroke_style_str("#d3d3d3");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, TOOLTIP_WIDTH, box_h);

	ctx.set_fill_style_str("#333333");
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("start");
	ctx.set_text_baseline("top");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x + 8.0, y + 6.0 + i as f64 * line_height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easing_is_anchored() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
	}
}
