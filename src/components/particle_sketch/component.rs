use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent};

use super::render;
use super::state::{Bitmap, SketchState};
use crate::components::bubble_chart::Point;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type SharedState = Rc<RefCell<Option<SketchState>>>;

/// Size of the text hint used when no image is given.
const TEXT_HINT: (u32, u32) = (400, 160);

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn parent_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(TEXT_HINT.0 as f64)
}

/// Draws onto a white offscreen canvas and reads the pixels back.
fn rasterize(width: u32, height: u32, draw: impl FnOnce(&CanvasRenderingContext2d)) -> Option<Bitmap> {
	let canvas = web_sys::window()?
		.document()?
		.create_element("canvas")
		.ok()?
		.dyn_into::<HtmlCanvasElement>()
		.ok()?;
	canvas.set_width(width);
	canvas.set_height(height);
	let ctx = context_2d(&canvas)?;
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
	draw(&ctx);
	let pixels = match ctx.get_image_data(0.0, 0.0, width as f64, height as f64) {
		Ok(pixels) => pixels,
		Err(err) => {
			error!("cannot read hint pixels: {err:?}");
			return None;
		}
	};
	Bitmap::from_rgba(pixels.width(), pixels.height(), pixels.data().0)
}

fn text_hint(text: &str) -> Option<Bitmap> {
	let (w, h) = TEXT_HINT;
	rasterize(w, h, |ctx| {
		ctx.set_fill_style_str("#000000");
		ctx.set_font("bold 120px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(text, w as f64 / 2.0, h as f64 / 2.0);
	})
}

fn image_hint(image: &HtmlImageElement) -> Option<Bitmap> {
	let (w, h) = (image.natural_width(), image.natural_height());
	rasterize(w, h, |ctx| {
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w as f64, h as f64);
	})
}

/// Builds the sketch for a loaded hint and starts the frame loop once.
fn start(
	canvas: HtmlCanvasElement,
	bitmap: Bitmap,
	state: SharedState,
	animate: FrameCallback,
	resize_cb: FrameCallback,
) {
	let Some(ctx) = context_2d(&canvas) else {
		error!("canvas 2d context unavailable");
		return;
	};
	let Some(window) = web_sys::window() else {
		return;
	};
	let sketch = SketchState::new(bitmap, parent_width(&canvas), js_sys::Date::now() as u64);
	canvas.set_width(sketch.width as u32);
	canvas.set_height(sketch.height as u32);
	*state.borrow_mut() = Some(sketch);
	if animate.borrow().is_some() {
		return;
	}

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(parent_width(&canvas_resize));
			canvas_resize.set_width(s.width as u32);
			canvas_resize.set_height(s.height as u32);
		}
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}

	let (state_anim, animate_inner) = (state.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut s) = *state_anim.borrow_mut() {
			s.tick(16.0);
			render::render(s, &ctx);
		}
		if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Stars follow the pointer and settle onto the dark pixels of a hint
/// image, or of `text` when no image is given or it fails to load.
#[component]
pub fn ParticleSketchCanvas(
	#[prop(optional, into)] image_src: Option<String>,
	#[prop(into, default = "INCO".to_string())] text: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (state, animate, resize_cb) =
			(state_init.clone(), animate_init.clone(), resize_cb_init.clone());

		let from_text = {
			let (canvas, text) = (canvas.clone(), text.clone());
			let (state, animate, resize_cb) = (state.clone(), animate.clone(), resize_cb.clone());
			move || match text_hint(&text) {
				Some(bitmap) => start(canvas, bitmap, state, animate, resize_cb),
				None => error!("cannot draw the sketch hint"),
			}
		};
		let Some(src) = image_src.clone() else {
			from_text();
			return;
		};
		let Ok(image) = HtmlImageElement::new() else {
			from_text();
			return;
		};

		let loaded = image.clone();
		let on_load = Closure::once_into_js(move || match image_hint(&loaded) {
			Some(bitmap) => start(canvas, bitmap, state, animate, resize_cb),
			None => error!("cannot read the sketch hint image"),
		});
		let failed = src.clone();
		let on_error = Closure::once_into_js(move || {
			warn!("hint image {failed} failed to load, using text");
			from_text();
		});
		image.set_cross_origin(Some("anonymous"));
		image.set_onload(Some(on_load.unchecked_ref()));
		image.set_onerror(Some(on_error.unchecked_ref()));
		image.set_src(&src);
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let pointer = Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_pointer(Some(pointer));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_pointer(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-sketch-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; cursor: none;"
		/>
	}
}
