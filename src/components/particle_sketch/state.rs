use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::noise::twinkle;
use crate::components::bubble_chart::Point;

/// Oldest stars are dropped past this many.
pub const MAX_STARS: usize = 2000;
/// Fraction of the remaining distance a star covers each frame.
pub const EASE: f64 = 0.04;
/// Random samples per star before settling for a light pixel.
const PIXEL_TRIES: usize = 15;
const DIAMETER: std::ops::Range<f64> = 5.0..10.0;

/// RGBA pixels of the hint image the stars are drawn toward.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
	width: u32,
	height: u32,
	rgba: Vec<u8>,
}

impl Bitmap {
	/// `None` unless `rgba` holds exactly `width * height` pixels.
	pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
		let len = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
		(width > 0 && height > 0 && rgba.len() == len).then_some(Self { width, height, rgba })
	}

	/// Brightest channel of a pixel, `0..=255`.
	pub fn brightness(&self, x: u32, y: u32) -> u8 {
		let i = (y as usize * self.width as usize + x as usize) * 4;
		self.rgba.get(i..i + 3).and_then(|px| px.iter().copied().max()).unwrap_or(255)
	}

	/// Anything short of full white counts as ink.
	pub fn is_ink(&self, x: u32, y: u32) -> bool {
		self.brightness(x, y) < 255
	}

	/// Samples random pixels until one is ink. Gives up after a few tries and
	/// keeps the last sample, so blank images still scatter stars.
	pub fn find_pixel<R: Rng>(&self, rng: &mut R) -> Point {
		let mut pick = (0, 0);
		for _ in 0..PIXEL_TRIES {
			pick = (rng.gen_range(0..self.width), rng.gen_range(0..self.height));
			if self.is_ink(pick.0, pick.1) {
				break;
			}
		}
		Point::new(pick.0 as f64, pick.1 as f64)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub position: Point,
	pub target: Point,
	pub diameter: f64,
}

impl Star {
	pub fn update(&mut self) {
		self.position.x += (self.target.x - self.position.x) * EASE;
		self.position.y += (self.target.y - self.position.y) * EASE;
	}
}

/// Stars spawned at the pointer that drift onto the dark pixels of a
/// hint image.
pub struct SketchState {
	pub width: f64,
	pub height: f64,
	pub stars: VecDeque<Star>,
	bitmap: Bitmap,
	pointer: Option<Point>,
	millis: f64,
	seed: u64,
	rng: SmallRng,
}

impl SketchState {
	pub fn new(bitmap: Bitmap, width: f64, seed: u64) -> Self {
		info!("particle sketch on a {}x{} hint", bitmap.width, bitmap.height);
		let mut state = Self {
			width: 0.0,
			height: 0.0,
			stars: VecDeque::with_capacity(MAX_STARS),
			bitmap,
			pointer: None,
			millis: 0.0,
			seed,
			rng: SmallRng::seed_from_u64(seed),
		};
		state.resize(width);
		state
	}

	/// Refits the canvas to `width`, keeping the hint's aspect ratio. Clears
	/// every star.
	pub fn resize(&mut self, width: f64) {
		self.width = width.max(1.0);
		self.height = self.width * self.bitmap.height as f64 / self.bitmap.width as f64;
		self.stars.clear();
		debug!("sketch canvas {:.0}x{:.0}", self.width, self.height);
	}

	pub fn set_pointer(&mut self, pointer: Option<Point>) {
		self.pointer = pointer;
	}

	/// Pointer strictly inside the canvas.
	pub fn pointer_inside(&self) -> Option<Point> {
		self.pointer
			.filter(|p| p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height)
	}

	/// Spawns a star at `at`, bound for a random ink pixel of the hint.
	pub fn add_star(&mut self, at: Point) {
		let pixel = self.bitmap.find_pixel(&mut self.rng);
		let target = Point::new(
			pixel.x * self.width / self.bitmap.width as f64,
			pixel.y * self.height / self.bitmap.height as f64,
		);
		let diameter = self.rng.gen_range(DIAMETER);
		self.stars.push_back(Star {
			position: at,
			target,
			diameter,
		});
		if self.stars.len() > MAX_STARS {
			self.stars.pop_front();
		}
	}

	/// One frame: a new star while the pointer is over the canvas, then every
	/// star eases toward its target.
	pub fn tick(&mut self, dt_ms: f64) {
		self.millis += dt_ms;
		if let Some(at) = self.pointer_inside() {
			self.add_star(at);
		}
		for star in &mut self.stars {
			star.update();
		}
	}

	/// CSS fill for a star this frame. White while the pointer is in,
	/// otherwise a hue sweeping across the canvas over time. Alpha twinkles.
	pub fn star_color(&self, star: &Star) -> String {
		let alpha = twinkle(star.target.x, star.target.y, self.millis / 1000.0, self.seed);
		if self.pointer_inside().is_some() {
			return format!("rgba(255, 255, 255, {alpha:.3})");
		}
		let hue = (self.millis / 10.0 - star.position.x / 10.0).rem_euclid(self.width);
		format!("hsla({:.1}, 100%, 50%, {alpha:.3})", hue / self.width * 360.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Hint with a single dark pixel at (3, 1) on white.
	fn hint() -> Bitmap {
		let (w, h) = (8, 4);
		let mut rgba = vec![255; w * h * 4];
		let i = (w + 3) * 4;
		rgba[i..i + 3].copy_from_slice(&[0, 0, 0]);
		Bitmap::from_rgba(w as u32, h as u32, rgba).unwrap()
	}

	fn sketch() -> SketchState {
		SketchState::new(hint(), 400.0, 7)
	}

	#[test]
	fn bitmap_checks_its_size() {
		assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_none());
		assert!(Bitmap::from_rgba(0, 2, vec![]).is_none());
		let bitmap = hint();
		assert!(bitmap.is_ink(3, 1));
		assert!(!bitmap.is_ink(0, 0));
	}

	#[test]
	fn canvas_keeps_hint_aspect() {
		let sketch = sketch();
		assert_eq!(sketch.height, 200.0);
	}

	#[test]
	fn stars_ease_four_percent_per_frame() {
		let mut star = Star {
			position: Point::new(0.0, 100.0),
			target: Point::new(100.0, 0.0),
			diameter: 6.0,
		};
		star.update();
		assert!((star.position.x - 4.0).abs() < 1e-12);
		assert!((star.position.y - 96.0).abs() < 1e-12);
		for _ in 0..500 {
			star.update();
		}
		assert!(star.position.distance(star.target) < 1e-6);
	}

	#[test]
	fn find_pixel_prefers_ink() {
		let mut rng = SmallRng::seed_from_u64(1);
		let all_ink = Bitmap::from_rgba(5, 5, vec![0; 100]).unwrap();
		for _ in 0..50 {
			let p = all_ink.find_pixel(&mut rng);
			assert!(p.x < 5.0 && p.y < 5.0);
		}
		let blank = Bitmap::from_rgba(5, 5, vec![255; 100]).unwrap();
		let p = blank.find_pixel(&mut rng);
		assert!((0.0..5.0).contains(&p.x) && (0.0..5.0).contains(&p.y));
	}

	#[test]
	fn targets_are_scaled_to_the_canvas() {
		let mut sketch = sketch();
		for _ in 0..100 {
			sketch.add_star(Point::new(10.0, 10.0));
		}
		for star in &sketch.stars {
			assert!((0.0..400.0).contains(&star.target.x));
			assert!((0.0..200.0).contains(&star.target.y));
			assert_eq!(star.target.x % 50.0, 0.0);
			assert!(DIAMETER.contains(&star.diameter));
		}
		// 15 samples over 32 pixels land on the single ink pixel about 38% of the time.
		let on_ink = sketch.stars.iter().filter(|s| s.target == Point::new(150.0, 50.0)).count();
		assert!(on_ink > 20);
	}

	#[test]
	fn buffer_drops_oldest_past_capacity() {
		let mut sketch = sketch();
		for i in 0..MAX_STARS + 25 {
			sketch.add_star(Point::new(i as f64, 0.0));
		}
		assert_eq!(sketch.stars.len(), MAX_STARS);
		assert_eq!(sketch.stars.front().unwrap().position.x, 25.0);
		assert_eq!(sketch.stars.back().unwrap().position.x, (MAX_STARS + 24) as f64);
	}

	#[test]
	fn stars_only_spawn_under_the_pointer() {
		let mut sketch = sketch();
		sketch.tick(16.0);
		assert!(sketch.stars.is_empty());

		sketch.set_pointer(Some(Point::new(0.0, 50.0)));
		sketch.tick(16.0);
		assert!(sketch.stars.is_empty(), "edges are outside");

		sketch.set_pointer(Some(Point::new(120.0, 50.0)));
		sketch.tick(16.0);
		sketch.tick(16.0);
		assert_eq!(sketch.stars.len(), 2);
		let first = &sketch.stars[0];
		let expected = Point::new(
			120.0 + (first.target.x - 120.0) * (1.0 - (1.0 - EASE).powi(2)),
			50.0 + (first.target.y - 50.0) * (1.0 - (1.0 - EASE).powi(2)),
		);
		assert!(first.position.distance(expected) < 1e-9);

		sketch.set_pointer(None);
		sketch.tick(16.0);
		assert_eq!(sketch.stars.len(), 2);
	}

	#[test]
	fn resize_clears_stars() {
		let mut sketch = sketch();
		sketch.add_star(Point::new(5.0, 5.0));
		sketch.resize(800.0);
		assert!(sketch.stars.is_empty());
		assert_eq!(sketch.height, 400.0);
	}

	#[test]
	fn colors_follow_the_pointer() {
		let mut sketch = sketch();
		sketch.add_star(Point::new(5.0, 5.0));
		let star = sketch.stars[0].clone();
		assert!(sketch.star_color(&star).starts_with("hsla("));
		sketch.set_pointer(Some(Point::new(100.0, 100.0)));
		assert!(sketch.star_color(&star).starts_with("rgba(255, 255, 255,"));
	}
}
