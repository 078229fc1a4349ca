//! Smooth gradient noise for the star twinkle.

fn hash_2d(x: i32, y: i32, seed: u64) -> u64 {
	let mut h = seed;
	h = h.wrapping_add(x as u64).wrapping_mul(6364136223846793005);
	h = h.wrapping_add(y as u64).wrapping_mul(6364136223846793005);
	h ^= h >> 33;
	h = h.wrapping_mul(0xff51afd7ed558ccd);
	h ^= h >> 33;
	h
}

fn grad_dot(hash: u64, fx: f64, fy: f64) -> f64 {
	match hash & 3 {
		0 => fx + fy,
		1 => -fx + fy,
		2 => fx - fy,
		_ => -fx - fy,
	}
}

fn perlin_2d(x: f64, y: f64, seed: u64) -> f64 {
	let (x0, y0) = (x.floor(), y.floor());
	let (fx, fy) = (x - x0, y - y0);
	let (x0, y0) = (x0 as i32, y0 as i32);

	// Smoothstep
	let u = fx * fx * (3.0 - 2.0 * fx);
	let v = fy * fy * (3.0 - 2.0 * fy);

	let n00 = grad_dot(hash_2d(x0, y0, seed), fx, fy);
	let n10 = grad_dot(hash_2d(x0 + 1, y0, seed), fx - 1.0, fy);
	let n01 = grad_dot(hash_2d(x0, y0 + 1, seed), fx, fy - 1.0);
	let n11 = grad_dot(hash_2d(x0 + 1, y0 + 1, seed), fx - 1.0, fy - 1.0);

	let nx0 = n00 + u * (n10 - n00);
	let nx1 = n01 + u * (n11 - n01);
	nx0 + v * (nx1 - nx0)
}

/// Four octaves of noise at a point drifting with `t` seconds, in `[0, 1]`.
pub fn twinkle(x: f64, y: f64, t: f64, seed: u64) -> f64 {
	const FREQ: f64 = 0.02;
	let (mut total, mut amplitude, mut frequency, mut max_amp) = (0.0, 1.0, 1.0, 0.0);
	for i in 0..4u64 {
		let (px, py) = ((x * FREQ + t) * frequency, (y * FREQ - t * 0.5) * frequency);
		total += perlin_2d(px, py, seed.wrapping_add(i * 1000)) * amplitude;
		max_amp += amplitude;
		amplitude *= 0.5;
		frequency *= 2.0;
	}
	(0.5 + total / max_amp * 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn lattice_points_are_zero() {
		assert_eq!(perlin_2d(3.0, -7.0, 9), 0.0);
	}

	#[test]
	fn nearby_samples_are_close() {
		let a = twinkle(100.0, 40.0, 1.0, 5);
		let b = twinkle(100.5, 40.0, 1.0, 5);
		assert!((a - b).abs() < 0.1);
	}

	proptest! {
		#[test]
		fn twinkle_is_a_valid_alpha(
			x in -5000.0f64..5000.0,
			y in -5000.0f64..5000.0,
			t in 0.0f64..10_000.0,
		) {
			let a = twinkle(x, y, t, 1);
			prop_assert!((0.0..=1.0).contains(&a));
			prop_assert_eq!(a, twinkle(x, y, t, 1));
		}
	}
}
