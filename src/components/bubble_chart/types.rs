use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One row of the staff dataset, as it comes out of the CSV reader.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawRecord {
	#[serde(rename = "CI")]
	pub id: String,
	#[serde(rename = "HORAS")]
	pub hours: String,
	#[serde(rename = "DOCENTE")]
	pub name: String,
	#[serde(rename = "CARGO")]
	pub status: String,
	#[serde(rename = "GRADO")]
	pub category: String,
	#[serde(rename = "INGRESO")]
	pub started_at: String,
	#[serde(rename = "DT")]
	pub full_time: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
	/// Interim appointment ("interino").
	Temporary,
	/// Tenured appointment ("efectivo").
	Permanent,
	/// Full-time dedication ("dt"). Only set through the override flag.
	FullTime,
}

impl Status {
	pub const ALL: [Status; 3] = [Status::Temporary, Status::Permanent, Status::FullTime];

	/// Parses the literal status label of a record.
	pub fn parse_label(label: &str) -> Option<Self> {
		let label = label.trim();
		if label.eq_ignore_ascii_case("interino") {
			Some(Status::Temporary)
		} else if label.eq_ignore_ascii_case("efectivo") {
			Some(Status::Permanent)
		} else {
			None
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Status::Temporary => "interino",
			Status::Permanent => "efectivo",
			Status::FullTime => "dt",
		}
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Ordinal grade, always in `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(u8);

impl Category {
	pub const COUNT: usize = 5;

	pub fn new(value: u8) -> Option<Self> {
		(1..=Self::COUNT as u8).contains(&value).then_some(Self(value))
	}

	pub fn value(self) -> u8 {
		self.0
	}

	/// Zero-based bucket index.
	pub fn index(self) -> usize {
		(self.0 - 1) as usize
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub radius: f64,
	pub category: Category,
	/// Effective status, with the full-time override applied.
	pub status: Status,
	pub literal_status: Status,
	pub full_time: bool,
	pub year: i32,
	pub name: String,
	pub magnitude: f64,
	pub started_at: String,
	pub position: Point,
	pub target: Point,
	/// Motion carried over from earlier placement nudges.
	pub velocity: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
	#[default]
	Grouped,
	SplitByYear,
}

impl DisplayMode {
	/// Toolbar key of the mode.
	pub fn key(self) -> &'static str {
		match self {
			DisplayMode::Grouped => "all",
			DisplayMode::SplitByYear => "year",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown display mode `{0}`")]
pub struct UnknownMode(pub String);

impl FromStr for DisplayMode {
	type Err = UnknownMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all" => Ok(DisplayMode::Grouped),
			"year" => Ok(DisplayMode::SplitByYear),
			other => Err(UnknownMode(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_labels_match_whole_words_only() {
		assert_eq!(Status::parse_label("INTERINO"), Some(Status::Temporary));
		assert_eq!(Status::parse_label(" Efectivo "), Some(Status::Permanent));
		assert_eq!(Status::parse_label("e"), None);
		assert_eq!(Status::parse_label("efectivos"), None);
		assert_eq!(Status::parse_label("dt"), None);
	}

	#[test]
	fn category_is_bounded() {
		assert!(Category::new(0).is_none());
		assert!(Category::new(6).is_none());
		assert_eq!(Category::new(1).map(Category::index), Some(0));
		assert_eq!(Category::new(5).map(Category::index), Some(4));
	}

	#[test]
	fn mode_keys_round_trip() {
		for mode in [DisplayMode::Grouped, DisplayMode::SplitByYear] {
			assert_eq!(mode.key().parse::<DisplayMode>(), Ok(mode));
		}
		assert!("grid".parse::<DisplayMode>().is_err());
	}
}
