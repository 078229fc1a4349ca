//! Raw CSV rows to chart nodes.

use std::collections::HashSet;

use rand::Rng;

use super::config::ChartConfig;
use super::scale::SqrtScale;
use super::types::{Category, Node, Point, RawRecord, Status};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RecordError {
	#[error("row {row}: malformed start date `{value}`")]
	MalformedDate { row: usize, value: String },
	#[error("row {row}: invalid hours `{value}`")]
	InvalidMagnitude { row: usize, value: String },
	#[error("row {row}: category `{value}` is not in 1..=5")]
	InvalidCategory { row: usize, value: String },
	#[error("row {row}: unknown status `{value}`")]
	UnknownStatus { row: usize, value: String },
	#[error("row {row}: full-time flag must be 0 or 1, got `{value}`")]
	InvalidFlag { row: usize, value: String },
	#[error("row {row}: duplicate id `{value}`")]
	DuplicateId { row: usize, value: String },
}

/// Start years outside this range are treated as malformed dates.
pub const YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Year of a `dd/mm/yyyy` date.
pub fn parse_year(date: &str) -> Option<i32> {
	let year = date.trim().split('/').nth(2)?.trim().parse().ok()?;
	YEARS.contains(&year).then_some(year)
}

fn parse_magnitude(row: usize, value: &str) -> Result<f64, RecordError> {
	value
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite() && *v >= 0.0)
		.ok_or_else(|| RecordError::InvalidMagnitude {
			row,
			value: value.to_string(),
		})
}

fn parse_flag(row: usize, value: &str) -> Result<bool, RecordError> {
	match value.trim() {
		"1" => Ok(true),
		"0" => Ok(false),
		_ => Err(RecordError::InvalidFlag {
			row,
			value: value.to_string(),
		}),
	}
}

/// Builds the node set for a dataset.
///
/// Radii come from a square-root scale over `[0, max hours]`, positions are
/// scattered randomly over the plotting area and the result is ordered by
/// descending hours so big bubbles are drawn first.
pub fn normalize_records<R: Rng>(
	records: &[RawRecord],
	config: &ChartConfig,
	rng: &mut R,
) -> Result<Vec<Node>, RecordError> {
	let magnitudes = records
		.iter()
		.enumerate()
		.map(|(row, r)| parse_magnitude(row, &r.hours))
		.collect::<Result<Vec<_>, _>>()?;
	let max = magnitudes.iter().copied().fold(0.0, f64::max);
	let scale = SqrtScale::new((0.0, max), (config.min_radius, config.max_radius));

	let mut seen = HashSet::new();
	let mut nodes = Vec::with_capacity(records.len());
	for (row, (record, magnitude)) in records.iter().zip(magnitudes).enumerate() {
		if !seen.insert(record.id.as_str()) {
			return Err(RecordError::DuplicateId {
				row,
				value: record.id.clone(),
			});
		}
		let year = parse_year(&record.started_at).ok_or_else(|| RecordError::MalformedDate {
			row,
			value: record.started_at.clone(),
		})?;
		let category = record
			.category
			.trim()
			.parse::<u8>()
			.ok()
			.and_then(Category::new)
			.ok_or_else(|| RecordError::InvalidCategory {
				row,
				value: record.category.clone(),
			})?;
		let literal_status =
			Status::parse_label(&record.status).ok_or_else(|| RecordError::UnknownStatus {
				row,
				value: record.status.clone(),
			})?;
		let full_time = parse_flag(row, &record.full_time)?;

		let position = Point::new(
			rng.r#gen::<f64>() * config.width.max(0.0),
			rng.r#gen::<f64>() * config.height().max(0.0),
		);
		nodes.push(Node {
			id: record.id.clone(),
			radius: scale.apply(magnitude),
			category,
			status: if full_time { Status::FullTime } else { literal_status },
			literal_status,
			full_time,
			year,
			name: record.name.clone(),
			magnitude,
			started_at: record.started_at.clone(),
			position,
			target: position,
			velocity: Point::default(),
		});
	}

	nodes.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
	Ok(nodes)
}
