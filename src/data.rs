//! Staff dataset loading.

use csv::{ReaderBuilder, Trim};
use log::{info, warn};

use crate::components::bubble_chart::RawRecord;

/// Sample dataset bundled with the app.
pub const STAFF_CSV: &str = include_str!("../data/staff.csv");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
	#[error("dataset is not valid CSV: {0}")]
	Csv(#[from] csv::Error),
}

/// Reads a comma separated staff table with a header row.
pub fn parse_dataset(text: &str) -> Result<Vec<RawRecord>, DatasetError> {
	let mut reader = ReaderBuilder::new()
		.has_headers(true)
		.trim(Trim::All)
		.from_reader(text.as_bytes());
	let records = reader
		.deserialize()
		.collect::<Result<Vec<RawRecord>, _>>()?;
	if records.is_empty() {
		warn!("dataset has a header but no rows, the chart will be empty");
	} else {
		info!("loaded {} staff records", records.len());
	}
	Ok(records)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_dataset_parses() {
		let records = parse_dataset(STAFF_CSV).unwrap();
		assert_eq!(records.len(), 26);
		assert_eq!(records[0].id, "1.234.567-8");
		assert_eq!(records[0].started_at, "01/03/1989");
		assert_eq!(records[0].full_time, "1");
	}

	#[test]
	fn fields_are_trimmed() {
		let text = "CI,HORAS,DOCENTE,CARGO,GRADO,INGRESO,DT\n 7 , 12 ,Eva, INTERINO ,2, 1/2/2003 ,0\n";
		let records = parse_dataset(text).unwrap();
		assert_eq!(records[0].hours, "12");
		assert_eq!(records[0].status, "INTERINO");
	}

	#[test]
	fn missing_column_is_an_error() {
		let text = "CI,HORAS\n1,2\n";
		assert!(matches!(parse_dataset(text), Err(DatasetError::Csv(_))));
	}

	#[test]
	fn header_only_gives_an_empty_chart() {
		let text = "CI,HORAS,DOCENTE,CARGO,GRADO,INGRESO,DT\n";
		let records = parse_dataset(text).unwrap();
		assert!(records.is_empty());
	}
}
