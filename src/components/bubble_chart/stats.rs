use super::types::{Category, Node, Status};

/// Head count per status and category, shown in the legend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
	pub temporary: [u32; Category::COUNT],
	pub permanent: [u32; Category::COUNT],
	pub full_time: [u32; Category::COUNT],
}

impl StatusCounts {
	pub fn from_nodes(nodes: &[Node]) -> Self {
		let mut counts = Self::default();
		for node in nodes {
			counts.bucket_mut(node.status)[node.category.index()] += 1;
		}
		counts
	}

	pub fn bucket(&self, status: Status) -> &[u32; Category::COUNT] {
		match status {
			Status::Temporary => &self.temporary,
			Status::Permanent => &self.permanent,
			Status::FullTime => &self.full_time,
		}
	}

	fn bucket_mut(&mut self, status: Status) -> &mut [u32; Category::COUNT] {
		match status {
			Status::Temporary => &mut self.temporary,
			Status::Permanent => &mut self.permanent,
			Status::FullTime => &mut self.full_time,
		}
	}

	pub fn get(&self, status: Status, category: Category) -> u32 {
		self.bucket(status)[category.index()]
	}

	/// Number of people counted.
	pub fn total(&self) -> u32 {
		Status::ALL
			.iter()
			.map(|&s| self.bucket(s).iter().sum::<u32>())
			.sum()
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::bubble_chart::config::ChartConfig;
	use crate::components::bubble_chart::normalize::normalize_records;
	use crate::components::bubble_chart::normalize::tests::record;

	fn counts(records: &[crate::components::bubble_chart::types::RawRecord]) -> StatusCounts {
		let nodes =
			normalize_records(records, &ChartConfig::default(), &mut SmallRng::seed_from_u64(1))
				.unwrap();
		StatusCounts::from_nodes(&nodes)
	}

	#[test]
	fn override_is_exclusive() {
		let counts = counts(&[
			record("1", 5.0, "INTERINO", 1, "1/1/2000", false),
			record("2", 5.0, "INTERINO", 1, "1/1/2000", false),
			record("3", 5.0, "EFECTIVO", 2, "1/1/2000", true),
		]);
		assert_eq!(counts.temporary, [2, 0, 0, 0, 0]);
		assert_eq!(counts.permanent, [0; 5]);
		assert_eq!(counts.full_time, [0, 1, 0, 0, 0]);
		assert_eq!(counts.total(), 3);
	}

	proptest! {
		#[test]
		fn total_matches_node_count(rows in prop::collection::vec((1u8..=5, any::<bool>(), any::<bool>()), 0..80)) {
			let records: Vec<_> = rows
				.iter()
				.enumerate()
				.map(|(i, (cat, permanent, dt))| {
					let status = if *permanent { "EFECTIVO" } else { "INTERINO" };
					record(&i.to_string(), 1.0, status, *cat, "1/1/2000", *dt)
				})
				.collect();
			let counts = counts(&records);
			prop_assert_eq!(counts.total() as usize, records.len());
			let dt = rows.iter().filter(|r| r.2).count() as u32;
			prop_assert_eq!(counts.full_time.iter().sum::<u32>(), dt);
		}
	}
}
