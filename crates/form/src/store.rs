/// One committed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
	pub name: String,
	pub location: String,
}

/// Append-only list of committed records, in commit order.
///
/// Duplicates are allowed; a record has no identity beyond its position.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
	records: Vec<Record>,
}

impl RecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn append(&mut self, record: Record) {
		self.records.push(record);
	}

	/// Removes every record.
	pub fn clear(&mut self) {
		self.records.clear();
	}

	pub fn list(&self) -> &[Record] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}
