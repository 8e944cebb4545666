use crate::shared::types::ConversionRecord;

/// Maximum number of conversions kept in history
pub const MAX_HISTORY_SIZE: usize = 50;

/// Newest-first, bounded list of conversions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    records: Vec<ConversionRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records already in newest-first order, keeping at most
    /// [`MAX_HISTORY_SIZE`] of them
    pub fn from_records(mut records: Vec<ConversionRecord>) -> Self {
        records.truncate(MAX_HISTORY_SIZE);
        Self { records }
    }

    /// Insert at the head, evicting the oldest entry on overflow
    pub fn append(&mut self, record: ConversionRecord) {
        self.records.insert(0, record);
        self.records.truncate(MAX_HISTORY_SIZE);
    }

    /// Empty the log. Returns `false` when it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        self.records.clear();
        true
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&ConversionRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::types::Category;

    pub(crate) fn record(id: u64) -> ConversionRecord {
        ConversionRecord {
            id,
            category: Category::Length,
            from_value: id as f64,
            from_unit: "meter".to_string(),
            to_value: id as f64 * 100.0,
            to_unit: "centimeter".to_string(),
            from_unit_name: "Meter".to_string(),
            to_unit_name: "Centimeter".to_string(),
            timestamp: "2024-01-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn append_puts_newest_first() {
        let mut log = HistoryLog::new();
        log.append(record(1));
        log.append(record(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].id, 2);
        assert_eq!(log.latest().map(|r| r.id), Some(2));
    }

    #[test]
    fn sixty_appends_keep_fifty_most_recent() {
        let mut log = HistoryLog::new();
        for id in 1..=60 {
            log.append(record(id));
        }

        assert_eq!(log.len(), MAX_HISTORY_SIZE);
        let ids: Vec<u64> = log.records().iter().map(|r| r.id).collect();
        let expected: Vec<u64> = (11..=60).rev().collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let mut log = HistoryLog::new();
        assert!(!log.clear());

        log.append(record(1));
        assert!(log.clear());
        assert!(log.is_empty());
    }

    #[test]
    fn from_records_truncates() {
        let records = (0..70).rev().map(record).collect();
        let log = HistoryLog::from_records(records);
        assert_eq!(log.len(), MAX_HISTORY_SIZE);
        assert_eq!(log.records()[0].id, 69);
    }
}
