//! Record assembly.

use crate::models::tariff::TariffRecord;

use super::fields::ExtractedFields;
use super::tracker::AssignedIds;

/// Collects finished records in input order.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    records: Vec<TariffRecord>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine identifiers and fields into a record and append it.
    pub fn push(&mut self, ids: AssignedIds, fields: ExtractedFields) -> &TariffRecord {
        let record = TariffRecord {
            hierarchical_id: ids.hierarchical_id,
            report_sequence: ids.report_sequence,
            service_name: fields.service_name,
            currency: fields.currency,
            min_amount: fields.min_amount,
            max_amount: fields.max_amount,
            min_rate: fields.min_rate,
            max_rate: fields.max_rate,
            notes: fields.notes,
            updated_at: fields.updated_at,
        };
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> Vec<TariffRecord> {
        self.records
    }
}
