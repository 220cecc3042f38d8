use mention_types::{PersonEntry, PlaceCount, Report};

use crate::types::PersonRecord;

/// Turn aggregated records into the final report.
///
/// Records are expected in mention-count order already. Places are sorted
/// by count descending; equal counts keep first-seen order.
pub fn format_report(records: &[PersonRecord]) -> Report {
    records
        .iter()
        .map(|r| {
            let mut places: Vec<PlaceCount> = r
                .associated_places
                .iter()
                .map(|(name, count)| PlaceCount {
                    name: name.to_string(),
                    count,
                })
                .collect();
            places.sort_by(|a, b| b.count.cmp(&a.count));

            PersonEntry {
                name: r.name.clone(),
                count: r.count,
                associated_places: places,
            }
        })
        .collect()
}
