use crate::models::{
    CanonicalField, ColumnMatch, FieldStats, MetricsSnapshot, TabularInput, ValidationVerdict,
};
use tracing::info;

/// Computes descriptive statistics over the matched numeric columns.
/// Every step is a total function; a column whose cells never parse as a
/// positive number simply contributes no statistics.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// `None` when the table has no data rows at all. Otherwise the
    /// snapshot always carries the row count, found columns and quality,
    /// however little of the numeric data survived filtering.
    pub fn aggregate(
        &self,
        table: &TabularInput,
        verdict: &ValidationVerdict,
    ) -> Option<MetricsSnapshot> {
        if table.rows.is_empty() {
            return None;
        }

        let stats_for = |field: CanonicalField| {
            verdict
                .column_mappings
                .get(&field)
                .and_then(|m| column_stats(table, m, field))
        };

        let snapshot = MetricsSnapshot {
            total_campaigns: table.row_count(),
            columns_found: verdict.found_fields.clone(),
            data_quality: verdict.data_quality,
            ctr: stats_for(CanonicalField::Ctr),
            cpm: stats_for(CanonicalField::Cpm),
            reach: stats_for(CanonicalField::Reach),
            frequency: stats_for(CanonicalField::Frequency),
            cost: stats_for(CanonicalField::Cost),
        };

        info!(
            "Aggregated {} rows across {} matched columns",
            snapshot.total_campaigns,
            snapshot.columns_found.len()
        );

        Some(snapshot)
    }
}

/// Statistics for one matched column. Cells that fail to parse or are not
/// strictly positive are excluded from the statistics, not from the row set.
fn column_stats(
    table: &TabularInput,
    mapping: &ColumnMatch,
    field: CanonicalField,
) -> Option<FieldStats> {
    let values: Vec<f64> = (0..table.row_count())
        .filter_map(|row| table.cell(row, mapping.header_index).as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let average = sum / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let total = match field {
        // Volume-like fields report a sum alongside the average.
        CanonicalField::Reach | CanonicalField::Cost => Some(round_for(field, sum)),
        _ => None,
    };

    Some(FieldStats {
        average: round_for(field, average),
        min: round_for(field, min),
        max: round_for(field, max),
        total,
    })
}

/// Rate and currency fields keep two decimals, frequency one, audience
/// counts none.
fn round_for(field: CanonicalField, value: f64) -> f64 {
    match field {
        CanonicalField::Frequency => (value * 10.0).round() / 10.0,
        CanonicalField::Reach => value.round(),
        _ => (value * 100.0).round() / 100.0,
    }
}
