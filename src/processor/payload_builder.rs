use crate::models::{AiPayload, MetricsSnapshot, TabularInput, ValidationVerdict};
use chrono::Utc;

/// Rows included verbatim in the payload sample. The downstream narrative
/// service bills by payload size, so the full dataset never travels.
pub const SAMPLE_ROW_LIMIT: usize = 10;

/// Assembles the structure submitted to the narrative service. Pure
/// transformation over already-computed values.
pub struct PayloadBuilder;

impl PayloadBuilder {
    pub fn build(
        &self,
        table: &TabularInput,
        verdict: &ValidationVerdict,
        metrics: Option<&MetricsSnapshot>,
    ) -> AiPayload {
        let sample_rows = table
            .rows
            .iter()
            .take(SAMPLE_ROW_LIMIT)
            .cloned()
            .collect();

        AiPayload {
            headers: table.headers.clone(),
            column_mappings: verdict.column_mappings.clone(),
            found_columns: verdict.found_fields.clone(),
            data_quality: verdict.data_quality,
            sample_rows,
            total_rows: table.row_count(),
            metrics: metrics.cloned(),
            has_channel_data: verdict.has_channel_data,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnCatalog;
    use crate::models::CellValue;
    use crate::processor::{DataValidator, HeaderMatcher, MetricsAggregator};

    fn validator() -> DataValidator {
        DataValidator::new(HeaderMatcher::new(ColumnCatalog::new()))
    }

    fn table_with_rows(n: usize) -> TabularInput {
        let rows = (0..n)
            .map(|i| vec![CellValue::Text("Facebook".to_string()), CellValue::Number(i as f64 + 1.0)])
            .collect();
        TabularInput::new(vec!["Platform".to_string(), "CTR".to_string()], rows)
    }

    #[test]
    fn test_sample_is_bounded_at_ten_rows() {
        let v = validator();
        for n in [0usize, 5, 10, 1000] {
            let t = table_with_rows(n);
            let verdict = v.validate(&t);
            let metrics = MetricsAggregator.aggregate(&t, &verdict);
            let payload = PayloadBuilder.build(&t, &verdict, metrics.as_ref());

            assert_eq!(payload.sample_rows.len(), n.min(SAMPLE_ROW_LIMIT));
            assert_eq!(payload.total_rows, n);
        }
    }

    #[test]
    fn test_sample_rows_are_verbatim_and_in_order() {
        let t = table_with_rows(3);
        let verdict = validator().validate(&t);
        let payload = PayloadBuilder.build(&t, &verdict, None);

        assert_eq!(payload.sample_rows, t.rows[..3].to_vec());
        assert_eq!(payload.headers, t.headers);
    }

    #[test]
    fn test_absent_snapshot_propagates() {
        let t = table_with_rows(0);
        let verdict = validator().validate(&t);
        let metrics = MetricsAggregator.aggregate(&t, &verdict);
        assert!(metrics.is_none());

        let payload = PayloadBuilder.build(&t, &verdict, metrics.as_ref());
        assert!(payload.metrics.is_none());
        assert_eq!(payload.total_rows, 0);
    }

    #[test]
    fn test_payload_serializes_with_camel_case_wire_names() {
        let t = table_with_rows(2);
        let verdict = validator().validate(&t);
        let metrics = MetricsAggregator.aggregate(&t, &verdict);
        let payload = PayloadBuilder.build(&t, &verdict, metrics.as_ref());

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("columnMappings").is_some());
        assert!(json.get("foundColumns").is_some());
        assert!(json.get("hasChannelData").is_some());
        assert!(json.get("totalRows").is_some());
        assert_eq!(json["dataQuality"], "good");
    }
}
