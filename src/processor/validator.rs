use crate::models::{CanonicalField, DataQuality, TabularInput, ValidationVerdict};
use crate::processor::HeaderMatcher;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Minimum number of recognized fields for an export to be analyzable.
/// Deliberately low: partial data must still be usable.
const MIN_FIELDS_FOR_VALID: usize = 2;

/// Recognized-field count at which the verdict is upgraded to excellent.
const FIELDS_FOR_EXCELLENT: usize = 4;

pub struct DataValidator {
    matcher: HeaderMatcher,
}

impl DataValidator {
    pub fn new(matcher: HeaderMatcher) -> Self {
        DataValidator { matcher }
    }

    /// Runs the matcher over every catalogue field and judges the result.
    /// Total: every input, however sparse, produces a verdict.
    pub fn validate(&self, table: &TabularInput) -> ValidationVerdict {
        if table.headers.is_empty() {
            warn!("Export has no header row; nothing to map");
            return ValidationVerdict {
                is_valid: false,
                found_fields: Vec::new(),
                missing_fields: CanonicalField::ALL.to_vec(),
                column_mappings: BTreeMap::new(),
                data_quality: DataQuality::Limited,
                has_channel_data: false,
                suggestions: "The file has no header row. Export your campaign data with \
                              column names in the first row and try again."
                    .to_string(),
            };
        }

        let mut found_fields = Vec::new();
        let mut missing_fields = Vec::new();
        let mut column_mappings = BTreeMap::new();

        for field in CanonicalField::ALL {
            match self.matcher.match_field(&table.headers, field) {
                Some(m) => {
                    found_fields.push(field);
                    column_mappings.insert(field, m);
                }
                None => missing_fields.push(field),
            }
        }

        let is_valid = found_fields.len() >= MIN_FIELDS_FOR_VALID;
        let data_quality = if found_fields.len() >= FIELDS_FOR_EXCELLENT {
            DataQuality::Excellent
        } else if is_valid {
            DataQuality::Good
        } else {
            DataQuality::Limited
        };

        let has_channel_data = column_mappings.contains_key(&CanonicalField::Channel)
            || table.headers.iter().any(|h| {
                let lower = h.to_lowercase();
                lower.contains("platform") || lower.contains("source")
            });

        let suggestions = build_suggestions(is_valid, &found_fields, &missing_fields);

        info!(
            "Validated export: {}/{} fields recognized, quality {}",
            found_fields.len(),
            CanonicalField::ALL.len(),
            data_quality
        );

        ValidationVerdict {
            is_valid,
            found_fields,
            missing_fields,
            column_mappings,
            data_quality,
            has_channel_data,
            suggestions,
        }
    }
}

fn build_suggestions(
    is_valid: bool,
    found: &[CanonicalField],
    missing: &[CanonicalField],
) -> String {
    if !is_valid {
        return "Could not recognize enough campaign columns to analyze this file. \
                Rename your headers to include concepts like channel, impressions, \
                clicks, ctr, cpm, reach or cost, then upload again."
            .to_string();
    }

    if found.len() >= FIELDS_FOR_EXCELLENT {
        format!(
            "Excellent! Recognized {} campaign metrics; the analysis can cover \
             performance, efficiency and audience breakdowns.",
            found.len()
        )
    } else {
        let wanted: Vec<&str> = missing
            .iter()
            .filter(|f| f.is_numeric_metric() || **f == CanonicalField::Channel)
            .take(3)
            .map(|f| f.as_str())
            .collect();
        format!(
            "Recognized {} campaign metrics, enough for a basic analysis. Adding \
             columns such as {} would make the insights deeper.",
            found.len(),
            wanted.join(", ")
        )
    }
}
