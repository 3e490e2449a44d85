use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of media-planning concepts the pipeline tries to recognize
/// regardless of how the export spells its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Channel,
    Date,
    Impressions,
    Clicks,
    Ctr,
    Cpm,
    Reach,
    Frequency,
    Cost,
    Budget,
    Demographic,
    Geography,
}

impl CanonicalField {
    /// Catalogue iteration order. Matching and reporting both follow this.
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::Channel,
        CanonicalField::Date,
        CanonicalField::Impressions,
        CanonicalField::Clicks,
        CanonicalField::Ctr,
        CanonicalField::Cpm,
        CanonicalField::Reach,
        CanonicalField::Frequency,
        CanonicalField::Cost,
        CanonicalField::Budget,
        CanonicalField::Demographic,
        CanonicalField::Geography,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Channel => "channel",
            CanonicalField::Date => "date",
            CanonicalField::Impressions => "impressions",
            CanonicalField::Clicks => "clicks",
            CanonicalField::Ctr => "ctr",
            CanonicalField::Cpm => "cpm",
            CanonicalField::Reach => "reach",
            CanonicalField::Frequency => "frequency",
            CanonicalField::Cost => "cost",
            CanonicalField::Budget => "budget",
            CanonicalField::Demographic => "demographic",
            CanonicalField::Geography => "geography",
        }
    }

    /// Fields whose columns carry numbers the aggregator can summarize.
    pub fn is_numeric_metric(&self) -> bool {
        matches!(
            self,
            CanonicalField::Ctr
                | CanonicalField::Cpm
                | CanonicalField::Reach
                | CanonicalField::Frequency
                | CanonicalField::Cost
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single spreadsheet cell. Coercion to a number is explicit and total;
/// anything that fails to parse simply yields `None` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Best-effort numeric reading. Text cells get currency symbols,
    /// thousands separators and percent signs stripped before parsing,
    /// so "$1,500.00" and "2.3%" both come through.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let cleaned = s.replace("$", "").replace(",", "").replace("%", "");
                cleaned.trim().parse::<f64>().ok()
            }
            CellValue::Empty => None,
        }
    }

}

const EMPTY_CELL: CellValue = CellValue::Empty;

/// A fully parsed export: header row plus data rows. Rows may be shorter
/// than the header row; missing trailing cells read back as `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularInput {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TabularInput {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        TabularInput { headers, rows }
    }

    /// Cell at (row, column), tolerating short rows.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A canonical field successfully associated with one input header.
/// Absence of a match is represented by `Option`, not a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMatch {
    pub field: CanonicalField,
    pub original_header_name: String,
    pub header_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Limited,
    Good,
    Excellent,
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataQuality::Limited => "limited",
            DataQuality::Good => "good",
            DataQuality::Excellent => "excellent",
        };
        f.write_str(s)
    }
}

/// Overall judgment of whether an export has enough recognized structure
/// to analyze. `found_fields` and `missing_fields` always partition the
/// full catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub found_fields: Vec<CanonicalField>,
    pub missing_fields: Vec<CanonicalField>,
    pub column_mappings: BTreeMap<CanonicalField, ColumnMatch>,
    pub data_quality: DataQuality,
    pub has_channel_data: bool,
    pub suggestions: String,
}

/// Descriptive statistics for one matched numeric column, computed over
/// the cells that parsed as positive numbers. `total` is only reported
/// for volume-like fields (reach, cost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Summary statistics over the matched numeric columns. A field with no
/// usable values is absent rather than zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_campaigns: usize,
    pub columns_found: Vec<CanonicalField>,
    pub data_quality: DataQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctr: Option<FieldStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpm: Option<FieldStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach: Option<FieldStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<FieldStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<FieldStats>,
}

/// The compact structure submitted to the narrative service. Carries a
/// bounded row sample, never the full dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPayload {
    pub headers: Vec<String>,
    pub column_mappings: BTreeMap<CanonicalField, ColumnMatch>,
    pub found_columns: Vec<CanonicalField>,
    pub data_quality: DataQuality,
    pub sample_rows: Vec<Vec<CellValue>>,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,
    pub has_channel_data: bool,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_numeric_coercion() {
        assert_eq!(CellValue::Number(15.5).as_f64(), Some(15.5));
        assert_eq!(CellValue::Text("$1,500.00".to_string()).as_f64(), Some(1500.0));
        assert_eq!(CellValue::Text("2.3%".to_string()).as_f64(), Some(2.3));
        assert_eq!(CellValue::Text("abc".to_string()).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
    }

    #[test]
    fn test_short_row_reads_empty() {
        let table = TabularInput::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![CellValue::Number(1.0)]],
        );

        assert_eq!(table.cell(0, 0), &CellValue::Number(1.0));
        assert_eq!(table.cell(0, 2), &CellValue::Empty);
        assert_eq!(table.cell(5, 0), &CellValue::Empty);
    }

    #[test]
    fn test_numeric_metric_fields() {
        assert!(CanonicalField::Ctr.is_numeric_metric());
        assert!(CanonicalField::Cost.is_numeric_metric());
        assert!(!CanonicalField::Channel.is_numeric_metric());
        assert!(!CanonicalField::Date.is_numeric_metric());
    }

    #[test]
    fn test_catalogue_order_is_stable() {
        assert_eq!(CanonicalField::ALL.len(), 12);
        assert_eq!(CanonicalField::ALL[0], CanonicalField::Channel);
        assert_eq!(CanonicalField::ALL[4], CanonicalField::Ctr);
    }
}
