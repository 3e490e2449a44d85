use crate::models::CanonicalField;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Registry of accepted header spellings for each canonical field. Pure
/// data; the matcher consumes it read-only. Alias order within a field is
/// the matching priority order.
#[derive(Debug, Clone)]
pub struct ColumnCatalog {
    entries: Vec<(CanonicalField, Vec<String>)>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    aliases: HashMap<CanonicalField, Vec<String>>,
}

impl ColumnCatalog {
    /// Built-in catalogue covering the spellings seen in real exports.
    pub fn new() -> Self {
        let entries = vec![
            (
                CanonicalField::Channel,
                aliases(&["channel", "platform", "media_channel", "source", "media_type", "publisher"]),
            ),
            (
                CanonicalField::Date,
                aliases(&["date", "day", "week", "month", "period", "reporting_date"]),
            ),
            (
                CanonicalField::Impressions,
                aliases(&["impressions", "imps", "impr", "total_impressions", "views"]),
            ),
            (
                CanonicalField::Clicks,
                aliases(&["clicks", "total_clicks", "link_clicks", "click"]),
            ),
            (
                CanonicalField::Ctr,
                aliases(&["ctr", "click_through_rate", "click_rate", "engagement_rate"]),
            ),
            (
                CanonicalField::Cpm,
                aliases(&["cpm", "cost_per_mille", "cost_per_thousand", "cost_per_impression", "cpm_cost"]),
            ),
            (
                CanonicalField::Reach,
                aliases(&["reach", "total_reach", "unique_reach", "unique_users", "audience"]),
            ),
            (
                CanonicalField::Frequency,
                aliases(&["frequency", "avg_frequency", "freq"]),
            ),
            (
                CanonicalField::Cost,
                aliases(&["cost", "spend", "total_cost", "total_spend", "amount_spent", "media_cost"]),
            ),
            (
                CanonicalField::Budget,
                aliases(&["budget", "planned_budget", "budget_allocated", "total_budget"]),
            ),
            (
                CanonicalField::Demographic,
                aliases(&["demographic", "demographics", "age_group", "audience_segment", "target_audience"]),
            ),
            (
                CanonicalField::Geography,
                aliases(&["geography", "geo", "region", "market", "location", "country", "dma"]),
            ),
        ];

        ColumnCatalog { entries }
    }

    /// Catalogue restricted to explicit entries; used when a reduced alias
    /// set is wanted (tests, constrained deployments).
    pub fn from_entries(entries: Vec<(CanonicalField, Vec<String>)>) -> Self {
        ColumnCatalog { entries }
    }

    /// Built-in catalogue extended with extra aliases from a TOML file.
    /// File aliases are appended after the defaults so built-in spellings
    /// keep their priority.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path))?;
        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path))?;

        let mut catalog = ColumnCatalog::new();
        for (field, extra) in file.aliases {
            catalog.extend_aliases(field, extra);
        }
        Ok(catalog)
    }

    fn extend_aliases(&mut self, field: CanonicalField, extra: Vec<String>) {
        if let Some((_, list)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            for alias in extra {
                if !list.contains(&alias) {
                    list.push(alias);
                }
            }
        } else {
            self.entries.push((field, extra));
        }
    }

    /// Alias list for one field, in priority order. Empty when the field
    /// has no entry, which makes it permanently unmatchable.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Fields with a catalogue entry, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn aliases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_all_canonical_fields() {
        let catalog = ColumnCatalog::new();
        for field in CanonicalField::ALL {
            assert!(
                !catalog.aliases(field).is_empty(),
                "no aliases for {}",
                field
            );
        }
    }

    #[test]
    fn test_cpm_alias_priority_order() {
        let catalog = ColumnCatalog::new();
        let cpm = catalog.aliases(CanonicalField::Cpm);

        let pos = |needle: &str| cpm.iter().position(|a| a == needle).unwrap();
        assert!(pos("cpm") < pos("cost_per_impression"));
        assert!(pos("cost_per_impression") < pos("cpm_cost"));
    }

    #[test]
    fn test_reduced_catalog_for_test_doubles() {
        let catalog = ColumnCatalog::from_entries(vec![(
            CanonicalField::Ctr,
            vec!["ctr".to_string()],
        )]);

        assert_eq!(catalog.fields().count(), 1);
        assert!(catalog.aliases(CanonicalField::Cpm).is_empty());
    }

    #[test]
    fn test_extend_keeps_builtin_priority() {
        let mut catalog = ColumnCatalog::new();
        catalog.extend_aliases(
            CanonicalField::Cost,
            vec!["media_investment".to_string(), "cost".to_string()],
        );

        let cost = catalog.aliases(CanonicalField::Cost);
        assert_eq!(cost[0], "cost");
        assert!(cost.contains(&"media_investment".to_string()));
        // Duplicate was not re-appended.
        assert_eq!(cost.iter().filter(|a| *a == "cost").count(), 1);
    }
}
