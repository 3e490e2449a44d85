use crate::config::ColumnCatalog;
use crate::models::{CanonicalField, ColumnMatch};
use regex::Regex;

/// Fuzzy matcher from raw export headers to canonical fields. Tolerance is
/// deliberate: real exports spell the same concept a dozen ways, and a
/// substring match with symbol stripping catches nearly all of them at the
/// cost of the occasional false positive.
pub struct HeaderMatcher {
    catalog: ColumnCatalog,
    whitespace: Regex,
}

impl HeaderMatcher {
    pub fn new(catalog: ColumnCatalog) -> Self {
        HeaderMatcher {
            catalog,
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// First header satisfying any alias of `field`. Aliases are tried in
    /// catalogue order, and every header is tried against an alias before
    /// the next alias is considered; this priority order is load-bearing
    /// when two aliases hit different headers.
    pub fn match_field(&self, headers: &[String], field: CanonicalField) -> Option<ColumnMatch> {
        let normalized: Vec<String> = headers.iter().map(|h| self.normalize(h)).collect();

        for alias in self.catalog.aliases(field) {
            let alias = self.normalize(alias);
            for (index, header) in normalized.iter().enumerate() {
                if header_satisfies(header, &alias) {
                    return Some(ColumnMatch {
                        field,
                        original_header_name: headers[index].clone(),
                        header_index: index,
                    });
                }
            }
        }

        None
    }

    /// Lowercase, trim, internal whitespace collapsed to one underscore.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        self.whitespace.replace_all(&lowered, "_").into_owned()
    }
}

fn header_satisfies(header: &str, alias: &str) -> bool {
    if header.is_empty() || alias.is_empty() {
        return false;
    }

    if header == alias || header.contains(alias) || alias.contains(header) {
        return true;
    }

    // Percent-decorated headers like "ctr%".
    let stripped = header.replace("%", "");
    if !stripped.is_empty()
        && (stripped == alias || stripped.contains(alias) || alias.contains(stripped.as_str()))
    {
        return true;
    }

    // Separator-insensitive comparison: "click-through_rate" vs "click_through_rate".
    let bare_header = strip_separators(header);
    let bare_alias = strip_separators(alias);
    if bare_header.is_empty() || bare_alias.is_empty() {
        return false;
    }
    bare_header == bare_alias
        || bare_header.contains(bare_alias.as_str())
        || bare_alias.contains(bare_header.as_str())
}

fn strip_separators(s: &str) -> String {
    s.replace("-", "").replace("_", "")
}
