//! Bill of quantities

use indexmap::IndexMap;
use serde::Serialize;

/// Label used for a diameter in reports, e.g. `Ø12`
pub fn diameter_label(diameter_mm: u32) -> String {
    format!("Ø{}", diameter_mm)
}

/// Round to two decimals for presentation
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Totals for one bar diameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiameterSummary {
    /// Total mass, 0 when the diameter has no unit weight
    pub weight_kg: f64,
    /// Total bar length
    pub length_m: f64,
    /// Stock bars needed to cover the length
    pub stock_bars_needed: u32,
}

/// Length and mass of one diameter within an element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDiameterSummary {
    pub length_m: f64,
    pub weight_kg: f64,
}

/// Kind of callout an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Rebar,
    Stirrup,
}

/// One contributing callout of an element
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ItemLine {
    pub diameter_mm: u32,
    pub kind: ItemKind,
    /// Bar count, or the estimated stirrup count
    pub count: u32,
    /// Length of a single bar or stirrup
    pub unit_length_cm: u64,
    /// `count × unit_length_cm`
    pub total_length_cm: u64,
    pub raw_text: String,
}

/// Everything attributed to one structural element
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ElementSummary {
    /// Per-diameter totals in ascending diameter order
    pub diameters: IndexMap<String, ElementDiameterSummary>,
    /// Contributing callouts in canonical order
    pub items: Vec<ItemLine>,
}

/// Result of a takeoff.
///
/// Lengths and weights are rounded to two decimals; `total_weight_kg` is
/// rounded once from the unrounded per-diameter weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuantityReport {
    /// Per-diameter totals keyed by [`diameter_label`], ascending
    pub diameters: IndexMap<String, DiameterSummary>,
    pub total_weight_kg: f64,
    /// Number of bar and stirrup callouts aggregated
    pub record_count: usize,
    /// Element breakdown, present when element labels were seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<IndexMap<String, ElementSummary>>,
}

impl QuantityReport {
    /// Report with no callouts
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no callout was aggregated
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Totals for a diameter
    pub fn diameter(&self, diameter_mm: u32) -> Option<&DiameterSummary> {
        self.diameters.get(&diameter_label(diameter_mm))
    }

    /// Breakdown for an element label
    pub fn element(&self, code: &str) -> Option<&ElementSummary> {
        self.elements.as_ref()?.get(code)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(60.384), 60.38);
        assert_eq!(round2(30.0 * 0.395), 11.85);
        assert_eq!(round2(14.0 * 1.580), 22.12);
    }

    #[test]
    fn test_empty_report_json() {
        let json = QuantityReport::empty().to_json(false).unwrap();
        assert_eq!(json, r#"{"diameters":{},"total_weight_kg":0.0,"record_count":0}"#);
    }

    #[test]
    fn test_diameter_lookup() {
        let mut report = QuantityReport::empty();
        report.diameters.insert(
            diameter_label(12),
            DiameterSummary {
                weight_kg: 60.38,
                length_m: 68.0,
                stock_bars_needed: 6,
            },
        );
        assert_eq!(report.diameter(12).unwrap().stock_bars_needed, 6);
        assert!(report.diameter(14).is_none());
        assert!(report.element("S101").is_none());
    }
}
