//! Diameter bucketing of extraction records

use super::policy::EstimationPolicy;
use super::report::{
    diameter_label, round2, DiameterSummary, ElementDiameterSummary, ElementSummary, ItemKind,
    ItemLine, QuantityReport,
};
use super::unit_weight::unit_weight_kg_per_m;
use crate::extraction::ExtractionRecord;
use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeMap;

/// Per-element accumulation
#[derive(Debug, Default)]
struct ElementBucket {
    length_cm: BTreeMap<u32, u64>,
    items: Vec<ItemLine>,
}

/// Folds extraction records into a [`QuantityReport`].
///
/// Lengths accumulate as whole centimetres, so the fold is exact and the
/// report does not depend on record order. Totals saturate at `u64::MAX`.
#[derive(Debug)]
pub struct QuantityAggregator {
    policy: EstimationPolicy,
    attribute_elements: bool,
    /// Total length per diameter, created on first contribution
    buckets: BTreeMap<u32, u64>,
    elements: BTreeMap<String, ElementBucket>,
    record_count: usize,
}

impl QuantityAggregator {
    /// Create an aggregator with element attribution enabled
    pub fn new(policy: EstimationPolicy) -> Self {
        Self {
            policy,
            attribute_elements: true,
            buckets: BTreeMap::new(),
            elements: BTreeMap::new(),
            record_count: 0,
        }
    }

    /// Enable or disable the per-element breakdown
    pub fn with_element_attribution(mut self, enabled: bool) -> Self {
        self.attribute_elements = enabled;
        self
    }

    /// Itemize a quantity record; `None` for element labels
    pub fn item_line(&self, record: &ExtractionRecord) -> Option<ItemLine> {
        let (kind, diameter_mm, count, unit_length_cm, raw_text) = match record {
            ExtractionRecord::Rebar(spec) => {
                let unit = if spec.length_cm > 0 {
                    spec.length_cm
                } else {
                    self.policy.fallback_bar_length_cm
                };
                (ItemKind::Rebar, spec.diameter_mm, spec.count, unit, &spec.raw_text)
            }
            ExtractionRecord::Stirrup(spec) => (
                ItemKind::Stirrup,
                spec.diameter_mm,
                self.policy.stirrup_count(spec.spacing_cm),
                self.policy.stirrup_perimeter_cm,
                &spec.raw_text,
            ),
            ExtractionRecord::ElementLabel(_) => return None,
        };
        Some(ItemLine {
            diameter_mm,
            kind,
            count,
            unit_length_cm: u64::from(unit_length_cm),
            total_length_cm: u64::from(count) * u64::from(unit_length_cm),
            raw_text: raw_text.clone(),
        })
    }

    /// Add one record
    pub fn add(&mut self, record: &ExtractionRecord) {
        if let ExtractionRecord::ElementLabel(label) = record {
            if self.attribute_elements {
                self.elements.entry(label.code.clone()).or_default();
            }
            return;
        }
        let Some(item) = self.item_line(record) else {
            return;
        };

        self.record_count += 1;
        let total = self.buckets.entry(item.diameter_mm).or_insert(0);
        *total = total.saturating_add(item.total_length_cm);

        if self.attribute_elements {
            if let Some(code) = record.element() {
                let bucket = self.elements.entry(code.to_string()).or_default();
                let total = bucket.length_cm.entry(item.diameter_mm).or_insert(0);
                *total = total.saturating_add(item.total_length_cm);
                bucket.items.push(item);
            }
        }
    }

    /// Produce the report
    pub fn finish(self) -> QuantityReport {
        let mut diameters = IndexMap::with_capacity(self.buckets.len());
        let mut total_weight_kg = 0.0;

        for (&diameter_mm, &length_cm) in &self.buckets {
            let length_m = length_cm as f64 / 100.0;
            let weight_kg = weight_kg(diameter_mm, length_m);
            if unit_weight_kg_per_m(diameter_mm).is_none() {
                debug!("no unit weight for Ø{}, reporting length only", diameter_mm);
            }
            total_weight_kg += weight_kg;
            diameters.insert(
                diameter_label(diameter_mm),
                DiameterSummary {
                    weight_kg: round2(weight_kg),
                    length_m: round2(length_m),
                    stock_bars_needed: self.policy.stock_bars_needed(length_m),
                },
            );
        }

        let elements = (self.attribute_elements && !self.elements.is_empty()).then(|| {
            self.elements
                .into_iter()
                .map(|(code, bucket)| (code, element_summary(bucket)))
                .collect()
        });

        QuantityReport {
            diameters,
            total_weight_kg: round2(total_weight_kg),
            record_count: self.record_count,
            elements,
        }
    }
}

impl Extend<ExtractionRecord> for QuantityAggregator {
    fn extend<I: IntoIterator<Item = ExtractionRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(&record);
        }
    }
}

impl<'a> Extend<&'a ExtractionRecord> for QuantityAggregator {
    fn extend<I: IntoIterator<Item = &'a ExtractionRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

fn weight_kg(diameter_mm: u32, length_m: f64) -> f64 {
    unit_weight_kg_per_m(diameter_mm).map_or(0.0, |w| length_m * w)
}

fn element_summary(mut bucket: ElementBucket) -> ElementSummary {
    bucket.items.sort();
    let diameters = bucket
        .length_cm
        .into_iter()
        .map(|(diameter_mm, length_cm)| {
            let length_m = length_cm as f64 / 100.0;
            (
                diameter_label(diameter_mm),
                ElementDiameterSummary {
                    length_m: round2(length_m),
                    weight_kg: round2(weight_kg(diameter_mm, length_m)),
                },
            )
        })
        .collect();
    ElementSummary {
        diameters,
        items: bucket.items,
    }
}

/// Aggregate a complete record sequence
pub fn aggregate<'a, I>(
    records: I,
    policy: EstimationPolicy,
    attribute_elements: bool,
) -> QuantityReport
where
    I: IntoIterator<Item = &'a ExtractionRecord>,
{
    let mut aggregator =
        QuantityAggregator::new(policy).with_element_attribution(attribute_elements);
    aggregator.extend(records);
    aggregator.finish()
}
