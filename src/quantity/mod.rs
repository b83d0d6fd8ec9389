//! Aggregation of callouts into a bill of quantities

mod aggregator;
mod policy;
mod report;
pub mod unit_weight;

pub use aggregator::{aggregate, QuantityAggregator};
pub use policy::{stock_bars_needed, EstimationPolicy};
pub use report::{
    diameter_label, DiameterSummary, ElementDiameterSummary, ElementSummary, ItemKind, ItemLine,
    QuantityReport,
};
