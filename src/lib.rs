//! # rebar-takeoff
//!
//! Reinforcement bill of quantities from the annotation text of DXF drawings.
//!
//! Structural drawings carry their reinforcement as free-form callouts:
//! `20 Ø12 L=340`, `14 adet Q16`, `Ø8/15`. This library scans the TEXT,
//! MTEXT, ATTRIB and INSERT entities of an ASCII DXF stream, recognizes
//! those callouts and totals length, weight and stock bars per diameter.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rebar_takeoff::{TakeoffConfiguration, TakeoffReader};
//!
//! let takeoff = TakeoffReader::from_file("plan.dxf")?
//!     .with_configuration(TakeoffConfiguration::default())
//!     .run()?;
//!
//! for (diameter, summary) in &takeoff.report.diameters {
//!     println!("{diameter}: {} m, {} kg", summary.length_m, summary.weight_kg);
//! }
//! # Ok::<(), rebar_takeoff::TakeoffError>(())
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly forward, each stage owning only what it produces:
//!
//! - [`io::dxf::DxfTextReader`] - code/value pairs, skipping malformed ones
//! - [`io::dxf::EntityTracker`] - text-bearing entity boundaries and content
//! - [`extraction::classify`] - element labels, stirrup and bar callouts
//! - [`quantity::QuantityAggregator`] - diameter buckets and the final report
//!
//! Runs share no mutable state; [`analyze_files`] processes several drawings
//! in parallel.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extraction;
pub mod io;
pub mod notification;
pub mod quantity;
pub mod takeoff;

pub use config::TakeoffConfiguration;
pub use error::{Result, TakeoffError};
pub use notification::{Notification, NotificationCollection, NotificationType};

pub use extraction::{classify, ClassifierContext, ExtractionRecord, RebarSpec, StirrupSpec};
pub use quantity::{EstimationPolicy, QuantityAggregator, QuantityReport};

pub use io::dxf::DxfReader;
pub use takeoff::{analyze, analyze_file, analyze_files, Takeoff, TakeoffReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_configuration_runs_on_empty_input() {
        let takeoff = analyze(&b""[..], &TakeoffConfiguration::default()).unwrap();
        assert!(takeoff.report.is_empty());
        assert!(takeoff.records.is_empty());
        assert!(takeoff.notifications.is_empty());
    }
}
