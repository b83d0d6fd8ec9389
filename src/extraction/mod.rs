//! Recognition of reinforcement callouts in annotation text

mod classifier;
pub mod numeric;
pub mod recognizer;
mod record;

pub use classifier::{classify, Classification, ClassifierContext};
pub use record::{ElementLabel, ExtractionRecord, RebarSpec, StirrupSpec};
