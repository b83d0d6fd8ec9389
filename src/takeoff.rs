//! The reader → tracker → classifier → aggregator pipeline

use crate::config::TakeoffConfiguration;
use crate::error::Result;
use crate::extraction::{classify, ClassifierContext, ExtractionRecord};
use crate::io::dxf::DxfReader;
use crate::notification::NotificationCollection;
use crate::quantity::{QuantityAggregator, QuantityReport};
use log::{debug, info};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Outcome of one takeoff run
#[derive(Debug, Clone)]
pub struct Takeoff {
    /// The bill of quantities
    pub report: QuantityReport,
    /// Every record extracted, in stream order
    pub records: Vec<ExtractionRecord>,
    /// Non-fatal issues met while reading and classifying
    pub notifications: NotificationCollection,
}

/// Runs a takeoff over one DXF stream.
///
/// ```rust,ignore
/// use rebar_takeoff::TakeoffReader;
///
/// let takeoff = TakeoffReader::from_file("plan.dxf")?.run()?;
/// println!("{}", takeoff.report.to_json(true)?);
/// ```
pub struct TakeoffReader<R: BufRead> {
    reader: DxfReader<R>,
    config: TakeoffConfiguration,
}

impl<R: Read> TakeoffReader<BufReader<R>> {
    /// Create a takeoff over any reader
    pub fn from_reader(reader: R) -> Self {
        Self::from_dxf_reader(DxfReader::from_reader(reader))
    }
}

impl TakeoffReader<BufReader<File>> {
    /// Create a takeoff over a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_dxf_reader(DxfReader::from_file(path)?))
    }
}

impl<R: BufRead> TakeoffReader<R> {
    /// Create a takeoff over an existing DXF reader
    pub fn from_dxf_reader(reader: DxfReader<R>) -> Self {
        Self {
            reader,
            config: TakeoffConfiguration::default(),
        }
    }

    /// Set the configuration
    pub fn with_configuration(mut self, config: TakeoffConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the stream to the end and aggregate every callout found.
    ///
    /// Fails only when the configuration is invalid or the source cannot be
    /// read; an annotation-free drawing yields an empty report.
    pub fn run(self) -> Result<Takeoff> {
        let Self { reader, config } = self;
        config.validate()?;

        let mut reader = reader.with_fallback_encoding(config.fallback_encoding);
        let mut aggregator = QuantityAggregator::new(config.policy)
            .with_element_attribution(config.attribute_elements);
        let mut records = Vec::new();
        let mut notifications = NotificationCollection::new();
        let mut context = ClassifierContext::new();
        let mut entity_count = 0usize;

        for entity in reader.text_entities() {
            let entity = entity?;
            entity_count += 1;
            let mut classification = classify(&entity.content, context);
            context = classification.context;
            notifications.append(&mut classification.notifications);
            aggregator.extend(&classification.records);
            records.append(&mut classification.records);
        }

        let mut reader_notes = reader.take_notifications();
        reader_notes.append(&mut notifications);
        let report = aggregator.finish();

        debug!(
            "{} text entities, {} records, {} notifications",
            entity_count,
            records.len(),
            reader_notes.len()
        );
        if report.is_empty() {
            info!("no reinforcement callouts found");
        }

        Ok(Takeoff {
            report,
            records,
            notifications: reader_notes,
        })
    }
}

/// Run a takeoff over an in-memory or streaming source
pub fn analyze<R: Read>(reader: R, config: &TakeoffConfiguration) -> Result<Takeoff> {
    TakeoffReader::from_reader(reader)
        .with_configuration(config.clone())
        .run()
}

/// Run a takeoff over a file
pub fn analyze_file<P: AsRef<Path>>(path: P, config: &TakeoffConfiguration) -> Result<Takeoff> {
    TakeoffReader::from_file(path)?
        .with_configuration(config.clone())
        .run()
}

/// Run independent takeoffs in parallel, one result per path in input order
pub fn analyze_files<P>(paths: &[P], config: &TakeoffConfiguration) -> Vec<Result<Takeoff>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| analyze_file(path, config))
        .collect()
}
