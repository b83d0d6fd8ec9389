//! Extraction record types

use serde::Serialize;

/// A bar callout: `20 Ø12 L=340`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RebarSpec {
    /// Number of bars, at least 1
    pub count: u32,
    /// Bar diameter in whole millimetres
    pub diameter_mm: u32,
    /// Bar length in centimetres, 0 when the callout omitted it
    pub length_cm: u32,
    /// Element current when the callout was read
    pub element: Option<String>,
    /// Annotation text the callout was found in
    pub raw_text: String,
}

/// A stirrup callout: `Ø8/15`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StirrupSpec {
    /// Stirrup bar diameter in whole millimetres
    pub diameter_mm: u32,
    /// Spacing between stirrups in centimetres, greater than 0
    pub spacing_cm: u32,
    /// Element current when the callout was read
    pub element: Option<String>,
    /// Annotation text the callout was found in
    pub raw_text: String,
}

/// A structural element label such as `S101` or `K12`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementLabel {
    /// Upper-case label code
    pub code: String,
}

/// Result of classifying one annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionRecord {
    Rebar(RebarSpec),
    Stirrup(StirrupSpec),
    ElementLabel(ElementLabel),
}

impl ExtractionRecord {
    /// Diameter of a quantity record; labels have none
    pub fn diameter_mm(&self) -> Option<u32> {
        match self {
            Self::Rebar(spec) => Some(spec.diameter_mm),
            Self::Stirrup(spec) => Some(spec.diameter_mm),
            Self::ElementLabel(_) => None,
        }
    }

    /// Element the record is attributed to
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::Rebar(spec) => spec.element.as_deref(),
            Self::Stirrup(spec) => spec.element.as_deref(),
            Self::ElementLabel(label) => Some(&label.code),
        }
    }

    /// Whether the record contributes to quantities
    pub fn is_quantity(&self) -> bool {
        !matches!(self, Self::ElementLabel(_))
    }
}
