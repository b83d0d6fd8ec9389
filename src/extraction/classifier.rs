//! Annotation classification

use super::numeric::{is_plausible_diameter, parse_length_cm, parse_whole};
use super::recognizer::{
    recognize_label, recognize_rebar, recognize_stirrup, RebarMatch, StirrupMatch,
};
use super::record::{ElementLabel, ExtractionRecord, RebarSpec, StirrupSpec};
use crate::notification::{NotificationCollection, NotificationType};
use log::{debug, trace};

/// The element that callouts are currently attributed to.
///
/// Threaded through classification as a fold value: each call to
/// [`classify`] takes the context left by the previous annotation and
/// returns the one for the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierContext {
    current_element: Option<String>,
}

impl ClassifierContext {
    /// Context with no element seen yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Context attributing callouts to `code`
    pub fn with_element(code: impl Into<String>) -> Self {
        Self {
            current_element: Some(code.into()),
        }
    }

    /// Most recently seen element label
    pub fn current_element(&self) -> Option<&str> {
        self.current_element.as_deref()
    }
}

/// Output of classifying one annotation
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Context for the next annotation
    pub context: ClassifierContext,
    /// Records found, in recognizer order
    pub records: Vec<ExtractionRecord>,
    /// Candidates that were discarded
    pub notifications: NotificationCollection,
}

/// Classify one annotation string.
///
/// An element label ends classification of the string. Otherwise the
/// stirrup and rebar recognizers each contribute at most one record; a rebar
/// candidate inside the stirrup callout is not counted twice.
pub fn classify(text: &str, context: ClassifierContext) -> Classification {
    let mut out = Classification {
        context,
        ..Classification::default()
    };

    if let Some(label) = recognize_label(text) {
        let code = label.code.to_ascii_uppercase();
        debug!("element {} from '{}'", code, text);
        out.context = ClassifierContext::with_element(code.clone());
        out.records.push(ExtractionRecord::ElementLabel(ElementLabel { code }));
        return out;
    }

    let element = out.context.current_element.clone();
    let mut matched = false;

    let stirrup = recognize_stirrup(text);
    if let Some(m) = &stirrup {
        matched = true;
        if let Some(spec) = stirrup_spec(m, text, element.clone(), &mut out.notifications) {
            out.records.push(ExtractionRecord::Stirrup(spec));
        }
    }

    if let Some(m) = recognize_rebar(text, stirrup.as_ref().map(|s| &s.span)) {
        matched = true;
        if let Some(spec) = rebar_spec(&m, text, element, &mut out.notifications) {
            out.records.push(ExtractionRecord::Rebar(spec));
        }
    }

    if !matched {
        trace!("unrecognized annotation '{}'", text);
        out.notifications
            .notify(NotificationType::UnrecognizedAnnotation, text.to_string());
    }
    out
}

fn plausible_diameter(raw: &str, text: &str, notes: &mut NotificationCollection) -> Option<u32> {
    match parse_whole(raw) {
        Some(d) if is_plausible_diameter(d) => Some(d),
        _ => {
            debug!("diameter {} in '{}' out of range", raw, text);
            notes.notify(
                NotificationType::DiameterOutOfRange,
                format!("diameter {} in '{}'", raw, text),
            );
            None
        }
    }
}

fn stirrup_spec(
    m: &StirrupMatch<'_>,
    text: &str,
    element: Option<String>,
    notes: &mut NotificationCollection,
) -> Option<StirrupSpec> {
    let diameter_mm = plausible_diameter(m.diameter, text, notes)?;
    let spacing_cm = parse_whole(m.spacing).filter(|&s| s > 0);
    let Some(spacing_cm) = spacing_cm else {
        notes.notify(
            NotificationType::DegenerateCallout,
            format!("stirrup spacing {} in '{}'", m.spacing, text),
        );
        return None;
    };
    Some(StirrupSpec {
        diameter_mm,
        spacing_cm,
        element,
        raw_text: text.to_string(),
    })
}

fn rebar_spec(
    m: &RebarMatch<'_>,
    text: &str,
    element: Option<String>,
    notes: &mut NotificationCollection,
) -> Option<RebarSpec> {
    let diameter_mm = plausible_diameter(m.diameter, text, notes)?;
    let count = match m.count {
        Some(raw) => raw.parse::<u32>().ok().filter(|&c| c > 0),
        None => Some(1),
    };
    let Some(count) = count else {
        notes.notify(
            NotificationType::DegenerateCallout,
            format!("bar count {} in '{}'", m.count.unwrap_or_default(), text),
        );
        return None;
    };
    let length_cm = m
        .length
        .and_then(|raw| parse_length_cm(raw, m.length_unit))
        .unwrap_or(0);
    Some(RebarSpec {
        count,
        diameter_mm,
        length_cm,
        element,
        raw_text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<ExtractionRecord> {
        classify(text, ClassifierContext::new()).records
    }

    #[test]
    fn test_full_rebar_callout() {
        assert_eq!(
            records("20 Ø12 L=340"),
            vec![ExtractionRecord::Rebar(RebarSpec {
                count: 20,
                diameter_mm: 12,
                length_cm: 340,
                element: None,
                raw_text: "20 Ø12 L=340".into(),
            })]
        );
    }

    #[test]
    fn test_adet_without_length() {
        let recs = records("14 adet Q16");
        let ExtractionRecord::Rebar(spec) = &recs[0] else {
            panic!("expected rebar, got {:?}", recs);
        };
        assert_eq!((spec.count, spec.diameter_mm, spec.length_cm), (14, 16, 0));
    }

    #[test]
    fn test_stirrup_not_double_counted() {
        let recs = records("Ø8/15");
        assert_eq!(
            recs,
            vec![ExtractionRecord::Stirrup(StirrupSpec {
                diameter_mm: 8,
                spacing_cm: 15,
                element: None,
                raw_text: "Ø8/15".into(),
            })]
        );
    }

    #[test]
    fn test_stirrup_and_rebar_in_one_string() {
        let recs = records("4Ø16 etr. Ø8/10");
        assert_eq!(recs.len(), 2);
        assert!(matches!(recs[0], ExtractionRecord::Stirrup(StirrupSpec { spacing_cm: 10, .. })));
        assert!(matches!(
            recs[1],
            ExtractionRecord::Rebar(RebarSpec { count: 4, diameter_mm: 16, .. })
        ));
    }

    #[test]
    fn test_rebar_after_stirrup_not_lost() {
        let recs = records("Ø8/15 Ø12 L=340");
        assert_eq!(recs.len(), 2);
        assert!(matches!(
            recs[0],
            ExtractionRecord::Stirrup(StirrupSpec { diameter_mm: 8, spacing_cm: 15, .. })
        ));
        assert!(matches!(
            recs[1],
            ExtractionRecord::Rebar(RebarSpec { count: 1, diameter_mm: 12, length_cm: 340, .. })
        ));
    }

    #[test]
    fn test_year_like_number_rejected() {
        let out = classify("2045", ClassifierContext::new());
        assert!(out.records.is_empty());
        assert!(out.notifications.has_type(NotificationType::UnrecognizedAnnotation));
    }

    #[test]
    fn test_out_of_range_diameter_rejected() {
        let out = classify("3 Ø45", ClassifierContext::new());
        assert!(out.records.is_empty());
        assert!(out.notifications.has_type(NotificationType::DiameterOutOfRange));

        assert!(records("Ø4/10").is_empty());
    }

    #[test]
    fn test_fractional_diameter_normalised() {
        let recs = records("2Ø12.0");
        assert_eq!(recs[0].diameter_mm(), Some(12));
    }

    #[test]
    fn test_zero_count_and_spacing_discarded() {
        let out = classify("0Ø12", ClassifierContext::new());
        assert!(out.records.is_empty());
        assert!(out.notifications.has_type(NotificationType::DegenerateCallout));
        assert!(records("Ø8/0").is_empty());
    }

    #[test]
    fn test_label_updates_context() {
        let out = classify("s101", ClassifierContext::new());
        assert_eq!(out.context.current_element(), Some("S101"));
        assert_eq!(
            out.records,
            vec![ExtractionRecord::ElementLabel(ElementLabel { code: "S101".into() })]
        );

        let next = classify("8Ø14 L=300", out.context);
        assert_eq!(next.records[0].element(), Some("S101"));
        assert_eq!(next.context.current_element(), Some("S101"));
    }

    #[test]
    fn test_label_stops_classification() {
        let out = classify("K101 4Ø16", ClassifierContext::new());
        assert_eq!(out.records.len(), 1);
        assert!(!out.records[0].is_quantity());
    }

    #[test]
    fn test_context_survives_unrecognized_text() {
        let out = classify("KESIT A-A", ClassifierContext::with_element("P12"));
        assert_eq!(out.context.current_element(), Some("P12"));
    }

    #[test]
    fn test_formatting_symbol_variants() {
        assert_eq!(records("6 fi 10")[0].diameter_mm(), Some(10));
        assert_eq!(records("6φ10")[0].diameter_mm(), Some(10));
    }
}
