//! Annotation recognizers.
//!
//! Three named patterns, tried in priority order by the classifier:
//!
//! | recognizer | shape                                      | example          |
//! |------------|--------------------------------------------|------------------|
//! | label      | `[SKP][ZB]?` + 2–3 digits at string start  | `S101`, `KZ12`   |
//! | stirrup    | `<symbol><diameter>/<spacing>`             | `Ø8/15`          |
//! | rebar      | `[count] [adet] <symbol><diameter> [L=len]`| `20 Ø12 L=340`   |
//!
//! The diameter symbol is any of `Ø ø Φ φ ϕ ⌀ ∅`, the ASCII stand-ins `Q`/`q`,
//! or the word `fi`. Recognizers return raw captures; range checks and
//! normalisation happen in the classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

const SYMBOL: &str = r"(?:[ØøΦφϕ⌀∅]|[Qq]|[Ff][Ii])";
const NUMBER: &str = r"[0-9]+(?:[.,][0-9]+)?";

static LABEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*([SKP][ZB]?[0-9]{2,3})\b").expect("valid label pattern"));

static STIRRUP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{SYMBOL}\s*({NUMBER})\s*/\s*({NUMBER})")).expect("valid stirrup pattern")
});

static LENGTH_SUFFIX: Lazy<String> =
    Lazy::new(|| format!(r"(?:\s*[Ll]\s*[=:]?\s*({NUMBER})(?:\s*([Mm]{{1,2}}|[Cc][Mm])\b)?)?"));

static REBAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:([0-9]+)\s*(?:(?i:adet)\s*)?)?{SYMBOL}\s*({NUMBER}){}",
        *LENGTH_SUFFIX
    ))
    .expect("valid rebar pattern")
});

static BARE_REBAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b([0-9]+)\s*(?i:adet)\s+({NUMBER})\b{}",
        *LENGTH_SUFFIX
    ))
    .expect("valid bare rebar pattern")
});

/// Captured label text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch<'t> {
    pub code: &'t str,
}

/// Captured stirrup fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StirrupMatch<'t> {
    pub diameter: &'t str,
    pub spacing: &'t str,
    pub span: Range<usize>,
}

/// Captured rebar fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebarMatch<'t> {
    pub count: Option<&'t str>,
    pub diameter: &'t str,
    pub length: Option<&'t str>,
    pub length_unit: Option<&'t str>,
}

/// Element label at the start of the annotation
pub fn recognize_label(text: &str) -> Option<LabelMatch<'_>> {
    LABEL_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| LabelMatch { code: m.as_str() })
}

/// First stirrup callout in the annotation
pub fn recognize_stirrup(text: &str) -> Option<StirrupMatch<'_>> {
    let caps = STIRRUP_PATTERN.captures(text)?;
    Some(StirrupMatch {
        diameter: caps.get(1)?.as_str(),
        spacing: caps.get(2)?.as_str(),
        span: caps.get(0)?.range(),
    })
}

/// First rebar callout in the annotation outside the `exclude` span.
///
/// The excluded span is blanked before matching, so its digits cannot be
/// read as part of a neighbouring callout. Callouts with a diameter symbol
/// take precedence; the symbol-less `<count> adet <diameter>` form is only
/// tried when none is found.
pub fn recognize_rebar<'t>(
    text: &'t str,
    exclude: Option<&Range<usize>>,
) -> Option<RebarMatch<'t>> {
    let blanked;
    let haystack = match exclude {
        Some(span)
            if span.start <= span.end
                && text.is_char_boundary(span.start)
                && text.is_char_boundary(span.end) =>
        {
            blanked = blank_span(text, span);
            blanked.as_str()
        }
        _ => text,
    };

    let caps = REBAR_PATTERN
        .captures(haystack)
        .or_else(|| BARE_REBAR_PATTERN.captures(haystack))?;
    // Blanking keeps byte offsets, so capture ranges index the original text
    let field = |i: usize| -> Option<&'t str> { caps.get(i).map(|m| &text[m.range()]) };
    Some(RebarMatch {
        count: field(1),
        diameter: field(2)?,
        length: field(3),
        length_unit: field(4),
    })
}

fn blank_span(text: &str, span: &Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.start]);
    out.extend(std::iter::repeat(' ').take(span.len()));
    out.push_str(&text[span.end..]);
    out
}
