//! Shared test utilities for rebar-takeoff integration tests.
//!
//! Builds ASCII DXF streams with the section framing a real export carries,
//! so tests read the same shape of input the library sees in production.

#![allow(dead_code)]

use rebar_takeoff::{analyze, Takeoff, TakeoffConfiguration};

/// Builder for a minimal ASCII DXF document
#[derive(Debug, Default)]
pub struct DxfBuilder {
    header: Vec<(i32, String)>,
    entities: Vec<(i32, String)>,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `$DWGCODEPAGE` in the header
    pub fn code_page(mut self, code_page: &str) -> Self {
        self.header.push((9, "$DWGCODEPAGE".into()));
        self.header.push((3, code_page.into()));
        self
    }

    /// Add a TEXT entity with geometry and layer noise around its content
    pub fn text(mut self, content: &str) -> Self {
        self.entities.extend([
            (0, "TEXT".to_string()),
            (5, "2A".into()),
            (8, "DONATI".into()),
            (10, "125.0".into()),
            (20, "48.5".into()),
            (40, "2.5".into()),
            (1, content.into()),
        ]);
        self
    }

    /// Add an MTEXT entity whose content is split into continuation chunks
    pub fn mtext(mut self, chunks: &[&str], last: &str) -> Self {
        self.entities.push((0, "MTEXT".into()));
        self.entities.push((8, "DONATI".into()));
        for chunk in chunks {
            self.entities.push((3, chunk.to_string()));
        }
        self.entities.push((1, last.into()));
        self.entities.push((7, "STANDARD".into()));
        self
    }

    /// Add a block reference followed by one attribute
    pub fn insert_with_attrib(mut self, value: &str) -> Self {
        self.entities.extend([
            (0, "INSERT".to_string()),
            (2, "ETIKET".into()),
            (66, "1".into()),
            (0, "ATTRIB".into()),
            (2, "POZ".into()),
            (1, value.into()),
            (0, "SEQEND".into()),
        ]);
        self
    }

    /// Add a non-text entity
    pub fn line(mut self) -> Self {
        self.entities.extend([
            (0, "LINE".to_string()),
            (8, "0".into()),
            (10, "0.0".into()),
            (20, "0.0".into()),
            (11, "100.0".into()),
            (21, "0.0".into()),
        ]);
        self
    }

    /// Add a raw line pair, used to inject malformed input
    pub fn raw(mut self, code: &str, value: &str) -> Self {
        self.entities.push((i32::MIN, format!("{code}\n{value}")));
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        let mut push = |code: i32, value: &str| {
            if code == i32::MIN {
                out.push_str(&format!("{value}\n"));
            } else {
                out.push_str(&format!("{:>3}\n{}\n", code, value));
            }
        };
        push(0, "SECTION");
        push(2, "HEADER");
        push(9, "$ACADVER");
        push(1, "AC1015");
        for (code, value) in &self.header {
            push(*code, value);
        }
        push(0, "ENDSEC");
        push(0, "SECTION");
        push(2, "ENTITIES");
        for (code, value) in &self.entities {
            push(*code, value);
        }
        push(0, "ENDSEC");
        push(0, "EOF");
        out
    }

    /// Build and encode the document with a legacy 8-bit encoding
    pub fn build_encoded(&self, encoding: &'static encoding_rs::Encoding) -> Vec<u8> {
        let text = self.build();
        let (bytes, _, _) = encoding.encode(&text);
        bytes.into_owned()
    }
}

/// Run a takeoff with the default configuration
pub fn takeoff(dxf: &str) -> Takeoff {
    analyze(dxf.as_bytes(), &TakeoffConfiguration::default()).expect("in-memory read cannot fail")
}

/// Takeoff of a document holding one TEXT entity per annotation
pub fn takeoff_of(annotations: &[&str]) -> Takeoff {
    let builder = annotations
        .iter()
        .fold(DxfBuilder::new(), |b, text| b.text(text));
    takeoff(&builder.build())
}
