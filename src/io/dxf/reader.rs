//! DXF annotation reader

mod entity_tracker;
mod tag;
mod text_reader;

pub use entity_tracker::{EntityTracker, TextEntity, TextEntityKind, TrackerState};
pub use tag::Tag;
pub use text_reader::DxfTextReader;

use crate::error::Result;
use crate::io::dxf::code_page::DEFAULT_FALLBACK_ENCODING;
use crate::notification::NotificationCollection;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads the text-bearing entities of an ASCII DXF stream.
///
/// ```rust,ignore
/// use rebar_takeoff::DxfReader;
///
/// let mut reader = DxfReader::from_file("plan.dxf")?;
/// for entity in reader.text_entities() {
///     let entity = entity?;
///     println!("{}: {}", entity.kind, entity.content);
/// }
/// ```
pub struct DxfReader<R: BufRead> {
    reader: DxfTextReader<R>,
}

impl<R: Read> DxfReader<BufReader<R>> {
    /// Create a new DXF reader from any reader
    pub fn from_reader(reader: R) -> Self {
        Self::from_buf_reader(BufReader::new(reader))
    }
}

impl DxfReader<BufReader<File>> {
    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: BufRead> DxfReader<R> {
    /// Create a new DXF reader from a buffered reader
    pub fn from_buf_reader(reader: R) -> Self {
        Self {
            reader: DxfTextReader::with_encoding(reader, DEFAULT_FALLBACK_ENCODING),
        }
    }

    /// Set the legacy encoding used until the drawing declares its own
    pub fn with_fallback_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.reader = DxfTextReader::with_encoding(self.reader.into_inner(), encoding);
        self
    }

    /// Lazily iterate over text-bearing entities in stream order
    pub fn text_entities(&mut self) -> TextEntities<'_, R> {
        TextEntities {
            tags: &mut self.reader,
            tracker: Some(EntityTracker::new()),
        }
    }

    /// Read every text-bearing entity
    pub fn read_text_entities(&mut self) -> Result<Vec<TextEntity>> {
        self.text_entities().collect()
    }

    /// Take the notifications recorded while reading
    pub fn take_notifications(&mut self) -> NotificationCollection {
        self.reader.take_notifications()
    }
}

/// Iterator over the text-bearing entities of a stream
pub struct TextEntities<'a, R: BufRead> {
    tags: &'a mut DxfTextReader<R>,
    tracker: Option<EntityTracker>,
}

impl<R: BufRead> Iterator for TextEntities<'_, R> {
    type Item = Result<TextEntity>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tracker = self.tracker.as_mut()?;
            match self.tags.read_tag() {
                Ok(Some(tag)) => {
                    if let Some(entity) = tracker.feed(tag) {
                        return Some(Ok(entity));
                    }
                }
                Ok(None) => return self.tracker.take().and_then(EntityTracker::finish).map(Ok),
                Err(e) => {
                    self.tracker = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_entities_from_stream() {
        let data = concat!(
            "0\nSECTION\n2\nENTITIES\n",
            "0\nTEXT\n1\n20 Ø12 L=340\n",
            "0\nLINE\n10\n0.0\n",
            "0\nMTEXT\n1\nØ8/15\n",
            "0\nENDSEC\n0\nEOF\n",
        );
        let mut reader = DxfReader::from_reader(Cursor::new(data));
        let entities = reader.read_text_entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].content, "20 Ø12 L=340");
        assert_eq!(entities[1].kind, TextEntityKind::MText);
    }

    #[test]
    fn test_stream_without_eof_marker() {
        let mut reader = DxfReader::from_reader(Cursor::new("0\nTEXT\n1\n14 adet Q16\n"));
        let entities = reader.read_text_entities().unwrap();
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_iterator_is_fused_after_end() {
        let mut reader = DxfReader::from_reader(Cursor::new("0\nTEXT\n1\nØ8/15\n"));
        let mut entities = reader.text_entities();
        assert!(entities.next().is_some());
        assert!(entities.next().is_none());
        assert!(entities.next().is_none());
    }

    #[test]
    fn test_fallback_encoding_applied() {
        let bytes: &[u8] = b"0\nTEXT\n1\nd\xFEeme\n";
        let mut reader =
            DxfReader::from_reader(bytes).with_fallback_encoding(encoding_rs::WINDOWS_1254);
        assert_eq!(reader.read_text_entities().unwrap()[0].content, "dşeme");
    }

    #[test]
    fn test_from_missing_file_fails() {
        assert!(DxfReader::from_file("does-not-exist.dxf").is_err());
    }
}
