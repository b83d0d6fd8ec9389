//! Text-bearing entity boundary tracking

use super::tag::Tag;
use crate::io::dxf::text_format::clean_text;
use log::trace;
use serde::Serialize;
use std::fmt;

/// Entity types whose content is a human-readable annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextEntityKind {
    /// Single-line text
    Text,
    /// Multi-line text
    MText,
    /// Block attribute value
    Attrib,
    /// Block reference
    Insert,
}

impl TextEntityKind {
    /// Recognize an entity type name from a code-0 value
    pub fn from_entity_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "TEXT" => Some(Self::Text),
            "MTEXT" => Some(Self::MText),
            "ATTRIB" => Some(Self::Attrib),
            "INSERT" => Some(Self::Insert),
            _ => None,
        }
    }

    /// DXF entity type name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::MText => "MTEXT",
            Self::Attrib => "ATTRIB",
            Self::Insert => "INSERT",
        }
    }
}

impl fmt::Display for TextEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaned annotation content of one text-bearing entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntity {
    /// Entity type that carried the content
    pub kind: TextEntityKind,
    /// Content fragments joined by single spaces, formatting removed
    pub content: String,
}

/// Tracker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Between entities, or inside an entity that carries no annotation
    Outside,
    /// Inside a text-bearing entity
    InsideTextEntity(TextEntityKind),
}

/// State machine that turns a tag sequence into [`TextEntity`] values.
///
/// Feed every tag in stream order with [`EntityTracker::feed`], then call
/// [`EntityTracker::finish`] for the entity left open at end of input.
#[derive(Debug)]
pub struct EntityTracker {
    state: TrackerState,
    content: String,
}

impl EntityTracker {
    /// Create a tracker in the `Outside` state
    pub fn new() -> Self {
        Self {
            state: TrackerState::Outside,
            content: String::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Consume one tag, returning the entity it closed, if any.
    pub fn feed(&mut self, tag: Tag) -> Option<TextEntity> {
        if tag.is_boundary() {
            let closed = self.take_entity();
            self.state = match TextEntityKind::from_entity_name(&tag.value) {
                Some(kind) => TrackerState::InsideTextEntity(kind),
                None => TrackerState::Outside,
            };
            return closed;
        }

        let inside = matches!(self.state, TrackerState::InsideTextEntity(_));
        if inside && tag.dxf_code.is_text_content() {
            let fragment = clean_text(&tag.value);
            if !fragment.is_empty() {
                if !self.content.is_empty() {
                    self.content.push(' ');
                }
                self.content.push_str(&fragment);
            }
        }
        None
    }

    /// Emit the entity still open at end of input, if it has content
    pub fn finish(mut self) -> Option<TextEntity> {
        self.take_entity()
    }

    fn take_entity(&mut self) -> Option<TextEntity> {
        let content = std::mem::take(&mut self.content);
        match self.state {
            TrackerState::InsideTextEntity(kind) if !content.is_empty() => {
                trace!("{} entity: '{}'", kind, content);
                Some(TextEntity { kind, content })
            }
            _ => None,
        }
    }
}

impl Default for EntityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tags: &[(i32, &str)]) -> Vec<TextEntity> {
        let mut tracker = EntityTracker::new();
        let mut out: Vec<TextEntity> = tags
            .iter()
            .filter_map(|&(code, value)| tracker.feed(Tag::new(code, value)))
            .collect();
        out.extend(tracker.finish());
        out
    }

    #[test]
    fn test_single_text_entity() {
        let entities = run(&[
            (0, "TEXT"),
            (8, "DONATI"),
            (10, "1.0"),
            (1, "20 Ø12 L=340"),
            (0, "ENDSEC"),
        ]);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, TextEntityKind::Text);
        assert_eq!(entities[0].content, "20 Ø12 L=340");
    }

    #[test]
    fn test_mtext_chunks_joined() {
        let entities = run(&[(0, "MTEXT"), (3, "S101\\P"), (1, "20Ø12")]);
        assert_eq!(entities[0].content, "S101 20Ø12");
    }

    #[test]
    fn test_non_text_entities_ignored() {
        let entities = run(&[(0, "LINE"), (1, "20 Ø12"), (0, "CIRCLE"), (3, "x"), (0, "EOF")]);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_empty_entity_not_emitted() {
        let entities = run(&[(0, "TEXT"), (1, "{\\H2;}"), (0, "INSERT"), (2, "BLOCK"), (0, "EOF")]);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_unclosed_entity_emitted_at_end() {
        let entities = run(&[(0, "ATTRIB"), (2, "TAG"), (1, "Ø8/15")]);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, TextEntityKind::Attrib);
        assert_eq!(entities[0].content, "Ø8/15");
    }

    #[test]
    fn test_state_transitions() {
        let mut tracker = EntityTracker::new();
        assert_eq!(tracker.state(), TrackerState::Outside);
        tracker.feed(Tag::new(0, "mtext"));
        assert_eq!(tracker.state(), TrackerState::InsideTextEntity(TextEntityKind::MText));
        tracker.feed(Tag::new(0, "LWPOLYLINE"));
        assert_eq!(tracker.state(), TrackerState::Outside);
    }

    #[test]
    fn test_consecutive_entities() {
        let entities = run(&[
            (0, "TEXT"),
            (1, "K101"),
            (0, "TEXT"),
            (1, "4Ø16"),
            (0, "TEXT"),
            (1, "4Ø14"),
        ]);
        let contents: Vec<_> = entities.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, ["K101", "4Ø16", "4Ø14"]);
    }
}
