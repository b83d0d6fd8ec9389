//! DXF group codes
//!
//! Group codes define the meaning of the value line that follows them.
//! The scanner only distinguishes the handful of codes that bound entities
//! or carry annotation text; everything else is passed through as
//! [`DxfCode::Other`] and ignored downstream.

/// DXF group codes relevant to annotation extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DxfCode {
    /// Text string indicating the entity type (fixed)
    Start,

    /// Primary text value for an entity
    Text,

    /// Name (attribute tag, block name, section name)
    Name,

    /// Additional text chunks (MTEXT content longer than 250 characters)
    TextContinuation,

    /// Layer name
    LayerName,

    /// Header variable name (`$ACADVER`, `$DWGCODEPAGE`, ...)
    HeaderVariable,

    /// Any code the scanner does not interpret
    Other(i32),
}

impl DxfCode {
    /// Convert an i32 to DxfCode
    pub fn from_i32(code: i32) -> Self {
        match code {
            0 => DxfCode::Start,
            1 => DxfCode::Text,
            2 => DxfCode::Name,
            3 => DxfCode::TextContinuation,
            8 => DxfCode::LayerName,
            9 => DxfCode::HeaderVariable,
            other => DxfCode::Other(other),
        }
    }

    /// Convert DxfCode to i32
    pub fn to_i32(self) -> i32 {
        match self {
            DxfCode::Start => 0,
            DxfCode::Text => 1,
            DxfCode::Name => 2,
            DxfCode::TextContinuation => 3,
            DxfCode::LayerName => 8,
            DxfCode::HeaderVariable => 9,
            DxfCode::Other(code) => code,
        }
    }

    /// Whether values under this code contribute to a text entity's content
    pub fn is_text_content(self) -> bool {
        matches!(self, DxfCode::Text | DxfCode::TextContinuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_known_codes() {
        for code in [0, 1, 2, 3, 8, 9, 10, 40, 1000] {
            assert_eq!(DxfCode::from_i32(code).to_i32(), code);
        }
    }

    #[test]
    fn test_text_content_codes() {
        assert!(DxfCode::Text.is_text_content());
        assert!(DxfCode::TextContinuation.is_text_content());
        assert!(!DxfCode::Name.is_text_content());
        assert!(!DxfCode::from_i32(7).is_text_content());
    }
}
