//! DXF code/value pair

use crate::io::dxf::DxfCode;

/// A single DXF code/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The DXF group code
    pub code: i32,

    /// The DXF code enum
    pub dxf_code: DxfCode,

    /// The value line with caret escapes decoded
    pub value: String,
}

impl Tag {
    /// Create a new code/value pair
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            dxf_code: DxfCode::from_i32(code),
            value: value.into(),
        }
    }

    /// Whether this tag starts a new entity, table or section
    pub fn is_boundary(&self) -> bool {
        self.dxf_code == DxfCode::Start
    }
}
