//! DXF (Drawing Exchange Format) annotation scanning

pub mod code_page;
mod dxf_code;
mod reader;
pub mod text_format;

pub use dxf_code::DxfCode;
pub use reader::{
    DxfReader, DxfTextReader, EntityTracker, Tag, TextEntities, TextEntity, TextEntityKind,
    TrackerState,
};
