//! I/O module for scanning annotation text out of DXF files

pub mod dxf;

pub use dxf::{DxfReader, TextEntity, TextEntityKind};
