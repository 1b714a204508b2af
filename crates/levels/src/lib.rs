//! # LDtk Level Loading
//!
//! This crate loads levels produced by the LDtk design tool into plain
//! owned structures, ready for a game's collision and rendering code.
//!
//! ## Features
//! - Single-file projects (levels embedded in the main `.ldtk`/`.json`
//!   file) and multi-file projects (one `.ldtkl` file per level)
//! - Tile, auto, integer-grid, and entity layer decoding
//! - Wall decomposition of integer-grid layers, naive or greedy
//! - Neighbor resolution to level names
//! - Designer-defined custom fields on levels and entities
//! - Selective teardown that salvages chosen parts of a level
//!
//! ## Project Format
//!
//! A project is a JSON document with the project flags read here:
//! - **worldLayout**: world arrangement (grid-vania, strips, free)
//! - **externalLevels / simplifiedExport**: where level documents live
//! - **imageExportMode**: which pre-rendered images exist
//! - **levels**: per-level headers (`identifier`, `iid`), and in
//!   single-file projects the full level bodies
//!
//! Nothing is cached: every operation re-reads its source file, so a
//! project being edited on disk is always read fresh.

pub mod color;
pub mod config;
mod decode;
mod doc;
pub mod error;
pub mod fields;
pub mod layer;
pub mod level;
pub mod loader;

pub use color::Rgb;
pub use config::{
    ImageExport, LoadOptions, MalformedEntryPolicy, ProjectConfig, ProjectExtension,
    StorageLayout, WorldLayout, LEVEL_EXTENSION,
};
pub use error::{LevelError, Result};
pub use fields::{CustomFields, FieldValue};
pub use layer::{Entity, Flip, Layer, LayerContent, LayerKind, Tile};
pub use level::{Keep, Level, Neighbor, Retained};
pub use loader::Loader;

pub use ldtk_mesh::{Grid, GridError, IgnoredValues, MeshStrategy, Rect, Wall};
