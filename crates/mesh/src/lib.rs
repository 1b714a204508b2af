//! Grid geometry and rectangle decomposition
//!
//! Integer-grid layers (collision masks, zone maps) arrive as flat
//! row-major value arrays. This crate reshapes them into a [`Grid`] and
//! decomposes the grid into axis-aligned rectangles ([`Wall`]s) that
//! downstream code can use for collision or culling:
//!
//! - [`naive_mesh`] emits one 1x1 rectangle per cell, unfiltered.
//! - [`greedy_mesh`] merges runs of equal cells into maximal rectangles,
//!   skipping zero cells and any values in the [`IgnoredValues`] set.
//!
//! [`MeshStrategy`] selects between the two at runtime.

pub mod grid;
pub mod mesh;
pub mod rect;

pub use grid::{Grid, GridError};
pub use mesh::{greedy_mesh, naive_mesh, IgnoredValues, MeshStrategy, Wall};
pub use rect::Rect;
