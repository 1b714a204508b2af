//! Project configuration
//!
//! A project is configured once, when the loader opens the main file:
//! caller options are combined with the flags the design tool wrote
//! into the document (world layout, external level storage, image
//! export mode). Everything downstream reads the resolved
//! [`ProjectConfig`] and never re-inspects the main document's flags.

use std::path::{Path, PathBuf};

use ldtk_mesh::MeshStrategy;
use serde_json::Value;
use tracing::debug;

use crate::doc::{opt_str, require_bool, require_str};
use crate::error::{LevelError, Result};

/// File extension of external level files, independent of the main
/// file's extension.
pub const LEVEL_EXTENSION: &str = "ldtkl";

/// Compose the main file path for a project.
pub(crate) fn compose_main_file(dir: &Path, name: &str, extension: ProjectExtension) -> PathBuf {
    dir.join(format!("{}.{}", name, extension.as_str()))
}

/// Extension of the main project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectExtension {
    /// Native `.ldtk` extension
    #[default]
    Ldtk,

    /// Plain `.json` export
    Json,
}

impl ProjectExtension {
    /// The extension string, without the dot
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectExtension::Ldtk => "ldtk",
            ProjectExtension::Json => "json",
        }
    }
}

/// How level documents are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageLayout {
    /// All levels are embedded in the main file's `levels` array
    SingleFile,

    /// Each level lives in its own `.ldtkl` file next to the main file
    MultiFile,
}

/// World arrangement declared by the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldLayout {
    /// Levels on a world grid
    GridVania,

    /// Levels in a horizontal strip
    Horizontal,

    /// Levels in a vertical strip
    Vertical,

    /// Free placement
    Free,
}

impl WorldLayout {
    /// Parse a `worldLayout` value.
    ///
    /// Accepts the tool's identifiers (`GridVania`, `LinearHorizontal`,
    /// `LinearVertical`, `Free`) case-insensitively, along with the
    /// short `horizontal`/`vertical` forms older exports used.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "gridvania" => Ok(WorldLayout::GridVania),
            "horizontal" | "linearhorizontal" => Ok(WorldLayout::Horizontal),
            "vertical" | "linearvertical" => Ok(WorldLayout::Vertical),
            "free" => Ok(WorldLayout::Free),
            _ => Err(LevelError::UnknownLayout(name.to_string())),
        }
    }
}

/// Which images the project was exported with.
///
/// Parsed and kept for callers that locate pre-rendered level images;
/// the loader itself never touches image files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageExport {
    /// No image export
    #[default]
    None,

    /// One image per layer
    Layers,

    /// One composite image per level
    Levels,

    /// Both per-layer and per-level images
    LayersAndLevels,
}

impl ImageExport {
    /// Parse an `imageExportMode` value; unrecognized modes read as
    /// [`ImageExport::None`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Layers" | "OneImagePerLayer" => ImageExport::Layers,
            "Levels" | "OneImagePerLevel" => ImageExport::Levels,
            "LayersAndLevels" => ImageExport::LayersAndLevels,
            _ => ImageExport::None,
        }
    }
}

/// How to treat sibling entries that lack the field a scan matches on
/// (a level without an `iid`, a layer without a type tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedEntryPolicy {
    /// Log the entry and keep scanning
    #[default]
    Skip,

    /// Abort the operation with an error
    Fail,
}

/// Caller-side options for opening a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Edge length of a grid cell, in pixels
    pub tile_size: u32,

    /// Main file extension to look for
    pub extension: ProjectExtension,

    /// Decomposition strategy for integer-grid layers
    pub mesh: MeshStrategy,

    /// Treatment of malformed sibling entries during scans
    pub malformed_entries: MalformedEntryPolicy,

    /// Reserved for projects with multiple worlds; currently unused
    pub multi_world: bool,

    /// Reserved for partitioned grid decoding; currently unused
    pub grid_partition: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            tile_size: 16,
            extension: ProjectExtension::default(),
            mesh: MeshStrategy::default(),
            malformed_entries: MalformedEntryPolicy::default(),
            multi_world: false,
            grid_partition: false,
        }
    }
}

/// Resolved per-project configuration.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Directory holding the main file
    pub project_dir: PathBuf,

    /// Main file name without extension
    pub project_name: String,

    /// Edge length of a grid cell, in pixels
    pub tile_size: u32,

    /// Main file extension
    pub extension: ProjectExtension,

    /// World arrangement from `worldLayout`
    pub world_layout: WorldLayout,

    /// Where level documents live
    pub storage: StorageLayout,

    /// Exported image variants from `imageExportMode`
    pub image_export: ImageExport,

    /// Decomposition strategy for integer-grid layers
    pub mesh: MeshStrategy,

    /// Treatment of malformed sibling entries during scans
    pub malformed_entries: MalformedEntryPolicy,

    /// Reserved; currently unused
    pub multi_world: bool,

    /// Reserved; currently unused
    pub grid_partition: bool,
}

impl ProjectConfig {
    /// Combine caller options with the main document's project flags.
    ///
    /// `externalLevels` selects multi-file storage, except that a
    /// simplified export always keeps its levels in the main file.
    /// `simplifiedExport` defaults to false when absent;
    /// `externalLevels` and `worldLayout` are required.
    pub(crate) fn resolve(
        project_dir: PathBuf,
        project_name: String,
        options: LoadOptions,
        doc: &Value,
    ) -> Result<Self> {
        let layout_name = require_str(doc, "worldLayout", "project document")?;
        let world_layout = WorldLayout::from_name(layout_name)?;

        let external = require_bool(doc, "externalLevels", "project document")?;
        let simplified = doc
            .get("simplifiedExport")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let storage = if external && !simplified {
            StorageLayout::MultiFile
        } else {
            StorageLayout::SingleFile
        };

        let image_export = opt_str(doc, "imageExportMode")
            .map(ImageExport::from_name)
            .unwrap_or_default();

        debug!(
            "Resolved project '{}': layout={:?} storage={:?} images={:?}",
            project_name, world_layout, storage, image_export
        );

        Ok(Self {
            project_dir,
            project_name,
            tile_size: options.tile_size,
            extension: options.extension,
            world_layout,
            storage,
            image_export,
            mesh: options.mesh,
            malformed_entries: options.malformed_entries,
            multi_world: options.multi_world,
            grid_partition: options.grid_partition,
        })
    }

    /// Path of the main project file
    pub fn main_file(&self) -> PathBuf {
        compose_main_file(&self.project_dir, &self.project_name, self.extension)
    }

    /// Path of an external level file
    pub fn level_file(&self, level_name: &str) -> PathBuf {
        self.project_dir
            .join(&self.project_name)
            .join(format!("{level_name}.{LEVEL_EXTENSION}"))
    }
}
