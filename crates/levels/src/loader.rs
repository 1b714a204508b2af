//! Project loader
//!
//! A [`Loader`] opens one project and hands out fully assembled
//! [`Level`]s. It keeps no document state between calls: every load
//! and every name lookup re-reads the relevant file, so edits on disk
//! are picked up without any invalidation machinery. The only mutable
//! state is the set of ignored grid values.

use std::io;
use std::path::Path;

use ldtk_mesh::{IgnoredValues, Rect};
use serde_json::Value;
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::config::{
    compose_main_file, LoadOptions, MalformedEntryPolicy, ProjectConfig, StorageLayout,
};
use crate::decode;
use crate::doc::{opt_str, read_document, require_i64, require_str};
use crate::error::{LevelError, Result};
use crate::fields::CustomFields;
use crate::layer::LayerKind;
use crate::level::{Level, Neighbor};

/// Loads levels from one project.
#[derive(Debug)]
pub struct Loader {
    config: ProjectConfig,
    ignored: IgnoredValues,
}

impl Loader {
    /// Open a project by directory and name.
    ///
    /// Reads the main file once to resolve the project configuration
    /// (world layout, storage, image export). The ignored-value set
    /// starts out holding only zero.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding the main file
    /// * `project_name` - Main file name without extension
    /// * `options` - Caller-side options
    pub fn new<P: AsRef<Path>>(
        project_dir: P,
        project_name: &str,
        options: LoadOptions,
    ) -> Result<Self> {
        let project_dir = project_dir.as_ref().to_path_buf();
        let main_file = compose_main_file(&project_dir, project_name, options.extension);
        let doc = read_document(&main_file)?;
        let config = ProjectConfig::resolve(project_dir, project_name.to_string(), options, &doc)?;

        Ok(Self {
            config,
            ignored: IgnoredValues::default(),
        })
    }

    /// The resolved project configuration
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Exclude a grid value from wall decomposition in later loads
    pub fn ignore_grid_value(&mut self, value: i32) {
        self.ignored.ignore(value);
    }

    /// Resolve a level's identifier from its stable instance id.
    ///
    /// Scans the main file's `levels` array; in multi-file projects
    /// that array still carries every level's header fields.
    pub fn level_name_by_iid(&self, iid: &str) -> Result<String> {
        let doc = read_document(&self.config.main_file())?;
        let levels = levels_array(&doc)?;

        for (index, entry) in levels.iter().enumerate() {
            let Some(entry_iid) = opt_str(entry, "iid") else {
                self.malformed_entry(index, "iid", "levels array")?;
                continue;
            };
            if entry_iid == iid {
                return Ok(require_str(entry, "identifier", "levels array entry")?.to_string());
            }
        }
        Err(LevelError::NotFound(iid.to_string()))
    }

    /// Identifiers of every level in the project, in document order.
    pub fn level_names(&self) -> Result<Vec<String>> {
        let doc = read_document(&self.config.main_file())?;
        let levels = levels_array(&doc)?;

        let mut names = Vec::with_capacity(levels.len());
        for (index, entry) in levels.iter().enumerate() {
            match opt_str(entry, "identifier") {
                Some(name) => names.push(name.to_string()),
                None => self.malformed_entry(index, "identifier", "levels array")?,
            }
        }
        Ok(names)
    }

    /// Load and assemble a level by identifier.
    ///
    /// # Returns
    /// The assembled [`Level`], or an error if the level cannot be
    /// found or any required field is missing; a failed load never
    /// yields a partial level.
    pub fn load_level(&self, name: &str) -> Result<Level> {
        let mut doc = self.level_document(name)?;
        let context = format!("level '{name}'");

        let iid = require_str(&doc, "iid", &context)?.to_string();
        let bg_tile_path = opt_str(&doc, "bgRelPath").map(str::to_string);
        let rect = Rect::new(
            require_i64(&doc, "worldX", &context)? as i32,
            require_i64(&doc, "worldY", &context)? as i32,
            require_i64(&doc, "pxWid", &context)? as i32,
            require_i64(&doc, "pxHei", &context)? as i32,
        );
        let resolved_name = self.level_name_by_iid(&iid)?;
        let neighbors = self.neighbors(&doc)?;
        let fields = doc
            .as_object_mut()
            .and_then(|obj| obj.remove("fieldInstances"))
            .map(CustomFields::new)
            .unwrap_or_default();
        let color = background_color(&doc, name)?;

        let mut walls = Vec::new();
        let mut layers = Vec::new();
        for (index, mut node) in take_layer_nodes(&mut doc).into_iter().enumerate() {
            let Some(tag) = opt_str(&node, "__type").map(str::to_string) else {
                match self.config.malformed_entries {
                    MalformedEntryPolicy::Skip => {
                        warn!("Skipping layer {index}: no type tag");
                        continue;
                    }
                    MalformedEntryPolicy::Fail => {
                        return Err(LevelError::MissingLayerKind { index });
                    }
                }
            };

            let z = index as u32;
            let origin = (rect.x, rect.y);
            match LayerKind::from_tag(&tag) {
                Some(LayerKind::AutoLayer) => {
                    layers.push(decode::tile_layer(&mut node, "autoLayerTiles", z, origin)?);
                }
                Some(LayerKind::Tiles) => {
                    layers.push(decode::tile_layer(&mut node, "gridTiles", z, origin)?);
                }
                Some(LayerKind::IntGrid) => {
                    walls.extend(decode::int_grid(&node, self.config.mesh, &self.ignored)?);
                    layers.push(decode::tile_layer(&mut node, "autoLayerTiles", z, origin)?);
                }
                Some(LayerKind::Entities) => {
                    layers.push(decode::entity_layer(&mut node, z)?);
                }
                None => {
                    warn!("Skipping layer {index} of unknown kind '{tag}'");
                }
            }
        }

        debug!(
            "Loaded level '{}': {} layers, {} walls, {} neighbors",
            resolved_name,
            layers.len(),
            walls.len(),
            neighbors.len()
        );

        Ok(Level {
            iid,
            name: resolved_name,
            rect,
            color,
            bg_tile_path,
            fields,
            walls,
            layers,
            neighbors,
        })
    }

    /// Fetch a level's raw document by identifier.
    fn level_document(&self, name: &str) -> Result<Value> {
        match self.config.storage {
            StorageLayout::MultiFile => {
                let path = self.config.level_file(name);
                match read_document(&path) {
                    Err(LevelError::FileError(e)) if e.kind() == io::ErrorKind::NotFound => {
                        Err(LevelError::NotFound(name.to_string()))
                    }
                    other => other,
                }
            }
            StorageLayout::SingleFile => {
                let mut doc = read_document(&self.config.main_file())?;
                let Some(levels) = doc.get_mut("levels").and_then(Value::as_array_mut) else {
                    return Err(LevelError::missing("levels", "project document"));
                };

                for (index, entry) in levels.iter_mut().enumerate() {
                    let matches = match opt_str(entry, "identifier") {
                        Some(identifier) => identifier == name,
                        None => {
                            self.malformed_entry(index, "identifier", "levels array")?;
                            false
                        }
                    };
                    if matches {
                        return Ok(entry.take());
                    }
                }
                Err(LevelError::NotFound(name.to_string()))
            }
        }
    }

    /// Resolve the `__neighbours` list into named neighbors.
    ///
    /// An absent list is an isolated level, not an error. Unresolvable
    /// neighbor ids fail the load; a project that names a missing
    /// level is inconsistent.
    fn neighbors(&self, doc: &Value) -> Result<Vec<Neighbor>> {
        let Some(entries) = doc.get("__neighbours").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        let mut neighbors = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match (opt_str(entry, "levelIid"), opt_str(entry, "dir")) {
                (Some(iid), Some(dir)) => neighbors.push(Neighbor {
                    name: self.level_name_by_iid(iid)?,
                    dir: dir.to_string(),
                }),
                (None, _) => self.malformed_entry(index, "levelIid", "neighbour list")?,
                (_, None) => self.malformed_entry(index, "dir", "neighbour list")?,
            }
        }
        Ok(neighbors)
    }

    /// Apply the malformed-entry policy to a scan entry lacking `field`.
    fn malformed_entry(&self, index: usize, field: &'static str, context: &str) -> Result<()> {
        match self.config.malformed_entries {
            MalformedEntryPolicy::Skip => {
                warn!("Skipping {context} entry {index}: no '{field}'");
                Ok(())
            }
            MalformedEntryPolicy::Fail => {
                Err(LevelError::missing(field, format!("{context} entry {index}")))
            }
        }
    }
}

/// The `levels` array of a main document.
fn levels_array(doc: &Value) -> Result<&Vec<Value>> {
    doc.get("levels")
        .and_then(Value::as_array)
        .ok_or_else(|| LevelError::missing("levels", "project document"))
}

/// Move the `layerInstances` array out of a level document.
///
/// Main files of multi-file projects keep `layerInstances` null in
/// their level headers; an absent or null array means no layers.
fn take_layer_nodes(doc: &mut Value) -> Vec<Value> {
    match doc
        .as_object_mut()
        .and_then(|obj| obj.remove("layerInstances"))
    {
        Some(Value::Array(nodes)) => nodes,
        _ => Vec::new(),
    }
}

/// Pick the level background color: the level's own `bgColor` when
/// set, otherwise the project default `__bgColor`.
fn background_color(doc: &Value, name: &str) -> Result<Rgb> {
    match opt_str(doc, "bgColor").or_else(|| opt_str(doc, "__bgColor")) {
        Some(hex) => Rgb::from_hex(hex),
        None => Err(LevelError::MissingBackgroundColor(name.to_string())),
    }
}
