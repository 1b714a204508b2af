//! Layer decoders
//!
//! Three decoders turn raw layer nodes into the layer model: tile
//! decoding (shared by tile, auto, and integer-grid layers, each of
//! which stores its tiles under a different key), entity decoding, and
//! integer-grid decoding, which reshapes the flat CSV payload and
//! hands it to the rectangle decomposition.
//!
//! Tile decoding consumes the `px`, `src`, `t`, and `f` fields out of
//! each source tile node as it reads them; the gutted nodes only live
//! until the raw document is dropped at the end of assembly.

use ldtk_mesh::{Grid, IgnoredValues, MeshStrategy, Rect, Wall};
use serde_json::{Map, Value};

use crate::color::Rgb;
use crate::doc::{opt_str, require_i64, require_str};
use crate::error::{LevelError, Result};
use crate::fields::CustomFields;
use crate::layer::{Entity, Flip, Layer, LayerContent, Tile};

/// Rewrite a tileset relative path to the runtime asset location,
/// keeping only the file name.
fn tileset_asset_path(rel_path: &str) -> String {
    let base = match rel_path.rfind('/') {
        Some(i) => &rel_path[i + 1..],
        None => rel_path,
    };
    format!("assets/Tiles/{base}")
}

/// Decode a tile-bearing layer.
///
/// `tile_key` names the array the source layer keeps its tiles under
/// (`gridTiles` for hand-placed layers, `autoLayerTiles` for auto and
/// integer-grid layers). A missing array yields an empty layer.
/// `origin` is the level's world pixel position; tile positions are
/// stored level-relative and are shifted into world space here.
pub(crate) fn tile_layer(
    layer: &mut Value,
    tile_key: &str,
    z: u32,
    origin: (i32, i32),
) -> Result<Layer> {
    let identifier = require_str(layer, "__identifier", "tile layer")?.to_string();
    let tile_size = require_i64(layer, "__gridSize", "tile layer")? as u32;
    let tileset_path = opt_str(layer, "__tilesetRelPath").map(tileset_asset_path);

    let mut tiles = Vec::new();
    if let Some(Value::Array(entries)) = layer.get_mut(tile_key) {
        tiles.reserve(entries.len());
        for (index, entry) in entries.iter_mut().enumerate() {
            tiles.push(decode_tile(entry, index, origin)?);
        }
    }

    Ok(Layer {
        identifier,
        z,
        tile_size,
        tileset_path,
        content: LayerContent::Tiles(tiles),
    })
}

fn decode_tile(entry: &mut Value, index: usize, origin: (i32, i32)) -> Result<Tile> {
    let Some(tile) = entry.as_object_mut() else {
        return Err(LevelError::missing("px", format!("tile {index}")));
    };
    let (x, y) = take_pair(tile, "px", index)?;
    let (sx, sy) = take_pair(tile, "src", index)?;
    let tile_index = take_i64(tile, "t", index)?;
    let flip_code = take_i64(tile, "f", index)?;

    Ok(Tile {
        rect: Rect::new(origin.0 + x, origin.1 + y, 0, 0),
        src: Rect::new(sx, sy, 0, 0),
        index: tile_index as u32,
        flip: Flip::from_code(flip_code as u8),
    })
}

/// Remove a two-element coordinate array from a tile node.
fn take_pair(
    tile: &mut Map<String, Value>,
    field: &'static str,
    index: usize,
) -> Result<(i32, i32)> {
    let value = tile
        .remove(field)
        .ok_or_else(|| LevelError::missing(field, format!("tile {index}")))?;
    let coord = |at: usize| {
        value
            .get(at)
            .and_then(Value::as_i64)
            .map(|n| n as i32)
            .ok_or_else(|| LevelError::missing(field, format!("tile {index}")))
    };
    Ok((coord(0)?, coord(1)?))
}

/// Remove an integer field from a tile node.
fn take_i64(tile: &mut Map<String, Value>, field: &'static str, index: usize) -> Result<i64> {
    tile.remove(field)
        .as_ref()
        .and_then(Value::as_i64)
        .ok_or_else(|| LevelError::missing(field, format!("tile {index}")))
}

/// Decode an entity layer.
///
/// Entity positions are stored world-absolute, so no origin shift is
/// applied. Each entity's `fieldInstances` subtree is moved out of the
/// document and into the entity.
pub(crate) fn entity_layer(layer: &mut Value, z: u32) -> Result<Layer> {
    let identifier = require_str(layer, "__identifier", "entity layer")?.to_string();

    let mut entities = Vec::new();
    if let Some(Value::Array(entries)) = layer.get_mut("entityInstances") {
        entities.reserve(entries.len());
        for (index, entry) in entries.iter_mut().enumerate() {
            entities.push(decode_entity(entry, index)?);
        }
    }

    Ok(Layer {
        identifier,
        z,
        tile_size: 0,
        tileset_path: None,
        content: LayerContent::Entities(entities),
    })
}

fn decode_entity(entry: &mut Value, index: usize) -> Result<Entity> {
    let context = format!("entity {index}");
    let color = Rgb::from_hex(require_str(entry, "__smartColor", &context)?)?;
    let width = require_i64(entry, "width", &context)? as i32;
    let height = require_i64(entry, "height", &context)? as i32;
    let x = require_i64(entry, "__worldX", &context)? as i32;
    let y = require_i64(entry, "__worldY", &context)? as i32;

    let fields = entry
        .as_object_mut()
        .and_then(|obj| obj.remove("fieldInstances"))
        .map(CustomFields::new)
        .unwrap_or_default();

    Ok(Entity {
        rect: Rect::new(x, y, width, height),
        color,
        fields,
    })
}

/// Decode an integer-grid layer into walls.
///
/// The flat `intGridCsv` payload is reshaped against the declared
/// `__cWid` x `__cHei` dimensions and decomposed with the configured
/// strategy.
pub(crate) fn int_grid(
    layer: &Value,
    mesh: MeshStrategy,
    ignored: &IgnoredValues,
) -> Result<Vec<Wall>> {
    let context = "integer grid layer";
    let width = grid_dimension(layer, "__cWid", context)?;
    let height = grid_dimension(layer, "__cHei", context)?;
    let entries = layer
        .get("intGridCsv")
        .and_then(Value::as_array)
        .ok_or_else(|| LevelError::missing("intGridCsv", context))?;

    let mut cells = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = entry
            .as_i64()
            .ok_or_else(|| LevelError::missing("intGridCsv", context))?;
        cells.push(value as i32);
    }

    let grid = Grid::from_flat(width, height, &cells)?;
    Ok(mesh.mesh(&grid, ignored))
}

/// Read a declared grid dimension. Negative values are malformed, not
/// huge.
fn grid_dimension(layer: &Value, field: &'static str, context: &str) -> Result<usize> {
    let value = require_i64(layer, field, context)?;
    usize::try_from(value).map_err(|_| LevelError::missing(field, context))
}
