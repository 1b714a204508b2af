//! Layer data model
//!
//! A loaded level holds a list of layers in draw order. Tile-based
//! source layers (tile, auto, and integer-grid layers) decode into
//! tile content; entity layers decode into entity content. The
//! distinction is carried by [`LayerContent`], so a layer can never
//! hold both.

use ldtk_mesh::Rect;

use crate::color::Rgb;
use crate::error::Result;
use crate::fields::{CustomFields, FieldValue};

/// Source layer type tag (`__type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Rule-driven tiles over an invisible grid
    AutoLayer,

    /// Hand-placed tiles
    Tiles,

    /// Integer grid, with optional rule-driven tiles on top
    IntGrid,

    /// Placed entities
    Entities,
}

impl LayerKind {
    /// Parse a `__type` tag; unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AutoLayer" => Some(LayerKind::AutoLayer),
            "Tiles" => Some(LayerKind::Tiles),
            "IntGrid" => Some(LayerKind::IntGrid),
            "Entities" => Some(LayerKind::Entities),
            _ => None,
        }
    }
}

/// Tile mirroring, from the 2-bit flip code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    /// No mirroring
    #[default]
    None,

    /// Mirrored horizontally
    X,

    /// Mirrored vertically
    Y,

    /// Mirrored both ways
    XY,
}

impl Flip {
    /// Decode a flip code; bit 0 mirrors horizontally, bit 1
    /// vertically, higher bits are not part of the code.
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Flip::None,
            1 => Flip::X,
            2 => Flip::Y,
            _ => Flip::XY,
        }
    }

    /// Whether the tile is mirrored horizontally
    #[inline]
    pub fn x(self) -> bool {
        matches!(self, Flip::X | Flip::XY)
    }

    /// Whether the tile is mirrored vertically
    #[inline]
    pub fn y(self) -> bool {
        matches!(self, Flip::Y | Flip::XY)
    }
}

/// A placed tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// World pixel position (size is zero; tiles are square and sized
    /// by the layer's grid)
    pub rect: Rect,

    /// Pixel position in the tileset atlas (size is zero)
    pub src: Rect,

    /// Tile index in the tileset
    pub index: u32,

    /// Mirroring
    pub flip: Flip,
}

/// A placed entity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// World pixel rectangle
    pub rect: Rect,

    /// Editor display color
    pub color: Rgb,

    /// Designer-defined fields
    pub fields: CustomFields,
}

impl Entity {
    /// Look up a custom field on this entity
    pub fn field(&self, name: &str) -> Result<Option<FieldValue>> {
        self.fields.get(name)
    }
}

/// What a layer holds.
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Tile content (tile, auto, and integer-grid layers)
    Tiles(Vec<Tile>),

    /// Entity content
    Entities(Vec<Entity>),
}

/// One decoded layer of a level.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name from the design tool
    pub identifier: String,

    /// Draw-order index; 0 is the topmost source layer
    pub z: u32,

    /// Grid cell size in pixels; zero for entity layers
    pub tile_size: u32,

    /// Rewritten tileset path, when the layer has a tileset
    pub tileset_path: Option<String>,

    /// Tile or entity content
    pub content: LayerContent,
}

impl Layer {
    /// Tile content, if this is a tile layer
    pub fn tiles(&self) -> Option<&[Tile]> {
        match &self.content {
            LayerContent::Tiles(tiles) => Some(tiles),
            LayerContent::Entities(_) => None,
        }
    }

    /// Entity content, if this is an entity layer
    pub fn entities(&self) -> Option<&[Entity]> {
        match &self.content {
            LayerContent::Tiles(_) => None,
            LayerContent::Entities(entities) => Some(entities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_kind_tags() {
        assert_eq!(LayerKind::from_tag("AutoLayer"), Some(LayerKind::AutoLayer));
        assert_eq!(LayerKind::from_tag("Tiles"), Some(LayerKind::Tiles));
        assert_eq!(LayerKind::from_tag("IntGrid"), Some(LayerKind::IntGrid));
        assert_eq!(LayerKind::from_tag("Entities"), Some(LayerKind::Entities));
        assert_eq!(LayerKind::from_tag("Decals"), None);
    }

    #[test]
    fn test_flip_codes() {
        assert_eq!(Flip::from_code(0), Flip::None);
        assert_eq!(Flip::from_code(1), Flip::X);
        assert_eq!(Flip::from_code(2), Flip::Y);
        assert_eq!(Flip::from_code(3), Flip::XY);
        // Only the low two bits are the code.
        assert_eq!(Flip::from_code(7), Flip::XY);

        assert!(Flip::X.x() && !Flip::X.y());
        assert!(!Flip::Y.x() && Flip::Y.y());
        assert!(Flip::XY.x() && Flip::XY.y());
    }

    #[test]
    fn test_content_accessors() {
        let tiles = Layer {
            identifier: "Ground".to_string(),
            z: 0,
            tile_size: 16,
            tileset_path: None,
            content: LayerContent::Tiles(Vec::new()),
        };
        assert!(tiles.tiles().is_some());
        assert!(tiles.entities().is_none());

        let entities = Layer {
            identifier: "Actors".to_string(),
            z: 1,
            tile_size: 0,
            tileset_path: None,
            content: LayerContent::Entities(Vec::new()),
        };
        assert!(entities.tiles().is_none());
        assert!(entities.entities().is_some());
    }
}
