//! Loaded level aggregate and selective teardown

use ldtk_mesh::{Rect, Wall};
use tracing::debug;

use crate::color::Rgb;
use crate::error::Result;
use crate::fields::{CustomFields, FieldValue};
use crate::layer::{Layer, LayerContent};

/// A reference to an adjacent level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    /// Identifier of the adjacent level
    pub name: String,

    /// Direction code as stored in the document (`n`, `e`, `nw`, ...)
    pub dir: String,
}

/// A fully assembled level.
///
/// Produced by [`Loader::load_level`](crate::Loader::load_level);
/// dropping it releases everything, while [`Level::dismantle`] lets a
/// caller pull selected parts out first.
#[derive(Debug, Clone)]
pub struct Level {
    /// Stable instance id
    pub iid: String,

    /// Level identifier
    pub name: String,

    /// World pixel rectangle
    pub rect: Rect,

    /// Background color
    pub color: Rgb,

    /// Background image path, when the level has one
    pub bg_tile_path: Option<String>,

    /// Level custom fields
    pub fields: CustomFields,

    /// Collision rectangles decomposed from integer-grid layers
    pub walls: Vec<Wall>,

    /// Decoded layers in source order
    pub layers: Vec<Layer>,

    /// Adjacent levels
    pub neighbors: Vec<Neighbor>,
}

impl Level {
    /// Look up a level custom field
    pub fn field(&self, name: &str) -> Result<Option<FieldValue>> {
        self.fields.get(name)
    }

    /// Layers holding tile content, in source order
    pub fn tile_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.tiles().is_some())
    }

    /// Layers holding entity content, in source order
    pub fn entity_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|layer| layer.entities().is_some())
    }

    /// Tear the level down, handing back the parts named in `keep`.
    ///
    /// Everything else is dropped, entity layers and their custom
    /// fields among it in every case: the tile-layer flag salvages
    /// tile content only.
    pub fn dismantle(self, keep: Keep) -> Retained {
        debug!("Dismantling level '{}'", self.name);
        let Level {
            name,
            fields,
            layers,
            neighbors,
            ..
        } = self;

        Retained {
            neighbors: keep.neighbors.then_some(neighbors),
            name: keep.name.then_some(name),
            tile_layers: keep.tile_layers.then(|| {
                layers
                    .into_iter()
                    .filter(|layer| matches!(layer.content, LayerContent::Tiles(_)))
                    .collect()
            }),
            fields: keep.fields.then_some(fields),
        }
    }
}

/// Which parts of a level to hand back from [`Level::dismantle`].
///
/// All flags default to off; `..Default::default()` keeps call sites
/// short.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keep {
    /// Keep the neighbor list
    pub neighbors: bool,

    /// Keep the level name
    pub name: bool,

    /// Keep tile layers (entity layers are dropped regardless)
    pub tile_layers: bool,

    /// Keep the level custom fields
    pub fields: bool,
}

/// Parts handed back by [`Level::dismantle`].
#[derive(Debug, Clone)]
pub struct Retained {
    /// Neighbor list, when kept
    pub neighbors: Option<Vec<Neighbor>>,

    /// Level name, when kept
    pub name: Option<String>,

    /// Tile layers, when kept
    pub tile_layers: Option<Vec<Layer>>,

    /// Level custom fields, when kept
    pub fields: Option<CustomFields>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Entity;
    use serde_json::json;

    fn sample_level() -> Level {
        let entity = Entity {
            rect: Rect::new(0, 0, 8, 8),
            color: Rgb::new(1, 2, 3),
            fields: CustomFields::new(json!([
                {"__identifier": "hp", "__value": 3},
            ])),
        };
        Level {
            iid: "iid-a".to_string(),
            name: "Room_A".to_string(),
            rect: Rect::new(0, 0, 256, 256),
            color: Rgb::new(10, 20, 30),
            bg_tile_path: None,
            fields: CustomFields::new(json!([
                {"__identifier": "music", "__value": "caves.ogg"},
            ])),
            walls: vec![Wall::new(Rect::new(0, 0, 2, 2), 1)],
            layers: vec![
                Layer {
                    identifier: "Ground".to_string(),
                    z: 0,
                    tile_size: 16,
                    tileset_path: None,
                    content: LayerContent::Tiles(Vec::new()),
                },
                Layer {
                    identifier: "Actors".to_string(),
                    z: 1,
                    tile_size: 0,
                    tileset_path: None,
                    content: LayerContent::Entities(vec![entity]),
                },
            ],
            neighbors: vec![Neighbor {
                name: "Room_B".to_string(),
                dir: "e".to_string(),
            }],
        }
    }

    #[test]
    fn test_layer_filters() {
        let level = sample_level();
        let tile_names: Vec<&str> = level
            .tile_layers()
            .map(|layer| layer.identifier.as_str())
            .collect();
        assert_eq!(tile_names, vec!["Ground"]);

        let entity_names: Vec<&str> = level
            .entity_layers()
            .map(|layer| layer.identifier.as_str())
            .collect();
        assert_eq!(entity_names, vec!["Actors"]);
    }

    #[test]
    fn test_level_field() {
        let level = sample_level();
        assert_eq!(
            level.field("music").unwrap(),
            Some(FieldValue::Str("caves.ogg".to_string()))
        );
        assert_eq!(level.field("missing").unwrap(), None);
    }

    #[test]
    fn test_dismantle_keeps_nothing_by_default() {
        let retained = sample_level().dismantle(Keep::default());
        assert!(retained.neighbors.is_none());
        assert!(retained.name.is_none());
        assert!(retained.tile_layers.is_none());
        assert!(retained.fields.is_none());
    }

    #[test]
    fn test_dismantle_keep_name_only() {
        let retained = sample_level().dismantle(Keep {
            name: true,
            ..Default::default()
        });
        assert_eq!(retained.name.as_deref(), Some("Room_A"));
        assert!(retained.neighbors.is_none());
        assert!(retained.tile_layers.is_none());
        assert!(retained.fields.is_none());
    }

    #[test]
    fn test_dismantle_drops_entity_layers() {
        let retained = sample_level().dismantle(Keep {
            tile_layers: true,
            neighbors: true,
            ..Default::default()
        });
        let layers = retained.tile_layers.unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].identifier, "Ground");

        let neighbors = retained.neighbors.unwrap();
        assert_eq!(neighbors[0].name, "Room_B");
        assert_eq!(neighbors[0].dir, "e");
    }

    #[test]
    fn test_dismantle_keep_fields() {
        let retained = sample_level().dismantle(Keep {
            fields: true,
            ..Default::default()
        });
        let fields = retained.fields.unwrap();
        assert_eq!(
            fields.get("music").unwrap(),
            Some(FieldValue::Str("caves.ogg".to_string()))
        );
    }
}
