// Schema table for response hydration
//
// Maps an item kind ("tracks", "albums", "artists") to the entity kind of
// its primary object and to the entity kinds of its nested fields. The
// table is built once and never mutated.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{CatalogError, Result};
use crate::models::{Entity, EntityKind};

/// Builds one entity of a given kind from its raw JSON object
pub type Constructor = fn(Value) -> std::result::Result<Entity, serde_json::Error>;

/// Hydration descriptor of one item kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaDescriptor {
    /// Kind of the top-level object(s)
    pub primary: EntityKind,
    /// Nested fields resolved one level deep, in walk order
    pub nested: &'static [(&'static str, EntityKind)],
}

static SCHEMA_TABLE: Lazy<HashMap<&'static str, SchemaDescriptor>> = Lazy::new(|| {
    HashMap::from([
        (
            "tracks",
            SchemaDescriptor {
                primary: EntityKind::Track,
                nested: &[("artists", EntityKind::Artist), ("album", EntityKind::Album)],
            },
        ),
        (
            "albums",
            SchemaDescriptor {
                primary: EntityKind::Album,
                nested: &[
                    ("artists", EntityKind::Artist),
                    ("images", EntityKind::Image),
                    ("copyrights", EntityKind::Copyright),
                ],
            },
        ),
        (
            "artists",
            SchemaDescriptor {
                primary: EntityKind::Artist,
                nested: &[("images", EntityKind::Image), ("followers", EntityKind::Followers)],
            },
        ),
    ])
});

/// Look up the descriptor of an item kind
pub fn descriptor(item_kind: &str) -> Result<&'static SchemaDescriptor> {
    SCHEMA_TABLE
        .get(item_kind)
        .ok_or_else(|| CatalogError::UnknownItemKind(item_kind.to_string()))
}

/// Item kinds known to the schema table, sorted
pub fn item_kinds() -> Vec<&'static str> {
    let mut kinds: Vec<_> = SCHEMA_TABLE.keys().copied().collect();
    kinds.sort_unstable();
    kinds
}

impl EntityKind {
    /// Constructor of this kind. Only the record's own fields are built;
    /// nested fields are left in their raw `Field` state.
    pub fn constructor(&self) -> Constructor {
        match self {
            EntityKind::Track => |raw| serde_json::from_value(raw).map(Entity::Track),
            EntityKind::Album => |raw| serde_json::from_value(raw).map(Entity::Album),
            EntityKind::Artist => |raw| serde_json::from_value(raw).map(Entity::Artist),
            EntityKind::Image => |raw| serde_json::from_value(raw).map(Entity::Image),
            EntityKind::Copyright => |raw| serde_json::from_value(raw).map(Entity::Copyright),
            EntityKind::Followers => |raw| serde_json::from_value(raw).map(Entity::Followers),
        }
    }

    /// Build one entity of this kind from raw JSON
    pub fn construct(&self, raw: Value) -> std::result::Result<Entity, serde_json::Error> {
        (self.constructor())(raw)
    }
}
