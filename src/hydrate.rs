// Response hydration
//
// Turns raw JSON into typed entities following the schema table:
// - the primary object(s) are built with the item kind's constructor
// - each declared nested field is resolved one level deep
// - nested values that do not fit their declared kind degrade to Missing

use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::{Entity, EntityKind, Field, Page};
use crate::schema::{self, SchemaDescriptor};

/// Result of hydrating a JSON value: one entity per object, order preserved
#[derive(Debug, Clone, PartialEq)]
pub enum Hydrated {
    One(Entity),
    Many(Vec<Entity>),
}

impl Hydrated {
    pub fn len(&self) -> usize {
        match self {
            Hydrated::One(_) => 1,
            Hydrated::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a list
    pub fn into_vec(self) -> Vec<Entity> {
        match self {
            Hydrated::One(entity) => vec![entity],
            Hydrated::Many(items) => items,
        }
    }
}

/// Hydrate `json` as `item_kind`.
///
/// Fails with `UnknownItemKind` before building anything when the kind is
/// not in the schema table, and with `Hydration` when a primary object does
/// not match its kind. Nested mismatches never fail the call.
pub fn hydrate(item_kind: &str, json: Value) -> Result<Hydrated> {
    let descriptor = schema::descriptor(item_kind)?;

    match json {
        Value::Array(items) => items
            .into_iter()
            .map(|raw| hydrate_entity(item_kind, descriptor, raw))
            .collect::<Result<Vec<_>>>()
            .map(Hydrated::Many),
        raw => hydrate_entity(item_kind, descriptor, raw).map(Hydrated::One),
    }
}

/// Hydrate a single object and convert it to its record type
pub fn hydrate_one<T>(item_kind: &str, json: Value) -> Result<T>
where
    T: TryFrom<Entity>,
{
    match hydrate(item_kind, json)? {
        Hydrated::One(entity) => downcast(item_kind, entity),
        Hydrated::Many(items) => Err(CatalogError::Hydration {
            kind: item_kind.to_string(),
            message: format!("expected a single object, got an array of {}", items.len()),
        }),
    }
}

/// Hydrate an array of objects and convert them to their record type
pub fn hydrate_many<T>(item_kind: &str, json: Value) -> Result<Vec<T>>
where
    T: TryFrom<Entity>,
{
    match hydrate(item_kind, json)? {
        Hydrated::Many(items) => items
            .into_iter()
            .map(|entity| downcast(item_kind, entity))
            .collect(),
        Hydrated::One(_) => Err(CatalogError::Hydration {
            kind: item_kind.to_string(),
            message: "expected an array, got a single object".to_string(),
        }),
    }
}

/// Hydrate a paging object whose items are `item_kind` objects
pub fn hydrate_page<T>(item_kind: &str, json: Value) -> Result<Page<T>>
where
    T: TryFrom<Entity>,
{
    let mut page: Page<Value> =
        serde_json::from_value(json).map_err(|e| CatalogError::Hydration {
            kind: item_kind.to_string(),
            message: format!("invalid paging object: {}", e),
        })?;

    let raw_items = std::mem::take(&mut page.items);
    let items = hydrate_many(item_kind, Value::Array(raw_items))?;
    Ok(page.with_items(items))
}

fn downcast<T>(item_kind: &str, entity: Entity) -> Result<T>
where
    T: TryFrom<Entity>,
{
    let kind = entity.kind();
    T::try_from(entity).map_err(|_| CatalogError::Hydration {
        kind: item_kind.to_string(),
        message: format!("{} entity does not match the requested type", kind),
    })
}

fn hydrate_entity(item_kind: &str, descriptor: &SchemaDescriptor, raw: Value) -> Result<Entity> {
    let mut entity = descriptor
        .primary
        .construct(raw)
        .map_err(|e| CatalogError::Hydration {
            kind: item_kind.to_string(),
            message: e.to_string(),
        })?;

    for (field, kind) in descriptor.nested {
        resolve_nested(&mut entity, field, *kind);
    }

    Ok(entity)
}

// ==================================================================================================
// Nested fields
// ==================================================================================================

/// Resolve one declared nested field of `entity` in place
fn resolve_nested(entity: &mut Entity, field: &str, kind: EntityKind) {
    match (entity, field) {
        (Entity::Track(track), "album") => resolve_one(&mut track.album, field, kind),
        (Entity::Track(track), "artists") => resolve_many(&mut track.artists, field, kind),
        (Entity::Album(album), "artists") => resolve_many(&mut album.artists, field, kind),
        (Entity::Album(album), "images") => resolve_many(&mut album.images, field, kind),
        (Entity::Album(album), "copyrights") => resolve_many(&mut album.copyrights, field, kind),
        (Entity::Artist(artist), "images") => resolve_many(&mut artist.images, field, kind),
        (Entity::Artist(artist), "followers") => resolve_one(&mut artist.followers, field, kind),
        (entity, field) => {
            debug!(entity = %entity.kind(), field, "No nested slot for declared field");
        }
    }
}

/// Single nested object. Missing and Empty are terminal; an array or a value
/// that does not construct as `kind` degrades to Missing.
fn resolve_one<T>(slot: &mut Field<T>, field: &str, kind: EntityKind)
where
    T: TryFrom<Entity>,
{
    let Some(raw) = slot.take_unresolved() else {
        return;
    };

    if raw.is_array() {
        debug!(field, %kind, "Expected a single nested object, got an array");
        return;
    }

    match construct_as::<T>(kind, raw) {
        Some(value) => *slot = Field::Present(value),
        None => debug!(field, %kind, "Nested object does not match its kind, dropping it"),
    }
}

/// Nested array. Every element must construct as `kind`, otherwise the whole
/// field degrades to Missing.
fn resolve_many<T>(slot: &mut Field<Vec<T>>, field: &str, kind: EntityKind)
where
    T: TryFrom<Entity>,
{
    let Some(raw) = slot.take_unresolved() else {
        return;
    };

    let Value::Array(items) = raw else {
        debug!(field, %kind, "Expected a nested array, got a single value");
        return;
    };

    let values: Option<Vec<T>> = items
        .into_iter()
        .map(|item| construct_as::<T>(kind, item))
        .collect();

    match values {
        Some(values) => *slot = Field::Present(values),
        None => debug!(field, %kind, "Nested array does not match its kind, dropping it"),
    }
}

fn construct_as<T>(kind: EntityKind, raw: Value) -> Option<T>
where
    T: TryFrom<Entity>,
{
    kind.construct(raw)
        .ok()
        .and_then(|entity| T::try_from(entity).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Artist, Followers, Image, Track};
    use serde_json::json;

    fn simplified_artist(id: &str, name: &str) -> Value {
        json!({
            "external_urls": {"spotify": format!("https://open.example.com/artist/{}", id)},
            "href": format!("https://api.example.com/v1/artists/{}", id),
            "id": id,
            "name": name,
            "type": "artist",
            "uri": format!("spotify:artist:{}", id)
        })
    }

    fn full_artist() -> Value {
        let mut artist = simplified_artist("0TnOYISbd1XYRBk9myaseg", "Pitbull");
        let obj = artist.as_object_mut().unwrap();
        obj.insert("followers".into(), json!({"href": null, "total": 9876543}));
        obj.insert("genres".into(), json!(["dance pop", "pop"]));
        obj.insert(
            "images".into(),
            json!([
                {"height": 640, "url": "https://i.example.com/640.jpg", "width": 640},
                {"height": 160, "url": "https://i.example.com/160.jpg", "width": 160}
            ]),
        );
        obj.insert("popularity".into(), json!(80));
        artist
    }

    fn simplified_album() -> Value {
        json!({
            "album_type": "album",
            "artists": [simplified_artist("2CIMQHirSU0MQqyYHq0eOx", "deadmau5")],
            "available_markets": ["US", "FR"],
            "external_urls": {},
            "href": "https://api.example.com/v1/albums/4aawyAB9vmqN3uQ7FjRGTy",
            "id": "4aawyAB9vmqN3uQ7FjRGTy",
            "images": [{"height": 300, "url": "https://i.example.com/300.jpg", "width": 300}],
            "name": "Global Warming",
            "release_date": "2012-11-16",
            "release_date_precision": "day",
            "total_tracks": 18,
            "type": "album",
            "uri": "spotify:album:4aawyAB9vmqN3uQ7FjRGTy"
        })
    }

    fn full_track() -> Value {
        json!({
            "album": simplified_album(),
            "artists": [
                simplified_artist("0TnOYISbd1XYRBk9myaseg", "Pitbull"),
                simplified_artist("7iJrDbKM5fEkGdm5kpjFzS", "Sensato")
            ],
            "available_markets": ["US"],
            "disc_number": 1,
            "duration_ms": 207959,
            "explicit": false,
            "external_ids": {"isrc": "USJAY1300001"},
            "external_urls": {"spotify": "https://open.example.com/track/11dFghVXANMlKmJXsNCbNl"},
            "href": "https://api.example.com/v1/tracks/11dFghVXANMlKmJXsNCbNl",
            "id": "11dFghVXANMlKmJXsNCbNl",
            "is_local": false,
            "name": "Global Warming",
            "popularity": 63,
            "preview_url": null,
            "track_number": 1,
            "type": "track",
            "uri": "spotify:track:11dFghVXANMlKmJXsNCbNl"
        })
    }

    #[test]
    fn test_full_track_hydrates_nested_fields() {
        let track: Track = hydrate_one("tracks", full_track()).unwrap();

        let album = track.album.as_present().expect("album should be hydrated");
        assert_eq!(album.name, "Global Warming");
        assert_eq!(album.total_tracks, 18);

        let artists = track.artists.as_present().expect("artists should be hydrated");
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "Pitbull");
        assert_eq!(artists[1].name, "Sensato");
        assert_eq!(track.to_string(), "Pitbull, Sensato - Global Warming");
        assert_eq!(track.popularity, Some(63));
    }

    #[test]
    fn test_nested_entities_are_not_walked() {
        let track: Track = hydrate_one("tracks", full_track()).unwrap();
        let album = track.album.as_present().unwrap();

        // The album's own nested fields belong to the "albums" schema entry
        assert!(album.artists.as_unresolved().is_some());
        assert!(album.images.as_unresolved().is_some());
    }

    #[test]
    fn test_simplified_artist_keeps_fields_missing() {
        let artist: Artist =
            hydrate_one("artists", simplified_artist("2CIMQHirSU0MQqyYHq0eOx", "deadmau5"))
                .unwrap();

        assert!(artist.followers.is_missing());
        assert!(artist.images.is_missing());
        assert_eq!(artist.genres, None);
        assert_eq!(artist.popularity, None);
    }

    #[test]
    fn test_full_artist() {
        let artist: Artist = hydrate_one("artists", full_artist()).unwrap();

        assert_eq!(
            artist.followers.as_present(),
            Some(&Followers {
                href: None,
                total: 9876543
            })
        );
        let images: &Vec<Image> = artist.images.as_present().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].height, Some(640));
        assert_eq!(images[1].url, "https://i.example.com/160.jpg");
        assert_eq!(
            artist.genres,
            Some(vec!["dance pop".to_string(), "pop".to_string()])
        );
    }

    #[test]
    fn test_empty_and_null_nested_fields() {
        let mut json = full_artist();
        json["images"] = json!([]);
        json["followers"] = Value::Null;
        json["genres"] = json!([]);

        let artist: Artist = hydrate_one("artists", json).unwrap();
        assert!(artist.images.is_empty());
        assert!(artist.followers.is_missing());
        // Present-but-empty primitive list stays distinct from absent
        assert_eq!(artist.genres, Some(vec![]));
    }

    #[test]
    fn test_array_preserves_order() {
        let json = json!([
            simplified_artist("a", "First"),
            simplified_artist("b", "Second"),
            simplified_artist("c", "Third")
        ]);

        let hydrated = hydrate("artists", json).unwrap();
        assert_eq!(hydrated.len(), 3);

        let names: Vec<String> = hydrated
            .into_vec()
            .into_iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_single_object_is_one() {
        let hydrated = hydrate("albums", simplified_album()).unwrap();
        assert!(matches!(hydrated, Hydrated::One(Entity::Album(_))));
    }

    #[test]
    fn test_unknown_item_kind() {
        let err = hydrate("playlists", json!({"id": "x"})).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownItemKind(ref k) if k == "playlists"));
    }

    #[test]
    fn test_nested_mismatch_degrades_to_missing() {
        let mut json = full_track();
        json["album"] = json!({"name": "no other fields"});
        json["artists"][1] = json!({"id": "only-an-id"});

        let track: Track = hydrate_one("tracks", json).unwrap();
        assert!(track.album.is_missing());
        assert!(track.artists.is_missing());
        assert_eq!(track.name, "Global Warming");
    }

    #[test]
    fn test_nested_arity_mismatch_degrades_to_missing() {
        let mut json = full_track();
        json["album"] = json!([simplified_album()]);
        json["artists"] = simplified_artist("x", "Solo");

        let track: Track = hydrate_one("tracks", json).unwrap();
        assert!(track.album.is_missing());
        assert!(track.artists.is_missing());
    }

    #[test]
    fn test_nested_scalar_degrades_to_missing() {
        let mut json = full_artist();
        json["followers"] = json!(12);

        let artist: Artist = hydrate_one("artists", json).unwrap();
        assert!(artist.followers.is_missing());
    }

    #[test]
    fn test_primary_mismatch_is_an_error() {
        let err = hydrate("tracks", json!({"name": "missing everything else"})).unwrap_err();
        assert!(matches!(err, CatalogError::Hydration { ref kind, .. } if kind == "tracks"));

        let err = hydrate("artists", json!([simplified_artist("a", "ok"), 42])).unwrap_err();
        assert!(matches!(err, CatalogError::Hydration { .. }));
    }

    #[test]
    fn test_hydrate_one_rejects_arrays() {
        let err = hydrate_one::<Album>("albums", json!([simplified_album()])).unwrap_err();
        assert!(matches!(err, CatalogError::Hydration { .. }));

        let err = hydrate_many::<Album>("albums", simplified_album()).unwrap_err();
        assert!(matches!(err, CatalogError::Hydration { .. }));
    }

    #[test]
    fn test_hydrate_one_type_mismatch() {
        let err = hydrate_one::<Track>("albums", simplified_album()).unwrap_err();
        assert!(matches!(err, CatalogError::Hydration { .. }));
    }

    #[test]
    fn test_album_schema_resolves_copyrights() {
        let mut json = simplified_album();
        json["copyrights"] = json!([
            {"text": "(C) 2012 RCA Records", "type": "C"},
            {"text": "(P) 2012 RCA Records", "type": "P"}
        ]);
        json["label"] = json!("Mr.305/Polo Grounds Music/RCA Records");

        let album: Album = hydrate_one("albums", json).unwrap();
        let copyrights = album.copyrights.as_present().unwrap();
        assert_eq!(copyrights.len(), 2);
        assert_eq!(copyrights[1].kind, "P");
        assert_eq!(album.artists.as_present().unwrap()[0].name, "deadmau5");
        assert_eq!(album.images.as_present().unwrap().len(), 1);
        // Outside the walk
        assert!(album.tracks.is_missing());
    }

    #[test]
    fn test_hydrate_page() {
        let json = json!({
            "href": "https://api.example.com/v1/artists/x/albums?offset=0&limit=2",
            "items": [simplified_album(), simplified_album()],
            "limit": 2,
            "next": null,
            "offset": 0,
            "previous": null,
            "total": 2
        });

        let page: Page<Album> = hydrate_page("albums", json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items[0].artists.is_present());
        assert!(!page.has_next());

        let page: Page<Entity> = hydrate_page(
            "albums",
            json!({
                "href": "h", "items": [], "limit": 20, "next": null,
                "offset": 0, "previous": null, "total": 0
            }),
        )
        .unwrap();
        assert!(page.items.is_empty());
    }
}
