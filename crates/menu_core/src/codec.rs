//! Transport-string encoding of menu snapshots.
//!
//! The wire form is a JSON array of `{id, name, description, course, price}`
//! objects with `price` as a JSON number. Prices are written with the
//! shortest representation that parses back to the identical `f64`.

use shared::{
    domain::DishRecord,
    error::{MenuError, MenuResult},
};

use crate::collection::MenuCollection;

pub fn encode(collection: &MenuCollection) -> MenuResult<String> {
    serde_json::to_string(collection.list())
        .map_err(|err| MenuError::malformed(format!("failed to encode menu: {err}")))
}

/// Absent, empty, or whitespace-only input decodes to an empty collection.
pub fn decode(transport: Option<&str>) -> MenuResult<MenuCollection> {
    let Some(raw) = transport.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(MenuCollection::new());
    };
    let records: Vec<DishRecord> = serde_json::from_str(raw)
        .map_err(|err| MenuError::malformed(format!("invalid menu transport string: {err}")))?;
    MenuCollection::from_records(records)
}

pub fn encode_record(record: &DishRecord) -> MenuResult<String> {
    serde_json::to_string(record)
        .map_err(|err| MenuError::malformed(format!("failed to encode dish: {err}")))
}

pub fn decode_record(raw: &str) -> MenuResult<DishRecord> {
    serde_json::from_str(raw.trim())
        .map_err(|err| MenuError::malformed(format!("invalid dish payload: {err}")))
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
