use log::{debug, warn};

use crate::data::osm::{Child, Element};
use crate::data::record::{Record, RESERVED_KEYS};
use crate::errors::{Error, Result};

use super::patterns::{LOWER_COLON, PROBLEM_CHARS};
use super::text::normalize;

const ADDR_PREFIX: &str = "addr:";

/// Where a single `<tag>` ends up.
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    Drop,
    Address(&'a str),
    TypeM,
    Field(&'a str),
}

pub fn classify(key: &str) -> Route<'_> {
    if PROBLEM_CHARS.is_match(key) {
        return Route::Drop;
    }
    if let Some(subkey) = key.strip_prefix(ADDR_PREFIX) {
        // addr:street:en and friends
        if LOWER_COLON.is_match(subkey) {
            return Route::Drop;
        }
        return Route::Address(subkey);
    }
    match key {
        "type" | "type_m" => Route::TypeM,
        k if RESERVED_KEYS.contains(&k) => Route::Drop,
        k => Route::Field(k),
    }
}

/// Routes every `<tag>` child into the record. Later tags overwrite earlier ones with
/// the same destination.
pub fn route_tags(element: &Element, record: &mut Record) -> Result<()> {
    for child in &element.children {
        let Child::Tag { k, v } = child else {
            continue;
        };
        let key = k.as_deref().ok_or_else(|| Error::missing_attribute("tag", "k"))?;
        let value = normalize(v.as_deref().unwrap_or_default());

        match classify(key) {
            Route::Drop => {
                if RESERVED_KEYS.contains(&key) {
                    warn!(element = element.label().as_str(), key = key; "Dropping tag that shadows a record key");
                } else {
                    debug!(element = element.label().as_str(), key = key; "Dropping tag");
                }
            },
            Route::Address(subkey) => record.set_address(subkey, value),
            Route::TypeM => record.type_m = Some(value),
            Route::Field(name) => {
                record.fields.insert(name.to_string(), value);
            },
        }
    }
    Ok(())
}
