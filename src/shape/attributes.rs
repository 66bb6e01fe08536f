use log::warn;

use crate::data::osm::Element;
use crate::data::record::{Record, RESERVED_KEYS};
use crate::errors::{Error, Result};

use super::text::normalize;

/// Attributes that describe who created the element and when.
pub const CREATED: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

fn parse_coordinate(attribute: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value.trim()
        .parse()
        .map_err(|_| Error::numeric_parse(attribute, value))?;
    if !parsed.is_finite() {
        return Err(Error::numeric_parse(attribute, value));
    }
    Ok(parsed)
}

/// Sorts the element's own attributes into `created`, `pos` and plain fields.
pub fn map_attributes(element: &Element, record: &mut Record) -> Result<()> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for (key, value) in &element.attributes {
        match key.as_str() {
            k if CREATED.contains(&k) => record.set_created(k, normalize(value)),
            "lat" => lat = Some(parse_coordinate("lat", value)?),
            "lon" => lon = Some(parse_coordinate("lon", value)?),
            k if RESERVED_KEYS.contains(&k) => {
                warn!(element = element.label().as_str(), attribute = k; "Dropping attribute that shadows a record key");
            },
            "type_m" => record.type_m = Some(normalize(value)),
            k => {
                record.fields.insert(k.to_string(), normalize(value));
            },
        }
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        record.pos = Some([lat, lon]);
    }
    Ok(())
}
