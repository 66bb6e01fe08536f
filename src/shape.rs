//! Turns one parsed OSM element into a flat [`Record`].
//!
//! Only `node` and `way` are shaped. Attributes are mapped first, then the `<tag>`
//! children are routed, then the address is cleaned, then a way's `<nd>` refs are
//! collected. Every call is independent of the elements around it.

pub mod address;
pub mod attributes;
pub mod patterns;
pub mod refs;
pub mod tags;
pub mod text;

use crate::data::osm::Element;
use crate::data::record::{ElementType, Record};
use crate::errors::Result;

/// `Ok(None)` for anything that isn't a node or a way.
pub fn shape_element(element: &Element) -> Result<Option<Record>> {
    let Some(element_type) = ElementType::from_tag_name(&element.name) else {
        return Ok(None);
    };
    let mut record = Record::new(element_type);

    attributes::map_attributes(element, &mut record)?;
    tags::route_tags(element, &mut record)?;

    if record.address.as_ref().is_some_and(|address| !address.is_empty()) {
        address::normalize_address(&mut record);
    }

    if element_type == ElementType::Way {
        record.node_refs = refs::node_refs(element);
    }

    Ok(Some(record))
}
