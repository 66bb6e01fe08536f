use std::collections::BTreeMap;

use serde::Serialize;

/// Keys the record owns itself. A plain field by one of these names would shadow them.
pub const RESERVED_KEYS: [&str; 5] = ["type", "created", "pos", "address", "node_refs"];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Node,
    Way,
}

impl ElementType {
    pub fn from_tag_name(name: &str) -> Option<ElementType> {
        match name {
            "node" => Some(ElementType::Node),
            "way" => Some(ElementType::Way),
            _ => None,
        }
    }
}

/// Flat, normalized view of a single node or way, ready to be written as one JSON line.
///
/// Maps are keyed by field name and overwrite on insert, so a repeated key keeps the
/// value seen last.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Record {
    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<BTreeMap<String, String>>,

    /// `[lat, lon]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_m: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_refs: Option<Vec<String>>,

    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(element_type: ElementType) -> Record {
        Record {
            element_type,
            created: None,
            pos: None,
            address: None,
            type_m: None,
            node_refs: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn set_created(&mut self, key: &str, value: String) {
        self.created
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
    }

    pub fn set_address(&mut self, key: &str, value: String) {
        self.address
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
    }

    pub fn created_value(&self, key: &str) -> Option<&str> {
        self.created.as_ref()?.get(key).map(String::as_str)
    }

    pub fn address_value(&self, key: &str) -> Option<&str> {
        self.address.as_ref()?.get(key).map(String::as_str)
    }
}
