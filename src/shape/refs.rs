use log::warn;

use crate::data::osm::{Child, Element};

/// Raw `ref` values of the `<nd>` children in document order, or `None` if there are
/// none. Duplicates are kept.
pub fn node_refs(element: &Element) -> Option<Vec<String>> {
    let refs: Vec<String> = element.children.iter()
        .filter_map(|child| match child {
            Child::NodeRef { node_ref: Some(node_ref) } => Some(node_ref.clone()),
            Child::NodeRef { node_ref: None } => {
                warn!(element = element.label().as_str(); "Skipping <nd> without ref");
                None
            },
            _ => None,
        })
        .collect();

    if refs.is_empty() {
        None
    } else {
        Some(refs)
    }
}
