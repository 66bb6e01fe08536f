/// One direct child of the `<osm>` root as read from the file. Attribute values are
/// XML-unescaped but otherwise raw.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// `<tag k=".." v=".."/>`
    Tag { k: Option<String>, v: Option<String> },
    /// `<nd ref=".."/>`
    NodeRef { node_ref: Option<String> },
    /// Anything else, e.g. a relation `<member>`.
    Other(String),
}

impl Element {
    pub fn new(name: &str) -> Element {
        Element {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Short label for log lines, e.g. `way#42`.
    pub fn label(&self) -> String {
        format!("{}#{}", self.name, self.attribute("id").unwrap_or("?"))
    }
}

#[cfg(test)]
impl Element {
    pub fn with_attribute(mut self, key: &str, value: &str) -> Element {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_tag(mut self, k: &str, v: &str) -> Element {
        self.children.push(Child::Tag {
            k: Some(k.to_string()),
            v: Some(v.to_string()),
        });
        self
    }

    pub fn with_node_ref(mut self, node_ref: &str) -> Element {
        self.children.push(Child::NodeRef {
            node_ref: Some(node_ref.to_string()),
        });
        self
    }
}
