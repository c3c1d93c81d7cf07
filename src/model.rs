//! Owned XML element model.
//!
//! The streaming reader materializes one event subtree at a time as an
//! [`XmlElement`]; the field extractor walks it with [`XmlElement::descendants`].
//! Names are kept exactly as written in the document and matched through
//! [`local_name`], so documents carrying the Event Viewer namespace (default,
//! prefixed, or Clark-style `{uri}Name`) all index the same way.

/// Returns the local part of a qualified XML name.
///
/// Strips a `{uri}` wrapper first, then a `prefix:` qualifier. A name with
/// neither is returned unchanged, and an empty name stays empty.
pub fn local_name(tag: &str) -> &str {
    let tag = match tag.rfind('}') {
        Some(pos) => &tag[pos + 1..],
        None => tag,
    };
    match tag.rfind(':') {
        Some(pos) => &tag[pos + 1..],
        None => tag,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

/// One XML element subtree, with attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<XmlAttribute>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Looks up an attribute by local name, first match wins.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| local_name(&attr.name) == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Preorder walk over this element and every element below it,
    /// in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
