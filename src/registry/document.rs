//! Lightweight XML document tree with path-based field queries.
//!
//! Detail records returned by the registry use a vendor namespace prefix on
//! every element (`r3d:repository`, `r3d:api`, ...). Queries here match on
//! local names only, so callers never have to care about the prefix.

use ohno::app_err;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A parsed path expression of the form `a/b/c` or `a/b@attr`.
///
/// Steps are element local names, matched starting at the children of the
/// document root. An optional trailing `@attr` selects an attribute of the
/// final element instead of its text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    steps: Vec<String>,
    attribute: Option<String>,
}

impl FieldPath {
    /// Parse a path expression.
    pub fn parse(expr: &str) -> crate::Result<Self> {
        let (steps_part, attribute) = match expr.split_once('@') {
            Some((_, attr)) if attr.is_empty() => {
                return Err(app_err!("field path `{expr}` has an empty attribute name"));
            }
            Some((_, attr)) if attr.contains('@') => {
                return Err(app_err!("field path `{expr}` has more than one attribute selector"));
            }
            Some((steps, attr)) => (steps, Some(attr.to_string())),
            None => (expr, None),
        };

        let steps: Vec<String> = steps_part
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if steps.is_empty() {
            return Err(app_err!("field path `{expr}` has no element steps"));
        }

        Ok(Self { steps, attribute })
    }

    /// The attribute selected by this path, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    fn steps(&self) -> &[String] {
        &self.steps
    }
}

/// One element of a parsed document.
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Local name of the element, without any namespace prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed text content directly contained in this element.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Child elements with the given local name, in document order.
    #[must_use]
    pub fn children_named(&self, local_name: &str) -> Vec<&Self> {
        self.children.iter().filter(|child| child.name() == local_name).collect()
    }

    /// Look up an attribute by local name.
    #[must_use]
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// Resolve a path's value against this element: attribute if the path
    /// names one, text content otherwise.
    fn path_value(&self, path: &FieldPath) -> Option<String> {
        match path.attribute() {
            Some(attr) => self.attribute(attr).map(str::to_string),
            None => Some(self.text().to_string()),
        }
    }
}

/// A parsed XML document with a single root element.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse an XML string into a document tree.
    ///
    /// Namespace prefixes are stripped from element and attribute names.
    pub fn parse(xml: &str) -> crate::Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // The synthetic bottom entry collects the root element.
        let mut stack: Vec<Element> = vec![Element::default()];

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(start.name().local_name().as_ref(), start.attributes())?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(start.name().local_name().as_ref(), start.attributes())?;
                    child_collector(&mut stack)?.children.push(element);
                }
                Event::Text(text) => {
                    child_collector(&mut stack)?.text.push_str(&text.unescape()?);
                }
                Event::CData(cdata) => {
                    child_collector(&mut stack)?
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| app_err!("malformed XML: unbalanced end tag"))?;
                    child_collector(&mut stack)?.children.push(element);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let [bottom] = stack.as_mut_slice() else {
            return Err(app_err!("malformed XML: unclosed element at end of document"));
        };

        let mut roots = core::mem::take(&mut bottom.children);
        match roots.len() {
            1 => Ok(Self {
                root: roots.remove(0),
            }),
            0 => Err(app_err!("document has no root element")),
            n => Err(app_err!("document has {n} top-level elements, expected exactly one")),
        }
    }

    /// The root element of the document.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Select all elements matching a path, in document order.
    ///
    /// Steps are matched against the children of the root element, so the
    /// root's own name never appears in a path.
    #[must_use]
    pub fn select(&self, path: &FieldPath) -> Vec<&Element> {
        let mut frontier: Vec<&Element> = vec![&self.root];
        for step in path.steps() {
            frontier = frontier
                .iter()
                .flat_map(|element| element.children.iter())
                .filter(|child| child.name() == step)
                .collect();
        }
        frontier
    }

    /// Extract all non-empty values matched by a path, in document order.
    #[must_use]
    pub fn values(&self, path: &FieldPath) -> Vec<String> {
        self.select(path)
            .into_iter()
            .filter_map(|element| element.path_value(path))
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Extract the first non-empty value matched by a path, or an empty string.
    #[must_use]
    pub fn first_value(&self, path: &FieldPath) -> String {
        self.values(path).into_iter().next().unwrap_or_default()
    }
}

fn element_from_start(local_name: &[u8], attributes: quick_xml::events::attributes::Attributes<'_>) -> crate::Result<Element> {
    let mut element = Element {
        name: core::str::from_utf8(local_name)?.to_string(),
        ..Element::default()
    };

    for attribute in attributes {
        let attribute = attribute?;
        let name = core::str::from_utf8(attribute.key.local_name().as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((name, value));
    }

    Ok(element)
}

fn child_collector(stack: &mut Vec<Element>) -> crate::Result<&mut Element> {
    stack.last_mut().ok_or_else(|| app_err!("malformed XML: content outside of root element"))
}
