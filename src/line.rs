use crate::element::{Element, Name};
use crate::error::ValidationError;

/// A named, ordered sequence of elements. Lines nest: a `BeamLine` can be an
/// element of another line.
///
/// Order is the physical order of the segments, so equality compares the
/// sequences position by position. Names need not be unique; lookups by name
/// return the first match.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamLine {
    name: Name,
    line: Vec<Element>,
}

impl BeamLine {
    /// # Errors
    /// Returns `EmptyName` if `name` is empty.
    pub fn new(name: impl Into<String>, line: Vec<Element>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Name::new(name)?,
            line,
        })
    }

    pub(crate) fn from_parts(name: Name, line: Vec<Element>) -> Self {
        Self { name, line }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// # Errors
    /// Returns `EmptyName` if `name` is empty; the line keeps its old name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = Name::new_at(name, self.name.as_str())?;
        Ok(())
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.line
    }

    /// Elements are always valid values, so the sequence can be edited freely.
    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.line
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.line.push(element.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.line.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.line.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// The first direct element called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.line.iter().find(|e| e.name() == name)
    }

    /// Sum of the thick segment lengths, descending into nested lines.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.line
            .iter()
            .map(|e| match e {
                Element::BeamLine(nested) => nested.total_length(),
                other => other.length().unwrap_or(0.0),
            })
            .sum()
    }
}

impl Extend<Element> for BeamLine {
    fn extend<T: IntoIterator<Item = Element>>(&mut self, iter: T) {
        self.line.extend(iter);
    }
}

impl<'a> IntoIterator for &'a BeamLine {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.line.iter()
    }
}
