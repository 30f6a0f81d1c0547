//! Aggregation of several failures into one reportable error.

use std::fmt;

/// Bundles the messages of several errors, preserving insertion order.
///
/// An empty `MultiError` is not a failure. Use [`MultiError::into_result`]
/// to turn it into a run result so that "nothing went wrong" is always
/// `Ok(())` and never an error that renders to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiError {
    list: Vec<String>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the message of `err`. `None` is a no-op.
    pub fn insert<E: fmt::Display>(&mut self, err: Option<E>) {
        if let Some(err) = err {
            self.list.push(err.to_string());
        }
    }

    /// Number of collected messages.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Collected messages in insertion order.
    pub fn messages(&self) -> &[String] {
        &self.list
    }

    /// `Ok(())` when nothing was collected, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), MultiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for text in &self.list {
            writeln!(f, "{}", text)?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

impl Extend<String> for MultiError {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl FromIterator<String> for MultiError {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}
