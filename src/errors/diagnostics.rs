use std::slice::Iter;

use tracing::debug;

use super::errors::Error;

/// Append-only collector shared by every phase of a compilation.
///
/// The caller creates it before scanning, hands `&mut` access to each phase
/// and polls [`Diagnostics::had_error`] in between.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn report(&mut self, error: Error) {
        debug!(line = error.get_line(), kind = error.get_error_name(), "{}", error.message());
        self.errors.push(error);
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Number of recorded diagnostics with the given error name.
    pub fn count_of(&self, error_name: &str) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_error_name() == error_name)
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
