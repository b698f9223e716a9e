//! Pluggable validation of candidate file content.
//!
//! A [`Validator`] sees the full text a file would have after an edit and
//! either accepts it or returns a [`ValidationError`]. The editor never
//! interprets the content itself; every acceptance decision comes from here.

mod syntax;
#[cfg(test)]
pub(crate) mod test_doubles;

use std::fmt;
use std::path::Path;

use crate::error::ValidationError;

pub use syntax::SyntaxValidator;

/// Decides whether candidate content may be written to `path`.
pub trait Validator {
    /// Checks `candidate`, the complete prospective content of `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing why the content is rejected.
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError>;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError> {
        (**self).validate(path, candidate)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError> {
        (**self).validate(path, candidate)
    }
}

/// Accepts every candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _path: &Path, _candidate: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Validator backed by a closure. Built with [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnValidator<F> {
    check: F,
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Path, &str) -> Result<(), ValidationError>,
{
    fn validate(&self, path: &Path, candidate: &str) -> Result<(), ValidationError> {
        (self.check)(path, candidate)
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

/// Wraps a closure as a [`Validator`].
///
/// ```ignore
/// let no_tabs = safesplice::from_fn(|_path, text| {
///     if text.contains('\t') {
///         Err(safesplice::ValidationError::new("tabs are not allowed"))
///     } else {
///         Ok(())
///     }
/// });
/// ```
#[must_use]
pub const fn from_fn<F>(check: F) -> FnValidator<F>
where
    F: Fn(&Path, &str) -> Result<(), ValidationError>,
{
    FnValidator { check }
}
