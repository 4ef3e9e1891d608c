//! Wrapping arbitrary failures into the domain error model, and finding the
//! domain error again through any number of wraps.
//!
//! `wrap` guarantees that every error it returns leads, by walking
//! [`std::error::Error::source`], to a [`DomainError`]:
//!
//! - an error that already is or contains a `DomainError` is kept unchanged
//!   and only gets an outer contextual message;
//! - any other error becomes the cause of a new `System` error carrying the
//!   "converted" message, itself behind the contextual message.

use thiserror::Error;

use crate::error::{BoxError, DomainError, ErrorKind};
use crate::labels;

/// Placeholder substituted with the wrapped error's rendering.
pub const WRAP_PLACEHOLDER: &str = "{err}";

/// An outer contextual message around an inner error.
///
/// The template is split once at the first [`WRAP_PLACEHOLDER`].
#[derive(Debug, Error)]
#[error("{before}{inner}{after}")]
pub struct Wrapped {
    before: String,
    after: String,
    #[source]
    inner: BoxError,
}

impl Wrapped {
    fn new(template: &str, inner: BoxError) -> Self {
        let (before, after) = match template.split_once(WRAP_PLACEHOLDER) {
            Some((before, after)) => (before.to_string(), after.to_string()),
            None => (format!("{template} ("), ")".to_string()),
        };
        Self { before, after, inner }
    }

    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

/// Wrap `err` with a contextual message.
///
/// `message` may contain [`WRAP_PLACEHOLDER`]; otherwise ` ({err})` is
/// appended. An empty message adds no context and returns the (possibly
/// converted) error itself.
pub fn wrap(message: &str, err: impl Into<BoxError>) -> BoxError {
    let err: BoxError = err.into();
    let err: BoxError = if find_domain_error(err.as_ref()).is_some() {
        err
    } else {
        tracing::debug!(cause = %err, "converting foreign error into a system domain error");
        Box::new(DomainError::new(ErrorKind::System, labels::current().converted.clone()).with_cause(err))
    };
    if message.is_empty() {
        err
    } else {
        Box::new(Wrapped::new(message, err))
    }
}

/// [`wrap`], passing an absent error straight through.
pub fn wrap_opt(message: &str, err: Option<impl Into<BoxError>>) -> Option<BoxError> {
    err.map(|err| wrap(message, err))
}

/// `wrap` for the error arm of a `Result`.
pub trait ResultExt<T> {
    fn wrap_err(self, message: &str) -> Result<T, BoxError>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    fn wrap_err(self, message: &str) -> Result<T, BoxError> {
        self.map_err(|err| wrap(message, err))
    }
}

/// The first (outermost) [`DomainError`] found walking from `err` toward its
/// root cause.
pub fn find_domain_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a DomainError> {
    chain(err).find_map(|e| e.downcast_ref::<DomainError>())
}

/// Whether an error equal to `target` appears anywhere in `err`'s chain.
///
/// Only links whose concrete type is `T` are compared, so unrelated error
/// types never match, zero-sized ones included.
pub fn chain_contains<T>(err: &(dyn std::error::Error + 'static), target: &T) -> bool
where
    T: std::error::Error + PartialEq + 'static,
{
    chain(err).any(|e| e.downcast_ref::<T>() == Some(target))
}

/// Iterate `err` and every source below it.
pub fn chain<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> impl Iterator<Item = &'a (dyn std::error::Error + 'static)> {
    core::iter::successors(Some(err), |e| e.source())
}
