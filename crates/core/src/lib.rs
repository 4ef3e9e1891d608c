//! `cleanflow-core` — the domain error model.
//!
//! Business logic reports every failure as a [`DomainError`]. Failures coming
//! from collaborators are absorbed with [`wrap`], which keeps the original
//! cause reachable and guarantees that [`find_domain_error`] locates a
//! `DomainError` in the result, however many times it was wrapped.

pub mod error;
pub mod labels;
pub mod wrap;

pub use error::{BoxError, DomainError, DomainResult, ErrorKind, ValidationIssue};
pub use labels::{ConfigError, Labels};
pub use wrap::{chain, chain_contains, find_domain_error, wrap, wrap_opt, ResultExt, Wrapped, WRAP_PLACEHOLDER};
