//! Panic recovery around a use case.
//!
//! [`RecoveringUseCase`] guarantees that the presenter handed to `execute` is
//! invoked exactly once per call:
//!
//! ```text
//! execute(input, presenter)
//!   ↓
//! inner.execute(input, guard)     (guard forwards the first output only)
//!   ├─ returns normally  → the inner use case has presented
//!   └─ panics            → guard presents Output::failed(System "wrapper recovery")
//!                          unless the inner use case already presented
//! ```
//!
//! The panic never reaches the caller of `execute`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use cleanflow_core::{labels, DomainError};

use crate::presenter::{Output, Presenter};
use crate::use_case::UseCase;

/// Cause attached to the recovery error: the panic payload as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Panicked {
    message: String,
}

impl Panicked {
    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }
}

/// Wraps a use case so that a panic inside it is turned into a `System`
/// [`DomainError`] delivered to the presenter.
///
/// The recovery error carries the configured recovery message
/// ([`labels::Labels::recovery`]) and a [`Panicked`] cause; the answer is the
/// zero value of `A`.
#[derive(Debug, Clone)]
pub struct RecoveringUseCase<U> {
    inner: U,
}

impl<U> RecoveringUseCase<U> {
    pub fn new(inner: U) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &U {
        &self.inner
    }

    pub fn into_inner(self) -> U {
        self.inner
    }
}

impl<I, A, U> UseCase<I, A> for RecoveringUseCase<U>
where
    U: UseCase<I, A>,
    A: Default,
{
    fn execute(&self, input: I, presenter: &mut dyn Presenter<A>) {
        let mut guard = PresentOnce::new(presenter);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.inner.execute(input, &mut guard)));

        match outcome {
            Ok(()) => {
                if !guard.presented {
                    tracing::error!("use case returned without presenting an output");
                }
            }
            Err(payload) => {
                let cause = Panicked::from_payload(payload.as_ref());
                tracing::error!(panic = %cause, "recovered panic in use case");
                if guard.presented {
                    tracing::warn!("use case panicked after presenting; recovery output suppressed");
                    return;
                }
                let err = DomainError::system(labels::current().recovery.clone()).with_cause(cause);
                guard.present(Output::failed(err));
            }
        }
    }
}

/// Forwards the first output to the real presenter and drops the rest.
struct PresentOnce<'a, A> {
    target: &'a mut dyn Presenter<A>,
    presented: bool,
}

impl<'a, A> PresentOnce<'a, A> {
    fn new(target: &'a mut dyn Presenter<A>) -> Self {
        Self {
            target,
            presented: false,
        }
    }
}

impl<A> Presenter<A> for PresentOnce<'_, A> {
    fn present(&mut self, output: Output<A>) {
        if self.presented {
            tracing::warn!("use case presented more than once; extra output dropped");
            return;
        }
        self.presented = true;
        self.target.present(output);
    }
}
