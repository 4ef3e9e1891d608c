//! The presenter (result sink) contract.
//!
//! A presenter takes the answer of a use case and turns it into whatever the
//! caller needs: a serialized HTTP response, a rendered page, a committed
//! transaction. Use cases never return values; they hand exactly one
//! [`Output`] to the presenter they were given.

use core::fmt;

use cleanflow_core::{find_domain_error, BoxError, DomainError};

/// The (answer, error) pair handed to a presenter.
///
/// On failure the answer is usually the zero value of `A`; presenters must
/// accept that pairing.
pub struct Output<A> {
    pub answer: A,
    pub err: Option<BoxError>,
}

impl<A> Output<A> {
    pub fn new(answer: A, err: Option<BoxError>) -> Self {
        Self { answer, err }
    }

    pub fn ok(answer: A) -> Self {
        Self { answer, err: None }
    }

    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// The outermost [`DomainError`] in the error chain, if any.
    pub fn domain_error(&self) -> Option<&DomainError> {
        self.err.as_deref().and_then(|err| find_domain_error(err))
    }

    /// Drops the answer when an error is present.
    pub fn into_result(self) -> Result<A, BoxError> {
        match self.err {
            None => Ok(self.answer),
            Some(err) => Err(err),
        }
    }
}

impl<A: Default> Output<A> {
    /// A zero-value answer paired with `err`.
    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self {
            answer: A::default(),
            err: Some(err.into()),
        }
    }
}

impl<A: Default, E: Into<BoxError>> From<Result<A, E>> for Output<A> {
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(answer) => Self::ok(answer),
            Err(err) => Self::failed(err),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Output<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("answer", &self.answer)
            .field("err", &self.err.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

/// Receives the single output of a use case invocation.
pub trait Presenter<A> {
    fn present(&mut self, output: Output<A>);
}

impl<A, F> Presenter<A> for F
where
    F: FnMut(Output<A>),
{
    fn present(&mut self, output: Output<A>) {
        self(output)
    }
}

/// Presenter that keeps the last output and counts presentations.
///
/// Handy in tests and for synchronous callers that just want the result back.
#[derive(Debug)]
pub struct CapturingPresenter<A> {
    output: Option<Output<A>>,
    presentations: usize,
}

impl<A> Default for CapturingPresenter<A> {
    fn default() -> Self {
        Self {
            output: None,
            presentations: 0,
        }
    }
}

impl<A> CapturingPresenter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presentations(&self) -> usize {
        self.presentations
    }

    pub fn output(&self) -> Option<&Output<A>> {
        self.output.as_ref()
    }

    pub fn take(&mut self) -> Option<Output<A>> {
        self.output.take()
    }
}

impl<A> Presenter<A> for CapturingPresenter<A> {
    fn present(&mut self, output: Output<A>) {
        self.presentations += 1;
        self.output = Some(output);
    }
}
