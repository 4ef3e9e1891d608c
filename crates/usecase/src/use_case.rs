use cleanflow_core::BoxError;

use crate::presenter::{Output, Presenter};

/// A unit of business logic (use case abstraction).
///
/// A use case works on its input and reports through the presenter it is
/// given. It returns nothing, not even an error: success and failure alike are
/// communicated by calling [`Presenter::present`] exactly once, and returning
/// right after.
///
/// Failures the use case understands should be classified as
/// [`cleanflow_core::DomainError`]s; failures from collaborators should go
/// through [`cleanflow_core::wrap`].
///
/// Implementations may panic. Protection against that is the job of
/// [`crate::RecoveringUseCase`], not of the implementation.
pub trait UseCase<I, A> {
    fn execute(&self, input: I, presenter: &mut dyn Presenter<A>);
}

impl<I, A, U> UseCase<I, A> for &U
where
    U: UseCase<I, A> + ?Sized,
{
    fn execute(&self, input: I, presenter: &mut dyn Presenter<A>) {
        (**self).execute(input, presenter)
    }
}

impl<I, A, U> UseCase<I, A> for Box<U>
where
    U: UseCase<I, A> + ?Sized,
{
    fn execute(&self, input: I, presenter: &mut dyn Presenter<A>) {
        (**self).execute(input, presenter)
    }
}

/// Adapts a plain `Fn(I) -> Result<A, E>` into a [`UseCase`].
///
/// The function's result is forwarded to the presenter; an `Err` is paired
/// with the zero value of `A`. No panic recovery happens here: wrap the
/// adapter in [`crate::RecoveringUseCase`] for that.
#[derive(Debug, Clone)]
pub struct FnUseCase<F> {
    execute_fn: F,
}

impl<F> FnUseCase<F> {
    pub fn new(execute_fn: F) -> Self {
        Self { execute_fn }
    }
}

impl<I, A, E, F> UseCase<I, A> for FnUseCase<F>
where
    F: Fn(I) -> Result<A, E>,
    A: Default,
    E: Into<BoxError>,
{
    fn execute(&self, input: I, presenter: &mut dyn Presenter<A>) {
        presenter.present(Output::from((self.execute_fn)(input)));
    }
}
