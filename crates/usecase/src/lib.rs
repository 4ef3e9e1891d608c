//! `cleanflow-usecase` — use cases and presenters.
//!
//! A [`UseCase`] takes an input and reports its outcome to a [`Presenter`]
//! instead of returning it. Wrapping a use case in [`RecoveringUseCase`]
//! guarantees the presenter is called exactly once per `execute`, even when
//! the use case panics.

pub mod presenter;
pub mod recovery;
pub mod use_case;

pub use presenter::{CapturingPresenter, Output, Presenter};
pub use recovery::{Panicked, RecoveringUseCase};
pub use use_case::{FnUseCase, UseCase};
