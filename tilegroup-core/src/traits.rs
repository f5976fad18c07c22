use crate::{error::RunError, runner::Invocation};

/// The [`Executor`] trait is the process boundary of the harness: it runs one
/// benchmark invocation and hands back the summary lines it produced.
///
/// The collector only ever sees these lines, so tests can drive the whole
/// clean → run → collect pipeline with a canned executor.
pub trait Executor {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError>;
}

impl<E: Executor + ?Sized> Executor for &E {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError> {
    (**self).execute(invocation)
  }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
  fn execute(&self, invocation: &Invocation) -> Result<Vec<String>, RunError> {
    (**self).execute(invocation)
  }
}
