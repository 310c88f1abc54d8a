//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Pure handlers (ones not touching any I/O) still return a [`Future`], so
/// callers treat every operation uniformly.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
