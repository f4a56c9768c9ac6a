//! Formatting entry points

/// Create a single-node [`Failure`](crate::Failure) from a format string.
///
/// ```rust
/// let err = failchain::failure!("{} went {}", "something", "wrong");
/// assert_eq!(err.message(), "something went wrong");
/// ```
#[macro_export]
macro_rules! failure {
    ($($arg:tt)*) => {
        $crate::newf(::std::format_args!($($arg)*))
    };
}

/// Start a [`Builder`](crate::Builder) with a message from a format string.
///
/// ```rust
/// let err = failchain::build!("page {} not found", "index")
///     .with_field("page", "index")
///     .done();
/// assert_eq!(err.message(), "page index not found");
/// ```
#[macro_export]
macro_rules! build {
    ($($arg:tt)*) => {
        $crate::buildf(::std::format_args!($($arg)*))
    };
}
