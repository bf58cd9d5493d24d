//! Request-level error kinds.
//!
//! Every failure in the rewrite pipeline collapses into one of these kinds.
//! Component errors (playlist parsing, device lookup) convert into [`Error`]
//! and keep their original error as the `source()`.

/// Boxed error used as the source of pipeline failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error kinds surfaced by the rewrite pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The device-profile lookup failed or returned an unusable document.
    #[error("Device resolution failed: {0}")]
    Resolution(#[source] BoxError),

    /// The upstream body is not a well-formed master playlist.
    #[error("Malformed playlist: {0}")]
    Parse(#[source] BoxError),

    /// The upstream origin could not be reached.
    #[error("Origin request failed: {0}")]
    Origin(#[source] BoxError),

    /// Any other failure inside the pipeline.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Create a Resolution error.
    pub fn resolution<E: Into<BoxError>>(err: E) -> Self {
        Self::Resolution(err.into())
    }

    /// Create a Parse error.
    pub fn parse<E: Into<BoxError>>(err: E) -> Self {
        Self::Parse(err.into())
    }

    /// Create an Origin error.
    pub fn origin<E: Into<BoxError>>(err: E) -> Self {
        Self::Origin(err.into())
    }

    /// Create a Runtime error.
    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        Self::Runtime(msg.into())
    }

    /// Machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Resolution(_) => "resolution_error",
            Self::Parse(_) => "parse_error",
            Self::Origin(_) => "origin_error",
            Self::Runtime(_) => "runtime_error",
        }
    }

    /// HTTP status for this error.
    ///
    /// Every kind is fatal to the request and maps to 500.
    pub fn http_status(&self) -> u16 {
        500
    }

    /// Messages of the `source()` chain, outermost cause first.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
