use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

pub type GridironResult<T> = Result<T, GridironError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidConfig,
    Data,
    Infeasible,
    Engine,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// Error kinds surfaced by the optimizer. Conditions the engine can
/// recover from (stagnation, diversity shortfall, cancellation) are
/// flags on the result object, not errors.
#[derive(Debug)]
pub enum GridironError {
    /// Missing or invalid configuration. Fatal; no attempt to continue.
    InvalidConfig { message: ErrString },
    /// Malformed input rows. Offending rows are dropped; escalated to
    /// [GridironError::InvalidConfig] when the surviving pool cannot
    /// satisfy the position map.
    Data { message: ErrString },
    /// No valid lineup survived initial populate + validate.
    Infeasible { message: ErrString },
    /// Invariant the engine could not re-establish mid-run.
    Engine { message: ErrString },

    Context {
        context: ErrorContext,
        source: Box<GridironError>,
    },
}

impl GridironError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::Data { .. } => ErrorCode::Data,
            Self::Infeasible { .. } => ErrorCode::Infeasible,
            Self::Engine { .. } => ErrorCode::Engine,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        GridironError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
        }
    }
}

impl Display for GridironError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "Invalid configuration: {}", message),
            Self::Data { message } => write!(f, "Data error: {}", message),
            Self::Infeasible { message } => write!(f, "Infeasible: {}", message),
            Self::Engine { message } => write!(f, "Engine error: {}", message),
            Self::Context {
                context, source, ..
            } => write!(f, "{}\nCaused by: {}", context, source),
        }
    }
}

impl std::error::Error for GridironError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}

impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorContext {}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> GridironResult<T>;
    fn with_context<F: FnOnce() -> String>(self, f: F) -> GridironResult<T>;
}

impl<T, E: Into<GridironError>> ResultExt<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> GridironResult<T> {
        self.map_err(|e| e.into().with_context(msg))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> GridironResult<T> {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

#[macro_export]
macro_rules! gridiron_err {
    (InvalidConfig: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GridironError::InvalidConfig { message: format!($fmt, $($arg),*).into() })
    };
    (Data: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GridironError::Data { message: format!($fmt, $($arg),*).into() })
    };
    (Infeasible: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GridironError::Infeasible { message: format!($fmt, $($arg),*).into() })
    };
    (Engine: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GridironError::Engine { message: format!($fmt, $($arg),*).into() })
    };
}

#[macro_export]
macro_rules! gridiron_bail {
    ($($tt:tt)+) => { return Err($crate::gridiron_err!($($tt)+)) };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::gridiron_bail!($($tt)+); }
    };
}
