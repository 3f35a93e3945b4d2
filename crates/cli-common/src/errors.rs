use std::fmt;

use thiserror::Error;

type Cause = Box<dyn fmt::Debug + Send + Sync>;

/// Errors displayed to the user when using the CLI
#[derive(Debug, Error)]
pub enum DisplayedError {
    /// Errors the user can address by fixing configuration or input, such as
    /// a bad mnemonic or an account that never opted in.
    #[error("User error: {0}: {1:?}")]
    UserError(String, Cause),

    /// Failures of the node or of the tool itself while servicing a request.
    #[error("Internal error: {0}: {1:?}")]
    InternalError(String, Cause),
}

impl DisplayedError {
    /// Process exit status the runner should terminate with.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, DisplayedError::UserError(..))
    }

    pub fn message(&self) -> &str {
        match self {
            DisplayedError::UserError(msg, _) | DisplayedError::InternalError(msg, _) => msg,
        }
    }
}

#[inline]
pub fn user_error<E>(msg: impl Into<String>) -> impl FnOnce(E) -> DisplayedError
where
    E: fmt::Debug + Send + Sync + 'static,
{
    move |e| DisplayedError::UserError(msg.into(), Box::new(e))
}

#[inline]
pub fn internal_error<E>(msg: impl Into<String>) -> impl FnOnce(E) -> DisplayedError
where
    E: fmt::Debug + Send + Sync + 'static,
{
    move |e| DisplayedError::InternalError(msg.into(), Box::new(e))
}

/// Attaches a user-facing message to a fallible result.
pub trait DisplayableError {
    type Output;
    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError>;
}

impl<T, E: fmt::Debug + Send + Sync + 'static> DisplayableError for Result<T, E> {
    type Output = T;

    #[inline]
    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.map_err(user_error(msg))
    }

    #[inline]
    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.map_err(internal_error(msg))
    }
}

impl<T> DisplayableError for Option<T> {
    type Output = T;

    fn user_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.ok_or(()).user_error(msg)
    }

    fn internal_error(self, msg: impl Into<String>) -> Result<Self::Output, DisplayedError> {
        self.ok_or(()).internal_error(msg)
    }
}
