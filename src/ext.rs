use crate::chain::{Chain, DynError, Message};

/// Context attachment for fallible results.
///
/// `Ok` values pass through untouched, an `Err` becomes the cause of a new
/// outer [`Chain`] node.
pub trait ResultExt<T> {
    /// Puts `parent` in front of the error.
    fn wrap_err<P>(self, parent: P) -> Result<T, Chain>
    where
        P: Into<Box<DynError>>;

    fn with_message(self, message: impl Into<Message>) -> Result<T, Chain>;

    /// Like [`ResultExt::with_message`], the message is only built on error.
    fn with_message_fn<M, F>(self, message: F) -> Result<T, Chain>
    where
        M: Into<Message>,
        F: FnOnce() -> M;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Box<DynError>>,
{
    fn wrap_err<P>(self, parent: P) -> Result<T, Chain>
    where
        P: Into<Box<DynError>>,
    {
        self.map_err(|cause| Chain::wrap(parent, Some(cause)))
    }

    fn with_message(self, message: impl Into<Message>) -> Result<T, Chain> {
        self.map_err(|err| Chain::wrap(message.into(), Some(err)))
    }

    fn with_message_fn<M, F>(self, message: F) -> Result<T, Chain>
    where
        M: Into<Message>,
        F: FnOnce() -> M,
    {
        self.map_err(|err| Chain::wrap(message().into(), Some(err)))
    }
}
