//! Construction entry points that propagate absence.
//!
//! Every function here returns `None` when the error it would put in the new
//! outer node is `None`. No node is ever built around nothing.

use std::error::Error;

use crate::chain::{Chain, DynError, Message};

pub fn new<E>(err: Option<E>) -> Option<Chain>
where
    E: Into<Box<DynError>>,
{
    err.map(Chain::new)
}

/// Links `parent` to `cause`. An absent `cause` makes `parent` the root cause.
pub fn wrap<P, C>(parent: Option<P>, cause: Option<C>) -> Option<Chain>
where
    P: Into<Box<DynError>>,
    C: Into<Box<DynError>>,
{
    parent.map(|parent| Chain::wrap(parent, cause))
}

pub fn new_with_message<E>(err: Option<E>, message: impl Into<Message>) -> Option<Chain>
where
    E: Into<Box<DynError>>,
{
    err.map(|err| Chain::with_message(err, message))
}

pub fn wrap_with_message<P, C>(
    parent: Option<P>,
    cause: Option<C>,
    message: impl Into<Message>,
) -> Option<Chain>
where
    P: Into<Box<DynError>>,
    C: Into<Box<DynError>>,
{
    parent.map(|parent| Chain::wrap_with_message(parent, cause, message))
}

/// One step down the chain: the cause of `err` if it is a [`Chain`] node.
///
/// Anything that is not a chain node unwraps to `None`, even when it has a
/// `source()` of its own. Callers repeat it to walk further.
pub fn unwrap<'a>(err: Option<&'a (dyn Error + 'static)>) -> Option<&'a (dyn Error + 'static)> {
    err?.downcast_ref::<Chain>()?.cause()
}
