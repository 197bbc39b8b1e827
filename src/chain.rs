use std::error::Error;
use std::fmt;
use std::iter;

/// Any error that can live inside a chain.
pub type DynError = dyn Error + Send + Sync + 'static;

const SEPARATOR: &str = ": ";

/// Plain text promoted into an error, used for the contextual nodes of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{0}")]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One link of an error chain.
///
/// A node shows `displayed` and owns the rest of the chain through `cause`.
/// Rendering walks the links outermost first, joining every node's own text
/// with `": "`, e.g. `grandparent: parent: cause`.
///
/// Nodes are never mutated once built: wrapping always allocates a new outer node.
pub struct Chain {
    displayed: Box<DynError>,
    cause: Option<Box<DynError>>,
}

impl Chain {
    /// Single node chain around `err`.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<DynError>>,
    {
        Self {
            displayed: err.into(),
            cause: None,
        }
    }

    /// `parent` becomes the displayed value, `cause` (if any) the next link.
    ///
    /// Without a cause this is [`Chain::new`]. A bare `None` still needs its
    /// type spelled out:
    ///
    /// ```
    /// use causal::{Chain, Message};
    ///
    /// let chain = Chain::wrap(Message::new("parent"), None::<Message>);
    /// assert_eq!(chain.to_string(), "parent");
    /// assert!(chain.is_root_cause());
    /// ```
    pub fn wrap<P, C>(parent: P, cause: Option<C>) -> Self
    where
        P: Into<Box<DynError>>,
        C: Into<Box<DynError>>,
    {
        Self {
            displayed: parent.into(),
            cause: cause.map(Into::into),
        }
    }

    /// Two level chain: `message` on top of a single node chain around `err`.
    pub fn with_message<E>(err: E, message: impl Into<Message>) -> Self
    where
        E: Into<Box<DynError>>,
    {
        Self::wrap(message.into(), Some(Self::new(err)))
    }

    /// `message` on top of `Chain::wrap(parent, cause)`.
    pub fn wrap_with_message<P, C>(
        parent: P,
        cause: Option<C>,
        message: impl Into<Message>,
    ) -> Self
    where
        P: Into<Box<DynError>>,
        C: Into<Box<DynError>>,
    {
        Self::wrap(message.into(), Some(Self::wrap(parent, cause)))
    }

    pub fn displayed(&self) -> &(dyn Error + 'static) {
        &*self.displayed
    }

    /// The next link, exactly as it was handed to the constructor.
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }

    pub fn is_root_cause(&self) -> bool {
        self.cause.is_none()
    }

    /// The own part of every node down the cause links: each chain node's
    /// displayed value, then the first link that is not a `Chain`.
    fn parts(&self) -> impl Iterator<Item = &(dyn Error + 'static)> + '_ {
        let mut next: Option<&(dyn Error + 'static)> = Some(self);
        iter::from_fn(move || {
            let link = next?;
            match link.downcast_ref::<Chain>() {
                Some(chain) => {
                    next = chain.cause();
                    Some(chain.displayed())
                }
                None => {
                    next = None;
                    Some(link)
                }
            }
        })
    }
}

// Rendering, formatting and dropping loop over the cause links instead of
// recursing, so chain depth is bounded by memory rather than stack.

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Chain ")?;
        f.debug_list().entries(self.parts()).finish()
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(link) = next {
            next = match link.downcast::<Chain>() {
                Ok(mut chain) => chain.cause.take(),
                Err(_) => None,
            };
        }
    }
}

impl Error for Chain {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause()
    }
}

#[cfg(test)]
mod chain_tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn single_node_renders_its_error() {
        let chain = Chain::new(DiskFull);
        assert_eq!(chain.to_string(), "disk full");
        assert!(chain.is_root_cause());
        assert!(chain.source().is_none());
    }

    #[test]
    fn absent_cause_terminates_chain() {
        let chain = Chain::wrap(Message::new("saving"), None::<DiskFull>);
        assert_eq!(chain.to_string(), "saving");
        assert!(chain.cause().is_none());
    }

    #[test]
    fn message_nodes_are_prepended() {
        let chain = Chain::wrap_with_message(Message::new("flush"), Some(DiskFull), "saving");
        assert_eq!(chain.to_string(), "saving: flush: disk full");

        let chain = Chain::with_message(DiskFull, "saving");
        assert_eq!(chain.to_string(), "saving: disk full");
    }

    #[test]
    fn strings_are_promoted_into_errors() {
        let chain = Chain::wrap("outer", Some("inner".to_string()));
        assert_eq!(chain.to_string(), "outer: inner");
    }

    #[test]
    fn source_is_the_stored_cause() {
        let chain = Chain::wrap(Message::new("outer"), Some(DiskFull));
        let cause = chain.cause().unwrap();
        assert!(std::ptr::addr_eq(chain.source().unwrap(), cause));
        assert!(cause.downcast_ref::<DiskFull>().is_some());
    }

    fn deep(depth: usize) -> Chain {
        (1..depth).fold(Chain::new(Message::new("l0")), |cause, i| {
            Chain::wrap(Message::new(format!("l{i}")), Some(cause))
        })
    }

    #[test]
    fn deep_chain_renders_and_drops() {
        let depth = 50_000;
        let chain = deep(depth);

        let rendered = chain.to_string();
        assert!(rendered.starts_with("l49999: l49998: "));
        assert!(rendered.ends_with(": l1: l0"));
        assert_eq!(rendered.matches(SEPARATOR).count(), depth - 1);

        let debugged = format!("{chain:?}");
        assert!(debugged.starts_with("Chain [Message(\"l49999\")"));

        drop(chain);
    }

    #[test]
    fn debug_lists_every_part() {
        let chain = Chain::wrap_with_message(Message::new("flush"), Some(DiskFull), "saving");
        assert_eq!(
            format!("{chain:?}"),
            r#"Chain [Message("saving"), Message("flush"), DiskFull]"#
        );
    }

    #[test]
    fn chain_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Chain>();
    }
}
