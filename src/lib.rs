//! Chained errors: attach context to a failure and still get at everything
//! underneath it.
//!
//! ```
//! use causal::{find, is, wrap, Message};
//!
//! let chain = wrap(Some(Message::new("parent")), Some(Message::new("cause"))).unwrap();
//! assert_eq!(chain.to_string(), "parent: cause");
//! assert!(is(Some(&chain), &Message::new("cause")));
//! assert_eq!(find::<Message>(Some(&chain)), Some(&Message::new("parent")));
//! ```

mod chain;
mod ext;
mod matching;
mod ops;

pub use chain::*;
pub use ext::*;
pub use matching::*;
pub use ops::*;
