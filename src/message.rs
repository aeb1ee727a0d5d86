//! Addresses, message envelopes, and the node-handler contract user algorithms implement.

use std::fmt;

use crate::fingerprint::Fingerprint;

/// An opaque, string-like identifier for a node, unique per node within one run.
///
/// Ordered and hashed by its string value so it can serve as a map key for canonical
/// serialization (nodes and funnels are walked in ascending address order, see
/// [`crate::config::Configuration`] and [`crate::bag::MessageBag`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// Builds an address from anything string-like.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrows the address as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Fingerprint for Address {
    fn fingerprint(&self) -> String {
        self.0.fingerprint()
    }
}

/// A message in flight, paired with its source and destination.
///
/// Produced by [`NodeHandler::receive`] and by callers of
/// [`send_successor`](crate::config::send_successor); consumed by
/// [`MessageBag::send`](crate::bag::MessageBag::send).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEnvelope<M> {
    /// The message payload.
    pub message: M,
    /// The address that produced the message.
    pub from: Address,
    /// The address the message is destined for.
    pub to: Address,
}

impl<M> MessageEnvelope<M> {
    /// Builds an envelope from its three parts.
    pub fn new(message: M, from: impl Into<Address>, to: impl Into<Address>) -> Self {
        Self {
            message,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The pure transition contract an algorithm's node type must implement.
///
/// `receive` takes `&self` and returns a fresh `Self` rather than mutating in place: this is the
/// contract's way of guaranteeing the returned node "must not share mutable state with `N`"
/// (there is no mutable reference in the signature for it to share). Implementations must not
/// perform I/O, read a clock, or consult a source of randomness — doing so invalidates the
/// soundness of every search built on top of this trait.
pub trait NodeHandler: Fingerprint + Clone {
    /// The message type this node exchanges with its peers.
    type Message: Fingerprint + Clone;

    /// This node's address. Must be stable across calls to `receive`.
    fn address(&self) -> &Address;

    /// Delivers `msg`, received from `from`, to this node, returning the node's new state and
    /// any messages it emits as a result.
    ///
    /// The returned outgoing list is always freshly allocated by the implementation; the core
    /// never reuses a buffer across calls.
    fn receive(
        &self,
        msg: &Self::Message,
        from: &Address,
    ) -> (Self, Vec<(Self::Message, Address)>);
}
