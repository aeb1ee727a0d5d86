//! Immutable network message storage: [`MessageFunnel`] and [`MessageBag`].
//!
//! See the crate's governing spec §4.2 for the full contract. The defining restriction is that
//! each `(destination, source)` pair holds at most one in-flight message — a second send from the
//! same source before the first is delivered overwrites it. This funnel-not-queue rule is what
//! keeps idempotent-resend algorithms (Paxos's repeated PREPAREs, say) from exploding the
//! reachable state space.

use std::collections::BTreeMap;

use crate::fingerprint::{self, Fingerprint};
use crate::message::{Address, MessageEnvelope};

/// The messages pending for one destination, keyed by source address.
///
/// At most one message is stored per source. Ordered by source address so that fingerprinting
/// and successor enumeration are both deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFunnel<M> {
    by_source: BTreeMap<Address, M>,
}

impl<M> Default for MessageFunnel<M> {
    fn default() -> Self {
        Self {
            by_source: BTreeMap::new(),
        }
    }
}

impl<M: Clone> MessageFunnel<M> {
    /// An empty funnel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no message is pending in this funnel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Returns a funnel with `message` pending from `from`, overwriting any message already
    /// pending from that same source.
    #[must_use]
    pub fn with_message(&self, from: Address, message: M) -> Self {
        let mut by_source = self.by_source.clone();
        by_source.insert(from, message);
        Self { by_source }
    }

    /// Returns the message pending from `from`, if any, together with the funnel that remains
    /// after removing it.
    #[must_use]
    pub fn take(&self, from: &Address) -> (Option<M>, Self) {
        if !self.by_source.contains_key(from) {
            return (None, self.clone());
        }
        let mut by_source = self.by_source.clone();
        let message = by_source.remove(from);
        (message, Self { by_source })
    }

    /// The sources with a message currently pending, in ascending address order.
    pub fn pending(&self) -> impl Iterator<Item = &Address> {
        self.by_source.keys()
    }
}

impl<M: Fingerprint> Fingerprint for MessageFunnel<M> {
    fn fingerprint(&self) -> String {
        fingerprint::mapping(
            self.by_source
                .iter()
                .map(|(src, msg)| (src.fingerprint(), Some(msg.fingerprint()))),
        )
    }
}

/// The whole network's in-flight message store, keyed by destination address.
///
/// Destinations with an empty funnel are never represented: an absent key and a key mapped to an
/// empty funnel compare equal for every purpose the bag exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBag<M> {
    by_destination: BTreeMap<Address, MessageFunnel<M>>,
}

impl<M> Default for MessageBag<M> {
    fn default() -> Self {
        Self {
            by_destination: BTreeMap::new(),
        }
    }
}

impl<M: Clone> MessageBag<M> {
    /// An empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a bag with every envelope in `envelopes` added, in order. Envelopes sharing a
    /// `(to, from)` pair overwrite earlier ones in `envelopes`, per the funnel rule.
    #[must_use]
    pub fn send(&self, envelopes: impl IntoIterator<Item = MessageEnvelope<M>>) -> Self {
        let mut by_destination = self.by_destination.clone();
        for envelope in envelopes {
            let funnel = by_destination
                .get(&envelope.to)
                .cloned()
                .unwrap_or_default();
            by_destination.insert(envelope.to, funnel.with_message(envelope.from, envelope.message));
        }
        Self { by_destination }
    }

    /// Returns the message pending from `from` to `to`, if any, together with the bag that
    /// remains after removing it. Destinations absent from the bag behave as if they held an
    /// empty funnel.
    #[must_use]
    pub fn take(&self, from: &Address, to: &Address) -> (Option<M>, Self) {
        let Some(funnel) = self.by_destination.get(to) else {
            return (None, self.clone());
        };
        let (message, remaining) = funnel.take(from);
        if message.is_none() {
            return (None, self.clone());
        }
        let mut by_destination = self.by_destination.clone();
        if remaining.is_empty() {
            by_destination.remove(to);
        } else {
            by_destination.insert(to.clone(), remaining);
        }
        (message, Self { by_destination })
    }

    /// The sources with a message currently pending for `to`, in ascending address order. Empty
    /// for a destination absent from the bag.
    pub fn pending(&self, to: &Address) -> Box<dyn Iterator<Item = &Address> + '_> {
        match self.by_destination.get(to) {
            Some(funnel) => Box::new(funnel.pending()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Destinations that currently have at least one message pending, in ascending address
    /// order.
    pub fn destinations(&self) -> impl Iterator<Item = &Address> {
        self.by_destination.keys()
    }
}

impl<M: Fingerprint> Fingerprint for MessageBag<M> {
    fn fingerprint(&self) -> String {
        fingerprint::mapping(
            self.by_destination
                .iter()
                .map(|(dst, funnel)| (dst.fingerprint(), Some(funnel.fingerprint()))),
        )
    }
}
