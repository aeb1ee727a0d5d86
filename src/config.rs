//! Global configurations — the search engine's state — and their successor relation.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::bag::MessageBag;
use crate::error::{Error, Result};
use crate::fingerprint::{self, Fingerprint};
use crate::message::{Address, MessageEnvelope, NodeHandler};

/// One reachable global state: every node's local state, the network's in-flight messages, and
/// a link to the configuration this one was reached from.
///
/// Immutable after construction. The fingerprint depends only on `nodes` and `bag`, never on
/// `parent` — two configurations reached by different paths but with identical nodes and bag
/// compare equal for dedup purposes, which is exactly what lets the explorer's visited set work.
pub struct Configuration<N: NodeHandler> {
    nodes: BTreeMap<Address, N>,
    bag: MessageBag<N::Message>,
    parent: Option<Arc<Configuration<N>>>,
}

// Hand-written rather than derived: `derive(Clone)`/`derive(Debug)` only bound the struct's own
// type parameter `N`, not the associated type `N::Message` buried inside `MessageBag`, so a
// plain derive would demand `N::Message: Clone`/`Debug` without ever expressing it.
impl<N: NodeHandler> Clone for Configuration<N> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            bag: self.bag.clone(),
            parent: self.parent.clone(),
        }
    }
}

impl<N> std::fmt::Debug for Configuration<N>
where
    N: NodeHandler + std::fmt::Debug,
    N::Message: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("nodes", &self.nodes)
            .field("bag", &self.bag)
            .field("parent", &self.parent.as_ref().map(|_| "<parent>"))
            .finish()
    }
}

impl<N: NodeHandler> Configuration<N> {
    /// The node states making up this configuration, keyed by address.
    #[must_use]
    pub fn nodes(&self) -> &BTreeMap<Address, N> {
        &self.nodes
    }

    /// The network's in-flight messages.
    #[must_use]
    pub fn bag(&self) -> &MessageBag<N::Message> {
        &self.bag
    }

    /// The configuration this one was reached from, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Configuration<N>>> {
        self.parent.as_ref()
    }

    /// The canonical fingerprint of this configuration: nodes in ascending address order,
    /// followed by the bag's own fingerprint. Never depends on `parent`.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let nodes = fingerprint::mapping(
            self.nodes
                .iter()
                .map(|(addr, node)| (addr.fingerprint(), Some(node.fingerprint()))),
        );
        format!("{{\"nodes\":{},\"bag\":{}}}", nodes, self.bag.fingerprint())
    }

    /// Delivers the one message pending from `from` to `to`, if any, producing the resulting
    /// child configuration.
    ///
    /// Returns `Ok(None)` when no such message is pending (not an error — §4.4 treats this as
    /// the ordinary "nothing to deliver" case). Returns `Err` if the handler violates the
    /// [`NodeHandler`] contract.
    pub fn successor(&self, from: &Address, to: &Address) -> Result<Option<Self>> {
        let (message, bag_after_take) = self.bag.take(from, to);
        let Some(message) = message else {
            return Ok(None);
        };
        // Deep-copy discipline (spec §4.3): the handler gets its own clone of the message, never
        // a value that is still aliased inside `bag_after_take` or any sibling branch.
        let message_for_handler = message.clone();
        let node = self
            .nodes
            .get(to)
            .expect("bag invariant: every destination is a key of nodes");
        let (node_prime, outgoing) = node.receive(&message_for_handler, from);
        if node_prime.address() != to {
            warn!(
                target: "statespace::config",
                "handler violation at {to}: receive() returned a node addressed {}",
                node_prime.address()
            );
            return Err(Error::HandlerViolation {
                address: to.clone(),
                returned: node_prime.address().clone(),
            });
        }

        let envelopes = outgoing
            .into_iter()
            .map(|(msg, dest)| MessageEnvelope::new(msg, to.clone(), dest));
        let bag = bag_after_take.send(envelopes);

        let mut nodes = self.nodes.clone();
        nodes.insert(to.clone(), node_prime);

        Ok(Some(Self {
            nodes,
            bag,
            parent: Some(Arc::new(self.clone())),
        }))
    }

    /// Every successor reachable by delivering exactly one pending message, in the deterministic
    /// order required by §4.4: destinations ascending, then within each destination sources
    /// ascending.
    pub fn successors(&self) -> Result<Vec<Self>> {
        let mut out = Vec::new();
        for to in self.bag.destinations().cloned().collect::<Vec<_>>() {
            for from in self.bag.pending(&to).cloned().collect::<Vec<_>>() {
                if let Some(child) = self.successor(&from, &to)? {
                    out.push(child);
                }
            }
        }
        Ok(out)
    }
}

/// Constructs the root configuration from a node list and the starting envelopes to deliver.
///
/// Fails with [`Error::IllFormedInitial`] if two nodes share an address, or if a starting
/// envelope targets an address absent from `node_list` — this crate chooses fail-fast at
/// construction over silently dropping messages to unknown addresses (an explicit resolution of
/// an ambiguity in the system this crate is modeled on).
pub fn build_initial<N: NodeHandler>(
    node_list: Vec<N>,
    starting_envelopes: Vec<MessageEnvelope<N::Message>>,
) -> Result<Configuration<N>> {
    let mut nodes = BTreeMap::new();
    for node in node_list {
        let address = node.address().clone();
        if nodes.insert(address.clone(), node).is_some() {
            return Err(Error::IllFormedInitial(format!(
                "duplicate node address {address}"
            )));
        }
    }

    for envelope in &starting_envelopes {
        if !nodes.contains_key(&envelope.to) {
            return Err(Error::IllFormedInitial(format!(
                "starting envelope targets unknown address {}",
                envelope.to
            )));
        }
    }

    let bag = MessageBag::new().send(starting_envelopes);
    debug!("built initial configuration over {} node(s)", nodes.len());
    Ok(Configuration {
        nodes,
        bag,
        parent: None,
    })
}

/// Injects an exogenous message into an existing configuration without invoking any handler,
/// producing a direct child. Models a client or operator delivering a message mid-run.
///
/// Fails with [`Error::IllFormedInitial`] if `to` is not a known node address, preserving the
/// same "every destination is a key of nodes" invariant [`build_initial`] establishes.
pub fn send_successor<N: NodeHandler>(
    config: &Configuration<N>,
    msg: N::Message,
    from: impl Into<Address>,
    to: impl Into<Address>,
) -> Result<Configuration<N>> {
    let to = to.into();
    if !config.nodes.contains_key(&to) {
        return Err(Error::IllFormedInitial(format!(
            "injected envelope targets unknown address {to}"
        )));
    }
    let bag = config
        .bag
        .send(vec![MessageEnvelope::new(msg, from, to)]);
    Ok(Configuration {
        nodes: config.nodes.clone(),
        bag,
        parent: Some(Arc::new(config.clone())),
    })
}


impl<N: NodeHandler> PartialEq for Configuration<N> {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

impl<N: NodeHandler> Eq for Configuration<N> {}
