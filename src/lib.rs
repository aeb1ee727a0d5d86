//! A bounded state-space explorer for message-passing distributed algorithms.
//!
//! Given a finite set of nodes — each a deterministic message handler with local state — plus an
//! initial bag of in-flight messages, this crate enumerates every reachable global configuration
//! up to a depth bound, deduplicates configurations by canonical fingerprint, and reports those
//! satisfying a caller-supplied predicate together with the ancestor chain that reached each one.
//! It is the engine behind brute-force model checking of small instances of algorithms like
//! leader election or Paxos: an algorithm author implements [`message::NodeHandler`] for their
//! node type, builds a root [`config::Configuration`] with [`config::build_initial`], and hands
//! it to [`explorer::explore`].
//!
//! The concrete algorithm implementations, any pretty-printing or serialization of results, and
//! any notion of wall-clock time are explicitly out of scope for this crate — see the module
//! docs below for what each piece actually owns.
//!
//! # Example
//!
//! ```
//! use statespace::config::build_initial;
//! use statespace::explorer::explore;
//! use statespace::fingerprint::Fingerprint;
//! use statespace::message::{Address, MessageEnvelope, NodeHandler};
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! struct Responder {
//!     address: Address,
//!     replied: bool,
//! }
//!
//! impl Fingerprint for Responder {
//!     fn fingerprint(&self) -> String {
//!         format!("{{\"replied\":{}}}", self.replied)
//!     }
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! struct Ping;
//!
//! impl Fingerprint for Ping {
//!     fn fingerprint(&self) -> String {
//!         "\"ping\"".to_string()
//!     }
//! }
//!
//! impl NodeHandler for Responder {
//!     type Message = Ping;
//!
//!     fn address(&self) -> &Address {
//!         &self.address
//!     }
//!
//!     fn receive(&self, _msg: &Ping, _from: &Address) -> (Self, Vec<(Ping, Address)>) {
//!         (Self { address: self.address.clone(), replied: true }, Vec::new())
//!     }
//! }
//!
//! let node = Responder { address: Address::new("a"), replied: false };
//! let envelope = MessageEnvelope::new(Ping, Address::new("client"), Address::new("a"));
//! let root = build_initial(vec![node], vec![envelope]).unwrap();
//!
//! let result = explore(
//!     root,
//!     usize::MAX,
//!     |c| c.nodes()[&Address::new("a")].replied,
//!     None::<fn(&statespace::Configuration<Responder>) -> bool>,
//! )
//! .unwrap();
//! assert_eq!(result.matches.len(), 1);
//! ```

pub mod bag;
pub mod config;
pub mod error;
pub mod explorer;
pub mod fingerprint;
pub mod message;
pub mod trace;

pub use bag::{MessageBag, MessageFunnel};
pub use config::{build_initial, send_successor, Configuration};
pub use error::{Error, Result};
pub use explorer::{explore, ExploreResult};
pub use fingerprint::Fingerprint;
pub use message::{Address, MessageEnvelope, NodeHandler};
pub use trace::{trace, TraceResult};
