//! Failure kinds the core recognizes.
//!
//! `DepthExceeded`, `NoMatch`, and `TraceGap` are explicitly *not* errors (see the crate's
//! governing spec, §7) — they are represented as ordinary return values elsewhere in the crate,
//! not as variants here.

use thiserror::Error;

use crate::message::Address;

/// Failures that can surface from [`build_initial`](crate::config::build_initial) or
/// [`explore`](crate::explorer::explore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A starting envelope targets an address absent from the node list, or two nodes in the
    /// node list share an address.
    #[error("ill-formed initial configuration: {0}")]
    IllFormedInitial(String),

    /// A node handler violated the [`NodeHandler`](crate::message::NodeHandler) contract: the
    /// node returned from `receive` does not carry the same address as the node it was called
    /// on.
    #[error("handler violation at {address}: receive() returned a node addressed {returned}")]
    HandlerViolation {
        /// The address the handler was invoked for.
        address: Address,
        /// The (wrong) address found on the returned node.
        returned: Address,
    },
}

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, Error>;
