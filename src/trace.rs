//! Ancestor-chain reconstruction for counter-example traces.

use crate::config::Configuration;
use crate::message::NodeHandler;

/// The result of a [`trace`] call.
pub struct TraceResult<N: NodeHandler> {
    /// The configurations along the walk from `start` to the traced configuration (inclusive of
    /// both ends, when `start` was reached) for which the predicate held, in that start-to-end
    /// order.
    pub path: Vec<Configuration<N>>,
    /// Whether `start`'s fingerprint was actually found among the ancestors walked. `false` is
    /// the `TraceGap` diagnostic of this crate's governing spec §7 — reported as data, not as an
    /// error.
    pub reached_start: bool,
}

/// Walks `parent` links from `configuration` back toward `start`, collecting every ancestor
/// along the way (including `configuration` and, if reached, `start` itself) for which
/// `predicate` holds.
///
/// `start` is identified by fingerprint equality, not by identity — any ancestor whose
/// fingerprint matches `start`'s counts as having reached it. If the walk runs off the root of
/// the forest without finding `start`, `reached_start` is `false` and `path` holds whatever was
/// collected before that point.
pub fn trace<N: NodeHandler>(
    configuration: &Configuration<N>,
    start: &Configuration<N>,
    predicate: impl Fn(&Configuration<N>) -> bool,
) -> TraceResult<N> {
    let start_fp = start.fingerprint();
    let mut collected = Vec::new();
    let mut current = Some(configuration.clone());
    let mut reached_start = false;

    while let Some(config) = current {
        let is_start = config.fingerprint() == start_fp;
        if predicate(&config) {
            collected.push(config.clone());
        }
        if is_start {
            reached_start = true;
            break;
        }
        current = config.parent().map(|arc| (**arc).clone());
    }

    collected.reverse();
    TraceResult {
        path: collected,
        reached_start,
    }
}
