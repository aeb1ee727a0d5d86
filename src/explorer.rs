//! Breadth-first exploration of the reachable configuration graph.

use std::collections::VecDeque;

use fxhash::FxHashSet;
use log::{debug, trace};

use crate::config::Configuration;
use crate::error::Result;
use crate::message::NodeHandler;

/// The result of one [`explore`] call.
pub struct ExploreResult<N: NodeHandler> {
    /// Configurations satisfying the predicate, in discovery order.
    pub matches: Vec<Configuration<N>>,
    /// Every fingerprint dequeued during the search, for cost reporting and test assertions.
    pub visited: FxHashSet<String>,
}

/// Explores every configuration reachable from `initial` up to `depth_limit`, recording those
/// satisfying `predicate`.
///
/// `depth_limit` bounds the search: a configuration dequeued at depth `>= depth_limit` is
/// discarded without being expanded (so `depth_limit = 0` visits nothing at all, and
/// `depth_limit = 1` visits only `initial`). Pass [`usize::MAX`] to mean "until exhaustion" —
/// this terminates because the funnel overwrite rule and finite node-state alphabets make the
/// reachable graph finite.
///
/// `skip`, when supplied, prunes a configuration from both the match set and expansion without
/// marking it visited — other paths into the same configuration may still be explored. This
/// mirrors the "do not mark visited" default the search engine this crate is modeled on leaves
/// ambiguous for its own `skip` hook.
///
/// Traversal is breadth-first: the frontier is a plain FIFO queue, so configurations are
/// dequeued in non-decreasing depth order, and two runs over equal inputs return `matches` in
/// identical order every time.
pub fn explore<N: NodeHandler>(
    initial: Configuration<N>,
    depth_limit: usize,
    predicate: impl Fn(&Configuration<N>) -> bool,
    skip: Option<impl Fn(&Configuration<N>) -> bool>,
) -> Result<ExploreResult<N>> {
    let mut matches = Vec::new();
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut queue: VecDeque<(usize, Configuration<N>)> = VecDeque::new();
    queue.push_back((0, initial));

    while let Some((depth, config)) = queue.pop_front() {
        let fp = config.fingerprint();
        if visited.contains(&fp) || depth >= depth_limit {
            continue;
        }

        if let Some(skip) = skip.as_ref() {
            if skip(&config) {
                trace!(target: "statespace::explore", "skipping {fp} at depth {depth}");
                continue;
            }
        }

        trace!(target: "statespace::explore", "visiting {fp} at depth {depth}");
        if predicate(&config) {
            debug!(target: "statespace::explore", "match at depth {depth}: {fp}");
            matches.push(config.clone());
        }

        visited.insert(fp);

        for child in config.successors()? {
            let child_fp = child.fingerprint();
            if !visited.contains(&child_fp) {
                queue.push_back((depth + 1, child));
            }
        }
    }

    Ok(ExploreResult { matches, visited })
}
