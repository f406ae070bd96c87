//! Read-only queries over a finished [`Network`].
//!
//! | Query                      | Algorithm                        | Optimises          |
//! |----------------------------|----------------------------------|--------------------|
//! | [`reachable`]              | depth-first, pre-order           | —                  |
//! | [`minimize_intersections`] | breadth-first                    | edge count         |
//! | [`fastest_path`]           | uniform-cost, stops at target    | summed traffic cost|
//! | [`path_information`]       | walk consecutive pairs           | —                  |
//!
//! Every query allocates its own visited/cost/predecessor arrays, so queries
//! never interfere with each other and may run in parallel on a shared
//! `&Network`.
//!
//! # Errors and empty results
//!
//! A start or end intersection that is not in the network is an error
//! ([`GraphError::IntersectionNotFound`]).  A disconnected pair is not: the
//! path queries return an empty [`Path`].
//!
//! # Tie-breaking
//!
//! Edges are explored newest first (see [`crate::network`]), so among
//! equally short BFS paths the one through the most recently inserted edge
//! wins.  In [`fastest_path`] a neighbour's predecessor only changes on a
//! strictly cheaper cost, and equal-cost frontier entries leave in the order
//! they were admitted.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use log::trace;

use rn_core::IntersectionId;

use crate::model::Intersection;
use crate::network::Network;
use crate::{GraphError, GraphResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// Intersections from start to end inclusive.  Empty when no path exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub intersections: Vec<Intersection>,
}

impl Path {
    /// The "no path" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// Number of intersections, endpoints included.
    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    /// Number of blocks travelled.  `0` for an empty or single-vertex path.
    pub fn hop_count(&self) -> usize {
        self.intersections.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Intersection> {
        self.intersections.first().copied()
    }

    pub fn end(&self) -> Option<Intersection> {
        self.intersections.last().copied()
    }

    pub fn as_slice(&self) -> &[Intersection] {
        &self.intersections
    }
}

impl AsRef<[Intersection]> for Path {
    fn as_ref(&self) -> &[Intersection] {
        &self.intersections
    }
}

impl From<Path> for Vec<Intersection> {
    fn from(path: Path) -> Self {
        path.intersections
    }
}

// ── PathInfo ──────────────────────────────────────────────────────────────────

/// Aggregate metrics of a path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathInfo {
    /// Sum of block lengths.
    pub total_length: f64,
    /// `total_traffic / total_length`, or `0.0` for a zero-length path.
    pub average_traffic_factor: f64,
    /// Sum of block traffic costs.
    pub total_traffic: f64,
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable start→end path query.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve queries
/// from several threads over the same network.
pub trait PathFinder: Send + Sync {
    fn find_path(
        &self,
        network: &Network,
        start: Intersection,
        end: Intersection,
    ) -> GraphResult<Path>;
}

/// Fewest blocks travelled.  See [`minimize_intersections`].
#[derive(Copy, Clone, Debug, Default)]
pub struct FewestIntersections;

impl PathFinder for FewestIntersections {
    fn find_path(
        &self,
        network: &Network,
        start: Intersection,
        end: Intersection,
    ) -> GraphResult<Path> {
        minimize_intersections(network, start, end)
    }
}

/// Lowest summed traffic cost.  See [`fastest_path`].
#[derive(Copy, Clone, Debug, Default)]
pub struct LeastTraffic;

impl PathFinder for LeastTraffic {
    fn find_path(
        &self,
        network: &Network,
        start: Intersection,
        end: Intersection,
    ) -> GraphResult<Path> {
        fastest_path(network, start, end)
    }
}

// ── Reachability ──────────────────────────────────────────────────────────────

/// Every intersection reachable from `source`, in depth-first pre-order.
///
/// `source` comes first; each vertex appears once.  The order is exactly
/// that of a recursive DFS visiting edges newest first, but uses an
/// explicit stack so long chains cannot overflow the call stack.
pub fn reachable(network: &Network, source: Intersection) -> GraphResult<Vec<Intersection>> {
    let start = network.require(source)?;

    let mut visited = vec![false; network.intersection_count()];
    let mut order = Vec::new();

    visited[start.index()] = true;
    order.push(source);
    let mut stack = vec![network.out_blocks(start)];

    while let Some(edges) = stack.last_mut() {
        match edges.next() {
            Some(block) => {
                let next = block.target;
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    order.push(network.intersection(next));
                    stack.push(network.out_blocks(next));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    trace!("{} intersections reachable from {source}", order.len());
    Ok(order)
}

// ── Breadth-first search ──────────────────────────────────────────────────────

/// Path from `start` to `end` through the fewest blocks.
///
/// Predecessors are recorded when a vertex is first enqueued and never
/// overwritten.  The search stops as soon as `end` is dequeued.
pub fn minimize_intersections(
    network: &Network,
    start: Intersection,
    end: Intersection,
) -> GraphResult<Path> {
    let from = network.require(start)?;
    let to = network.require(end)?;

    let n = network.intersection_count();
    let mut visited = vec![false; n];
    let mut prev = vec![IntersectionId::INVALID; n];
    let mut queue = VecDeque::new();

    visited[from.index()] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            break;
        }
        for block in network.out_blocks(current) {
            let next = block.target;
            if !visited[next.index()] {
                visited[next.index()] = true;
                prev[next.index()] = current;
                queue.push_back(next);
            }
        }
    }

    let path = reconstruct(network, &prev, from, to);
    trace!("bfs {start} -> {end}: {} hops", path.hop_count());
    Ok(path)
}

// ── Uniform-cost search ───────────────────────────────────────────────────────

/// Frontier entry ordered by `(cost, admission order)`.
#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    cost: f64,
    seq:  u64,
    node: IntersectionId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Path from `start` to `end` with the lowest summed `traffic_cost`.
///
/// Dijkstra restricted to one target: the cheapest frontier vertex is
/// finalised on each pop, and the search stops the moment `end` is
/// finalised.  Vertices beyond that point are never settled.
pub fn fastest_path(network: &Network, start: Intersection, end: Intersection) -> GraphResult<Path> {
    let from = network.require(start)?;
    let to = network.require(end)?;

    let n = network.intersection_count();
    // cost[v] = best known traffic cost to reach v; INFINITY = undiscovered.
    let mut cost = vec![f64::INFINITY; n];
    let mut done = vec![false; n];
    let mut prev = vec![IntersectionId::INVALID; n];

    // Min-heap via Reverse; stale entries are skipped on pop.
    let mut frontier: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
    let mut seq = 0u64;

    cost[from.index()] = 0.0;
    frontier.push(Reverse(FrontierEntry { cost: 0.0, seq, node: from }));

    while let Some(Reverse(FrontierEntry { node: current, .. })) = frontier.pop() {
        if done[current.index()] {
            continue;
        }
        done[current.index()] = true;
        if current == to {
            break;
        }

        let base = cost[current.index()];
        for block in network.out_blocks(current) {
            let next = block.target;
            if done[next.index()] {
                continue;
            }
            let candidate = base + block.traffic_cost();
            if candidate < cost[next.index()] {
                cost[next.index()] = candidate;
                prev[next.index()] = current;
                seq += 1;
                frontier.push(Reverse(FrontierEntry { cost: candidate, seq, node: next }));
            }
        }
    }

    let path = reconstruct(network, &prev, from, to);
    trace!(
        "least-traffic {start} -> {end}: {} hops, cost {:.3}",
        path.hop_count(),
        cost[to.index()]
    );
    Ok(path)
}

// ── Path metrics ──────────────────────────────────────────────────────────────

/// Total length, average traffic factor and total traffic of `path`.
///
/// Paths with fewer than two intersections yield all zeros.  For each
/// consecutive pair the newest connecting block is used; a pair with no
/// connecting block fails with [`GraphError::NoConnectingBlock`].
pub fn path_information(network: &Network, path: &[Intersection]) -> GraphResult<PathInfo> {
    if path.len() < 2 {
        return Ok(PathInfo::default());
    }

    let mut total_length = 0.0;
    let mut total_traffic = 0.0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let block = network
            .connecting_block(from, to)
            .ok_or(GraphError::NoConnectingBlock { from: from.coordinate, to: to.coordinate })?;
        total_length += block.length();
        total_traffic += block.traffic_cost();
    }

    let average_traffic_factor = if total_length > 0.0 { total_traffic / total_length } else { 0.0 };
    Ok(PathInfo { total_length, average_traffic_factor, total_traffic })
}

// ── Internals ─────────────────────────────────────────────────────────────────

/// Walk `prev` back from `to`.  Empty if the chain never reaches `from`.
fn reconstruct(
    network: &Network,
    prev: &[IntersectionId],
    from: IntersectionId,
    to: IntersectionId,
) -> Path {
    let mut ids = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        if cur == IntersectionId::INVALID {
            return Path::empty();
        }
        ids.push(cur);
    }
    ids.reverse();
    Path { intersections: ids.into_iter().map(|id| network.intersection(id)).collect() }
}
