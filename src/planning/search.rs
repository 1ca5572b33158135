// MIT License
//
// Copyright (c) 2024 Erik Holum
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Graph search strategies.
//!
//! Every strategy works on any node type through a neighbor function returning
//! `(neighbor, edge weight)` pairs and, for the informed strategies, a heuristic
//! estimating the remaining cost to the goal. All strategies keep a closed set,
//! never expand a node twice, and return `None` when the goal is unreachable.
//!
//! Given the same neighbor ordering every strategy is deterministic:
//!
//! - DFS visits neighbors in the order they are returned.
//! - BFS discovers nodes in FIFO order and returns a path with the fewest edges.
//! - UCS pops the lowest path cost first, earliest insertion on ties.
//! - A* pops the lowest `g + h` first, then the lowest `g`, then earliest insertion.
//! - Weighted A* inflates `h` by a constant factor. With a weight above 1 the
//!   returned path is no longer guaranteed to be optimal.
use log::debug;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

/// The supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStrategy {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
    /// A* with the heuristic scaled by the contained weight.
    WeightedAStar(f64),
}

impl SearchStrategy {
    /// Short name of the strategy, as shown in a status line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::DepthFirst => "DFS",
            SearchStrategy::BreadthFirst => "BFS",
            SearchStrategy::UniformCost => "UCS",
            SearchStrategy::AStar => "A*",
            SearchStrategy::WeightedAStar(_) => "weighted A*",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the specified strategy from `start` to `goal`.
///
/// The heuristic is only consulted by A* and weighted A*.
#[must_use]
pub fn search<N, FN, I, FH>(
    strategy: SearchStrategy,
    start: N,
    goal: N,
    neighbors: FN,
    heuristic: FH,
) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
    FH: FnMut(N) -> f64,
{
    match strategy {
        SearchStrategy::DepthFirst => depth_first(start, goal, neighbors),
        SearchStrategy::BreadthFirst => breadth_first(start, goal, neighbors),
        SearchStrategy::UniformCost => uniform_cost(start, goal, neighbors),
        SearchStrategy::AStar => a_star(start, goal, neighbors, heuristic),
        SearchStrategy::WeightedAStar(weight) => {
            weighted_a_star(start, goal, neighbors, heuristic, weight)
        }
    }
}

/// Depth first search, returns the first path found.
#[must_use]
pub fn depth_first<N, FN, I>(start: N, goal: N, mut neighbors: FN) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
{
    let mut stack = vec![(start, None)];
    let mut closed = HashSet::new();
    let mut parents = HashMap::new();
    let mut expanded = 0;

    while let Some((node, parent)) = stack.pop() {
        if !closed.insert(node) {
            continue;
        }
        if let Some(parent) = parent {
            parents.insert(node, parent);
        }
        if node == goal {
            debug!("DFS reached the goal after expanding {expanded} nodes");
            return Some(reconstruct_path(&parents, start, goal));
        }
        expanded += 1;

        // Neighbors should be pushed onto the stack in reverse order to ensure the first
        // returned are processed first
        let next: Vec<N> = neighbors(node)
            .into_iter()
            .map(|(n, _)| n)
            .filter(|n| !closed.contains(n))
            .collect();
        for &n in next.iter().rev() {
            stack.push((n, Some(node)));
        }
    }

    debug!("DFS exhausted the graph after expanding {expanded} nodes");
    None
}

/// Breadth first search, returns a path with the fewest edges.
#[must_use]
pub fn breadth_first<N, FN, I>(start: N, goal: N, mut neighbors: FN) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
{
    let mut queue = VecDeque::from([start]);
    let mut discovered = HashSet::from([start]);
    let mut parents = HashMap::new();
    let mut expanded = 0;

    while let Some(node) = queue.pop_front() {
        if node == goal {
            debug!("BFS reached the goal after expanding {expanded} nodes");
            return Some(reconstruct_path(&parents, start, goal));
        }
        expanded += 1;

        for (n, _) in neighbors(node) {
            if discovered.insert(n) {
                parents.insert(n, node);
                queue.push_back(n);
            }
        }
    }

    debug!("BFS exhausted the graph after expanding {expanded} nodes");
    None
}

/// Uniform cost search, returns a minimum cost path for non-negative weights.
#[must_use]
pub fn uniform_cost<N, FN, I>(start: N, goal: N, neighbors: FN) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
{
    best_first("UCS", start, goal, neighbors, |_| 0.0)
}

/// A* search, returns a minimum cost path when the heuristic is consistent.
#[must_use]
pub fn a_star<N, FN, I, FH>(start: N, goal: N, neighbors: FN, heuristic: FH) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
    FH: FnMut(N) -> f64,
{
    best_first("A*", start, goal, neighbors, heuristic)
}

/// A* search with the heuristic scaled by `weight`.
///
/// Weights above 1 usually expand fewer nodes, but optimality is no longer guaranteed.
/// Returns `None` for negative or non-finite weights.
#[must_use]
pub fn weighted_a_star<N, FN, I, FH>(
    start: N,
    goal: N,
    neighbors: FN,
    mut heuristic: FH,
    weight: f64,
) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
    FH: FnMut(N) -> f64,
{
    if !weight.is_finite() || weight < 0.0 {
        debug!("Weighted A* rejected heuristic weight {weight}");
        return None;
    }
    best_first("weighted A*", start, goal, neighbors, |n| weight * heuristic(n))
}

/// Frontier entry for the best first searches.
///
/// Ordered so that a [BinaryHeap] pops the lowest `f`, then the lowest `g`,
/// then the earliest inserted entry.
struct Frontier<N> {
    node: N,
    f: OrderedFloat<f64>,
    g: OrderedFloat<f64>,
    seq: usize,
}

impl<N> Frontier<N> {
    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>, usize) {
        (self.f, self.g, self.seq)
    }
}

impl<N> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<N> Eq for Frontier<N> {}

impl<N> Ord for Frontier<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.key().cmp(&self.key())
    }
}

impl<N> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn best_first<N, FN, I, FH>(
    label: &str,
    start: N,
    goal: N,
    mut neighbors: FN,
    mut heuristic: FH,
) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = (N, f64)>,
    FH: FnMut(N) -> f64,
{
    let mut open = BinaryHeap::new();
    let mut closed = HashSet::new();
    let mut parents = HashMap::new();
    let mut g_scores = HashMap::from([(start, 0.0)]);
    let mut seq = 0;
    let mut expanded = 0;

    open.push(Frontier {
        node: start,
        f: OrderedFloat(heuristic(start)),
        g: OrderedFloat(0.0),
        seq,
    });

    while let Some(current) = open.pop() {
        // Stale entries for nodes that were already finalized
        if !closed.insert(current.node) {
            continue;
        }
        if current.node == goal {
            debug!(
                "{label} reached the goal with cost {:.3} after expanding {expanded} nodes",
                current.g.into_inner()
            );
            return Some(reconstruct_path(&parents, start, goal));
        }
        expanded += 1;

        for (n, weight) in neighbors(current.node) {
            if closed.contains(&n) {
                continue;
            }
            let tentative_g = current.g.into_inner() + weight;
            let best_g = g_scores.get(&n).copied().unwrap_or(f64::INFINITY);
            if tentative_g < best_g {
                g_scores.insert(n, tentative_g);
                parents.insert(n, current.node);
                seq += 1;
                open.push(Frontier {
                    node: n,
                    f: OrderedFloat(tentative_g + heuristic(n)),
                    g: OrderedFloat(tentative_g),
                    seq,
                });
            }
        }
    }

    debug!("{label} exhausted the graph after expanding {expanded} nodes");
    None
}

/// Walks the parent links back from the goal, returning the path in order.
fn reconstruct_path<N>(parents: &HashMap<N, N>, start: N, goal: N) -> Vec<N>
where
    N: Copy + Eq + Hash,
{
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }

    // Reverse it to get the path in order
    path.reverse();
    path
}

//
// Unit tests
//

#[cfg(test)]
mod tests {
    use super::*;

    // Weighted adjacency lists, neighbors returned in list order
    fn graph(edges: &[(u32, u32, f64)]) -> HashMap<u32, Vec<(u32, f64)>> {
        let mut adjacency: HashMap<u32, Vec<(u32, f64)>> = HashMap::new();
        for &(a, b, w) in edges {
            adjacency.entry(a).or_default().push((b, w));
            adjacency.entry(b).or_default().push((a, w));
        }
        adjacency
    }

    fn run(
        strategy: SearchStrategy,
        adjacency: &HashMap<u32, Vec<(u32, f64)>>,
        start: u32,
        goal: u32,
    ) -> Option<Vec<u32>> {
        search(
            strategy,
            start,
            goal,
            |n: u32| adjacency.get(&n).cloned().unwrap_or_default(),
            |_| 0.0,
        )
    }

    fn cost(adjacency: &HashMap<u32, Vec<(u32, f64)>>, path: &[u32]) -> f64 {
        path.windows(2)
            .map(|w| {
                adjacency[&w[0]]
                    .iter()
                    .find(|(n, _)| *n == w[1])
                    .map(|(_, c)| *c)
                    .unwrap()
            })
            .sum()
    }

    // 0 - 1 - 2 - 5 is short in edges but expensive, 0 - 3 - 4 - 6 - 5 is cheap.
    fn diamond() -> HashMap<u32, Vec<(u32, f64)>> {
        graph(&[
            (0, 1, 5.0),
            (1, 2, 5.0),
            (2, 5, 5.0),
            (0, 3, 1.0),
            (3, 4, 1.0),
            (4, 6, 1.0),
            (6, 5, 1.0),
        ])
    }

    #[test]
    fn test_dfs_follows_neighbor_order() {
        let adjacency = diamond();
        let path = run(SearchStrategy::DepthFirst, &adjacency, 0, 5).unwrap();
        assert_eq!(path, vec![0, 1, 2, 5]);
    }

    #[test]
    fn test_bfs_fewest_edges() {
        let adjacency = graph(&[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (0, 3, 10.0)]);
        let path = run(SearchStrategy::BreadthFirst, &adjacency, 0, 3).unwrap();
        assert_eq!(path, vec![0, 3]);
    }

    #[test]
    fn test_ucs_minimum_cost() {
        let adjacency = diamond();
        let path = run(SearchStrategy::UniformCost, &adjacency, 0, 5).unwrap();
        assert_eq!(path, vec![0, 3, 4, 6, 5]);
        assert_eq!(cost(&adjacency, &path), 4.0);
    }

    #[test]
    fn test_ucs_ties_prefer_earliest_insertion() {
        // Two paths of equal cost, the one through 1 is discovered first
        let adjacency = graph(&[(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let path = run(SearchStrategy::UniformCost, &adjacency, 0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
    }

    #[test]
    fn test_a_star_on_a_line() {
        // Nodes on the number line, heuristic is the remaining distance
        let neighbors = |n: i32| {
            [n - 1, n + 1]
                .into_iter()
                .filter(|m| (0..=10).contains(m))
                .map(|m| (m, 1.0))
                .collect::<Vec<_>>()
        };
        let heuristic = |n: i32| f64::from((7 - n).abs());

        let path = a_star(2, 7, neighbors, heuristic).unwrap();
        assert_eq!(path, vec![2, 3, 4, 5, 6, 7]);

        let weighted = weighted_a_star(2, 7, neighbors, heuristic, 1.0).unwrap();
        assert_eq!(weighted, path);
    }

    #[test]
    fn test_weighted_a_star_rejects_bad_weights() {
        let adjacency = diamond();
        let neighbors = |n: u32| adjacency.get(&n).cloned().unwrap_or_default();
        assert!(weighted_a_star(0, 5, neighbors, |_| 0.0, -1.0).is_none());
        assert!(weighted_a_star(0, 5, neighbors, |_| 0.0, f64::NAN).is_none());
        assert!(weighted_a_star(0, 5, neighbors, |_| 0.0, 2.0).is_some());
    }

    #[test]
    fn test_unreachable_goal() {
        let adjacency = graph(&[(0, 1, 1.0), (2, 3, 1.0)]);
        for strategy in [
            SearchStrategy::DepthFirst,
            SearchStrategy::BreadthFirst,
            SearchStrategy::UniformCost,
            SearchStrategy::AStar,
            SearchStrategy::WeightedAStar(1.5),
        ] {
            assert!(run(strategy, &adjacency, 0, 3).is_none(), "{strategy}");
        }
    }

    #[test]
    fn test_start_is_goal() {
        let adjacency = diamond();
        assert_eq!(run(SearchStrategy::AStar, &adjacency, 4, 4), Some(vec![4]));
        assert_eq!(run(SearchStrategy::DepthFirst, &adjacency, 4, 4), Some(vec![4]));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(SearchStrategy::AStar.to_string(), "A*");
        assert_eq!(SearchStrategy::WeightedAStar(1.5).to_string(), "weighted A*");
    }
}
