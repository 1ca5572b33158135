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

//! Basic undirected graph structure to store vertices with arbitrary data types.
//! Types must implement a distance trait, edges are weighted by the distance between their ends.
use crate::error::{PlanningError, Result};
use crate::math::Distance;
use linked_hash_set::LinkedHashSet;

/// Basic node element for the graph.
///
/// Must be used with [Graph] since incident edges are referenced by index in the [Graph]'s edge vector.
#[derive(Debug)]
struct Node<T> {
    // The value of this node.
    value: T,

    // Indices of incident edges, in the order they were added.
    edges: LinkedHashSet<usize>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            edges: LinkedHashSet::new(),
        }
    }
}

/// An undirected, weighted connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

impl Edge {
    /// Returns the end of the edge that is not `node`.
    #[must_use]
    pub fn other(&self, node: usize) -> usize {
        if self.a == node {
            self.b
        } else {
            self.a
        }
    }
}

/// Basic undirected graph for use in roadmap planners.
///
/// Nodes are identified by the order in which they were added, starting at 0.
/// Edge weights are the [Distance] between the connected values.
#[derive(Debug)]
pub struct Graph<T>
where
    T: Distance,
{
    // Detailed node data for the graph.
    nodes: Vec<Node<T>>,

    // All edges, in insertion order.
    edges: Vec<Edge>,
}

impl<T: Distance> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Distance> Graph<T> {
    /// Construct a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a value to the graph and returns its node id.
    pub fn add_node(&mut self, value: T) -> usize {
        self.nodes.push(Node::new(value));
        self.nodes.len() - 1
    }

    /// Connects two nodes, weighting the edge with the distance between their values.
    ///
    /// Returns the new edge's index.
    ///
    /// # Errors
    ///
    /// If either node is not in the graph.
    /// If the nodes are the same.
    /// If the nodes are already connected.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<usize> {
        let weight = self.distance(a, b)?;
        if a == b {
            return Err(PlanningError::SelfLoop(a));
        }
        if self.is_connected(a, b) {
            return Err(PlanningError::DuplicateEdge(a, b));
        }

        let edge_idx = self.edges.len();
        self.edges.push(Edge { a, b, weight });
        self.nodes[a].edges.insert(edge_idx);
        self.nodes[b].edges.insert(edge_idx);
        Ok(edge_idx)
    }

    /// Distance between the values of two nodes.
    ///
    /// # Errors
    ///
    /// If either node is not in the graph.
    pub fn distance(&self, a: usize, b: usize) -> Result<f64> {
        let va = self.value(a).ok_or(PlanningError::UnknownNode(a))?;
        let vb = self.value(b).ok_or(PlanningError::UnknownNode(b))?;
        Ok(va.distance(vb))
    }

    /// Whether an edge exists between the two nodes.
    #[must_use]
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        // Scan the smaller adjacency list
        let (from, to) = match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(na), Some(nb)) if na.edges.len() <= nb.edges.len() => (a, b),
            (Some(_), Some(_)) => (b, a),
            _ => return false,
        };
        self.nodes[from]
            .edges
            .iter()
            .any(|&e| self.edges[e].other(from) == to)
    }

    // Return the number of nodes in the graph
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the value stored at the node, if present.
    #[must_use]
    pub fn value(&self, node: usize) -> Option<&T> {
        self.nodes.get(node).map(|n| &n.value)
    }

    /// Iterates over all node values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().map(|n| &n.value)
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates over `(neighbor, weight)` pairs of a node in edge insertion order.
    ///
    /// Unknown nodes have no neighbors.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|n| n.edges.iter())
            .map(move |&e| (self.edges[e].other(node), self.edges[e].weight))
    }

    /// Returns the degree of the node, 0 for unknown nodes.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(0, |n| n.edges.len())
    }

    /// Returns the id of the closest node to the specified value, or None for an empty graph.
    #[must_use]
    pub fn nearest_neighbor(&self, val: &T) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = val.distance(&a.value);
                let db = val.distance(&b.value);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }

    /// Finds all nodes whose distance to `val` lies in `[min_radius, max_radius]`.
    ///
    /// Returns `(node, distance)` pairs in insertion order.
    #[must_use]
    pub fn nodes_within(&self, val: &T, min_radius: f64, max_radius: f64) -> Vec<(usize, f64)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let distance = val.distance(&n.value);
                (min_radius..=max_radius)
                    .contains(&distance)
                    .then_some((i, distance))
            })
            .collect()
    }
}

//
// Unit tests
//
