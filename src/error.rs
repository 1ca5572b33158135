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

//! Error types for roadmap construction and graph bookkeeping.
//!
//! Searches never fail with an error, an unreachable goal is an empty
//! [Path](crate::planning::prm::Path).
use crate::math::Vec2;
use thiserror::Error;

/// Planning error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("At least one milestone must be requested")]
    NoMilestones,

    #[error("Invalid sampling bounds: {min} must be strictly below {max} in every coordinate")]
    InvalidBounds { min: Vec2, max: Vec2 },

    #[error("Invalid edge length range [{min}, {max}]")]
    InvalidEdgeLengths { min: f64, max: f64 },

    #[error(
        "Sampling stalled: accepted {accepted} of {requested} milestones in {attempts} attempts"
    )]
    SamplingExhausted {
        requested: usize,
        accepted: usize,
        attempts: usize,
    },

    #[error("Node {0} is not present in the graph")]
    UnknownNode(usize),

    #[error("Nodes {0} and {1} are already connected")]
    DuplicateEdge(usize, usize),

    #[error("Cannot connect node {0} to itself")]
    SelfLoop(usize),
}

pub type Result<T> = std::result::Result<T, PlanningError>;
