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

//! Options for the draw data queries.
//!
//! Hosts render roadmaps and agents themselves, the core only hands back plain
//! data. Layers switched off here come back empty.

/// Which layers the draw data queries should fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// Roadmap milestone positions.
    pub milestones: bool,
    /// Roadmap edges.
    pub edges: bool,
    /// The path an agent is following.
    pub path: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            milestones: true,
            edges: true,
            path: true,
        }
    }
}

impl DrawOptions {
    /// Nothing but the agents themselves.
    #[must_use]
    pub fn none() -> Self {
        DrawOptions {
            milestones: false,
            edges: false,
            path: false,
        }
    }
}
