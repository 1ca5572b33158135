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

//! Kinematic agents that follow a planned path one small time step at a time.
//!
//! A host loop spawns an agent on a path, then calls [`Agent::update`] a fixed
//! number of times per frame. Agents never plan themselves, they only consume
//! the waypoints they are given.
pub mod ik;
pub mod point;
pub mod two_arm;

use crate::math::Vec2;
use crate::view::DrawOptions;

/// Lifecycle of an agent on its current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentPhase {
    /// No path has been assigned, or the assigned path was empty.
    #[default]
    Idle,
    Following,
    Arrived,
}

pub trait Agent {
    /// Tuning parameters applied on spawn.
    type Params;
    /// Read-only view of the agent for rendering.
    type State;

    /// Places the agent at the start of `path`, resetting any previous progress.
    ///
    /// An empty path leaves the agent idle.
    fn spawn(&mut self, path: &[Vec2], params: Self::Params);

    /// Advances the agent by `dt` seconds.
    ///
    /// Returns `true` exactly once, on the update where the agent reaches the
    /// end of its path. Does nothing while paused, idle, arrived, or for a
    /// non-positive `dt`.
    fn update(&mut self, dt: f64) -> bool;

    fn state(&self, options: &DrawOptions) -> Self::State;

    fn phase(&self) -> AgentPhase;

    fn is_paused(&self) -> bool;

    fn set_paused(&mut self, paused: bool);

    fn toggle_pause(&mut self) {
        self.set_paused(!self.is_paused());
    }

    /// Number of updates that advanced the agent since the last spawn.
    fn ticks(&self) -> u64;

    /// Runs `substeps` updates of `dt`, as a host does once per frame.
    ///
    /// Returns `true` if any of them signalled arrival.
    fn update_substeps(&mut self, substeps: usize, dt: f64) -> bool {
        let mut arrived = false;
        for _ in 0..substeps {
            arrived |= self.update(dt);
        }
        arrived
    }
}

// Shared guard for the agents' update loops
fn is_valid_dt(dt: f64) -> bool {
    dt.is_finite() && dt > 0.0
}
