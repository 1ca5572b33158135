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

//! A wheeled point agent that steers toward each waypoint in turn.
//!
//! The agent has a position and a heading. Every update it turns toward the
//! current waypoint at a bounded rate, then drives forward, slower the further
//! off its heading the waypoint is.
use log::{debug, trace};
use std::f64::consts::PI;

use super::{is_valid_dt, Agent, AgentPhase};
use crate::math::{wrap_angle, Distance, Vec2};
use crate::view::DrawOptions;

/// Tuning for a [`PointAgent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    /// Forward speed in units per second.
    pub speed: f64,
    /// Maximum turn rate in radians per second.
    pub turn_rate: f64,
    /// Proportional gain on the heading error.
    pub steering_gain: f64,
    /// Heading on spawn, in radians from the x axis.
    pub heading: f64,
    /// Distance at which a waypoint counts as reached.
    pub tolerance: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        SteeringParams {
            speed: 20.0,
            turn_rate: PI,
            steering_gain: 4.0,
            heading: -PI / 2.0,
            tolerance: 0.5,
        }
    }
}

/// Draw data for a [`PointAgent`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointState {
    pub phase: AgentPhase,
    pub paused: bool,
    pub ticks: u64,
    /// `None` until spawned on a non-empty path.
    pub position: Option<Vec2>,
    pub heading: f64,
    /// Index of the waypoint being steered toward.
    pub waypoint: Option<usize>,
    /// Empty unless requested in the draw options.
    pub path: Vec<Vec2>,
}

#[derive(Debug, Clone, Default)]
pub struct PointAgent {
    params: SteeringParams,
    path: Vec<Vec2>,
    phase: AgentPhase,
    paused: bool,
    ticks: u64,
    position: Vec2,
    heading: f64,
    target: usize,
}

impl PointAgent {
    #[must_use]
    pub fn new() -> Self {
        PointAgent::default()
    }

    #[must_use]
    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    #[must_use]
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    fn max_turn(&self) -> f64 {
        if self.params.turn_rate.is_nan() {
            0.0
        } else {
            self.params.turn_rate.abs()
        }
    }
}

impl Agent for PointAgent {
    type Params = SteeringParams;
    type State = PointState;

    fn spawn(&mut self, path: &[Vec2], params: SteeringParams) {
        self.params = params;
        self.path = path.to_vec();
        self.ticks = 0;
        self.paused = false;
        self.target = 0;
        self.heading = wrap_angle(params.heading);

        match path.first() {
            Some(&start) => {
                self.position = start;
                self.phase = AgentPhase::Following;
                debug!("Point agent spawned at {} with {} waypoints", start, path.len());
            }
            None => {
                self.position = Vec2::zeros();
                self.phase = AgentPhase::Idle;
                debug!("Point agent spawned on an empty path");
            }
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.paused || self.phase != AgentPhase::Following || !is_valid_dt(dt) {
            return false;
        }
        self.ticks += 1;

        while let Some(waypoint) = self.path.get(self.target) {
            if self.position.distance(waypoint) > self.params.tolerance {
                break;
            }
            trace!("Point agent reached waypoint {}", self.target);
            self.target += 1;
        }
        let Some(&waypoint) = self.path.get(self.target) else {
            self.phase = AgentPhase::Arrived;
            debug!("Point agent arrived at {} after {} updates", self.position, self.ticks);
            return true;
        };

        let offset = waypoint - self.position;
        let bearing = offset.angle();
        let error = wrap_angle(bearing - self.heading);

        // Bounded proportional turn that never overshoots the bearing
        let max_turn = self.max_turn();
        let mut turn = (self.params.steering_gain * error).clamp(-max_turn, max_turn) * dt;
        if turn.abs() > error.abs() {
            turn = error;
        }
        self.heading = wrap_angle(self.heading + turn);

        // Only drive forward, and never past the waypoint
        let alignment = wrap_angle(bearing - self.heading).cos().max(0.0);
        let advance = (self.params.speed * dt * alignment).min(offset.norm());
        self.position += Vec2::from_angle(self.heading) * advance;
        false
    }

    fn state(&self, options: &DrawOptions) -> PointState {
        let spawned = self.phase != AgentPhase::Idle;
        PointState {
            phase: self.phase,
            paused: self.paused,
            ticks: self.ticks,
            position: spawned.then_some(self.position),
            heading: self.heading,
            waypoint: (self.phase == AgentPhase::Following && self.target < self.path.len())
                .then_some(self.target),
            path: if options.path {
                self.path.clone()
            } else {
                Vec::new()
            },
        }
    }

    fn phase(&self) -> AgentPhase {
        self.phase
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }
}

//
// Unit tests
//
