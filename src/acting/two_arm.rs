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

//! A brachiating agent with two arms joined at a neck.
//!
//! One arm grips the current waypoint and holds the neck up, the other swings
//! from the neck toward the next waypoint. Once the free hand gets there the
//! arms swap roles. Both arms move by gradient descent IK, one step per update.
use log::debug;

use super::ik::TwoLinkArm;
use super::{is_valid_dt, Agent, AgentPhase};
use crate::math::{Distance, Vec2};
use crate::view::DrawOptions;

/// Tuning for a [`TwoArmAgent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoArmParams {
    /// Shoulder to elbow, then elbow to hand, for both arms.
    pub link_lengths: [f64; 2],
    /// How far above the gripped point the neck hangs.
    pub neck_arm_dist: f64,
    /// Gradient descent rate, scaled by `dt` on every update.
    pub learning_rate: f64,
    /// Distance at which a hand counts as holding its target.
    pub tolerance: f64,
}

impl Default for TwoArmParams {
    fn default() -> Self {
        TwoArmParams {
            link_lengths: [18.0, 18.0],
            neck_arm_dist: 18.0,
            learning_rate: 1.0,
            tolerance: 0.1,
        }
    }
}

/// Joint positions of both arms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmsPose {
    /// Point held by the gripping arm.
    pub grip: Vec2,
    pub holding_elbow: Vec2,
    pub neck: Vec2,
    pub reaching_elbow: Vec2,
    /// Free hand of the reaching arm.
    pub hand: Vec2,
}

/// Draw data for a [`TwoArmAgent`].
#[derive(Debug, Clone, PartialEq)]
pub struct TwoArmState {
    pub phase: AgentPhase,
    pub paused: bool,
    pub ticks: u64,
    /// `None` until spawned on a non-empty path.
    pub arms: Option<ArmsPose>,
    /// Index of the waypoint the free hand is reaching for.
    pub waypoint: Option<usize>,
    /// Empty unless requested in the draw options.
    pub path: Vec<Vec2>,
}

#[derive(Debug, Clone)]
struct Arms {
    grip: Vec2,
    // Rooted at the grip, ends at the neck
    holding: TwoLinkArm,
    // Rooted at the neck, ends at the hand
    reaching: TwoLinkArm,
}

impl Arms {
    fn pose(&self) -> ArmsPose {
        ArmsPose {
            grip: self.grip,
            holding_elbow: self.holding.elbow(),
            neck: self.reaching.root(),
            reaching_elbow: self.reaching.elbow(),
            hand: self.reaching.end_effector(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TwoArmAgent {
    params: TwoArmParams,
    path: Vec<Vec2>,
    phase: AgentPhase,
    paused: bool,
    ticks: u64,
    arms: Option<Arms>,

    // Waypoint the free hand reaches for, equal to the path length once the
    // last waypoint is held and the arms fold back onto it
    target: usize,
}

impl TwoArmAgent {
    #[must_use]
    pub fn new() -> Self {
        TwoArmAgent::default()
    }

    #[must_use]
    pub fn params(&self) -> &TwoArmParams {
        &self.params
    }

    #[must_use]
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    /// Returns the point held by the gripping arm, if spawned.
    #[must_use]
    pub fn grip(&self) -> Option<Vec2> {
        self.arms.as_ref().map(|arms| arms.grip)
    }

    /// Returns the position of the free hand, if spawned.
    #[must_use]
    pub fn hand(&self) -> Option<Vec2> {
        self.arms.as_ref().map(|arms| arms.reaching.end_effector())
    }

    fn hang_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.params.neck_arm_dist)
    }
}

impl Agent for TwoArmAgent {
    type Params = TwoArmParams;
    type State = TwoArmState;

    fn spawn(&mut self, path: &[Vec2], params: TwoArmParams) {
        self.params = params;
        self.path = path.to_vec();
        self.ticks = 0;
        self.paused = false;
        self.target = 1;
        self.arms = None;
        self.phase = AgentPhase::Idle;

        let Some(&start) = path.first() else {
            debug!("Two arm agent spawned on an empty path");
            return;
        };

        // Hang from the first waypoint with the free hand holding it too
        let [upper, lower] = params.link_lengths;
        let holding = TwoLinkArm::reaching(start, [lower, upper], start + self.hang_offset());
        let reaching = holding.reversed();
        self.arms = Some(Arms {
            grip: start,
            holding,
            reaching,
        });
        self.phase = AgentPhase::Following;
        debug!("Two arm agent spawned at {} with {} waypoints", start, path.len());
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.paused || self.phase != AgentPhase::Following || !is_valid_dt(dt) {
            return false;
        }
        let hang = self.hang_offset();
        let Some(arms) = self.arms.as_mut() else {
            return false;
        };
        self.ticks += 1;

        let rate = self.params.learning_rate * dt;
        let folding = self.target >= self.path.len();
        let target = if folding {
            arms.grip
        } else {
            self.path[self.target]
        };

        // The body hangs below the middle of the swing, the free hand goes for the target
        arms.holding.step(arms.grip.lerp(&target, 0.5) + hang, rate);
        arms.reaching.set_root(arms.holding.end_effector());
        arms.reaching.step(target, rate);

        if arms.reaching.end_effector().distance(&target) >= self.params.tolerance {
            return false;
        }

        if folding {
            self.phase = AgentPhase::Arrived;
            debug!("Two arm agent arrived at {} after {} updates", target, self.ticks);
            return true;
        }

        // Swap roles, the free hand grips the target and the old holding arm swings next
        let mut holding = arms.reaching.reversed();
        holding.set_root(target);
        let mut reaching = arms.holding.reversed();
        reaching.set_root(holding.end_effector());
        *arms = Arms {
            grip: target,
            holding,
            reaching,
        };
        debug!("Two arm agent gripped waypoint {} at {}", self.target, target);
        self.target += 1;
        false
    }

    fn state(&self, options: &DrawOptions) -> TwoArmState {
        TwoArmState {
            phase: self.phase,
            paused: self.paused,
            ticks: self.ticks,
            arms: self.arms.as_ref().map(Arms::pose),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn line_path() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)]
    }

    fn fast_params() -> TwoArmParams {
        TwoArmParams {
            learning_rate: 10.0,
            ..TwoArmParams::default()
        }
    }

    #[test]
    fn test_spawn_hangs_from_start() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&line_path(), TwoArmParams::default());
        assert_eq!(agent.phase(), AgentPhase::Following);

        let pose = agent.state(&DrawOptions::default()).arms.unwrap();
        assert_eq!(pose.grip, Vec2::new(0.0, 0.0));
        assert!(pose.neck.distance(&Vec2::new(0.0, 18.0)) < 1e-9);
        assert!(pose.hand.distance(&Vec2::new(0.0, 0.0)) < 1e-9);
        assert!(pose.reaching_elbow.distance(&pose.holding_elbow) < 1e-9);
    }

    #[test]
    fn test_empty_path_stays_idle() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&[], TwoArmParams::default());
        assert_eq!(agent.phase(), AgentPhase::Idle);
        assert!(!agent.update(1e-5));
        assert_eq!(agent.ticks(), 0);
        assert!(agent.state(&DrawOptions::default()).arms.is_none());
    }

    #[test]
    fn test_single_waypoint_arrives_immediately() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&[Vec2::new(5.0, 5.0)], TwoArmParams::default());
        assert!(agent.update(1e-5));
        assert_eq!(agent.phase(), AgentPhase::Arrived);
        assert!(!agent.update(1e-5));
        assert_eq!(agent.ticks(), 1);
    }

    #[test]
    fn test_follows_path_and_signals_once() {
        let path = line_path();
        let mut agent = TwoArmAgent::new();
        agent.spawn(&path, fast_params());

        let mut signals = 0;
        let mut gripped = vec![agent.grip().unwrap()];
        for _ in 0..200_000 {
            if agent.update(1e-5) {
                signals += 1;
            }
            let grip = agent.grip().unwrap();
            if gripped.last() != Some(&grip) {
                gripped.push(grip);
            }
        }

        assert_eq!(signals, 1);
        assert_eq!(agent.phase(), AgentPhase::Arrived);
        assert_eq!(gripped, path);
        assert!(agent.hand().unwrap().distance(&Vec2::new(20.0, 0.0)) < 0.1);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&line_path(), TwoArmParams::default());
        let before = agent.state(&DrawOptions::default());

        assert!(!agent.update(0.0));
        assert!(!agent.update(-1.0));
        assert!(!agent.update(f64::NAN));
        assert_eq!(agent.state(&DrawOptions::default()), before);
    }

    #[test]
    fn test_pause_freezes() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&line_path(), fast_params());
        agent.update_substeps(100, 1e-5);

        agent.toggle_pause();
        assert!(agent.is_paused());
        let frozen = agent.state(&DrawOptions::default());
        assert!(!agent.update_substeps(1000, 1e-5));
        assert_eq!(agent.state(&DrawOptions::default()), frozen);

        agent.toggle_pause();
        agent.update(1e-5);
        assert_eq!(agent.ticks(), 101);
    }

    #[test]
    fn test_respawn_resets_progress() {
        let mut agent = TwoArmAgent::new();
        agent.spawn(&line_path(), fast_params());
        agent.update_substeps(5000, 1e-5);
        agent.set_paused(true);

        let other = [Vec2::new(-50.0, 3.0), Vec2::new(-40.0, 3.0)];
        agent.spawn(&other, fast_params());
        assert!(!agent.is_paused());
        let state = agent.state(&DrawOptions::none());
        assert_eq!(state.ticks, 0);
        assert_eq!(state.waypoint, Some(1));
        assert_eq!(state.arms.unwrap().grip, other[0]);
        assert!(state.path.is_empty());
    }
}
