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

//! Planar two-link arm kinematics with gradient descent inverse kinematics.
//!
//! Joint angles are `[q1, q2]` where `q1` is measured from the x axis and `q2`
//! relative to the first link. Each IK step moves the joints along `Jᵀ·e`, the
//! negative gradient of half the squared distance between the end effector
//! and the target.
use crate::math::{wrap_angle, Distance, Vec2};

/// A two-link revolute arm rooted at a point in the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoLinkArm {
    root: Vec2,
    lengths: [f64; 2],
    angles: Vec2,

    // Optional (min, max) bounds per joint, applied after every step
    limits: [Option<(f64, f64)>; 2],
}

impl TwoLinkArm {
    /// Constructs an arm with the given link lengths and joint angles.
    #[must_use]
    pub fn new(root: Vec2, lengths: [f64; 2], angles: Vec2) -> Self {
        TwoLinkArm {
            root,
            lengths,
            angles,
            limits: [None, None],
        }
    }

    /// Constructs an arm whose end effector is at the closest reachable point to `target`.
    ///
    /// Solved in closed form, picking the elbow with a positive `q2`.
    #[must_use]
    pub fn reaching(root: Vec2, lengths: [f64; 2], target: Vec2) -> Self {
        let [l1, l2] = lengths;
        let mut arm = TwoLinkArm::new(root, lengths, Vec2::zeros());
        let offset = arm.clamp_target(target) - root;
        let d = offset.norm();

        let cos_q2 = if l1 * l2 > 0.0 {
            ((d * d - l1 * l1 - l2 * l2) / (2.0 * l1 * l2)).clamp(-1.0, 1.0)
        } else {
            1.0
        };
        let q2 = cos_q2.acos();
        let q1 = offset.angle() - (l2 * q2.sin()).atan2(l1 + l2 * cos_q2);
        arm.angles = Vec2::new(q1, q2);
        arm
    }

    /// Restricts each joint to an inclusive `(min, max)` range, clamping the current angles.
    #[must_use]
    pub fn with_joint_limits(mut self, limits: [Option<(f64, f64)>; 2]) -> Self {
        self.limits = limits;
        self.apply_limits();
        self
    }

    #[must_use]
    pub fn root(&self) -> Vec2 {
        self.root
    }

    /// Moves the whole arm, keeping its joint angles.
    pub fn set_root(&mut self, root: Vec2) {
        self.root = root;
    }

    #[must_use]
    pub fn lengths(&self) -> [f64; 2] {
        self.lengths
    }

    #[must_use]
    pub fn angles(&self) -> Vec2 {
        self.angles
    }

    #[must_use]
    pub fn elbow(&self) -> Vec2 {
        self.root + Vec2::from_angle(self.angles[0]) * self.lengths[0]
    }

    /// Forward kinematics.
    #[must_use]
    pub fn end_effector(&self) -> Vec2 {
        self.elbow() + Vec2::from_angle(self.angles[0] + self.angles[1]) * self.lengths[1]
    }

    /// Inner and outer radius of the reachable annulus around the root.
    #[must_use]
    pub fn reach(&self) -> (f64, f64) {
        let [l1, l2] = self.lengths;
        ((l1 - l2).abs(), l1 + l2)
    }

    /// Projects `target` onto the reachable annulus along the ray from the root.
    #[must_use]
    pub fn clamp_target(&self, target: Vec2) -> Vec2 {
        let (min_reach, max_reach) = self.reach();
        let offset = target - self.root;
        let d = offset.norm();
        if d > max_reach {
            self.root + offset * (max_reach / d)
        } else if d < min_reach {
            // A target on the root gives no direction, keep the current one
            let direction = offset
                .normalized()
                .or_else(|| (self.end_effector() - self.root).normalized())
                .unwrap_or(Vec2::new(1.0, 0.0));
            self.root + direction * min_reach
        } else {
            target
        }
    }

    /// Columns are the partial derivatives of the end effector position with
    /// respect to `q1` and `q2`.
    #[must_use]
    pub fn jacobian(&self) -> [Vec2; 2] {
        let end = self.end_effector();
        [(end - self.root).perp(), (end - self.elbow()).perp()]
    }

    /// Takes one gradient descent step toward `target`, scaled by `rate`.
    ///
    /// Unreachable targets are first projected onto the reachable annulus, so the
    /// arm settles at the closest point it can reach. Returns the distance from the
    /// end effector to the projected target before the step.
    pub fn step(&mut self, target: Vec2, rate: f64) -> f64 {
        let target = self.clamp_target(target);
        let error = target - self.end_effector();
        let [j1, j2] = self.jacobian();

        self.angles += Vec2::new(j1.dot(&error), j2.dot(&error)) * rate;
        self.apply_limits();
        error.norm()
    }

    /// Steps toward `target` until the end effector is within `tolerance` of it.
    ///
    /// Returns the number of steps taken, or `None` if `max_steps` were not enough.
    pub fn solve(
        &mut self,
        target: Vec2,
        rate: f64,
        tolerance: f64,
        max_steps: usize,
    ) -> Option<usize> {
        let target = self.clamp_target(target);
        for steps in 0..max_steps {
            if self.end_effector().distance(&target) < tolerance {
                return Some(steps);
            }
            self.step(target, rate);
        }
        (self.end_effector().distance(&target) < tolerance).then_some(max_steps)
    }

    /// The same physical arm rooted at its end effector.
    ///
    /// Link lengths are swapped and joint limits are dropped, since they no
    /// longer apply to the reversed angles.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let elbow = self.elbow();
        let end = self.end_effector();
        let q1 = (elbow - end).angle();
        let q2 = wrap_angle((self.root - elbow).angle() - q1);
        TwoLinkArm::new(end, [self.lengths[1], self.lengths[0]], Vec2::new(q1, q2))
    }

    fn apply_limits(&mut self) {
        let mut angles = *self.angles.coords();
        for (angle, limit) in angles.iter_mut().zip(self.limits) {
            if let Some((min, max)) = limit {
                *angle = angle.clamp(min.min(max), max.max(min));
            }
        }
        self.angles = Vec2::from_array(angles);
    }
}

//
// Unit tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::f64::consts::PI;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.distance(&b) < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_forward_kinematics() {
        let arm = TwoLinkArm::new(Vec2::new(1.0, 1.0), [18.0, 18.0], Vec2::new(0.0, PI / 2.0));
        assert_close(arm.elbow(), Vec2::new(19.0, 1.0));
        assert_close(arm.end_effector(), Vec2::new(19.0, 19.0));
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        let arm = TwoLinkArm::new(Vec2::new(0.5, -2.0), [3.0, 2.0], Vec2::new(0.3, 1.1));
        let jacobian = arm.jacobian();
        let h = 1e-6;

        for (joint, column) in jacobian.iter().enumerate() {
            let mut delta = [0.0; 2];
            delta[joint] = h;
            let angles = arm.angles() + Vec2::from(delta);
            let nudged = TwoLinkArm::new(arm.root(), arm.lengths(), angles);
            let numeric = (nudged.end_effector() - arm.end_effector()) * (1.0 / h);
            assert!(numeric.distance(column) < 1e-4, "joint {joint}");
        }
    }

    #[test]
    fn test_clamp_target() {
        let arm = TwoLinkArm::new(Vec2::zeros(), [10.0, 4.0], Vec2::zeros());
        assert_eq!(arm.reach(), (6.0, 14.0));

        assert_close(arm.clamp_target(Vec2::new(0.0, 20.0)), Vec2::new(0.0, 14.0));
        assert_close(arm.clamp_target(Vec2::new(-2.0, 0.0)), Vec2::new(-6.0, 0.0));
        assert_close(arm.clamp_target(Vec2::new(8.0, 0.0)), Vec2::new(8.0, 0.0));

        // No direction to the root, keep pointing where the arm points
        assert_close(arm.clamp_target(Vec2::zeros()), Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_reaching_pose() {
        let root = Vec2::new(-3.0, 2.0);
        let target = Vec2::new(5.0, 14.0);
        let arm = TwoLinkArm::reaching(root, [10.0, 8.0], target);
        assert_close(arm.end_effector(), target);
        assert!(arm.angles()[1] >= 0.0);

        // Out of reach points straight at the target
        let arm = TwoLinkArm::reaching(root, [10.0, 8.0], Vec2::new(-3.0, 100.0));
        assert_close(arm.end_effector(), Vec2::new(-3.0, 20.0));
    }

    #[test]
    fn test_reversed_is_the_same_arm() {
        let arm = TwoLinkArm::new(Vec2::new(2.0, 3.0), [5.0, 7.0], Vec2::new(0.4, -2.0));
        let reversed = arm.reversed();

        assert_eq!(reversed.lengths(), [7.0, 5.0]);
        assert_close(reversed.root(), arm.end_effector());
        assert_close(reversed.elbow(), arm.elbow());
        assert_close(reversed.end_effector(), arm.root());
        assert!(reversed.angles()[1].abs() <= PI);

        let twice = reversed.reversed();
        assert_close(twice.end_effector(), arm.end_effector());
    }

    #[test]
    fn test_step_reduces_error() {
        let mut arm = TwoLinkArm::new(Vec2::zeros(), [18.0, 18.0], Vec2::new(0.0, PI / 2.0));
        let target = Vec2::new(20.0, 0.0);
        let before = arm.step(target, 1e-5);
        let after = arm.end_effector().distance(&target);
        assert!(after < before);
        assert!(approx_eq!(f64, before, Vec2::new(2.0, -18.0).norm(), epsilon = 1e-9));
    }

    #[test]
    fn test_solve() {
        let mut arm = TwoLinkArm::new(Vec2::zeros(), [18.0, 18.0], Vec2::new(0.3, 1.0));
        let steps = arm.solve(Vec2::new(0.0, 20.0), 1e-5, 0.01, 10_000);
        assert!(steps.is_some());
        assert!(arm.end_effector().distance(&Vec2::new(0.0, 20.0)) < 0.01);

        // Not enough steps
        let mut arm = TwoLinkArm::new(Vec2::zeros(), [18.0, 18.0], Vec2::new(0.3, 1.0));
        assert_eq!(arm.solve(Vec2::new(0.0, 20.0), 1e-5, 0.01, 10), None);
    }

    #[test]
    fn test_joint_limits() {
        let mut arm = TwoLinkArm::new(Vec2::zeros(), [1.0, 1.0], Vec2::new(0.0, 2.0))
            .with_joint_limits([None, Some((-0.5, 0.5))]);
        assert!(approx_eq!(f64, arm.angles()[1], 0.5));

        // Folding the elbow all the way is not allowed
        for _ in 0..1000 {
            arm.step(Vec2::new(0.1, 0.0), 0.1);
            assert!(arm.angles()[1] <= 0.5 && arm.angles()[1] >= -0.5);
        }
    }
}
