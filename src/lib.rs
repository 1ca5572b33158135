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

//! Probabilistic roadmap planning in the plane.
//!
//! Grow a [`Prm`] over a [`ConfigurationSpace`], search it with one of the
//! [`SearchStrategy`] variants, then hand the resulting [`Path`] to an
//! [`Agent`] that follows it one small time step at a time.
pub mod acting;
pub mod error;
pub mod graph;
pub mod math;
pub mod planning;
pub mod space;
pub mod view;

pub use acting::point::{PointAgent, PointState, SteeringParams};
pub use acting::two_arm::{ArmsPose, TwoArmAgent, TwoArmParams, TwoArmState};
pub use acting::{Agent, AgentPhase};
pub use error::PlanningError;
pub use math::{Distance, Vec2};
pub use planning::prm::{Milestone, Path, Prm, PrmConfig, RoadmapSnapshot};
pub use planning::search::SearchStrategy;
pub use space::{ConfigurationSpace, Obstacle, PositionConfigurationSpace};
pub use view::DrawOptions;
