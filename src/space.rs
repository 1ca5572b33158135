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

//! Configuration space predicates.
//!
//! A [ConfigurationSpace] reports whether a configuration, and the straight
//! segment between two configurations, is free of collisions. The roadmap
//! builder calls it for every sample and every candidate edge.
use crate::math::{Distance, Vec2};
use geo::{EuclideanDistance, Line, Point, Polygon};

/// Spacing between samples when a segment is checked point by point.
pub const DEFAULT_SEGMENT_RESOLUTION: f64 = 0.5;

/// Collision predicate over planar configurations.
///
/// Implementations must be deterministic and free of side effects.
pub trait ConfigurationSpace {
    /// Whether the configuration is collision free.
    fn is_valid(&self, config: &Vec2) -> bool;

    /// Whether the straight segment between the two configurations is collision free.
    ///
    /// Defaults to sampling the segment every [`DEFAULT_SEGMENT_RESOLUTION`] units.
    fn is_segment_valid(&self, from: &Vec2, to: &Vec2) -> bool {
        sample_segment(from, to, DEFAULT_SEGMENT_RESOLUTION, |p| self.is_valid(p))
    }
}

// Any predicate closure is a configuration space
impl<F> ConfigurationSpace for F
where
    F: Fn(&Vec2) -> bool,
{
    fn is_valid(&self, config: &Vec2) -> bool {
        self(config)
    }
}

/// Checks `valid` at evenly spaced points along a segment, both ends included.
///
/// Points are at most `resolution` apart.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn sample_segment<F>(from: &Vec2, to: &Vec2, resolution: f64, mut valid: F) -> bool
where
    F: FnMut(&Vec2) -> bool,
{
    let length = from.distance(to);
    let steps = if resolution > 0.0 {
        (length / resolution).ceil().max(1.0) as usize
    } else {
        1
    };
    (0..=steps).all(|i| valid(&from.lerp(to, i as f64 / steps as f64)))
}

/// Obstacles understood by [`PositionConfigurationSpace`].
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Circle { center: Vec2, radius: f64 },

    // Closed polygon with an inaccessible interior
    Polygon(Polygon<f64>),
}

impl Obstacle {
    #[must_use]
    pub fn circle(center: Vec2, radius: f64) -> Self {
        Obstacle::Circle { center, radius }
    }

    /// Distance from the point to the obstacle, 0 when inside it.
    #[must_use]
    pub fn distance_to_point(&self, p: &Vec2) -> f64 {
        match self {
            Obstacle::Circle { center, radius } => (center.distance(p) - radius).max(0.0),
            Obstacle::Polygon(polygon) => Point::new(p.x(), p.y()).euclidean_distance(polygon),
        }
    }

    /// Distance from the segment to the obstacle, 0 when they intersect.
    #[must_use]
    pub fn distance_to_segment(&self, from: &Vec2, to: &Vec2) -> f64 {
        match self {
            Obstacle::Circle { center, radius } => {
                (point_segment_distance(center, from, to) - radius).max(0.0)
            }
            Obstacle::Polygon(polygon) => {
                Line::new((from.x(), from.y()), (to.x(), to.y())).euclidean_distance(polygon)
            }
        }
    }
}

// Distance from p to the closest point of the segment [a, b]
fn point_segment_distance(p: &Vec2, a: &Vec2, b: &Vec2) -> f64 {
    let ab = *b - *a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((*p - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance(&(*a + ab * t))
}

/// Configuration space of a point robot among fixed obstacles.
///
/// A configuration is valid when it is more than `clearance` away from every
/// obstacle and, if bounds are set, inside the workspace rectangle.
#[derive(Debug, Clone, Default)]
pub struct PositionConfigurationSpace {
    obstacles: Vec<Obstacle>,
    clearance: f64,
    bounds: Option<(Vec2, Vec2)>,
}

impl PositionConfigurationSpace {
    /// Constructs a new space with the specified obstacles, which may be empty.
    #[must_use]
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        PositionConfigurationSpace {
            obstacles,
            clearance: 0.0,
            bounds: None,
        }
    }

    /// All configurations must be more than `clearance` away from obstacles.
    #[must_use]
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance.max(0.0);
        self
    }

    /// Restrict valid configurations to the rectangle spanned by the two corners.
    #[must_use]
    pub fn with_bounds(mut self, min_corner: Vec2, max_corner: Vec2) -> Self {
        self.bounds = Some((min_corner, max_corner));
        self
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        self.bounds
    }

    fn in_bounds(&self, p: &Vec2) -> bool {
        self.bounds.map_or(true, |(min, max)| {
            (min.x()..=max.x()).contains(&p.x()) && (min.y()..=max.y()).contains(&p.y())
        })
    }
}

impl ConfigurationSpace for PositionConfigurationSpace {
    fn is_valid(&self, config: &Vec2) -> bool {
        self.in_bounds(config)
            && self
                .obstacles
                .iter()
                .all(|obstacle| obstacle.distance_to_point(config) > self.clearance)
    }

    // The workspace is convex, so checking the ends against the bounds is enough.
    fn is_segment_valid(&self, from: &Vec2, to: &Vec2) -> bool {
        self.in_bounds(from)
            && self.in_bounds(to)
            && self
                .obstacles
                .iter()
                .all(|obstacle| obstacle.distance_to_segment(from, to) > self.clearance)
    }
}

//
// Unit tests
//
