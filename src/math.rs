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

//! Small fixed-size vector type used for positions and joint angles.
//!
//! Also home to the [Distance] trait, which the roadmap graph uses to weigh edges.
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, Neg, Sub, SubAssign};

/// Define a distance trait for graph node values.
pub trait Distance {
    fn distance(&self, other: &Self) -> f64;
}

/// An `N` dimensional vector of `f64` coordinates with value semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>([f64; N]);

/// Planar positions, and the joint angles of a two-link arm.
pub type Vec2 = Vector<2>;

impl<const N: usize> Vector<N> {
    /// Constructs a vector from its coordinates.
    #[must_use]
    pub const fn from_array(coords: [f64; N]) -> Self {
        Vector(coords)
    }

    /// The zero vector.
    #[must_use]
    pub const fn zeros() -> Self {
        Vector([0.0; N])
    }

    #[must_use]
    pub fn coords(&self) -> &[f64; N] {
        &self.0
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Returns the unit vector in the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let norm = self.norm();
        if norm > f64::EPSILON {
            Some(*self * (1.0 / norm))
        } else {
            None
        }
    }

    /// Linear interpolation, `t = 0` is `self` and `t = 1` is `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Vector<2> {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Vector([x, y])
    }

    /// Unit vector pointing along `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Vector([angle.cos(), angle.sin()])
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Angle of the vector from the positive x axis, in `(-pi, pi]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.y().atan2(self.x())
    }

    /// Rotates the vector by a quarter turn counter clockwise.
    #[must_use]
    pub fn perp(&self) -> Self {
        Vector([-self.y(), self.x()])
    }
}

/// Wraps an angle into `(-pi, pi]`.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(coords: [f64; N]) -> Self {
        Vector(coords)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Vector(self.0.map(|c| c * rhs))
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Vector(self.0.map(|c| -c))
    }
}

// Norm distance function for vectors
impl<const N: usize> Distance for Vector<N> {
    fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }
}

// Handy for debugging
impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.2}")?;
        }
        write!(f, ")")
    }
}

//
// Unit tests
//
