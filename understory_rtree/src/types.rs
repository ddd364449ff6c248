// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle geometry and the scalar abstraction used for area metrics.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::error::Error;

/// Axis-aligned rectangle in 2D.
///
/// Callers are expected to keep `min_x <= max_x` and `min_y <= max_y`.
/// [`Rect::new`] does not check this; use [`Rect::try_new`] for untrusted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Rect<T> {
    /// Create a new rectangle from min/max corners without validation.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Rect<T> {
    /// Create a rectangle, rejecting corners where a minimum exceeds its maximum.
    ///
    /// Incomparable coordinates (NaN) are rejected as well.
    pub fn try_new(min_x: T, min_y: T, max_x: T, max_y: T) -> Result<Self, Error> {
        let r = Self::new(min_x, min_y, max_x, max_y);
        if r.is_valid() {
            Ok(r)
        } else {
            Err(Error::InvalidGeometry)
        }
    }

    /// Whether both axes are well ordered (`min <= max`).
    pub fn is_valid(&self) -> bool {
        le(self.min_x, self.max_x) && le(self.min_y, self.max_y)
    }

    /// Whether the two rectangles overlap, comparing bounds strictly on both axes.
    ///
    /// Rectangles that only touch along an edge or at a corner do not overlap. A
    /// zero-width or zero-height rectangle lying strictly inside the other does.
    pub fn overlaps(&self, other: &Self) -> bool {
        lt(self.min_x, other.max_x)
            && lt(other.min_x, self.max_x)
            && lt(self.min_y, other.max_y)
            && lt(other.min_y, self.max_y)
    }

    /// Whether this rectangle contains the point. Bounds are inclusive.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// Grow this rectangle in place to the minimum bounding rectangle of both.
    pub fn expand(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// The minimum bounding rectangle covering both rectangles.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }
}

impl<T: Scalar> Rect<T> {
    /// Area in the scalar's widened accumulator type.
    ///
    /// Degenerate (zero width or height) rectangles have zero area.
    #[inline]
    pub fn area(&self) -> T::Acc {
        let w = T::max_zero(T::sub(self.max_x, self.min_x));
        let h = T::max_zero(T::sub(self.max_y, self.min_y));
        T::widen(w) * T::widen(h)
    }

    /// How much the area grows if this rectangle is expanded to cover `other`.
    #[inline]
    pub fn enlargement(&self, other: &Self) -> T::Acc {
        self.union(other).area() - self.area()
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Rect<f64> {
    /// Converts with corners normalized, so the result is always valid for finite input.
    fn from(r: kurbo::Rect) -> Self {
        Self::new(
            min_t(r.x0, r.x1),
            min_t(r.y0, r.y1),
            max_t(r.x0, r.x1),
            max_t(r.y0, r.y1),
        )
    }
}

#[cfg(feature = "kurbo")]
impl From<Rect<f64>> for kurbo::Rect {
    fn from(r: Rect<f64>) -> Self {
        Self::new(r.min_x, r.min_y, r.max_x, r.max_y)
    }
}

/// Numeric scalar abstraction for rectangle coordinates.
///
/// Areas are computed in an associated widened accumulator type
/// (e.g., f32→f64, i64→i128) so enlargement and waste comparisons stay robust.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
