//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat], [colors][color] and
//! [angles][angle], as well as utilities such as linear interpolation and
//! approximate equality comparisons.
//!
//! Vectors are tagged with a type that represents the *space* they live
//! in, and values in different spaces cannot be mixed without an explicit
//! transformation or conversion. Matrices, similarly, are tagged by both
//! source and destination space, and can only be applied to matching
//! vectors. This catches at compile time many mistakes that would
//! otherwise only show up as garbled pixels.

pub use {
    angle::{Angle, degs, rads, turns},
    approx::ApproxEq,
    color::{Color3, gray, rgb},
    mat::{
        Mat4, orthographic, perspective, point_at, rotate_x, rotate_y,
        rotate_z, scale, translate, viewport,
    },
    vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
};

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vec;

/// Trait for linear interpolation between two values.
pub trait Lerp: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// if `t` = 0, returns `self`; if `t` = 1, returns `other`.
    /// For 0 < `t` < 1, returns the weighted average of `self` and `other`
    /// ```text
    /// (1 - t) * self + t * other
    /// ```
    ///
    /// Values of `t` outside the unit interval extrapolate.
    ///
    /// # Examples
    /// ```
    /// use painter_core::math::Lerp;
    ///
    /// assert_eq!(f32::lerp(&1.0, &5.0, 0.25), 2.0);
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Returns the (unweighted) average of `self` and `other`.
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// Linearly interpolates between two values.
///
/// For examples and more information, see [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(t: f32, from: T, to: T) -> T {
    from.lerp(&to, t)
}

/// Returns the relative position of `t` between `min` and `max`.
///
/// That is, returns 0 when `t` = `min`, 1 when `t` = `max`, and linearly
/// interpolates in between. The result is unspecified if `min` = `max`.
///
/// # Examples
/// ```
/// use painter_core::math::inv_lerp;
///
/// assert_eq!(inv_lerp(2.0, 1.0, 5.0), 0.25);
/// assert_eq!(inv_lerp(0.0, -2.0, 2.0), 0.5);
/// ```
#[inline]
pub fn inv_lerp(t: f32, min: f32, max: f32) -> f32 {
    (t - min) / (max - min)
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + t * (other - self)
    }
}

impl Lerp for () {
    fn lerp(&self, _: &Self, _: f32) {}
}

impl<U: Lerp, V: Lerp> Lerp for (U, V) {
    fn lerp(&self, (u, v): &Self, t: f32) -> Self {
        (self.0.lerp(u, t), self.1.lerp(v, t))
    }
}
