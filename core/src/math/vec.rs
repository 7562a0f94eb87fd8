//! Real vectors tagged with the space they belong to.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{
    Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::math::approx::ApproxEq;
use crate::math::{Lerp, float};

//
// Types
//

/// A generic vector type. Represents an element of a vector space or a
/// module, a generalization of a vector space where the scalars can be
/// integers (technically, the scalar type can be any *ring*-like type).
///
/// # Type parameters
/// * `Repr`: Representation of the scalar components of the vector,
///   for example an array.
/// * `Basis`: Tag type representing the coordinate space in which the
///   vector is embedded, for example world or view space. Vectors in
///   different spaces cannot be mixed without explicit conversion.
#[repr(transparent)]
pub struct Vector<Repr, Basis = ()>(pub Repr, PhantomData<Basis>);

/// A 2-vector with `f32` components.
pub type Vec2<Basis = ()> = Vector<[f32; 2], Basis>;
/// A 3-vector with `f32` components.
pub type Vec3<Basis = ()> = Vector<[f32; 3], Basis>;
/// A homogeneous 4-vector with `f32` components.
///
/// Points have `w` = 1 and directions `w` = 0 before projection.
pub type Vec4<Basis = ()> = Vector<[f32; 4], Basis>;

//
// Free functions
//

/// Returns a real 2-vector with components `x` and `y`.
pub const fn vec2<B>(x: f32, y: f32) -> Vec2<B> {
    Vector::new([x, y])
}

/// Returns a real 3-vector with components `x`, `y`, and `z`.
pub const fn vec3<B>(x: f32, y: f32, z: f32) -> Vec3<B> {
    Vector::new([x, y, z])
}

/// Returns a real 4-vector with components `x`, `y`, `z`, and `w`.
pub const fn vec4<B>(x: f32, y: f32, z: f32, w: f32) -> Vec4<B> {
    Vector::new([x, y, z, w])
}

/// Returns a vector with all components equal to `s`.
///
/// # Examples
/// ```
/// # use painter_core::math::vec::*;
/// let v: Vec3 = splat(-1.5);
/// assert_eq!(v, vec3(-1.5, -1.5, -1.5));
/// ```
pub fn splat<B, const N: usize>(s: f32) -> Vector<[f32; N], B> {
    Vector::new([s; N])
}

//
// Inherent impls
//

impl<R, B> Vector<R, B> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, PhantomData)
    }

    /// Returns a vector with the same components but in basis `C`.
    ///
    /// This is a purely type-level conversion, no transformation is done.
    #[inline]
    pub fn to<C>(self) -> Vector<R, C> {
        Vector::new(self.0)
    }
}

impl<B, const N: usize> Vector<[f32; N], B> {
    /// Returns the zero vector.
    #[inline]
    pub fn zero() -> Self {
        splat(0.0)
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    /// Returns the squared length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        float::f32::sqrt(self.len_sqr())
    }

    /// Returns `self` scaled to unit length, or `None` if `self` has zero
    /// (or non-finite) length and thus no direction.
    ///
    /// # Examples
    /// ```
    /// # use painter_core::math::vec::*;
    /// let v: Vec2 = vec2(3.0, 4.0);
    /// assert_eq!(v.try_normalize(), Some(vec2(0.6, 0.8)));
    /// assert_eq!(Vec2::<()>::zero().try_normalize(), None);
    /// ```
    #[must_use]
    pub fn try_normalize(&self) -> Option<Self> {
        let len = self.len();
        (len > 0.0 && len.is_finite()).then(|| *self / len)
    }

    /// Returns `self` scaled to unit length.
    ///
    /// A zero-length vector has no direction, so the zero vector is
    /// returned instead. Use [`try_normalize`][Self::try_normalize] to
    /// detect that case.
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or_else(Self::zero)
    }

    /// Returns a vector with `f` applied to each component.
    #[must_use]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(self.0.map(&mut f))
    }
}

impl<B> Vec2<B> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
}

impl<B> Vec3<B> {
    /// Unit vector codirectional with the positive x-axis.
    pub const X: Self = vec3(1.0, 0.0, 0.0);
    /// Unit vector codirectional with the positive y-axis.
    pub const Y: Self = vec3(0.0, 1.0, 0.0);
    /// Unit vector codirectional with the positive z-axis.
    pub const Z: Self = vec3(0.0, 0.0, 1.0);

    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both input vectors, and its length
    /// equals the area of the parallelogram they span.
    /// ```text
    ///   ^ Y
    ///   |
    ///   +---> X
    ///  /
    /// v Z   (X cross Y = Z)
    /// ```
    /// # Examples
    /// ```
    /// # use painter_core::math::vec::*;
    /// assert_eq!(Vec3::<()>::X.cross(&Vec3::Y), Vec3::Z);
    /// assert_eq!(Vec3::<()>::Y.cross(&Vec3::X), -Vec3::Z);
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }

    /// Returns `self` extended with a `w` component.
    #[inline]
    pub const fn to_vec4(&self, w: f32) -> Vec4<B> {
        let [x, y, z] = self.0;
        vec4(x, y, z, w)
    }
}

impl<B> Vec4<B> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }
    /// Returns the x, y, and z components of `self`, dropping w.
    #[inline]
    pub const fn xyz(&self) -> Vec3<B> {
        let [x, y, z, _] = self.0;
        vec3(x, y, z)
    }
}

//
// Local trait impls
//

impl<B, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], B> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

impl<B, const N: usize> Lerp for Vector<[f32; N], B> {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

//
// Foreign trait impls
//

// Manual impls of Copy, Clone, Eq, and PartialEq to avoid
// superfluous where B: Trait bounds

impl<R: Copy, B> Copy for Vector<R, B> {}

impl<R: Clone, B> Clone for Vector<R, B> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: Default, B> Default for Vector<R, B> {
    fn default() -> Self {
        Self(R::default(), PhantomData)
    }
}

impl<R: Eq, B> Eq for Vector<R, B> {}

impl<R: PartialEq, B> PartialEq for Vector<R, B> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, B: Debug + Default> Debug for Vector<R, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>", B::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R, B> From<R> for Vector<R, B> {
    #[inline]
    fn from(repr: R) -> Self {
        Self::new(repr)
    }
}

impl<B, const N: usize> Index<usize> for Vector<[f32; N], B> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<B, const N: usize> IndexMut<usize> for Vector<[f32; N], B> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

impl<B, const N: usize> AddAssign for Vector<[f32; N], B> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<B, const N: usize> SubAssign for Vector<[f32; N], B> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl<B, const N: usize> MulAssign<f32> for Vector<[f32; N], B> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        for a in &mut self.0 {
            *a *= rhs;
        }
    }
}

impl<B, const N: usize> Add for Vector<[f32; N], B> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<B, const N: usize> Sub for Vector<[f32; N], B> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<B, const N: usize> Mul<f32> for Vector<[f32; N], B> {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl<B, const N: usize> Mul<Vector<[f32; N], B>> for f32 {
    type Output = Vector<[f32; N], B>;
    #[inline]
    fn mul(self, rhs: Vector<[f32; N], B>) -> Self::Output {
        rhs * self
    }
}

impl<B, const N: usize> Div<f32> for Vector<[f32; N], B> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(array::from_fn(|i| self.0[i] / rhs))
    }
}

impl<B, const N: usize> Neg for Vector<[f32; N], B> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}
