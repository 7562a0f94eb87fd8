//! Matrices and affine transforms.
//!
//! Matrices follow the *row vector* convention: a vector is transformed by
//! multiplying it from the left, `v' = v · M`. Consequently the translation
//! part of an affine matrix lives in the last row, and the transform that
//! is applied first is the leftmost factor of a product. For example,
//! `rotate_z(a) * translate(t)` first rotates, then translates.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Mul, Range};

use crate::math::angle::Angle;
use crate::math::approx::ApproxEq;
use crate::math::vec::{Vec3, Vec4};
use crate::render::{Ndc, Proj, Screen, View, World};
use crate::util::Dims;

//
// Types
//

/// Tag type for a linear map from space `Src` to space `Dst`.
pub struct RealToReal<Src, Dst>(PhantomData<(Src, Dst)>);

/// A generic matrix type.
///
/// # Type parameters
/// * `Repr`: the representation of the elements, typically an array of
///   arrays of scalars.
/// * `Map`: a tag type describing the mapping the matrix represents.
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, PhantomData<Map>);

/// A 4×4 `f32` matrix mapping homogeneous vectors in `Src` to `Dst`.
pub type Mat4<Src = (), Dst = Src> =
    Matrix<[[f32; 4]; 4], RealToReal<Src, Dst>>;

//
// Inherent impls
//

impl<Repr, Map> Matrix<Repr, Map> {
    /// Returns a matrix with the given elements.
    #[inline]
    pub const fn new(els: Repr) -> Self {
        Self(els, PhantomData)
    }
}

impl<S, D> Mat4<S, D> {
    /// Returns the 4×4 identity matrix.
    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the row at index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; 4] {
        self.0[i]
    }

    /// Returns the column at index `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f32; 4] {
        self.0.map(|row| row[i])
    }

    /// Returns `self` with its type-level spaces replaced.
    ///
    /// Does not change the elements.
    #[inline]
    pub fn to<S2, D2>(&self) -> Mat4<S2, D2> {
        Matrix::new(self.0)
    }

    /// Returns the transpose of `self`.
    pub fn transpose(&self) -> Self {
        Self::new([self.col(0), self.col(1), self.col(2), self.col(3)])
    }

    /// Returns the composite transform that first applies `self`, then
    /// `other`.
    ///
    /// In terms of matrix multiplication, this is `self * other`.
    #[must_use]
    pub fn then<E>(&self, other: &Mat4<D, E>) -> Mat4<S, E> {
        let mut els = [[0.0; 4]; 4];
        for (r, row) in els.iter_mut().enumerate() {
            for (c, el) in row.iter_mut().enumerate() {
                let (a, b) = (self.row(r), other.col(c));
                *el = a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3];
            }
        }
        Matrix::new(els)
    }

    /// Returns the composite transform that first applies `other`, then
    /// `self`.
    ///
    /// In terms of matrix multiplication, this is `other * self`.
    #[must_use]
    pub fn compose<R>(&self, other: &Mat4<R, S>) -> Mat4<R, D> {
        other.then(self)
    }

    /// Transforms the homogeneous vector `v`.
    pub fn apply(&self, v: &Vec4<S>) -> Vec4<D> {
        let mut res = [0.0; 4];
        for (c, el) in res.iter_mut().enumerate() {
            *el = (0..4).map(|r| v.0[r] * self.0[r][c]).sum();
        }
        res.into()
    }

    /// Transforms the point `p`, taking its `w` to be 1.
    ///
    /// Translation is applied. The resulting `w` is dropped without any
    /// division, so this is only meaningful for affine matrices.
    pub fn apply_pt(&self, p: &Vec3<S>) -> Vec3<D> {
        self.apply(&p.to_vec4(1.0)).xyz()
    }

    /// Transforms the direction `d`, taking its `w` to be 0.
    ///
    /// Translation is not applied.
    pub fn apply_dir(&self, d: &Vec3<S>) -> Vec3<D> {
        self.apply(&d.to_vec4(0.0)).xyz()
    }

    /// Returns the inverse of `self`, assuming that `self` is a *rigid*
    /// transform, ie. a rotation followed by a translation.
    ///
    /// The rotation part is inverted by transposing it and the translation
    /// by negating it and rotating by the transposed rotation.
    ///
    /// **Note:** this is *not* a general matrix inverse. If `self` contains
    /// any scaling, shearing, or projection, the result is silently wrong.
    #[must_use]
    pub fn quick_inverse(&self) -> Mat4<D, S> {
        let m = &self.0;
        let t = [m[3][0], m[3][1], m[3][2]];
        let dot = |row: &[f32; 4]| t[0] * row[0] + t[1] * row[1] + t[2] * row[2];
        Matrix::new([
            [m[0][0], m[1][0], m[2][0], 0.0],
            [m[0][1], m[1][1], m[2][1], 0.0],
            [m[0][2], m[1][2], m[2][2], 0.0],
            [-dot(&m[0]), -dot(&m[1]), -dot(&m[2]), 1.0],
        ])
    }
}

//
// Free functions
//

/// Returns a matrix applying a scaling by `s`.
pub const fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Matrix::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a translation by `t`.
pub const fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Matrix::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [x, y, z, 1.0],
    ])
}

/// Returns a matrix applying a rotation by angle `a` about the x axis.
pub fn rotate_x(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Matrix::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by angle `a` about the y axis.
///
/// A positive angle turns the +z axis towards -x.
pub fn rotate_y(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Matrix::new([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by angle `a` about the z axis.
pub fn rotate_z(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Matrix::new([
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Creates a perspective projection matrix.
///
/// # Parameters
/// * `fov`: vertical field of view.
/// * `aspect`: height of the viewport divided by its width.
/// * `near_far`: depth range between the near and far clipping planes.
///   Both must be positive, and `near` less than `far`.
///
/// The projected `w` equals the view-space depth `z`. After division by
/// `w`, depth maps to 0 at `near` and 1 at `far`.
pub fn perspective(
    fov: Angle,
    aspect: f32,
    near_far: Range<f32>,
) -> Mat4<View, Proj> {
    let Range { start: n, end: f } = near_far;
    assert!(0.0 < n && n < f, "invalid depth range {n}..{f}");

    let foc = 1.0 / (fov / 2.0).tan();
    let q = f / (f - n);
    Matrix::new([
        [aspect * foc, 0.0, 0.0, 0.0],
        [0.0, foc, 0.0, 0.0],
        [0.0, 0.0, q, 1.0],
        [0.0, 0.0, -n * q, 0.0],
    ])
}

/// Creates an orthographic projection matrix.
///
/// # Parameters
/// * `extent`: half the height of the visible region in view units.
/// * `aspect`: height of the viewport divided by its width.
/// * `near_far`: depth range between the near and far clipping planes.
///
/// The projected `w` is always 1.
pub fn orthographic(
    extent: f32,
    aspect: f32,
    near_far: Range<f32>,
) -> Mat4<View, Proj> {
    let Range { start: n, end: f } = near_far;
    assert!(n < f, "invalid depth range {n}..{f}");
    let d = 1.0 / (f - n);
    Matrix::new([
        [aspect / extent, 0.0, 0.0, 0.0],
        [0.0, 1.0 / extent, 0.0, 0.0],
        [0.0, 0.0, d, 0.0],
        [0.0, 0.0, -n * d, 1.0],
    ])
}

/// Creates a viewport matrix mapping normalized device coordinates to
/// pixel coordinates in a `dims`-sized buffer.
///
/// Both x and y are flipped: NDC (1, 1) maps to the top-left corner
/// (0, 0) and NDC (-1, -1) to the bottom-right corner (w, h).
pub fn viewport(dims: Dims) -> Mat4<Ndc, Screen> {
    let (hw, hh) = (dims.0 as f32 / 2.0, dims.1 as f32 / 2.0);
    Matrix::new([
        [-hw, 0.0, 0.0, 0.0],
        [0.0, -hh, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [hw, hh, 0.0, 1.0],
    ])
}

/// Returns a camera matrix for a viewer at `pos` looking at `target`.
///
/// The result maps view space to world space; the basis vectors of the
/// view frame are its first three rows (right, up, forward) and the
/// position its last. Use [`Mat4::quick_inverse`] to obtain the
/// world-to-view transform.
///
/// `up` need not be perpendicular to the view direction, only not
/// parallel to it.
pub fn point_at(
    pos: Vec3<World>,
    target: Vec3<World>,
    up: Vec3<World>,
) -> Mat4<View, World> {
    let fwd = (target - pos).normalize();
    let up = (up - fwd * up.dot(&fwd)).normalize();
    let right = up.cross(&fwd);
    Matrix::new([
        right.to_vec4(0.0).0,
        up.to_vec4(0.0).0,
        fwd.to_vec4(0.0).0,
        pos.to_vec4(1.0).0,
    ])
}

//
// Local trait impls
//

impl<Map> ApproxEq<Self, f32> for Matrix<[[f32; 4]; 4], Map> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Foreign trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<S, D> Default for Mat4<S, D> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<R, M> From<R> for Matrix<R, M> {
    fn from(els: R) -> Self {
        Self::new(els)
    }
}

impl<S: Debug + Default, D: Debug + Default> Debug for Mat4<S, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}→{:?}>[", S::default(), D::default())?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}

impl<S, M, D> Mul<Mat4<M, D>> for Mat4<S, M> {
    type Output = Mat4<S, D>;

    /// Returns the standard row-by-column matrix product `self * rhs`.
    fn mul(self, rhs: Mat4<M, D>) -> Mat4<S, D> {
        self.then(&rhs)
    }
}
