//! Colors and color spaces.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::Index;

//
// Types
//

/// A generic color type, similar to [`Vector`][crate::math::Vector].
///
/// # Type parameters
/// * `Repr`: the representation of the components of `Self`.
///   Color components are also called *channels*.
/// * `Space`: the color space that `Self` is an element of.
#[repr(transparent)]
pub struct Color<Repr, Space = Rgb>(pub Repr, PhantomData<Space>);

/// The (S)RGB color space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgb;

/// An RGB color with `u8` components.
pub type Color3<Space = Rgb> = Color<[u8; 3], Space>;

/// An RGB color with `f32` components in the range 0.0..=1.0.
pub type Color3f<Space = Rgb> = Color<[f32; 3], Space>;

/// Returns a new RGB color with `r`, `g`, and `b` components.
pub const fn rgb<Ch>(r: Ch, g: Ch, b: Ch) -> Color<[Ch; 3], Rgb> {
    Color([r, g, b], PhantomData)
}

/// Returns a gray color with intensity `i`, clamped to 0.0..=1.0.
///
/// # Examples
/// ```
/// # use painter_core::math::color::*;
/// assert_eq!(gray(0.0), rgb(0, 0, 0));
/// assert_eq!(gray(0.5), rgb(127, 127, 127));
/// assert_eq!(gray(2.0), rgb(255, 255, 255));
/// ```
pub fn gray(i: f32) -> Color3 {
    let c = to_u8(i);
    rgb(c, c, c)
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

//
// Inherent impls
//

impl Color3 {
    pub const BLACK: Self = rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Self = rgb(0xFF, 0x00, 0x00);
    pub const MAGENTA: Self = rgb(0xFF, 0x00, 0xFF);

    /// Returns a `u32` containing the component bytes of `self`
    /// in format `0x00_RR_GG_BB`.
    #[inline]
    pub const fn to_rgb_u32(self) -> u32 {
        let [r, g, b] = self.0;
        u32::from_be_bytes([0x00, r, g, b])
    }

    /// Returns the color packed as `0x??_RR_GG_BB` in `c`.
    /// The most significant byte is ignored.
    #[inline]
    pub const fn from_rgb_u32(c: u32) -> Self {
        let [_, r, g, b] = c.to_be_bytes();
        rgb(r, g, b)
    }

    /// Returns the components of `self` scaled by `f`, which is clamped
    /// to the range 0.0..=1.0.
    ///
    /// Used to darken texels by a flat shading intensity.
    ///
    /// # Examples
    /// ```
    /// # use painter_core::math::color::*;
    /// assert_eq!(rgb(200, 100, 50).mul(0.5), rgb(100, 50, 25));
    /// assert_eq!(rgb(200, 100, 50).mul(1.5), rgb(200, 100, 50));
    /// ```
    #[must_use]
    pub fn mul(self, f: f32) -> Self {
        let f = f.clamp(0.0, 1.0);
        Self::from(self.0.map(|c| (c as f32 * f) as u8))
    }

    /// Returns `self` converted to floating-point components.
    pub fn to_color3f(self) -> Color3f {
        Color3f::from(self.0.map(|c| c as f32 / 255.0))
    }

    /// Returns the red component of `self`.
    #[inline]
    pub const fn r(&self) -> u8 {
        self.0[0]
    }
    /// Returns the green component of `self`.
    #[inline]
    pub const fn g(&self) -> u8 {
        self.0[1]
    }
    /// Returns the blue component of `self`.
    #[inline]
    pub const fn b(&self) -> u8 {
        self.0[2]
    }
}

impl Color3f {
    /// Returns a `Color3` with the components of `self` mapped to `u8`
    /// with `(c.clamp(0.0, 1.0) * 255.0) as u8`.
    #[inline]
    pub fn to_color3(self) -> Color3 {
        self.0.map(to_u8).into()
    }
}

//
// Foreign trait impls
//

impl<R: Copy, S> Copy for Color<R, S> {}

impl<R: Clone, S> Clone for Color<R, S> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: Default, S> Default for Color<R, S> {
    fn default() -> Self {
        Self(R::default(), PhantomData)
    }
}

impl<R: Eq, S> Eq for Color<R, S> {}

impl<R: PartialEq, S> PartialEq for Color<R, S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Space: Debug + Default> Debug for Color<R, Space> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Color<{:?}>{:?}", Space::default(), self.0)
    }
}

impl<R, Sp> From<R> for Color<R, Sp> {
    #[inline]
    fn from(els: R) -> Self {
        Self(els, PhantomData)
    }
}

impl<Ch, Sp, const N: usize> Index<usize> for Color<[Ch; N], Sp> {
    type Output = Ch;
    fn index(&self, i: usize) -> &Ch {
        &self.0[i]
    }
}
