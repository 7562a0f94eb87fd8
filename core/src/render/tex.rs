//! Textures, texture coordinates and a texture registry.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::fmt::{self, Debug, Display, Formatter};

use crate::math::color::Color3;
use crate::math::vec::Vector;
use crate::util::{Dims, buf::Buf2, pnm};

#[cfg(feature = "std")]
use std::path::Path;

// Basis of the texture space
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tex;

/// Texture coordinate with a perspective weight.
///
/// Before projection, `w` is 1. The projection stage divides all three
/// components by the clip-space `w` of the vertex, so that in screen space
/// `self` holds (u/w, v/w, 1/w). These quantities interpolate linearly
/// across the screen; [`TexCoord::unproject`] recovers the true (u, v).
pub type TexCoord = Vector<[f32; 3], Tex>;

/// Returns a texture coordinate (u, v) with weight 1.
#[inline]
pub const fn uv(u: f32, v: f32) -> TexCoord {
    Vector::new([u, v, 1.0])
}

/// Returns a texture coordinate (u, v) with weight `w`.
#[inline]
pub const fn uvw(u: f32, v: f32, w: f32) -> TexCoord {
    Vector::new([u, v, w])
}

impl TexCoord {
    #[inline]
    pub const fn u(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn v(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[2]
    }

    /// Divides all components of `self` by the clip-space `w`.
    #[must_use]
    pub fn project(self, w: f32) -> Self {
        self / w
    }

    /// Divides out the interpolated weight, returning (u, v) with weight 1.
    #[must_use]
    pub fn unproject(self) -> Self {
        let w = self.w();
        uv(self.u() / w, self.v() / w)
    }
}

/// An immutable RGB image that can be sampled with texture coordinates.
///
/// Cloning a `Texture` is cheap; the pixel data is shared.
#[derive(Clone, Eq, PartialEq)]
pub struct Texture {
    data: Arc<Buf2<Color3>>,
}

/// Error type for texture loading and the texture registry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A texture with the given id is already registered.
    DuplicateId(TexId),
    /// The texture image could not be loaded.
    Image(pnm::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Identifies a texture in a [`TextureRegistry`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TexId(pub u32);

/// An explicit, owned collection of textures keyed by [`TexId`].
#[derive(Clone, Debug, Default)]
pub struct TextureRegistry {
    texs: BTreeMap<TexId, Texture>,
    next: u32,
}

// Palette indices of the fallback pattern
const B: u8 = 0;
const R: u8 = 1;
const M: u8 = 10;

/// The fallback pattern, indexed `[x][y]`.
#[rustfmt::skip]
const FALLBACK: [[u8; 16]; 16] = [
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [B, B, B, B, B, B, B, B, M, M, M, M, M, M, M, M],
    [R, M, M, M, M, M, M, M, B, B, B, B, B, B, B, B],
    [R, M, M, M, M, R, M, M, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, R, M, M, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, R, M, M, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, R, M, M, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, R, M, M, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, M, R, R, B, B, B, B, B, B, B, B],
    [M, M, M, M, M, M, R, R, B, B, B, B, B, B, B, B],
];

impl Texture {
    /// Creates a texture from an image buffer.
    ///
    /// # Panics
    /// If `data` has zero width or height.
    pub fn new(data: Buf2<Color3>) -> Self {
        let (w, h) = data.dims();
        assert!(w > 0 && h > 0, "texture must not be empty, was {w}×{h}");
        Self { data: Arc::new(data) }
    }

    /// Returns the 16×16 fallback texture used in place of images that
    /// could not be loaded.
    ///
    /// The pattern has two magenta and two black quadrants, with a few red
    /// texels in the lower left quadrant marking the orientation.
    pub fn fallback() -> Self {
        Self::new(Buf2::new_with((16, 16), |x, y| {
            match FALLBACK[x as usize][y as usize] {
                B => Color3::BLACK,
                R => Color3::RED,
                _ => Color3::MAGENTA,
            }
        }))
    }

    /// Loads a texture from a PNM image file.
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let buf = pnm::load_pnm(path)?;
        if buf.width() == 0 || buf.height() == 0 {
            return Err(pnm::Error::Empty.into());
        }
        Ok(Self::new(buf))
    }

    /// Loads a texture from a PNM image file, or returns the
    /// [fallback][Self::fallback] texture if loading fails.
    #[cfg(feature = "std")]
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|_| Self::fallback())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.data.width()
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.data.height()
    }
    #[inline]
    pub fn dims(&self) -> Dims {
        self.data.dims()
    }

    /// Returns the image data of `self`.
    pub fn data(&self) -> &Buf2<Color3> {
        &self.data
    }

    /// Returns the texel nearest to the texture coordinate (u, v), or
    /// `None` if (u, v) falls outside the image.
    ///
    /// The coordinates are scaled by one less than the width and height,
    /// so that both 0.0 and 1.0 map to texels on the edges of the image.
    ///
    /// # Examples
    /// ```
    /// use painter_core::math::color::Color3;
    /// use painter_core::render::tex::Texture;
    ///
    /// let tex = Texture::fallback();
    /// assert_eq!(tex.sample(0.0, 0.0), Some(Color3::BLACK));
    /// assert_eq!(tex.sample(0.0, 1.0), Some(Color3::MAGENTA));
    /// assert_eq!(tex.sample(1.5, 0.0), None);
    /// ```
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Option<Color3> {
        let (w, h) = self.dims();
        let x = (u * (w - 1) as f32) as i32;
        let y = (v * (h - 1) as f32) as i32;
        if x < 0 || y < 0 {
            return None;
        }
        self.data.get(x as u32, y as u32).copied()
    }
}

impl TextureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tex` to `self` under a newly generated id and returns the id.
    pub fn register(&mut self, tex: Texture) -> TexId {
        while self.texs.contains_key(&TexId(self.next)) {
            self.next += 1;
        }
        let id = TexId(self.next);
        self.texs.insert(id, tex);
        self.next += 1;
        id
    }

    /// Adds `tex` to `self` under the given id.
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if a texture with `id` is already registered.
    /// The registry is left unchanged.
    pub fn insert(&mut self, id: TexId, tex: Texture) -> Result<()> {
        if self.texs.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        self.texs.insert(id, tex);
        Ok(())
    }

    /// Returns the texture with the given id, if any.
    pub fn get(&self, id: TexId) -> Option<&Texture> {
        self.texs.get(&id)
    }

    /// Returns the texture with the given id, or the fallback texture
    /// if there is none.
    pub fn get_or_fallback(&self, id: TexId) -> Texture {
        self.get(id).cloned().unwrap_or_else(Texture::fallback)
    }

    /// Removes and returns the texture with the given id, if any.
    pub fn remove(&mut self, id: TexId) -> Option<Texture> {
        self.texs.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.texs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texs.is_empty()
    }
}

//
// Foreign trait impls
//

impl From<Buf2<Color3>> for Texture {
    fn from(data: Buf2<Color3>) -> Self {
        Self::new(data)
    }
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dims();
        write!(f, "Texture({w}×{h})")
    }
}

impl Display for TexId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateId(id) => write!(f, "duplicate texture id {id}"),
            Error::Image(e) => write!(f, "could not load texture: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<pnm::Error> for Error {
    fn from(e: pnm::Error) -> Self {
        Error::Image(e)
    }
}

/// Convenience for solid-colored textures in tests and demos.
impl From<Color3> for Texture {
    fn from(c: Color3) -> Self {
        Self::new(Buf2::new_with((1, 1), |_, _| c))
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use crate::assert_approx_eq;
    use crate::math::color::rgb;

    use super::*;

    #[rustfmt::skip]
    fn tex() -> Texture {
        Texture::from(Buf2::new_from(
            (2, 2), vec![
                rgb(0xFF, 0, 0), rgb(0, 0xFF, 0),
                rgb(0, 0, 0xFF), rgb(0xFF, 0xFF, 0),
            ]
        ))
    }

    #[test]
    fn sample_nearest() {
        let t = tex();
        assert_eq!(t.sample(0.0, 0.0), Some(rgb(0xFF, 0, 0)));
        assert_eq!(t.sample(1.0, 0.0), Some(rgb(0, 0xFF, 0)));
        assert_eq!(t.sample(0.0, 1.0), Some(rgb(0, 0, 0xFF)));
        assert_eq!(t.sample(1.0, 1.0), Some(rgb(0xFF, 0xFF, 0)));
        // Truncation towards zero
        assert_eq!(t.sample(0.9, 0.9), Some(rgb(0xFF, 0, 0)));
    }

    #[test]
    fn sample_out_of_range() {
        let t = tex();
        assert_eq!(t.sample(2.0, 0.0), None);
        assert_eq!(t.sample(0.0, 2.5), None);
        assert_eq!(t.sample(-1.5, 0.0), None);
        assert_eq!(t.sample(0.0, -1.0), None);
    }

    #[test]
    fn fallback_pattern() {
        let t = Texture::fallback();
        assert_eq!(t.dims(), (16, 16));
        let d = t.data();
        assert_eq!(d[[0, 0]], Color3::BLACK);
        assert_eq!(d[[0, 8]], Color3::MAGENTA);
        assert_eq!(d[[8, 0]], Color3::RED);
        assert_eq!(d[[9, 5]], Color3::RED);
        assert_eq!(d[[15, 7]], Color3::RED);
        assert_eq!(d[[15, 15]], Color3::BLACK);
        assert_eq!(d[[12, 3]], Color3::MAGENTA);
    }

    #[test]
    #[cfg(feature = "std")]
    fn load_missing_file_falls_back() {
        let res = Texture::load("no/such/texture.ppm");
        assert!(matches!(res, Err(Error::Image(_))));

        let t = Texture::load_or_fallback("no/such/texture.ppm");
        assert_eq!(t, Texture::fallback());
    }

    #[test]
    #[cfg(feature = "std")]
    fn load_oversized_header_falls_back() {
        let path = std::env::temp_dir().join(format!(
            "painter-oversized-{}.ppm",
            std::process::id()
        ));
        std::fs::write(&path, b"P6 4294967295 4294967295 255\n").unwrap();

        let res = Texture::load(&path);
        let t = Texture::load_or_fallback(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(res, Err(Error::Image(pnm::Error::UnexpectedEnd))));
        assert_eq!(t, Texture::fallback());
    }

    #[test]
    fn project_and_unproject() {
        let tc = uv(0.25, 0.75).project(4.0);
        assert_eq!(tc, uvw(0.0625, 0.1875, 0.25));
        assert_approx_eq!(tc.unproject(), uv(0.25, 0.75));
    }

    #[test]
    fn registry_generates_ids() {
        let mut reg = TextureRegistry::new();
        let a = reg.register(tex());
        let b = reg.register(Texture::fallback());
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(a), Some(&tex()));
        assert_eq!(reg.get(b).map(Texture::dims), Some((16, 16)));
    }

    #[test]
    fn registry_skips_taken_ids() {
        let mut reg = TextureRegistry::new();
        reg.insert(TexId(0), tex()).unwrap();
        reg.insert(TexId(1), tex()).unwrap();
        assert_eq!(reg.register(Texture::fallback()), TexId(2));
    }

    #[test]
    fn registry_rejects_duplicate_id() {
        let mut reg = TextureRegistry::new();
        reg.insert(TexId(7), tex()).unwrap();

        let res = reg.insert(TexId(7), Texture::fallback());
        assert_eq!(res, Err(Error::DuplicateId(TexId(7))));
        assert_eq!(reg.get(TexId(7)), Some(&tex()));
        assert_eq!(
            format!("{}", Error::DuplicateId(TexId(7))),
            "duplicate texture id #7"
        );
    }

    #[test]
    fn registry_get_or_fallback() {
        let mut reg = TextureRegistry::new();
        assert_eq!(reg.get_or_fallback(TexId(3)), Texture::fallback());
        let id = reg.register(tex());
        assert_eq!(reg.get_or_fallback(id), tex());
        assert_eq!(reg.remove(id), Some(tex()));
        assert!(reg.is_empty());
    }

    #[test]
    fn solid_color() {
        let t = Texture::from(Color3::RED);
        assert_eq!(t.sample(0.0, 0.0), Some(Color3::RED));
        assert_eq!(t.sample(1.0, 1.0), Some(Color3::RED));
    }
}
