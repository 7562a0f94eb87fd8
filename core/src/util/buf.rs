//! Two-dimensional buffers.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Index, IndexMut};

use crate::util::Dims;

/// A rectangular 2D buffer that owns its elements, backed by a `Vec`.
///
/// `Buf2` stores its elements contiguously, in standard row-major order
/// with the origin at the top left, such that element (x, y) maps to the
/// element at index
/// ```text
/// buf.width() * y + x
/// ```
/// in the backing vector.
///
/// # Examples
/// ```
/// # use painter_core::util::buf::*;
/// // Elements initialized with `Default::default()`
/// let mut buf = Buf2::new_default((4, 4));
/// // Indexing with [x, y] yields the element at row y, column x:
/// buf[[2, 1]] = 123;
/// // Indexing with a usize i yields the row with index i as a slice:
/// assert_eq!(&buf[1usize], &[0, 0, 123, 0]);
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Buf2<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T> Buf2<T> {
    /// Returns a buffer of size `dims`, with elements taken from `data`
    /// in row-major order.
    ///
    /// # Panics
    /// If `data.len()` is not equal to `dims.0 * dims.1`.
    pub fn new_from(dims: Dims, data: Vec<T>) -> Self {
        let (w, h) = dims;
        assert_eq!(
            data.len(),
            w as usize * h as usize,
            "buffer length does not match dimensions {w}x{h}"
        );
        Self { dims, data }
    }

    /// Returns a buffer of size `dims`, with every element initialized
    /// by calling `T::default()`.
    pub fn new_default(dims: Dims) -> Self
    where
        T: Clone + Default,
    {
        Self::new_from(dims, alloc::vec![T::default(); len(dims)])
    }

    /// Returns a buffer of size `dims`, with every element initialized
    /// by calling `init_fn(x, y)` where x is the column index and y the
    /// row index of the element being initialized.
    pub fn new_with(dims: Dims, mut init_fn: impl FnMut(u32, u32) -> T) -> Self {
        let (w, h) = dims;
        let data = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| init_fn(x, y))
            .collect();
        Self { dims, data }
    }

    /// Returns the width and height of `self`.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }
    /// Returns the width of `self`.
    #[inline]
    pub fn width(&self) -> u32 {
        self.dims.0
    }
    /// Returns the height of `self`.
    #[inline]
    pub fn height(&self) -> u32 {
        self.dims.1
    }

    /// Returns a reference to the element at (x, y),
    /// or `None` if the position is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        self.to_index(x, y).map(|i| &self.data[i])
    }
    /// Returns a mutable reference to the element at (x, y),
    /// or `None` if the position is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        self.to_index(x, y).map(|i| &mut self.data[i])
    }

    /// Returns an iterator over the rows of `self`, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.dims.0.max(1) as usize)
    }
    /// Returns an iterator over the rows of `self` as mutable slices.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.data.chunks_exact_mut(self.dims.0.max(1) as usize)
    }

    /// Sets every element of `self` to `val`.
    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        self.data.fill(val);
    }

    /// Returns the backing data of `self`.
    pub fn data(&self) -> &[T] {
        &self.data
    }
    /// Returns the backing data of `self` as a mutable slice.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn to_index(&self, x: u32, y: u32) -> Option<usize> {
        let (w, h) = self.dims;
        (x < w && y < h).then(|| w as usize * y as usize + x as usize)
    }
}

fn len((w, h): Dims) -> usize {
    w as usize * h as usize
}

impl<T> Index<[u32; 2]> for Buf2<T> {
    type Output = T;
    /// Returns a reference to the element at column x, row y.
    ///
    /// # Panics
    /// If the position is out of bounds.
    fn index(&self, [x, y]: [u32; 2]) -> &T {
        let (w, h) = self.dims;
        self.get(x, y).unwrap_or_else(|| {
            panic!("position ({x}, {y}) out of bounds ({w}, {h})")
        })
    }
}

impl<T> IndexMut<[u32; 2]> for Buf2<T> {
    fn index_mut(&mut self, [x, y]: [u32; 2]) -> &mut T {
        let (w, h) = self.dims;
        self.get_mut(x, y).unwrap_or_else(|| {
            panic!("position ({x}, {y}) out of bounds ({w}, {h})")
        })
    }
}

impl<T> Index<usize> for Buf2<T> {
    type Output = [T];
    /// Returns a reference to the row at index `i`.
    ///
    /// # Panics
    /// If `i` is out of bounds.
    fn index(&self, i: usize) -> &[T] {
        let w = self.dims.0 as usize;
        &self.data[i * w..][..w]
    }
}

impl<T> IndexMut<usize> for Buf2<T> {
    fn index_mut(&mut self, i: usize) -> &mut [T] {
        let w = self.dims.0 as usize;
        &mut self.data[i * w..][..w]
    }
}

impl<T> Debug for Buf2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buf2")
            .field("dims", &self.dims)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn new_with_is_row_major() {
        let buf = Buf2::new_with((3, 2), |x, y| x + 10 * y);
        assert_eq!(buf.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf[[2, 1]], 12);
        assert_eq!(&buf[1usize], &[10, 11, 12]);
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let mut buf = Buf2::<u8>::new_default((2, 2));
        assert_eq!(buf.get(1, 1), Some(&0));
        assert_eq!(buf.get(2, 0), None);
        assert_eq!(buf.get(0, 2), None);
        assert!(buf.get_mut(5, 5).is_none());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let buf = Buf2::<u8>::new_default((2, 2));
        let _ = buf[[2, 0]];
    }

    #[test]
    #[should_panic]
    fn new_from_with_wrong_len_panics() {
        let _ = Buf2::new_from((2, 2), vec![1, 2, 3]);
    }

    #[test]
    fn rows_and_fill() {
        let mut buf = Buf2::new_from((2, 3), vec![1, 2, 3, 4, 5, 6]);
        let rows: Vec<_> = buf.rows().collect();
        assert_eq!(rows, [&[1, 2][..], &[3, 4], &[5, 6]]);

        buf.fill(7);
        assert!(buf.data().iter().all(|&x| x == 7));

        for row in buf.rows_mut() {
            row[0] = 0;
        }
        assert_eq!(buf.data(), &[0, 7, 0, 7, 0, 7]);
    }
}
