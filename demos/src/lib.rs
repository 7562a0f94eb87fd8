//! Shared scaffolding for the `painter` demo programs.

use re::prelude::*;

#[cfg(feature = "minifb")]
pub mod window;

/// The map used by the raycaster demos.
pub const MAZE: &str = "\
################
#..............#
#..22....3333..#
#..22.......3..#
#...........3..#
#....1.........#
#....1...44....#
#....1...44....#
#..............#
#.333......2...#
#..........2...#
################";

/// Returns a checkerboard texture of `n`×`n` squares, each `size` pixels
/// wide, alternating between colors `a` and `b`.
pub fn checkers(n: u32, size: u32, a: Color3, b: Color3) -> Texture {
    let dims = (n * size, n * size);
    Texture::new(Buf2::new_with(dims, |x, y| {
        if (x / size + y / size) % 2 == 0 { a } else { b }
    }))
}

/// Loads the texture at `path` if given, or returns `default` otherwise.
///
/// A texture that fails to load is replaced by the fallback pattern.
pub fn texture_or(path: Option<&str>, default: Texture) -> Texture {
    match path {
        Some(p) => Texture::load_or_fallback(p),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maze_parses() {
        let grid = Grid::parse(MAZE).unwrap();
        assert_eq!(grid.dims(), (16, 12));
        assert!(!grid.is_solid(1, 1));
        assert!(grid.is_solid(3, 2));
    }

    #[test]
    fn checkers_alternate() {
        let tex = checkers(2, 4, Color3::WHITE, Color3::BLACK);
        assert_eq!(tex.dims(), (8, 8));
        assert_eq!(tex.data()[[0, 0]], Color3::WHITE);
        assert_eq!(tex.data()[[4, 0]], Color3::BLACK);
        assert_eq!(tex.data()[[4, 4]], Color3::WHITE);
    }
}
