use crate::chess::Square;
use derive_more::{Display, Error};

/// A point in screen coordinates, relative to the top-left corner of the board.
#[derive(Debug, Display, Copy, Clone, PartialEq)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// The reason why a [`Point`] does not land on a [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "the point lies outside of the board")]
pub struct OffGrid;

/// The 8x8 grid the board is rendered on, from White's perspective.
///
/// File `a` maps to the leftmost column of the screen and rank `8` to the
/// topmost row. Both transforms are pure and exact inverses of each other
/// over all 64 squares.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grid {
    size: f32,
}

impl Grid {
    /// Constructs a [`Grid`] whose squares are `size` pixels wide, typically
    /// an eighth of the screen width.
    ///
    /// # Panics
    ///
    /// Panics unless `size` is strictly positive and finite.
    pub fn new(size: f32) -> Self {
        assert!(size.is_finite() && size > 0.);
        Grid { size }
    }

    /// The screen coordinates of the top-left corner of this [`Square`].
    pub fn point(&self, s: Square) -> Point {
        Point {
            x: s.file() as f32 * self.size,
            y: (7 - s.rank()) as f32 * self.size,
        }
    }

    /// The [`Square`] whose cell contains this [`Point`].
    ///
    /// Each cell spans from its top-left corner up to, but excluding, the
    /// corner of the next.
    pub fn square(&self, p: Point) -> Result<Square, OffGrid> {
        let file = (p.x / self.size).floor();
        let rank = 7. - (p.y / self.size).floor();

        if (0f32..8.).contains(&file) && (0f32..8.).contains(&rank) {
            Ok(Square::new(file as u8, rank as u8))
        } else {
            Err(OffGrid)
        }
    }
}
