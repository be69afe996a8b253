use derive_more::{Display, Error};
use shakmaty as sm;
use std::str::FromStr;

#[cfg(test)]
use proptest::sample::select;

/// Denotes a square of the chess board in algebraic notation, e.g. `e4`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", _0)]
pub struct Square(#[cfg_attr(test, strategy(select(sm::Square::ALL.as_ref())))] sm::Square);

impl Square {
    /// Constructs [`Square`] from file and rank indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in the range (0..=7).
    pub fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8);
        Square(sm::Square::from_coords(
            sm::File::new(file as u32),
            sm::Rank::new(rank as u32),
        ))
    }

    /// The index of this square's file, `0` for file `a` through `7` for file `h`.
    pub fn file(&self) -> u8 {
        self.0.file().into()
    }

    /// The index of this square's rank, `0` for rank `1` through `7` for rank `8`.
    pub fn rank(&self) -> u8 {
        self.0.rank().into()
    }

    /// An iterator over all 64 squares, ordered by rank and then file.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        sm::Square::ALL.into_iter().map(Square)
    }
}

/// The reason why a string does not denote a [`Square`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "unable to parse square; {}")]
pub enum InvalidNotation {
    #[display(fmt = "expected a file letter in the range `('a'..='h')`")]
    InvalidFile,
    #[display(fmt = "expected a rank digit in the range `('1'..='8')`")]
    InvalidRank,
    #[display(fmt = "expected a file letter followed by a rank digit")]
    InvalidLength,
}

impl FromStr for Square {
    type Err = InvalidNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use InvalidNotation::*;

        let mut chars = s.chars();
        let (f, r) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(InvalidLength),
        };

        Ok(Square(sm::Square::from_coords(
            sm::File::from_char(f).ok_or(InvalidFile)?,
            sm::Rank::from_char(r).ok_or(InvalidRank)?,
        )))
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Square(s)
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        s.0
    }
}
