use super::{Piece, Square};
use shakmaty as sm;
use std::fmt;
use std::ops::Index;

/// A read-only snapshot of the piece placement on the board.
///
/// The snapshot is derived from the authoritative position after every change
/// and is never mutated directly.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
    squares: [[Option<Piece>; 8]; 8],
}

impl Placement {
    /// The first [`Square`] holding this [`Piece`], scanning by rank and then file.
    pub fn find(&self, p: Piece) -> Option<Square> {
        Square::iter().find(|&s| self[s] == Some(p))
    }

    /// An iterator over all occupied [`Square`]s and the [`Piece`]s on them.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |s| self[s].map(|p| (s, p)))
    }
}

impl FromIterator<(Square, Piece)> for Placement {
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(iter: I) -> Self {
        let mut placement = Placement::default();

        for (s, p) in iter {
            placement.squares[s.rank() as usize][s.file() as usize] = Some(p);
        }

        placement
    }
}

impl Index<Square> for Placement {
    type Output = Option<Piece>;

    fn index(&self, s: Square) -> &Self::Output {
        &self.squares[s.rank() as usize][s.file() as usize]
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, " {} ", rank + 1)?;

            for file in 0..8 {
                match self[Square::new(file, rank)] {
                    Some(p) => write!(f, " {} ", p.figurine())?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f)?;
        }

        write!(f, "   ")?;
        for file in b'a'..=b'h' {
            write!(f, " {} ", file as char)?;
        }

        Ok(())
    }
}

#[doc(hidden)]
impl From<&sm::Board> for Placement {
    fn from(b: &sm::Board) -> Self {
        let mut squares: [[Option<Piece>; 8]; 8] = Default::default();

        for s in Square::iter() {
            squares[s.rank() as usize][s.file() as usize] =
                b.piece_at(s.into()).map(Into::into);
        }

        Placement { squares }
    }
}
