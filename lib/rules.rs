use crate::chess::{Color, IllegalMove, Move, Outcome, Piece, Placement, Position, Square};

#[cfg(test)]
use mockall::automock;

/// The capabilities the board controller requires of a rules engine.
///
/// The controller never inspects game rules itself; everything it knows about
/// legality, turn order, and game termination flows through this interface.
#[cfg_attr(test, automock)]
pub trait Rules {
    /// The side to move.
    fn turn(&self) -> Color;

    /// The [`Piece`] occupying a [`Square`], if any.
    fn piece_on(&self, s: Square) -> Option<Piece>;

    /// The [`Square`]s the piece on `whence` may legally move to.
    fn destinations(&self, whence: Square) -> Vec<Square>;

    /// Play a [`Move`] if legal, otherwise report why not.
    fn play(&mut self, m: Move) -> Result<(), IllegalMove>;

    /// Whether the side to move is in check.
    fn is_check(&self) -> bool;

    /// `Some(Outcome)` if the game has ended or `None`.
    fn outcome(&self) -> Option<Outcome>;

    /// A read-only snapshot of the current piece placement.
    fn placement(&self) -> Placement;
}

impl Rules for Position {
    fn turn(&self) -> Color {
        Position::turn(self)
    }

    fn piece_on(&self, s: Square) -> Option<Piece> {
        Position::piece_on(self, s)
    }

    fn destinations(&self, whence: Square) -> Vec<Square> {
        Position::destinations(self, whence)
    }

    fn play(&mut self, m: Move) -> Result<(), IllegalMove> {
        Position::play(self, m)
    }

    fn is_check(&self) -> bool {
        Position::is_check(self)
    }

    fn outcome(&self) -> Option<Outcome> {
        Position::outcome(self)
    }

    fn placement(&self) -> Placement {
        Position::placement(self)
    }
}
