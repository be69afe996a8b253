use super::{Color, Fen, Move, Outcome, ParseFenError, Piece, Placement, Square};
use derive_more::{Display, Error, From};
use shakmaty as sm;
use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

#[cfg(test)]
use proptest::{prelude::*, sample::Selector};

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in position `{}`", _0, _1)]
pub struct IllegalMove(pub Move, pub Position);

/// The authoritative state of the game.
///
/// This type guarantees that it only holds positions reachable by a sequence
/// of legal moves; the hard questions are delegated to [`shakmaty`].
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Position(
    #[cfg_attr(test, strategy((0..64usize, any::<Selector>()).prop_map(|(moves, selector)| {
        let mut chess = sm::Chess::default();
        for _ in 0..moves {
            match selector.try_select(sm::Position::legal_moves(&chess)) {
                Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                _ => break,
            }
        }
        chess
    }).no_shrink()))]
    sm::Chess,
);

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The [`Piece`] occupying this [`Square`], if any.
    pub fn piece_on(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Into::into)
    }

    /// A read-only snapshot of the current piece placement.
    pub fn placement(&self) -> Placement {
        sm::Position::board(&self.0).into()
    }

    /// Whether the side to move is in [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        sm::Position::is_check(&self.0)
    }

    /// `Some(Outcome)` if the game has ended or `None`.
    pub fn outcome(&self) -> Option<Outcome> {
        match sm::Position::outcome(&self.0)? {
            sm::Outcome::Decisive { winner } => Some(Outcome::Checkmate(winner.into())),
            sm::Outcome::Draw if sm::Position::is_stalemate(&self.0) => Some(Outcome::Stalemate),
            sm::Outcome::Draw => Some(Outcome::Draw),
        }
    }

    /// The [`Square`]s the piece on this [`Square`] may legally move to.
    ///
    /// The castling destination is the king's target square, i.e. where a tap
    /// on the rendered board lands. Enumerating destinations never mutates
    /// the position.
    pub fn destinations(&self, whence: Square) -> Vec<Square> {
        let mut whithers = Vec::new();

        for vm in sm::Position::legal_moves(&self.0) {
            let m = Move::from(sm::uci::Uci::from_standard(&vm));
            if m.whence() == whence && !whithers.contains(&m.whither()) {
                whithers.push(m.whither());
            }
        }

        whithers
    }

    /// Play a [`Move`] if legal in this position.
    #[instrument(level = "debug", err)]
    pub fn play(&mut self, m: Move) -> Result<(), IllegalMove> {
        match sm::uci::Uci::from(m).to_move(&self.0) {
            Ok(vm) if sm::Position::is_legal(&self.0, &vm) => {
                sm::Position::play_unchecked(&mut self.0, &vm);
                Ok(())
            }

            _ => Err(IllegalMove(m, self.clone())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Fen::from(self.clone()))
    }
}

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

impl TryFrom<Fen> for Position {
    type Error = IllegalPosition;

    fn try_from(fen: Fen) -> Result<Self, Self::Error> {
        Ok(Position(
            sm::Setup::from(fen).position(sm::CastlingMode::Standard)?,
        ))
    }
}

#[doc(hidden)]
impl From<Position> for sm::Setup {
    fn from(pos: Position) -> Self {
        sm::Position::into_setup(pos.0, sm::EnPassantMode::Always)
    }
}

/// The reason why parsing [`Position`] from FEN failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "{}", _0)]
    InvalidFen(ParseFenError),
    #[display(fmt = "{}", _0)]
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Fen>()?.try_into()?)
    }
}
