use crate::chess::{Color, Move, Outcome, Piece, Placement, Position, Promotion, Role, Square};
use crate::rules::Rules;
use derive_more::Display;
use std::mem::take;
use tracing::{debug, instrument};

/// The selection state of the board.
///
/// Destinations are computed once when a square is selected and always derive
/// from the position as of the last committed move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Default)]
pub enum Selection {
    #[default]
    #[display(fmt = "idle")]
    Idle,

    #[display(fmt = "selected {}", square)]
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
}

impl Selection {
    /// The selected [`Square`], if any.
    pub fn square(&self) -> Option<Square> {
        match *self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(square),
        }
    }

    /// The legal destinations of the selected piece, empty when idle.
    pub fn destinations(&self) -> &[Square] {
        match self {
            Selection::Idle => &[],
            Selection::Selected { destinations, .. } => destinations,
        }
    }
}

/// The visible effect of a tap on the board.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash)]
pub enum Reaction {
    /// A piece of the side to move was selected.
    #[display(fmt = "selected {}", _0)]
    Selected(Square),

    /// The selection was cleared without a move taking effect.
    #[display(fmt = "deselected")]
    Deselected,

    /// A move was committed; the turn is complete.
    #[display(fmt = "moved {}", _0)]
    Moved(Move),

    /// The tap did not change anything.
    #[display(fmt = "ignored")]
    Ignored,
}

/// The board interaction controller.
///
/// Translates taps on board squares into move attempts against the rules
/// engine and maintains the derived rendering state, i.e. the selection
/// highlight, the legal destination markers, and the check indicator. Taps
/// are processed one at a time and each runs to completion.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board<R> {
    rules: R,
    selection: Selection,
    check: Option<Square>,
}

impl Default for Board<Position> {
    /// A board at the starting position.
    fn default() -> Self {
        Board::new(Position::default())
    }
}

impl<R: Rules> Board<R> {
    /// Constructs a [`Board`] over a game at an arbitrary point, e.g. a
    /// puzzle handed out by the match maker.
    pub fn new(rules: R) -> Self {
        let check = Self::indicator(&rules);

        Board {
            rules,
            selection: Selection::Idle,
            check,
        }
    }

    // The square of the side to move's king, when in check.
    fn indicator(rules: &R) -> Option<Square> {
        if rules.is_check() {
            rules.placement().find(Piece(rules.turn(), Role::King))
        } else {
            None
        }
    }

    // Pawns tapped onto the back rank promote to a queen.
    fn promotion(&self, whence: Square, whither: Square) -> Promotion {
        match self.rules.piece_on(whence) {
            Some(p) if p.role() == Role::Pawn && matches!(whither.rank(), 0 | 7) => {
                Promotion::Queen
            }
            _ => Promotion::None,
        }
    }

    /// Processes a tap on a [`Square`].
    ///
    /// Exactly one of the following happens, in order of precedence:
    ///
    /// - the tap lands on the selected square, which clears the selection;
    /// - the tap lands on a legal destination of the selected piece, which
    ///   submits the move to the rules engine — [`Reaction::Moved`] signals
    ///   the completed turn, while a rejection clears the selection and
    ///   leaves the board untouched;
    /// - the tap lands on a piece of the side to move, which selects it and
    ///   computes its legal destinations, replacing any prior selection;
    /// - anything else clears the selection, or is ignored if there was none.
    #[instrument(level = "debug", skip(self))]
    pub fn tap(&mut self, square: Square) -> Reaction {
        match take(&mut self.selection) {
            Selection::Selected { square: s, .. } if s == square => Reaction::Deselected,

            Selection::Selected {
                square: s,
                destinations,
            } if destinations.contains(&square) => self.attempt(s, square),

            prev => match self.rules.piece_on(square) {
                Some(p) if p.color() == self.rules.turn() => {
                    self.selection = Selection::Selected {
                        square,
                        destinations: self.rules.destinations(square),
                    };

                    Reaction::Selected(square)
                }

                _ if prev == Selection::Idle => Reaction::Ignored,
                _ => Reaction::Deselected,
            },
        }
    }

    /// Submits a move for the piece on `whence` to `whither`, e.g. at the end
    /// of a drag gesture.
    ///
    /// Taps reach this through [`Board::tap`], whose transition table only
    /// routes destinations computed legal; the rules engine nevertheless
    /// remains authoritative and may still reject the move, in which case the
    /// selection clears and the board is left untouched. A committed move is
    /// atomic; no partially applied state is ever observable.
    #[instrument(level = "debug", skip(self))]
    pub fn attempt(&mut self, whence: Square, whither: Square) -> Reaction {
        let m = Move::new(whence, whither, self.promotion(whence, whither));
        self.selection = Selection::Idle;

        match self.rules.play(m) {
            Ok(()) => {
                self.check = Self::indicator(&self.rules);
                Reaction::Moved(m)
            }

            Err(e) => {
                debug!("{}", e);
                Reaction::Deselected
            }
        }
    }

    /// The current [`Selection`].
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The square of the king currently in check, if any.
    pub fn checked_king(&self) -> Option<Square> {
        self.check
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.rules.turn()
    }

    /// `Some(Outcome)` if the game has ended or `None`.
    pub fn outcome(&self) -> Option<Outcome> {
        self.rules.outcome()
    }

    /// A read-only snapshot of the current piece placement.
    pub fn placement(&self) -> Placement {
        self.rules.placement()
    }

    /// The underlying rules engine handle.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Discards the game in progress and starts over a new one.
    pub fn reset(&mut self, rules: R) {
        *self = Board::new(rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::IllegalMove;
    use crate::rules::MockRules;
    use mockall::predicate::eq;
    use test_strategy::proptest;

    fn quiet() -> MockRules {
        let mut rules = MockRules::new();
        rules.expect_is_check().return_const(false);
        rules
    }

    #[proptest]
    fn tapping_a_piece_of_the_side_to_move_selects_it(
        c: Color,
        r: Role,
        s: Square,
        whithers: Vec<Square>,
    ) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(c, r));

        rules
            .expect_destinations()
            .with(eq(s))
            .times(1)
            .return_const(whithers.clone());

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.selection().square(), Some(s));
        assert_eq!(board.selection().destinations(), whithers);
    }

    #[proptest]
    fn tapping_an_empty_square_while_idle_changes_nothing(s: Square) {
        let mut rules = quiet();
        rules.expect_piece_on().with(eq(s)).return_const(None);

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Ignored);
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn tapping_a_piece_of_the_opponent_while_idle_changes_nothing(c: Color, r: Role, s: Square) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(!c, r));

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Ignored);
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn tapping_the_selected_square_deselects_it(c: Color, r: Role, s: Square) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(c, r));
        rules.expect_destinations().return_const(Vec::new());
        rules.expect_play().times(0);

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(s), Reaction::Deselected);
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn tapping_a_legal_destination_plays_the_move(
        c: Color,
        s: Square,
        #[filter(#s != #t && !matches!(#t.rank(), 0 | 7))] t: Square,
    ) {
        let m = Move::new(s, t, Promotion::None);

        let mut rules = quiet();
        rules.expect_turn().return_const(c);

        rules
            .expect_piece_on()
            .with(eq(s))
            .return_const(Piece(c, Role::Knight));

        rules
            .expect_destinations()
            .with(eq(s))
            .times(1)
            .return_const(vec![t]);

        rules
            .expect_play()
            .with(eq(m))
            .times(1)
            .return_const(Ok(()));

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(t), Reaction::Moved(m));
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn a_dragged_piece_moves_without_a_prior_selection(
        c: Color,
        s: Square,
        #[filter(#s != #t && !matches!(#t.rank(), 0 | 7))] t: Square,
    ) {
        let m = Move::new(s, t, Promotion::None);

        let mut rules = quiet();
        rules.expect_turn().return_const(c);

        rules
            .expect_piece_on()
            .with(eq(s))
            .return_const(Piece(c, Role::Bishop));

        rules
            .expect_play()
            .with(eq(m))
            .times(1)
            .return_const(Ok(()));

        let mut board = Board::new(rules);
        assert_eq!(board.attempt(s, t), Reaction::Moved(m));
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn a_pawn_tapped_onto_the_back_rank_promotes_to_a_queen(
        c: Color,
        s: Square,
        #[filter(#s != #t && matches!(#t.rank(), 0 | 7))] t: Square,
    ) {
        let m = Move::new(s, t, Promotion::Queen);

        let mut rules = quiet();
        rules.expect_turn().return_const(c);

        rules
            .expect_piece_on()
            .with(eq(s))
            .return_const(Piece(c, Role::Pawn));

        rules.expect_destinations().with(eq(s)).return_const(vec![t]);

        rules
            .expect_play()
            .with(eq(m))
            .times(1)
            .return_const(Ok(()));

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(t), Reaction::Moved(m));
    }

    #[proptest]
    fn a_move_rejected_by_the_rules_engine_only_clears_the_selection(
        c: Color,
        r: Role,
        s: Square,
        #[filter(#s != #t && !matches!(#t.rank(), 0 | 7))] t: Square,
    ) {
        let m = Move::new(s, t, Promotion::None);

        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(c, r));
        rules.expect_destinations().with(eq(s)).return_const(vec![t]);

        rules
            .expect_play()
            .with(eq(m))
            .times(1)
            .return_const(Err(IllegalMove(m, Position::default())));

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(t), Reaction::Deselected);
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn tapping_another_piece_of_the_side_to_move_reselects_it(
        c: Color,
        r: Role,
        s: Square,
        #[filter(#s != #t)] t: Square,
        whithers: Vec<Square>,
    ) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().return_const(Piece(c, r));
        rules.expect_play().times(0);

        rules
            .expect_destinations()
            .with(eq(s))
            .times(1)
            .return_const(Vec::new());

        rules
            .expect_destinations()
            .with(eq(t))
            .times(1)
            .return_const(whithers.clone());

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(t), Reaction::Selected(t));
        assert_eq!(board.selection().square(), Some(t));
        assert_eq!(board.selection().destinations(), whithers);
    }

    #[proptest]
    fn tapping_an_invalid_target_deselects(
        c: Color,
        r: Role,
        s: Square,
        #[filter(#s != #t)] t: Square,
    ) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(c, r));
        rules.expect_piece_on().with(eq(t)).return_const(None);
        rules.expect_destinations().with(eq(s)).return_const(Vec::new());
        rules.expect_play().times(0);

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));
        assert_eq!(board.tap(t), Reaction::Deselected);
        assert_eq!(board.selection(), &Selection::Idle);
    }

    #[proptest]
    fn the_check_indicator_points_at_the_king_of_the_side_to_move(c: Color, s: Square) {
        let placement = [(s, Piece(c, Role::King))]
            .into_iter()
            .collect::<Placement>();

        let mut rules = MockRules::new();
        rules.expect_is_check().return_const(true);
        rules.expect_turn().return_const(c);
        rules.expect_placement().return_const(placement);

        let board = Board::new(rules);
        assert_eq!(board.checked_king(), Some(s));
    }

    #[proptest]
    fn the_check_indicator_is_absent_when_not_in_check(c: Color) {
        let mut rules = MockRules::new();
        rules.expect_is_check().return_const(false);
        rules.expect_turn().return_const(c);
        rules.expect_placement().times(0);

        let board = Board::new(rules);
        assert_eq!(board.checked_king(), None);
    }

    #[proptest]
    fn reset_returns_the_board_to_idle(c: Color, r: Role, s: Square) {
        let mut rules = quiet();
        rules.expect_turn().return_const(c);
        rules.expect_piece_on().with(eq(s)).return_const(Piece(c, r));
        rules.expect_destinations().return_const(Vec::new());

        let mut board = Board::new(rules);
        assert_eq!(board.tap(s), Reaction::Selected(s));

        board.reset(quiet());
        assert_eq!(board.selection(), &Selection::Idle);
        assert_eq!(board.checked_king(), None);
    }
}
