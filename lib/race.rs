use crate::chess::{Color, Outcome};
use derive_more::Display;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The phase of a puzzle race.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    #[display(fmt = "waiting")]
    Waiting,
    #[display(fmt = "playing")]
    Playing,
    #[display(fmt = "finished")]
    Finished,
}

/// The result of a race from the local player's perspective.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Verdict {
    #[display(fmt = "you won")]
    Won,
    #[display(fmt = "you lost")]
    Lost,
    #[display(fmt = "draw")]
    Drawn,
}

/// The lifecycle of one puzzle race.
///
/// A race waits for the match maker, then routes taps to the board until the
/// rules engine declares the game over, counting committed moves along the
/// way. It consumes the controller's turn-completed signal and only reads
/// derived outputs, never board state.
#[derive(Debug, Clone)]
pub struct Race {
    side: Color,
    objective: String,
    phase: Phase,
    moves: u32,
    clock: Option<Instant>,
    elapsed: Duration,
    verdict: Option<Verdict>,
}

impl Race {
    /// A race about to begin, played from this side.
    pub fn new(side: Color, objective: impl Into<String>) -> Self {
        Race {
            side,
            objective: objective.into(),
            phase: Phase::Waiting,
            moves: 0,
            clock: None,
            elapsed: Duration::ZERO,
            verdict: None,
        }
    }

    /// The side the local player races for.
    pub fn side(&self) -> Color {
        self.side
    }

    /// The puzzle objective shown to the player.
    pub fn objective(&self) -> &str {
        &self.objective
    }

    /// The current [`Phase`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The number of committed moves so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// How long this race has been running.
    pub fn elapsed(&self) -> Duration {
        match self.clock {
            Some(clock) => clock.elapsed(),
            None => self.elapsed,
        }
    }

    /// The [`Verdict`], once the race has finished.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Whether taps should still be routed to the board.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Starts the clock once the match maker gives the go-ahead.
    pub fn start(&mut self) {
        if self.phase == Phase::Waiting {
            self.clock = Some(Instant::now());
            self.phase = Phase::Playing;
            info!(side = %self.side, objective = %self.objective, "the race is on");
        } else {
            debug!(phase = %self.phase, "spurious start");
        }
    }

    /// Accounts for a committed move and finishes the race if the game ended.
    pub fn turn_completed(&mut self, outcome: Option<Outcome>) {
        if self.phase != Phase::Playing {
            debug!(phase = %self.phase, "spurious turn");
            return;
        }

        self.moves += 1;

        if let Some(o) = outcome {
            self.elapsed = self.clock.take().map_or(Duration::ZERO, |c| c.elapsed());
            self.phase = Phase::Finished;

            self.verdict = Some(match o.winner() {
                Some(c) if c == self.side => Verdict::Won,
                Some(_) => Verdict::Lost,
                None => Verdict::Drawn,
            });

            info!(moves = self.moves, outcome = %o, "the race is over");
        }
    }
}
