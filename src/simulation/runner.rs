//! Headless generation loop

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::core::types::{Generation, Mode};
use crate::rules::snake::SnakeAction;
use crate::simulation::engine::Automaton;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The last generation changed nothing
    Stalled,
    /// The snake ran into the border or itself
    SnakeCrashed,
    /// No empty cell was left for the snake's next food item
    BoardSaturated,
    /// The generation limit was reached
    GenerationsExhausted,
}

impl EndReason {
    pub fn headline(self) -> &'static str {
        match self {
            EndReason::Stalled => "Evolution stopped!",
            EndReason::SnakeCrashed => "Game over!",
            EndReason::BoardSaturated | EndReason::GenerationsExhausted => "Game finished.",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            EndReason::Stalled => "All future generations will be identical to this one.",
            EndReason::SnakeCrashed => "Your snake hit an obstacle.",
            EndReason::BoardSaturated => "Your snake fills the board.",
            EndReason::GenerationsExhausted => "Iterations finished.",
        }
    }

    /// Classify a stalled automaton
    pub fn of_stall(automaton: &Automaton) -> Self {
        if automaton.mode() != Mode::Snake {
            return EndReason::Stalled;
        }
        if automaton.snake_state().action == SnakeAction::MoveAndDie {
            EndReason::SnakeCrashed
        } else {
            EndReason::BoardSaturated
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: Mode,
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub generations: Generation,
    pub end_reason: EndReason,
    pub headline: String,
    pub detail: String,
    /// Non-empty cells at the end of the run
    pub population: usize,
    pub snake_length: Option<i32>,
    pub elapsed_ms: u64,
}

impl RunSummary {
    fn new(
        automaton: &Automaton,
        generations: Generation,
        end_reason: EndReason,
        elapsed: Duration,
    ) -> Self {
        Self {
            mode: automaton.mode(),
            width: automaton.width(),
            height: automaton.height(),
            seed: automaton.seed(),
            generations,
            end_reason,
            headline: end_reason.headline().to_string(),
            detail: end_reason.detail().to_string(),
            population: automaton.population(),
            snake_length: (automaton.mode() == Mode::Snake).then(|| automaton.snake_state().length),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {}\n{} on {}x{}: {} generations in {}ms, {} live cells",
            self.headline,
            self.detail,
            self.mode,
            self.width,
            self.height,
            self.generations,
            self.elapsed_ms,
            self.population
        )
    }
}

/// Advance until the automaton stalls or `limit` generations have run.
/// With no limit, a board that never stalls runs forever.
pub fn run(automaton: &mut Automaton, limit: Option<Generation>) -> RunSummary {
    run_with(automaton, limit, |_, _| {})
}

/// Like [`run`], calling `before_step` with the number of generations run
/// so far ahead of each generation
pub fn run_with<F>(
    automaton: &mut Automaton,
    limit: Option<Generation>,
    mut before_step: F,
) -> RunSummary
where
    F: FnMut(&mut Automaton, Generation),
{
    let start = Instant::now();
    let mut ran: Generation = 0;

    let end_reason = loop {
        if limit.is_some_and(|l| ran >= l) {
            break EndReason::GenerationsExhausted;
        }
        before_step(automaton, ran);
        automaton.advance_generation();
        ran += 1;

        if automaton.is_stalled() {
            break EndReason::of_stall(automaton);
        }
    };

    tracing::info!(
        "{} run ended after {} generations: {:?}",
        automaton.mode(),
        ran,
        end_reason
    );
    RunSummary::new(automaton, ran, end_reason, start.elapsed())
}
