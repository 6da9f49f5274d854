use itertools::Itertools;
use parking_lot::Mutex;
use pacman_minimax::{
    types::{SimulableGame, VictorDeterminableGame, MAXIMIZING_AGENT},
    Agent, SearchError,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{evaluation::reflex_evaluation, game_state::GameState, types::Direction};

/// Looks a single move ahead with [reflex_evaluation] and plays one of the best scoring moves,
/// picked at random when several tie.
#[derive(Debug)]
pub struct ReflexAgent {
    rng: Mutex<StdRng>,
}

impl ReflexAgent {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Ties are broken the same way every run for the same seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for ReflexAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent<GameState> for ReflexAgent {
    fn name(&self) -> &str {
        "reflex"
    }

    fn get_action(&self, state: &GameState) -> Result<Direction, SearchError> {
        if state.is_over() {
            return Ok(GameState::null_action());
        }

        let scored = state
            .legal_actions(MAXIMIZING_AGENT)
            .into_iter()
            .map(|action| Ok((action, reflex_evaluation(state, action)?)))
            .collect::<Result<Vec<_>, SearchError>>()?;
        debug!(
            options = %scored.iter().map(|(a, s)| format!("{a}={s}")).join(" "),
            "reflex options"
        );

        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .max()
            .ok_or(SearchError::NoLegalActions {
                agent: MAXIMIZING_AGENT,
            })?;
        let best_actions: Vec<Direction> = scored
            .into_iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| action)
            .collect();

        best_actions
            .choose(&mut *self.rng.lock())
            .copied()
            .ok_or(SearchError::NoLegalActions {
                agent: MAXIMIZING_AGENT,
            })
    }
}
