use std::str::FromStr;

use anyhow::{bail, Context};
use pacman_minimax::search::{SearchAgent, SearchOptions, Strategy};

use crate::{evaluation::EvaluationFunction, game_state::GameState};

pub type PacmanSearchAgent = SearchAgent<GameState, EvaluationFunction>;

/// Settings shared by every agent in the registry, parsed from strings like
/// `depth=3,evalFn=better`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentOptions {
    pub depth: usize,
    pub evaluation: EvaluationFunction,
}

impl Default for AgentOptions {
    fn default() -> Self {
        let SearchOptions { depth, .. } = SearchOptions::default();

        Self {
            depth,
            evaluation: EvaluationFunction::default(),
        }
    }
}

impl AgentOptions {
    pub fn search_options(&self, strategy: Strategy) -> SearchOptions {
        SearchOptions {
            depth: self.depth,
            strategy,
        }
    }

    pub fn search_agent(&self, strategy: Strategy) -> PacmanSearchAgent {
        SearchAgent::new(
            self.evaluation,
            strategy.name(),
            self.search_options(strategy),
        )
    }
}

impl FromStr for AgentOptions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = AgentOptions::default();

        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("expected key=value but got {pair:?}"))?;

            match key.trim() {
                "depth" => {
                    options.depth = value
                        .trim()
                        .parse()
                        .with_context(|| format!("depth must be a whole number, got {value:?}"))?
                }
                "evalFn" | "eval_fn" => options.evaluation = value.trim().parse()?,
                other => bail!("unknown agent option {other:?}"),
            }
        }

        Ok(options)
    }
}
