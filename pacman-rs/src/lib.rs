#[macro_use]
extern crate serde_derive;

use anyhow::bail;
use pacman_minimax::{
    search::{Decision, Strategy},
    Agent,
};

pub mod evaluation;
pub mod game_state;
pub mod layout;
pub mod options;
pub mod reflex_agent;
pub mod types;

pub use evaluation::EvaluationFunction;
pub use game_state::GameState;
pub use options::{AgentOptions, PacmanSearchAgent};
pub use reflex_agent::ReflexAgent;
pub use types::{Direction, Position};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MoveOutput {
    pub agent: String,
    pub r#move: String,
    pub score: Option<f64>,
    pub evaluations: Option<usize>,
    pub expanded_nodes: Option<usize>,
    pub cutoffs: Option<usize>,
}

impl MoveOutput {
    pub fn from_action(agent: &str, action: Direction) -> Self {
        Self {
            agent: agent.to_owned(),
            r#move: action.to_string(),
            score: None,
            evaluations: None,
            expanded_nodes: None,
            cutoffs: None,
        }
    }

    pub fn from_decision(agent: &str, decision: &Decision<Direction>) -> Self {
        Self {
            score: Some(decision.score.into_inner()),
            evaluations: Some(decision.stats.evaluations),
            expanded_nodes: Some(decision.stats.expanded_nodes),
            cutoffs: Some(decision.stats.cutoffs),
            ..Self::from_action(agent, decision.action)
        }
    }
}

pub type BoxedAgent = Box<dyn Agent<GameState> + Send + Sync>;
pub type BoxedFactory = Box<dyn AgentFactory + Send + Sync>;

pub trait AgentFactory {
    fn name(&self) -> String;

    /// The longer name the agent is known by on the command line of the classic game
    fn class_name(&self) -> &'static str;

    fn create(&self, options: &AgentOptions) -> BoxedAgent;

    /// The search strategy behind this agent, if it searches at all
    fn strategy(&self) -> Option<Strategy> {
        None
    }
}

pub struct ReflexAgentFactory;

impl AgentFactory for ReflexAgentFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn class_name(&self) -> &'static str {
        "ReflexAgent"
    }

    fn create(&self, _options: &AgentOptions) -> BoxedAgent {
        Box::new(ReflexAgent::new())
    }
}

pub struct SearchAgentFactory {
    strategy: Strategy,
}

impl AgentFactory for SearchAgentFactory {
    fn name(&self) -> String {
        self.strategy.name().to_owned()
    }

    fn class_name(&self) -> &'static str {
        match self.strategy {
            Strategy::Minimax => "MinimaxAgent",
            Strategy::AlphaBeta => "AlphaBetaAgent",
            Strategy::Expectimax => "ExpectimaxAgent",
        }
    }

    fn create(&self, options: &AgentOptions) -> BoxedAgent {
        Box::new(options.search_agent(self.strategy))
    }

    fn strategy(&self) -> Option<Strategy> {
        Some(self.strategy)
    }
}

pub fn all_factories() -> Vec<BoxedFactory> {
    let mut factories: Vec<BoxedFactory> = vec![Box::new(ReflexAgentFactory)];
    factories.extend(
        Strategy::ALL
            .into_iter()
            .map(|strategy| Box::new(SearchAgentFactory { strategy }) as BoxedFactory),
    );

    factories
}

/// Looks an agent up by either of its names
pub fn factory_for(name: &str) -> anyhow::Result<BoxedFactory> {
    match all_factories()
        .into_iter()
        .find(|f| f.name() == name || f.class_name() == name)
    {
        Some(factory) => Ok(factory),
        None => bail!(
            "unknown agent {:?}, expected one of: {}",
            name,
            all_factories().iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        ),
    }
}
