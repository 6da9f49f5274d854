use std::marker::PhantomData;

use derivative::Derivative;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::{
    score::{mean, Bound, Evaluation},
    types::{AgentIndex, GameError, SimulableGame, VictorDeterminableGame, MAXIMIZING_AGENT},
    Agent,
};

use super::{MinMaxReturn, NodeKind, Scorable, SearchOptions, Strategy, WrappedScorable};

/// Everything that can stop a search from producing a move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The game rejected a successor request
    #[error(transparent)]
    Game(#[from] GameError),
    /// An agent had nothing to do in a state that is not over. The game broke its contract, and
    /// there is nothing sensible to take the min, max or mean of
    #[error("agent {agent} has no legal actions but the game is not over")]
    NoLegalActions {
        /// The agent that could not move
        agent: AgentIndex,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters collected while a single search runs
pub struct SearchStats {
    /// How many times the evaluation function was called
    pub evaluations: usize,
    /// How many nodes had their moves enumerated
    pub expanded_nodes: usize,
    /// How many nodes stopped enumerating early because of an alpha-beta cutoff
    pub cutoffs: usize,
}

#[derive(Debug, Clone)]
/// The full result of a search from one root state
pub struct SearchOutcome<Action> {
    /// The searched tree
    pub result: MinMaxReturn<Action>,
    /// What it took to get there
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The move picked at the root, and why
pub struct Decision<Action> {
    /// The chosen move. The game's null action if the root was already over
    pub action: Action,
    /// The backed-up value of the chosen move
    pub score: Evaluation,
    /// What it took to get there
    pub stats: SearchStats,
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and the search settings, and can be asked
/// for a move in any state of a game
///
/// The settings are fixed at construction and nothing is kept between searches, so one agent
/// can be reused for every turn of a game.
///
/// It also outputs traces using the [tracing] crate.
pub struct SearchAgent<GameType, ScorableType>
where
    ScorableType: Scorable<GameType>,
{
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Shows up in traces
    pub name: &'static str,
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

impl<GameType, ScorableType> WrappedScorable<GameType> for SearchAgent<GameType, ScorableType>
where
    GameType: VictorDeterminableGame,
    ScorableType: Scorable<GameType>,
{
    fn score(&self, node: &GameType) -> Evaluation {
        self.score_function.score(node)
    }
}

/// Who moves after `agent`, and how many full rounds are left once they do
///
/// The depth only goes down when the turn wraps around from the last adversary back to the
/// maximizing agent. With a single agent that happens on every move.
fn next_turn(agent: AgentIndex, depth: usize, num_agents: usize) -> (AgentIndex, usize) {
    let next = agent + 1;

    if next >= num_agents {
        (MAXIMIZING_AGENT, depth.saturating_sub(1))
    } else {
        (next, depth)
    }
}

impl<GameType, ScorableType> SearchAgent<GameType, ScorableType>
where
    GameType: SimulableGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `SearchAgent`
    pub fn new(score_function: ScorableType, name: &'static str, options: SearchOptions) -> Self {
        Self {
            score_function,
            name,
            options,
            _phantom: PhantomData,
        }
    }

    /// A plain minimax agent searching `depth` full rounds
    ///
    /// ```rust
    /// use pacman_minimax::search::{SearchAgent, Strategy};
    /// # use pacman_minimax::{score::Evaluation, types::*};
    /// # #[derive(Debug, Clone)]
    /// # struct Game;
    /// # impl AgentCountGame for Game { fn num_agents(&self) -> usize { 1 } }
    /// # impl VictorDeterminableGame for Game {
    /// #     fn is_win(&self) -> bool { false }
    /// #     fn is_lose(&self) -> bool { false }
    /// # }
    /// # impl SimulableGame for Game {
    /// #     type Action = char;
    /// #     fn legal_actions(&self, _: AgentIndex) -> Vec<char> { vec!['a'] }
    /// #     fn successor(&self, _: AgentIndex, _: char) -> Result<Self, GameError> { Ok(Game) }
    /// #     fn null_action() -> char { '-' }
    /// # }
    ///
    /// // Any function from a state to an evaluation can be used to score the leaves
    /// fn score_function(_game: &Game) -> Evaluation { 4.0.into() }
    ///
    /// let agent = SearchAgent::<Game, _>::minimax(score_function, 2);
    ///
    /// assert_eq!(agent.options().strategy, Strategy::Minimax);
    /// assert_eq!(agent.choose_action(&Game).unwrap().action, 'a');
    /// ```
    pub fn minimax(score_function: ScorableType, depth: usize) -> Self {
        Self::new(
            score_function,
            "minimax",
            SearchOptions {
                depth,
                strategy: Strategy::Minimax,
            },
        )
    }

    /// A minimax agent that prunes with alpha-beta bounds
    pub fn alpha_beta(score_function: ScorableType, depth: usize) -> Self {
        Self::new(
            score_function,
            "alphabeta",
            SearchOptions {
                depth,
                strategy: Strategy::AlphaBeta,
            },
        )
    }

    /// An agent that treats every adversary as a uniformly random chooser
    pub fn expectimax(score_function: ScorableType, depth: usize) -> Self {
        Self::new(
            score_function,
            "expectimax",
            SearchOptions {
                depth,
                strategy: Strategy::Expectimax,
            },
        )
    }

    /// The settings this agent was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    fn minimax_node(
        &self,
        node: &GameType,
        agent: AgentIndex,
        depth: usize,
        alpha: Bound,
        beta: Bound,
        stats: &mut SearchStats,
    ) -> Result<MinMaxReturn<GameType::Action>, SearchError> {
        if let Some(score) = self.wrapped_score(node, depth) {
            stats.evaluations += 1;
            return Ok(MinMaxReturn::Leaf { score });
        }

        self.expand(node, agent, depth, alpha, beta, stats)
    }

    /// Enumerate every move `agent` has, search each successor and combine the results the way
    /// this agent's strategy says `agent` combines them
    fn expand(
        &self,
        node: &GameType,
        agent: AgentIndex,
        depth: usize,
        alpha: Bound,
        beta: Bound,
        stats: &mut SearchStats,
    ) -> Result<MinMaxReturn<GameType::Action>, SearchError> {
        let mut alpha = alpha;
        let mut beta = beta;

        let possible_moves = node.legal_actions(agent);
        let move_count = possible_moves.len();
        if possible_moves.is_empty() {
            return Err(SearchError::NoLegalActions { agent });
        }
        stats.expanded_nodes += 1;

        let kind = self.options.strategy.node_kind(agent);
        let prunes = self.options.strategy.prunes();
        let (next_agent, next_depth) = next_turn(agent, depth, node.num_agents());

        let mut options: Vec<(GameType::Action, MinMaxReturn<GameType::Action>)> =
            Vec::with_capacity(possible_moves.len());
        let mut alpha_beta_cutoff = false;

        for dir in possible_moves {
            let child = node.successor(agent, dir)?;
            let next_move_return =
                self.minimax_node(&child, next_agent, next_depth, alpha, beta, stats)?;
            let value = Bound::Scored(next_move_return.score());
            options.push((dir, next_move_return));

            if !prunes {
                continue;
            }

            match kind {
                NodeKind::Maximize => {
                    if value > beta {
                        alpha_beta_cutoff = true;
                        break;
                    }

                    alpha = std::cmp::max(alpha, value);
                }
                NodeKind::Minimize => {
                    if value < alpha {
                        alpha_beta_cutoff = true;
                        break;
                    }

                    beta = std::cmp::min(beta, value);
                }
                NodeKind::Average => {}
            }
        }

        // Breaking on the very last move does not skip anything
        let alpha_beta_cutoff = alpha_beta_cutoff && options.len() < move_count;
        if alpha_beta_cutoff {
            stats.cutoffs += 1;
        }

        // The sort is stable, so after reversing a maximizing node the last of several equally
        // good moves is the one that ends up first
        let chosen_score = match kind {
            NodeKind::Maximize => {
                options.sort_by_cached_key(|(_, value)| value.score());
                options.reverse();
                options.first().map(|(_, r)| r.score())
            }
            NodeKind::Minimize => {
                options.sort_by_cached_key(|(_, value)| value.score());
                options.first().map(|(_, r)| r.score())
            }
            NodeKind::Average => mean(options.iter().map(|(_, r)| r.score())),
        }
        .ok_or(SearchError::NoLegalActions { agent })?;

        Ok(MinMaxReturn::Node {
            kind,
            agent,
            depth,
            options,
            score: chosen_score,
            cutoff: alpha_beta_cutoff,
        })
    }

    /// This runs the search from `state` to the configured depth, returning a struct that
    /// contains all the information about the 'tree' we searched.
    ///
    /// The root always belongs to the maximizing agent. It is expanded even when the configured
    /// depth is 0, so there is always a move to pick unless the root is already over, in which
    /// case the result is a single leaf holding the evaluation of the root.
    pub fn search(
        &self,
        state: &GameType,
    ) -> Result<SearchOutcome<GameType::Action>, SearchError> {
        let mut stats = SearchStats::default();

        let result = if state.is_over() {
            stats.evaluations += 1;
            MinMaxReturn::Leaf {
                score: self.score(state),
            }
        } else {
            self.expand(
                state,
                MAXIMIZING_AGENT,
                self.options.depth,
                Bound::worst_possible_score(),
                Bound::best_possible_score(),
                &mut stats,
            )?
        };

        Ok(SearchOutcome { result, stats })
    }

    /// Pick the next move to make
    ///
    /// This uses [SearchAgent::search()] and reads the chosen move off the root. If the root is
    /// already over there is nothing to choose and the game's null action is returned with the
    /// evaluation of the root.
    pub fn choose_action(
        &self,
        state: &GameType,
    ) -> Result<Decision<GameType::Action>, SearchError> {
        Ok(self.choose_action_with_tree(state)?.0)
    }

    /// Same as [SearchAgent::choose_action()] but also hands back the searched tree, for callers
    /// that want to show why the move was picked
    pub fn choose_action_with_tree(
        &self,
        state: &GameType,
    ) -> Result<(Decision<GameType::Action>, SearchOutcome<GameType::Action>), SearchError> {
        info_span!(
            "search",
            agent_name = self.name,
            strategy = %self.options.strategy,
            depth = self.options.depth,
            chosen_action = tracing::field::Empty,
            chosen_score = tracing::field::Empty,
            evaluations = tracing::field::Empty,
            cutoffs = tracing::field::Empty,
        )
        .in_scope(|| {
            let outcome = self.search(state)?;
            let SearchOutcome { result, stats } = &outcome;

            if let MinMaxReturn::Node { options, .. } = result {
                debug!(
                    options = %options
                        .iter()
                        .map(|(m, r)| format!("{m}={}", r.score()))
                        .join(", "),
                    "scored root options"
                );
            }

            let action = result
                .best_action()
                .unwrap_or_else(GameType::null_action);
            let score = result.score();

            let current_span = tracing::Span::current();
            current_span.record("chosen_action", action.to_string().as_str());
            current_span.record("chosen_score", score.to_string().as_str());
            current_span.record("evaluations", stats.evaluations);
            current_span.record("cutoffs", stats.cutoffs);

            info!(%action, %score, "finished search");

            let decision = Decision {
                action,
                score,
                stats: *stats,
            };

            Ok((decision, outcome))
        })
    }
}

impl<GameType, ScorableType> Agent<GameType> for SearchAgent<GameType, ScorableType>
where
    GameType: SimulableGame,
    ScorableType: Scorable<GameType>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn get_action(&self, state: &GameType) -> Result<GameType::Action, SearchError> {
        Ok(self.choose_action(state)?.action)
    }
}
