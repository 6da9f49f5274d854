use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::types::{AgentIndex, MAXIMIZING_AGENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which search discipline to run. All three share the same turn order, they only differ in
/// how adversary nodes combine their children and whether bounds are used to prune.
pub enum Strategy {
    /// Adversaries minimize, every node is visited
    Minimax,
    /// Adversaries minimize, subtrees that cannot change the result are skipped
    AlphaBeta,
    /// Adversaries choose uniformly at random, so their nodes take the mean of their children
    Expectimax,
}

/// How a node combines the values of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Take the highest child
    Maximize,
    /// Take the lowest child
    Minimize,
    /// Take the mean of all children
    Average,
}

impl Strategy {
    /// Every strategy, in a stable order
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    /// The canonical name, as accepted by [Strategy::from_str]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        }
    }

    /// The kind of node `agent` plays in this strategy
    pub fn node_kind(&self, agent: AgentIndex) -> NodeKind {
        if agent == MAXIMIZING_AGENT {
            return NodeKind::Maximize;
        }

        match self {
            Strategy::Minimax | Strategy::AlphaBeta => NodeKind::Minimize,
            Strategy::Expectimax => NodeKind::Average,
        }
    }

    /// Whether alpha-beta cutoffs are applied
    pub fn prunes(&self) -> bool {
        matches!(self, Strategy::AlphaBeta)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a strategy name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown search strategy `{0}`, expected one of minimax, alphabeta or expectimax")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Settings that are fixed when an agent is built
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::search::{SearchOptions, Strategy};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// assert_eq!(defaults.strategy, Strategy::Minimax);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead. A round is one move by every agent
    pub depth: usize,
    /// Which search discipline to run
    pub strategy: Strategy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            strategy: Strategy::Minimax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kinds() {
        assert_eq!(Strategy::Minimax.node_kind(0), NodeKind::Maximize);
        assert_eq!(Strategy::Minimax.node_kind(3), NodeKind::Minimize);
        assert_eq!(Strategy::AlphaBeta.node_kind(0), NodeKind::Maximize);
        assert_eq!(Strategy::AlphaBeta.node_kind(1), NodeKind::Minimize);
        assert_eq!(Strategy::Expectimax.node_kind(0), NodeKind::Maximize);
        assert_eq!(Strategy::Expectimax.node_kind(2), NodeKind::Average);
    }

    #[test]
    fn test_only_alpha_beta_prunes() {
        assert!(!Strategy::Minimax.prunes());
        assert!(Strategy::AlphaBeta.prunes());
        assert!(!Strategy::Expectimax.prunes());
    }

    #[test]
    fn test_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }

        assert_eq!("Alpha-Beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!(
            "greedy".parse::<Strategy>(),
            Err(UnknownStrategy("greedy".to_owned()))
        );
    }
}
