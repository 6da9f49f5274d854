//! The narrow boundary between the search and whatever game it is searching.
//!
//! The search never looks inside a game state. Everything it needs is expressed as one of the
//! small capability traits in this module, in the same way the concrete game exposes its
//! positions and food through its own accessor traits.

use std::fmt::{Debug, Display};

use thiserror::Error;

/// Identifies whose turn it is. Index 0 is always the maximizing agent, every other index is an
/// adversary.
pub type AgentIndex = usize;

/// The agent the search is choosing a move for
pub const MAXIMIZING_AGENT: AgentIndex = 0;

/// Errors a game reports when it is asked for something its rules do not allow
///
/// These are programming errors in the caller. The search only ever asks for successors of
/// non-terminal states using actions it just enumerated, so seeing one of these come out of a
/// search means the game broke its own contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A successor was requested for a state that is already won or lost
    #[error("agent {agent} cannot move, the game is already over")]
    TerminalState {
        /// The agent that was asked to move
        agent: AgentIndex,
    },
    /// The action is not in the legal action set of the agent
    #[error("{action} is not a legal action for agent {agent}")]
    IllegalAction {
        /// The agent that was asked to move
        agent: AgentIndex,
        /// The rejected action, rendered with its `Display` impl
        action: String,
    },
    /// The agent index is out of range for this game
    #[error("agent {agent} does not exist, this game has {num_agents} agents")]
    NoSuchAgent {
        /// The requested agent
        agent: AgentIndex,
        /// How many agents the game actually has
        num_agents: usize,
    },
}

/// A game that knows how many agents take turns in it
pub trait AgentCountGame {
    /// Total number of agents, including the maximizing agent. Always at least 1
    fn num_agents(&self) -> usize;
}

/// A game that can tell if it has been won or lost from the point of view of agent 0
pub trait VictorDeterminableGame {
    /// The maximizing agent has won
    fn is_win(&self) -> bool;

    /// The maximizing agent has lost
    fn is_lose(&self) -> bool;

    /// Either won or lost. No successors exist for a state where this is true
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game that can enumerate moves and produce successor states
///
/// Successor generation never mutates `self`, every call hands back a fresh state.
pub trait SimulableGame: AgentCountGame + VictorDeterminableGame + Sized {
    /// An opaque move identifier
    type Action: Copy + Debug + Display + PartialEq;

    /// The legal actions for `agent`, in a deterministic order. Only empty for terminal states
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state after `agent` plays `action`
    fn successor(&self, agent: AgentIndex, action: Self::Action) -> Result<Self, GameError>;

    /// The designated no-op, used when there is nothing to choose between
    fn null_action() -> Self::Action;
}
