#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements adversarial game-tree search for turn based games with one maximizing
//! agent and any number of adversaries. You provide a 'scoring' function that turns a game
//! state into an [score::Evaluation], and pick how adversaries should be modelled.
//!
//! The game itself is only seen through the small traits in [types], so anything that can list
//! legal moves, produce successor states and say whether it has been won or lost can be
//! searched.

pub mod score;
pub mod search;
pub mod types;

pub use search::{SearchAgent, SearchError};

use types::SimulableGame;

/// Anything that can be asked for a move every turn
pub trait Agent<GameType: SimulableGame> {
    /// A short name, used in traces and by registries
    fn name(&self) -> &str;

    /// The move to play in `state`
    ///
    /// Returns the game's null action when `state` is already over
    fn get_action(&self, state: &GameType) -> Result<GameType::Action, SearchError>;
}
