use crate::{score::Evaluation, types::VictorDeterminableGame};

/// This trait is used to control something that can return a score from a game state
///
/// Evaluation functions are plain functions, so the blanket impl below covers them. Anything
/// with a little more structure, like a registry entry that picks between several functions,
/// can implement it directly.
pub trait Scorable<GameType> {
    /// Convert the given game state into an evaluation
    fn score(&self, game: &GameType) -> Evaluation;
}

impl<GameType, FnLike: Fn(&GameType) -> Evaluation> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> Evaluation {
        (self)(game)
    }
}

/// Provides an implementation for `wrapped_score` if the implementer implements the `score`
/// function.
///
/// `wrapped_score` decides if a node is a leaf of the search tree, so that the underlying
/// scoring functions don't need to know anything about depth
pub trait WrappedScorable<GameType>
where
    GameType: VictorDeterminableGame,
{
    /// The scoring function used for every leaf, terminal or not
    fn score(&self, node: &GameType) -> Evaluation;

    /// A node is a leaf when the game is over or there are no full rounds left to search. Leaves
    /// are scored with `score`, every other node returns `None` and has to be expanded
    fn wrapped_score(&self, node: &GameType, remaining_depth: usize) -> Option<Evaluation> {
        if node.is_over() || remaining_depth == 0 {
            return Some(self.score(node));
        }

        None
    }
}
