//! The three search disciplines, Minimax, Alpha-Beta and Expectimax, share one traversal.
//!
//! Agent 0 is always the maximizing agent. After it moves, every adversary moves once in index
//! order, and only when the turn comes back around to agent 0 is a round of depth used up.
//! Adversaries either minimize (Minimax and Alpha-Beta, the 'paranoid' assumption that everyone
//! else is working together against you) or average over their moves (Expectimax, where
//! adversaries are modelled as picking uniformly at random).
//!
//! The [Strategy] decides which [NodeKind] each agent plays, and the traversal itself only
//! looks at the node kind, so the maximizing logic can't drift between disciplines.
//!
//! The searched tree is returned as a [MinMaxReturn], so callers can look at more than just the
//! chosen move: the backed-up score of every root option, the principal variation, or the whole
//! tree as text.

mod score;
pub use score::{Scorable, WrappedScorable};

mod strategy;
pub use strategy::{NodeKind, SearchOptions, Strategy, UnknownStrategy};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod eval;
pub use eval::{Decision, SearchAgent, SearchError, SearchOutcome, SearchStats};

#[cfg(test)]
mod test_tree;
