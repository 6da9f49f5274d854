//! A game that is nothing but an explicit tree, so search results can be pinned by hand

use std::rc::Rc;

use decorum::N64;

use crate::{
    score::Evaluation,
    types::{
        AgentCountGame, AgentIndex, GameError, SimulableGame, VictorDeterminableGame,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Ongoing,
    Win,
    Lose,
}

#[derive(Debug)]
pub(crate) struct Tree {
    value: f64,
    outcome: Outcome,
    children: Vec<Rc<Tree>>,
}

/// A non-terminal leaf, only ever reached at the depth cutoff
pub(crate) fn leaf(value: f64) -> Rc<Tree> {
    branch(value, vec![])
}

pub(crate) fn win(value: f64) -> Rc<Tree> {
    Rc::new(Tree {
        value,
        outcome: Outcome::Win,
        children: vec![],
    })
}

pub(crate) fn lose(value: f64) -> Rc<Tree> {
    Rc::new(Tree {
        value,
        outcome: Outcome::Lose,
        children: vec![],
    })
}

/// An internal node. `value` is what the evaluator sees if the search stops here
pub(crate) fn branch(value: f64, children: Vec<Rc<Tree>>) -> Rc<Tree> {
    Rc::new(Tree {
        value,
        outcome: Outcome::Ongoing,
        children,
    })
}

/// An internal node that is never scored itself
pub(crate) fn node(children: Vec<Rc<Tree>>) -> Rc<Tree> {
    branch(0.0, children)
}

pub(crate) fn leaves(values: &[f64]) -> Vec<Rc<Tree>> {
    values.iter().map(|v| leaf(*v)).collect()
}

#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    node: Rc<Tree>,
    num_agents: usize,
}

impl TreeGame {
    pub(crate) fn new(node: Rc<Tree>, num_agents: usize) -> Self {
        Self { node, num_agents }
    }
}

pub(crate) fn tree_value(game: &TreeGame) -> Evaluation {
    N64::from(game.node.value)
}

impl AgentCountGame for TreeGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl VictorDeterminableGame for TreeGame {
    fn is_win(&self) -> bool {
        self.node.outcome == Outcome::Win
    }

    fn is_lose(&self) -> bool {
        self.node.outcome == Outcome::Lose
    }
}

impl SimulableGame for TreeGame {
    type Action = usize;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<usize> {
        if agent >= self.num_agents || self.is_over() {
            return vec![];
        }

        (0..self.node.children.len()).collect()
    }

    fn successor(&self, agent: AgentIndex, action: usize) -> Result<Self, GameError> {
        if agent >= self.num_agents {
            return Err(GameError::NoSuchAgent {
                agent,
                num_agents: self.num_agents,
            });
        }
        if self.is_over() {
            return Err(GameError::TerminalState { agent });
        }

        let child = self
            .node
            .children
            .get(action)
            .ok_or_else(|| GameError::IllegalAction {
                agent,
                action: action.to_string(),
            })?;

        Ok(Self {
            node: child.clone(),
            num_agents: self.num_agents,
        })
    }

    fn null_action() -> usize {
        usize::MAX
    }
}
