use std::fmt::{Debug, Display};

use text_trees::StringTreeNode;

use crate::{score::Evaluation, types::AgentIndex};

use super::NodeKind;

#[derive(Debug, Clone)]
/// This is returned from a search
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<Action> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// How this node combined its children
        kind: NodeKind,
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// How many full rounds were left to search below this node
        depth: usize,
        /// A 'recursive' look at all the moves under us
        ///
        /// Maximizing nodes are sorted best first, and when two moves tie the one enumerated
        /// last comes first. Minimizing nodes are sorted lowest first. Chance nodes keep the
        /// order the game enumerated them in
        options: Vec<(Action, Self)>,
        /// The backed-up score
        score: Evaluation,
        /// Whether alpha-beta stopped enumerating this node's moves early
        cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose)
    /// or when we run out of depth
    Leaf {
        #[allow(missing_docs)]
        score: Evaluation,
    },
}

impl<Action> MinMaxReturn<Action>
where
    Action: Copy + Debug + Display + PartialEq,
{
    /// Returns the score for this node
    pub fn score(&self) -> Evaluation {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score } => *score,
        }
    }

    /// Returns the move the agent at this node would pick
    ///
    /// For chance nodes there is no pick, the first enumerated move is returned. Leaves return
    /// `None`
    pub fn best_action(&self) -> Option<Action> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node { options, .. } => options.first().map(|(m, _)| *m),
        }
    }

    /// Return the first set of move options for the given agent, following the chosen line
    pub fn first_options_for_agent(&self, agent: AgentIndex) -> Option<&Vec<(Action, Self)>> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                agent: moving_agent,
                options,
                ..
            } => {
                if *moving_agent == agent {
                    Some(options)
                } else {
                    let chosen = options.first()?;
                    chosen.1.first_options_for_agent(agent)
                }
            }
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search took
    /// This is useful for debugging as it shows each of the moves we and our opponents made during
    /// the search
    pub fn chosen_route(&self) -> Vec<(AgentIndex, Action)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node { agent, options, .. } => {
                if let Some(chosen) = options.first() {
                    let mut tail = chosen.1.chosen_route();
                    tail.insert(0, (*agent, chosen.0));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// Number of leaves reachable from this node, ie how many states were scored below it
    pub fn leaf_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => options.iter().map(|(_, r)| r.leaf_count()).sum(),
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the chosen score, the moving agent and the move at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score } => StringTreeNode::new(format!("{label} {score}")),
            MinMaxReturn::Node {
                agent,
                kind,
                options,
                score,
                cutoff,
                ..
            } => {
                let cutoff = if *cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!("{label} {score} {kind:?}{cutoff}"));
                for (m, result) in options {
                    node.push_node(result.to_text_tree_node(format!("{m} by agent {agent}")));
                }

                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use decorum::N64;

    use super::*;

    fn leaf(score: f64) -> MinMaxReturn<char> {
        MinMaxReturn::Leaf {
            score: N64::from(score),
        }
    }

    fn sample() -> MinMaxReturn<char> {
        MinMaxReturn::Node {
            kind: NodeKind::Maximize,
            agent: 0,
            depth: 1,
            score: N64::from(5.0),
            cutoff: false,
            options: vec![
                (
                    'b',
                    MinMaxReturn::Node {
                        kind: NodeKind::Minimize,
                        agent: 1,
                        depth: 1,
                        score: N64::from(5.0),
                        cutoff: false,
                        options: vec![('x', leaf(5.0)), ('y', leaf(5.0))],
                    },
                ),
                (
                    'a',
                    MinMaxReturn::Node {
                        kind: NodeKind::Minimize,
                        agent: 1,
                        depth: 1,
                        score: N64::from(2.0),
                        cutoff: true,
                        options: vec![('y', leaf(2.0))],
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_best_action_and_route() {
        let result = sample();

        assert_eq!(result.best_action(), Some('b'));
        assert_eq!(result.score(), 5.0);
        assert_eq!(result.chosen_route(), vec![(0, 'b'), (1, 'x')]);
        assert_eq!(leaf(1.0).best_action(), None);
        assert!(leaf(1.0).chosen_route().is_empty());
    }

    #[test]
    fn test_first_options_for_agent() {
        let result = sample();

        let root_options = result.first_options_for_agent(0).unwrap();
        assert_eq!(root_options.len(), 2);

        let adversary_options = result.first_options_for_agent(1).unwrap();
        assert_eq!(
            adversary_options.iter().map(|(m, _)| *m).collect::<Vec<_>>(),
            vec!['x', 'y']
        );

        assert!(result.first_options_for_agent(2).is_none());
    }

    #[test]
    fn test_leaf_count() {
        assert_eq!(sample().leaf_count(), 3);
        assert_eq!(leaf(0.0).leaf_count(), 1);
    }

    #[test]
    fn test_text_tree_mentions_every_move() {
        let tree = sample().to_text_tree();

        assert!(tree.starts_with("root"));
        assert!(tree.contains("Maximize"));
        assert!(tree.contains("b by agent 0"));
        assert!(tree.contains("y by agent 1"));
        assert!(tree.contains("(cutoff)"));
    }
}
