//! Evaluation functions for pacman's side of the board.
//!
//! All of them are generic over the accessor traits rather than
//! [GameState](crate::game_state::GameState) so they can be pointed at any board that knows about
//! pacman, ghosts, food and capsules.

use std::{fmt, str::FromStr};

use anyhow::bail;
use decorum::N64;
use pacman_minimax::{
    score::Evaluation,
    search::Scorable,
    types::{GameError, SimulableGame, VictorDeterminableGame, MAXIMIZING_AGENT},
};

use crate::types::{
    CapsuleGettableGame, Direction, FoodGettableGame, GhostGettableGame,
    PacmanPositionGettableGame, Position, ScoreGettableGame,
};

/// Returned for won states. Finite and well inside the search bounds so averaging keeps it
/// distinguishable from ordinary scores.
pub const WIN_SCORE: f64 = 1e9 - 10.0;
pub const LOSE_SCORE: f64 = -WIN_SCORE;

const GHOST_PROXIMITY_WEIGHT: f64 = 50.0;
const GHOST_DISTANCE_FLOOR: i32 = 1;
const FOOD_EATEN_BONUS: f64 = 100.0;
const REFLEX_FOOD_DISTANCE_WEIGHT: f64 = 5.0;
const FOOD_DISTANCE_WEIGHT: f64 = 2.0;
const CAPSULE_BONUS: f64 = 300.0;
const CAPSULE_REMAINING_PENALTY: f64 = 10.0;
const STOP_PENALTY: f64 = 10.0;

/// Penalty for every ghost that can still hurt pacman, growing as it gets closer.
fn ghost_penalty<BoardType>(node: &BoardType, pacman: &Position) -> f64
where
    BoardType: GhostGettableGame,
{
    node.get_ghost_positions()
        .iter()
        .zip(node.get_scared_timers())
        .filter_map(|(ghost, scared_timer)| {
            let distance = ghost.manhattan_distance(pacman);

            (i64::from(scared_timer) <= i64::from(distance)).then(|| {
                GHOST_PROXIMITY_WEIGHT / f64::from(distance.max(GHOST_DISTANCE_FLOOR))
            })
        })
        .sum()
}

fn nearest_food_distance<BoardType>(node: &BoardType, pacman: &Position) -> i32
where
    BoardType: FoodGettableGame,
{
    node.get_all_food()
        .iter()
        .map(|food| food.manhattan_distance(pacman))
        .min()
        .unwrap_or(0)
}

/// The game score, unmodified.
pub fn score_evaluation<BoardType>(node: &BoardType) -> Evaluation
where
    BoardType: ScoreGettableGame,
{
    N64::from(node.get_score() as f64)
}

/// Scores taking `action` as pacman from `node`, looking only at the resulting state.
pub fn reflex_evaluation<BoardType>(
    node: &BoardType,
    action: Direction,
) -> Result<Evaluation, GameError>
where
    BoardType: SimulableGame<Action = Direction>
        + ScoreGettableGame
        + PacmanPositionGettableGame
        + GhostGettableGame
        + FoodGettableGame
        + CapsuleGettableGame,
{
    let successor = node.successor(MAXIMIZING_AGENT, action)?;
    if successor.is_win() {
        return Ok(N64::from(WIN_SCORE));
    }

    let pacman = successor.get_pacman_position();

    let mut score = successor.get_score() as f64;
    score -= ghost_penalty(&successor, &pacman);
    if successor.get_num_food() < node.get_num_food() {
        score += FOOD_EATEN_BONUS;
    }
    score -= REFLEX_FOOD_DISTANCE_WEIGHT * f64::from(nearest_food_distance(&successor, &pacman));
    if node.get_capsules().contains(&pacman) {
        score += CAPSULE_BONUS;
    }
    if action == Direction::Stop {
        score -= STOP_PENALTY;
    }

    Ok(N64::from(score))
}

/// Static evaluation of a single state, used at the search horizon.
pub fn better_evaluation<BoardType>(node: &BoardType) -> Evaluation
where
    BoardType: VictorDeterminableGame
        + ScoreGettableGame
        + PacmanPositionGettableGame
        + GhostGettableGame
        + FoodGettableGame
        + CapsuleGettableGame,
{
    if node.is_win() {
        return N64::from(WIN_SCORE);
    }
    if node.is_lose() {
        return N64::from(LOSE_SCORE);
    }

    let pacman = node.get_pacman_position();
    let capsules = node.get_capsules();

    let mut score = node.get_score() as f64;
    score -= ghost_penalty(node, &pacman);
    score -= FOOD_DISTANCE_WEIGHT * f64::from(nearest_food_distance(node, &pacman));
    if capsules.contains(&pacman) {
        score += CAPSULE_BONUS;
    }
    score -= CAPSULE_REMAINING_PENALTY * capsules.len() as f64;

    N64::from(score)
}

/// The evaluation functions a search agent can be configured with by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluationFunction {
    #[default]
    Score,
    Better,
}

impl EvaluationFunction {
    pub const ALL: [EvaluationFunction; 2] = [EvaluationFunction::Score, EvaluationFunction::Better];

    pub fn name(&self) -> &'static str {
        match self {
            EvaluationFunction::Score => "score",
            EvaluationFunction::Better => "better",
        }
    }
}

impl fmt::Display for EvaluationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EvaluationFunction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "score" | "scoreEvaluationFunction" => EvaluationFunction::Score,
            "better" | "betterEvaluationFunction" => EvaluationFunction::Better,
            _ => bail!(
                "unknown evaluation function {:?}, expected one of: {}",
                s,
                EvaluationFunction::ALL.map(|e| e.name()).join(", ")
            ),
        })
    }
}

/// Lets an [EvaluationFunction] be handed straight to a search agent.
impl<BoardType> Scorable<BoardType> for EvaluationFunction
where
    BoardType: VictorDeterminableGame
        + ScoreGettableGame
        + PacmanPositionGettableGame
        + GhostGettableGame
        + FoodGettableGame
        + CapsuleGettableGame,
{
    fn score(&self, node: &BoardType) -> Evaluation {
        match self {
            EvaluationFunction::Score => score_evaluation(node),
            EvaluationFunction::Better => better_evaluation(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    fn capsule_corridor() -> GameState {
        include_str!("../fixtures/capsule_corridor.lay")
            .parse()
            .unwrap()
    }

    fn lost_state() -> GameState {
        let state: GameState = include_str!("../fixtures/ghost_corridor.lay")
            .parse()
            .unwrap();

        state
            .successor(0, Direction::East)
            .unwrap()
            .successor(1, Direction::West)
            .unwrap()
    }

    #[test]
    fn test_score_evaluation() {
        let state = capsule_corridor();
        assert_eq!(score_evaluation(&state), N64::from(0.0));

        let state = state.successor(0, Direction::East).unwrap();
        assert_eq!(score_evaluation(&state), N64::from(9.0));

        assert_eq!(score_evaluation(&lost_state()), N64::from(-491.0));
    }

    #[test]
    fn test_better_sentinels() {
        let won = "%%%%\n%P.%\n%%%%"
            .parse::<GameState>()
            .unwrap()
            .successor(0, Direction::East)
            .unwrap();

        assert_eq!(better_evaluation(&won), N64::from(WIN_SCORE));
        assert_eq!(better_evaluation(&lost_state()), N64::from(LOSE_SCORE));
        assert!(better_evaluation(&capsule_corridor()) < N64::from(WIN_SCORE));
        assert!(better_evaluation(&capsule_corridor()) > N64::from(LOSE_SCORE));
    }

    #[test]
    fn test_better_evaluation_terms() {
        let expected = 0.0 - 50.0 / 6.0 - 2.0 * 1.0 - 10.0 * 1.0;

        assert_eq!(better_evaluation(&capsule_corridor()), N64::from(expected));
    }

    /// A frozen board where pacman can be placed on top of a capsule, which
    /// [GameState] never allows because capsules are eaten on arrival.
    struct StillBoard {
        pacman: Position,
        capsules: Vec<Position>,
    }

    impl VictorDeterminableGame for StillBoard {
        fn is_win(&self) -> bool {
            false
        }

        fn is_lose(&self) -> bool {
            false
        }
    }

    impl ScoreGettableGame for StillBoard {
        fn get_score(&self) -> i64 {
            0
        }
    }

    impl PacmanPositionGettableGame for StillBoard {
        fn get_pacman_position(&self) -> Position {
            self.pacman
        }
    }

    impl GhostGettableGame for StillBoard {
        fn get_ghost_positions(&self) -> Vec<Position> {
            vec![]
        }

        fn get_scared_timers(&self) -> Vec<u32> {
            vec![]
        }
    }

    impl FoodGettableGame for StillBoard {
        fn get_num_food(&self) -> usize {
            0
        }

        fn get_all_food(&self) -> Vec<Position> {
            vec![]
        }

        fn has_food(&self, _position: &Position) -> bool {
            false
        }
    }

    impl CapsuleGettableGame for StillBoard {
        fn get_capsules(&self) -> &[Position] {
            &self.capsules
        }
    }

    #[test]
    fn test_better_capsule_bonus() {
        let on_capsule = StillBoard {
            pacman: Position::new(1, 1),
            capsules: vec![Position::new(1, 1)],
        };
        let beside_capsule = StillBoard {
            pacman: Position::new(1, 1),
            capsules: vec![Position::new(2, 1)],
        };

        assert_eq!(
            better_evaluation(&on_capsule),
            N64::from(CAPSULE_BONUS - CAPSULE_REMAINING_PENALTY)
        );
        assert_eq!(
            better_evaluation(&beside_capsule),
            N64::from(-CAPSULE_REMAINING_PENALTY)
        );
    }

    #[test]
    fn test_every_ghost_is_scored() {
        let both: GameState = "%%%%%%%\n%G P G%\n%%%%%%%".parse().unwrap();
        let first_only: GameState = "%%%%%%%\n%G P  %\n%%%%%%%".parse().unwrap();

        assert_eq!(
            better_evaluation(&first_only) - better_evaluation(&both),
            N64::from(25.0)
        );
    }

    #[test]
    fn test_scared_ghosts_are_not_threats() {
        let state = capsule_corridor();
        let pacman = state.get_pacman_position();
        assert_eq!(ghost_penalty(&state, &pacman), 50.0 / 6.0);

        let state = state
            .successor(0, Direction::East)
            .unwrap()
            .successor(1, Direction::West)
            .unwrap()
            .successor(0, Direction::East)
            .unwrap();
        let pacman = state.get_pacman_position();
        assert_eq!(ghost_penalty(&state, &pacman), 0.0);
    }

    #[test]
    fn test_ghosts_closer_than_floor_saturate() {
        let state: GameState = "%%%%%\n%PG %\n%%%%%".parse().unwrap();
        let pacman = state.get_pacman_position();

        assert_eq!(ghost_penalty(&state, &pacman), GHOST_PROXIMITY_WEIGHT);
        assert_eq!(ghost_penalty(&state, &state.get_ghost_positions()[0]), 50.0);
    }

    #[test]
    fn test_reflex_evaluation() {
        let state = capsule_corridor();

        let east = reflex_evaluation(&state, Direction::East).unwrap();
        let stop = reflex_evaluation(&state, Direction::Stop).unwrap();

        assert_eq!(east, N64::from(9.0 - 50.0 / 5.0 + 100.0 - 5.0 * 2.0));
        assert!(east > stop);
    }

    #[test]
    fn test_reflex_capsule_bonus() {
        let state = capsule_corridor()
            .successor(0, Direction::East)
            .unwrap()
            .successor(1, Direction::West)
            .unwrap();

        let onto_capsule = reflex_evaluation(&state, Direction::East).unwrap();
        let back = reflex_evaluation(&state, Direction::West).unwrap();

        assert!(onto_capsule - back > N64::from(CAPSULE_BONUS - 100.0));
    }

    #[test]
    fn test_reflex_win_and_errors() {
        let state: GameState = "%%%%\n%P.%\n%%%%".parse().unwrap();

        assert_eq!(
            reflex_evaluation(&state, Direction::East).unwrap(),
            N64::from(WIN_SCORE)
        );
        assert_eq!(
            reflex_evaluation(&state, Direction::North),
            Err(GameError::IllegalAction {
                agent: 0,
                action: "north".to_owned()
            })
        );
    }

    #[test]
    fn test_registry() {
        assert_eq!(EvaluationFunction::default(), EvaluationFunction::Score);
        for e in EvaluationFunction::ALL {
            assert_eq!(e.name().parse::<EvaluationFunction>().unwrap(), e);
        }
        assert_eq!(
            "betterEvaluationFunction"
                .parse::<EvaluationFunction>()
                .unwrap(),
            EvaluationFunction::Better
        );
        assert!("worse".parse::<EvaluationFunction>().is_err());

        let state = capsule_corridor();
        assert_eq!(EvaluationFunction::Score.score(&state), N64::from(0.0));
        assert_eq!(
            EvaluationFunction::Better.score(&state),
            better_evaluation(&state)
        );
    }
}
