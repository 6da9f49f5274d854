//! The immutable game state searched over.
//!
//! Pacman is agent `0` and ghost `i` is agent `i + 1`. Every successor is a fresh value, the
//! receiver is never touched.

use std::{fmt, str::FromStr, sync::Arc};

use pacman_minimax::types::{
    AgentCountGame, AgentIndex, GameError, SimulableGame, VictorDeterminableGame, MAXIMIZING_AGENT,
};

use crate::{
    layout::Layout,
    types::{
        CapsuleGettableGame, Direction, FoodGettableGame, GhostGettableGame,
        PacmanPositionGettableGame, Position, ScoreGettableGame,
    },
};

/// Number of ghost moves a ghost stays scared for after pacman eats a capsule.
pub const SCARED_TIME: u32 = 40;
pub const TIME_PENALTY: i64 = 1;
pub const FOOD_SCORE: i64 = 10;
pub const WIN_BONUS: i64 = 500;
pub const GHOST_EATEN_SCORE: i64 = 200;
pub const DEATH_PENALTY: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostState {
    pub start: Position,
    pub position: Position,
    /// The last move made, `Stop` until the ghost first moves.
    pub direction: Direction,
    pub scared_timer: u32,
}

impl GhostState {
    fn new(start: Position) -> Self {
        Self {
            start,
            position: start,
            direction: Direction::Stop,
            scared_timer: 0,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    layout: Arc<Layout>,
    pacman: Position,
    ghosts: Vec<GhostState>,
    food: Vec<bool>,
    food_count: usize,
    capsules: Vec<Position>,
    score: i64,
    outcome: Outcome,
}

impl GameState {
    pub fn from_layout(layout: Layout) -> Self {
        let mut food = vec![false; (layout.width() * layout.height()) as usize];
        for i in layout.food.iter().filter_map(|f| layout.index_of(f)) {
            food[i] = true;
        }
        let food_count = food.iter().filter(|f| **f).count();

        Self {
            pacman: layout.pacman_start,
            ghosts: layout.ghost_starts.iter().copied().map(GhostState::new).collect(),
            capsules: layout.capsules.clone(),
            food,
            food_count,
            score: 0,
            outcome: Outcome::Playing,
            layout: Arc::new(layout),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn ghosts(&self) -> &[GhostState] {
        &self.ghosts
    }

    fn pacman_actions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| *d == Direction::Stop || !self.layout.is_wall(&d.apply(&self.pacman)))
            .collect()
    }

    /// Ghosts may not stop, and only turn around when there is nowhere else to go.
    fn ghost_actions(&self, ghost: &GhostState) -> Vec<Direction> {
        let mut possible: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| *d != Direction::Stop && !self.layout.is_wall(&d.apply(&ghost.position)))
            .collect();

        let reverse = ghost.direction.reverse();
        if ghost.direction != Direction::Stop && possible.len() > 1 {
            possible.retain(|d| *d != reverse);
        }

        if possible.is_empty() {
            possible.push(Direction::Stop);
        }

        possible
    }

    fn move_pacman(&mut self, action: Direction) {
        self.pacman = action.apply(&self.pacman);
        self.score -= TIME_PENALTY;
        self.consume();

        for i in 0..self.ghosts.len() {
            self.check_collision(i);
        }
    }

    fn consume(&mut self) {
        if let Some(i) = self.layout.index_of(&self.pacman) {
            if self.food[i] {
                self.food[i] = false;
                self.food_count -= 1;
                self.score += FOOD_SCORE;

                if self.food_count == 0 && self.outcome == Outcome::Playing {
                    self.score += WIN_BONUS;
                    self.outcome = Outcome::Won;
                }
            }
        }

        if let Some(i) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(i);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = SCARED_TIME;
            }
        }
    }

    fn move_ghost(&mut self, index: usize, action: Direction) {
        let ghost = &mut self.ghosts[index];
        ghost.position = action.apply(&ghost.position);
        ghost.direction = action;
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.check_collision(index);
    }

    fn check_collision(&mut self, index: usize) {
        let ghost = self.ghosts[index];
        if ghost.position != self.pacman {
            return;
        }

        if ghost.is_scared() {
            self.score += GHOST_EATEN_SCORE;
            self.ghosts[index] = GhostState::new(ghost.start);
        } else if self.outcome == Outcome::Playing {
            self.score -= DEATH_PENALTY;
            self.outcome = Outcome::Lost;
        }
    }
}

impl From<Layout> for GameState {
    fn from(layout: Layout) -> Self {
        Self::from_layout(layout)
    }
}

impl FromStr for GameState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_layout(s.parse()?))
    }
}

impl AgentCountGame for GameState {
    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }
}

impl VictorDeterminableGame for GameState {
    fn is_win(&self) -> bool {
        self.outcome == Outcome::Won
    }

    fn is_lose(&self) -> bool {
        self.outcome == Outcome::Lost
    }
}

impl SimulableGame for GameState {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        if agent == MAXIMIZING_AGENT {
            self.pacman_actions()
        } else {
            self.ghosts
                .get(agent - 1)
                .map(|g| self.ghost_actions(g))
                .unwrap_or_default()
        }
    }

    fn successor(&self, agent: AgentIndex, action: Direction) -> Result<Self, GameError> {
        let num_agents = self.num_agents();
        if agent >= num_agents {
            return Err(GameError::NoSuchAgent { agent, num_agents });
        }
        if self.is_over() {
            return Err(GameError::TerminalState { agent });
        }
        if !self.legal_actions(agent).contains(&action) {
            return Err(GameError::IllegalAction {
                agent,
                action: action.to_string(),
            });
        }

        let mut next = self.clone();
        if agent == MAXIMIZING_AGENT {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent - 1, action);
        }

        Ok(next)
    }

    fn null_action() -> Direction {
        Direction::Stop
    }
}

impl ScoreGettableGame for GameState {
    fn get_score(&self) -> i64 {
        self.score
    }
}

impl PacmanPositionGettableGame for GameState {
    fn get_pacman_position(&self) -> Position {
        self.pacman
    }
}

impl GhostGettableGame for GameState {
    fn get_ghost_positions(&self) -> Vec<Position> {
        self.ghosts.iter().map(|g| g.position).collect()
    }

    fn get_scared_timers(&self) -> Vec<u32> {
        self.ghosts.iter().map(|g| g.scared_timer).collect()
    }
}

impl FoodGettableGame for GameState {
    fn get_num_food(&self) -> usize {
        self.food_count
    }

    fn get_all_food(&self) -> Vec<Position> {
        self.food
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| {
                let i = i as i32;
                Position::new(i % self.layout.width(), i / self.layout.width())
            })
            .collect()
    }

    fn has_food(&self, position: &Position) -> bool {
        self.layout.index_of(position).map_or(false, |i| self.food[i])
    }
}

impl CapsuleGettableGame for GameState {
    fn get_capsules(&self) -> &[Position] {
        &self.capsules
    }
}

/// Renders the board in the layout format, with scared ghosts drawn as `g`.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.layout.height() {
            let row: String = (0..self.layout.width())
                .map(|x| {
                    let position = Position::new(x, y);

                    if let Some(ghost) = self.ghosts.iter().find(|g| g.position == position) {
                        if ghost.is_scared() {
                            'g'
                        } else {
                            'G'
                        }
                    } else if position == self.pacman {
                        'P'
                    } else if self.layout.is_wall(&position) {
                        '%'
                    } else if self.has_food(&position) {
                        '.'
                    } else if self.capsules.contains(&position) {
                        'o'
                    } else {
                        ' '
                    }
                })
                .collect();

            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}
