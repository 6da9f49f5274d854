//! Board primitives and the accessor traits the evaluation functions are written against.

use std::{fmt, str::FromStr};

use anyhow::bail;
use pacman_minimax::types::AgentIndex;

/// A cell on the board. `x` grows to the east and `y` grows to the south, so row zero is the top
/// row of a layout file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One move for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction, in the order legal actions are enumerated.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    pub fn apply(&self, position: &Position) -> Position {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        };

        Position {
            x: position.x + dx,
            y: position.y + dy,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Direction::North,
            "south" | "s" => Direction::South,
            "east" | "e" => Direction::East,
            "west" | "w" => Direction::West,
            "stop" => Direction::Stop,
            _ => bail!("unknown direction {s:?}"),
        })
    }
}

pub trait ScoreGettableGame {
    fn get_score(&self) -> i64;
}

pub trait PacmanPositionGettableGame {
    fn get_pacman_position(&self) -> Position;
}

/// Ghosts are numbered by agent index, so the first ghost is agent `1`.
pub trait GhostGettableGame {
    fn get_ghost_positions(&self) -> Vec<Position>;
    fn get_scared_timers(&self) -> Vec<u32>;

    fn get_ghost_position(&self, agent: AgentIndex) -> Option<Position> {
        agent
            .checked_sub(1)
            .and_then(|i| self.get_ghost_positions().get(i).copied())
    }
}

pub trait FoodGettableGame {
    fn get_num_food(&self) -> usize;
    fn get_all_food(&self) -> Vec<Position>;
    fn has_food(&self, position: &Position) -> bool;
}

pub trait CapsuleGettableGame {
    fn get_capsules(&self) -> &[Position];
}
