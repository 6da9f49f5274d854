//! Parsing of the plain text board format.
//!
//! ```text
//! %%%%%%%
//! %P.o G%
//! %%%%%%%
//! ```
//!
//! `%` is a wall, `.` is food, `o` is a capsule, `P` is where pacman starts and every `G` is where
//! a ghost starts. Ghosts are numbered in reading order. Anything off the board counts as a wall.

use std::str::FromStr;

use anyhow::{bail, ensure, Context};

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    pub food: Vec<Position>,
    pub capsules: Vec<Position>,
    pub pacman_start: Position,
    pub ghost_starts: Vec<Position>,
}

impl Layout {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, position: &Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub(crate) fn index_of(&self, position: &Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.y * self.width + position.x) as usize)
    }

    pub fn is_wall(&self, position: &Position) -> bool {
        self.index_of(position).map_or(true, |i| self.walls[i])
    }
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        ensure!(!rows.is_empty(), "layout has no rows");

        let width = rows[0].chars().count();
        let height = rows.len();

        let mut walls = Vec::with_capacity(width * height);
        let mut food = vec![];
        let mut capsules = vec![];
        let mut pacman_start = None;
        let mut ghost_starts = vec![];

        for (y, row) in rows.iter().enumerate() {
            ensure!(
                row.chars().count() == width,
                "row {} is {} wide but the first row is {} wide",
                y,
                row.chars().count(),
                width
            );

            for (x, c) in row.chars().enumerate() {
                let position = Position::new(
                    x.try_into().context("layout is too wide")?,
                    y.try_into().context("layout is too tall")?,
                );
                walls.push(c == '%');

                match c {
                    '%' | ' ' => {}
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    'P' => {
                        if pacman_start.replace(position).is_some() {
                            bail!("second pacman at {}", position);
                        }
                    }
                    'G' => ghost_starts.push(position),
                    other => bail!("unknown layout character {:?} at {}", other, position),
                }
            }
        }

        let pacman_start = pacman_start.context("layout has no pacman")?;

        Ok(Layout {
            width: width as i32,
            height: height as i32,
            walls,
            food,
            capsules,
            pacman_start,
            ghost_starts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let layout: Layout = include_str!("../fixtures/capsule_corridor.lay")
            .parse()
            .unwrap();

        assert_eq!(layout.width(), 9);
        assert_eq!(layout.height(), 3);
        assert_eq!(layout.pacman_start, Position::new(1, 1));
        assert_eq!(layout.ghost_starts, vec![Position::new(7, 1)]);
        assert_eq!(layout.capsules, vec![Position::new(3, 1)]);
        assert_eq!(
            layout.food,
            vec![Position::new(2, 1), Position::new(4, 1), Position::new(5, 1)]
        );
        assert!(layout.is_wall(&Position::new(0, 0)));
        assert!(!layout.is_wall(&Position::new(6, 1)));
    }

    #[test]
    fn test_off_board_is_wall() {
        let layout: Layout = "P".parse().unwrap();

        assert!(!layout.is_wall(&Position::new(0, 0)));
        assert!(layout.is_wall(&Position::new(-1, 0)));
        assert!(layout.is_wall(&Position::new(1, 0)));
        assert!(layout.is_wall(&Position::new(0, 1)));
    }

    #[test]
    fn test_ghosts_in_reading_order() {
        let layout: Layout = "%G %\n%GP%\n".parse().unwrap();

        assert_eq!(
            layout.ghost_starts,
            vec![Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_bad_layouts() {
        assert!("".parse::<Layout>().is_err());
        assert!("%%%\n% %\n%%%".parse::<Layout>().is_err());
        assert!("%P%\n%P%".parse::<Layout>().is_err());
        assert!("%P%\n%%".parse::<Layout>().is_err());
        assert!("%P?%".parse::<Layout>().is_err());
    }
}
