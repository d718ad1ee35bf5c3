//! Scripted engine for session tests.
//!
//! The board is a plain rectangle: the player starts in the middle and may
//! step one cell in any direction as long as it stays on the board. Every
//! engine call is counted so tests can prove which calls happened.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use greed_session::{Direction, Engine, EngineError, GameHandle};

/// Shared call counters.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    pub generates: Rc<Cell<usize>>,
    pub loads: Rc<Cell<usize>>,
    pub moves: Rc<Cell<usize>>,
    pub undos: Rc<Cell<usize>>,
}

fn bump(counter: &Rc<Cell<usize>>) {
    counter.set(counter.get() + 1);
}

#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    pub calls: Calls,
    auto_seeds: Rc<Cell<usize>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct FakeGame {
    seed: Option<String>,
    width: i64,
    height: i64,
    pos: (i64, i64),
    history: Vec<(i64, i64)>,
    calls: Calls,
}

fn step(direction: Direction) -> (i64, i64) {
    match direction {
        Direction::North => (0, -1),
        Direction::NorthEast => (1, -1),
        Direction::East => (1, 0),
        Direction::SouthEast => (1, 1),
        Direction::South => (0, 1),
        Direction::SouthWest => (-1, 1),
        Direction::West => (-1, 0),
        Direction::NorthWest => (-1, -1),
    }
}

impl FakeGame {
    fn target(&self, direction: Direction) -> Option<(i64, i64)> {
        let (dx, dy) = step(direction);
        let (x, y) = (self.pos.0 + dx, self.pos.1 + dy);
        (x >= 0 && y >= 0 && x < self.width && y < self.height).then_some((x, y))
    }
}

impl GameHandle for FakeGame {
    fn move_(&mut self, direction: Direction) -> Result<(), EngineError> {
        bump(&self.calls.moves);
        let target = self
            .target(direction)
            .ok_or_else(|| EngineError::new("Bad move"))?;
        self.history.push(self.pos);
        self.pos = target;
        Ok(())
    }

    fn undo(&mut self) -> Result<(), EngineError> {
        bump(&self.calls.undos);
        let previous = self
            .history
            .pop()
            .ok_or_else(|| EngineError::new("No moves to undo"))?;
        self.pos = previous;
        Ok(())
    }

    fn is_stuck(&self) -> bool {
        Direction::clockwise().all(|d| self.target(d).is_none())
    }

    fn print(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = if (x, y) == self.pos {
                    '@'
                } else if self.history.contains(&(x, y)) {
                    '.'
                } else {
                    'o'
                };
                out.push(cell);
            }
            out.push('\n');
        }
        out
    }

    fn seed(&self) -> Option<String> {
        self.seed.clone()
    }

    fn save(&self) -> String {
        let history = self
            .history
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}|{}|{}|{},{}|{}",
            self.seed.as_deref().unwrap_or(""),
            self.width,
            self.height,
            self.pos.0,
            self.pos.1,
            history
        )
    }
}

fn parse_pair(text: &str) -> Option<(i64, i64)> {
    let (x, y) = text.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

impl Engine for FakeEngine {
    type Handle = FakeGame;

    fn generate(&self, width: i64, height: i64, seed: &str) -> Result<FakeGame, EngineError> {
        bump(&self.calls.generates);
        if width <= 0 || height <= 0 {
            return Err(EngineError::new("Invalid Size"));
        }
        let seed = if seed.is_empty() {
            bump(&self.auto_seeds);
            format!("auto{}", self.auto_seeds.get())
        } else if seed.chars().all(|c| c.is_ascii_alphanumeric()) {
            seed.to_string()
        } else {
            return Err(EngineError::new("Invalid Seed"));
        };
        Ok(FakeGame {
            seed: Some(seed),
            width,
            height,
            pos: (width / 2, height / 2),
            history: Vec::new(),
            calls: self.calls.clone(),
        })
    }

    fn load(&self, text: &str) -> Result<FakeGame, EngineError> {
        bump(&self.calls.loads);
        let invalid = || EngineError::new("Invalid save file");
        let fields: Vec<&str> = text.trim_end().split('|').collect();
        let [seed, width, height, pos, history] = fields.as_slice() else {
            return Err(invalid());
        };
        let width: i64 = width.parse().map_err(|_| invalid())?;
        let height: i64 = height.parse().map_err(|_| invalid())?;
        let pos = parse_pair(pos).ok_or_else(invalid)?;
        let history = if history.is_empty() {
            Vec::new()
        } else {
            history
                .split(';')
                .map(parse_pair)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?
        };
        Ok(FakeGame {
            seed: (!seed.is_empty()).then(|| seed.to_string()),
            width,
            height,
            pos,
            history,
            calls: self.calls.clone(),
        })
    }
}
