//! Wander: a turn-based collecting game.
//!
//! The player moves one cell per arrow reaction and collects stars. The game
//! ends when `goal` stars are collected or the stop control is used.

use std::time::Duration;

use crate::controls::InputQueue;
use crate::game::Game;
use crate::rng::SimpleRng;
use crate::screen::Screen;
use crate::types::{arrow_controls, Symbol, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP, STOP};

pub const WANDER_WIDTH: usize = 8;
pub const WANDER_HEIGHT: usize = 6;
pub const WANDER_GOAL: u32 = 5;

const PLAYER: &str = "🙂";
const STAR: &str = "⭐";
const FLOOR: &str = "⬛";

#[derive(Debug, Clone)]
pub struct Wander {
    over: bool,
    player: (usize, usize),
    star: (usize, usize),
    score: u32,
    goal: u32,
    rng: SimpleRng,
    controls: Vec<Symbol>,
    aliases: Vec<String>,
}

impl Wander {
    pub fn new(seed: u32) -> Self {
        let mut controls = arrow_controls();
        controls.push(Symbol::from(STOP));

        let mut game = Self {
            over: true,
            player: (0, 0),
            star: (0, 0),
            score: 0,
            goal: WANDER_GOAL,
            rng: SimpleRng::new(seed),
            controls,
            aliases: vec!["w".to_string(), "walk".to_string()],
        };
        game.reset();
        game
    }

    pub fn with_goal(mut self, goal: u32) -> Self {
        self.goal = goal.max(1);
        self
    }

    fn reset(&mut self) {
        self.player = (WANDER_WIDTH / 2, WANDER_HEIGHT / 2);
        self.score = 0;
        self.place_star();
    }

    fn place_star(&mut self) {
        let player = self.player;
        if let Some(cell) = self
            .rng
            .pick_cell(WANDER_WIDTH, WANDER_HEIGHT, |x, y| (x, y) == player)
        {
            self.star = cell;
        }
    }

    fn step(&mut self, sym: &Symbol) {
        let (x, y) = self.player;
        self.player = match sym.as_str() {
            ARROW_LEFT => (x.saturating_sub(1), y),
            ARROW_RIGHT => ((x + 1).min(WANDER_WIDTH - 1), y),
            ARROW_UP => (x, y.saturating_sub(1)),
            ARROW_DOWN => (x, (y + 1).min(WANDER_HEIGHT - 1)),
            STOP => {
                self.over = true;
                return;
            }
            _ => return,
        };

        if self.player == self.star {
            self.score += 1;
            if self.score >= self.goal {
                self.over = true;
            } else {
                self.place_star();
            }
        }
    }

    pub fn player(&self) -> (usize, usize) {
        self.player
    }

    pub fn star(&self) -> (usize, usize) {
        self.star
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl Game for Wander {
    fn is_over(&self) -> bool {
        self.over
    }

    /// Clearing `over` on a finished game starts a fresh round.
    fn set_over(&mut self, over: bool) {
        if self.over && !over {
            self.reset();
        }
        self.over = over;
    }

    fn needs_input(&self) -> bool {
        true
    }

    fn tick(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn screen_size(&self) -> (usize, usize) {
        (WANDER_WIDTH, WANDER_HEIGHT)
    }

    fn background(&self) -> Symbol {
        Symbol::from(FLOOR)
    }

    fn title(&self) -> String {
        "**Wander**".to_string()
    }

    fn footer(&self) -> String {
        if self.over && self.score >= self.goal {
            format!("All {} stars collected!", self.goal)
        } else {
            format!("Stars: {}/{}  ({STOP} to stop)", self.score, self.goal)
        }
    }

    fn controls(&self) -> &[Symbol] {
        &self.controls
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn update(&mut self, input: &InputQueue) {
        for sym in input.chronological() {
            if self.over {
                break;
            }
            self.step(sym);
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(&self.background());
        if !(self.over && self.score >= self.goal) {
            screen.set(self.star.0, self.star.1, STAR);
        }
        screen.set(self.player.0, self.player.1, PLAYER);
    }
}
