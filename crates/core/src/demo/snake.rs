//! Snake: a real-time game that advances every tick without waiting for input.

use std::collections::VecDeque;
use std::time::Duration;

use crate::controls::InputQueue;
use crate::game::Game;
use crate::rng::SimpleRng;
use crate::screen::Screen;
use crate::types::{arrow_controls, Symbol, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP};

pub const SNAKE_WIDTH: usize = 10;
pub const SNAKE_HEIGHT: usize = 8;

const HEAD: &str = "🟢";
const BODY: &str = "🟩";
const FOOD: &str = "🍎";
const FIELD: &str = "⬛";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn from_symbol(sym: &Symbol) -> Option<Self> {
        match sym.as_str() {
            ARROW_UP => Some(Self::Up),
            ARROW_DOWN => Some(Self::Down),
            ARROW_LEFT => Some(Self::Left),
            ARROW_RIGHT => Some(Self::Right),
            _ => None,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    over: bool,
    crashed: bool,
    /// Front is the head.
    body: VecDeque<(usize, usize)>,
    heading: Heading,
    food: Option<(usize, usize)>,
    rng: SimpleRng,
    tick: Duration,
    controls: Vec<Symbol>,
    aliases: Vec<String>,
}

impl Snake {
    pub fn new(seed: u32) -> Self {
        let mut game = Self {
            over: true,
            crashed: false,
            body: VecDeque::new(),
            heading: Heading::Right,
            food: None,
            rng: SimpleRng::new(seed),
            tick: Duration::from_secs(1),
            controls: arrow_controls(),
            aliases: vec!["s".to_string()],
        };
        game.reset();
        game
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    fn reset(&mut self) {
        let y = SNAKE_HEIGHT / 2;
        self.body = VecDeque::from(vec![(2, y), (1, y), (0, y)]);
        self.heading = Heading::Right;
        self.crashed = false;
        self.place_food();
    }

    fn place_food(&mut self) {
        let body = &self.body;
        self.food = self
            .rng
            .pick_cell(SNAKE_WIDTH, SNAKE_HEIGHT, |x, y| body.contains(&(x, y)));
    }

    fn steer(&mut self, input: &InputQueue) {
        // Newest valid heading wins; a direct reversal is ignored.
        if let Some(next) = input
            .iter()
            .filter_map(Heading::from_symbol)
            .find(|h| *h != self.heading.opposite())
        {
            self.heading = next;
        }
    }

    fn advance(&mut self) {
        let Some(&(hx, hy)) = self.body.front() else {
            self.over = true;
            return;
        };
        let (dx, dy) = self.heading.offset();
        let nx = hx as isize + dx;
        let ny = hy as isize + dy;
        if nx < 0 || ny < 0 || nx >= SNAKE_WIDTH as isize || ny >= SNAKE_HEIGHT as isize {
            self.crash();
            return;
        }
        let next = (nx as usize, ny as usize);
        let grows = self.food == Some(next);

        if !grows {
            self.body.pop_back();
        }
        if self.body.contains(&next) {
            self.crash();
            return;
        }
        self.body.push_front(next);

        if grows {
            self.place_food();
            if self.food.is_none() {
                // Board filled.
                self.over = true;
            }
        }
    }

    fn crash(&mut self) {
        self.crashed = true;
        self.over = true;
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Option<(usize, usize)> {
        self.body.front().copied()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn food(&self) -> Option<(usize, usize)> {
        self.food
    }
}

impl Game for Snake {
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
        false
    }

    fn tick(&self) -> Duration {
        self.tick
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    fn screen_size(&self) -> (usize, usize) {
        (SNAKE_WIDTH, SNAKE_HEIGHT)
    }

    fn background(&self) -> Symbol {
        Symbol::from(FIELD)
    }

    fn title(&self) -> String {
        "**Snake**".to_string()
    }

    fn footer(&self) -> String {
        if self.crashed {
            format!("Crashed! Length {}", self.body.len())
        } else {
            format!("Length {}", self.body.len())
        }
    }

    fn controls(&self) -> &[Symbol] {
        &self.controls
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn update(&mut self, input: &InputQueue) {
        if self.over {
            return;
        }
        self.steer(input);
        self.advance();
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(&self.background());
        if let Some((fx, fy)) = self.food {
            screen.set(fx, fy, FOOD);
        }
        for (i, &(x, y)) in self.body.iter().enumerate() {
            screen.set(x, y, if i == 0 { HEAD } else { BODY });
        }
    }
}
