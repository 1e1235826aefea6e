//! RNG module - deterministic placement for demo games
//!
//! Games need a little randomness (where the next target or food lands) but
//! must stay reproducible in tests, so a seeded LCG is used instead of a
//! system source.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`. `max` of zero yields zero.
    pub fn next_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        // The high bits of an LCG are the better distributed ones.
        ((self.next_u32() >> 8) as usize) % max
    }

    /// Pick a random cell of a `width x height` grid for which `blocked`
    /// returns false.
    ///
    /// Returns `None` when every cell is blocked.
    pub fn pick_cell<F>(&mut self, width: usize, height: usize, blocked: F) -> Option<(usize, usize)>
    where
        F: Fn(usize, usize) -> bool,
    {
        let cells = width * height;
        if cells == 0 {
            return None;
        }

        for _ in 0..8 {
            let idx = self.next_below(cells);
            let (x, y) = (idx % width, idx / width);
            if !blocked(x, y) {
                return Some((x, y));
            }
        }

        // Dense grids: scan from a random offset so the result is still spread out.
        let start = self.next_below(cells);
        (0..cells)
            .map(|i| (start + i) % cells)
            .map(|idx| (idx % width, idx / width))
            .find(|&(x, y)| !blocked(x, y))
    }

    /// Current internal state, to restart a game with the same sequence.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
