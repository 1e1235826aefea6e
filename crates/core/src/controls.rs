//! Accepted control alphabet and the pending input queue.

use std::collections::VecDeque;
use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Symbol, MAX_CONTROLS};

/// Error building a [`ControlSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlSetError {
    TooMany { given: usize },
}

impl fmt::Display for ControlSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooMany { given } => write!(
                f,
                "{given} controls declared, a message carries at most {MAX_CONTROLS}"
            ),
        }
    }
}

impl std::error::Error for ControlSetError {}

/// Ordered set of reaction symbols a game accepts.
///
/// Attachment order is preserved; duplicates are collapsed to their first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSet {
    symbols: ArrayVec<Symbol, MAX_CONTROLS>,
}

impl ControlSet {
    pub fn new(symbols: &[Symbol]) -> Result<Self, ControlSetError> {
        let mut out = ArrayVec::new();
        for sym in symbols {
            if out.contains(sym) {
                continue;
            }
            if out.try_push(sym.clone()).is_err() {
                return Err(ControlSetError::TooMany {
                    given: symbols.len(),
                });
            }
        }
        Ok(Self { symbols: out })
    }

    pub fn contains(&self, sym: &Symbol) -> bool {
        self.symbols.contains(sym)
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The n-th control in attachment order.
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }
}

/// Pending input, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputQueue {
    items: VecDeque<Symbol>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front; the most recent input is `latest()`.
    pub fn push_front(&mut self, sym: Symbol) {
        self.items.push_front(sym);
    }

    pub fn latest(&self) -> Option<&Symbol> {
        self.items.front()
    }

    /// Oldest input first, the order it was given in.
    pub fn chronological(&self) -> impl Iterator<Item = &Symbol> {
        self.items.iter().rev()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.items.iter()
    }

    pub fn contains(&self, sym: &str) -> bool {
        self.items.iter().any(|s| s == sym)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
