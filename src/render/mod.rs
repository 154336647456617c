//! Terminal presentation for the intersection simulation
//!
//! The simulation never touches colours or glyphs. A [`Frame`] is captured
//! from a [`SimWorld`](crate::simulation::SimWorld) snapshot through a
//! [`Renderer`], which decides how each cell looks, and is then written out
//! by the [`TerminalRenderer`].

mod frame;
mod terminal;

pub use frame::Frame;
pub use terminal::{Flow, TerminalRenderer};

use crate::simulation::Light;

/// Colour applied to a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Default,
    Green,
    Red,
    Yellow,
    Grey,
}

/// A single styled character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub tint: Tint,
}

impl Glyph {
    pub const fn new(symbol: char, tint: Tint) -> Self {
        Self { symbol, tint }
    }

    pub const fn plain(symbol: char) -> Self {
        Self::new(symbol, Tint::Default)
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::plain(' ')
    }
}

/// One bulb of a signal head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bulb {
    Red,
    Yellow,
    Green,
    Arrow,
}

impl Bulb {
    /// Whether this bulb is lit while the head shows `light`
    pub fn is_lit_by(self, light: Light) -> bool {
        matches!(
            (self, light),
            (Bulb::Red, Light::Red)
                | (Bulb::Yellow, Light::Yellow)
                | (Bulb::Green, Light::Green)
                | (Bulb::Arrow, Light::GreenArrow)
        )
    }
}

/// What occupies a grid cell, independent of how it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    RoadVertical,
    RoadHorizontal,
    RoadCrossing,
    Car { stopped: bool },
    Bulb { bulb: Bulb, lit: bool },
}

/// Decides how each cell state is drawn
pub trait Renderer {
    fn glyph_for(&self, state: CellState) -> Glyph;
}

/// Box-drawing roads, coloured cars and lit bulbs
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicGlyphs;

impl Renderer for ClassicGlyphs {
    fn glyph_for(&self, state: CellState) -> Glyph {
        match state {
            CellState::Empty => Glyph::plain(' '),
            CellState::RoadVertical => Glyph::plain('║'),
            CellState::RoadHorizontal => Glyph::plain('═'),
            CellState::RoadCrossing => Glyph::plain('╬'),
            CellState::Car { stopped: false } => Glyph::new('■', Tint::Green),
            CellState::Car { stopped: true } => Glyph::new('■', Tint::Red),
            CellState::Bulb { bulb, lit } => {
                let symbol = if bulb == Bulb::Arrow { '▲' } else { '●' };
                let tint = match (bulb, lit) {
                    (_, false) => Tint::Grey,
                    (Bulb::Red, true) => Tint::Red,
                    (Bulb::Yellow, true) => Tint::Yellow,
                    (Bulb::Green | Bulb::Arrow, true) => Tint::Green,
                };
                Glyph::new(symbol, tint)
            }
        }
    }
}

/// ASCII output without colour, for logs and dumb terminals
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainGlyphs;

impl Renderer for PlainGlyphs {
    fn glyph_for(&self, state: CellState) -> Glyph {
        let symbol = match state {
            CellState::Empty => ' ',
            CellState::RoadVertical => '|',
            CellState::RoadHorizontal => '-',
            CellState::RoadCrossing => '+',
            CellState::Car { stopped: false } => 'C',
            CellState::Car { stopped: true } => 'S',
            CellState::Bulb { lit: false, .. } => '.',
            CellState::Bulb { bulb, lit: true } => match bulb {
                Bulb::Red => 'R',
                Bulb::Yellow => 'Y',
                Bulb::Green => 'G',
                Bulb::Arrow => '^',
            },
        };
        Glyph::plain(symbol)
    }
}
