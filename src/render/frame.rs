//! Snapshot of the intersection as a grid of cell states

use super::{Bulb, CellState, Glyph, Renderer};
use crate::simulation::{
    Approach, Direction, Movement, Position, SimWorld, EASTBOUND_Y, GRID_HEIGHT, GRID_WIDTH,
    INTERSECTION_END_X, INTERSECTION_END_Y, INTERSECTION_START_X, INTERSECTION_START_Y,
    NORTHBOUND_X, SOUTHBOUND_X, WESTBOUND_Y,
};

const LANE_COLUMNS: [i32; 2] = [SOUTHBOUND_X, NORTHBOUND_X];
const LANE_ROWS: [i32; 2] = [WESTBOUND_Y, EASTBOUND_Y];

/// One captured picture of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Frame {
    /// Capture roads, signal heads and cars from the current world state
    pub fn capture(world: &SimWorld) -> Self {
        let width = GRID_WIDTH as usize;
        let height = GRID_HEIGHT as usize;
        let mut frame = Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        };

        for x in LANE_COLUMNS {
            for y in 0..GRID_HEIGHT {
                frame.set(Position::new(x, y), CellState::RoadVertical);
            }
        }
        for y in LANE_ROWS {
            for x in 0..GRID_WIDTH {
                let state = if LANE_COLUMNS.contains(&x) {
                    CellState::RoadCrossing
                } else {
                    CellState::RoadHorizontal
                };
                frame.set(Position::new(x, y), state);
            }
        }

        let protected = world.pattern().has_protected_left();
        for direction in Direction::ALL {
            let heads = signal_head(world, direction, protected);
            let count = heads.len() as i32;
            for (i, state) in heads.into_iter().enumerate() {
                let i = i as i32;
                let position = match direction {
                    Direction::South => Position::new(SOUTHBOUND_X - 2, INTERSECTION_START_Y - 1 - i),
                    Direction::North => Position::new(NORTHBOUND_X + 2, INTERSECTION_END_Y + 1 + i),
                    Direction::East => {
                        Position::new(INTERSECTION_START_X - 1 - count + i, EASTBOUND_Y + 2)
                    }
                    Direction::West => Position::new(INTERSECTION_END_X + 2 + i, WESTBOUND_Y - 2),
                };
                frame.set(position, state);
            }
        }

        for car in world.cars() {
            frame.set(
                car.position,
                CellState::Car {
                    stopped: car.stopped,
                },
            );
        }

        frame
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, position: Position) -> Option<CellState> {
        self.index(position).map(|i| self.cells[i])
    }

    fn set(&mut self, position: Position, state: CellState) {
        if let Some(i) = self.index(position) {
            self.cells[i] = state;
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.in_bounds() {
            Some(position.y as usize * self.width + position.x as usize)
        } else {
            None
        }
    }

    /// Rows of glyphs as chosen by `renderer`
    pub fn glyph_rows<'a>(
        &'a self,
        renderer: &'a dyn Renderer,
    ) -> impl Iterator<Item = Vec<Glyph>> + 'a {
        self.cells
            .chunks(self.width)
            .map(move |row| row.iter().map(|&state| renderer.glyph_for(state)).collect())
    }

    /// Frame as plain text lines, ignoring tints
    pub fn to_lines(&self, renderer: &dyn Renderer) -> Vec<String> {
        self.glyph_rows(renderer)
            .map(|row| row.iter().map(|glyph| glyph.symbol).collect())
            .collect()
    }
}

/// Bulbs of the signal head facing traffic travelling `direction`
fn signal_head(world: &SimWorld, direction: Direction, protected: bool) -> Vec<CellState> {
    let straight = world.lights().get(Approach::new(direction, Movement::Straight));
    let mut bulbs: Vec<(Bulb, bool)> = [Bulb::Red, Bulb::Yellow, Bulb::Green]
        .into_iter()
        .map(|bulb| (bulb, bulb.is_lit_by(straight)))
        .collect();
    if protected {
        let turn = world.lights().get(Approach::new(direction, Movement::Left));
        bulbs.push((Bulb::Arrow, Bulb::Arrow.is_lit_by(turn)));
    }
    bulbs
        .into_iter()
        .map(|(bulb, lit)| CellState::Bulb { bulb, lit })
        .collect()
}
