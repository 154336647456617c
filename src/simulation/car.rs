//! Car movement logic for the intersection simulation

use super::types::{Approach, CarId, Direction, Movement, Position};

/// A car in the intersection simulation
#[derive(Debug, Clone)]
pub struct SimCar {
    pub id: CarId,
    pub direction: Direction,
    /// Pending turn; cleared back to `Straight` once the turn is taken
    pub movement: Movement,
    pub position: Position,
    /// Whether the car held its cell during the last tick (render state only)
    pub stopped: bool,
}

impl SimCar {
    /// Create a car at the edge cell of the lane for `direction`
    pub fn spawn(id: CarId, direction: Direction, movement: Movement) -> Self {
        Self::at(id, direction, movement, Position::spawn_point(direction))
    }

    pub fn at(id: CarId, direction: Direction, movement: Movement, position: Position) -> Self {
        Self {
            id,
            direction,
            movement,
            position,
            stopped: false,
        }
    }

    /// Move one cell, taking a pending left turn first if the car stands on its pivot
    pub fn advance(&mut self) {
        self.try_turn();
        self.position = self.position.step(self.direction, 1);
    }

    /// Take the pending left turn if the car is on its pivot cell
    ///
    /// Returns true when the car turned. A car turns at most once.
    pub fn try_turn(&mut self) -> bool {
        if self.movement != Movement::Left || !self.position.is_left_pivot(self.direction) {
            return false;
        }
        self.direction = self.direction.left();
        self.movement = Movement::Straight;
        true
    }

    /// The cell this car would enter next
    pub fn next_cell(&self) -> Position {
        self.position.step(self.direction, 1)
    }

    pub fn at_stop_line(&self) -> bool {
        self.position.is_stop_line(self.direction)
    }

    /// The approach whose light governs this car
    pub fn approach(&self) -> Approach {
        Approach::new(self.direction, self.movement)
    }
}
