//! Core types for the intersection simulation
//!
//! Grid geometry, directions and the small value types shared by the cars,
//! the signal controller and the world.

/// Width of the simulated grid in cells
pub const GRID_WIDTH: i32 = 21;

/// Height of the simulated grid in cells
pub const GRID_HEIGHT: i32 = 21;

/// Half-width of the intersection box around the centre cell
pub const INTERSECTION_SIZE: i32 = 1;

const CENTER_X: i32 = GRID_WIDTH / 2;
const CENTER_Y: i32 = GRID_HEIGHT / 2;

pub const INTERSECTION_START_X: i32 = CENTER_X - INTERSECTION_SIZE;
pub const INTERSECTION_END_X: i32 = CENTER_X + INTERSECTION_SIZE;
pub const INTERSECTION_START_Y: i32 = CENTER_Y - INTERSECTION_SIZE;
pub const INTERSECTION_END_Y: i32 = CENTER_Y + INTERSECTION_SIZE;

// One single-file lane per direction, right-hand traffic. Turning cars queue
// in the same lane and are released by their own signal head.
pub const NORTHBOUND_X: i32 = CENTER_X + 1;
pub const SOUTHBOUND_X: i32 = CENTER_X - 1;
pub const EASTBOUND_Y: i32 = CENTER_Y + 1;
pub const WESTBOUND_Y: i32 = CENTER_Y - 1;

/// A wrapper type for car IDs
///
/// IDs are handed out in creation order, so ordering by ID is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarId(pub usize);

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for one cell of travel; north is decreasing `y`
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Direction after a left turn
    pub fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// A pair of opposing approaches that share a green
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// What a car intends to do at the intersection, and which lane it uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Straight,
    Left,
}

/// An approach into the intersection: a travel direction and one of its lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Approach {
    pub direction: Direction,
    pub movement: Movement,
}

impl Approach {
    pub const COUNT: usize = 8;

    pub fn new(direction: Direction, movement: Movement) -> Self {
        Self {
            direction,
            movement,
        }
    }

    pub fn all() -> impl Iterator<Item = Approach> {
        Direction::ALL.into_iter().flat_map(|direction| {
            [Movement::Straight, Movement::Left]
                .into_iter()
                .map(move |movement| Approach::new(direction, movement))
        })
    }

    /// Dense index used by the light table
    pub fn index(self) -> usize {
        let direction = match self.direction {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        };
        let movement = match self.movement {
            Movement::Straight => 0,
            Movement::Left => 1,
        };
        direction * 2 + movement
    }
}

/// A cell on the simulation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `cells` steps away along `direction`
    pub fn step(self, direction: Direction, cells: i32) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx * cells,
            y: self.y + dy * cells,
        }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }

    /// Edge cell where a car travelling `direction` enters the grid
    pub fn spawn_point(direction: Direction) -> Position {
        match direction {
            Direction::North => Position::new(NORTHBOUND_X, GRID_HEIGHT - 1),
            Direction::South => Position::new(SOUTHBOUND_X, 0),
            Direction::East => Position::new(0, EASTBOUND_Y),
            Direction::West => Position::new(GRID_WIDTH - 1, WESTBOUND_Y),
        }
    }

    /// Whether a car travelling `direction` sits on the cell just before the box
    pub fn is_stop_line(self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.y == INTERSECTION_END_Y + 1,
            Direction::South => self.y == INTERSECTION_START_Y - 1,
            Direction::East => self.x == INTERSECTION_START_X - 1,
            Direction::West => self.x == INTERSECTION_END_X + 1,
        }
    }

    /// Whether a left-turning car travelling `direction` has reached its pivot
    ///
    /// The pivot is where the car's lane crosses the lane it turns into.
    pub fn is_left_pivot(self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.y == WESTBOUND_Y,
            Direction::South => self.y == EASTBOUND_Y,
            Direction::East => self.x == NORTHBOUND_X,
            Direction::West => self.x == SOUTHBOUND_X,
        }
    }
}
