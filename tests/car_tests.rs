//! Car placement and movement tests

use intersection_sim::simulation::{
    CarId, Direction, Movement, Position, SimCar, EASTBOUND_Y, GRID_HEIGHT, GRID_WIDTH,
    INTERSECTION_END_Y, NORTHBOUND_X, SOUTHBOUND_X, WESTBOUND_Y,
};

#[test]
fn test_car_creation() {
    let car = SimCar::spawn(CarId(1), Direction::North, Movement::Straight);
    assert_eq!(car.id, CarId(1));
    assert_eq!(car.direction, Direction::North);
    assert_eq!(car.movement, Movement::Straight);
    assert!(!car.stopped);
}

#[test]
fn test_spawn_points_per_lane() {
    let at = |direction| SimCar::spawn(CarId(0), direction, Movement::Straight).position;

    assert_eq!(at(Direction::North), Position::new(NORTHBOUND_X, GRID_HEIGHT - 1));
    assert_eq!(at(Direction::South), Position::new(SOUTHBOUND_X, 0));
    assert_eq!(at(Direction::East), Position::new(0, EASTBOUND_Y));
    assert_eq!(at(Direction::West), Position::new(GRID_WIDTH - 1, WESTBOUND_Y));
}

#[test]
fn test_turning_cars_enter_in_the_same_lane() {
    for direction in Direction::ALL {
        let straight = SimCar::spawn(CarId(0), direction, Movement::Straight);
        let turning = SimCar::spawn(CarId(1), direction, Movement::Left);
        assert_eq!(turning.position, straight.position);
        assert_ne!(turning.approach(), straight.approach());
    }
}

#[test]
fn test_car_movement() {
    let mut car = SimCar::spawn(CarId(1), Direction::North, Movement::Straight);
    let initial = car.position;
    car.advance();
    assert_eq!(car.position, Position::new(initial.x, initial.y - 1));

    let mut car = SimCar::spawn(CarId(2), Direction::East, Movement::Straight);
    car.advance();
    assert_eq!(car.position, Position::new(1, EASTBOUND_Y));
}

#[test]
fn test_stop_line_is_just_outside_the_box() {
    let car = SimCar::at(
        CarId(0),
        Direction::North,
        Movement::Straight,
        Position::new(NORTHBOUND_X, INTERSECTION_END_Y + 1),
    );
    assert!(car.at_stop_line());

    let car = SimCar::at(
        CarId(0),
        Direction::North,
        Movement::Straight,
        Position::new(NORTHBOUND_X, INTERSECTION_END_Y),
    );
    assert!(!car.at_stop_line());
}

#[test]
fn test_left_turn_happens_once_at_the_pivot() {
    let mut car = SimCar::spawn(CarId(7), Direction::North, Movement::Left);

    let mut turns = 0;
    let mut previous_direction = car.direction;
    while car.position.in_bounds() {
        car.advance();
        if car.direction != previous_direction {
            turns += 1;
            previous_direction = car.direction;
        }
    }

    assert_eq!(turns, 1);
    assert_eq!(car.direction, Direction::West);
    assert_eq!(car.movement, Movement::Straight);
    // Left the grid along the westbound lane.
    assert_eq!(car.position, Position::new(-1, WESTBOUND_Y));
}

#[test]
fn test_advance_turns_before_moving() {
    // Standing on the pivot: the turn and the step happen in one call.
    let mut car = SimCar::at(
        CarId(0),
        Direction::East,
        Movement::Left,
        Position::new(NORTHBOUND_X, EASTBOUND_Y),
    );
    car.advance();
    assert_eq!(car.direction, Direction::North);
    assert_eq!(car.position, Position::new(NORTHBOUND_X, EASTBOUND_Y - 1));
}

#[test]
fn test_straight_car_never_turns_at_pivot() {
    let mut car = SimCar::at(
        CarId(0),
        Direction::South,
        Movement::Straight,
        Position::new(SOUTHBOUND_X, EASTBOUND_Y),
    );
    assert!(!car.try_turn());
    assert_eq!(car.direction, Direction::South);
}

#[test]
fn test_every_left_turn_ends_in_the_left_neighbour_direction() {
    for direction in Direction::ALL {
        let mut car = SimCar::spawn(CarId(0), direction, Movement::Left);
        while car.position.in_bounds() {
            car.advance();
        }
        assert_eq!(car.direction, direction.left(), "turning from {:?}", direction);
        assert_eq!(car.movement, Movement::Straight);
    }
}
