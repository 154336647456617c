//! Main simulation world that ties everything together
//!
//! Owns the cars, the signal controller and the spawn queue, and resolves
//! one tick of motion at a time.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};

use super::car::SimCar;
use super::config::{ConfigError, SimConfig};
use super::intersection::{LightTable, SignalController, SignalPattern};
use super::spawner::SpawnQueue;
use super::stats::{FinishReason, SimStats};
use super::types::{CarId, Direction, Movement, Position};

/// Hard cap on simulation steps
pub const MAX_STEPS: u32 = 200;

/// Maximum number of cleanup steps run after the main loop
pub const MAX_DRAIN_STEPS: u32 = 50;

/// Chance per tick that a spawn is attempted while below the car limit
const SPAWN_CHANCE: f64 = 0.5;

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,

    /// Active cars, iterated in creation order
    cars: BTreeMap<CarId, SimCar>,

    signals: SignalController,

    spawn_queue: SpawnQueue,

    /// Next ID to assign
    next_id: usize,

    cars_created: usize,
    passed_cars: usize,
    steps: u32,
    crashes: u32,

    rng: StdRng,
}

impl SimWorld {
    /// Create a world for `config`, rejecting out-of-range parameters
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let spawn_queue =
            SpawnQueue::build(config.goal_cars, config.effective_distribution(), &mut rng);

        Ok(Self {
            signals: SignalController::new(config.pattern),
            config,
            cars: BTreeMap::new(),
            spawn_queue,
            next_id: 0,
            cars_created: 0,
            passed_cars: 0,
            steps: 0,
            crashes: 0,
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pattern(&self) -> SignalPattern {
        self.signals.pattern()
    }

    pub fn signals(&self) -> &SignalController {
        &self.signals
    }

    pub fn lights(&self) -> &LightTable {
        self.signals.lights()
    }

    pub fn spawn_queue(&self) -> &SpawnQueue {
        &self.spawn_queue
    }

    /// Active cars in creation order
    pub fn cars(&self) -> impl Iterator<Item = &SimCar> {
        self.cars.values()
    }

    pub fn car(&self, id: CarId) -> Option<&SimCar> {
        self.cars.get(&id)
    }

    pub fn car_at(&self, position: Position) -> Option<&SimCar> {
        self.cars.values().find(|car| car.position == position)
    }

    pub fn stats(&self) -> SimStats {
        SimStats {
            total_cars_spawned: self.cars_created,
            total_cars_completed: self.passed_cars,
            active_cars: self.cars.len(),
            steps: self.steps,
            crashes: self.crashes,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finish_reason().is_some()
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        if self.crashes > 0 && !self.config.ignore_crashes {
            Some(FinishReason::Crash)
        } else if self.passed_cars >= self.config.goal_cars {
            Some(FinishReason::GoalReached)
        } else if self.steps >= MAX_STEPS {
            Some(FinishReason::StepLimit)
        } else {
            None
        }
    }

    /// Make one spawn attempt per allowed concurrent car before the first tick
    pub fn prime(&mut self) {
        for _ in 0..self.config.concurrent_cars {
            self.spawn_car();
        }
    }

    /// Advance the simulation by one step
    ///
    /// Returns false without touching any state once the run has finished.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        self.steps += 1;
        self.update_cars();

        if self.cars.len() < self.config.concurrent_cars && self.rng.random_bool(SPAWN_CHANCE) {
            self.spawn_car();
        }

        if let Some(phase) = self.signals.advance() {
            debug!("Step {}: lights now {:?}", self.steps, phase.kind);
        }
        true
    }

    /// Move remaining cars with the lights frozen and no new spawns
    ///
    /// Does not count towards the step limit. Returns the number of cars that
    /// left the grid.
    pub fn drain_step(&mut self) -> usize {
        self.update_cars()
    }

    /// Resolve one tick of motion and remove cars that left the grid
    fn update_cars(&mut self) -> usize {
        let intended = self.intended_moves();
        let resolved = self.resolve_conflicts(intended);

        for (id, target) in resolved {
            if let Some(car) = self.cars.get_mut(&id) {
                car.stopped = target == car.position;
                car.position = target;
                if car.try_turn() {
                    debug!("Car {} turned {}", id.0, car.direction.name());
                }
            }
        }

        let before = self.cars.len();
        self.cars.retain(|_, car| car.position.in_bounds());
        let exited = before - self.cars.len();
        self.passed_cars += exited;
        exited
    }

    /// Where every car wants to be after this tick
    fn intended_moves(&self) -> Vec<(CarId, Position)> {
        let occupied: HashSet<Position> = self.cars.values().map(|car| car.position).collect();

        self.cars
            .values()
            .map(|car| {
                let next = car.next_cell();
                let buffer = car.position.step(car.direction, 2);
                let car_ahead = occupied.contains(&next) || occupied.contains(&buffer);
                let held_by_light = car.at_stop_line() && !self.signals.permits(car.approach());

                if car_ahead || held_by_light {
                    (car.id, car.position)
                } else {
                    (car.id, next)
                }
            })
            .collect()
    }

    /// First come, first served: a later car aiming at a claimed cell stays put
    fn resolve_conflicts(&mut self, intended: Vec<(CarId, Position)>) -> Vec<(CarId, Position)> {
        let mut claimed: HashSet<Position> = HashSet::new();
        let mut resolved = Vec::with_capacity(intended.len());

        for (id, target) in intended {
            let Some(current) = self.cars.get(&id).map(|car| car.position) else {
                continue;
            };

            if target == current {
                resolved.push((id, current));
            } else if claimed.insert(target) {
                resolved.push((id, target));
            } else {
                self.crashes += 1;
                warn!(
                    "Step {}: car {} collided at ({}, {})",
                    self.steps, id.0, target.x, target.y
                );
                resolved.push((id, current));
            }
        }

        resolved
    }

    /// Try to put the next queued car on the grid
    ///
    /// If its entry cell is taken the queue is reshuffled and nothing is
    /// consumed, so a later attempt will likely try another direction.
    pub fn spawn_car(&mut self) -> Option<CarId> {
        if self.cars_created >= self.config.goal_cars
            || self.cars.len() >= self.config.concurrent_cars
        {
            return None;
        }
        let direction = self.spawn_queue.peek()?;

        let entry = Position::spawn_point(direction);
        if self.car_at(entry).is_some() {
            debug!(
                "Entry for {} traffic is blocked, reshuffling spawn queue",
                direction.name()
            );
            self.spawn_queue.reshuffle(&mut self.rng);
            return None;
        }

        self.spawn_queue.pop();
        let turn_ratio = self.config.effective_left_turn_ratio();
        let movement = if turn_ratio > 0.0 && self.rng.random_bool(turn_ratio) {
            Movement::Left
        } else {
            Movement::Straight
        };
        let id = self.next_car_id();
        self.cars.insert(id, SimCar::spawn(id, direction, movement));
        self.cars_created += 1;
        debug!(
            "Spawned car {} heading {} ({:?})",
            id.0,
            direction.name(),
            movement
        );
        Some(id)
    }

    /// Place a car directly, outside the spawn queue
    ///
    /// Used to script scenarios. The car counts against the concurrent limit
    /// but not against the goal. Returns `None` if the cell is off the grid or
    /// taken, or the limit is reached.
    pub fn place_car(
        &mut self,
        direction: Direction,
        movement: Movement,
        position: Position,
    ) -> Option<CarId> {
        if !position.in_bounds()
            || self.cars.len() >= self.config.concurrent_cars
            || self.car_at(position).is_some()
        {
            return None;
        }
        let id = self.next_car_id();
        self.cars
            .insert(id, SimCar::at(id, direction, movement, position));
        Some(id)
    }

    fn next_car_id(&mut self) -> CarId {
        let id = CarId(self.next_id);
        self.next_id += 1;
        id
    }

    /// One-line status for display
    pub fn summary(&self) -> String {
        format!(
            "Step: {} | Cars Started: {}/{} | Cars Finished: {}/{} | Crashes: {}",
            self.steps,
            self.cars_created,
            self.config.goal_cars,
            self.passed_cars,
            self.config.goal_cars,
            self.crashes
        )
    }
}
