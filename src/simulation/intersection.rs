//! Signal lights and the phase-timing state machine for the intersection

use super::types::{Approach, Axis, Movement};

/// State of one signal head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Light {
    Green,
    GreenArrow,
    Yellow,
    Red,
}

impl Light {
    /// Whether a car waiting at the stop line may enter the box
    pub fn is_go(self) -> bool {
        matches!(self, Light::Green | Light::GreenArrow)
    }
}

/// The light shown to every approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightTable {
    lights: [Light; Approach::COUNT],
}

impl Default for LightTable {
    fn default() -> Self {
        Self::all_red()
    }
}

impl LightTable {
    pub fn all_red() -> Self {
        Self {
            lights: [Light::Red; Approach::COUNT],
        }
    }

    pub fn get(&self, approach: Approach) -> Light {
        self.lights[approach.index()]
    }

    pub fn set(&mut self, approach: Approach, light: Light) {
        self.lights[approach.index()] = light;
    }

    /// Set both lanes of every approach on `axis`
    fn set_axis(&mut self, axis: Axis, movement: Option<Movement>, light: Light) {
        for approach in Approach::all() {
            if approach.direction.axis() == axis
                && movement.map_or(true, |movement| movement == approach.movement)
            {
                self.set(approach, light);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Approach, Light)> + '_ {
        Approach::all().map(|approach| (approach, self.get(approach)))
    }
}

/// Which timing plan the intersection runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalPattern {
    /// Two-phase plan; turning cars share the straight green
    #[default]
    Simple,
    /// Each axis gets a protected left arrow before its straight green
    ProtectedLeft,
}

impl SignalPattern {
    /// The phases of one full cycle, in order
    pub fn phases(self) -> Vec<Phase> {
        use PhaseKind::*;
        match self {
            SignalPattern::Simple => vec![
                Phase::new(Green(Axis::NorthSouth), 10),
                Phase::new(Yellow(Axis::NorthSouth), 3),
                Phase::new(AllRed, 2),
                Phase::new(Green(Axis::EastWest), 10),
                Phase::new(Yellow(Axis::EastWest), 3),
                Phase::new(AllRed, 2),
            ],
            SignalPattern::ProtectedLeft => vec![
                Phase::new(LeftArrow(Axis::NorthSouth), 5),
                Phase::new(Green(Axis::NorthSouth), 8),
                Phase::new(Yellow(Axis::NorthSouth), 3),
                Phase::new(AllRed, 2),
                Phase::new(LeftArrow(Axis::EastWest), 5),
                Phase::new(Green(Axis::EastWest), 8),
                Phase::new(Yellow(Axis::EastWest), 3),
                Phase::new(AllRed, 2),
            ],
        }
    }

    pub fn has_protected_left(self) -> bool {
        self == SignalPattern::ProtectedLeft
    }

    pub fn name(self) -> &'static str {
        match self {
            SignalPattern::Simple => "SimpleIntersection",
            SignalPattern::ProtectedLeft => "ProtectedLeftTurn",
        }
    }

    /// Light table for a phase under this pattern
    pub fn lights_for(self, kind: PhaseKind) -> LightTable {
        let mut table = LightTable::all_red();
        // Under the simple plan the turn head mirrors the straight light.
        let lanes = match self {
            SignalPattern::Simple => None,
            SignalPattern::ProtectedLeft => Some(Movement::Straight),
        };
        match kind {
            PhaseKind::LeftArrow(axis) => {
                table.set_axis(axis, Some(Movement::Left), Light::GreenArrow)
            }
            PhaseKind::Green(axis) => table.set_axis(axis, lanes, Light::Green),
            PhaseKind::Yellow(axis) => table.set_axis(axis, lanes, Light::Yellow),
            PhaseKind::AllRed => {}
        }
        table
    }
}

/// What the lights show during a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    LeftArrow(Axis),
    Green(Axis),
    Yellow(Axis),
    AllRed,
}

/// A fixed light configuration held for a number of ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub kind: PhaseKind,
    pub duration: u32,
}

impl Phase {
    pub fn new(kind: PhaseKind, duration: u32) -> Self {
        Self { kind, duration }
    }
}

/// Drives the phase cycle of a signal pattern one tick at a time
#[derive(Debug, Clone)]
pub struct SignalController {
    pattern: SignalPattern,
    phases: Vec<Phase>,
    current: usize,
    /// Ticks already spent in the current phase
    elapsed: u32,
    lights: LightTable,
    /// Completed cycles
    cycles: u32,
}

impl SignalController {
    pub fn new(pattern: SignalPattern) -> Self {
        let phases = pattern.phases();
        let lights = pattern.lights_for(phases[0].kind);
        Self {
            pattern,
            phases,
            current: 0,
            elapsed: 0,
            lights,
            cycles: 0,
        }
    }

    pub fn pattern(&self) -> SignalPattern {
        self.pattern
    }

    pub fn lights(&self) -> &LightTable {
        &self.lights
    }

    pub fn light(&self, approach: Approach) -> Light {
        self.lights.get(approach)
    }

    /// Whether the light for `approach` lets a waiting car enter the box
    pub fn permits(&self, approach: Approach) -> bool {
        self.light(approach).is_go()
    }

    pub fn current_phase(&self) -> Phase {
        self.phases[self.current]
    }

    pub fn phase_index(&self) -> usize {
        self.current
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Ticks left before the lights change
    pub fn ticks_remaining(&self) -> u32 {
        self.current_phase().duration - self.elapsed
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Count one tick spent in the current phase
    ///
    /// Returns the new phase when this tick closed the previous one.
    pub fn advance(&mut self) -> Option<Phase> {
        self.elapsed += 1;
        if self.elapsed < self.current_phase().duration {
            return None;
        }

        self.elapsed = 0;
        self.current += 1;
        if self.current == self.phases.len() {
            self.current = 0;
            self.cycles += 1;
        }
        let phase = self.current_phase();
        self.lights = self.pattern.lights_for(phase.kind);
        Some(phase)
    }

    /// Whether two orthogonal approaches currently both have a go light
    pub fn has_conflict(&self) -> bool {
        let go = |axis: Axis| {
            self.lights
                .iter()
                .any(|(approach, light)| approach.direction.axis() == axis && light.is_go())
        };
        go(Axis::NorthSouth) && go(Axis::EastWest)
    }
}
