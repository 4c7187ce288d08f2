use crate::{
    config, physics,
    types::{Attractor, InputEvent, Ship, ShipSnapshot, SimStats, Vec2},
};

/// Owns the attractor, the registry of active ships, and the transient
/// launch-gesture state. All mutation happens on the single loop thread:
/// the UI feeds decoded [`InputEvent`]s in and copies snapshots out.
pub struct World {
    attractor: Attractor,
    ships: Vec<Ship>,
    pending_launch: Option<Vec2>,
    pointer: Vec2,
    frame: Vec<ShipSnapshot>,
    stats: SimStats,
}

impl World {
    pub fn new() -> Self {
        Self::with_attractor(Attractor {
            pos: Vec2::new(config::VIEW_WIDTH / 2.0, config::VIEW_HEIGHT / 2.0),
            mass: config::PLANET_MASS,
            radius: config::PLANET_RADIUS,
        })
    }

    pub fn with_attractor(attractor: Attractor) -> Self {
        Self {
            attractor,
            ships: Vec::new(),
            pending_launch: None,
            pointer: Vec2::ZERO,
            frame: Vec::new(),
            stats: SimStats::default(),
        }
    }

    pub fn attractor(&self) -> &Attractor {
        &self.attractor
    }

    /// Feed one decoded input event. `Quit` is the loop's concern and is
    /// ignored here.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PrimaryClickAt(pos) => self.primary_click(pos),
            InputEvent::PointerMovedTo(pos) => self.pointer = pos,
            InputEvent::Quit => {}
        }
    }

    /// Two-state launch gesture: the first click records the launch
    /// position, the second click always completes the launch (there is no
    /// cancel affordance).
    pub fn primary_click(&mut self, pos: Vec2) {
        match self.pending_launch.take() {
            Some(launch) => self.spawn(launch, pos),
            None => self.pending_launch = Some(pos),
        }
    }

    /// Creates a ship at `launch` with velocity derived from the drag
    /// vector: a longer drag means a faster launch.
    pub fn spawn(&mut self, launch: Vec2, release: Vec2) {
        let vel = (release - launch) * (1.0 / config::VEL_SCALE);
        debug_assert!(config::SHIP_MASS > 0.0);
        self.ships.push(Ship {
            pos: launch,
            vel,
            mass: config::SHIP_MASS,
        });
        self.stats.spawned += 1;
        self.stats.active = self.ships.len();
    }

    /// Advances every ship by one fixed timestep, records the renderable
    /// frame, then compacts the registry.
    ///
    /// Every ship sees the same attractor state, so per-ship updates are
    /// order-independent. The frame is captured before removal: a ship's
    /// final out-of-bounds or colliding position is still reported once
    /// before it disappears.
    pub fn tick(&mut self, dt: f64) {
        for ship in &mut self.ships {
            physics::advance(ship, &self.attractor, dt);
        }

        self.frame.clear();
        self.frame.extend(self.ships.iter().map(|s| ShipSnapshot {
            pos: s.pos,
            vel: s.vel,
        }));

        let attractor = self.attractor;
        let mut escaped = 0;
        let mut crashed = 0;
        self.ships.retain(|ship| {
            if ship.pos.distance(attractor.pos) <= attractor.radius {
                crashed += 1;
                return false;
            }
            if Self::off_bounds(ship.pos) {
                escaped += 1;
                return false;
            }
            true
        });
        self.stats.escaped += escaped;
        self.stats.crashed += crashed;
        self.stats.active = self.ships.len();
    }

    fn off_bounds(pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > config::VIEW_WIDTH || pos.y < 0.0 || pos.y > config::VIEW_HEIGHT
    }

    /// Copies the last tick's frame into `out`. Ships removed during that
    /// tick appear here exactly once, at their final position.
    pub fn snapshot(&self, out: &mut Vec<ShipSnapshot>) {
        out.clear();
        out.extend_from_slice(&self.frame);
    }

    /// Endpoints of the drag-in-progress visual, if a launch is pending.
    pub fn pending_line(&self) -> Option<(Vec2, Vec2)> {
        self.pending_launch.map(|launch| (launch, self.pointer))
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }
}
