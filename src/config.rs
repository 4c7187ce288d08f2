pub const SIM_HZ: f64 = 60.0;
pub const RENDER_HZ: f64 = 30.0;
pub const DT: f64 = 1.0 / SIM_HZ;

pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 600.0;

pub const PLANET_MASS: f64 = 5.972e24;
pub const PLANET_RADIUS: f64 = 50.0;

pub const SHIP_MASS: f64 = 1.0;

pub const GRAVITY_G: f64 = 6.6743e-11;

/// One screen unit corresponds to 1000 km of physical space.
pub const SCREEN_TO_METER: f64 = 1.0e6;

/// Distances below 100 km are clamped before the force law is applied.
pub const MIN_DISTANCE_M: f64 = 1.0e5;

/// Drag distance in screen units divided by this gives the launch velocity.
pub const VEL_SCALE: f64 = 100.0;
