use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

/// The single fixed source of gravity. Immutable for the whole session.
#[derive(Clone, Copy, Debug)]
pub struct Attractor {
    pub pos: Vec2,
    /// Mass in kilograms.
    pub mass: f64,
    /// Screen-space radius used only for collision testing.
    pub radius: f64,
}

/// A movable point mass owned by the world's registry.
///
/// Position is in screen units, velocity in screen units per tick.
#[derive(Clone, Copy, Debug)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Mass in kilograms. Invariant: mass > 0.
    pub mass: f64,
}

/// Per-tick copy of a ship's renderable state.
#[derive(Clone, Copy, Debug)]
pub struct ShipSnapshot {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Decoded input event consumed by the world. The UI layer translates raw
/// terminal events into these; the core never touches input devices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    PrimaryClickAt(Vec2),
    PointerMovedTo(Vec2),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub active: usize,
    pub spawned: u64,
    pub escaped: u64,
    pub crashed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    White,
    Cyan,
    Blue,
    Yellow,
    Red,
    Gray,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod vec2_new {
        use super::*;

        #[test]
        fn creates_vector_with_given_coordinates() {
            let v = Vec2::new(3.0, 4.0);
            assert_eq!(v.x, 3.0);
            assert_eq!(v.y, 4.0);
        }

        #[test]
        fn zero_constant_is_origin() {
            assert_eq!(Vec2::ZERO.x, 0.0);
            assert_eq!(Vec2::ZERO.y, 0.0);
        }
    }

    mod vec2_length {
        use super::*;

        #[test]
        fn calculates_length_squared() {
            let v = Vec2::new(3.0, 4.0);
            assert_eq!(v.length_sq(), 25.0);
        }

        #[test]
        fn calculates_length() {
            let v = Vec2::new(3.0, 4.0);
            assert_eq!(v.length(), 5.0);
        }

        #[test]
        fn zero_vector_has_zero_length() {
            assert_eq!(Vec2::ZERO.length(), 0.0);
        }
    }

    mod vec2_distance {
        use super::*;

        #[test]
        fn measures_distance_between_points() {
            let a = Vec2::new(1.0, 1.0);
            let b = Vec2::new(4.0, 5.0);
            assert_eq!(a.distance(b), 5.0);
        }

        #[test]
        fn distance_is_symmetric() {
            let a = Vec2::new(-2.0, 7.0);
            let b = Vec2::new(3.0, -5.0);
            assert_eq!(a.distance(b), b.distance(a));
        }
    }

    mod vec2_dot {
        use super::*;

        #[test]
        fn calculates_dot_product() {
            let a = Vec2::new(2.0, 3.0);
            let b = Vec2::new(4.0, 5.0);
            assert_eq!(a.dot(b), 23.0);
        }

        #[test]
        fn perpendicular_vectors_have_zero_dot_product() {
            let a = Vec2::new(1.0, 0.0);
            let b = Vec2::new(0.0, 1.0);
            assert_eq!(a.dot(b), 0.0);
        }
    }

    mod vec2_ops {
        use super::*;

        #[test]
        fn adds_two_vectors() {
            let c = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
            assert_eq!(c, Vec2::new(4.0, 6.0));
        }

        #[test]
        fn add_assign_modifies_in_place() {
            let mut a = Vec2::new(1.0, 2.0);
            a += Vec2::new(3.0, 4.0);
            assert_eq!(a, Vec2::new(4.0, 6.0));
        }

        #[test]
        fn subtracts_two_vectors() {
            let c = Vec2::new(5.0, 7.0) - Vec2::new(2.0, 3.0);
            assert_eq!(c, Vec2::new(3.0, 4.0));
        }

        #[test]
        fn multiplies_vector_by_scalar_on_either_side() {
            let v = Vec2::new(2.0, 3.0);
            assert_eq!(v * 2.0, Vec2::new(4.0, 6.0));
            assert_eq!(2.0 * v, Vec2::new(4.0, 6.0));
        }
    }
}
