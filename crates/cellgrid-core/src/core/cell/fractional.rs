use nalgebra::Vector3;
use std::ops::{Add, Sub};

/// Coordinates expressed in fractions of the unit cell axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fractional(pub Vector3<f64>);

impl Fractional {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Moves the coordinates into [0, 1) along every axis.
    pub fn wrap_to_unit(&self) -> Self {
        Self(self.0.map(|v| v - v.floor()))
    }

    /// Moves the coordinates into [-0.5, 0.5] along every axis.
    pub fn wrap_to_zero(&self) -> Self {
        Self(self.0.map(|v| v - v.round()))
    }
}

impl Add<Vector3<f64>> for Fractional {
    type Output = Fractional;

    fn add(self, rhs: Vector3<f64>) -> Fractional {
        Fractional(self.0 + rhs)
    }
}

impl Sub for Fractional {
    type Output = Fractional;

    fn sub(self, rhs: Fractional) -> Fractional {
        Fractional(self.0 - rhs.0)
    }
}
