/*
 * Vector Module
 *
 * A small 2D value type used for every spatial quantity in the simulation.
 * All arithmetic returns a new value. Division only goes through `divide`,
 * which refuses a zero divisor so no infinity can reach a boid position.
 */

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    // Zero-magnitude input yields the zero vector rather than NaN
    #[inline]
    pub fn unit(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Self::ZERO
        } else {
            self.scale(1.0 / magnitude)
        }
    }

    #[inline]
    pub fn scale(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide(self, scalar: f32) -> SimResult<Self> {
        if scalar == 0.0 {
            return Err(SimError::DivideByZero);
        }
        Ok(Self::new(self.x / scalar, self.y / scalar))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, scalar: f32) -> Vector2 {
        self.scale(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(Vector2::ZERO.unit(), Vector2::ZERO);
        assert_eq!(Vector2::new(-0.0, 0.0).unit().magnitude(), 0.0);
    }

    #[test]
    fn unit_has_length_one() {
        let samples = [
            Vector2::new(3.0, 4.0),
            Vector2::new(-0.001, 0.002),
            Vector2::new(700.0, -12.5),
            Vector2::new(0.0, -9.0),
        ];
        for v in samples {
            let u = v.unit();
            assert!((u.magnitude() - 1.0).abs() < 1e-6, "{v:?} -> {u:?}");
        }
        assert_eq!(Vector2::new(3.0, 4.0).unit(), Vector2::new(0.6, 0.8));
    }

    #[test]
    fn divide_rejects_zero() {
        let v = Vector2::new(1.0, 2.0);
        assert!(matches!(v.divide(0.0), Err(SimError::DivideByZero)));
        assert_eq!(v.divide(2.0).unwrap(), Vector2::new(0.5, 1.0));
    }

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(0.5, -1.0);
        assert_eq!(a + b, Vector2::new(1.5, 1.0));
        assert_eq!(a - b, Vector2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(a, Vector2::new(1.0, 2.0));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }
}
