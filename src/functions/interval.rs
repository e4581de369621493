//! Closed interval arithmetic for bounding the output range of a tree.

use super::traits::Numeric;
use crate::types::Scalar;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(!(lo > hi), "inverted interval [{}, {}]", lo, hi);
        Self { lo, hi }
    }

    pub fn point(v: f64) -> Self {
        Self { lo: v, hi: v }
    }

    pub fn entire() -> Self {
        Self { lo: f64::NEG_INFINITY, hi: f64::INFINITY }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    fn hull(values: [f64; 4]) -> Self {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { lo, hi }
    }

    fn monotone(self, f: impl Fn(f64) -> f64) -> Self {
        Self { lo: f(self.lo), hi: f(self.hi) }
    }

    /// True if `offset + k * period` lies inside the interval for some integer k.
    fn hits(&self, offset: f64, period: f64) -> bool {
        let k = ((self.lo - offset) / period).ceil();
        offset + k * period <= self.hi
    }
}

impl Add for Interval {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { lo: self.lo + rhs.lo, hi: self.hi + rhs.hi }
    }
}

impl Sub for Interval {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { lo: self.lo - rhs.hi, hi: self.hi - rhs.lo }
    }
}

impl Mul for Interval {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::hull([
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ])
    }
}

impl Div for Interval {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        if rhs.contains(0.0) {
            return Self::entire();
        }
        Self::hull([
            self.lo / rhs.lo,
            self.lo / rhs.hi,
            self.hi / rhs.lo,
            self.hi / rhs.hi,
        ])
    }
}

impl Neg for Interval {
    type Output = Self;
    fn neg(self) -> Self {
        Self { lo: -self.hi, hi: -self.lo }
    }
}

impl Numeric for Interval {
    const BATCH_SIZE: usize = 32;
    const NAME: &'static str = "Interval";

    fn from_scalar(value: Scalar) -> Self {
        Self::point(value)
    }

    fn exp(self) -> Self {
        self.monotone(f64::exp)
    }

    fn ln(self) -> Self {
        self.monotone(f64::ln)
    }

    fn sin(self) -> Self {
        if self.width() >= TAU {
            return Self::new(-1.0, 1.0);
        }
        let (a, b) = (self.lo.sin(), self.hi.sin());
        let hi = if self.hits(FRAC_PI_2, TAU) { 1.0 } else { a.max(b) };
        let lo = if self.hits(-FRAC_PI_2, TAU) { -1.0 } else { a.min(b) };
        Self { lo, hi }
    }

    fn cos(self) -> Self {
        Self { lo: self.lo + FRAC_PI_2, hi: self.hi + FRAC_PI_2 }.sin()
    }

    fn tan(self) -> Self {
        if self.width() >= PI || self.hits(FRAC_PI_2, PI) {
            return Self::entire();
        }
        self.monotone(f64::tan)
    }

    fn sqrt(self) -> Self {
        self.monotone(f64::sqrt)
    }

    fn cbrt(self) -> Self {
        self.monotone(f64::cbrt)
    }

    fn square(self) -> Self {
        let (a, b) = (self.lo * self.lo, self.hi * self.hi);
        if self.contains(0.0) {
            Self { lo: 0.0, hi: a.max(b) }
        } else {
            Self { lo: a.min(b), hi: a.max(b) }
        }
    }
}
