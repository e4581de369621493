//! Forward-mode automatic differentiation via dual numbers.
//!
//! A dual number `Dual { val, dot }` carries a value and its derivative with
//! respect to one seeded input. Evaluating a tree with one leaf parameter
//! seeded through [`Dual::var`] yields the partial derivative of the output
//! with respect to that parameter.

use super::traits::Numeric;
use crate::types::Scalar;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dual {
    /// Primal value.
    pub val: f64,
    /// Tangent.
    pub dot: f64,
}

impl Dual {
    /// Constant (derivative = 0).
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self { val, dot: 0.0 }
    }

    /// Independent variable (derivative = 1).
    #[inline]
    pub fn var(val: f64) -> Self {
        Self { val, dot: 1.0 }
    }

    #[inline]
    pub fn new(val: f64, dot: f64) -> Self {
        Self { val, dot }
    }
}

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { val: self.val + rhs.val, dot: self.dot + rhs.dot }
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { val: self.val - rhs.val, dot: self.dot - rhs.dot }
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self { val: self.val * rhs.val, dot: self.dot * rhs.val + self.val * rhs.dot }
    }
}

impl Div for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            val: self.val / rhs.val,
            dot: (self.dot * rhs.val - self.val * rhs.dot) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { val: -self.val, dot: -self.dot }
    }
}

impl Numeric for Dual {
    const BATCH_SIZE: usize = 32;
    const NAME: &'static str = "Dual";

    #[inline]
    fn from_scalar(value: Scalar) -> Self {
        Self::constant(value)
    }

    /// d/dx exp(x) = exp(x).
    #[inline]
    fn exp(self) -> Self {
        let e = self.val.exp();
        Self { val: e, dot: self.dot * e }
    }

    /// d/dx ln(x) = 1/x.
    #[inline]
    fn ln(self) -> Self {
        Self { val: self.val.ln(), dot: self.dot / self.val }
    }

    #[inline]
    fn sin(self) -> Self {
        Self { val: self.val.sin(), dot: self.dot * self.val.cos() }
    }

    #[inline]
    fn cos(self) -> Self {
        Self { val: self.val.cos(), dot: -self.dot * self.val.sin() }
    }

    /// d/dx tan(x) = 1 + tan(x)^2.
    #[inline]
    fn tan(self) -> Self {
        let t = self.val.tan();
        Self { val: t, dot: self.dot * (1.0 + t * t) }
    }

    /// d/dx sqrt(x) = 1/(2*sqrt(x)).
    #[inline]
    fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self { val: s, dot: self.dot / (2.0 * s) }
    }

    /// d/dx cbrt(x) = 1/(3*cbrt(x)^2).
    #[inline]
    fn cbrt(self) -> Self {
        let c = self.val.cbrt();
        Self { val: c, dot: self.dot / (3.0 * c * c) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_rule() {
        // d/dx (x * x) at 3 = 6
        let x = Dual::var(3.0);
        let y = x * x;
        assert_eq!(y.val, 9.0);
        assert_eq!(y.dot, 6.0);
    }

    #[test]
    fn test_quotient_rule() {
        // d/dx (1 / x) at 2 = -0.25
        let y = Dual::constant(1.0) / Dual::var(2.0);
        assert_eq!(y.val, 0.5);
        assert_eq!(y.dot, -0.25);
    }

    #[test]
    fn test_chain_rule_through_functions() {
        let x = Dual::var(0.5);
        let y = Numeric::sin(x).exp();
        let expected = 0.5f64.sin().exp() * 0.5f64.cos();
        assert!((y.dot - expected).abs() < 1e-12);

        let s = Numeric::sqrt(Dual::var(4.0));
        assert_eq!(s.dot, 0.25);
    }
}
