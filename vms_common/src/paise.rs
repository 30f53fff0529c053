use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------       Paise         ---------------------------------------------------------
/// An amount of money in paise (one hundredth of a rupee).
///
/// All balances, prices and transaction amounts are stored and manipulated in paise. The rupee-float representation
/// only exists at the JSON boundary.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Paise {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Paise {}

impl TryFrom<f64> for Paise {
    type Error = PaiseConversionError;

    fn try_from(rupees: f64) -> Result<Self, Self::Error> {
        if !rupees.is_finite() {
            return Err(PaiseConversionError(format!("{rupees} is not a finite amount")));
        }
        let paise = (rupees * 100.0).round();
        if paise.abs() > i64::MAX as f64 {
            return Err(PaiseConversionError(format!("{rupees} rupees overflows the paise range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(paise as i64))
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:0.2}", self.as_rupees())
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    pub fn as_rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::Paise;

    #[test]
    fn arithmetic() {
        let a = Paise::from_rupees(100);
        let b = Paise::from(4_000);
        assert_eq!(a - b, Paise::from_rupees(60));
        assert_eq!(a + b, Paise::from(14_000));
        assert_eq!(b * 3, Paise::from_rupees(120));
        assert_eq!(-b, Paise::from(-4_000));
        let mut c = a;
        c -= b;
        assert_eq!(c, Paise::from(6_000));
    }

    #[test]
    fn rupee_conversions() {
        assert_eq!(Paise::try_from(40.00).unwrap(), Paise::from(4_000));
        assert_eq!(Paise::try_from(0.01).unwrap(), Paise::from(1));
        assert_eq!(Paise::try_from(99.999).unwrap(), Paise::from(10_000));
        assert!(Paise::try_from(f64::NAN).is_err());
        assert!(Paise::try_from(f64::INFINITY).is_err());
        assert_eq!(Paise::from(4_000).as_rupees(), 40.0);
    }

    #[test]
    fn display_is_rupees() {
        assert_eq!(Paise::from(4_000).to_string(), "₹40.00");
        assert_eq!(Paise::from(5).to_string(), "₹0.05");
    }

    #[test]
    fn sums() {
        let total: Paise = [1_000, 2_000, 3_000].into_iter().map(Paise::from).sum();
        assert_eq!(total, Paise::from(6_000));
    }
}
