//! Money value object (integer cents).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An amount of money in the smallest currency unit (cents).
///
/// Displayed as dollars with two decimals and thousands separators
/// (`$1,234.50`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole dollars, e.g. `Money::from_dollars(24_000)`.
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(self, quantity: u64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Saturating multiply, used where totals are display-only.
    pub fn saturating_mul(self, quantity: u64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let cents = self.0 % 100;

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "${grouped}.{cents:02}")
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses `10`, `10.9`, `10.99`, `$1,234.50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw.strip_prefix('$').unwrap_or(raw).replace(',', "");
        if raw.is_empty() {
            return Err(DomainError::validation("amount cannot be empty"));
        }

        let (whole, frac) = match raw.split_once('.') {
            Some((w, f)) => (w, f),
            None => (raw.as_str(), ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(DomainError::validation(format!("not a money amount: {s:?}")));
        }
        if frac.len() > 2 {
            return Err(DomainError::validation(format!(
                "at most two decimal places allowed: {s:?}"
            )));
        }

        let dollars: u64 = whole
            .parse()
            .map_err(|_| DomainError::validation(format!("amount out of range: {s:?}")))?;
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().unwrap_or(0) * 10,
            _ => frac.parse::<u64>().unwrap_or(0),
        };

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| DomainError::validation(format!("amount out of range: {s:?}")))
    }
}
