//! Running aggregates behind report and group variables.

use crate::value::Value;
use folio_model::Calculation;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Accumulates values for one `Calculation` between resets.
#[derive(Debug, Clone)]
pub struct Accumulator {
    calculation: Calculation,
    count: i64,
    numeric_count: i64,
    sum: Option<Decimal>,
    samples: Vec<Decimal>,
    distinct: HashSet<String>,
    lowest: Option<Value>,
    highest: Option<Value>,
    first: Option<Value>,
    all_integer: bool,
}

impl Accumulator {
    pub fn new(calculation: Calculation) -> Self {
        Self {
            calculation,
            count: 0,
            numeric_count: 0,
            sum: Some(Decimal::ZERO),
            samples: Vec::new(),
            distinct: HashSet::new(),
            lowest: None,
            highest: None,
            first: None,
            all_integer: true,
        }
    }

    pub fn calculation(&self) -> Calculation {
        self.calculation
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.calculation);
    }

    /// Folds one value in. Nulls are ignored by every calculation, and
    /// non-numeric values by the numeric ones.
    pub fn add(&mut self, value: &Value) {
        if value.is_null() {
            return;
        }
        self.count += 1;
        if self.first.is_none() {
            self.first = Some(value.clone());
        }
        if matches!(self.calculation, Calculation::DistinctCount) {
            self.distinct.insert(value.text());
        }
        if self.lowest.as_ref().is_none_or(|low| value.compare(low) == Some(Ordering::Less)) {
            self.lowest = Some(value.clone());
        }
        if self.highest.as_ref().is_none_or(|high| value.compare(high) == Some(Ordering::Greater)) {
            self.highest = Some(value.clone());
        }
        let number = match value {
            Value::Integer(i) => Some(Decimal::from(*i)),
            Value::Decimal(d) => {
                self.all_integer = false;
                Some(*d)
            }
            _ => None,
        };
        if let Some(number) = number {
            self.numeric_count += 1;
            self.sum = self.sum.and_then(|sum| sum.checked_add(number));
            if matches!(self.calculation, Calculation::Variance | Calculation::StandardDeviation) {
                self.samples.push(number);
            }
        }
    }

    /// The current aggregate. Empty numeric aggregates are `Null`.
    pub fn value(&self) -> Value {
        match self.calculation {
            Calculation::None => self.first.clone().unwrap_or_default(),
            Calculation::Count => Value::Integer(self.count),
            Calculation::DistinctCount => Value::Integer(self.distinct.len() as i64),
            Calculation::First => self.first.clone().unwrap_or_default(),
            Calculation::Lowest => self.lowest.clone().unwrap_or_default(),
            Calculation::Highest => self.highest.clone().unwrap_or_default(),
            Calculation::Sum => {
                if self.numeric_count == 0 {
                    return Value::Null;
                }
                let Some(sum) = self.overflow_checked(self.sum) else {
                    return Value::Null;
                };
                if self.all_integer {
                    sum.to_i64().map_or(Value::Decimal(sum), Value::Integer)
                } else {
                    Value::Decimal(sum)
                }
            }
            Calculation::Average => {
                if self.numeric_count == 0 {
                    return Value::Null;
                }
                let average = self.sum.and_then(|sum| sum.checked_div(Decimal::from(self.numeric_count)));
                self.overflow_checked(average).map_or(Value::Null, Value::Decimal)
            }
            Calculation::Variance => self.overflow_checked(self.variance()).map_or(Value::Null, Value::Decimal),
            Calculation::StandardDeviation => self
                .overflow_checked(self.variance())
                .map_or(Value::Null, |variance| Value::Decimal(variance.sqrt().unwrap_or(Decimal::ZERO))),
        }
    }

    /// Passes `result` through, logging when the aggregate overflowed.
    fn overflow_checked(&self, result: Option<Decimal>) -> Option<Decimal> {
        if result.is_none() {
            log::warn!("{} aggregate overflowed over {} values; reporting null", self.calculation, self.numeric_count);
        }
        result
    }

    /// Sample variance; zero with fewer than two samples and `None` when
    /// the squares overflow.
    fn variance(&self) -> Option<Decimal> {
        let n = self.samples.len();
        if n < 2 {
            return Some(Decimal::ZERO);
        }
        let mean = self.sum?.checked_div(Decimal::from(n))?;
        let squares = self.samples.iter().try_fold(Decimal::ZERO, |total, x| {
            let deviation = x.checked_sub(mean)?;
            total.checked_add(deviation.checked_mul(deviation)?)
        })?;
        squares.checked_div(Decimal::from(n - 1))
    }
}
