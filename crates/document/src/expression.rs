//! Typed expressions evaluated by the rendering collaborator at fill time.
//!
//! Expressions are built as values, never as source strings, so a
//! malformed literal is caught while the design is assembled rather than
//! when the collaborator compiles it.

use crate::format::format_value;
use crate::value::Value;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Reference to undeclared field '{0}'")]
    UnknownField(String),
    #[error("Reference to undeclared parameter '{0}'")]
    UnknownParameter(String),
    #[error("Reference to undeclared variable '{0}'")]
    UnknownVariable(String),
    #[error("Type error: {0}")]
    TypeError(String),
}

/// Resolves names during evaluation.
pub trait Scope {
    fn field(&self, name: &str) -> Option<Value>;
    fn parameter(&self, name: &str) -> Option<Value>;
    fn variable(&self, name: &str) -> Option<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

/// Whether operands compare as numbers or as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareMode {
    Numeric,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
}

/// A name read by an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Field(String),
    Parameter(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expression {
    Literal { value: Value },
    Field { name: String },
    Parameter { name: String },
    Variable { name: String },
    Compare {
        op: CompareOp,
        mode: CompareMode,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Contains { haystack: Box<Expression>, needle: Box<Expression> },
    And { operands: Vec<Expression> },
    Or { operands: Vec<Expression> },
    Not { operand: Box<Expression> },
    Modulo { operand: Box<Expression>, divisor: i64 },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `part / whole * 100` rounded to two decimals; `0` when `whole` is null or zero.
    Percent { part: Box<Expression>, whole: Box<Expression> },
    Concat { parts: Vec<Expression> },
    /// `text` repeated `count` times; negative counts repeat zero times.
    Repeat { text: String, count: Box<Expression> },
    Format { value: Box<Expression>, pattern: String },
    Conditional {
        when: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
}

impl Expression {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal { value: value.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Expression::Literal { value: Value::Text(text.into()) }
    }

    pub fn always_false() -> Self {
        Expression::literal(false)
    }

    pub fn field(name: impl Into<String>) -> Self {
        Expression::Field { name: name.into() }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter { name: name.into() }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable { name: name.into() }
    }

    pub fn compare(op: CompareOp, mode: CompareMode, left: Expression, right: Expression) -> Self {
        Expression::Compare { op, mode, left: Box::new(left), right: Box::new(right) }
    }

    /// Text equality, the common `kind == "Header"` predicate.
    pub fn text_equals(left: Expression, right: impl Into<String>) -> Self {
        Self::compare(CompareOp::Eq, CompareMode::Text, left, Expression::text(right))
    }

    pub fn numeric_equals(left: Expression, right: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Eq, CompareMode::Numeric, left, Expression::literal(right))
    }

    pub fn contains(haystack: Expression, needle: Expression) -> Self {
        Expression::Contains { haystack: Box::new(haystack), needle: Box::new(needle) }
    }

    pub fn and(operands: Vec<Expression>) -> Self {
        Expression::And { operands }
    }

    pub fn or(operands: Vec<Expression>) -> Self {
        Expression::Or { operands }
    }

    pub fn not(operand: Expression) -> Self {
        Expression::Not { operand: Box::new(operand) }
    }

    pub fn modulo(operand: Expression, divisor: i64) -> Self {
        Expression::Modulo { operand: Box::new(operand), divisor }
    }

    pub fn arithmetic(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Expression::Arithmetic { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn percent(part: Expression, whole: Expression) -> Self {
        Expression::Percent { part: Box::new(part), whole: Box::new(whole) }
    }

    pub fn concat(parts: Vec<Expression>) -> Self {
        Expression::Concat { parts }
    }

    pub fn repeat(text: impl Into<String>, count: Expression) -> Self {
        Expression::Repeat { text: text.into(), count: Box::new(count) }
    }

    pub fn format(value: Expression, pattern: impl Into<String>) -> Self {
        Expression::Format { value: Box::new(value), pattern: pattern.into() }
    }

    pub fn conditional(when: Expression, then: Expression, otherwise: Expression) -> Self {
        Expression::Conditional {
            when: Box::new(when),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn evaluate(&self, scope: &dyn Scope) -> Result<Value, ExpressionError> {
        match self {
            Expression::Literal { value } => Ok(value.clone()),
            Expression::Field { name } => scope
                .field(name)
                .ok_or_else(|| ExpressionError::UnknownField(name.clone())),
            Expression::Parameter { name } => scope
                .parameter(name)
                .ok_or_else(|| ExpressionError::UnknownParameter(name.clone())),
            Expression::Variable { name } => scope
                .variable(name)
                .ok_or_else(|| ExpressionError::UnknownVariable(name.clone())),
            Expression::Compare { op, mode, left, right } => {
                let left = left.evaluate(scope)?;
                let right = right.evaluate(scope)?;
                Ok(Value::Boolean(compare(*op, *mode, &left, &right)))
            }
            Expression::Contains { haystack, needle } => {
                let haystack = haystack.evaluate(scope)?;
                let needle = needle.evaluate(scope)?;
                if haystack.is_null() {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(haystack.text().contains(&needle.text())))
            }
            Expression::And { operands } => {
                for operand in operands {
                    if !operand.evaluate_bool(scope)? {
                        return Ok(Value::Boolean(false));
                    }
                }
                Ok(Value::Boolean(true))
            }
            Expression::Or { operands } => {
                for operand in operands {
                    if operand.evaluate_bool(scope)? {
                        return Ok(Value::Boolean(true));
                    }
                }
                Ok(Value::Boolean(false))
            }
            Expression::Not { operand } => Ok(Value::Boolean(!operand.evaluate_bool(scope)?)),
            Expression::Modulo { operand, divisor } => {
                if *divisor == 0 {
                    return Err(ExpressionError::TypeError("modulo by zero".to_string()));
                }
                let value = operand.evaluate(scope)?;
                let n = value.as_i64().ok_or_else(|| {
                    ExpressionError::TypeError(format!("modulo of non-integer '{}'", value.text()))
                })?;
                Ok(Value::Integer(n.rem_euclid(*divisor)))
            }
            Expression::Arithmetic { op, left, right } => {
                let left = left.evaluate(scope)?;
                let right = right.evaluate(scope)?;
                Ok(arithmetic(*op, &left, &right))
            }
            Expression::Percent { part, whole } => {
                let part = part.evaluate(scope)?.as_decimal().unwrap_or(Decimal::ZERO);
                let whole = whole.evaluate(scope)?.as_decimal().unwrap_or(Decimal::ZERO);
                Ok(Value::Decimal(percent_of(part, whole)))
            }
            Expression::Concat { parts } => {
                let mut out = String::new();
                for part in parts {
                    let value = part.evaluate(scope)?;
                    if !value.is_null() {
                        out.push_str(&value.text());
                    }
                }
                Ok(Value::Text(out))
            }
            Expression::Repeat { text, count } => {
                let value = count.evaluate(scope)?;
                let n = value.as_i64().ok_or_else(|| {
                    ExpressionError::TypeError(format!("repeat count '{}' is not an integer", value.text()))
                })?;
                Ok(Value::Text(text.repeat(n.max(0) as usize)))
            }
            Expression::Format { value, pattern } => {
                let value = value.evaluate(scope)?;
                Ok(Value::Text(format_value(&value, Some(pattern.as_str()))))
            }
            Expression::Conditional { when, then, otherwise } => {
                if when.evaluate_bool(scope)? {
                    then.evaluate(scope)
                } else {
                    otherwise.evaluate(scope)
                }
            }
        }
    }

    /// Evaluates a predicate. `Null` counts as false.
    pub fn evaluate_bool(&self, scope: &dyn Scope) -> Result<bool, ExpressionError> {
        match self.evaluate(scope)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(ExpressionError::TypeError(format!(
                "expected a boolean, got '{}'",
                other.text()
            ))),
        }
    }

    /// Every field, parameter and variable name this expression reads.
    pub fn references(&self) -> Vec<Reference> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, refs: &mut Vec<Reference>) {
        match self {
            Expression::Literal { .. } => {}
            Expression::Field { name } => refs.push(Reference::Field(name.clone())),
            Expression::Parameter { name } => refs.push(Reference::Parameter(name.clone())),
            Expression::Variable { name } => refs.push(Reference::Variable(name.clone())),
            Expression::Compare { left, right, .. }
            | Expression::Arithmetic { left, right, .. }
            | Expression::Contains { haystack: left, needle: right }
            | Expression::Percent { part: left, whole: right } => {
                left.collect_references(refs);
                right.collect_references(refs);
            }
            Expression::And { operands } | Expression::Or { operands } | Expression::Concat { parts: operands } => {
                for operand in operands {
                    operand.collect_references(refs);
                }
            }
            Expression::Not { operand }
            | Expression::Modulo { operand, .. }
            | Expression::Repeat { count: operand, .. }
            | Expression::Format { value: operand, .. } => operand.collect_references(refs),
            Expression::Conditional { when, then, otherwise } => {
                when.collect_references(refs);
                then.collect_references(refs);
                otherwise.collect_references(refs);
            }
        }
    }
}

/// Compares two values. A numeric comparison involving a non-numeric
/// operand is false rather than an error.
pub fn compare(op: CompareOp, mode: CompareMode, left: &Value, right: &Value) -> bool {
    let ordering = match mode {
        CompareMode::Numeric => match (left.as_decimal(), right.as_decimal()) {
            (Some(l), Some(r)) => l.cmp(&r),
            _ => return false,
        },
        CompareMode::Text => {
            if left.is_null() || right.is_null() {
                return match op {
                    CompareOp::Eq => left.is_null() && right.is_null(),
                    CompareOp::Ne => left.is_null() != right.is_null(),
                    _ => false,
                };
            }
            left.text().cmp(&right.text())
        }
    };
    match op {
        CompareOp::Eq => ordering.is_eq(),
        CompareOp::Ne => ordering.is_ne(),
        CompareOp::Gt => ordering.is_gt(),
        CompareOp::Lt => ordering.is_lt(),
        CompareOp::Ge => ordering.is_ge(),
        CompareOp::Le => ordering.is_le(),
    }
}

fn arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> Value {
    if let (Value::Integer(l), Value::Integer(r)) = (left, right) {
        let result = match op {
            ArithmeticOp::Add => l.checked_add(*r),
            ArithmeticOp::Subtract => l.checked_sub(*r),
            ArithmeticOp::Multiply => l.checked_mul(*r),
        };
        if let Some(result) = result {
            return Value::Integer(result);
        }
    }
    let (Some(l), Some(r)) = (left.as_decimal(), right.as_decimal()) else {
        return Value::Null;
    };
    let result = match op {
        ArithmeticOp::Add => l.checked_add(r),
        ArithmeticOp::Subtract => l.checked_sub(r),
        ArithmeticOp::Multiply => l.checked_mul(r),
    };
    result.map_or(Value::Null, Value::Decimal)
}

/// `part / whole * 100`, rounded half away from zero to two decimals.
/// A zero `whole` yields zero, and so does a ratio too large to represent.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole).and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)) {
        Some(percent) => percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        None => {
            log::warn!("{} as a percentage of {} overflows; using 0", part, whole);
            Decimal::ZERO
        }
    }
}
