//! Structured criteria predicates.
//!
//! A [`Criteria`] renders to the textual criteria language the registry
//! consumes (`[IsCancelled] = True`, `[Total] > 100 And [Status] Is Null`).
//! Raw strings are passed through untouched, so both forms can be handed to
//! the same builder call.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    /// Pre-rendered criteria text.
    Raw(String),
    Compare {
        property: String,
        op: CompareOp,
        value: CriteriaValue,
    },
    IsNull(String),
    Not(Box<Criteria>),
    And(Vec<Criteria>),
    Or(Vec<Criteria>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CriteriaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaValue::Bool(true) => write!(f, "True"),
            CriteriaValue::Bool(false) => write!(f, "False"),
            CriteriaValue::Int(value) => write!(f, "{value}"),
            CriteriaValue::Float(value) => write!(f, "{value}"),
            CriteriaValue::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
        }
    }
}

impl From<bool> for CriteriaValue {
    fn from(value: bool) -> Self {
        CriteriaValue::Bool(value)
    }
}

impl From<i32> for CriteriaValue {
    fn from(value: i32) -> Self {
        CriteriaValue::Int(value.into())
    }
}

impl From<i64> for CriteriaValue {
    fn from(value: i64) -> Self {
        CriteriaValue::Int(value)
    }
}

impl From<f64> for CriteriaValue {
    fn from(value: f64) -> Self {
        CriteriaValue::Float(value)
    }
}

impl From<&str> for CriteriaValue {
    fn from(value: &str) -> Self {
        CriteriaValue::Text(value.to_string())
    }
}

impl From<String> for CriteriaValue {
    fn from(value: String) -> Self {
        CriteriaValue::Text(value)
    }
}

impl Criteria {
    pub fn raw(text: impl Into<String>) -> Self {
        Criteria::Raw(text.into())
    }

    pub fn compare(property: impl Into<String>, op: CompareOp, value: impl Into<CriteriaValue>) -> Self {
        Criteria::Compare {
            property: property.into(),
            op,
            value: value.into(),
        }
    }

    pub fn equals(property: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        Self::compare(property, CompareOp::Eq, value)
    }

    pub fn not_equals(property: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        Self::compare(property, CompareOp::Ne, value)
    }

    pub fn greater_than(property: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        Self::compare(property, CompareOp::Gt, value)
    }

    pub fn less_than(property: impl Into<String>, value: impl Into<CriteriaValue>) -> Self {
        Self::compare(property, CompareOp::Lt, value)
    }

    pub fn is_null(property: impl Into<String>) -> Self {
        Criteria::IsNull(property.into())
    }

    pub fn negate(self) -> Self {
        Criteria::Not(Box::new(self))
    }

    /// Conjunction; nested `And`s are flattened.
    pub fn and(self, other: Criteria) -> Self {
        match self {
            Criteria::And(mut operands) => {
                operands.push(other);
                Criteria::And(operands)
            }
            first => Criteria::And(vec![first, other]),
        }
    }

    /// Disjunction; nested `Or`s are flattened.
    pub fn or(self, other: Criteria) -> Self {
        match self {
            Criteria::Or(mut operands) => {
                operands.push(other);
                Criteria::Or(operands)
            }
            first => Criteria::Or(vec![first, other]),
        }
    }

    /// Operands that need parentheses inside an `And`/`Or`. Raw text may
    /// carry its own operators.
    fn is_group(&self) -> bool {
        matches!(self, Criteria::And(_) | Criteria::Or(_) | Criteria::Raw(_))
    }

    fn write_group(f: &mut fmt::Formatter<'_>, operands: &[Criteria], joiner: &str) -> fmt::Result {
        for (i, operand) in operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {joiner} ")?;
            }
            if operand.is_group() {
                write!(f, "({operand})")?;
            } else {
                write!(f, "{operand}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Raw(text) => write!(f, "{text}"),
            Criteria::Compare { property, op, value } => write!(f, "[{property}] {op} {value}"),
            Criteria::IsNull(property) => write!(f, "[{property}] Is Null"),
            Criteria::Not(inner) => write!(f, "Not ({inner})"),
            Criteria::And(operands) => Self::write_group(f, operands, "And"),
            Criteria::Or(operands) => Self::write_group(f, operands, "Or"),
        }
    }
}

impl From<&str> for Criteria {
    fn from(text: &str) -> Self {
        Criteria::Raw(text.to_string())
    }
}

impl From<String> for Criteria {
    fn from(text: String) -> Self {
        Criteria::Raw(text)
    }
}
