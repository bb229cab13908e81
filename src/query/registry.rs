//! Operation codes and the code-string registry the parser dispatches on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompareCode {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater than or equal.
    Ge,
    /// Less than or equal.
    Le,
}

impl CompareCode {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Le => "LE",
        }
    }
}

/// Arithmetic codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MathCode {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Pow,
}

impl MathCode {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Pow => "POW",
        }
    }
}

/// Logical combinator codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalCode {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

impl LogicalCode {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Aggregate codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateCode {
    /// Maximum over the operand signal.
    Max,
    /// Minimum over the operand signal.
    Min,
    /// Arithmetic mean over the operand signal.
    Avg,
}

impl AggregateCode {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Avg => "AVG",
        }
    }
}

/// Trend codes: where a transition sits relative to a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendCode {
    /// Transition completes before the window.
    Before,
    /// Transition completes after the window.
    After,
    /// Level holds through the window.
    Hold,
}

impl TrendCode {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Hold => "HOLD",
        }
    }
}

impl fmt::Display for CompareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MathCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AggregateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TrendCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node kind an operation code resolves to, carrying the parsed code where
/// one kind covers several spellings.
#[derive(Clone, Copy, Debug)]
pub(crate) enum OpKind {
    Compare(CompareCode),
    Math(MathCode),
    Abs,
    Logical(LogicalCode),
    Count,
    Aggregate(AggregateCode),
    Jump,
    Trend(TrendCode),
    Duration,
    Select,
    Judge,
    Declare,
}

/// Resolve an operation code to its node kind. Adding an operation means
/// adding an arm here plus the variant it constructs.
pub(crate) fn lookup(code: &str) -> Option<OpKind> {
    let kind = match code {
        "EQ" => OpKind::Compare(CompareCode::Eq),
        "NE" => OpKind::Compare(CompareCode::Ne),
        "GT" => OpKind::Compare(CompareCode::Gt),
        "LT" => OpKind::Compare(CompareCode::Lt),
        "GE" => OpKind::Compare(CompareCode::Ge),
        "LE" => OpKind::Compare(CompareCode::Le),
        "ADD" => OpKind::Math(MathCode::Add),
        "SUB" => OpKind::Math(MathCode::Sub),
        "MUL" => OpKind::Math(MathCode::Mul),
        "DIV" => OpKind::Math(MathCode::Div),
        "POW" => OpKind::Math(MathCode::Pow),
        "ABS" => OpKind::Abs,
        "AND" => OpKind::Logical(LogicalCode::And),
        "OR" => OpKind::Logical(LogicalCode::Or),
        "COUNT" => OpKind::Count,
        "MAX" => OpKind::Aggregate(AggregateCode::Max),
        "MIN" => OpKind::Aggregate(AggregateCode::Min),
        "AVG" => OpKind::Aggregate(AggregateCode::Avg),
        "JUMP" => OpKind::Jump,
        "BEFORE" => OpKind::Trend(TrendCode::Before),
        "AFTER" => OpKind::Trend(TrendCode::After),
        "HOLD" => OpKind::Trend(TrendCode::Hold),
        "DURATION" => OpKind::Duration,
        "SELECT" => OpKind::Select,
        "JUDGE" => OpKind::Judge,
        "DECLARE" => OpKind::Declare,
        _ => return None,
    };
    Some(kind)
}
