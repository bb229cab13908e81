//! ruletree builds typed operation trees for telemetry rule queries.
//!
//! A rule arrives as a nested JSON value — comparisons, arithmetic, logical
//! combinators, counters, aggregates, trend/duration checks, jumps, selects,
//! judgements, and named declarations. This crate materializes it as an
//! owned [`OpNode`] tree and supports three transformations:
//!
//! - [`OpNode::set_input`] fills designated `"default"` placeholders with
//!   caller-supplied sub-expressions
//! - [`OpNode::replace_variable`] substitutes named variables with bound
//!   sub-trees
//! - [`OpNode::build_query`] serializes the tree back into the nested form
//!   for an external evaluator
//!
//! Evaluation itself, transport, and storage are out of scope. Both rewrites
//! consume the tree and return the new root; the returned value is always
//! the authoritative tree.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod query;

pub use crate::error::{RuleTreeError, RuleTreeResult};
pub use crate::query::{
    AggregateCode, CompareCode, DEFAULT_VARIABLE, LogicalCode, MathCode, OpNode, TrendCode, parse,
    parse_str,
};
