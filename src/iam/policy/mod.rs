//! Policy domain: the statement data model, builders and the evaluator.

pub mod builder;
pub mod evaluation;
pub mod model;
pub mod requests;

pub use evaluation::{evaluate_statements, Decision};
pub use model::{Policy, Statement, EFFECT_ALLOW, EFFECT_DENY};
pub use requests::{AddPolicyRequest, UpdatePolicyRequest};
