use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::QueryError;
use crate::value::Value;

pub const OP_EQ: &str = "=";
pub const OP_EQ_ENG: &str = "eq";
pub const OP_NOT_EQ: &str = "!=";
pub const OP_NOT_EQ_ENG: &str = "neq";
pub const OP_NOT_EQ_OTHER: &str = "<>";
pub const OP_GT: &str = ">";
pub const OP_GT_ENG: &str = "gt";
pub const OP_LT: &str = "<";
pub const OP_LT_ENG: &str = "lt";
pub const OP_GTE: &str = ">=";
pub const OP_GTE_ENG: &str = "gte";
pub const OP_LTE: &str = "<=";
pub const OP_LTE_ENG: &str = "lte";

pub const OP_STRICT_CONTAINS: &str = "strictContains";
pub const OP_CONTAINS: &str = "contains";
pub const OP_STARTS_WITH: &str = "startsWith";
pub const OP_ENDS_WITH: &str = "endsWith";
pub const OP_MATCHES: &str = "matches";
pub const OP_IN: &str = "in";
pub const OP_NOT_IN: &str = "notIn";

pub const OP_LEN_EQ: &str = "leneq";
pub const OP_LEN_NOT_EQ: &str = "lenneq";
pub const OP_LEN_GT: &str = "lengt";
pub const OP_LEN_GTE: &str = "lengte";
pub const OP_LEN_LT: &str = "lenlt";
pub const OP_LEN_LTE: &str = "lenlte";

/// A binary predicate: `(field value, operand) -> matched?`.
///
/// An `Err` marks a caller or schema mistake (for example a string operator
/// applied to a number); the session records it and treats the predicate as
/// not matched.
pub type PredicateFn = Arc<dyn Fn(&Value, &Value) -> Result<bool, QueryError> + Send + Sync>;

/// Named predicate table consulted by the filter plan.
///
/// Every session owns its registry, seeded with the default operator set, so
/// custom registrations never leak between sessions.
#[derive(Clone)]
pub struct Registry {
    table: HashMap<String, PredicateFn>,
}

impl Registry {
    /// Build a registry holding the default operator set.
    pub fn with_defaults() -> Self {
        let mut r = Registry {
            table: HashMap::new(),
        };
        let mut put = |name: &str, f: fn(&Value, &Value) -> Result<bool, QueryError>| {
            r.table.insert(name.to_string(), Arc::new(f));
        };

        put(OP_EQ, eq);
        put(OP_EQ_ENG, eq);
        put(OP_NOT_EQ, neq);
        put(OP_NOT_EQ_ENG, neq);
        put(OP_NOT_EQ_OTHER, neq);

        put(OP_GT, gt);
        put(OP_GT_ENG, gt);
        put(OP_LT, lt);
        put(OP_LT_ENG, lt);
        put(OP_GTE, gte);
        put(OP_GTE_ENG, gte);
        put(OP_LTE, lte);
        put(OP_LTE_ENG, lte);

        put(OP_STRICT_CONTAINS, strict_contains);
        put(OP_CONTAINS, contains);
        put(OP_STARTS_WITH, starts_with);
        put(OP_ENDS_WITH, ends_with);
        put(OP_MATCHES, matches);

        put(OP_IN, in_set);
        put(OP_NOT_IN, not_in_set);

        put(OP_LEN_EQ, len_eq);
        put(OP_LEN_NOT_EQ, len_neq);
        put(OP_LEN_GT, len_gt);
        put(OP_LEN_GTE, len_gte);
        put(OP_LEN_LT, len_lt);
        put(OP_LEN_LTE, len_lte);

        r
    }

    pub fn get(&self, operator: &str) -> Option<&PredicateFn> {
        self.table.get(operator)
    }

    /// Register a custom predicate. A name that is already taken is refused
    /// and the existing entry is left untouched.
    pub fn register<F>(&mut self, operator: &str, f: F) -> Result<(), QueryError>
    where
        F: Fn(&Value, &Value) -> Result<bool, QueryError> + Send + Sync + 'static,
    {
        if self.table.contains_key(operator) {
            return Err(QueryError::OperatorExists(operator.to_string()));
        }
        self.table.insert(operator.to_string(), Arc::new(f));
        Ok(())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("operators", &names).finish()
    }
}

/// Deep structural equality. Numeric operands are already normalized to
/// double precision by the `Value` conversions, so integer literals compare
/// correctly against decoded numbers.
fn eq(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x == y)
}

fn neq(x: &Value, y: &Value) -> Result<bool, QueryError> {
    eq(x, y).map(|b| !b)
}

// Ordering comparisons require a numeric field. A non-numeric operand is a
// data-shape mismatch and compares false; a non-numeric field is a caller
// mistake and errors.
fn numeric_field(x: &Value) -> Result<f64, QueryError> {
    x.as_f64().ok_or_else(|| QueryError::PredicateType {
        value: x.render(),
        expected: "numeric",
    })
}

fn gt(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let xv = numeric_field(x)?;
    Ok(y.as_f64().is_some_and(|yv| xv > yv))
}

fn lt(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let xv = numeric_field(x)?;
    Ok(y.as_f64().is_some_and(|yv| xv < yv))
}

fn gte(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let xv = numeric_field(x)?;
    Ok(y.as_f64().is_some_and(|yv| xv >= yv))
}

fn lte(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let xv = numeric_field(x)?;
    Ok(y.as_f64().is_some_and(|yv| xv <= yv))
}

fn string_pair<'a>(x: &'a Value, y: &'a Value) -> Result<(&'a str, &'a str), QueryError> {
    let xv = x.as_str().ok_or_else(|| QueryError::PredicateType {
        value: x.render(),
        expected: "string",
    })?;
    let yv = y.as_str().ok_or_else(|| QueryError::PredicateType {
        value: y.render(),
        expected: "string",
    })?;
    Ok((xv, yv))
}

/// Case-sensitive substring search
fn strict_contains(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let (xv, yv) = string_pair(x, y)?;
    Ok(xv.contains(yv))
}

/// Case-insensitive substring search
fn contains(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let (xv, yv) = string_pair(x, y)?;
    Ok(xv.to_lowercase().contains(&yv.to_lowercase()))
}

fn starts_with(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let (xv, yv) = string_pair(x, y)?;
    Ok(xv.starts_with(yv))
}

fn ends_with(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let (xv, yv) = string_pair(x, y)?;
    Ok(xv.ends_with(yv))
}

/// Regex match. The operand is the pattern; a non-string field simply does
/// not match, while an invalid pattern is a caller mistake.
fn matches(x: &Value, y: &Value) -> Result<bool, QueryError> {
    let pattern = y.as_str().ok_or_else(|| QueryError::PredicateType {
        value: y.render(),
        expected: "string",
    })?;
    let re = regex::Regex::new(pattern).map_err(|e| QueryError::PredicateType {
        value: format!("invalid regex: {e}"),
        expected: "a valid pattern",
    })?;
    match x {
        Value::String(s) => Ok(re.is_match(s)),
        _ => Ok(false),
    }
}

/// Membership: the operand is an array of strings or numbers; elements are
/// compared with the equality rules. Any other operand shape matches nothing.
fn in_set(x: &Value, y: &Value) -> Result<bool, QueryError> {
    if let Value::Array(items) = y {
        for item in items {
            if eq(x, item)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn not_in_set(x: &Value, y: &Value) -> Result<bool, QueryError> {
    in_set(x, y).map(|b| !b)
}

// Length comparisons: the operand must be an integer, the field must have a
// length (string, array or object).
fn integer_operand(y: &Value) -> Result<usize, QueryError> {
    match y.as_f64() {
        Some(n) if n.fract() == 0.0 && n >= 0.0 => Ok(n as usize),
        _ => Err(QueryError::PredicateType {
            value: y.render(),
            expected: "integer",
        }),
    }
}

fn len_eq(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? == integer_operand(y)?)
}

fn len_neq(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? != integer_operand(y)?)
}

fn len_gt(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? > integer_operand(y)?)
}

fn len_gte(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? >= integer_operand(y)?)
}

fn len_lt(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? < integer_operand(y)?)
}

fn len_lte(x: &Value, y: &Value) -> Result<bool, QueryError> {
    Ok(x.length()? <= integer_operand(y)?)
}
