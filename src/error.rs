use thiserror::Error;

/// Errors recorded on a query session.
///
/// Nothing in the fluent surface panics or returns `Result`: every fallible
/// step appends one of these to the session's error log and substitutes a
/// safe placeholder (null, zero, empty array, unchanged state) so the chain
/// stays well-formed. Callers inspect the log afterwards via
/// [`Query::last_error`](crate::Query::last_error) and
/// [`Query::errors`](crate::Query::errors).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Malformed input handed to the decoder
    #[error("decode failed: {0}")]
    Decode(String),

    /// Reading a file or stream failed
    #[error("read failed: {0}")]
    Read(String),

    /// A path segment named a key the current node does not have
    #[error("invalid node name {0}")]
    InvalidNode(String),

    /// A path segment looked like an index but was not one, e.g. `[x]`
    #[error("invalid index segment {0}")]
    InvalidIndex(String),

    /// An index segment pointed outside the array bounds
    #[error("index [{index}] out of range, array has {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// An index segment was applied to a value that is not an array
    #[error("cannot index [{index}] into {found}")]
    NotASequence { index: usize, found: &'static str },

    /// A filter referenced an operator missing from the registry
    #[error("invalid operator {0}")]
    UnknownOperator(String),

    /// Operator registration clashed with an existing name
    #[error("{0} is already registered in the operator registry")]
    OperatorExists(String),

    /// A predicate was given a field or operand of the wrong type
    #[error("{value} must be {expected}")]
    PredicateType {
        value: String,
        expected: &'static str,
    },

    /// A chain method was called with the wrong number of arguments
    #[error("{0}")]
    Arity(String),

    /// nth was given zero or a position outside the list
    #[error("{0}")]
    Position(String),

    /// An aggregation was used with an incompatible shape
    #[error("{0}")]
    Aggregate(String),

    /// group_by, distinct or select referenced a property that matched nothing
    #[error("invalid property name {0}")]
    InvalidProperty(String),

    /// A typed accessor was called on an incompatible result value
    #[error("wrong method call for {0}")]
    WrongType(&'static str),

    /// An invalid configuration value was supplied at construction
    #[error("{0}")]
    Config(String),
}
