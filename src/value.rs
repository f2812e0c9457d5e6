use indexmap::IndexMap;

use crate::error::QueryError;

/// A decoded JSON value as seen by the query engine.
///
/// This type represents all valid JSON types. Unlike formats that keep
/// integers and floats apart, every number is normalized to double precision
/// at decode time, mirroring what a standard JSON-to-dynamic-value decoder
/// produces. Object keys keep their insertion order.
///
/// # Examples
///
/// ```
/// use dotquery::Value;
/// use indexmap::IndexMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Bool(true);
/// let number = Value::Number(42.0);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]);
///
/// let mut obj = IndexMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Bool(bool),

    /// JSON number, always double precision
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys, insertion order preserved
    Object(IndexMap<String, Value>),
}

/// Returns a human-readable type name for a Value
pub fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Value {
    /// Numeric coercion used by comparisons and aggregates. Only `Number`
    /// values are numeric; strings, booleans and collections are not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Length of a value: character count for strings, element count for
    /// arrays, key count for objects. Anything else has no length.
    pub fn length(&self) -> Result<usize, QueryError> {
        match self {
            Value::String(s) => Ok(s.chars().count()),
            Value::Array(arr) => Ok(arr.len()),
            Value::Object(obj) => Ok(obj.len()),
            _ => Err(QueryError::PredicateType {
                value: self.render(),
                expected: "string, array or object",
            }),
        }
    }

    /// Bucket-key formatting used by group_by and distinct. Numbers use
    /// their natural decimal form, so `10.0` becomes `"10"`.
    pub fn to_key_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => crate::output::to_json(other),
        }
    }

    /// Short rendering for error messages
    pub(crate) fn render(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => crate::output::to_json(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
