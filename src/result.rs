use std::time::Duration;

use crate::error::QueryError;
use crate::value::{Value, type_name};

/// A thin typed-accessor wrapper over an arbitrary query result.
///
/// Accessors return [`QueryError::WrongType`] when the wrapped value does
/// not have the requested shape. Integer accessors truncate the underlying
/// double, mirroring how the decoder normalizes every number.
///
/// # Examples
///
/// ```
/// use dotquery::{Query, QueryResult};
///
/// let mut q = Query::new();
/// let v = q.json(r#"{"name":"tom","age":27}"#).find("age");
/// let age = QueryResult::new(v).i64().unwrap();
/// assert_eq!(age, 27);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    value: Value,
}

impl QueryResult {
    pub fn new(value: Value) -> Self {
        QueryResult { value }
    }

    /// Whether the query produced any result at all.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Borrow the wrapped value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn wrong_type(&self) -> QueryError {
        QueryError::WrongType(type_name(&self.value))
    }

    pub fn bool(&self) -> Result<bool, QueryError> {
        match &self.value {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.wrong_type()),
        }
    }

    pub fn string(&self) -> Result<String, QueryError> {
        match &self.value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(self.wrong_type()),
        }
    }

    pub fn f64(&self) -> Result<f64, QueryError> {
        match &self.value {
            Value::Number(n) => Ok(*n),
            _ => Err(self.wrong_type()),
        }
    }

    pub fn i64(&self) -> Result<i64, QueryError> {
        self.f64().map(|n| n as i64)
    }

    pub fn u64(&self) -> Result<u64, QueryError> {
        self.f64().map(|n| n as u64)
    }

    /// Read the value as a duration. A number counts nanoseconds; a string
    /// is parsed as a compound of `value+unit` terms over
    /// `ns`/`us`/`µs`/`ms`/`s`/`m`/`h` (`"1h30m"`, `"250ms"`); a bare
    /// numeric string counts nanoseconds.
    pub fn duration(&self) -> Result<Duration, QueryError> {
        match &self.value {
            Value::Number(n) => nanos_to_duration(*n).ok_or_else(|| self.wrong_type()),
            Value::String(s) => {
                parse_duration(s).map_err(|_| QueryError::WrongType("duration string"))
            }
            _ => Err(self.wrong_type()),
        }
    }

    fn elements(&self) -> Result<&[Value], QueryError> {
        match &self.value {
            Value::Array(arr) => Ok(arr),
            _ => Err(self.wrong_type()),
        }
    }

    /// The boolean elements of an array result; other elements are skipped.
    pub fn bool_slice(&self) -> Result<Vec<bool>, QueryError> {
        Ok(self
            .elements()?
            .iter()
            .filter_map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect())
    }

    /// The string elements of an array result; other elements are skipped.
    pub fn string_slice(&self) -> Result<Vec<String>, QueryError> {
        Ok(self
            .elements()?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }

    /// The numeric elements of an array result; other elements are skipped.
    pub fn f64_slice(&self) -> Result<Vec<f64>, QueryError> {
        Ok(self.elements()?.iter().filter_map(Value::as_f64).collect())
    }

    pub fn i64_slice(&self) -> Result<Vec<i64>, QueryError> {
        Ok(self
            .f64_slice()?
            .into_iter()
            .map(|n| n as i64)
            .collect())
    }

    pub fn u64_slice(&self) -> Result<Vec<u64>, QueryError> {
        Ok(self
            .f64_slice()?
            .into_iter()
            .map(|n| n as u64)
            .collect())
    }

    /// The duration elements of an array result, numbers counted as
    /// nanoseconds and strings parsed as duration expressions. A
    /// malformed string element fails the whole call.
    pub fn duration_slice(&self) -> Result<Vec<Duration>, QueryError> {
        let mut out = Vec::new();
        for v in self.elements()? {
            match v {
                Value::Number(n) => {
                    if let Some(d) = nanos_to_duration(*n) {
                        out.push(d);
                    }
                }
                Value::String(s) => {
                    out.push(
                        parse_duration(s).map_err(|_| QueryError::WrongType("duration string"))?,
                    );
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

impl From<Value> for QueryResult {
    fn from(value: Value) -> Self {
        QueryResult::new(value)
    }
}

fn nanos_to_duration(n: f64) -> Option<Duration> {
    if n < 0.0 || !n.is_finite() {
        return None;
    }
    Some(Duration::from_nanos(n as u64))
}

/// Parse a compound duration expression such as `"1h30m"` or `"250ms"`.
/// A bare numeric string is read as nanoseconds.
fn parse_duration(s: &str) -> Result<Duration, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Err(());
    }
    if let Ok(n) = s.parse::<f64>() {
        return nanos_to_duration(n).ok_or(());
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let split = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or(())?;
        if split == 0 {
            return Err(());
        }
        let number: f64 = rest[..split].parse().map_err(|_| ())?;
        rest = &rest[split..];

        let (unit_nanos, unit_len) = if rest.starts_with("ns") {
            (1.0, 2)
        } else if rest.starts_with("us") {
            (1e3, 2)
        } else if rest.starts_with("µs") {
            (1e3, "µs".len())
        } else if rest.starts_with("ms") {
            (1e6, 2)
        } else if rest.starts_with('s') {
            (1e9, 1)
        } else if rest.starts_with('m') {
            (60.0 * 1e9, 1)
        } else if rest.starts_with('h') {
            (3600.0 * 1e9, 1)
        } else {
            return Err(());
        };
        rest = &rest[unit_len..];
        total += nanos_to_duration(number * unit_nanos).ok_or(())?;
    }
    Ok(total)
}
