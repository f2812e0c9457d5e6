use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::decoder::{Decoder, DefaultDecoder};
use crate::error::QueryError;
use crate::output;
use crate::path;
use crate::predicate::{self, Registry};
use crate::sort;
use crate::value::Value;

/// Session configuration, applied at construction.
///
/// Invalid values are not rejected eagerly: construction records a
/// [`QueryError::Config`] on the session and falls back to the default, so
/// the fluent chain stays usable.
#[derive(Clone)]
pub struct Options {
    /// Path segment separator, `.` by default
    pub separator: String,
    /// Fallback values for absent properties during predicate evaluation,
    /// keyed by the full property path
    pub defaults: HashMap<String, Value>,
    /// Raw-bytes-to-tree decoder used by every source loader
    pub decoder: Arc<dyn Decoder>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            separator: ".".to_string(),
            defaults: HashMap::new(),
            decoder: Arc::new(DefaultDecoder),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("separator", &self.separator)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// One filter condition: `(key, operator, operand)`.
#[derive(Debug, Clone)]
struct Criterion {
    key: String,
    operator: String,
    operand: Value,
}

/// A chainable query session over one decoded document.
///
/// A session owns the decoded root, a working value that each stage
/// replaces, an accumulating filter plan (AND-groups combined by OR) and an
/// append-only error log. Chain calls never panic and never return
/// `Result`: failures are recorded on the log and the chain continues on a
/// safe placeholder.
///
/// # Examples
///
/// ```
/// use dotquery::{Query, Value};
///
/// let mut q = Query::new();
/// let names = q
///     .json(r#"{"users":[{"name":"tom","age":27},{"name":"ann","age":31}]}"#)
///     .from("users")
///     .where_("age", ">", 30)
///     .pluck("name");
/// assert_eq!(names, Value::Array(vec![Value::String("ann".into())]));
/// assert!(q.last_error().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    registry: Registry,
    options: Options,
    node: String,
    root: Value,
    current: Value,
    groups: Vec<Vec<Criterion>>,
    group_index: usize,
    attributes: Vec<String>,
    limit_records: Option<usize>,
    distinct_key: Option<String>,
    errors: Vec<QueryError>,
}

impl Default for Query {
    fn default() -> Self {
        Query::new()
    }
}

impl Query {
    /// Create an empty session with the default options and operator set.
    pub fn new() -> Self {
        Query::with_options(Options::default())
    }

    /// Create a session with explicit options. An empty separator is
    /// recorded as a configuration error and replaced by `.`.
    pub fn with_options(mut options: Options) -> Self {
        let mut errors = Vec::new();
        if options.separator.is_empty() {
            errors.push(QueryError::Config(
                "separator can not be empty".to_string(),
            ));
            options.separator = ".".to_string();
        }
        Query {
            registry: Registry::with_defaults(),
            options,
            node: String::new(),
            root: Value::Null,
            current: Value::Null,
            groups: Vec::new(),
            group_index: 0,
            attributes: Vec::new(),
            limit_records: None,
            distinct_key: None,
            errors,
        }
    }

    fn record(&mut self, err: QueryError) {
        self.errors.push(err);
    }

    // ========================================
    // Sources
    // ========================================

    /// Load the document from a JSON string.
    pub fn json(&mut self, content: &str) -> &mut Self {
        self.bytes(content.as_bytes())
    }

    /// Load the document from raw bytes, decoding with the configured
    /// decoder.
    pub fn bytes(&mut self, raw: &[u8]) -> &mut Self {
        match self.options.decoder.decode(raw) {
            Ok(v) => {
                self.root = v.clone();
                self.current = v;
            }
            Err(e) => self.record(e),
        }
        self
    }

    /// Load the document from a file on disk.
    pub fn file<P: AsRef<Path>>(&mut self, filename: P) -> &mut Self {
        match fs::read(filename) {
            Ok(raw) => {
                self.bytes(&raw);
            }
            Err(e) => self.record(QueryError::Read(e.to_string())),
        }
        self
    }

    /// Load the document by draining a reader.
    pub fn reader<R: Read>(&mut self, mut r: R) -> &mut Self {
        let mut buf = Vec::new();
        match r.read_to_end(&mut buf) {
            Ok(_) => {
                self.bytes(&buf);
            }
            Err(e) => self.record(QueryError::Read(e.to_string())),
        }
        self
    }

    // ========================================
    // Navigation
    // ========================================

    /// Scope the working value to the node at `path`, e.g. `"users.[0].name"`.
    /// A failing path records the error and leaves a null placeholder.
    pub fn from(&mut self, node: &str) -> &mut Self {
        self.node = node.to_string();
        match path::lookup(&self.current, node, &self.options.separator) {
            Ok(v) => self.current = v.clone(),
            Err(e) => {
                self.record(e);
                self.current = Value::Null;
            }
        }
        self
    }

    // ========================================
    // Filtering
    // ========================================

    /// Append a condition to the active AND group,
    /// e.g. `where_("name", "contains", "doe")`.
    pub fn where_(&mut self, key: &str, operator: &str, operand: impl Into<Value>) -> &mut Self {
        let criterion = Criterion {
            key: key.to_string(),
            operator: operator.to_string(),
            operand: operand.into(),
        };
        if self.groups.is_empty() {
            self.groups.push(vec![criterion]);
            self.group_index = 0;
        } else {
            self.groups[self.group_index].push(criterion);
        }
        self
    }

    /// Start a new OR group with one condition. Groups combine by OR; the
    /// conditions inside a group by AND.
    pub fn or_where(&mut self, key: &str, operator: &str, operand: impl Into<Value>) -> &mut Self {
        self.groups.push(vec![Criterion {
            key: key.to_string(),
            operator: operator.to_string(),
            operand: operand.into(),
        }]);
        self.group_index = self.groups.len() - 1;
        self
    }

    /// Alias of `where_(key, "=", operand)`
    pub fn where_eq(&mut self, key: &str, operand: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_EQ, operand)
    }

    /// Alias of `where_(key, "!=", operand)`
    pub fn where_ne(&mut self, key: &str, operand: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_NOT_EQ, operand)
    }

    /// Alias of `where_(key, "=", null)`
    pub fn where_nil(&mut self, key: &str) -> &mut Self {
        self.where_(key, predicate::OP_EQ, Value::Null)
    }

    /// Alias of `where_(key, "!=", null)`
    pub fn where_not_nil(&mut self, key: &str) -> &mut Self {
        self.where_(key, predicate::OP_NOT_EQ, Value::Null)
    }

    /// Alias of `where_(key, "in", set)`
    pub fn where_in(&mut self, key: &str, set: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_IN, set)
    }

    /// Alias of `where_(key, "notIn", set)`
    pub fn where_not_in(&mut self, key: &str, set: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_NOT_IN, set)
    }

    /// Alias of `where_(key, "startsWith", prefix)`
    pub fn where_starts_with(&mut self, key: &str, prefix: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_STARTS_WITH, prefix)
    }

    /// Alias of `where_(key, "endsWith", suffix)`
    pub fn where_ends_with(&mut self, key: &str, suffix: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_ENDS_WITH, suffix)
    }

    /// Alias of `where_(key, "contains", needle)` (case-insensitive)
    pub fn where_contains(&mut self, key: &str, needle: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_CONTAINS, needle)
    }

    /// Alias of `where_(key, "strictContains", needle)` (case-sensitive)
    pub fn where_strict_contains(&mut self, key: &str, needle: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_STRICT_CONTAINS, needle)
    }

    /// Alias of `where_(key, "leneq", n)`
    pub fn where_len_eq(&mut self, key: &str, n: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_LEN_EQ, n)
    }

    /// Alias of `where_(key, "lenneq", n)`
    pub fn where_len_ne(&mut self, key: &str, n: impl Into<Value>) -> &mut Self {
        self.where_(key, predicate::OP_LEN_NOT_EQ, n)
    }

    /// Register a custom named predicate for this session. A name that is
    /// already registered records an error and keeps the existing entry.
    pub fn register_operator<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Result<bool, QueryError> + Send + Sync + 'static,
    {
        if let Err(e) = self.registry.register(name, f) {
            self.record(e);
        }
        self
    }

    /// Evaluate the accumulated plan against one record. `Err` is returned
    /// only for an unknown operator, which aborts the whole evaluation;
    /// predicate type mismatches are recorded inline and count as false.
    fn eval_groups(
        &mut self,
        groups: &[Vec<Criterion>],
        record: &Value,
    ) -> Result<bool, QueryError> {
        let mut or_passed = false;
        for group in groups {
            let mut and_passed = true;
            for criterion in group {
                let Some(pred) = self.registry.get(&criterion.operator) else {
                    return Err(QueryError::UnknownOperator(criterion.operator.clone()));
                };
                if !and_passed {
                    continue;
                }
                let pred = Arc::clone(pred);
                let field = path::lookup(record, &criterion.key, &self.options.separator)
                    .ok()
                    .cloned()
                    .or_else(|| self.options.defaults.get(&criterion.key).cloned());
                match field {
                    Some(v) => match (*pred)(&v, &criterion.operand) {
                        Ok(matched) => and_passed = matched,
                        Err(e) => {
                            self.record(e);
                            and_passed = false;
                        }
                    },
                    // a record without the key fails the whole AND group
                    None => and_passed = false,
                }
            }
            or_passed = or_passed || and_passed;
        }
        Ok(or_passed)
    }

    fn apply_filters(&mut self) {
        let groups = std::mem::take(&mut self.groups);
        let current = std::mem::replace(&mut self.current, Value::Null);
        self.current = match current {
            Value::Object(map) => {
                // a single mapping filters as a one-element collection
                let record = Value::Object(map);
                match self.eval_groups(&groups, &record) {
                    Ok(true) => Value::Array(vec![record]),
                    Ok(false) => Value::Array(Vec::new()),
                    Err(e) => {
                        self.record(e);
                        Value::Array(Vec::new())
                    }
                }
            }
            Value::Array(items) => {
                let mut matched = Vec::new();
                let mut aborted = false;
                for item in items {
                    match self.eval_groups(&groups, &item) {
                        Ok(true) => matched.push(item),
                        Ok(false) => {}
                        Err(e) => {
                            self.record(e);
                            aborted = true;
                            break;
                        }
                    }
                }
                if aborted {
                    Value::Array(Vec::new())
                } else {
                    Value::Array(matched)
                }
            }
            other => other,
        };
    }

    /// Run the pending plan against the working value. Filters apply first,
    /// then distinct, then the select projection, then the record limit.
    /// All four are consumed here, which is what makes back-to-back
    /// terminal calls idempotent.
    fn prepare(&mut self) {
        if !self.groups.is_empty() {
            self.apply_filters();
        }
        self.group_index = 0;
        if let Some(key) = self.distinct_key.take() {
            self.apply_distinct(&key);
        }
        if !self.attributes.is_empty() {
            let specs = std::mem::take(&mut self.attributes);
            self.apply_select(&specs);
        }
        if let Some(cap) = self.limit_records.take() {
            if let Value::Array(arr) = &mut self.current {
                arr.truncate(cap);
            }
        }
    }

    fn apply_distinct(&mut self, property: &str) {
        let Value::Array(items) = &self.current else {
            return;
        };
        let had_records = !items.is_empty();
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for item in items {
            if let Value::Object(map) = item {
                if let Some(v) = map.get(property) {
                    if seen.insert(v.to_key_string()) {
                        kept.push(item.clone());
                    }
                }
            }
        }
        if kept.is_empty() && had_records {
            self.record(QueryError::InvalidProperty(property.to_string()));
        }
        self.current = Value::Array(kept);
    }

    fn apply_select(&mut self, specs: &[String]) {
        let Value::Array(items) = &self.current else {
            return;
        };
        let separator = self.options.separator.clone();
        let mut failures = Vec::new();
        let mut projected = Vec::new();
        for item in items {
            if !matches!(item, Value::Object(_)) {
                continue;
            }
            let mut record = IndexMap::new();
            for spec in specs {
                let (node, alias) = path::make_alias(spec, &separator);
                match path::lookup(item, node, &separator) {
                    Ok(v) => {
                        record.insert(alias.to_string(), v.clone());
                    }
                    Err(e) => failures.push(e),
                }
            }
            if !record.is_empty() {
                projected.push(Value::Object(record));
            }
        }
        self.current = Value::Array(projected);
        for e in failures {
            self.record(e);
        }
    }

    // ========================================
    // Shaping
    // ========================================

    /// Bucket records by the stringified value of `property` (nested paths
    /// allowed) into a mapping from bucket key to record list, in
    /// first-seen bucket order. Records lacking the property are excluded;
    /// an entirely empty grouping records an error.
    pub fn group_by(&mut self, property: &str) -> &mut Self {
        self.prepare();
        let separator = self.options.separator.clone();
        if let Value::Array(items) = &self.current {
            let mut buckets: IndexMap<String, Vec<Value>> = IndexMap::new();
            for item in items {
                if !matches!(item, Value::Object(_)) {
                    continue;
                }
                if let Ok(v) = path::lookup(item, property, &separator) {
                    buckets.entry(v.to_key_string()).or_default().push(item.clone());
                }
            }
            let empty = buckets.is_empty();
            self.current = Value::Object(
                buckets
                    .into_iter()
                    .map(|(k, records)| (k, Value::Array(records)))
                    .collect(),
            );
            if empty {
                self.record(QueryError::InvalidProperty(property.to_string()));
            }
        }
        self
    }

    /// Defer deduplication by `property`: at the next terminal call only
    /// the first record per distinct property value survives.
    pub fn distinct(&mut self, property: &str) -> &mut Self {
        self.distinct_key = Some(property.to_string());
        self
    }

    /// Project each record down to exactly the named top-level keys.
    /// Missing keys are skipped; records projecting to nothing are dropped.
    pub fn only(&mut self, properties: &[&str]) -> &mut Self {
        self.prepare();
        if let Value::Array(items) = &self.current {
            let mut result = Vec::new();
            for item in items {
                if let Value::Object(map) = item {
                    let mut record = IndexMap::new();
                    for property in properties {
                        if let Some(v) = map.get(*property) {
                            record.insert(property.to_string(), v.clone());
                        }
                    }
                    if !record.is_empty() {
                        result.push(Value::Object(record));
                    }
                }
            }
            self.current = Value::Array(result);
        }
        self
    }

    /// Defer a projection. Each spec is a (possibly nested) path, with an
    /// optional `"path as alias"` rename; without one the last path segment
    /// becomes the key. Unresolvable paths record errors but keep the rest
    /// of the record.
    pub fn select(&mut self, specs: &[&str]) -> &mut Self {
        self.attributes = specs.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sort a scalar array. Pass no argument for ascending, `"desc"` for
    /// descending; more than one argument is an error. Strings sort before
    /// numbers in the result regardless of direction (see
    /// [`sort::sort_scalars`](crate::sort::sort_scalars)).
    pub fn sort(&mut self, order: &[&str]) -> &mut Self {
        self.prepare();
        if order.len() > 1 {
            self.record(QueryError::Arity(
                "sort accepts only one argument asc/desc".to_string(),
            ));
            return self;
        }
        let ascending = order.first() != Some(&"desc");
        if matches!(self.current, Value::Array(_)) {
            if let Value::Array(items) = std::mem::replace(&mut self.current, Value::Null) {
                self.current = Value::Array(sort::sort_scalars(items, ascending));
            }
        }
        self
    }

    /// Stable-sort an array of records by a (possibly nested) property:
    /// `sort_by(&["price"])` or `sort_by(&["price", "desc"])`. Anything but
    /// one or two arguments is an error. A non-array working value passes
    /// through unchanged.
    pub fn sort_by(&mut self, args: &[&str]) -> &mut Self {
        self.prepare();
        if args.is_empty() {
            self.record(QueryError::Arity(
                "provide at least one argument as property name".to_string(),
            ));
            return self;
        }
        if args.len() > 2 {
            self.record(QueryError::Arity(
                "sort_by accepts only two arguments: property name and asc/desc".to_string(),
            ));
            return self;
        }
        let ascending = args.get(1) != Some(&"desc");
        let key = args[0];
        let separator = self.options.separator.clone();
        let mut unresolved = false;
        if let Value::Array(items) = &mut self.current {
            if !items.is_empty() {
                unresolved = !sort::sort_records(items, key, &separator, ascending);
            }
        }
        if unresolved {
            // records that never resolved the key kept their positions
            self.record(QueryError::InvalidProperty(key.to_string()));
        }
        self
    }

    /// Defer a cap on the number of records in an array result. A
    /// non-positive cap is an error and leaves the limit unset.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        if n <= 0 {
            self.record(QueryError::Arity(
                "limit must be greater than zero".to_string(),
            ));
        } else {
            self.limit_records = Some(n as usize);
        }
        self
    }

    // ========================================
    // Session management
    // ========================================

    /// Restore the working value to the decoded root and drop every pending
    /// plan element. The error log is intentionally kept: it is the audit
    /// trail of the whole session, cleared only by [`clear_errors`](Self::clear_errors).
    pub fn reset(&mut self) -> &mut Self {
        self.current = self.root.clone();
        self.groups.clear();
        self.group_index = 0;
        self.attributes.clear();
        self.limit_records = None;
        self.distinct_key = None;
        self.node.clear();
        self
    }

    /// Drop all recorded errors.
    pub fn clear_errors(&mut self) -> &mut Self {
        self.errors.clear();
        self
    }

    /// The most recent recorded error, if any.
    pub fn last_error(&self) -> Option<&QueryError> {
        self.errors.last()
    }

    /// Every error recorded since the session was created (or last cleared).
    pub fn errors(&self) -> &[QueryError] {
        &self.errors
    }

    /// The last path handed to [`from`](Self::from).
    pub fn node(&self) -> &str {
        &self.node
    }

    // ========================================
    // Terminals
    // ========================================

    /// Run the pending plan and return the result.
    pub fn get(&mut self) -> Value {
        self.prepare();
        self.current.clone()
    }

    /// Scope to `path` and return the result there: `from(path)` + `get()`.
    pub fn find(&mut self, node: &str) -> Value {
        self.from(node).get()
    }

    /// First element of an array result; null for an empty array or a
    /// non-array value.
    pub fn first(&mut self) -> Value {
        self.prepare();
        match &self.current {
            Value::Array(arr) => arr.first().cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Last element of an array result; null for an empty array or a
    /// non-array value.
    pub fn last(&mut self) -> Value {
        self.prepare();
        match &self.current {
            Value::Array(arr) => arr.last().cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// The nth element of an array result, one-based. Negative positions
    /// count from the end (`-1` is the last element). Zero, an empty array
    /// and an out-of-range magnitude record errors and yield null.
    pub fn nth(&mut self, position: i64) -> Value {
        self.prepare();
        let len = match &self.current {
            Value::Array(arr) => arr.len(),
            _ => return Value::Null,
        };
        if position == 0 {
            self.record(QueryError::Position("index is not zero based".to_string()));
            return Value::Null;
        }
        if len == 0 {
            self.record(QueryError::Position("list is empty".to_string()));
            return Value::Null;
        }
        if position.unsigned_abs() as usize > len {
            self.record(QueryError::Position("index out of range".to_string()));
            return Value::Null;
        }
        let index = if position > 0 {
            position as usize - 1
        } else {
            len - position.unsigned_abs() as usize
        };
        match &self.current {
            Value::Array(arr) => arr[index].clone(),
            _ => Value::Null,
        }
    }

    /// Collect `property` from every record of an array result into a flat
    /// array, skipping records that lack it. Replaces the working value.
    pub fn pluck(&mut self, property: &str) -> Value {
        self.prepare();
        let mut plucked = Vec::new();
        if let Value::Array(items) = &self.current {
            for item in items {
                if let Value::Object(map) = item {
                    if let Some(v) = map.get(property) {
                        plucked.push(v.clone());
                    }
                }
            }
        }
        self.current = Value::Array(plucked);
        self.current.clone()
    }

    /// Element count of an array, key count of an object (which covers
    /// grouped results), zero for anything else.
    pub fn count(&mut self) -> usize {
        self.prepare();
        match &self.current {
            Value::Array(arr) => arr.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    // ========================================
    // Aggregation
    // ========================================

    /// Collect the doubles to aggregate over. Three shapes are accepted:
    /// an array of numbers (no property allowed), an array of records (a
    /// property is required and resolved per record) and a single object
    /// (property required). Shape violations record an error and abort the
    /// gather.
    fn gather(&mut self, property: Option<&str>) -> Vec<f64> {
        self.prepare();
        let separator = self.options.separator.clone();
        let current = self.current.clone();
        let mut values = Vec::new();
        match &current {
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Number(n) => {
                            if property.is_some() {
                                self.record(QueryError::Aggregate(
                                    "unnecessary property name for an array of numbers"
                                        .to_string(),
                                ));
                                return Vec::new();
                            }
                            values.push(*n);
                        }
                        Value::Object(_) => {
                            match self.gather_property(item, property, &separator) {
                                Some(n) => values.push(n),
                                None => return Vec::new(),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Value::Object(_) => match self.gather_property(&current, property, &separator) {
                Some(n) => values.push(n),
                None => return Vec::new(),
            },
            _ => {}
        }
        values
    }

    fn gather_property(
        &mut self,
        record: &Value,
        property: Option<&str>,
        separator: &str,
    ) -> Option<f64> {
        let Some(property) = property else {
            self.record(QueryError::Aggregate(
                "property name can not be empty for an object".to_string(),
            ));
            return None;
        };
        match path::lookup(record, property, separator) {
            Ok(v) => match v.as_f64() {
                Some(n) => Some(n),
                None => {
                    self.record(QueryError::Aggregate(format!(
                        "property {property} must be numeric, found {}",
                        v.render()
                    )));
                    None
                }
            },
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    /// Sum of the gathered values; 0.0 when nothing gathers.
    pub fn sum(&mut self, property: Option<&str>) -> f64 {
        self.gather(property).iter().sum()
    }

    /// Average of the gathered values. An empty gather is defined as 0.0
    /// (never NaN) and records an error.
    pub fn avg(&mut self, property: Option<&str>) -> f64 {
        let values = self.gather(property);
        if values.is_empty() {
            self.record(QueryError::Aggregate(
                "can not compute the average of an empty collection".to_string(),
            ));
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Smallest gathered value; 0.0 when nothing gathers.
    pub fn min(&mut self, property: Option<&str>) -> f64 {
        self.gather(property).into_iter().reduce(f64::min).unwrap_or(0.0)
    }

    /// Largest gathered value; 0.0 when nothing gathers.
    pub fn max(&mut self, property: Option<&str>) -> f64 {
        self.gather(property).into_iter().reduce(f64::max).unwrap_or(0.0)
    }

    /// Materialize the result into a statically-shaped target: the working
    /// value is re-serialized and decoded into `T`. Failures of either step
    /// are recorded and yield `None`.
    pub fn out<T: DeserializeOwned>(&mut self) -> Option<T> {
        let value = self.get();
        let text = output::to_json(&value);
        match serde_json::from_str(&text) {
            Ok(v) => Some(v),
            Err(e) => {
                self.record(QueryError::Decode(e.to_string()));
                None
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node: {} content: {}",
            self.node,
            output::to_json(&self.current)
        )
    }
}
