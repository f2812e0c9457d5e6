use std::cmp::Ordering;

use crate::path;
use crate::value::Value;

/// Sort a list of scalars.
///
/// Strings and numbers are partitioned and sorted independently; values of
/// any other type are dropped. The result is always strings followed by
/// numbers, in the requested direction within each partition. This
/// strings-first concatenation holds for descending order too and is part
/// of the contract.
pub fn sort_scalars(items: Vec<Value>, ascending: bool) -> Vec<Value> {
    let mut strings = Vec::new();
    let mut numbers = Vec::new();
    for item in items {
        match item {
            Value::String(s) => strings.push(s),
            Value::Number(n) => numbers.push(n),
            _ => {}
        }
    }

    strings.sort_unstable();
    numbers.sort_unstable_by(f64::total_cmp);
    if !ascending {
        strings.reverse();
        numbers.reverse();
    }

    let mut result: Vec<Value> = strings.into_iter().map(Value::String).collect();
    result.extend(numbers.into_iter().map(Value::Number));
    result
}

/// Stable-sort a list of records by a (possibly nested) key.
///
/// The key is resolved once per record. Two resolved numbers compare
/// numerically, two strings lexicographically; any other pairing, and any
/// record whose key does not resolve, compares equal so the original
/// relative order is preserved. Returns `false` when at least one record
/// failed to resolve the key, letting the session log a diagnostic.
pub fn sort_records(items: &mut [Value], key: &str, separator: &str, ascending: bool) -> bool {
    let keys: Vec<Option<Value>> = items
        .iter()
        .map(|record| path::lookup(record, key, separator).ok().cloned())
        .collect();
    let all_resolved = keys.iter().all(Option::is_some);

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = compare_keys(&keys[a], &keys[b]);
        if ascending { ord } else { ord.reverse() }
    });

    let mut sorted: Vec<Value> = order.iter().map(|&i| items[i].clone()).collect();
    for (slot, value) in items.iter_mut().zip(sorted.drain(..)) {
        *slot = value;
    }
    all_resolved
}

fn compare_keys(a: &Option<Value>, b: &Option<Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x.total_cmp(y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
