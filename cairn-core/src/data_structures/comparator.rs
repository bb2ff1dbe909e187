//! Comparators and equality relations shared by every collection operation.
//!
//! Two families coexist on purpose:
//!
//! - [`type_safe`] orders values of the same kind and puts every cross-kind
//!   pair at `Less`. `sort` and `diff` (and therefore `equals`) use it.
//! - [`loose_eq`] compares the string forms of scalars, so `1`, `1.0` and
//!   `"1"` are the same item. `unique` and `intersect` (and therefore `union`)
//!   use it.
//!
//! [`strict_eq`] is the identity check behind `contains`.

use std::cmp::Ordering;

use super::key::Key;
use super::value::{ObjectRef, Value};

/// Kind-gated natural ordering.
///
/// Values of different kinds always compare as `Less`, in both directions.
/// This is deterministic but not a total order across mixed-kind data.
///
pub fn type_safe(a: &Value, b: &Value) -> Ordering {
    if a.kind() != b.kind() {
        return Ordering::Less;
    }

    match (a, b) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Object(a), Value::Object(b)) => compare_objects(a, b),
        (Value::List(a), Value::List(b)) => compare_lists(a, b),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => Ordering::Less,
        },
    }
}

/// Compares keys by their string form, so `10` sorts before `9`.
pub fn key_string(a: &Key, b: &Key) -> Ordering {
    match (a, b) {
        (Key::Name(a), Key::Name(b)) => a.as_bytes().cmp(b.as_bytes()),
        _ => a.to_string().as_bytes().cmp(b.to_string().as_bytes()),
    }
}

/// Identity equality: same variant and same value, objects by reference.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| strict_eq(a, b))
        }
        _ => false,
    }
}

/// String-form equality.
///
/// Objects are loosely equal when they are the same reference or hold
/// pairwise loosely-equal fields under the same names, in the same order.
/// Objects and lists never equal a scalar.
///
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            a.ptr_eq(b)
                || (a.len() == b.len()
                    && a.fields()
                        .zip(b.fields())
                        .all(|((na, va), (nb, vb))| na == nb && loose_eq(va, vb)))
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| loose_eq(a, b))
        }
        _ => match (a.scalar_string(), b.scalar_string()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

// Numeric strings compare as numbers ("10" > "9"), everything else bytewise.
fn compare_text(a: &str, b: &str) -> Ordering {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.as_bytes().cmp(b.as_bytes()),
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    if trimmed.is_empty()
        || trimmed.contains(|c: char| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.trim_end().parse::<f64>().ok()
}

fn compare_objects(a: &ObjectRef, b: &ObjectRef) -> Ordering {
    if a.ptr_eq(b) {
        return Ordering::Equal;
    }
    for ((na, va), (nb, vb)) in a.fields().zip(b.fields()) {
        let ordering = na.cmp(nb).then_with(|| type_safe(va, vb));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_lists(a: &[Value], b: &[Value]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(a, b)| type_safe(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    })
}
