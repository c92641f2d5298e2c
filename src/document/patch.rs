//! In-place mutation by key path

use serde_yaml::{Mapping, Value};

use super::path::{PatchTarget, Segment};
use super::{kind_name, StructuredDocument};
use crate::error::PathError;

/// Controls how `set_path` treats nodes that do not exist yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Create missing intermediate mappings/sequences (and replace null
    /// intermediates) instead of failing.
    pub create_missing: bool,
}

/// Replace the value at `target`, returning the previous value if there was one.
///
/// A missing final mapping key is inserted. Missing intermediate keys are an
/// error unless `opts.create_missing` is set.
pub fn set_path(
    doc: &mut StructuredDocument,
    target: &PatchTarget,
    value: Value,
    opts: SetOptions,
) -> Result<Option<Value>, PathError> {
    set_in(doc.root_mut(), target, 0, value, opts)
}

/// Resolve `target` without mutating the document.
pub fn get_path<'a>(doc: &'a StructuredDocument, target: &PatchTarget) -> Option<&'a Value> {
    let mut node = doc.root();
    for segment in target.segments() {
        node = match (segment, untag(node)) {
            (Segment::Key(key), Value::Mapping(map)) => map.get(key.as_str())?,
            (Segment::Index(index), Value::Sequence(seq)) => seq.get(*index)?,
            _ => return None,
        };
    }
    Some(node)
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn empty_container(next: &Segment) -> Value {
    match next {
        Segment::Key(_) => Value::Mapping(Mapping::new()),
        Segment::Index(_) => Value::Sequence(Vec::new()),
    }
}

fn set_in(
    node: &mut Value,
    target: &PatchTarget,
    depth: usize,
    value: Value,
    opts: SetOptions,
) -> Result<Option<Value>, PathError> {
    let segments = target.segments();
    let Some(segment) = segments.get(depth) else {
        return Ok(Some(std::mem::replace(node, value)));
    };
    let next = segments.get(depth + 1);

    if opts.create_missing && node.is_null() {
        *node = empty_container(segment);
    }

    match (segment, node) {
        (_, Value::Tagged(tagged)) => set_in(&mut tagged.value, target, depth, value, opts),
        (Segment::Key(key), Value::Mapping(map)) => {
            let Some(next) = next else {
                return Ok(map.insert(Value::String(key.clone()), value));
            };
            if !map.contains_key(key.as_str()) {
                if !opts.create_missing {
                    return Err(PathError::MissingKey {
                        at: target.prefix(depth),
                        key: key.clone(),
                    });
                }
                map.insert(Value::String(key.clone()), empty_container(next));
            }
            match map.get_mut(key.as_str()) {
                Some(child) => set_in(child, target, depth + 1, value, opts),
                None => Err(PathError::MissingKey { at: target.prefix(depth), key: key.clone() }),
            }
        }
        (Segment::Index(index), Value::Sequence(seq)) => {
            let len = seq.len();
            if *index == len && opts.create_missing {
                match next {
                    None => {
                        seq.push(value);
                        return Ok(None);
                    }
                    Some(next) => seq.push(empty_container(next)),
                }
            }
            match seq.get_mut(*index) {
                Some(child) => set_in(child, target, depth + 1, value, opts),
                None => {
                    Err(PathError::IndexOutOfRange { at: target.prefix(depth), index: *index, len })
                }
            }
        }
        (segment, other) => Err(PathError::NotIndexable {
            at: target.prefix(depth),
            found: kind_name(other),
            segment: segment.to_string(),
        }),
    }
}
