//! Containment search over predicate trees.
//!
//! The search is structural: it ignores whether a node is a combinator or a
//! leaf comparison, and reports whether a field name occurs as a document
//! key anywhere in the tree. It stops at the first match.

use crate::predicate::Predicate;

/// The search descended past its depth limit before finding the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    /// The limit that was exceeded.
    pub max_depth: usize,
}

/// Check whether `field` is a key of some document anywhere in `node`.
///
/// A document that has `field` as a direct key matches without looking at
/// the associated value. Otherwise document values and sequence elements
/// are searched in order. Scalars never match.
///
/// The search recurses once per nesting level, so its stack use grows with
/// the depth of `node`. Trees decoded by serde are capped by its recursion
/// limit; for trees built programmatically from untrusted input, use
/// [`contains_field_within`] (or `EnforcerConfig::with_max_depth`).
pub fn contains_field(node: &Predicate, field: &str) -> bool {
    match node {
        Predicate::Document(doc) => {
            doc.contains_key(field) || doc.values().any(|value| contains_field(value, field))
        }
        Predicate::Sequence(items) => items.iter().any(|item| contains_field(item, field)),
        Predicate::Scalar(_) => false,
    }
}

/// Like [`contains_field`], but never descends below `max_depth`.
///
/// The root is at depth 0. The result is `Ok(true)` if `field` is a key of
/// some document within the limit, wherever the deeper branches sit among
/// its siblings. It is [`DepthExceeded`] only when there is no such match
/// and some branch continues past the limit, and `Ok(false)` otherwise.
pub fn contains_field_within(
    node: &Predicate,
    field: &str,
    max_depth: usize,
) -> Result<bool, DepthExceeded> {
    search_bounded(node, field, 0, max_depth)
}

fn search_bounded(
    node: &Predicate,
    field: &str,
    depth: usize,
    max_depth: usize,
) -> Result<bool, DepthExceeded> {
    if depth > max_depth {
        return Err(DepthExceeded { max_depth });
    }

    match node {
        Predicate::Document(doc) if doc.contains_key(field) => Ok(true),
        Predicate::Document(doc) => search_children(doc.values(), field, depth, max_depth),
        Predicate::Sequence(items) => search_children(items.iter(), field, depth, max_depth),
        Predicate::Scalar(_) => Ok(false),
    }
}

/// A branch past the limit is remembered, not returned, so a match in a
/// later sibling still wins.
fn search_children<'a>(
    children: impl Iterator<Item = &'a Predicate>,
    field: &str,
    depth: usize,
    max_depth: usize,
) -> Result<bool, DepthExceeded> {
    let mut exceeded = None;
    for child in children {
        match search_bounded(child, field, depth + 1, max_depth) {
            Ok(true) => return Ok(true),
            Ok(false) => {}
            Err(err) => exceeded = Some(err),
        }
    }
    exceeded.map_or(Ok(false), Err)
}
