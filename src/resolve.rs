//! Reference resolution as per RFC 3986, Section 5.3.

use crate::{split, split_reference, Parts, Path};

/// Resolves `reference` against `base`, producing the target parts.
///
/// In non-strict mode a reference scheme equal to the base scheme is
/// ignored, as if the reference were relative (RFC 3986, Section 5.2.2).
///
/// The result borrows from the same buffers as `base` and `reference`;
/// dot segments are removed from the target path.
///
/// # Examples
///
/// ```
/// use uri_parts::{compose, join, split, split_reference};
///
/// let base = split("http://a/b/c/d;p?q").unwrap();
/// let r = split_reference("../../g").unwrap();
/// assert_eq!(compose(&join(&base, &r, true)), "http://a/g");
/// ```
#[must_use]
pub fn join<'a>(base: &Parts<'a>, reference: &Parts<'a>, strict: bool) -> Parts<'a> {
    let ref_scheme = match reference.scheme {
        Some(s) if !strict && base.scheme.is_some_and(|b| s.eq_ignore_ascii_case(b)) => None,
        s => s,
    };

    let mut target = Parts {
        fragment: reference.fragment,
        ..Parts::default()
    };

    if let Some(scheme) = ref_scheme {
        target.scheme = Some(scheme);
        target.authority = reference.authority.clone();
        target.path = reference.path.clone();
        target.path.remove_dot_segments();
        target.query = reference.query;
    } else {
        target.scheme = base.scheme;
        if reference.authority.is_some() {
            target.authority = reference.authority.clone();
            target.path = reference.path.clone();
            target.path.remove_dot_segments();
            target.query = reference.query;
        } else {
            target.authority = base.authority.clone();
            if reference.path.is_empty() {
                target.path = base.path.clone();
                target.query = reference.query.or(base.query);
            } else {
                target.path = if reference.path.leads_with_slash() {
                    reference.path.clone()
                } else {
                    merge(base, &reference.path)
                };
                target.path.remove_dot_segments();
                target.query = reference.query;
            }
        }
    }
    target
}

// Merges the reference path with the base path as per RFC 3986,
// Section 5.2.3: against a base with an authority and an empty path the
// reference path is simply rooted; otherwise it replaces the last base
// segment.
fn merge<'a>(base: &Parts<'a>, ref_path: &Path<'a>) -> Path<'a> {
    if base.authority.is_some() && base.path.is_empty() {
        Path {
            absolute: true,
            segments: ref_path.segments.clone(),
        }
    } else {
        let mut segments = base.path.segments.clone();
        segments.pop();
        segments.extend_from_slice(&ref_path.segments);
        Path {
            absolute: base.path.absolute,
            segments,
        }
    }
}

/// Parses both arguments and resolves the reference against the base.
///
/// Returns `None` when `base` is not a URI or `reference` is not a URI
/// reference.
///
/// # Examples
///
/// ```
/// use uri_parts::{compose, join_str};
///
/// let p = join_str("http://a/b/c/d;p?q", "g;x?y#s", true).unwrap();
/// assert_eq!(compose(&p), "http://a/b/c/g;x?y#s");
/// ```
#[must_use]
pub fn join_str<'a>(base: &'a str, reference: &'a str, strict: bool) -> Option<Parts<'a>> {
    let base = split(base)?;
    let reference = split_reference(reference)?;
    Some(join(&base, &reference, strict))
}
