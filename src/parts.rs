//! The structured representation of a parsed URI.

use crate::encoding::table;
use crate::parser;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The authority component: the `userinfo "@" host ":" port` tuple
/// following `"//"`.
///
/// The host of an IP literal is stored without its square brackets;
/// composing adds them back whenever the host contains a `':'`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Authority<'a> {
    /// The user information subcomponent, if present.
    pub userinfo: Option<&'a str>,
    /// The host subcomponent. May be empty.
    pub host: &'a str,
    /// The port subcomponent, if present. May be empty.
    pub port: Option<&'a str>,
}

impl Authority<'_> {
    /// Checks each present subcomponent against its RFC 3986 production.
    #[must_use]
    pub fn valid(&self) -> bool {
        if let Some(userinfo) = self.userinfo {
            if !table::USERINFO.validate(userinfo.as_bytes()) {
                return false;
            }
        }
        if let Some(port) = self.port {
            if !table::PORT.validate(port.as_bytes()) {
                return false;
            }
        }
        valid_host(self.host)
    }
}

// host = IP-literal / IPv4address / reg-name, with the address of an
// IP literal accepted both bare and bracketed.
fn valid_host(host: &str) -> bool {
    if table::REG_NAME.validate(host.as_bytes()) {
        return true;
    }
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    parser::matches_ipv6(bare) || parser::matches_ipvfuture(bare)
}

/// The path component: an ordered sequence of segments and a flag
/// recording whether the path begins with `'/'`.
///
/// Segments synthesized by the parser include their leading `'/'`;
/// directly constructed paths may instead use bare segments together
/// with the `absolute` flag. [`Display`](fmt::Display) inserts a `'/'`
/// before any segment that does not carry one (before the first only
/// when `absolute` is set), so both conventions compose identically.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Path<'a> {
    /// Whether the path begins with `'/'`.
    pub absolute: bool,
    /// The path segments in order.
    pub segments: Vec<&'a str>,
}

impl<'a> Path<'a> {
    /// Checks whether the path has zero segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Checks each segment against the `segment` production, ignoring a
    /// leading `'/'`.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.segments.iter().all(|seg| {
            let core = seg.strip_prefix('/').unwrap_or(seg);
            table::PCHAR.validate(core.as_bytes())
        })
    }

    // Whether the composed path text would begin with '/'.
    pub(crate) fn leads_with_slash(&self) -> bool {
        self.absolute || self.segments.first().is_some_and(|seg| seg.starts_with('/'))
    }

    /// Removes the dot segments `"."` and `".."` as per RFC 3986,
    /// Section 5.2.4, transposed to the segment list: a leading run of
    /// rootless dot segments is dropped, `"/."` is dropped (keeping a
    /// final `'/'`), and `"/.."` pops the last emitted segment (again
    /// keeping a final `'/'`). The operation is idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut p = uri_parts::split("s://h/foo/./bar/baz/../qux").unwrap();
    /// p.path.remove_dot_segments();
    /// assert_eq!(p.path.segments, ["/foo", "/bar", "/qux"]);
    /// ```
    pub fn remove_dot_segments(&mut self) {
        let mut out: Vec<&'a str> = Vec::with_capacity(self.segments.len());
        let mut rootless = !self.leads_with_slash();
        let last = self.segments.len().wrapping_sub(1);
        for (i, &seg) in self.segments.iter().enumerate() {
            let core = seg.strip_prefix('/').unwrap_or(seg);
            let is_last = i == last;
            if rootless {
                match core {
                    "." | ".." => {}
                    _ => {
                        out.push(core);
                        rootless = false;
                    }
                }
            } else {
                match core {
                    "." => {
                        if is_last {
                            out.push("/");
                        }
                    }
                    ".." => {
                        out.pop();
                        if is_last {
                            out.push("/");
                        }
                    }
                    _ => out.push(seg),
                }
            }
        }
        self.segments = out;
        self.absolute = self.leads_with_slash();
    }

    /// Converts the path to a [`std::path::PathBuf`].
    #[cfg(feature = "std")]
    #[must_use]
    pub fn to_path_buf(&self) -> std::path::PathBuf {
        use alloc::string::ToString;

        std::path::PathBuf::from(self.to_string())
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if !seg.starts_with('/') && (i > 0 || self.absolute) {
                f.write_str("/")?;
            }
            f.write_str(seg)?;
        }
        Ok(())
    }
}

impl fmt::Display for Authority<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        if self.host.contains(':') {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(self.host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// A structured URI value.
///
/// Each text field is a view over an underlying buffer: the original
/// input after [`split`](crate::split), or a caller-owned store after
/// [`encode`](crate::encode)/[`decode`](crate::decode). A `Parts` never
/// owns bytes; two values are equal iff all components are equal byte
/// for byte.
///
/// `Parts` is pure data. It is created by the parsing entry points, by
/// the encode/decode pipeline, by [`join`](crate::join) or by direct
/// construction, and is mutated only by explicit operations such as
/// [`Path::remove_dot_segments`] or [`ensure_authority`](Self::ensure_authority).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Parts<'a> {
    /// The scheme component, if present.
    pub scheme: Option<&'a str>,
    /// The authority component, if present.
    pub authority: Option<Authority<'a>>,
    /// The path component.
    pub path: Path<'a>,
    /// The query component, if present.
    pub query: Option<&'a str>,
    /// The fragment component, if present.
    pub fragment: Option<&'a str>,
}

impl<'a> Parts<'a> {
    /// Checks grammar-level well-formedness of each present component,
    /// together with the RFC 3986 consistency rules between authority,
    /// scheme and path form.
    ///
    /// This is a pure predicate; it never panics.
    #[must_use]
    pub fn valid(&self) -> bool {
        if let Some(scheme) = self.scheme {
            let first_is_alpha = scheme
                .as_bytes()
                .first()
                .is_some_and(u8::is_ascii_alphabetic);
            if !(first_is_alpha && table::SCHEME.validate(scheme.as_bytes())) {
                return false;
            }
        }
        if let Some(authority) = &self.authority {
            if !authority.valid() {
                return false;
            }
            // With an authority the path is either empty or absolute.
            if !(self.path.is_empty() || self.path.leads_with_slash()) {
                return false;
            }
        } else {
            // Without one, a path starting with "//" would be
            // indistinguishable from an authority when composed.
            if begins_double_slash(&self.path) {
                return false;
            }
            if self.scheme.is_none() && !self.path.leads_with_slash() {
                // First segment of a relative path cannot contain ':'.
                if self
                    .path
                    .segments
                    .first()
                    .is_some_and(|seg| seg.contains(':'))
                {
                    return false;
                }
            }
        }
        if !self.path.valid() {
            return false;
        }
        if let Some(query) = self.query {
            if !table::QUERY.validate(query.as_bytes()) {
                return false;
            }
        }
        if let Some(fragment) = self.fragment {
            if !table::FRAGMENT.validate(fragment.as_bytes()) {
                return false;
            }
        }
        true
    }

    /// Returns the authority, installing an empty one first if none is
    /// present.
    pub fn ensure_authority(&mut self) -> &mut Authority<'a> {
        self.authority.get_or_insert_with(Authority::default)
    }
}

fn begins_double_slash(path: &Path<'_>) -> bool {
    let Some(&first) = path.segments.first() else {
        return false;
    };
    let bare_slash = first == "/" || (path.absolute && first.is_empty());
    bare_slash && path.segments.len() > 1
}

impl fmt::Display for Parts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Serializes the parts back to URI text in canonical order.
///
/// The `Display` impl of [`Parts`] is the streaming equivalent.
///
/// # Examples
///
/// ```
/// let s = "https://example.com/a/b?x=1#f";
/// let p = uri_parts::split(s).unwrap();
/// assert_eq!(uri_parts::compose(&p), s);
/// ```
#[must_use]
pub fn compose(parts: &Parts<'_>) -> String {
    use alloc::string::ToString;

    parts.to_string()
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Parts;
    use serde::de::{Deserialize, Deserializer, Error, Unexpected};
    use serde::ser::{Serialize, Serializer};

    impl Serialize for Parts<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de: 'a, 'a> Deserialize<'de> for Parts<'a> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = <&'de str>::deserialize(deserializer)?;
            crate::split_reference(s)
                .ok_or_else(|| D::Error::invalid_value(Unexpected::Str(s), &"a URI reference"))
        }
    }
}
