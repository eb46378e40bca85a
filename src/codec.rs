//! The encode/decode pipeline over a [`Parts`] value and a caller-owned
//! byte store.
//!
//! Both directions are two-pass: the first pass sums the exact number of
//! bytes the transformed fields need, so the store is reserved once; the
//! second pass appends the transformed bytes and re-points the affected
//! views into the store. A field whose transform is a no-op keeps its
//! view into the source buffer, and the store receives nothing for it.

use crate::encoding::{self, table, Table};
use crate::{punycode, Authority, Parts, Path};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;
use core::str;

/// Identifies a text field of a [`Parts`] value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// The scheme component.
    Scheme,
    /// The userinfo subcomponent of the authority.
    Userinfo,
    /// The host subcomponent of the authority.
    Host,
    /// The port subcomponent of the authority.
    Port,
    /// A path segment.
    Path,
    /// The query component.
    Query,
    /// The fragment component.
    Fragment,
}

impl Field {
    /// Returns the percent-encoding safe set of the field, or `None` for
    /// the fields the pipeline leaves untouched: scheme and port carry no
    /// encodable data, and the host routes through Punycode instead.
    #[must_use]
    pub fn encode_table(self) -> Option<&'static Table> {
        match self {
            Field::Userinfo => Some(table::USERINFO),
            Field::Path => Some(table::PATH),
            Field::Query => Some(table::QUERY),
            Field::Fragment => Some(table::FRAGMENT),
            Field::Scheme | Field::Host | Field::Port => None,
        }
    }
}

/// An error occurred when decoding the fields of a [`Parts`] value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A host label failed to decode.
    Punycode(punycode::DecodeError),
    /// Percent-decoding produced bytes that are not valid UTF-8.
    InvalidUtf8,
}

impl From<punycode::DecodeError> for DecodeError {
    fn from(e: punycode::DecodeError) -> Self {
        DecodeError::Punycode(e)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Punycode(e) => write!(f, "punycode: {e}"),
            Self::InvalidUtf8 => f.write_str("percent-decoded bytes are not valid UTF-8"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Punycode(e) => Some(e),
            Self::InvalidUtf8 => None,
        }
    }
}

// A field view produced by the second pass: still pointing into the
// source buffer, or a range of freshly appended store bytes.
enum Span<'a> {
    Source(&'a str),
    Store(Range<usize>),
}

fn pct_required(s: &str, field: Field) -> usize {
    match field.encode_table() {
        Some(t) if encoding::needs_encode(s, t) => encoding::encoded_size(s, t),
        _ => 0,
    }
}

fn pct_span<'a>(store: &mut String, s: &'a str, field: Field) -> Span<'a> {
    match field.encode_table() {
        Some(t) if encoding::needs_encode(s, t) => {
            let start = store.len();
            encoding::encode_into(s, t, store);
            Span::Store(start..store.len())
        }
        _ => Span::Source(s),
    }
}

/// Percent-encodes (and IDN-encodes) the fields of `parts` into `store`,
/// returning the re-pointed parts.
///
/// The userinfo, path, query and fragment fields are percent-encoded
/// against their per-component safe sets; the host is Punycode-encoded;
/// scheme and port pass through. A field needing no transform keeps its
/// view into the source buffer, so an all-ASCII, all-safe `parts` leaves
/// `store` empty.
///
/// The store is cleared first and reserved exactly once. While the
/// returned `Parts` is alive the store must not be mutated; the borrow
/// checker enforces this.
///
/// # Examples
///
/// ```
/// use uri_parts::{encode, Parts};
///
/// let mut p = Parts::default();
/// p.ensure_authority().host = "M\u{FC}nchen.de";
/// let mut store = String::new();
/// let encoded = encode(&mut store, &p);
/// assert_eq!(encoded.authority.unwrap().host, "xn--Mnchen-3ya.de");
/// ```
pub fn encode<'a>(store: &'a mut String, parts: &Parts<'a>) -> Parts<'a> {
    store.clear();

    // First pass: the exact capacity, so the single reservation below
    // covers every append of the second pass.
    let mut required = 0;
    if let Some(authority) = &parts.authority {
        if let Some(userinfo) = authority.userinfo {
            required += pct_required(userinfo, Field::Userinfo);
        }
        required += punycode::encoded_size(authority.host);
    }
    for seg in &parts.path.segments {
        required += pct_required(seg, Field::Path);
    }
    if let Some(query) = parts.query {
        required += pct_required(query, Field::Query);
    }
    if let Some(fragment) = parts.fragment {
        required += pct_required(fragment, Field::Fragment);
    }
    store.reserve(required);

    // Second pass: append and record spans.
    let authority = parts.authority.as_ref().map(|authority| {
        let userinfo = authority
            .userinfo
            .map(|u| pct_span(store, u, Field::Userinfo));
        let host = if punycode::encoded_size(authority.host) == 0 {
            Span::Source(authority.host)
        } else {
            let start = store.len();
            punycode::encode_domain(authority.host, store);
            Span::Store(start..store.len())
        };
        (userinfo, host, authority.port)
    });
    let segments: Vec<Span<'a>> = parts
        .path
        .segments
        .iter()
        .map(|&seg| pct_span(store, seg, Field::Path))
        .collect();
    let query = parts.query.map(|q| pct_span(store, q, Field::Query));
    let fragment = parts.fragment.map(|f| pct_span(store, f, Field::Fragment));

    debug_assert_eq!(store.len(), required, "size oracle and writer disagree");

    resolve_spans(
        store,
        parts.scheme,
        authority,
        parts.path.absolute,
        segments,
        query,
        fragment,
    )
}

fn dec_required(s: &str, field: Field) -> usize {
    if field.encode_table().is_none() {
        return 0;
    }
    let size = encoding::decoded_size(s);
    if size == s.len() {
        0
    } else {
        size
    }
}

fn pct_dec_span<'a>(store: &mut String, s: &'a str, field: Field) -> Result<Span<'a>, DecodeError> {
    if field.encode_table().is_none() || encoding::decoded_size(s) == s.len() {
        return Ok(Span::Source(s));
    }
    let bytes: Vec<u8> = encoding::PctDecode::new(s).collect();
    let text = str::from_utf8(&bytes).map_err(|_| DecodeError::InvalidUtf8)?;
    let start = store.len();
    store.push_str(text);
    Ok(Span::Store(start..store.len()))
}

/// Percent-decodes (and IDN-decodes) the fields of `parts` into `store`,
/// returning the re-pointed parts. The inverse of [`encode`].
///
/// The host is Punycode-decoded; userinfo, path, query and fragment are
/// percent-decoded (malformed triplets pass through literally); scheme
/// and port pass through. A field needing no transform keeps its view
/// into the source buffer.
///
/// # Errors
///
/// The first failing host label aborts the pipeline with its
/// [`punycode::DecodeError`] before any field is decoded; percent-decoded
/// bytes that are not valid UTF-8 yield [`DecodeError::InvalidUtf8`].
pub fn decode<'a>(store: &'a mut String, parts: &Parts<'a>) -> Result<Parts<'a>, DecodeError> {
    store.clear();

    let mut required = 0;
    if let Some(authority) = &parts.authority {
        if let Some(userinfo) = authority.userinfo {
            required += dec_required(userinfo, Field::Userinfo);
        }
        required += punycode::decoded_size(authority.host)?;
    }
    for seg in &parts.path.segments {
        required += dec_required(seg, Field::Path);
    }
    if let Some(query) = parts.query {
        required += dec_required(query, Field::Query);
    }
    if let Some(fragment) = parts.fragment {
        required += dec_required(fragment, Field::Fragment);
    }
    store.reserve(required);

    let authority = match &parts.authority {
        Some(authority) => {
            let userinfo = match authority.userinfo {
                Some(u) => Some(pct_dec_span(store, u, Field::Userinfo)?),
                None => None,
            };
            let host = if punycode::decoded_size(authority.host)? == 0 {
                Span::Source(authority.host)
            } else {
                let start = store.len();
                punycode::decode_domain(authority.host, store)?;
                Span::Store(start..store.len())
            };
            Some((userinfo, host, authority.port))
        }
        None => None,
    };
    let mut segments = Vec::with_capacity(parts.path.segments.len());
    for &seg in &parts.path.segments {
        segments.push(pct_dec_span(store, seg, Field::Path)?);
    }
    let query = match parts.query {
        Some(q) => Some(pct_dec_span(store, q, Field::Query)?),
        None => None,
    };
    let fragment = match parts.fragment {
        Some(f) => Some(pct_dec_span(store, f, Field::Fragment)?),
        None => None,
    };

    debug_assert_eq!(store.len(), required, "size oracle and writer disagree");

    Ok(resolve_spans(
        store,
        parts.scheme,
        authority,
        parts.path.absolute,
        segments,
        query,
        fragment,
    ))
}

// Resolves store-relative spans against the now-frozen store, yielding
// the final borrowed parts.
#[allow(clippy::type_complexity)]
fn resolve_spans<'a>(
    store: &'a mut String,
    scheme: Option<&'a str>,
    authority: Option<(Option<Span<'a>>, Span<'a>, Option<&'a str>)>,
    absolute: bool,
    segments: Vec<Span<'a>>,
    query: Option<Span<'a>>,
    fragment: Option<Span<'a>>,
) -> Parts<'a> {
    let store: &'a str = store;
    let resolve = |span: Span<'a>| -> &'a str {
        match span {
            Span::Source(s) => s,
            Span::Store(range) => &store[range],
        }
    };
    Parts {
        scheme,
        authority: authority.map(|(userinfo, host, port)| Authority {
            userinfo: userinfo.map(&resolve),
            host: resolve(host),
            port,
        }),
        path: Path {
            absolute,
            segments: segments.into_iter().map(&resolve).collect(),
        },
        query: query.map(&resolve),
        fragment: fragment.map(&resolve),
    }
}
