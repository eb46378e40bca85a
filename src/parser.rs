//! The RFC 3986 grammar, expressed with the [`grammar`](crate::grammar)
//! combinator.
//!
//! Each production is a matcher function named after its ABNF rule.
//! Matching queues tagged events; [`split`] and [`split_reference`] run
//! a top-level rule to completion and fold the released events into a
//! [`Parts`], so a discarded alternative never leaves a trace in the
//! result.

use crate::grammar::{alpha, char_range, digit, hexdig, lit, Event, Matched, Rule};
use crate::Parts;

const MANY: u32 = u32::MAX;

// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
//            / "*" / "+" / "," / ";" / "="
fn sub_delims(i: &str) -> Matched<'_> {
    Rule::new(i)
        .alternative(&[
            &lit(b'!'),
            &lit(b'$'),
            &lit(b'&'),
            &lit(b'\''),
            &lit(b'('),
            &lit(b')'),
            &lit(b'*'),
            &lit(b'+'),
            &lit(b','),
            &lit(b';'),
            &lit(b'='),
        ])
        .matched(i)
}

// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
fn unreserved(i: &str) -> Matched<'_> {
    Rule::new(i)
        .alternative(&[&alpha, &digit, &lit(b'-'), &lit(b'.'), &lit(b'_'), &lit(b'~')])
        .matched(i)
}

// pct-encoded = "%" HEXDIG HEXDIG
fn pct_encoded(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(lit(b'%'))
        .concat(hexdig)
        .concat(hexdig)
        .matched(i)
}

// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
fn pchar(i: &str) -> Matched<'_> {
    Rule::new(i)
        .alternative(&[&unreserved, &pct_encoded, &sub_delims, &lit(b':'), &lit(b'@')])
        .matched(i)
}

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn scheme(i: &str) -> Matched<'_> {
    fn rest(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&alpha, &digit, &lit(b'+'), &lit(b'-'), &lit(b'.')])
            .matched(i)
    }
    Rule::new(i).concat(alpha).star(rest, 0, MANY).matched(i)
}

// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
fn userinfo(i: &str) -> Matched<'_> {
    fn uchar(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&unreserved, &pct_encoded, &sub_delims, &lit(b':')])
            .matched(i)
    }
    Rule::new(i).star(uchar, 0, MANY).matched(i)
}

// reg-name = *( unreserved / pct-encoded / sub-delims )
fn reg_name(i: &str) -> Matched<'_> {
    fn rchar(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&unreserved, &pct_encoded, &sub_delims])
            .matched(i)
    }
    Rule::new(i).star(rchar, 0, MANY).matched(i)
}

// dec-octet = DIGIT             ; 0-9
//           / %x31-39 DIGIT     ; 10-99
//           / "1" 2DIGIT        ; 100-199
//           / "2" %x30-34 DIGIT ; 200-249
//           / "25" %x30-35      ; 250-255
//
// The alternatives are tried from the most to the least specific, so
// that "25" is not claimed by `"2" %x30-34 DIGIT` before `"25" %x30-35`
// had a chance to consume 255.
fn dec_octet(i: &str) -> Matched<'_> {
    fn from_250(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(lit(b'2'))
            .concat(lit(b'5'))
            .concat(char_range(b'0', b'5'))
            .matched(i)
    }
    fn from_200(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(lit(b'2'))
            .concat(char_range(b'0', b'4'))
            .concat(digit)
            .matched(i)
    }
    fn from_100(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(lit(b'1'))
            .concat(digit)
            .concat(digit)
            .matched(i)
    }
    fn from_10(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(char_range(b'1', b'9'))
            .concat(digit)
            .matched(i)
    }
    Rule::new(i)
        .alternative(&[&from_250, &from_200, &from_100, &from_10, &digit])
        .matched(i)
}

// IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet
fn ipv4address(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(dec_octet)
        .concat(lit(b'.'))
        .concat(dec_octet)
        .concat(lit(b'.'))
        .concat(dec_octet)
        .concat(lit(b'.'))
        .concat(dec_octet)
        .matched(i)
}

// h16 = 1*4HEXDIG
fn h16(i: &str) -> Matched<'_> {
    Rule::new(i).star(hexdig, 1, 4).matched(i)
}

// A ":" that is not followed by another ":". Keeps "::" from being
// mis-segmented as `h16 ":"`.
fn single_colon(i: &str) -> Matched<'_> {
    fn not_colon(i: &str) -> Matched<'_> {
        match i.as_bytes().first() {
            Some(&b':') => None,
            _ => Some((&i[..0], alloc::vec::Vec::new())),
        }
    }
    Rule::new(i).concat(lit(b':')).concat(not_colon).matched(i)
}

// h16colon = h16 ":"
fn h16_colon(i: &str) -> Matched<'_> {
    Rule::new(i).concat(h16).concat(single_colon).matched(i)
}

fn colon_colon(i: &str) -> Matched<'_> {
    Rule::new(i).concat(lit(b':')).concat(lit(b':')).matched(i)
}

// ls32 = ( h16 ":" h16 ) / IPv4address
fn ls32(i: &str) -> Matched<'_> {
    fn h16_h16(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(h16)
            .concat(lit(b':'))
            .concat(h16)
            .matched(i)
    }
    Rule::new(i)
        .alternative(&[&h16_h16, &ipv4address])
        .matched(i)
}

// [ *<MAX>( h16 ":" ) h16 ], the optional prefix before "::".
fn v6_prefix<const MAX: u32>(i: &str) -> Matched<'_> {
    Rule::new(i).star(h16_colon, 0, MAX).concat(h16).matched(i)
}

// IPv6address =                            6( h16 ":" ) ls32
//             /                       "::" 5( h16 ":" ) ls32
//             / [               h16 ] "::" 4( h16 ":" ) ls32
//             / [ *1( h16 ":" ) h16 ] "::" 3( h16 ":" ) ls32
//             / [ *2( h16 ":" ) h16 ] "::" 2( h16 ":" ) ls32
//             / [ *3( h16 ":" ) h16 ] "::"    h16 ":"   ls32
//             / [ *4( h16 ":" ) h16 ] "::"              ls32
//             / [ *5( h16 ":" ) h16 ] "::"              h16
//             / [ *6( h16 ":" ) h16 ] "::"
//
// Tried top to bottom; the first alternative that consumes a
// closing-bracket-aligned prefix wins.
fn ipv6address(i: &str) -> Matched<'_> {
    fn v6_1(i: &str) -> Matched<'_> {
        Rule::new(i).star(h16_colon, 6, 6).concat(ls32).matched(i)
    }
    fn v6_2(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(colon_colon)
            .star(h16_colon, 5, 5)
            .concat(ls32)
            .matched(i)
    }
    fn v6_3(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(h16)
            .concat(colon_colon)
            .star(h16_colon, 4, 4)
            .concat(ls32)
            .matched(i)
    }
    fn v6_4(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<1>)
            .concat(colon_colon)
            .star(h16_colon, 3, 3)
            .concat(ls32)
            .matched(i)
    }
    fn v6_5(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<2>)
            .concat(colon_colon)
            .star(h16_colon, 2, 2)
            .concat(ls32)
            .matched(i)
    }
    fn v6_6(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<3>)
            .concat(colon_colon)
            .concat(h16_colon)
            .concat(ls32)
            .matched(i)
    }
    fn v6_7(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<4>)
            .concat(colon_colon)
            .concat(ls32)
            .matched(i)
    }
    fn v6_8(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<5>)
            .concat(colon_colon)
            .concat(h16)
            .matched(i)
    }
    fn v6_9(i: &str) -> Matched<'_> {
        Rule::new(i)
            .optional(v6_prefix::<6>)
            .concat(colon_colon)
            .matched(i)
    }
    Rule::new(i)
        .alternative(&[&v6_1, &v6_2, &v6_3, &v6_4, &v6_5, &v6_6, &v6_7, &v6_8, &v6_9])
        .matched(i)
}

// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
fn ipvfuture(i: &str) -> Matched<'_> {
    fn suffix_char(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&unreserved, &sub_delims, &lit(b':')])
            .matched(i)
    }
    Rule::new(i)
        .concat(lit(b'v'))
        .star(hexdig, 1, MANY)
        .concat(lit(b'.'))
        .star(suffix_char, 1, MANY)
        .matched(i)
}

// IP-literal = "[" ( IPv6address / IPvFuture ) "]"
//
// The host event covers the address inside the brackets only.
fn ip_literal(i: &str) -> Matched<'_> {
    fn ip_inner(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&ipv6address, &ipvfuture])
            .matched(i)
    }
    Rule::new(i)
        .concat(lit(b'['))
        .concat_emit(ip_inner, Event::Host)
        .concat(lit(b']'))
        .matched(i)
}

// host = IP-literal / IPv4address / reg-name
fn host(i: &str) -> Matched<'_> {
    fn plain_host(i: &str) -> Matched<'_> {
        fn v4_or_reg_name(i: &str) -> Matched<'_> {
            Rule::new(i)
                .alternative(&[&ipv4address, &reg_name])
                .matched(i)
        }
        Rule::new(i)
            .concat_emit(v4_or_reg_name, Event::Host)
            .matched(i)
    }
    Rule::new(i)
        .alternative(&[&ip_literal, &plain_host])
        .matched(i)
}

// port = *DIGIT
fn port(i: &str) -> Matched<'_> {
    Rule::new(i).star(digit, 0, MANY).matched(i)
}

// userinfo-at = userinfo "@"
fn userinfo_at(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat_emit(userinfo, Event::Userinfo)
        .concat(lit(b'@'))
        .matched(i)
}

// colon-port = ":" port
fn colon_port(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(lit(b':'))
        .concat_emit(port, Event::Port)
        .matched(i)
}

// authority = [ userinfo "@" ] host [ ":" port ]
fn authority(i: &str) -> Matched<'_> {
    Rule::new(i)
        .optional(userinfo_at)
        .concat(host)
        .optional(colon_port)
        .matched(i)
}

// segment = *pchar
fn segment(i: &str) -> Matched<'_> {
    Rule::new(i).star(pchar, 0, MANY).matched(i)
}

// segment-nz = 1*pchar
fn segment_nz(i: &str) -> Matched<'_> {
    Rule::new(i).star(pchar, 1, MANY).matched(i)
}

// segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )
//                 ; non-zero-length segment without any colon ":"
fn segment_nz_nc(i: &str) -> Matched<'_> {
    fn nc_char(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&unreserved, &pct_encoded, &sub_delims, &lit(b'@')])
            .matched(i)
    }
    Rule::new(i).star(nc_char, 1, MANY).matched(i)
}

// "/" segment, emitted as one path segment including the slash.
fn slash_segment(i: &str) -> Matched<'_> {
    fn inner(i: &str) -> Matched<'_> {
        Rule::new(i).concat(lit(b'/')).concat(segment).matched(i)
    }
    Rule::new(i)
        .concat_emit(inner, Event::PathSegment)
        .matched(i)
}

// path-abempty = *( "/" segment )
fn path_abempty(i: &str) -> Matched<'_> {
    Rule::new(i).star(slash_segment, 0, MANY).matched(i)
}

// path-absolute = "/" [ segment-nz *( "/" segment ) ]
//
// The leading "/" and the optional segment-nz form the first segment.
// A "//" prefix never reaches this rule: both hier-part and
// relative-part try the authority form first and its host accepts the
// empty reg-name.
fn path_absolute(i: &str) -> Matched<'_> {
    fn root_segment(i: &str) -> Matched<'_> {
        Rule::new(i)
            .concat(lit(b'/'))
            .optional(segment_nz)
            .matched(i)
    }
    Rule::new(i)
        .concat_emit(root_segment, Event::PathSegment)
        .star(slash_segment, 0, MANY)
        .matched(i)
}

// path-rootless = segment-nz *( "/" segment )
fn path_rootless(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat_emit(segment_nz, Event::PathSegment)
        .star(slash_segment, 0, MANY)
        .matched(i)
}

// path-noscheme = segment-nz-nc *( "/" segment )
fn path_noscheme(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat_emit(segment_nz_nc, Event::PathSegment)
        .star(slash_segment, 0, MANY)
        .matched(i)
}

// path-empty = 0<pchar>
fn path_empty(i: &str) -> Matched<'_> {
    Rule::new(i).star(pchar, 0, 0).matched(i)
}

// "//" authority path-abempty
fn net_path(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(lit(b'/'))
        .concat(lit(b'/'))
        .concat(authority)
        .concat(path_abempty)
        .matched(i)
}

// hier-part = "//" authority path-abempty
//           / path-absolute
//           / path-rootless
//           / path-empty
fn hier_part(i: &str) -> Matched<'_> {
    Rule::new(i)
        .alternative(&[&net_path, &path_absolute, &path_rootless, &path_empty])
        .matched(i)
}

// relative-part = "//" authority path-abempty
//               / path-absolute
//               / path-noscheme
//               / path-empty
fn relative_part(i: &str) -> Matched<'_> {
    Rule::new(i)
        .alternative(&[&net_path, &path_absolute, &path_noscheme, &path_empty])
        .matched(i)
}

// query = *( pchar / "/" / "?" )
fn query(i: &str) -> Matched<'_> {
    fn qchar(i: &str) -> Matched<'_> {
        Rule::new(i)
            .alternative(&[&pchar, &lit(b'/'), &lit(b'?')])
            .matched(i)
    }
    Rule::new(i).star(qchar, 0, MANY).matched(i)
}

// fragment = *( pchar / "/" / "?" )
fn fragment(i: &str) -> Matched<'_> {
    query(i)
}

// "?" query
fn query_part(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(lit(b'?'))
        .concat_emit(query, Event::Query)
        .matched(i)
}

// "#" fragment
fn fragment_part(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(lit(b'#'))
        .concat_emit(fragment, Event::Fragment)
        .matched(i)
}

// URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
fn uri(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat_emit(scheme, Event::Scheme)
        .concat(lit(b':'))
        .concat(hier_part)
        .optional(query_part)
        .optional(fragment_part)
        .matched(i)
}

// relative-ref = relative-part [ "?" query ] [ "#" fragment ]
fn relative_ref(i: &str) -> Matched<'_> {
    Rule::new(i)
        .concat(relative_part)
        .optional(query_part)
        .optional(fragment_part)
        .matched(i)
}

/// Folds the events released by a completed top-level rule into a
/// [`Parts`]. The events arrive in reading order of the input.
fn build(events: crate::grammar::Events<'_>) -> Parts<'_> {
    let mut parts = Parts::default();
    for (event, text) in events {
        match event {
            Event::Scheme => parts.scheme = Some(text),
            Event::Userinfo => parts.ensure_authority().userinfo = Some(text),
            Event::Host => parts.ensure_authority().host = text,
            Event::Port => parts.ensure_authority().port = Some(text),
            Event::PathSegment => parts.path.segments.push(text),
            Event::Query => parts.query = Some(text),
            Event::Fragment => parts.fragment = Some(text),
        }
    }
    parts.path.absolute = parts
        .path
        .segments
        .first()
        .is_some_and(|seg| seg.starts_with('/'));
    parts
}

/// Parses a URI, returning its decomposition into [`Parts`].
///
/// The whole input must match the `URI` rule; there is no partial
/// success. All views of the returned `Parts` borrow from `input`.
///
/// # Examples
///
/// ```
/// let p = uri_parts::split("https://example.com/a?q#f").unwrap();
/// assert_eq!(p.scheme, Some("https"));
/// assert_eq!(p.authority.unwrap().host, "example.com");
/// assert_eq!(p.path.segments, ["/a"]);
/// assert_eq!(p.query, Some("q"));
/// assert_eq!(p.fragment, Some("f"));
///
/// assert!(uri_parts::split("no-scheme").is_none());
/// ```
#[must_use]
pub fn split(input: &str) -> Option<Parts<'_>> {
    Rule::new(input).concat(uri).done().map(build)
}

/// Parses a URI reference: a `URI` or a `relative-ref`.
///
/// # Examples
///
/// ```
/// let p = uri_parts::split_reference("../up?q").unwrap();
/// assert!(p.scheme.is_none());
/// assert_eq!(p.path.segments, ["..", "/up"]);
/// assert_eq!(p.query, Some("q"));
/// ```
#[must_use]
pub fn split_reference(input: &str) -> Option<Parts<'_>> {
    Rule::new(input)
        .concat(uri)
        .done()
        .or_else(|| Rule::new(input).concat(relative_ref).done())
        .map(build)
}

/// Checks `s` against the bracketless `IPv6address` production.
pub(crate) fn matches_ipv6(s: &str) -> bool {
    Rule::new(s).concat(ipv6address).done().is_some()
}

/// Checks `s` against the bracketless `IPvFuture` production.
pub(crate) fn matches_ipvfuture(s: &str) -> bool {
    Rule::new(s).concat(ipvfuture).done().is_some()
}
