//! A Punycode codec as per [RFC 3492], with domain-name wrappers that
//! apply the `xn--` ACE prefix of [RFC 3490].
//!
//! [`encode_label`] and [`decode_label`] transform a single label between
//! Unicode text and its ASCII form. [`encode_domain`] and [`decode_domain`]
//! process a full dot-separated domain, encoding or decoding each label
//! independently and preserving the dots.
//!
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492/
//! [RFC 3490]: https://datatracker.ietf.org/doc/html/rfc3490/

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

const BASE: usize = 36;
const TMIN: usize = 1;
const TMAX: usize = 26;
const SKEW: usize = 38;
const DAMP: usize = 700;
const INITIAL_BIAS: usize = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: u8 = b'-';

/// The ACE prefix marking an encoded label, `"xn--"`.
pub const ACE_PREFIX: &str = "xn--";

/// An error occurred when decoding a Punycode label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The label is malformed: a truncated or non-base-36 variable-length
    /// integer, a non-ASCII character in the literal portion, or a decoded
    /// value that is not a Unicode scalar value.
    BadInput,
    /// Arithmetic overflow while decoding a variable-length integer or
    /// deriving the next code point.
    Overflow,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::BadInput => "bad input",
            Self::Overflow => "overflow",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Returns the basic code point encoding the digit `d`.
///
/// 0..25 maps to ASCII a..z; 26..35 maps to ASCII 0..9.
fn encode_digit(d: usize) -> char {
    debug_assert!(d < BASE);
    if d < 26 {
        (d as u8 + b'a') as char
    } else {
        (d as u8 - 26 + b'0') as char
    }
}

/// Returns the value of the basic code point `x` as a digit, or `None`
/// if it does not represent one. Letters are accepted in either case.
fn decode_digit(x: u8) -> Option<usize> {
    match x {
        b'0'..=b'9' => Some((x - b'0') as usize + 26),
        b'A'..=b'Z' => Some((x - b'A') as usize),
        b'a'..=b'z' => Some((x - b'a') as usize),
        _ => None,
    }
}

fn clamp(k: usize, bias: usize) -> usize {
    if k <= bias {
        TMIN
    } else if k >= bias + TMAX {
        TMAX
    } else {
        k - bias
    }
}

fn adapt(mut delta: usize, num_points: usize, first_time: bool) -> usize {
    delta = if first_time { delta / DAMP } else { delta >> 1 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + (BASE - TMIN + 1) * delta / (delta + SKEW)
}

/// Writes `q` as a generalized variable-length integer.
fn encode_vli(mut q: usize, bias: usize, out: &mut String) {
    let mut k = BASE;
    loop {
        let t = clamp(k, bias);
        if q < t {
            break;
        }
        out.push(encode_digit(t + (q - t) % (BASE - t)));
        q = (q - t) / (BASE - t);
        k += BASE;
    }
    out.push(encode_digit(q));
}

/// Encodes a single label, appending the ASCII form to `out`.
///
/// Returns `true` iff any code point of `label` was non-basic (at or
/// above U+0080). When `allow_plain` is set and the label is all-basic,
/// it is copied through unchanged and no delimiter is appended.
///
/// The output carries no ACE prefix; see [`encode_domain`] for the
/// prefixing wrapper.
pub fn encode_label(label: &str, allow_plain: bool, out: &mut String) -> bool {
    let mut non_basic: Vec<u32> = label
        .chars()
        .filter(|c| !c.is_ascii())
        .map(|c| c as u32)
        .collect();

    if allow_plain && non_basic.is_empty() {
        out.push_str(label);
        return false;
    }

    // Basic code points are copied to the output in input order, followed
    // by a delimiter if any were copied.
    let mut num_basics = 0;
    for c in label.chars().filter(char::is_ascii) {
        out.push(c);
        num_basics += 1;
    }
    if num_basics > 0 {
        out.push(DELIMITER as char);
    }

    non_basic.sort_unstable();
    non_basic.dedup();

    let mut i = num_basics;
    let mut n = INITIAL_N;
    let mut delta = 0usize;
    let mut bias = INITIAL_BIAS;
    for &m in &non_basic {
        debug_assert!(m >= n);
        delta += (m - n) as usize * (i + 1);
        n = m;
        for c in label.chars() {
            let c = c as u32;
            if c < n {
                delta += 1;
            } else if c == n {
                encode_vli(delta, bias, out);
                bias = adapt(delta, i + 1, i == num_basics);
                delta = 0;
                i += 1;
            }
        }
        delta += 1;
        n += 1;
    }
    !non_basic.is_empty()
}

/// Decodes a single label from its ASCII form (without ACE prefix).
///
/// # Errors
///
/// Returns [`DecodeError::BadInput`] on a malformed label and
/// [`DecodeError::Overflow`] on arithmetic overflow.
pub fn decode_label(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut output: Vec<char> = Vec::new();

    // Everything before the last delimiter (if there is one) is literal
    // basic code points.
    let b = match bytes.iter().rposition(|&x| x == DELIMITER) {
        Some(p) if p > 0 => p,
        _ => 0,
    };
    if b > 0 {
        let literal = &input[..b];
        if !literal.is_ascii() {
            return Err(DecodeError::BadInput);
        }
        output.extend(literal.chars());
    }

    // The main decoding loop. Start just after the last delimiter if any
    // basic code points were copied; start at the beginning otherwise.
    let rest = &bytes[if b > 0 { b + 1 } else { 0 }..];

    let mut n = INITIAL_N;
    let mut i = 0usize;
    let mut bias = INITIAL_BIAS;
    let mut pos = 0;
    while pos < rest.len() {
        // Decode a generalized variable-length integer into delta, which
        // gets added to i. The overflow checking is easier if we increase
        // i as we go, then subtract off its starting value at the end to
        // obtain delta.
        let old_i = i;
        let mut w = 1usize;
        let mut k = BASE;
        loop {
            let Some(&x) = rest.get(pos) else {
                return Err(DecodeError::BadInput);
            };
            pos += 1;
            let digit = decode_digit(x).ok_or(DecodeError::BadInput)?;
            i = digit
                .checked_mul(w)
                .and_then(|add| i.checked_add(add))
                .ok_or(DecodeError::Overflow)?;
            let t = clamp(k, bias);
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t).ok_or(DecodeError::Overflow)?;
            k += BASE;
        }

        let len_plus_one = output.len() + 1;
        bias = adapt(i - old_i, len_plus_one, old_i == 0);

        // i was supposed to wrap around from len+1 to 0, incrementing n
        // each time, so we'll fix that now.
        let steps = u32::try_from(i / len_plus_one).map_err(|_| DecodeError::Overflow)?;
        n = n.checked_add(steps).ok_or(DecodeError::Overflow)?;
        i %= len_plus_one;

        // Insert n into the output at position i.
        let c = char::from_u32(n).ok_or(DecodeError::BadInput)?;
        output.insert(i, c);
        i += 1;
    }
    Ok(output.into_iter().collect())
}

/// Encodes a dot-separated domain, appending the result to `out`.
///
/// Each label containing a non-basic code point is encoded and prefixed
/// with [`ACE_PREFIX`]; all-basic labels are copied unchanged. Dots are
/// preserved literally.
///
/// Returns `true` iff any label was encoded.
///
/// # Examples
///
/// ```
/// let mut out = String::new();
/// assert!(uri_parts::punycode::encode_domain("M\u{FC}nchen.de", &mut out));
/// assert_eq!(out, "xn--Mnchen-3ya.de");
/// ```
pub fn encode_domain(domain: &str, out: &mut String) -> bool {
    let mut any = false;
    for (i, label) in domain.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        let mut encoded = String::new();
        if encode_label(label, true, &mut encoded) {
            out.push_str(ACE_PREFIX);
            any = true;
        }
        out.push_str(&encoded);
    }
    any
}

/// Returns the exact length [`encode_domain`] would append for `domain`,
/// or 0 when no label needs encoding.
#[must_use]
pub fn encoded_size(domain: &str) -> usize {
    if domain.is_ascii() {
        return 0;
    }
    let mut out = String::new();
    encode_domain(domain, &mut out);
    out.len()
}

/// Decodes a dot-separated domain, appending the result to `out`.
///
/// Labels beginning with [`ACE_PREFIX`] are decoded after stripping the
/// prefix; the rest are copied literally. Dots are preserved.
///
/// Returns `true` iff any label was decoded.
///
/// # Errors
///
/// Propagates the first [`DecodeError`] from a failing label.
pub fn decode_domain(domain: &str, out: &mut String) -> Result<bool, DecodeError> {
    let mut any = false;
    for (i, label) in domain.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        match label.strip_prefix(ACE_PREFIX) {
            Some(encoded) => {
                out.push_str(&decode_label(encoded)?);
                any = true;
            }
            None => out.push_str(label),
        }
    }
    Ok(any)
}

/// Returns the exact length [`decode_domain`] would append for `domain`,
/// or 0 when no label carries the ACE prefix.
///
/// # Errors
///
/// Propagates the first [`DecodeError`] from a failing label.
pub fn decoded_size(domain: &str) -> Result<usize, DecodeError> {
    if domain.split('.').all(|label| !label.starts_with(ACE_PREFIX)) {
        return Ok(0);
    }
    let mut out = String::new();
    decode_domain(domain, &mut out)?;
    Ok(out.len())
}
