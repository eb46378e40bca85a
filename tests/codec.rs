use uri_parts::punycode;
use uri_parts::{compose, decode, encode, split, Authority, DecodeError, Parts, Path};

fn sample<'a>() -> Parts<'a> {
    Parts {
        scheme: Some("https"),
        authority: Some(Authority {
            userinfo: Some("user"),
            host: "M\u{FC}nchen.de",
            port: Some("1234"),
        }),
        path: Path {
            absolute: true,
            segments: vec!["~\u{A1}"],
        },
        query: Some("a%b"),
        fragment: Some("c%d"),
    }
}

#[test]
fn nothing_to_encode_leaves_store_empty() {
    let input = Parts {
        scheme: Some("https"),
        authority: Some(Authority {
            userinfo: Some("user"),
            host: "host",
            port: Some("1234"),
        }),
        path: Path {
            absolute: true,
            segments: vec!["a", "b"],
        },
        query: Some("query"),
        fragment: Some("fragment"),
    };
    assert!(input.valid());

    let mut store = String::new();
    let output = encode(&mut store, &input);
    assert!(output.valid());
    assert_eq!(output, input);
    assert!(store.is_empty(), "nothing to encode, store should be empty");
}

#[test]
fn encode_transforms_per_field() {
    let mut store = String::new();
    let encoded = encode(&mut store, &sample());
    assert!(encoded.valid());

    let auth = encoded.authority.as_ref().unwrap();
    assert_eq!(auth.userinfo, Some("user"));
    assert_eq!(auth.host, "xn--Mnchen-3ya.de");
    assert_eq!(auth.port, Some("1234"));
    assert_eq!(encoded.path.segments, ["~%C2%A1"]);
    assert_eq!(encoded.query, Some("a%25b"));
    assert_eq!(encoded.fragment, Some("c%25d"));

    // Transformed fields are packed into the store in field order.
    assert_eq!(store, "xn--Mnchen-3ya.de~%C2%A1a%25bc%25d");
}

#[test]
fn encode_decode_round_trip() {
    let original = sample();

    let mut encode_store = String::new();
    let encoded = encode(&mut encode_store, &original);
    assert!(encoded.valid());

    let mut decode_store = String::new();
    let decoded = decode(&mut decode_store, &encoded).unwrap();
    assert_eq!(decoded, original);

    // Re-encoding the decoded form reproduces the encoded form byte for
    // byte.
    let mut store2 = String::new();
    let reencoded = encode(&mut store2, &decoded);
    assert_eq!(reencoded, encoded);
}

#[test]
fn idn_host_from_split() {
    let input = "https://xn--Mnchen-3ya.de/path";
    let p = split(input).unwrap();

    // An ASCII host is already encoded; encode is the identity.
    let mut store = String::new();
    let encoded = encode(&mut store, &p);
    assert_eq!(encoded, p);
    assert!(store.is_empty());

    let mut store = String::new();
    let decoded = decode(&mut store, &p).unwrap();
    assert_eq!(decoded.authority.as_ref().unwrap().host, "M\u{FC}nchen.de");
    assert_eq!(decoded.path.segments, ["/path"]);
}

#[test]
fn scheme_and_port_pass_through() {
    // '%' in scheme or port would be grammar-invalid anyway; the
    // pipeline must not touch those fields.
    let mut p = Parts {
        scheme: Some("a+b"),
        ..Parts::default()
    };
    let auth = p.ensure_authority();
    auth.host = "h";
    auth.port = Some("8080");

    let mut store = String::new();
    let encoded = encode(&mut store, &p);
    assert_eq!(encoded, p);
    assert!(store.is_empty());
}

#[test]
fn decode_error_aborts() {
    let mut p = Parts::default();
    p.ensure_authority().host = "xn--zz";

    let mut store = String::new();
    assert_eq!(
        decode(&mut store, &p),
        Err(DecodeError::Punycode(punycode::DecodeError::BadInput))
    );
    assert!(store.is_empty());

    let mut p = Parts::default();
    p.ensure_authority().host = "xn--99999999999999999999999999999999999999";
    let mut store = String::new();
    assert_eq!(
        decode(&mut store, &p),
        Err(DecodeError::Punycode(punycode::DecodeError::Overflow))
    );
}

#[test]
fn decode_rejects_non_utf8_octets() {
    let p = split("Z://-@[b8::C:AB:2b]:16?%FC:").unwrap();
    let mut store = String::new();
    assert_eq!(decode(&mut store, &p), Err(DecodeError::InvalidUtf8));

    // The same octets as a UTF-8 sequence decode fine.
    let p = split("s://h?%C3%BC").unwrap();
    let mut store = String::new();
    let decoded = decode(&mut store, &p).unwrap();
    assert_eq!(decoded.query, Some("\u{FC}"));
}

#[test]
fn encode_then_compose_agrees_with_split() {
    let p = sample();
    let mut store = String::new();
    let encoded = encode(&mut store, &p);
    let text = compose(&encoded);
    assert_eq!(
        text,
        "https://user@xn--Mnchen-3ya.de:1234/~%C2%A1?a%25b#c%25d"
    );
    // The reparsed segments carry their leading '/', so compare texts.
    assert_eq!(compose(&split(&text).unwrap()), text);
}
