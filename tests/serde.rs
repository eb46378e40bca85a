#![cfg(feature = "serde")]

use uri_parts::{compose, split, split_reference, Parts};

#[test]
fn serializes_as_composed_text() {
    let p = split("https://user:pw@example.com:8080/a/b?x=1#f").unwrap();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "\"https://user:pw@example.com:8080/a/b?x=1#f\"");
}

#[test]
fn deserializes_borrowed_from_input() {
    let json = "\"https://user:pw@example.com:8080/a/b?x=1#f\"";
    let p: Parts<'_> = serde_json::from_str(json).unwrap();
    assert_eq!(p.scheme, Some("https"));
    let a = p.authority.as_ref().unwrap();
    assert_eq!(a.userinfo, Some("user:pw"));
    assert_eq!(a.host, "example.com");
    assert_eq!(a.port, Some("8080"));
    assert_eq!(p.path.segments, ["/a", "/b"]);
    assert_eq!(p.query, Some("x=1"));
    assert_eq!(p.fragment, Some("f"));

    // Relative references deserialize too.
    let p: Parts<'_> = serde_json::from_str("\"../g?q\"").unwrap();
    assert!(p.scheme.is_none());
    assert_eq!(p.path.segments, ["..", "/g"]);
    assert_eq!(p.query, Some("q"));
}

#[test]
fn round_trip() {
    for s in [
        "https://user:pw@example.com:8080/a/b?x=1#f",
        "Z://-@[b8::C:AB:2b]:16?%FC:",
        "file:///etc/hosts",
        "../g?q#f",
        "",
    ] {
        let original = split(s).or_else(|| split_reference(s)).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let back: Parts<'_> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original, "{s}");
        assert_eq!(compose(&back), s, "{s}");
    }
}

#[test]
fn rejects_invalid_uri_text() {
    assert!(serde_json::from_str::<Parts<'_>>("\"not a uri\"").is_err());
    assert!(serde_json::from_str::<Parts<'_>>("42").is_err());
}
