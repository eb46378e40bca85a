use uri_parts::{compose, join, join_str, split, split_reference};

const BASE: &str = "http://a/b/c/d;p?q";

#[track_caller]
fn pass(reference: &str, expected: &str) {
    let target = join_str(BASE, reference, true)
        .unwrap_or_else(|| panic!("{BASE} + {reference} should resolve"));
    assert_eq!(compose(&target), expected, "{BASE} + {reference}");
}

#[test]
fn normal_examples() {
    // Section 5.4.1 of RFC 3986.
    pass("g:h", "g:h");
    pass("g", "http://a/b/c/g");
    pass("./g", "http://a/b/c/g");
    pass("g/", "http://a/b/c/g/");
    pass("/g", "http://a/g");
    pass("//g", "http://g");
    pass("?y", "http://a/b/c/d;p?y");
    pass("g?y", "http://a/b/c/g?y");
    pass("#s", "http://a/b/c/d;p?q#s");
    pass("g#s", "http://a/b/c/g#s");
    pass("g?y#s", "http://a/b/c/g?y#s");
    pass(";x", "http://a/b/c/;x");
    pass("g;x", "http://a/b/c/g;x");
    pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    pass("", "http://a/b/c/d;p?q");
    pass(".", "http://a/b/c/");
    pass("./", "http://a/b/c/");
    pass("..", "http://a/b/");
    pass("../", "http://a/b/");
    pass("../g", "http://a/b/g");
    pass("../..", "http://a/");
    pass("../../", "http://a/");
    pass("../../g", "http://a/g");
}

#[test]
fn abnormal_examples() {
    // Section 5.4.2 of RFC 3986.
    pass("../../../g", "http://a/g");
    pass("../../../../g", "http://a/g");

    pass("/./g", "http://a/g");
    pass("/../g", "http://a/g");
    pass("g.", "http://a/b/c/g.");
    pass(".g", "http://a/b/c/.g");
    pass("g..", "http://a/b/c/g..");
    pass("..g", "http://a/b/c/..g");

    pass("./../g", "http://a/b/g");
    pass("./g/.", "http://a/b/c/g/");
    pass("g/./h", "http://a/b/c/g/h");
    pass("g/../h", "http://a/b/c/h");
    pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    pass("g;x=1/../y", "http://a/b/c/y");

    // Dot segments in query and fragment are data, not path.
    pass("g?y/./x", "http://a/b/c/g?y/./x");
    pass("g?y/../x", "http://a/b/c/g?y/../x");
    pass("g#s/./x", "http://a/b/c/g#s/./x");
    pass("g#s/../x", "http://a/b/c/g#s/../x");

    pass("http:g", "http:g");
}

#[test]
fn strictness() {
    let target = join_str(BASE, "http:g", false).unwrap();
    assert_eq!(compose(&target), "http://a/b/c/g");

    // Scheme comparison is case-insensitive.
    let target = join_str(BASE, "HTTP:g", false).unwrap();
    assert_eq!(compose(&target), "http://a/b/c/g");

    // A different scheme stays absolute even when lax.
    let target = join_str(BASE, "ftp:g", false).unwrap();
    assert_eq!(compose(&target), "ftp:g");
}

#[test]
fn empty_base_path() {
    let target = join_str("http://a", "g", true).unwrap();
    assert_eq!(compose(&target), "http://a/g");

    let target = join_str("http://a", "../g", true).unwrap();
    assert_eq!(compose(&target), "http://a/g");

    let target = join_str("http://a", "?y", true).unwrap();
    assert_eq!(compose(&target), "http://a?y");
}

#[test]
fn opaque_base() {
    let target = join_str("mailto:a@b", "x", true).unwrap();
    assert_eq!(compose(&target), "mailto:x");

    let target = join_str("urn:a:b", "?q", true).unwrap();
    assert_eq!(compose(&target), "urn:a:b?q");

    let target = join_str("urn:a:b", "#f", true).unwrap();
    assert_eq!(compose(&target), "urn:a:b#f");
}

#[test]
fn join_on_parts() {
    let base = split(BASE).unwrap();
    let reference = split_reference("../g?q2#f2").unwrap();
    let target = join(&base, &reference, true);
    assert_eq!(target.scheme, Some("http"));
    assert_eq!(target.authority.as_ref().unwrap().host, "a");
    assert_eq!(target.path.segments, ["/b", "/g"]);
    assert_eq!(target.query, Some("q2"));
    assert_eq!(target.fragment, Some("f2"));
    assert!(target.valid());
}

#[test]
fn join_str_rejects_garbage() {
    assert!(join_str("not a uri", "g", true).is_none());
    assert!(join_str(BASE, "not a ref", true).is_none());
}

#[test]
fn target_authority_comes_from_reference() {
    let target = join_str(BASE, "//user@h:1/p?q2", true).unwrap();
    assert_eq!(compose(&target), "http://user@h:1/p?q2");
}
