#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Relative resolution, file URL quirks, dot-segment handling, and the
/// parser's structural properties (round-trip, canonical IP forms,
/// termination).
use wurl::{parse, serialize, Host, ParseError, Url, UrlRecord};

fn parse_with_base(input: &str, base: &str) -> Result<UrlRecord, ParseError> {
    let base = parse(base, None)?;
    parse(input, Some(&base))
}

fn href(input: &str, base: &str) -> String {
    serialize(&parse_with_base(input, base).unwrap())
}

#[test]
fn test_relative_path_resolution() {
    assert_eq!(href("d", "http://a/b/c"), "http://a/b/d");
    assert_eq!(href("./d", "http://a/b/c"), "http://a/b/d");
    assert_eq!(href("../d", "http://a/b/c"), "http://a/d");
    assert_eq!(href("/d", "http://a/b/c"), "http://a/d");
    assert_eq!(href("d/", "http://a/b/c"), "http://a/b/d/");
}

#[test]
fn test_relative_empty_input_drops_fragment_only() {
    assert_eq!(href("", "http://a/b?q#f"), "http://a/b?q");
}

#[test]
fn test_relative_query_and_fragment() {
    assert_eq!(href("?x=y", "http://a/b?old#f"), "http://a/b?x=y");
    assert_eq!(href("#f2", "http://a/b?q#f1"), "http://a/b?q#f2");
}

#[test]
fn test_protocol_relative() {
    assert_eq!(href("//other.org/p", "http://a/b"), "http://other.org/p");
}

#[test]
fn test_same_scheme_relative() {
    assert_eq!(href("http:d", "http://a/b/c"), "http://a/b/d");
    assert_eq!(href("http:/d", "http://a/b/c"), "http://a/d");
    assert_eq!(href("http://h/d", "http://a/b/c"), "http://h/d");
}

#[test]
fn test_dot_segments_mixed_with_percent_forms() {
    // double-dot pops, single-dot and %2e are skipped, the empty segment
    // from "//" survives
    assert_eq!(href("..//./%2e/a", "http://a/b/c/d"), "http://a/b//a");
    assert_eq!(href("%2e%2e/d", "http://a/b/c"), "http://a/d");
    assert_eq!(href(".%2E/d", "http://a/b/c"), "http://a/d");
}

#[test]
fn test_trailing_dot_segments() {
    assert_eq!(href("..", "http://a/b/c"), "http://a/");
    assert_eq!(href("x/..", "http://a/b/c"), "http://a/b/");
    assert_eq!(href(".", "http://a/b/c"), "http://a/b/");
}

#[test]
fn test_backslash_is_slash_for_special() {
    assert_eq!(href("\\d", "http://a/b/c"), "http://a/d");
    assert_eq!(href("..\\d", "http://a/b/c"), "http://a/d");
    let record = parse_with_base("\\d", "http://a/b/c").unwrap();
    assert!(record.validation_error);
}

#[test]
fn test_backslash_stays_literal_for_non_special() {
    let record = parse("foo:/a\\b", None).unwrap();
    assert_eq!(record.path, vec!["a\\b"]);
}

#[test]
fn test_no_scheme_and_unusable_base() {
    assert_eq!(
        parse_with_base("d", "mailto:x").unwrap_err(),
        ParseError::InvalidSyntax
    );
    // fragment-only input works even on a cannot-be-a-base base
    assert_eq!(href("#f", "mailto:x"), "mailto:x#f");
}

#[test]
fn test_relative_on_file_base() {
    assert_eq!(href("d", "file:///dir/f"), "file:///dir/d");
    assert_eq!(href("/d", "file:///dir/f"), "file:///d");
    assert_eq!(href("", "file:///dir/f?q"), "file:///dir/f?q");
}

#[test]
fn test_file_drive_letter_from_base() {
    // the base's drive letter is kept when the input starts from root
    assert_eq!(href("/d", "file:///C:/dir/f"), "file:///C:/d");
    // a drive letter in the input replaces the base path wholesale
    assert_eq!(href("D|/e", "file:///C:/dir/f"), "file:///D:/e");
}

#[test]
fn test_file_drive_letter_without_authority() {
    let record = parse("file:c:/x", None).unwrap();
    assert_eq!(record.path, vec!["c:", "x"]);
    assert_eq!(serialize(&record), "file:///c:/x");

    let record = parse("file://C:/x", None).unwrap();
    assert_eq!(record.host, Some(Host::Empty));
    assert_eq!(serialize(&record), "file:///C:/x");
}

#[test]
fn test_file_leading_empty_segments_collapse() {
    let record = parse("file:////server", None).unwrap();
    assert_eq!(record.path, vec!["server"]);
    assert!(record.validation_error);
}

#[test]
fn test_ipv6_forms() {
    assert_eq!(
        serialize(&parse("http://[::127.0.0.1]/", None).unwrap()),
        "http://[::7f00:1]/"
    );
    assert_eq!(
        serialize(&parse("http://[2001:DB8::1]/", None).unwrap()),
        "http://[2001:db8::1]/"
    );
    assert!(parse("http://[::1/", None).is_err());
    assert!(parse("http://[1::2::3]/", None).is_err());
    // zone identifiers are not URL hosts
    assert!(parse("http://[fe80::1%25eth0]/", None).is_err());
}

#[test]
fn test_ipv4_edge_forms() {
    assert_eq!(
        serialize(&parse("http://0300.0250.01.01/", None).unwrap()),
        "http://192.168.1.1/"
    );
    // five parts is a domain, not an address
    let record = parse("http://1.2.3.4.5/", None).unwrap();
    assert_eq!(record.host, Some(Host::Domain("1.2.3.4.5".into())));
    // four numeric parts out of range is fatal
    assert!(parse("http://256.256.256.256/", None).is_err());
}

#[test]
fn test_forbidden_host_bytes() {
    assert!(parse("http://exa mple.com/", None).is_err());
    assert!(parse("http://exa%00mple.com/", None).is_err());
    // percent is forbidden in domains once decoding is done
    assert!(parse("http://a%2Fb/", None).is_err());
    // but an opaque host just refuses the raw delimiters
    assert!(parse("foo://a b/", None).is_err());
    assert!(Url::can_parse("foo://a%2Fb/", None));
}

#[test]
fn test_host_state_ignores_colon_inside_brackets() {
    let record = parse("http://[::1]:8080/x", None).unwrap();
    assert_eq!(record.port, Some(8080));
    assert_eq!(serialize(&record), "http://[::1]:8080/x");
}

#[test]
fn test_port_rejects_garbage() {
    assert_eq!(
        parse("http://h:8a/", None).unwrap_err(),
        ParseError::InvalidPort
    );
}

// schemes come out lowercase and well-formed
#[test]
fn test_scheme_shape_on_success() {
    for input in ["HTTP://h/", "hT+t-P.x:y", "weird-scheme:opaque"] {
        let record = parse(input, None).unwrap();
        assert!(record.scheme.bytes().all(|b| matches!(
            b,
            b'a'..=b'z' | b'0'..=b'9' | b'+' | b'-' | b'.'
        )));
        assert!(record.scheme.as_bytes()[0].is_ascii_lowercase());
    }
}

// special schemes always end up with a host
#[test]
fn test_special_implies_host() {
    for input in ["http://h/x", "ftp://h/", "ws://h/a", "file:///x", "file:/x"] {
        let record = parse(input, None).unwrap();
        if record.scheme == "file" {
            assert!(matches!(record.host, None | Some(Host::Empty)));
        } else {
            assert!(record.host.is_some());
        }
    }
}

// serialize-then-parse recovers the same record, for many shapes of input
#[test]
fn test_round_trip_generated_urls() {
    let schemes = ["http", "https", "ftp", "wss", "foo"];
    let userinfos = ["", "user@", "user:pw@", ":pw@"];
    let hosts = ["example.com", "127.0.0.1", "[2001:db8::1]", "h"];
    let ports = ["", ":8123"];
    let paths = ["/", "/a", "/a/b", "/a%20b/c", "/a/../b", "/~x;y"];
    let queries = ["", "?q=1&r=%20"];
    let fragments = ["", "#frag"];

    let mut checked = 0;
    for scheme in schemes {
        for userinfo in userinfos {
            for host in hosts {
                for port in ports {
                    for path in paths {
                        for query in queries {
                            for fragment in fragments {
                                let input = format!(
                                    "{scheme}://{userinfo}{host}{port}{path}{query}{fragment}"
                                );
                                let record = parse(&input, None).unwrap();
                                let first = serialize(&record);
                                let reparsed = parse(&first, None).unwrap();
                                assert_eq!(record, reparsed, "round-trip failed for {input}");
                                assert_eq!(first, serialize(&reparsed));
                                checked += 1;
                            }
                        }
                    }
                }
            }
        }
    }
    assert_eq!(checked, 5 * 4 * 4 * 2 * 6 * 2 * 2);
}

// round-trip also holds for records produced by relative resolution
#[test]
fn test_round_trip_after_resolution() {
    let cases = [
        ("..//./%2e/a", "http://a/b/c/d"),
        ("#f", "mailto:x"),
        ("D|/e", "file:///C:/dir/f"),
        ("?q", "https://u:p@h:8123/x/y"),
    ];
    for (input, base) in cases {
        let record = parse_with_base(input, base).unwrap();
        let reparsed = parse(&serialize(&record), None).unwrap();
        assert_eq!(record, reparsed);
    }
}

// IP hosts serialize in their canonical forms
#[test]
fn test_canonical_ip_serialization() {
    let record = parse("http://0x7F.0.0.1/", None).unwrap();
    assert_eq!(serialize(&record), "http://127.0.0.1/");

    let record = parse("http://[0:0:0:0:0:0:0:1]/", None).unwrap();
    assert_eq!(serialize(&record), "http://[::1]/");

    let record = parse("http://[1:0:0:2:0:0:0:3]/", None).unwrap();
    // the longest run wins; ties go leftmost elsewhere
    assert_eq!(serialize(&record), "http://[1:0:0:2::3]/");
}

// opaque paths stay a single element
#[test]
fn test_cannot_be_a_base_path_stays_single() {
    for input in ["mailto:a/b/c", "data:x?q#f", "e:@E"] {
        let record = parse(input, None).unwrap();
        assert!(record.cannot_be_a_base_url);
        assert_eq!(record.path.len(), 1);
    }
}

// the machine finishes on adversarial inputs
#[test]
fn test_terminates_on_pathological_inputs() {
    let slashes = "/".repeat(4096);
    assert!(parse(&format!("http://h{slashes}"), None).is_ok());

    let dots = "../".repeat(2048);
    assert!(parse(&format!("http://h/{dots}"), None).is_ok());

    // every `@` reopens the userinfo; the machine still finishes and fails
    let atsigns = "@".repeat(2048);
    assert!(parse(&format!("foo://{atsigns}/"), None).is_err());
}

#[test]
fn test_opaque_path_validation_flag() {
    // '<' is not a URL code point; recoverable, so only the flag is raised
    let record = parse("foo:a<b", None).unwrap();
    assert!(record.validation_error);
    assert_eq!(record.path, vec!["a<b"]);

    // '%' not starting an escape is also just flagged
    let record = parse("foo:100%", None).unwrap();
    assert!(record.validation_error);
    assert_eq!(serialize(&record), "foo:100%");
}

#[test]
fn test_fragment_keeps_nul_out() {
    let record = parse("http://h/#a\u{0}b", None).unwrap();
    assert_eq!(record.fragment.as_deref(), Some("ab"));
    assert!(record.validation_error);
}

#[test]
fn test_non_ascii_is_percent_encoded_in_paths() {
    let record = parse("http://h/é", None).unwrap();
    assert_eq!(record.path, vec!["%C3%A9"]);
}
