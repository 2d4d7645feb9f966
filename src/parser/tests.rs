#[cfg(test)]
use super::*;

fn opts() -> KvOptions {
    KvOptions {
        equals_separator: true,
        ..KvOptions::default()
    }
}

fn get(dict: &Dictionary, path: &str) -> String {
    dict.get(path)
        .unwrap_or_else(|e| panic!("Failed to get {}: {}", path, e))
        .unwrap_or_else(|| panic!("{} is null", path))
}

#[test]
fn test_section_and_comment() {
    let options = KvOptions {
        hash_comments: true,
        sections: true,
        ..opts()
    };
    let dict = KvParser::new(options)
        .unwrap()
        .parse("[a]\nk=v # comment\n")
        .expect("Failed to parse");

    assert_eq!(get(&dict, "a.k"), "v");
    let expected = Node::object([("a", Node::object([("k", Node::value("v"))]))]);
    assert_eq!(dict.root(), Some(&expected));
}

#[test]
fn test_no_separator_is_misconfiguration() {
    let err = KvParser::new(KvOptions::default()).unwrap_err();
    match err {
        ConfError::InvalidOptions { code, .. } => assert_eq!(code, Some(201)),
        other => panic!("Expected InvalidOptions, got {:?}", other),
    }
}

#[test]
fn test_nested_sections() {
    let text = "\
[server]
host = localhost
[.tls]
cert = /etc/cert.pem
[.limits]
max = 10
[client]
retries = 3
[]
top = yes
";
    let dict = Dictionary::from_ini_str(text).unwrap();
    assert_eq!(get(&dict, "server.host"), "localhost");
    assert_eq!(get(&dict, "server.tls.cert"), "/etc/cert.pem");
    assert_eq!(get(&dict, "server.tls.limits.max"), "10");
    assert_eq!(get(&dict, "client.retries"), "3");
    assert_eq!(get(&dict, "top"), "yes");
}

#[test]
fn test_dotted_keys_build_objects() {
    let dict = KvParser::new(opts())
        .unwrap()
        .parse("db.host = h\ndb.port = 5432\n")
        .unwrap();
    assert_eq!(dict.keys("db").unwrap(), vec!["host", "port"]);
}

#[test]
fn test_colon_separator_only() {
    let options = KvOptions {
        colon_separator: true,
        ..KvOptions::default()
    };
    let dict = KvParser::new(options).unwrap().parse("name: app\n").unwrap();
    assert_eq!(get(&dict, "name"), "app");

    // '=' is ordinary text when only ':' separates
    let dict = KvParser::new(options).unwrap().parse("expr: a=b\n").unwrap();
    assert_eq!(get(&dict, "expr"), "a=b");
}

#[test]
fn test_equals_preferred_over_colon() {
    let dict = Dictionary::from_ini_str("url = http://example.com:8080/x\n").unwrap();
    assert_eq!(get(&dict, "url"), "http://example.com:8080/x");
}

#[test]
fn test_too_many_separators_reports_line() {
    let err = Dictionary::from_ini_str("ok = 1\n\nbad = a = b\n").unwrap_err();
    match err {
        ConfError::Parse { line, content, code, .. } => {
            assert_eq!(line, 3);
            assert_eq!(content, "bad = a = b");
            assert_eq!(code, Some(203));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_value() {
    let err = Dictionary::from_ini_str("[s]\nflag\n").unwrap_err();
    match err {
        ConfError::Parse { line, code, .. } => {
            assert_eq!(line, 2);
            assert_eq!(code, Some(202));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }

    let dict = Dictionary::from_properties_str("flag\n").unwrap();
    assert_eq!(get(&dict, "flag"), "");
}

#[test]
fn test_empty_value_after_separator() {
    let dict = Dictionary::from_ini_str("k =\n").unwrap();
    assert_eq!(get(&dict, "k"), "");
}

#[test]
fn test_multiline_continuation() {
    let dict = Dictionary::from_properties_str("m = one \\\ntwo").unwrap();
    assert_eq!(get(&dict, "m"), "one two");
}

#[test]
fn test_multiline_over_several_lines_with_comments() {
    let text = "\
list = a, \\
b, \\
c # trailing comment
after = x
";
    let dict = Dictionary::from_properties_str(text).unwrap();
    assert_eq!(get(&dict, "list"), "a, b, c");
    assert_eq!(get(&dict, "after"), "x");
}

#[test]
fn test_continuation_at_end_of_input() {
    let dict = Dictionary::from_properties_str("tail = end \\").unwrap();
    assert_eq!(get(&dict, "tail"), "end");
}

#[test]
fn test_backslash_kept_without_multiline() {
    let dict = Dictionary::from_ini_str("path = C:\\dir\\\n").unwrap();
    assert_eq!(get(&dict, "path"), "C:\\dir\\");
}

#[test]
fn test_section_headers_ignored_mid_continuation() {
    let options = KvOptions {
        sections: true,
        multiline: true,
        ..opts()
    };
    let dict = KvParser::new(options)
        .unwrap()
        .parse("k = first \\\n[not-a-section]\nnext = 1\n")
        .unwrap();
    assert_eq!(get(&dict, "k"), "first [not-a-section]");
    assert_eq!(get(&dict, "next"), "1");
}

#[test]
fn test_quote_stripping() {
    let dict = Dictionary::from_ini_str("a = \"quoted value\"\nb = 'single'\nc = \"mismatch'\nd = \"\n").unwrap();
    assert_eq!(get(&dict, "a"), "quoted value");
    assert_eq!(get(&dict, "b"), "single");
    assert_eq!(get(&dict, "c"), "\"mismatch'");
    assert_eq!(get(&dict, "d"), "\"");

    // properties keep quotes
    let dict = Dictionary::from_properties_str("a = \"quoted\"\n").unwrap();
    assert_eq!(get(&dict, "a"), "\"quoted\"");
}

#[test]
fn test_comment_styles() {
    let ini = Dictionary::from_ini_str("; full line\n# another\na = 1 ; note\nb = 2 ! kept\n").unwrap();
    assert_eq!(get(&ini, "a"), "1");
    assert_eq!(get(&ini, "b"), "2 ! kept");

    let props = Dictionary::from_properties_str("! bang comment\nc = 3 ! note\nd = 4 ; kept\n").unwrap();
    assert_eq!(get(&props, "c"), "3");
    assert_eq!(get(&props, "d"), "4 ; kept");
}

#[test]
fn test_later_keys_overwrite() {
    let dict = KvParser::new(opts()).unwrap().parse("a = 1\na.b = 2\n").unwrap();
    assert_eq!(get(&dict, "a.b"), "2");

    let dict = KvParser::new(opts()).unwrap().parse("a.b = 2\na = 1\n").unwrap();
    assert_eq!(get(&dict, "a"), "1");
    assert!(!dict.has("a.b"));
}

#[test]
fn test_array_key_is_parse_error() {
    let err = KvParser::new(opts()).unwrap().parse("x = 1\nitems[0] = a\n").unwrap_err();
    match err {
        ConfError::Parse { line, code, message, .. } => {
            assert_eq!(line, 2);
            assert_eq!(code, Some(205));
            assert!(message.contains("not supported"));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_empty_text_yields_empty_object() {
    let dict = Dictionary::from_ini_str("\n  \n# only comments\n").unwrap();
    assert_eq!(dict.keys(".").unwrap(), Vec::<String>::new());
    assert!(dict.get("anything").unwrap_err().is_not_found());
}

#[test]
fn test_parse_into_existing_dictionary() {
    let parser = KvParser::new(opts()).unwrap();
    let mut dict = parser.parse("a = 1\n").unwrap();
    let written = parser.parse_into("b = 2\nc = 3\n", &mut dict).unwrap();
    assert_eq!(written, 2);
    assert_eq!(dict.keys(".").unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: KvOptions =
        serde_json::from_str(r#"{"equals_separator": true, "hash_comments": true}"#).unwrap();
    assert!(options.equals_separator);
    assert!(options.hash_comments);
    assert!(!options.sections);
    assert_eq!(KvParser::new(options).unwrap().options(), &options);
}

#[test]
fn test_dot_only_key_is_rejected() {
    for text in [
        "[server]\nhost = a\nport = 1\n[]\n. = x\nother = y\n",
        "[server]\nhost = a\n[]\n.. = x\n",
        "[server]\nhost = a\n . . = x\n",
    ] {
        match Dictionary::from_ini_str(text).unwrap_err() {
            ConfError::Parse { code, message, .. } => {
                assert_eq!(code, Some(204));
                assert!(message.contains("Missing key"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    // trailing dots are normal path noise, not a missing key
    let dict = Dictionary::from_ini_str("[server]\nhost = a\n[]\na.. = x\n").unwrap();
    assert_eq!(get(&dict, "a"), "x");
    assert_eq!(get(&dict, "server.host"), "a");
}

#[test]
fn test_dot_only_key_keeps_existing_dictionary() {
    let parser = KvParser::new(opts()).unwrap();
    let mut dict = parser.parse("kept = 1\n").unwrap();
    let err = parser.parse_into("next = 2\n. = wipe\n", &mut dict).unwrap_err();
    assert_eq!(err.code(), Some(204));
    assert_eq!(get(&dict, "kept"), "1");
    assert_eq!(get(&dict, "next"), "2");
}
