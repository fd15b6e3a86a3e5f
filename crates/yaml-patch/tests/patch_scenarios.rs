use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use yaml_patch::codec::yaml::{decode_document, decode_patch};
use yaml_patch::{Op, Patch, PatchError};

fn apply_yaml(doc: &str, ops: &str) -> Result<Value, PatchError> {
    let patch = decode_patch(ops)?;
    patch.apply(decode_document(doc)?)
}

fn doc(text: &str) -> Value {
    decode_document(text).expect("fixture decodes")
}

#[test]
fn positive_cases_matrix() {
    let cases = [
        (
            "adding an element to an object",
            "---\nfoo: bar",
            "---\n- op: add\n  path: /baz\n  value: qux",
            "---\nfoo: bar\nbaz: qux",
        ),
        (
            "adding an element to an array",
            "---\nfoo: [bar,baz]",
            "---\n- op: add\n  path: /foo/1\n  value: qux",
            "---\nfoo: [bar,qux,baz]",
        ),
        (
            "removing an element from an object",
            "---\nfoo: bar\nbaz: qux",
            "---\n- op: remove\n  path: /baz",
            "---\nfoo: bar",
        ),
        (
            "removing an element from an array",
            "---\nfoo: [bar,qux,baz]",
            "---\n- op: remove\n  path: /foo/1",
            "---\nfoo: [bar,baz]",
        ),
        (
            "replacing an element in an object",
            "---\nfoo: bar\nbaz: qux",
            "---\n- op: replace\n  path: /baz\n  value: boo",
            "---\nfoo: bar\nbaz: boo",
        ),
        (
            "moving an element in an object",
            "---\nfoo:\n  bar: baz\n  waldo: fred\nqux:\n  corge: grault",
            "---\n- op: move\n  from: /foo/waldo\n  path: /qux/thud",
            "---\nfoo:\n  bar: baz\nqux:\n  corge: grault\n  thud: fred",
        ),
        (
            "moving an element in an array",
            "---\nfoo: [all, grass, cows, eat]",
            "---\n- op: move\n  from: /foo/1\n  path: /foo/3",
            "---\nfoo: [all, cows, eat, grass]",
        ),
        (
            "adding an object to an object",
            "---\nfoo: bar",
            "---\n- op: add\n  path: /child\n  value:\n    grandchild: {}",
            "---\nfoo: bar\nchild:\n  grandchild: {}",
        ),
        (
            "appending an element to an array",
            "---\nfoo: [bar]",
            "---\n- op: add\n  path: /foo/-\n  value: [abc,def]",
            "---\nfoo: [bar, [abc, def]]",
        ),
        (
            "removing a nil element from an object",
            "---\nfoo: bar\nqux:\n  baz: 1\n  bar: ~",
            "---\n- op: remove\n  path: /qux/bar",
            "---\nfoo: bar\nqux:\n  baz: 1",
        ),
        (
            "adding a nil element to an object",
            "---\nfoo: bar",
            "---\n- op: add\n  path: /baz\n  value: ~",
            "---\nfoo: bar\nbaz: ~",
        ),
        (
            "replacing the sole element in an array",
            "---\nfoo: [bar]",
            "---\n- op: replace\n  path: /foo/0\n  value: baz",
            "---\nfoo: [baz]",
        ),
        (
            "replacing an element in an array within a root array",
            "---\n- foo: [bar, qux, baz]",
            "---\n- op: replace\n  path: /0/foo/0\n  value: bum",
            "---\n- foo: [bum, qux, baz]",
        ),
        (
            "copying an element in an array within a root array with an index",
            "---\n- foo: [bar, qux, baz]\n  bar: [qux, baz]",
            "---\n- op: copy\n  from: /0/foo/0\n  path: /0/bar/0",
            "---\n- foo: [bar, qux, baz]\n  bar: [bar, baz]",
        ),
    ];

    for (name, input, ops, expected) in cases {
        let actual = apply_yaml(input, ops).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(actual, doc(expected), "{name}");
    }
}

#[test]
fn failure_cases_matrix() {
    let cases = [
        (
            "adding an element to an object with a bad pointer",
            "---\nfoo: bar",
            "---\n- op: add\n  path: /baz/bat\n  value: qux",
            PatchError::PathNotFound("/baz/bat".into()),
        ),
        (
            "removing an element from an object with a bad pointer",
            "---\na:\n  b:\n    d: 1",
            "---\n- op: remove\n  path: /a/b/c",
            PatchError::KeyNotFound("c".into()),
        ),
        (
            "moving an element in an object with a bad pointer",
            "---\na:\n  b:\n    d: 1",
            "---\n- op: move\n  from: /a/b/c\n  path: /a/b/e",
            PatchError::KeyNotFound("c".into()),
        ),
        (
            "removing an element from an array with a bad pointer",
            "---\na:\n  b: [1]",
            "---\n- op: remove\n  path: /a/b/1",
            PatchError::IndexOutOfRange { index: 1, len: 1 },
        ),
        (
            "moving an element from an array with a bad pointer",
            "---\na:\n  b: [1]",
            "---\n- op: move\n  from: /a/b/1\n  path: /a/b/2",
            PatchError::IndexOutOfRange { index: 1, len: 1 },
        ),
        (
            "an operation with an invalid pathz field",
            "---\nfoo: bar",
            "---\n- op: add\n  pathz: /baz\n  value: qux",
            PatchError::MalformedPath(String::new()),
        ),
        (
            "an add operation with an empty path",
            "---\nfoo: bar",
            "---\n- op: add\n  path: ''\n  value: qux",
            PatchError::MalformedPath(String::new()),
        ),
        (
            "a replace operation on an array with an invalid path",
            "---\nname:\n  foo:\n    bat\n  qux:\n    bum",
            "---\n- op: replace\n  path: /foo/2\n  value: bum",
            PatchError::PathNotFound("/foo/2".into()),
        ),
    ];

    for (name, input, ops, expected) in cases {
        let err = apply_yaml(input, ops).expect_err(name);
        assert_eq!(err.root_cause(), &expected, "{name}");
    }
}

#[test]
fn remove_missing_key_reports_operation() {
    let err = apply_yaml("foo: bar", "- op: remove\n  path: /baz").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"remove operation #0 at "/baz": key not found: "baz""#
    );
}

#[test]
fn decode_single_op() {
    let patch = decode_patch("---\n- op: add\n  path: /baz\n  value: qux").unwrap();
    assert_eq!(
        patch,
        Patch::new(vec![Op::Add {
            path: "/baz".into(),
            value: json!("qux"),
        }])
    );
}

#[test]
fn unsupported_operation_is_rejected_on_decode() {
    assert_eq!(
        decode_patch("- op: test\n  path: /a\n  value: 1"),
        Err(PatchError::UnsupportedOperation("test".into()))
    );
}

#[test]
fn earlier_mutations_survive_a_failure() {
    let patch = decode_patch(
        "- op: add\n  path: /a\n  value: 1\n- op: remove\n  path: /missing\n- op: add\n  path: /b\n  value: 2",
    )
    .unwrap();
    let mut root = yaml_patch::Node::new(json!({}));
    let err = patch
        .apply_to_node(&mut root, &Default::default())
        .unwrap_err();
    assert!(matches!(err, PatchError::Operation { index: 1, .. }));
    assert_eq!(root.into_value(), json!({"a": 1}));
}

#[test]
fn escaped_keys() {
    let out = Patch::new(vec![
        Op::Add {
            path: "/a~1b".into(),
            value: json!(1),
        },
        Op::Copy {
            from: "/a~1b".into(),
            path: "/c~0d".into(),
        },
    ])
    .apply(json!({}))
    .unwrap();
    assert_eq!(out, json!({"a/b": 1, "c~d": 1}));
}

#[test]
fn set_semantics_zero_extend_on_move() {
    let out = Patch::new(vec![Op::Move {
        from: "/a".into(),
        path: "/list/3".into(),
    }])
    .apply(json!({"a": "x", "list": [0]}))
    .unwrap();
    assert_eq!(out, json!({"list": [0, null, null, "x"]}));
}
