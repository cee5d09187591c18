//! End-to-end completion scenarios against a temporary project tree.

use std::fs;
use std::path::Path;

use dotcomplete::errors::CompleteError;
use dotcomplete::resolver::Resolver;
use dotcomplete::types::ResolutionLevel;
use tempfile::TempDir;

const MOD_PY: &str = "\
import unittest


class FooTest(unittest.TestCase):
    def test_a(self):
        pass

    def test_b(self):
        pass

    def helper(self):
        pass
";

/// Project layout used by most scenarios:
///
/// ```text
/// mod.py            class FooTest: test_a, test_b, helper
/// pkg/__init__.py
/// pkg/test_net.py   class SocketTest, class SocketHelper
/// pkg_other.py
/// notes.txt
/// ```
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("mod.py"), MOD_PY).unwrap();
    fs::create_dir(root.join("pkg")).unwrap();
    fs::write(root.join("pkg/__init__.py"), "").unwrap();
    fs::write(
        root.join("pkg/test_net.py"),
        "class SocketTest:\n    def test_connect(self):\n        pass\n\nclass SocketHelper:\n    pass\n",
    )
    .unwrap();
    fs::write(root.join("pkg_other.py"), "class Other:\n    pass\n").unwrap();
    fs::write(root.join("notes.txt"), "").unwrap();
    dir
}

fn complete(root: &Path, cur: &str) -> Vec<String> {
    Resolver::new(root).complete(cur).unwrap().completions
}

#[test]
fn class_completion() {
    let dir = project();
    assert_eq!(complete(dir.path(), "mod.Foo"), vec!["mod.FooTest"]);
}

#[test]
fn method_completion() {
    let dir = project();
    assert_eq!(
        complete(dir.path(), "mod.FooTest.test_"),
        vec!["mod.FooTest.test_a", "mod.FooTest.test_b"]
    );
    assert_eq!(
        complete(dir.path(), "mod.FooTest.helper"),
        vec!["mod.FooTest.helper"]
    );
    assert!(complete(dir.path(), "mod.FooTest.nomatch").is_empty());
}

#[test]
fn directory_and_file_share_prefix() {
    let dir = project();
    assert_eq!(complete(dir.path(), "pkg"), vec!["pkg", "pkg_other"]);
}

#[test]
fn empty_input_lists_root() {
    let dir = project();
    assert_eq!(
        complete(dir.path(), ""),
        vec!["mod", "notes", "pkg", "pkg_other"]
    );
}

#[test]
fn package_contents() {
    let dir = project();
    assert_eq!(
        complete(dir.path(), "pkg."),
        vec!["pkg.__init__", "pkg.test_net"]
    );
    assert_eq!(
        complete(dir.path(), "pkg.test_net.Socket"),
        vec!["pkg.test_net.SocketHelper", "pkg.test_net.SocketTest"]
    );
    assert_eq!(
        complete(dir.path(), "pkg.test_net.SocketTest.test"),
        vec!["pkg.test_net.SocketTest.test_connect"]
    );
}

#[test]
fn directory_shadows_module_of_same_name() {
    let dir = project();
    // `pkg.py` defines classes too, but `pkg/` exists, so `pkg.` is a
    // directory listing and classes are never consulted.
    fs::write(dir.path().join("pkg.py"), "class PkgLevel:\n    pass\n").unwrap();
    let c = Resolver::new(dir.path()).complete("pkg.").unwrap();
    assert_eq!(c.level, Some(ResolutionLevel::Filesystem));
    assert!(c.completions.iter().all(|s| !s.contains("PkgLevel")));
}

#[test]
fn falls_through_to_classes_when_directory_has_no_match() {
    let dir = project();
    fs::write(dir.path().join("pkg.py"), "class PkgLevel:\n    pass\n").unwrap();
    let c = Resolver::new(dir.path()).complete("pkg.Pkg").unwrap();
    assert_eq!(c.level, Some(ResolutionLevel::Class));
    assert_eq!(c.completions, vec!["pkg.PkgLevel"]);
}

#[test]
fn prefix_law_holds() {
    let dir = project();
    for cur in ["", "p", "pkg.", "pkg.test_net.S", "mod.FooTest.t", "mod.FooTest."] {
        let partial = cur.rsplit('.').next().unwrap();
        for c in complete(dir.path(), cur) {
            let last = c.rsplit('.').next().unwrap();
            assert!(last.starts_with(partial), "{c} does not extend {cur}");
        }
    }
}

#[test]
fn results_are_sorted_and_stable() {
    let dir = project();
    let resolver = Resolver::new(dir.path());
    for cur in ["", "pkg.", "mod.FooTest."] {
        let first = resolver.complete(cur).unwrap();
        let second = resolver.complete(cur).unwrap();
        assert_eq!(first, second);
        let mut sorted = first.completions.clone();
        sorted.sort();
        assert_eq!(first.completions, sorted);
    }
}

#[test]
fn missing_pieces_are_silent() {
    let dir = project();
    for cur in [
        "nope.",
        "nope.Foo",
        "mod.Missing.",
        "pkg.missing_mod.Cls.",
        "notes.",
        "mod..",
        "a.b.c.d.e",
    ] {
        assert!(complete(dir.path(), cur).is_empty(), "{cur} should be empty");
    }
}

#[test]
fn completion_is_read_only() {
    let dir = project();
    let before = fs::read_to_string(dir.path().join("mod.py")).unwrap();
    let _ = complete(dir.path(), "mod.FooTest.");
    assert_eq!(fs::read_to_string(dir.path().join("mod.py")).unwrap(), before);
    assert!(!dir.path().join("__pycache__").exists());
}

#[test]
fn broken_module_surfaces_parse_error() {
    let dir = project();
    fs::write(dir.path().join("broken.py"), "class Oops\n    pass\n").unwrap();
    let err = Resolver::new(dir.path()).complete("broken.O").unwrap_err();
    match err {
        CompleteError::Parse { path, .. } => assert!(path.ends_with("broken.py")),
        other => panic!("expected parse error, got {other:?}"),
    }
    // Other modules still complete.
    assert_eq!(complete(dir.path(), "mod.Foo"), vec!["mod.FooTest"]);
}
