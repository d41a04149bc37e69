//! Resolution and end-to-end discovery over temporary Go trees.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tesls::error::{Error, ResolveError};
use tesls::{discover, run, Config, Placeholders, Resolver, TestEntity};

fn write_test(dir: &Path, file: &str, package: &str, funcs: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    let mut source = format!("package {package}\n\nimport \"testing\"\n");
    for func in funcs {
        source.push_str(&format!("\nfunc {func}(t *testing.T) {{}}\n"));
    }
    fs::write(dir.join(file), source).unwrap();
}

fn config(working_dir: &Path, gopath: &[PathBuf]) -> Config {
    Config {
        working_dir: working_dir.to_path_buf(),
        goroot: None,
        gopath: gopath.to_vec(),
        go_list: false,
        goos: "linux".to_string(),
        goarch: "amd64".to_string(),
        ..Config::default()
    }
}

fn listing(tests: &[TestEntity]) -> Vec<String> {
    tests
        .iter()
        .map(|t| format!("{}.{}", t.package(), t.name()))
        .collect()
}

#[test]
fn test_same_directory_twice_is_scanned_once() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("pkg"), "pkg_test.go", "pkg", &["TestOnce"]);

    let absolute = root.join("pkg").to_string_lossy().into_owned();
    let specifiers = ["./pkg", absolute.as_str(), "./pkg/../pkg"];
    let tests = discover(&config(root, &[]), &specifiers).unwrap();

    assert_eq!(listing(&tests), vec!["pkg.TestOnce"]);
}

#[test]
fn test_recursive_prunes_vcs_directories() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("app"), "app_test.go", "app", &["TestApp"]);
    write_test(&root.join("app/inner"), "inner_test.go", "inner", &["TestInner"]);
    write_test(&root.join(".git/hooks"), "hook_test.go", "hooks", &["TestHook"]);
    write_test(&root.join("app/.github"), "ci_test.go", "ci", &["TestCI"]);

    let tests = discover(&config(root, &[]), &["./..."]).unwrap();

    assert_eq!(listing(&tests), vec!["app.TestApp", "inner.TestInner"]);
}

#[test]
fn test_recursive_respects_excluded_dirs() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("app"), "app_test.go", "app", &["TestApp"]);
    write_test(&root.join("vendor/dep"), "dep_test.go", "dep", &["TestDep"]);

    let config = Config {
        exclude_dirs: vec!["vendor".to_string()],
        ..config(root, &[])
    };
    let tests = discover(&config, &["./..."]).unwrap();

    assert_eq!(listing(&tests), vec!["app.TestApp"]);
}

#[test]
fn test_import_path_found_on_gopath() {
    let tmp = TempDir::new().unwrap();
    let gopath = tmp.path().join("gopath");
    let lib = gopath.join("src/example.com/lib");
    write_test(&lib, "lib_test.go", "lib", &["TestLib"]);
    write_test(&lib.join("sub"), "sub_test.go", "sub", &["TestSub"]);

    let config = config(tmp.path(), &[gopath]);

    let tests = discover(&config, &["example.com/lib"]).unwrap();
    assert_eq!(listing(&tests), vec!["lib.TestLib"]);
    assert_eq!(
        tests[0].file(),
        lib.join("lib_test.go").to_string_lossy()
    );

    let tests = discover(&config, &["example.com/lib/..."]).unwrap();
    assert_eq!(listing(&tests), vec!["lib.TestLib", "sub.TestSub"]);
}

#[test]
fn test_unknown_import_path() {
    let tmp = TempDir::new().unwrap();
    let err = discover(&config(tmp.path(), &[]), &["example.com/missing"]).unwrap_err();

    assert!(matches!(
        err,
        Error::Resolve(ResolveError::PackageNotFound { .. })
    ));
    assert_eq!(err.to_string(), "cannot find package \"example.com/missing\"");
}

#[test]
fn test_flag_like_arguments_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let dirs = Resolver::from_config(&config(tmp.path(), &[]))
        .resolve_all(&["-v", "-run=TestX"])
        .unwrap();
    assert!(dirs.is_empty());
}

#[test]
fn test_run_json_round_trip() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("a"), "a_test.go", "a", &["TestB", "TestA"]);
    write_test(&root.join("b"), "b_test.go", "b", &["TestC"]);

    let config = Config {
        format: Some("json".to_string()),
        ..config(root, &[])
    };
    let mut out = Vec::new();
    run(&config, &["./..."], &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("]\n"));
    let back: Vec<TestEntity> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, discover(&config, &["./..."]).unwrap());
    assert_eq!(listing(&back), vec!["a.TestA", "a.TestB", "b.TestC"]);
}

#[test]
fn test_run_default_template() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("beta"), "b_test.go", "beta", &["TestBeta"]);
    write_test(&root.join("alpha"), "a_test.go", "alpha", &["TestAlpha"]);

    let mut out = Vec::new();
    run(&config(root, &[]), &["./beta", "./alpha"], &mut out).unwrap();

    let expected = format!(
        "alpha.TestAlpha {}\nbeta.TestBeta {}\n",
        root.join("alpha/a_test.go").display(),
        root.join("beta/b_test.go").display()
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_run_braces_template() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_test(&root.join("p"), "p_test.go", "p", &["TestX"]);

    let config = Config {
        format: Some("{{ .Name }} in {{.Pkg}}".to_string()),
        placeholders: Placeholders::Braces,
        ..config(root, &[])
    };
    let mut out = Vec::new();
    run(&config, &["./p"], &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "TestX in p\n");
}

#[test]
fn test_run_without_tests_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("lib/lib.go"), "package lib\n").unwrap();

    let mut out = Vec::new();
    let err = run(&config(root, &[]), &["./lib"], &mut out).unwrap_err();

    assert_eq!(err.to_string(), "no tests were found");
    assert!(out.is_empty());
}

#[test]
fn test_run_rejects_bad_template_before_scanning() {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        format: Some("{{.Name".to_string()),
        placeholders: Placeholders::Braces,
        ..config(tmp.path(), &[])
    };
    let mut out = Vec::new();
    let err = run(&config, &["./missing"], &mut out).unwrap_err();

    assert!(matches!(err, Error::Format(_)));
    assert!(out.is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for name in ["a", "b", "c", "d"] {
        write_test(
            &root.join(name),
            "x_test.go",
            name,
            &["TestOne", "TestTwo"],
        );
    }

    let sequential = discover(&config(root, &[]), &["./..."]).unwrap();
    let parallel = discover(
        &Config {
            parallel: true,
            ..config(root, &[])
        },
        &["./..."],
    )
    .unwrap();

    assert_eq!(sequential.len(), 8);
    assert_eq!(parallel, sequential);
}
