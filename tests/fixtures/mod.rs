use std::path::PathBuf;

#[allow(dead_code)]
pub fn go_fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("go")
}

#[allow(dead_code)]
pub fn go_fixture(name: &str) -> PathBuf {
    go_fixtures_path().join(name)
}
