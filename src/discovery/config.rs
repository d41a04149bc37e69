pub const RECURSIVE_SUFFIX: &str = "/...";

pub const FLAG_PREFIX: &str = "-";
pub const LOCAL_PREFIX: &str = ".";

pub const VCS_DIR_PREFIX: &str = ".git";

pub const GO_COMMAND: &str = "go";
pub const GO_LIST_DIR_ARGS: &[&str] = &["list", "-f"];
pub const GO_LIST_DIR_TEMPLATE: &str = "{{.Dir}}";

pub const GOROOT_ENV: &str = "GOROOT";
pub const GOPATH_ENV: &str = "GOPATH";
pub const DEFAULT_GOPATH_DIR: &str = "go";
pub const SRC_DIR: &str = "src";
