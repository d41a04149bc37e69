//! Run configuration: built-in defaults, then an optional YAML/JSON file,
//! then command-line overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, trace};

use crate::discovery::locator::{gopath_from_env, goroot_from_env};
use crate::error::ConfigError;
use crate::output::Placeholders;
use crate::scanner::decl::{DEFAULT_PARAM_TYPE, DEFAULT_TEST_PREFIX};
use crate::scanner::{BuildContext, TestSignature};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `json` or a line template. `None` means the dialect's default template.
    pub format: Option<String>,
    pub placeholders: Placeholders,
    pub tabs: bool,
    pub parallel: bool,
    pub goos: String,
    pub goarch: String,
    pub tags: Vec<String>,
    /// Directory names pruned by recursive expansion, on top of `.git*`.
    pub exclude_dirs: Vec<String>,
    pub test_prefix: String,
    pub param_type: String,
    pub working_dir: PathBuf,
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
    pub go_list: bool,
}

impl Default for Config {
    fn default() -> Self {
        let host = BuildContext::host();
        Self {
            format: None,
            placeholders: Placeholders::default(),
            tabs: false,
            parallel: false,
            goos: host.goos,
            goarch: host.goarch,
            tags: Vec::new(),
            exclude_dirs: Vec::new(),
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
            param_type: DEFAULT_PARAM_TYPE.to_string(),
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            goroot: goroot_from_env(),
            gopath: gopath_from_env(),
            go_list: true,
        }
    }
}

impl Config {
    pub fn build_context(&self) -> BuildContext {
        BuildContext::new(&self.goos, &self.goarch)
            .with_cgo_from_env()
            .with_tags(self.tags.clone())
    }

    pub fn signature(&self) -> TestSignature {
        TestSignature::new(&self.test_prefix, &self.param_type)
    }

    /// Defaults overlaid with the file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        FileConfig::load(path)?.apply(&mut config);
        Ok(config)
    }
}

/// On-disk shape of a config file. Every key is optional; unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<String>,
    pub placeholders: Option<Placeholders>,
    pub tabs: Option<bool>,
    pub parallel: Option<bool>,
    pub goos: Option<String>,
    pub goarch: Option<String>,
    pub tags: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    pub test_prefix: Option<String>,
    pub param_type: Option<String>,
    pub goroot: Option<PathBuf>,
    pub gopath: Option<Vec<PathBuf>>,
    pub go_list: Option<bool>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config file");

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string())),
            "yaml" | "yml" => Self::parse_yaml(&content)
                .map_err(|e| ConfigError::parse_error(path, e.to_string())),
            _ => Err(ConfigError::unsupported_format(extension)),
        }
    }

    fn parse_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty YAML document is null, not an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn apply(self, config: &mut Config) {
        trace!(?self, "applying config file");
        if let Some(format) = self.format {
            config.format = Some(format);
        }
        if let Some(placeholders) = self.placeholders {
            config.placeholders = placeholders;
        }
        if let Some(tabs) = self.tabs {
            config.tabs = tabs;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
        if let Some(goos) = self.goos {
            config.goos = goos;
        }
        if let Some(goarch) = self.goarch {
            config.goarch = goarch;
        }
        if let Some(tags) = self.tags {
            config.tags = tags;
        }
        if let Some(exclude_dirs) = self.exclude_dirs {
            config.exclude_dirs = exclude_dirs;
        }
        if let Some(test_prefix) = self.test_prefix {
            config.test_prefix = test_prefix;
        }
        if let Some(param_type) = self.param_type {
            config.param_type = param_type;
        }
        if let Some(goroot) = self.goroot {
            config.goroot = Some(goroot);
        }
        if let Some(gopath) = self.gopath {
            config.gopath = gopath;
        }
        if let Some(go_list) = self.go_list {
            config.go_list = go_list;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format, None);
        assert_eq!(config.placeholders, Placeholders::Percent);
        assert!(!config.tabs);
        assert!(!config.parallel);
        assert!(config.go_list);
        assert_eq!(config.test_prefix, "Test");
        assert_eq!(config.param_type, "*testing.T");
        assert!(!config.goos.is_empty());
        assert!(!config.goarch.is_empty());
    }

    #[test]
    fn test_build_context_carries_tags() {
        let config = Config {
            goos: "plan9".to_string(),
            goarch: "arm".to_string(),
            tags: vec!["integration".to_string()],
            ..Config::default()
        };
        let ctx = config.build_context();
        assert_eq!(ctx.goos, "plan9");
        assert_eq!(ctx.goarch, "arm");
        assert!(ctx.match_tag("integration"));
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "tesls.yaml",
            "format: \"%T\"\nplaceholders: braces\ntabs: true\ntags: [integration]\nexclude_dirs: [vendor]\n",
        );

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.format.as_deref(), Some("%T"));
        assert_eq!(file.placeholders, Some(Placeholders::Braces));
        assert_eq!(file.tabs, Some(true));
        assert_eq!(file.tags, Some(vec!["integration".to_string()]));
        assert_eq!(file.exclude_dirs, Some(vec!["vendor".to_string()]));
        assert_eq!(file.parallel, None);
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "tesls.json",
            r#"{"test_prefix": "Benchmark", "param_type": "*testing.B", "go_list": false}"#,
        );

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.test_prefix, "Benchmark");
        assert_eq!(config.param_type, "*testing.B");
        assert!(!config.go_list);
        assert_eq!(config.format, None);
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tesls.yml", "\n");
        assert_eq!(FileConfig::load(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tesls.yaml", "formatt: json\n");
        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tesls.toml", "format = 'json'\n");
        let err = FileConfig::load(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported config format: toml (expected json or yaml)"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = FileConfig::load("/nonexistent/tesls.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_apply_only_overrides_present_keys() {
        let mut config = Config {
            tabs: true,
            goos: "linux".to_string(),
            ..Config::default()
        };
        FileConfig {
            goos: Some("windows".to_string()),
            ..FileConfig::default()
        }
        .apply(&mut config);

        assert_eq!(config.goos, "windows");
        assert!(config.tabs);
    }
}
