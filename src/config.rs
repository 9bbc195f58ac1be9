use std::path::{Path, PathBuf};

use crate::TOOLCHAIN_VERSION;

/// Default directory, relative to the root, that holds one subdirectory per binding package.
pub const DEFAULT_OUTPUT_DIR: &str = "bindings";

/// Default location of the versions ledger, relative to the root.
pub const DEFAULT_LEDGER_FILE: &str = "bindings/generated-versions.json";

/// Configuration for a generation run.
/// Every relative location is resolved against `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the tool operates in; the working directory for CLI runs.
    pub root: PathBuf,
    /// Directory holding the generated binding packages.
    pub output_dir: PathBuf,
    /// Path of the versions ledger file.
    pub ledger_file: PathBuf,
    /// Toolchain identifier written to the ledger on every successful run.
    pub toolchain_version: String,
}

impl Config {
    /// Creates a configuration rooted at `root` with the default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            toolchain_version: TOOLCHAIN_VERSION.to_string(),
        }
    }

    /// Creates a configuration rooted at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Set the directory holding generated packages
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the versions ledger location
    pub fn with_ledger_file(mut self, ledger_file: impl Into<PathBuf>) -> Self {
        self.ledger_file = ledger_file.into();
        self
    }

    /// Set the toolchain identifier recorded in the ledger
    pub fn with_toolchain_version(mut self, toolchain_version: impl Into<String>) -> Self {
        self.toolchain_version = toolchain_version.into();
        self
    }

    /// Resolves `path` against the root unless it is already absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Full path of the versions ledger.
    pub fn ledger_path(&self) -> PathBuf {
        self.resolve(&self.ledger_file)
    }

    /// Directory that holds the generated sources of `package_name`.
    pub fn package_dir(&self, package_name: &str) -> PathBuf {
        self.resolve(&self.output_dir).join(package_name)
    }

    /// Generated source file for `package_name`.
    pub fn output_file(&self, package_name: &str) -> PathBuf {
        self.package_dir(package_name).join(format!("{package_name}.rs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::new("/work");
        assert_eq!(
            config.output_file("keeper_registry"),
            PathBuf::from("/work/bindings/keeper_registry/keeper_registry.rs")
        );
        assert_eq!(
            config.ledger_path(),
            PathBuf::from("/work/bindings/generated-versions.json")
        );
        assert_eq!(config.toolchain_version, TOOLCHAIN_VERSION);
    }

    #[test]
    fn test_overrides() {
        let config = Config::new("/work")
            .with_output_dir("gen")
            .with_ledger_file("/elsewhere/versions.json")
            .with_toolchain_version("test-toolchain");

        assert_eq!(config.package_dir("a"), PathBuf::from("/work/gen/a"));
        assert_eq!(config.ledger_path(), PathBuf::from("/elsewhere/versions.json"));
        assert_eq!(config.resolve("x.abi"), PathBuf::from("/work/x.abi"));
        assert_eq!(config.toolchain_version, "test-toolchain");
    }
}
