use displaydoc::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::display_path;

/// Represents errors that can occur while loading or saving the versions ledger.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to read versions ledger {path}: {source}
    Read {
        path: String,
        source: std::io::Error,
    },
    /// Failed to parse versions ledger {path}: {source}
    Parse {
        path: String,
        source: serde_json::Error,
    },
    /// Failed to serialize versions ledger: {0}
    Serialize(#[source] serde_json::Error),
    /// Failed to write versions ledger {path}: {source}
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// The artifacts that produced the generated sources of one binding target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractVersion {
    /// Path of the ABI artifact, as given by the operator.
    pub abi_path: String,
    /// Path of the bytecode artifact, as given by the operator.
    pub binary_path: String,
}

impl ContractVersion {
    /// Creates a new record from the two artifact paths.
    pub fn new(abi_path: impl Into<String>, binary_path: impl Into<String>) -> Self {
        Self {
            abi_path: abi_path.into(),
            binary_path: binary_path.into(),
        }
    }
}

/// Persistent record mapping binding targets to the artifacts last used to generate them.
///
/// Only the latest record per target is kept. Targets are stored in a sorted map so the
/// serialized ledger is stable: entries that are not updated keep their exact bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsLedger {
    /// Generator build that performed the most recent run.
    pub toolchain_version: String,
    /// Current artifact record per binding target name.
    pub contract_versions: BTreeMap<String, ContractVersion>,
}

impl VersionsLedger {
    /// Loads the ledger stored at `path`, or an empty one if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        read_versions_db(path.as_ref())
    }

    /// Overwrites the ledger stored at `path` with this one.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        write_versions_db(path.as_ref(), self)
    }

    /// Gets the current record of a binding target.
    pub fn contract_version(&self, name: &str) -> Option<&ContractVersion> {
        self.contract_versions.get(name)
    }

    /// Replaces the record of a binding target, returning the previous one.
    pub fn set_contract_version(
        &mut self,
        name: impl Into<String>,
        version: ContractVersion,
    ) -> Option<ContractVersion> {
        self.contract_versions.insert(name.into(), version)
    }

    /// Checks whether `name` was last generated from exactly these artifacts.
    ///
    /// Only the artifact paths are compared. `toolchain_version` is shared by all targets and
    /// names whichever build wrote the ledger last, so it says nothing about a single entry.
    pub fn is_up_to_date(&self, name: &str, abi_path: &str, binary_path: &str) -> bool {
        self.contract_version(name).is_some_and(|version| {
            version.abi_path == abi_path && version.binary_path == binary_path
        })
    }

    /// Number of binding targets in the ledger.
    pub fn len(&self) -> usize {
        self.contract_versions.len()
    }

    /// Whether the ledger has no binding targets.
    pub fn is_empty(&self) -> bool {
        self.contract_versions.is_empty()
    }
}

/// Reads the versions ledger at `path`.
///
/// A missing file is the first-run case and yields an empty ledger. A file that exists but
/// cannot be read or parsed is an error: falling back to an empty ledger would silently drop
/// every recorded target on the next write.
pub fn read_versions_db(path: &Path) -> Result<VersionsLedger, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!(
                "Versions ledger {} not found, starting empty",
                path.display()
            );
            return Ok(VersionsLedger::default());
        }
        Err(source) => {
            return Err(Error::Read {
                path: display_path(path),
                source,
            });
        }
    };

    let ledger: VersionsLedger = serde_json::from_str(&contents).map_err(|source| Error::Parse {
        path: display_path(path),
        source,
    })?;
    log::info!(
        "Loaded versions ledger {} with {} entries",
        path.display(),
        ledger.len()
    );
    Ok(ledger)
}

/// Writes `ledger` to `path`, replacing any previous contents.
///
/// The ledger is first written to a sibling `.tmp` file and then renamed over the target, so an
/// interrupted write leaves the previous ledger in place.
pub fn write_versions_db(path: &Path, ledger: &VersionsLedger) -> Result<(), Error> {
    let mut json = serde_json::to_string_pretty(ledger).map_err(Error::Serialize)?;
    json.push('\n');

    let tmp_path = temp_path(path);
    let write_error = |source| Error::Write {
        path: display_path(path),
        source,
    };
    if let Err(e) = fs::write(&tmp_path, json) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_error(e));
    }

    log::info!(
        "Saved versions ledger {} with {} entries",
        path.display(),
        ledger.len()
    );
    Ok(())
}

/// Sibling file a ledger at `path` is staged in before being renamed into place.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_contract_version_replaces() {
        let mut ledger = VersionsLedger::default();
        assert!(ledger.is_empty());

        let first = ContractVersion::new("a.abi", "a.bin");
        assert_eq!(ledger.set_contract_version("a", first.clone()), None);

        let second = ContractVersion::new("a2.abi", "a2.bin");
        assert_eq!(ledger.set_contract_version("a", second.clone()), Some(first));
        assert_eq!(ledger.contract_version("a"), Some(&second));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_is_up_to_date() {
        let mut ledger = VersionsLedger::default();
        ledger.set_contract_version("a", ContractVersion::new("a.abi", "a.bin"));

        assert!(ledger.is_up_to_date("a", "a.abi", "a.bin"));
        assert!(!ledger.is_up_to_date("a", "other.abi", "a.bin"));
        assert!(!ledger.is_up_to_date("a", "a.abi", "other.bin"));
        assert!(!ledger.is_up_to_date("b", "a.abi", "a.bin"));
    }

    #[test]
    fn test_is_up_to_date_ignores_later_toolchain() {
        // `a` generated by t1, then `b` by t2: the global tag now reads t2.
        let mut ledger = VersionsLedger {
            toolchain_version: "t1".to_string(),
            ..Default::default()
        };
        ledger.set_contract_version("a", ContractVersion::new("a.abi", "a.bin"));
        ledger.toolchain_version = "t2".to_string();
        ledger.set_contract_version("b", ContractVersion::new("b.abi", "b.bin"));

        assert!(ledger.is_up_to_date("a", "a.abi", "a.bin"));
        assert!(ledger.is_up_to_date("b", "b.abi", "b.bin"));
        assert!(!ledger.is_up_to_date("a", "b.abi", "b.bin"));
    }

    #[test]
    fn test_serialized_field_names() {
        let mut ledger = VersionsLedger {
            toolchain_version: "t1".to_string(),
            ..Default::default()
        };
        ledger.set_contract_version("a", ContractVersion::new("a.abi", "a.bin"));

        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["toolchainVersion"], "t1");
        assert_eq!(value["contractVersions"]["a"]["abiPath"], "a.abi");
        assert_eq!(value["contractVersions"]["a"]["binaryPath"], "a.bin");
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/x/versions.json")),
            PathBuf::from("/x/versions.json.tmp")
        );
    }
}
