use bon::Builder;
use displaydoc::Display;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;
use crate::generator::{self, BindingGenerator, GenerationJob};
use crate::utils::{display_path, is_plain_component};
use crate::versions::{self, ContractVersion, read_versions_db, temp_path, write_versions_db};

/// Represents the ways a generation run can fail.
/// Each variant names the step that failed; the run stops at the first failure.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid generation request: {0}
    InvalidRequest(String),
    /// Failed to create output directory {path}
    CreateDirectory {
        path: String,
        source: std::io::Error,
    },
    /// Failed to generate bindings for {package}
    Generation {
        package: String,
        source: generator::Error,
    },
    /// Failed to load the versions ledger
    LedgerRead(#[source] versions::Error),
    /// Failed to update the versions ledger
    LedgerWrite(#[source] versions::Error),
}

/// Inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GenerationRequest {
    /// ABI artifact path, recorded verbatim in the ledger.
    #[builder(into)]
    pub abi_path: String,
    /// Bytecode artifact path, recorded verbatim in the ledger.
    #[builder(into)]
    pub binary_path: String,
    /// Exported type name of the generated client.
    #[builder(into)]
    pub type_name: String,
    /// Binding package (output directory) name; also the ledger key.
    #[builder(into)]
    pub package_name: String,
}

impl GenerationRequest {
    /// Checks the request before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("ABI path", &self.abi_path),
            ("binary path", &self.binary_path),
            ("type name", &self.type_name),
            ("package name", &self.package_name),
        ];
        for (label, value) in fields {
            if value.is_empty() {
                return Err(Error::InvalidRequest(format!("{label} must not be empty")));
            }
        }

        if !is_plain_component(&self.package_name) {
            return Err(Error::InvalidRequest(format!(
                "package name `{}` must be a single directory name",
                self.package_name
            )));
        }
        Ok(())
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// The generated source file.
    pub output_file: PathBuf,
    /// Ledger record the run replaced, if the package was generated before.
    pub previous: Option<ContractVersion>,
    /// `false` when the ledger already recorded the same artifacts for this package.
    pub inputs_changed: bool,
}

/// Regenerates one binding package and keeps the versions ledger in step with it.
pub struct Driver<G> {
    config: Config,
    generator: G,
}

impl<G: BindingGenerator> Driver<G> {
    /// Creates a driver writing under `config.root` with the given generator.
    pub fn new(config: Config, generator: G) -> Self {
        Self { config, generator }
    }

    /// Gets the configuration of this driver.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the generator used by this driver.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Runs the pipeline for one package.
    ///
    /// Steps, in order: ensure the package directory, generate the bindings, load the ledger,
    /// record the new inputs, write the ledger. The ledger is only read and written after the
    /// generator succeeded. A generated file is kept even if the ledger write then fails.
    ///
    /// A package whose directory would land on the ledger file or its staging file is rejected
    /// before anything is created.
    pub fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome, Error> {
        request.validate()?;
        let package = request.package_name.as_str();

        let package_dir = self.config.package_dir(package);
        let ledger_path = self.config.ledger_path();
        if package_dir == ledger_path || package_dir == temp_path(&ledger_path) {
            return Err(Error::InvalidRequest(format!(
                "package name `{package}` collides with the versions ledger {}",
                ledger_path.display()
            )));
        }

        fs::create_dir_all(&package_dir).map_err(|source| Error::CreateDirectory {
            path: display_path(&package_dir),
            source,
        })?;
        log::debug!("Output directory {} ready", package_dir.display());

        let output_file = self.config.output_file(package);
        let abi_path = self.config.resolve(&request.abi_path);
        let bytecode_path = self.config.resolve(&request.binary_path);
        let job = GenerationJob {
            bytecode_path: &bytecode_path,
            abi_path: &abi_path,
            output_path: &output_file,
            type_name: &request.type_name,
            package_name: package,
        };
        self.generator
            .generate(&job)
            .map_err(|source| Error::Generation {
                package: package.to_string(),
                source,
            })?;
        log::debug!("Generated {}", output_file.display());

        let mut ledger = read_versions_db(&ledger_path).map_err(Error::LedgerRead)?;
        let inputs_changed =
            !ledger.is_up_to_date(package, &request.abi_path, &request.binary_path);

        ledger.toolchain_version = self.config.toolchain_version.clone();
        let current = ContractVersion::new(&request.abi_path, &request.binary_path);
        let previous = ledger.set_contract_version(package, current);
        if let Some(previous) = previous.as_ref().filter(|_| inputs_changed) {
            log::info!(
                "Replacing {package} entry (abi: {}, bin: {})",
                previous.abi_path,
                previous.binary_path
            );
        }
        write_versions_db(&ledger_path, &ledger).map_err(Error::LedgerWrite)?;

        log::info!(
            "Generated {package} bindings at {}{}",
            output_file.display(),
            if inputs_changed { "" } else { " (inputs unchanged)" }
        );
        Ok(GenerationOutcome {
            output_file,
            previous,
            inputs_changed,
        })
    }
}
