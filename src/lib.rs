// # Contract Bindgen
//!
//! Build tooling that (re)generates typed Rust clients for Ethereum smart contracts from a
//! compiled artifact pair (ABI JSON + bytecode hex), and keeps a small ledger recording which
//! artifacts produced each generated package.
//!
//! A single run regenerates exactly one binding target:
//! 1. the output directory `bindings/<package>` is created if missing;
//! 2. a [`BindingGenerator`] writes `bindings/<package>/<package>.rs`;
//! 3. the versions ledger (`bindings/generated-versions.json`) is loaded, the entry for
//!    `<package>` is replaced, and the ledger is written back.
//!
//! Any failure stops the run. The ledger is never touched unless generation succeeded.
//!
//! ```no_run
//! use contract_bindgen::{Config, Driver, GenerationRequest, SolBindingGenerator};
//!
//! # fn main() -> anyhow::Result<()> {
//! let driver = Driver::new(Config::from_current_dir()?, SolBindingGenerator);
//! let request = GenerationRequest::builder()
//!     .abi_path("KeeperRegistry.abi")
//!     .binary_path("KeeperRegistry.bin")
//!     .type_name("KeeperRegistry")
//!     .package_name("keeper_registry")
//!     .build();
//! driver.run(&request)?;
//! # Ok(())
//! # }
//! ```

pub use config::Config;
pub use driver::{Driver, GenerationOutcome, GenerationRequest};
pub use generator::{BindingGenerator, GenerationJob, SolBindingGenerator};
pub use versions::{ContractVersion, VersionsLedger, read_versions_db, write_versions_db};

/// Identifier of this generator build, recorded as the ledger's `toolchainVersion`.
pub const TOOLCHAIN_VERSION: &str = concat!("contract-bindgen/", env!("CARGO_PKG_VERSION"));

/// Module for tool configuration.
/// Holds the output root, ledger location and toolchain tag used by a run.
pub mod config;

/// Module for the generation driver.
/// Sequences directory creation, binding generation and the ledger update for one target.
pub mod driver;

/// Module for binding generators.
/// Defines the generator seam and the built-in `sol!` based implementation.
pub mod generator;

/// Module for the versions ledger.
/// Records which artifacts produced each generated binding package.
pub mod versions;

/// Module with utility functions.
/// Includes helpers for artifact parsing and path handling.
pub mod utils;
