use anyhow::{Context, Result};
use clap::Parser;
use contract_bindgen::{Config, Driver, GenerationRequest, SolBindingGenerator};

/// Regenerates the typed client of one contract and records its artifacts in the versions ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the contract ABI (bare JSON ABI or compiler artifact)
    abi_path: String,
    /// Path to the contract bytecode (hex)
    binary_path: String,
    /// Type name of the generated contract client
    type_name: String,
    /// Package (output directory) name of the generated bindings
    package_name: String,
}

impl Args {
    fn request(self) -> GenerationRequest {
        GenerationRequest::builder()
            .abi_path(self.abi_path)
            .binary_path(self.binary_path)
            .type_name(self.type_name)
            .package_name(self.package_name)
            .build()
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let request = Args::parse().request();
    let config = Config::from_current_dir().context("Failed to determine working directory")?;
    log::debug!("Using configuration: {config:?}");

    println!("Generating {} bindings", request.package_name);
    let driver = Driver::new(config, SolBindingGenerator);
    driver.run(&request)?;
    Ok(())
}
