use anyhow::Result;
use std::fs;
use std::path::Path;

use contract_bindgen::generator::{Error, load_abi, load_bytecode};
use contract_bindgen::{BindingGenerator, GenerationJob, SolBindingGenerator};
use contract_bindgen_test_utils::fixtures::{KEEPER_REGISTRY_ABI, write_keeper_registry};
use contract_bindgen_test_utils::init_logger;

fn job<'a>(abi: &'a Path, bin: &'a Path, output: &'a Path) -> GenerationJob<'a> {
    GenerationJob {
        bytecode_path: bin,
        abi_path: abi,
        output_path: output,
        type_name: "KeeperRegistry",
        package_name: "keeper_registry",
    }
}

#[test]
fn test_sol_generator_writes_bindings() -> Result<()> {
    init_logger(true);
    let dir = tempfile::tempdir()?;
    let (abi_path, bin_path) = write_keeper_registry(dir.path())?;
    let output = dir.path().join("keeper_registry.rs");

    SolBindingGenerator.generate(&job(&abi_path, &bin_path, &output))?;

    let source = fs::read_to_string(&output)?;
    log::debug!("Generated source:\n{source}");
    assert!(source.starts_with("// Code generated by contract-bindgen/"));
    assert!(source.contains("// ABI: KeeperRegistry.abi"));
    assert!(source.contains("// Bytecode: KeeperRegistry.bin"));
    assert!(source.contains("alloy::sol! {"));
    assert!(source.contains("#[sol(rpc)]"));
    assert!(source.contains("interface KeeperRegistry"));
    assert!(source.contains("function registerUpkeep("));
    assert!(source.contains("event UpkeepRegistered("));
    assert!(source.contains(
        "bytes!(\"6080604052348015600f57600080fd5b50603f80601d6000396000f3fe\")"
    ));
    Ok(())
}

#[test]
fn test_sol_generator_accepts_compiler_artifact() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let abi_path = dir.path().join("KeeperRegistry.json");
    let bin_path = dir.path().join("KeeperRegistry.bin");
    let output = dir.path().join("keeper_registry.rs");
    fs::write(
        &abi_path,
        format!(r#"{{ "contractName": "KeeperRegistry", "abi": {KEEPER_REGISTRY_ABI} }}"#),
    )?;
    fs::write(&bin_path, "")?;

    SolBindingGenerator.generate(&job(&abi_path, &bin_path, &output))?;

    let source = fs::read_to_string(&output)?;
    assert!(source.contains("interface KeeperRegistry"));
    assert!(!source.contains("BYTECODE"));
    Ok(())
}

#[test]
fn test_load_abi_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.abi");

    fs::write(&path, "{ truncated")?;
    assert!(matches!(load_abi(&path), Err(Error::InvalidAbi { .. })));

    fs::write(&path, r#"{ "bytecode": "0x00" }"#)?;
    assert!(matches!(load_abi(&path), Err(Error::InvalidAbi { .. })));

    let missing = dir.path().join("missing.abi");
    assert!(matches!(load_abi(&missing), Err(Error::ReadArtifact { .. })));
    Ok(())
}

#[test]
fn test_load_bytecode() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("c.bin");

    fs::write(&path, "0x6080\n")?;
    assert_eq!(load_bytecode(&path)?, vec![0x60, 0x80]);

    fs::write(&path, "0x60zz")?;
    assert!(matches!(
        load_bytecode(&path),
        Err(Error::InvalidBytecode { .. })
    ));
    Ok(())
}

#[test]
fn test_invalid_artifacts_leave_no_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (abi_path, _) = write_keeper_registry(dir.path())?;
    let bin_path = dir.path().join("broken.bin");
    fs::write(&bin_path, "not hex")?;
    let output = dir.path().join("keeper_registry.rs");

    let result = SolBindingGenerator.generate(&job(&abi_path, &bin_path, &output));
    assert!(matches!(result, Err(Error::InvalidBytecode { .. })));
    assert!(!output.exists());
    Ok(())
}

fn write_package_name(job: &GenerationJob<'_>) -> Result<(), Error> {
    fs::write(job.output_path, job.package_name).map_err(|source| Error::WriteOutput {
        path: job.output_path.display().to_string(),
        source,
    })
}

#[test]
fn test_function_generator() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("out.rs");

    write_package_name.generate(&job(Path::new("a.abi"), Path::new("a.bin"), &output))?;
    assert_eq!(fs::read_to_string(&output)?, "keeper_registry");
    Ok(())
}
