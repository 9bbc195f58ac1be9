//! Contract artifacts used across tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Reduced ABI of a keeper registry contract.
pub const KEEPER_REGISTRY_ABI: &str = r#"[
  {
    "type": "constructor",
    "inputs": [{ "name": "owner", "type": "address", "internalType": "address" }],
    "stateMutability": "nonpayable"
  },
  {
    "type": "function",
    "name": "owner",
    "inputs": [],
    "outputs": [{ "name": "", "type": "address", "internalType": "address" }],
    "stateMutability": "view"
  },
  {
    "type": "function",
    "name": "registerUpkeep",
    "inputs": [
      { "name": "target", "type": "address", "internalType": "address" },
      { "name": "gasLimit", "type": "uint32", "internalType": "uint32" }
    ],
    "outputs": [{ "name": "id", "type": "uint256", "internalType": "uint256" }],
    "stateMutability": "nonpayable"
  },
  {
    "type": "event",
    "name": "UpkeepRegistered",
    "inputs": [
      { "name": "id", "type": "uint256", "indexed": true, "internalType": "uint256" },
      { "name": "executeGas", "type": "uint32", "indexed": false, "internalType": "uint32" }
    ],
    "anonymous": false
  }
]"#;

/// Creation bytecode matching [`KEEPER_REGISTRY_ABI`], as a compiler writes it.
pub const KEEPER_REGISTRY_BIN: &str = "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe\n";

/// Writes `KeeperRegistry.abi` and `KeeperRegistry.bin` into `dir`.
/// Returns the ABI and bytecode paths.
pub fn write_keeper_registry(dir: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let abi_path = dir.join("KeeperRegistry.abi");
    let bin_path = dir.join("KeeperRegistry.bin");
    fs::write(&abi_path, KEEPER_REGISTRY_ABI)?;
    fs::write(&bin_path, KEEPER_REGISTRY_BIN)?;
    Ok((abi_path, bin_path))
}
