use alloy::hex::{self, FromHexError};
use alloy::json_abi::JsonAbi;
use displaydoc::Display;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::TOOLCHAIN_VERSION;
use crate::utils::{display_path, extract_abi, normalize_bytecode};

/// Represents errors reported by a binding generator.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Failed to read artifact {path}: {source}
    ReadArtifact {
        path: String,
        source: std::io::Error,
    },
    /// Invalid ABI in {path}: {reason}
    InvalidAbi { path: String, reason: String },
    /// Invalid bytecode in {path}: {source}
    InvalidBytecode { path: String, source: FromHexError },
    /// Failed to write generated bindings {path}: {source}
    WriteOutput {
        path: String,
        source: std::io::Error,
    },
    /// {0}
    Custom(#[from] anyhow::Error),
}

/// Everything a generator needs to produce one binding file.
#[derive(Debug, Clone, Copy)]
pub struct GenerationJob<'a> {
    /// Bytecode artifact of the contract.
    pub bytecode_path: &'a Path,
    /// ABI artifact of the contract.
    pub abi_path: &'a Path,
    /// File the generated client must be written to.
    pub output_path: &'a Path,
    /// Name of the generated contract type.
    pub type_name: &'a str,
    /// Name of the binding package the file belongs to.
    pub package_name: &'a str,
}

/// Turns an ABI + bytecode pair into a typed client source file.
///
/// On success exactly one file exists at [`GenerationJob::output_path`]. On failure nothing is
/// guaranteed about that file.
pub trait BindingGenerator {
    /// Generates the bindings described by `job`.
    fn generate(&self, job: &GenerationJob<'_>) -> Result<(), Error>;
}

impl<F> BindingGenerator for F
where
    F: Fn(&GenerationJob<'_>) -> Result<(), Error>,
{
    fn generate(&self, job: &GenerationJob<'_>) -> Result<(), Error> {
        self(job)
    }
}

/// Generator emitting an `alloy::sol!` interface for the contract.
///
/// The Solidity interface is reconstructed from the JSON ABI, so the generated file compiles
/// into call builders, event decoders and an RPC instance type through alloy's `sol!` macro.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolBindingGenerator;

impl SolBindingGenerator {
    /// Renders the bindings source for an already parsed artifact pair.
    pub fn render(&self, job: &GenerationJob<'_>, abi: &JsonAbi, bytecode: &[u8]) -> String {
        let interface = abi.to_sol(job.type_name, None);
        let marker = format!("interface {} ", job.type_name);
        let annotated = match interface.find(&marker) {
            Some(at) => {
                let (head, tail) = interface.split_at(at);
                format!("{head}#[allow(missing_docs)]\n#[sol(rpc)]\n{tail}")
            }
            None => format!("#[allow(missing_docs)]\n#[sol(rpc)]\n{interface}"),
        };

        let mut out = String::new();
        let _ = writeln!(out, "// Code generated by {TOOLCHAIN_VERSION}. DO NOT EDIT.");
        let _ = writeln!(out, "// ABI: {}", file_label(job.abi_path));
        let _ = writeln!(out, "// Bytecode: {}", file_label(job.bytecode_path));
        out.push('\n');
        out.push_str("alloy::sol! {\n");
        for line in annotated.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "    {line}");
            }
        }
        out.push_str("}\n");

        if !bytecode.is_empty() {
            out.push('\n');
            let _ = writeln!(
                out,
                "/// Creation bytecode of the `{}` contract.",
                job.type_name
            );
            let _ = writeln!(
                out,
                "pub const BYTECODE: alloy::primitives::Bytes = alloy::primitives::bytes!(\"{}\");",
                hex::encode(bytecode)
            );
        }
        out
    }
}

impl BindingGenerator for SolBindingGenerator {
    fn generate(&self, job: &GenerationJob<'_>) -> Result<(), Error> {
        let abi = load_abi(job.abi_path)?;
        let bytecode = load_bytecode(job.bytecode_path)?;
        log::debug!(
            "Rendering {} with {} functions, {} events and {} bytes of bytecode",
            job.type_name,
            abi.functions().count(),
            abi.events().count(),
            bytecode.len()
        );

        let source = self.render(job, &abi, &bytecode);
        fs::write(job.output_path, source).map_err(|source| Error::WriteOutput {
            path: display_path(job.output_path),
            source,
        })
    }
}

/// Reads and parses an ABI file, either a bare ABI array or a compiler artifact.
pub fn load_abi(path: &Path) -> Result<JsonAbi, Error> {
    let invalid = |reason: String| Error::InvalidAbi {
        path: display_path(path),
        reason,
    };

    let contents = read_artifact(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))?;
    let abi = extract_abi(value)
        .ok_or_else(|| invalid("expected an ABI array or an artifact with an `abi` field".into()))?;
    serde_json::from_value(abi).map_err(|e| invalid(e.to_string()))
}

/// Reads and decodes a hex bytecode file. An empty file yields empty bytecode.
pub fn load_bytecode(path: &Path) -> Result<Vec<u8>, Error> {
    let contents = read_artifact(path)?;
    hex::decode(normalize_bytecode(&contents)).map_err(|source| Error::InvalidBytecode {
        path: display_path(path),
        source,
    })
}

fn read_artifact(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ReadArtifact {
        path: display_path(path),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| display_path(Path::new(name)))
        .unwrap_or_else(|| display_path(path))
}
