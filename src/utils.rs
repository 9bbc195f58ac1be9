use serde_json::Value;
use std::path::{Component, Path};

/// Strips surrounding whitespace and an optional `0x` prefix from bytecode text.
/// Compilers emit `.bin` files both with and without the prefix, and usually with a trailing newline.
pub fn normalize_bytecode(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Extracts the ABI array from parsed ABI file contents.
/// Accepts either a bare ABI array or a compiler artifact object with an `abi` field
/// (the Hardhat and Foundry output formats). Returns `None` for anything else.
pub fn extract_abi(value: Value) -> Option<Value> {
    match value {
        Value::Array(_) => Some(value),
        Value::Object(mut object) => object.remove("abi").filter(Value::is_array),
        _ => None,
    }
}

/// Returns `true` if `name` is usable as a single directory name.
/// Rejects empty names, path separators and the `.`/`..` components.
pub fn is_plain_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}

/// Renders a path the way it is recorded in the ledger and in generated headers.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
