use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const KNOWN_CATEGORIES: [&str; 5] = ["system", "navigation", "file", "compression", "network"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogCommand {
    id: String,
    category: String,
    description: String,
    example: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    command: Vec<CatalogCommand>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("catalog").join("commands.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: CatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for command in &catalog.command {
        if command.id.trim().is_empty() || command.id.contains(char::is_whitespace) {
            panic!("catalog command id `{}` must be a single word", command.id);
        }
        if !seen.insert(command.id.clone()) {
            panic!("duplicate catalog command id `{}`", command.id);
        }
        if !KNOWN_CATEGORIES.contains(&command.category.as_str()) {
            panic!(
                "unknown category `{}` for catalog command `{}`",
                command.category, command.id
            );
        }
        if command.description.trim().is_empty() || command.example.trim().is_empty() {
            panic!(
                "catalog command `{}` needs a description and an example",
                command.id
            );
        }
    }

    let json = serde_json::to_string_pretty(&catalog.command).expect("serialize command catalog");
    let generated = format!(
        "/// Build-time generated command catalog JSON.\n\
pub const COMMAND_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("command_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
