//! `yaml-patch` command-line logic.
//!
//! The binary entry point only parses arguments and prints; reading the
//! inputs and applying the patches lives here so it can be tested.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::debug;

use crate::codec::yaml::{decode_document, decode_patch, encode_document};
use crate::codec::Format;
use crate::error::PatchError;
use crate::node::Node;
use crate::patch::Patch;
use crate::types::ApplyOptions;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to read document from stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("invalid ops file {}: {source}", .path.display())]
    DecodePatch { path: PathBuf, source: PatchError },
    #[error(transparent)]
    Patch(#[from] PatchError),
}

// ── Arguments ─────────────────────────────────────────────────────────────

/// Apply YAML patches to a YAML or JSON document.
///
/// The document is read from stdin unless `--input` is given, and the result
/// is written to stdout.
#[derive(Parser, Debug, Default)]
#[command(name = "yaml-patch", version)]
pub struct Cli {
    /// Path to a file of patch operations. Repeat to apply several files in
    /// order.
    #[arg(long = "ops-file", short = 'o', value_name = "PATH")]
    pub ops_files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    pub output: Format,

    /// Fail when a `key=value` path matches nothing instead of skipping the
    /// operation.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Read the document from this file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

impl Cli {
    pub fn apply_options(&self) -> ApplyOptions {
        ApplyOptions {
            fail_on_unmatched: self.strict,
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Read and decode one ops file.
pub fn load_patch_file(path: &Path) -> Result<Patch, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_patch(&text).map_err(|source| CliError::DecodePatch {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode `doc`, apply each patch in turn and encode the result.
pub fn apply_patches(
    doc: &str,
    patches: &[Patch],
    output: Format,
    options: &ApplyOptions,
) -> Result<String, CliError> {
    let mut root = Node::new(decode_document(doc)?);
    for patch in patches {
        patch.apply_to_node(&mut root, options)?;
    }
    Ok(encode_document(&root, output)?)
}

/// Run the command described by `cli`, returning the encoded document.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let patches = cli
        .ops_files
        .iter()
        .map(|path| load_patch_file(path))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(files = patches.len(), "loaded ops files");

    let doc = match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CliError::Stdin)?;
            buf
        }
    };

    apply_patches(&doc, &patches, cli.output, &cli.apply_options())
}

// ── Tests ─────────────────────────────────────────────────────────────────
