//! File-level orchestration used by the binary: loading source modules and
//! writing the image plus its JSON side files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::bytecode::ir::CompiledModule;
use crate::lang::program::SourceModule;

/// Load a module; `.json` files are JSON, anything else is postcard.
pub fn load_module(path: &Path) -> Result<SourceModule> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let module = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        let text = std::str::from_utf8(&bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
        SourceModule::from_json(text)?
    } else {
        SourceModule::from_postcard(&bytes)?
    };
    Ok(module)
}

/// `contract.json` -> `contract.avm`
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("avm")
}

/// Which side files to write next to the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideFiles {
    pub debug_map: bool,
    pub abi: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Written {
    pub image: PathBuf,
    pub debug_map: Option<PathBuf>,
    pub abi: Option<PathBuf>,
}

/// Write the image to `out`, plus `<stem>.debug.json` / `<stem>.abi.json`.
pub fn write_artifacts(module: &CompiledModule, out: &Path, side: SideFiles) -> Result<Written> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(out, &module.image).with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), bytes = module.image.len(), "image written");

    let debug_map = if side.debug_map {
        let path = out.with_extension("debug.json");
        write_json(&path, &module.debug_map())?;
        Some(path)
    } else {
        None
    };

    let abi = if side.abi {
        let path = out.with_extension("abi.json");
        write_json(&path, &module.abi())?;
        Some(path)
    } else {
        None
    };

    Ok(Written {
        image: out.to_path_buf(),
        debug_map,
        abi,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "side file written");
    Ok(())
}
