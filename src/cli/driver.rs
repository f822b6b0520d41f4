//! End-to-end run: configuration to artifacts on disk.
//!
//! ```text
//! gendump.json + flags ─► ResolvedOptions
//!                               │
//! catalog.json ─► StaticRegistry ─► CategoryTree ─► prioritized entries
//!                                                        │
//!                                      ┌─────────────────┴─────────────┐
//!                                      ▼                               ▼
//!                                 type dump pass                funny string pass
//! ```
//!
//! The type dump is produced and written before the funny string. Both
//! passes share one engine and one list of prioritized entries.

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

use crate::cli::args::CliArgs;
use crate::cli::config::{
    DEFAULT_CONFIG_FILE, ResolvedOptions, load_config, resolve_options, validate_options,
};
use gendump_catalog::{StaticRegistry, load_catalog};
use gendump_common::{Diagnostic, diagnostic_codes};
use gendump_solver::{Artifact, ArtifactAssembler, ResolutionEngine};

/// Counts and paths reported once a run has finished.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Entries in the flattened category, closed types included.
    pub entries: usize,
    pub open_types: usize,
    /// Open types that received an argument in the funny string.
    pub resolved: usize,
    pub unresolved: usize,
    /// Candidates discarded by a failed instantiation or check, both passes.
    pub rejected_candidates: usize,
    /// Whether the configured category root was found.
    pub category_found: bool,
    pub funny_string_path: PathBuf,
    pub type_dump_path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Both artifacts of a run, before anything is written.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    pub type_dump: Artifact,
    pub funny_string: Artifact,
    pub entries: usize,
    pub open_types: usize,
    pub category_found: bool,
    /// Diagnostics raised outside the two passes.
    pub setup_diagnostics: Vec<Diagnostic>,
}

/// Merge the config file (explicit or discovered in `cwd`) with CLI flags.
pub fn load_options(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config_path = args.config.clone().or_else(|| {
        let default_path = cwd.join(DEFAULT_CONFIG_FILE);
        default_path.is_file().then_some(default_path)
    });

    let config = match config_path.as_deref() {
        Some(path) => Some(load_config(path)?),
        None => None,
    };

    let mut resolved = resolve_options(config.as_ref())?;
    apply_cli_overrides(&mut resolved, args)?;
    Ok(resolved)
}

/// CLI flags win over config values.
pub fn apply_cli_overrides(options: &mut ResolvedOptions, args: &CliArgs) -> Result<()> {
    if let Some(catalog) = &args.catalog {
        options.catalog = Some(catalog.clone());
    }
    if let Some(category) = &args.category {
        options.category_root = category.clone();
    }
    if args.require_category {
        options.require_category = true;
    }
    if let Some(prefix) = &args.prefix {
        options.namespace_prefix = prefix.clone();
    }
    if let Some(delimiter) = &args.delimiter {
        options.delimiter = delimiter.clone();
    }
    if let Some(path) = &args.funny_string {
        options.funny_string_path = path.clone();
    }
    if let Some(path) = &args.type_dump {
        options.type_dump_path = path.clone();
    }
    if let Some(dir) = &args.out_dir {
        options.funny_string_path = relocate(dir, &options.funny_string_path)?;
        options.type_dump_path = relocate(dir, &options.type_dump_path)?;
    }
    if let Some(strict) = args.strict {
        options.strict = strict;
    }
    if args.diagnostic_requires_supported {
        options.diagnostic_requires_supported = true;
    }

    validate_options(options)
}

fn relocate(dir: &Path, path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path {} has no file name", path.display()))?;
    Ok(dir.join(file_name))
}

/// Load the catalog, produce both artifacts and write them out.
pub fn run(options: &ResolvedOptions) -> Result<RunSummary> {
    let catalog_path = options.catalog.as_deref().ok_or_else(|| {
        anyhow!("no catalog configured; pass --catalog or set \"catalog\" in {DEFAULT_CONFIG_FILE}")
    })?;
    let registry = load_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog: {}", catalog_path.display()))?;

    let generated = generate(&registry, options)?;
    write_artifact(&options.type_dump_path, &generated.type_dump.text)?;
    write_artifact(&options.funny_string_path, &generated.funny_string.text)?;

    let summary = summarize(generated, options);
    info!(
        entries = summary.entries,
        resolved = summary.resolved,
        unresolved = summary.unresolved,
        "run finished"
    );
    Ok(summary)
}

/// Produce both artifacts from an already loaded registry.
pub fn generate(registry: &StaticRegistry, options: &ResolvedOptions) -> Result<GeneratedArtifacts> {
    let _span = info_span!("generate", category = %options.category_root).entered();
    let mut setup_diagnostics = Vec::new();

    let tree = registry.category_tree();
    let catalog = registry.catalog();
    let root = tree.subcategory(&options.category_root);
    if root.is_none() {
        if options.require_category {
            bail!("category '{}' not found in catalog", options.category_root);
        }
        warn!(category = %options.category_root, "category not found, flattening the whole catalog");
        setup_diagnostics.push(Diagnostic::from_code(
            diagnostic_codes::CATEGORY_NOT_FOUND,
            options.category_root.as_str(),
            &[options.category_root.as_str()],
        ));
    }

    let engine = ResolutionEngine::new(registry, options.policy())
        .context("catalog cannot drive generic resolution")?;
    let entries = engine.prioritized_entries(root, &catalog);
    let open_types = entries.iter().filter(|e| e.is_open_generic).count();

    let assembler = ArtifactAssembler::new(&engine, options.artifact_options());
    let type_dump = assembler.type_dump(&entries);
    let funny_string = assembler.funny_string(&entries);

    Ok(GeneratedArtifacts {
        type_dump,
        funny_string,
        entries: entries.len(),
        open_types,
        category_found: root.is_some(),
        setup_diagnostics,
    })
}

fn summarize(generated: GeneratedArtifacts, options: &ResolvedOptions) -> RunSummary {
    let unresolved = generated.funny_string.report.unresolved.len();
    let rejected_candidates = generated.type_dump.report.rejected_candidates
        + generated.funny_string.report.rejected_candidates;

    let mut diagnostics = generated.setup_diagnostics;
    diagnostics.extend(generated.type_dump.report.diagnostics);
    diagnostics.extend(generated.funny_string.report.diagnostics);

    RunSummary {
        entries: generated.entries,
        open_types: generated.open_types,
        resolved: generated.open_types - unresolved,
        unresolved,
        rejected_candidates,
        category_found: generated.category_found,
        funny_string_path: options.funny_string_path.clone(),
        type_dump_path: options.type_dump_path.clone(),
        diagnostics,
    }
}

/// Replace `path` with `contents`, creating parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write artifact: {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(())
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize run summary")?;
    write_artifact(path, &json)
}
