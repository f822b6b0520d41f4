use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use gendump_common::limits::{
    DEFAULT_CATEGORY_ROOT, DEFAULT_DELIMITER, DEFAULT_FUNNY_STRING_PATH, DEFAULT_NAMESPACE_PREFIX,
    DEFAULT_TYPE_DUMP_PATH,
};
use gendump_solver::{ArtifactOptions, ResolutionPolicy};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "gendump.json";

/// Custom deserializer for boolean options that accepts both bool and string values,
/// so `"strict": "false"` means the same as `"strict": false`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Contents of a `gendump.json` file. Every field is optional.
///
/// Relative paths are resolved against the directory of the file that
/// declares them.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GendumpConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub category_root: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub require_category: Option<bool>,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub funny_string_path: Option<PathBuf>,
    #[serde(default)]
    pub type_dump_path: Option<PathBuf>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub diagnostic_requires_supported: Option<bool>,
}

/// Fully resolved run options, printed by `--show-config`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub catalog: Option<PathBuf>,
    pub category_root: String,
    pub require_category: bool,
    pub namespace_prefix: String,
    pub delimiter: String,
    pub funny_string_path: PathBuf,
    pub type_dump_path: PathBuf,
    pub strict: bool,
    pub diagnostic_requires_supported: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        let policy = ResolutionPolicy::default();
        Self {
            catalog: None,
            category_root: DEFAULT_CATEGORY_ROOT.to_string(),
            require_category: false,
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            funny_string_path: PathBuf::from(DEFAULT_FUNNY_STRING_PATH),
            type_dump_path: PathBuf::from(DEFAULT_TYPE_DUMP_PATH),
            strict: policy.strict,
            diagnostic_requires_supported: policy.diagnostic_requires_supported,
        }
    }
}

impl ResolvedOptions {
    pub fn policy(&self) -> ResolutionPolicy {
        ResolutionPolicy {
            strict: self.strict,
            diagnostic_requires_supported: self.diagnostic_requires_supported,
        }
    }

    pub fn artifact_options(&self) -> ArtifactOptions {
        ArtifactOptions {
            namespace_prefix: self.namespace_prefix.clone(),
            delimiter: self.delimiter.clone(),
        }
    }
}

/// Fill every option not set by `config` with its default.
///
/// The result is not validated yet; CLI overrides may still replace values.
pub fn resolve_options(config: Option<&GendumpConfig>) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions::default();
    let Some(config) = config else {
        return Ok(resolved);
    };

    if let Some(catalog) = &config.catalog {
        resolved.catalog = Some(catalog.clone());
    }
    if let Some(root) = &config.category_root {
        resolved.category_root = root.clone();
    }
    if let Some(require) = config.require_category {
        resolved.require_category = require;
    }
    if let Some(prefix) = &config.namespace_prefix {
        resolved.namespace_prefix = prefix.clone();
    }
    if let Some(delimiter) = &config.delimiter {
        resolved.delimiter = delimiter.clone();
    }
    if let Some(path) = &config.funny_string_path {
        resolved.funny_string_path = path.clone();
    }
    if let Some(path) = &config.type_dump_path {
        resolved.type_dump_path = path.clone();
    }
    if let Some(strict) = config.strict {
        resolved.strict = strict;
    }
    if let Some(require) = config.diagnostic_requires_supported {
        resolved.diagnostic_requires_supported = require;
    }

    Ok(resolved)
}

pub fn validate_options(options: &ResolvedOptions) -> Result<()> {
    if options.delimiter.is_empty() {
        bail!("delimiter must not be empty");
    }
    let funny_string = output_identity(&options.funny_string_path)?;
    let type_dump = output_identity(&options.type_dump_path)?;
    if funny_string == type_dump {
        bail!(
            "funny string ({}) and type dump ({}) would both be written to {}",
            options.funny_string_path.display(),
            options.type_dump_path.display(),
            funny_string.display()
        );
    }
    Ok(())
}

/// Absolute path an output file will be written to, with `.` components
/// dropped and an existing parent directory canonicalized.
fn output_identity(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to resolve output path: {}", path.display()))?;
    let lexical: PathBuf = absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let parent = lexical
        .parent()
        .and_then(|parent| std::fs::canonicalize(parent).ok());
    match (parent, lexical.file_name()) {
        (Some(parent), Some(file_name)) => Ok(parent.join(file_name)),
        _ => Ok(lexical),
    }
}

pub fn parse_config(source: &str) -> Result<GendumpConfig> {
    let config = serde_json::from_str(source).context("failed to parse gendump config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<GendumpConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<GendumpConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    let base_dir = path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    rebase_paths(&mut config, base_dir);

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(base_dir, &extends);
        let base_config = load_config_inner(&base_path, visited)?;
        config = merge_configs(base_config, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(base_dir: &Path, extends: &str) -> PathBuf {
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}

fn rebase_paths(config: &mut GendumpConfig, base_dir: &Path) {
    for path in [
        &mut config.catalog,
        &mut config.funny_string_path,
        &mut config.type_dump_path,
    ]
    .into_iter()
    .flatten()
    {
        if path.is_relative() {
            *path = base_dir.join(&*path);
        }
    }
}

fn merge_configs(base: GendumpConfig, child: GendumpConfig) -> GendumpConfig {
    GendumpConfig {
        extends: None,
        catalog: child.catalog.or(base.catalog),
        category_root: child.category_root.or(base.category_root),
        require_category: child.require_category.or(base.require_category),
        namespace_prefix: child.namespace_prefix.or(base.namespace_prefix),
        delimiter: child.delimiter.or(base.delimiter),
        funny_string_path: child.funny_string_path.or(base.funny_string_path),
        type_dump_path: child.type_dump_path.or(base.type_dump_path),
        strict: child.strict.or(base.strict),
        diagnostic_requires_supported: child
            .diagnostic_requires_supported
            .or(base.diagnostic_requires_supported),
    }
}
