//! Artifact assembly.
//!
//! Two artifacts come out of a run:
//!
//! - the **funny string**: `|` followed by one encoded name per prioritized
//!   entry, each followed by `|`, with the namespace prefix removed
//! - the **type dump**: one `<full name>: <arg>, <arg>, \n` line per open type
//!
//! Each call owns its buffer from start to finish and never looks at a
//! previously written artifact.

use crate::registry::TypeRegistry;
use crate::resolve::{PassReport, ResolutionEngine};
use crate::types::FlatEntry;
use gendump_common::limits::{
    CLOSE_MARKER, DEFAULT_DELIMITER, DEFAULT_NAMESPACE_PREFIX, OPEN_MARKER,
    TYPE_DUMP_ARGUMENT_TERMINATOR, TYPE_DUMP_SEPARATOR,
};
use tracing::{info, info_span};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactOptions {
    /// Removed from every encoded name of the funny string.
    pub namespace_prefix: String,
    pub delimiter: String,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// Rendered artifact text plus what was recovered while producing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifact {
    pub text: String,
    pub report: PassReport,
}

pub struct ArtifactAssembler<'e, 'a, R: TypeRegistry + ?Sized> {
    engine: &'e ResolutionEngine<'a, R>,
    options: ArtifactOptions,
}

impl<'e, 'a, R: TypeRegistry + ?Sized> ArtifactAssembler<'e, 'a, R> {
    pub fn new(engine: &'e ResolutionEngine<'a, R>, options: ArtifactOptions) -> Self {
        Self { engine, options }
    }

    /// Single-argument artifact over already prioritized `entries`.
    ///
    /// Every entry is followed by the delimiter, including entries that
    /// resolved to nothing, which leave an empty slot.
    pub fn funny_string(&self, entries: &[FlatEntry]) -> Artifact {
        let _span = info_span!("funny_string", entries = entries.len()).entered();
        let registry = self.engine.registry();
        let mut report = PassReport::new();
        let resolved = self.engine.resolve_entries(entries, &mut report);

        let mut text = String::from(self.options.delimiter.as_str());
        for entry in &resolved {
            if let Some(ty) = entry.encodable() {
                text.push_str(&self.strip_namespace(registry.encode(ty)));
            }
            text.push_str(&self.options.delimiter);
        }

        info!(
            resolved = resolved.iter().filter(|e| e.encodable().is_some()).count(),
            unresolved = report.unresolved.len(),
            "funny string assembled"
        );
        Artifact { text, report }
    }

    /// Diagnostic artifact: every accepted candidate of every open entry.
    pub fn type_dump(&self, entries: &[FlatEntry]) -> Artifact {
        let _span = info_span!("type_dump", entries = entries.len()).entered();
        let registry = self.engine.registry();
        let mut report = PassReport::new();
        let mut text = String::new();
        let mut lines = 0usize;

        for entry in entries.iter().filter(|e| e.is_open_generic) {
            text.push_str(&registry.full_name(entry.ty));
            text.push_str(TYPE_DUMP_SEPARATOR);
            for candidate in self.engine.valid_candidates(entry.ty, &mut report) {
                let encoded = registry.encode(candidate.instantiation);
                text.push_str(argument_name(&encoded));
                text.push_str(TYPE_DUMP_ARGUMENT_TERMINATOR);
            }
            text.push('\n');
            lines += 1;
        }

        info!(lines, "type dump assembled");
        Artifact { text, report }
    }

    fn strip_namespace(&self, encoded: String) -> String {
        if self.options.namespace_prefix.is_empty() {
            encoded
        } else {
            encoded.replace(&self.options.namespace_prefix, "")
        }
    }
}

/// The argument portion of an encoded instantiation.
///
/// Drops everything up to and including the first open marker, and the
/// matching close marker at the end. A name without an open marker is
/// returned unchanged.
pub fn argument_name(encoded: &str) -> &str {
    match encoded.find(OPEN_MARKER) {
        Some(index) => {
            let rest = &encoded[index + OPEN_MARKER.len_utf8()..];
            rest.strip_suffix(CLOSE_MARKER).unwrap_or(rest)
        }
        None => encoded,
    }
}

#[cfg(test)]
#[path = "../tests/artifacts_tests.rs"]
mod tests;
