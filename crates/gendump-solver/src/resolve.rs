//! Generic argument resolution.
//!
//! For every open type the engine picks at most one argument, trying in order:
//!
//! 1. the registry's structural reference placeholder
//! 2. the registry's primitive numeric placeholder
//! 3. the registry's candidate list, first valid entry wins
//!
//! Steps 1 and 2 build the instantiation through [`TypeRegistry::instantiate`];
//! candidates are already closed. A choice must be both supported and a valid
//! generic instantiation.
//!
//! The diagnostic pass instead walks the whole candidate list and keeps every
//! valid candidate. By default it does not ask whether the candidate is
//! supported, so it surfaces entries the single pass would reject; see
//! [`ResolutionPolicy::diagnostic_requires_supported`].
//!
//! Failures while instantiating or validating a single candidate are recorded
//! in the caller's [`PassReport`] and never abort the loop.

use crate::category::{CategoryNode, flatten_category};
use crate::registry::{SetupError, TypeRegistry, require_placeholders};
use crate::types::{FlatEntry, Placeholders, TypeId};
use gendump_common::{Diagnostic, diagnostic_codes};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Knobs of the resolution policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Passed through to [`TypeRegistry::is_valid_generic_instantiation`].
    pub strict: bool,
    /// Also require `is_supported` in the diagnostic pass.
    pub diagnostic_requires_supported: bool,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            strict: true,
            diagnostic_requires_supported: false,
        }
    }
}

/// Which step of the policy produced a choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgumentSource {
    StructuralReference,
    PrimitiveNumeric,
    /// Position in the registry's candidate list.
    Candidate(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChosenArgument {
    pub source: ArgumentSource,
    /// The closed type to encode.
    pub instantiation: TypeId,
}

/// One resolved entry of a single-argument pass. Never mutated once built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub ty: TypeId,
    pub is_open_generic: bool,
    pub chosen: Option<ChosenArgument>,
}

impl ResolvedEntry {
    /// The type to encode for this entry, if any.
    ///
    /// Closed types encode themselves; open types encode their chosen
    /// instantiation and yield `None` when nothing validated.
    pub fn encodable(&self) -> Option<TypeId> {
        if self.is_open_generic {
            self.chosen.map(|c| c.instantiation)
        } else {
            Some(self.ty)
        }
    }
}

/// A candidate accepted by the diagnostic pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidCandidate {
    pub rank: usize,
    pub instantiation: TypeId,
}

/// Per-pass record of recovered failures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Candidates discarded because instantiation or a check failed.
    pub rejected_candidates: usize,
    /// Open types for which no argument validated.
    pub unresolved: Vec<TypeId>,
}

impl PassReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        self.rejected_candidates += 1;
        self.diagnostics.push(diagnostic);
    }
}

// =============================================================================
// ResolutionEngine
// =============================================================================

pub struct ResolutionEngine<'a, R: TypeRegistry + ?Sized> {
    registry: &'a R,
    policy: ResolutionPolicy,
    placeholders: Placeholders,
}

impl<'a, R: TypeRegistry + ?Sized> ResolutionEngine<'a, R> {
    /// Create an engine, failing if the registry lacks a placeholder.
    pub fn new(registry: &'a R, policy: ResolutionPolicy) -> Result<Self, SetupError> {
        let placeholders = require_placeholders(registry)?;
        Ok(Self {
            registry,
            policy,
            placeholders,
        })
    }

    pub fn registry(&self) -> &'a R {
        self.registry
    }

    /// Flatten `root` and order the result by ascending name length.
    ///
    /// The sort is stable: entries with equal name length keep traversal
    /// order, which keeps both artifacts deterministic.
    pub fn prioritized_entries(
        &self,
        root: Option<&CategoryNode>,
        catalog: &[TypeId],
    ) -> Vec<FlatEntry> {
        let mut entries = flatten_category(root, catalog, self.registry);
        entries.sort_by_cached_key(|entry| self.registry.name(entry.ty).len());
        trace!(count = entries.len(), "prioritized category entries");
        entries
    }

    /// Resolve one argument for every open entry.
    pub fn resolve_entries(
        &self,
        entries: &[FlatEntry],
        report: &mut PassReport,
    ) -> Vec<ResolvedEntry> {
        entries
            .iter()
            .map(|entry| {
                let chosen = if entry.is_open_generic {
                    self.resolve_argument(entry.ty, report)
                } else {
                    None
                };
                ResolvedEntry {
                    ty: entry.ty,
                    is_open_generic: entry.is_open_generic,
                    chosen,
                }
            })
            .collect()
    }

    /// Apply the single-argument priority policy to `open`.
    pub fn resolve_argument(&self, open: TypeId, report: &mut PassReport) -> Option<ChosenArgument> {
        let preferred = [
            (
                ArgumentSource::StructuralReference,
                self.placeholders.structural_reference,
            ),
            (
                ArgumentSource::PrimitiveNumeric,
                self.placeholders.primitive_numeric,
            ),
        ];
        for (source, argument) in preferred {
            if let Some(instantiation) = self.try_instantiate(open, argument, report)
                && self.accepts(instantiation, true, report)
            {
                return Some(ChosenArgument {
                    source,
                    instantiation,
                });
            }
        }

        for (rank, candidate) in self.registry.common_candidates(open).into_iter().enumerate() {
            if self.accepts(candidate, true, report) {
                return Some(ChosenArgument {
                    source: ArgumentSource::Candidate(rank),
                    instantiation: candidate,
                });
            }
        }

        let name = self.registry.full_name(open);
        debug!(ty = %name, "no valid generic argument");
        report.diagnostics.push(Diagnostic::from_code(
            diagnostic_codes::NO_VALID_ARGUMENT,
            name.as_str(),
            &[name.as_str()],
        ));
        report.unresolved.push(open);
        None
    }

    /// Every candidate of `open` the diagnostic policy accepts, in rank order.
    pub fn valid_candidates(&self, open: TypeId, report: &mut PassReport) -> Vec<ValidCandidate> {
        let require_supported = self.policy.diagnostic_requires_supported;
        let mut seen = FxHashSet::default();
        self.registry
            .common_candidates(open)
            .into_iter()
            .enumerate()
            .filter(|&(_, candidate)| seen.insert(candidate))
            .filter(|&(_, candidate)| self.accepts(candidate, require_supported, report))
            .map(|(rank, instantiation)| ValidCandidate {
                rank,
                instantiation,
            })
            .collect()
    }

    fn try_instantiate(
        &self,
        open: TypeId,
        argument: TypeId,
        report: &mut PassReport,
    ) -> Option<TypeId> {
        match self.registry.instantiate(open, argument) {
            Ok(ty) => Some(ty),
            Err(err) => {
                let ty = self.registry.full_name(open);
                let arg = self.registry.full_name(argument);
                debug!(%ty, %arg, error = %err, "instantiation rejected");
                report.record(Diagnostic::from_code(
                    diagnostic_codes::INSTANTIATION_FAILED,
                    ty.as_str(),
                    &[ty.as_str(), arg.as_str(), &err.to_string()],
                ));
                None
            }
        }
    }

    /// Run the supported (optional) and validity checks on a closed type.
    fn accepts(&self, ty: TypeId, require_supported: bool, report: &mut PassReport) -> bool {
        if require_supported && !self.registry.is_supported(ty) {
            trace!(ty = %self.registry.full_name(ty), "candidate not supported");
            return false;
        }
        match self
            .registry
            .is_valid_generic_instantiation(ty, self.policy.strict)
        {
            Ok(valid) => {
                if !valid {
                    trace!(ty = %self.registry.full_name(ty), "candidate not a valid instantiation");
                }
                valid
            }
            Err(err) => {
                let name = self.registry.full_name(ty);
                debug!(ty = %name, error = %err, "generic validity check failed");
                report.record(Diagnostic::from_code(
                    diagnostic_codes::VALIDITY_CHECK_FAILED,
                    name.as_str(),
                    &[name.as_str(), &err.to_string()],
                ));
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod tests;
