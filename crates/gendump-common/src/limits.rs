//! Centralized limits and artifact constants.
//!
//! Shared by the catalog loader, the resolution engine and the driver so the
//! artifact format is defined in exactly one place.

// =============================================================================
// Catalog limits
// =============================================================================

/// Maximum number of segments in a category path.
///
/// Category paths come from catalog files. A path deeper than this is
/// rejected at load time instead of producing an absurdly nested tree.
pub const MAX_CATEGORY_DEPTH: usize = 32;

/// Separator between category path segments.
pub const CATEGORY_SEPARATOR: char = '/';

// =============================================================================
// Artifact format
// =============================================================================

/// Category walked when no other root is configured.
pub const DEFAULT_CATEGORY_ROOT: &str = "ProtoFlux/Runtimes/Execution/Nodes";

/// Prefix removed from every encoded name in the funny string.
pub const DEFAULT_NAMESPACE_PREFIX: &str =
    "[ProtoFluxBindings]FrooxEngine.ProtoFlux.Runtimes.Execution.Nodes";

/// Field delimiter of the funny string.
pub const DEFAULT_DELIMITER: &str = "|";

/// Separator between a type and its argument list in the type dump.
pub const TYPE_DUMP_SEPARATOR: &str = ": ";

/// Terminator written after every argument in the type dump.
pub const TYPE_DUMP_ARGUMENT_TERMINATOR: &str = ", ";

/// Marker opening a generic argument list in encoded names.
pub const OPEN_MARKER: char = '<';

/// Marker closing a generic argument list in encoded names.
pub const CLOSE_MARKER: char = '>';

/// Default output file of the funny string.
pub const DEFAULT_FUNNY_STRING_PATH: &str = "./funnystring.txt";

/// Default output file of the type dump.
pub const DEFAULT_TYPE_DUMP_PATH: &str = "./typestring.txt";
