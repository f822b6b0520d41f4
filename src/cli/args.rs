use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the gendump binary.
#[derive(Parser, Debug)]
#[command(
    name = "gendump",
    version,
    about = "Pick closed instantiations for generic node types and dump their encoded names"
)]
pub struct CliArgs {
    // ==================== Command-line Only Options ====================
    /// Path to a gendump.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print the final configuration instead of running.
    #[arg(long = "show-config", alias = "showConfig")]
    pub show_config: bool,

    /// Colour diagnostics. Defaults to whether stderr is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Also write the run summary as JSON to this file.
    #[arg(long)]
    pub summary: Option<PathBuf>,

    // ==================== Input ====================
    /// Type catalog to load.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Slash delimited category path whose subtree is walked.
    #[arg(long)]
    pub category: Option<String>,

    /// Fail instead of walking the whole catalog when the category is missing.
    #[arg(long = "require-category", alias = "requireCategory")]
    pub require_category: bool,

    // ==================== Output ====================
    /// Directory both artifacts are written to.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Output file of the funny string.
    #[arg(long = "funny-string", alias = "funnyString")]
    pub funny_string: Option<PathBuf>,

    /// Output file of the type dump.
    #[arg(long = "type-dump", alias = "typeDump")]
    pub type_dump: Option<PathBuf>,

    /// Namespace prefix removed from funny string entries.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Field delimiter of the funny string.
    #[arg(long)]
    pub delimiter: Option<String>,

    // ==================== Resolution ====================
    /// Strictness passed to the generic validity check.
    #[arg(long)]
    pub strict: Option<bool>,

    /// Require candidates listed in the type dump to be supported.
    #[arg(
        long = "diagnostic-requires-supported",
        alias = "diagnosticRequiresSupported"
    )]
    pub diagnostic_requires_supported: bool,
}
