//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::AssetCategory;
use crate::inject::ViewKind;

/// Manage custom stylesheets and scripts injected into card views
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cardassets.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Assets root containing css/ and js/ (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Registry file path (relative to project root)
    #[arg(short = 'R', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub registry: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config and create the asset directories
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Reconcile the registry with the asset directories
    #[command(visible_alias = "s")]
    Sync,

    /// List known assets and whether they are enabled
    #[command(visible_alias = "ls")]
    List {
        /// Only list one category (css or js)
        category: Option<AssetCategory>,
    },

    /// Flip an asset between enabled and disabled
    #[command(visible_alias = "t")]
    Toggle {
        #[command(flatten)]
        target: AssetTarget,
    },

    /// Enable an asset
    Enable {
        #[command(flatten)]
        target: AssetTarget,
    },

    /// Disable an asset
    Disable {
        #[command(flatten)]
        target: AssetTarget,
    },

    /// Print the URLs of enabled assets for a view
    Inject {
        #[command(flatten)]
        args: InjectArgs,
    },
}

/// One asset, addressed by category and relative path.
#[derive(clap::Args, Debug, Clone)]
pub struct AssetTarget {
    /// Asset category (css or js)
    pub category: AssetCategory,

    /// Path relative to the category directory (e.g. `nested/base.css`)
    pub path: String,
}

/// Inject command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InjectArgs {
    /// View being rendered
    #[arg(long, value_enum, default_value = "reviewer")]
    pub view: ViewKind,

    /// Print `<link>`/`<script>` tags instead of bare URLs
    #[arg(long)]
    pub html: bool,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
