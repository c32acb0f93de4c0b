// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vitrin")]
#[command(about = "Manage storefront product images and preview catalog display")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new vitrin.yml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Upload image files to the storefront's storage
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Image manifest (JSON array of references) to append the new URLs to
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Delete a managed image from storage
    Delete {
        /// The image reference to delete
        reference: String,

        /// Image manifest (JSON array of references) to remove the entry from
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Resolve an image reference to a renderable URL
    Sign {
        /// The image reference to resolve
        reference: String,
    },

    /// Preview the displayed price for a product's variants
    Price {
        /// JSON file holding the variant list
        #[arg(short, long)]
        file: PathBuf,

        /// Selected variant id, if any
        #[arg(short, long)]
        selected: Option<String>,
    },
}
