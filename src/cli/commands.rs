use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::loader::DEFAULT_MAX_ATTEMPTS;
use crate::core::manifest::SpinManifest;
use crate::core::source::{FrameSource, expand_sources};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "framespin")]
#[command(author, version, about = "Terminal 360° frame spinner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View a frame set interactively: drag left/right to rotate
    View {
        #[command(flatten)]
        source_args: SourceArgs,

        /// Play one automatic rotation once the frames load
        #[arg(long)]
        demo: bool,
    },

    /// Fetch and decode a frame set without opening the viewer
    Check {
        #[command(flatten)]
        source_args: SourceArgs,

        /// Concurrent fetches
        #[arg(long, default_value = "4")]
        parallel: u8,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Frame source selection shared by `view` and `check`
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Image URLs, files, or .zip archives, in rotation order
    /// Examples:
    /// https://cdn.example.com/chair/000.jpg ... 035.jpg
    /// shots/*.png
    /// chair-360.zip
    #[arg(required_unless_present = "manifest", conflicts_with = "manifest", verbatim_doc_comment)]
    pub sources: Vec<String>,

    /// JSON manifest listing the frame set
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Fetch + decode attempts per frame before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_retries: u32,
}

impl SourceArgs {
    /// Resolve the arguments (or the manifest) into the ordered source list,
    /// plus the manifest's demo flag.
    pub fn resolve(&self) -> Result<(Vec<FrameSource>, bool)> {
        if let Some(ref path) = self.manifest {
            let manifest = SpinManifest::load(path)?;
            Ok((expand_sources(&manifest.frames)?, manifest.demo))
        } else {
            Ok((expand_sources(&self.sources)?, false))
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Fish,
    Zsh,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Zsh => clap_complete::Shell::Zsh,
        }
    }
}
