//! CLI for the subgrab subtitle provider.

mod chooser;
mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use subgrab_core::config;
use subgrab_core::source::VideoMetadata;

use commands::{run_classify, run_get, run_load, run_plugin, run_search, run_unpack};

/// Top-level CLI for subgrab.
#[derive(Debug, Parser)]
#[command(name = "subgrab")]
#[command(about = "subgrab: find, download and unpack subtitles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where subtitles come from: a local directory, or direct http(s) links.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Search this directory instead of treating terms as URLs.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Metadata of the video being played.
#[derive(Debug, Clone, Default, Args)]
pub struct VideoArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub original_title: String,
    #[arg(long, default_value = "")]
    pub tvshow_title: String,
    #[arg(long, default_value = "")]
    pub year: String,
    #[arg(long, default_value = "")]
    pub season: String,
    #[arg(long, default_value = "")]
    pub episode: String,
}

impl From<VideoArgs> for VideoMetadata {
    fn from(v: VideoArgs) -> Self {
        VideoMetadata {
            title: v.title,
            original_title: v.original_title,
            tvshow_title: v.tvshow_title,
            year: v.year,
            season: v.season,
            episode: v.episode,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Search a source for subtitles.
    Search {
        /// Search string (or a direct URL without --dir).
        term: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Language reported for results.
        #[arg(long = "language", value_name = "LANG")]
        languages: Vec<String>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download one search result and print the local subtitle path.
    Get {
        /// Item id from `search` output.
        item_id: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Never prompt; take the first subtitle of an archive.
        #[arg(long)]
        first: bool,
    },

    /// Run a local file through the pipeline as if it was just downloaded.
    Load {
        /// Subtitle or archive file.
        file: PathBuf,

        /// Never prompt; take the first subtitle of an archive.
        #[arg(long)]
        first: bool,
    },

    /// List the subtitles inside an archive.
    Unpack {
        /// Path to a .zip or .rar file.
        archive: String,
    },

    /// Show how file names are classified.
    Classify {
        /// File names to classify.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Handle a plugin request such as `?action=search&languages=English`.
    Plugin {
        /// Query string passed by the host.
        paramstring: String,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        video: VideoArgs,

        /// Never prompt; take the first subtitle of an archive.
        #[arg(long)]
        first: bool,

        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Search {
                term,
                source,
                languages,
                json,
            } => run_search(&cfg, &source, &term, languages, json)?,
            CliCommand::Get {
                item_id,
                source,
                first,
            } => run_get(&cfg, &source, &item_id, first)?,
            CliCommand::Load { file, first } => run_load(&cfg, &file, first)?,
            CliCommand::Unpack { archive } => run_unpack(&cfg, &archive)?,
            CliCommand::Classify { names } => run_classify(&names),
            CliCommand::Plugin {
                paramstring,
                source,
                video,
                first,
                json,
            } => run_plugin(&cfg, &source, &paramstring, video.into(), first, json)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
