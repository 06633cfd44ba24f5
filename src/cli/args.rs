//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Single-page portfolio generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: folio.toml)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a starter portfolio
    #[command(visible_alias = "i")]
    Init {
        /// Site directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,
    },

    /// Render the page and copy public files
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then serve the output locally
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Rebuild when sources change
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Check config and referenced public files
    #[command(visible_alias = "v")]
    Validate {
        /// Treat missing files as warnings instead of errors
        #[arg(long, short = 'w')]
        warn_only: bool,
    },

    /// Replay visibility observations through the section tracker
    #[command(visible_alias = "t")]
    Trace {
        #[command(flatten)]
        args: TraceArgs,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Override site URL for deployment.
    ///
    /// The path component becomes the URL prefix, e.g.
    ///   folio build --site-url "https://ruby.github.io/folio"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Trace command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct TraceArgs {
    /// JSON file with observation batches or a scroll script.
    /// Use `-` to read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Print one JSON object per step instead of text
    #[arg(short, long)]
    pub json: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_trace(&self) -> bool {
        matches!(self.command, Commands::Trace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli =
            Cli::try_parse_from(["folio", "serve", "-p", "8080", "--watch", "false"]).unwrap();
        match cli.command {
            Commands::Serve { port, watch, .. } => {
                assert_eq!(port, Some(8080));
                assert_eq!(watch, Some(false));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
    }

    #[test]
    fn test_parse_trace() {
        let cli = Cli::try_parse_from(["folio", "t", "events.json", "--json"]).unwrap();
        assert!(cli.is_trace());
        match cli.command {
            Commands::Trace { args } => {
                assert_eq!(args.input, PathBuf::from("events.json"));
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["folio", "build", "-C", "site/folio.toml", "-c"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("site/folio.toml"));
        match cli.command {
            Commands::Build { build_args } => assert!(build_args.clean),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
