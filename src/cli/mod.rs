// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `wgrid`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `Wgrid`, `Wgrid::run`, and
//! `WgridError`.

#[macro_use]
mod common;
mod error;
mod grid;
mod random_samples;

pub(crate) use common::Warn;
pub use error::WgridError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{info, LevelFilter};

use self::common::InfoPrinter;
use crate::PROGRESS_BARS;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "W-projection gridding of radio-interferometric visibilities"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Wgrid {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Don't draw progress bars.
    #[clap(long)]
    #[clap(global = true)]
    no_progress_bars: bool,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(about = "Grid visibilities onto a regular grid with W projection.")]
    Grid(grid::GridArgs),

    #[clap(alias = "generate-samples")]
    #[clap(
        about = "Write synthetic sample coordinates to a file, for use with 'grid --samples-file'."
    )]
    RandomSamples(random_samples::RandomSamplesArgs),
}

impl Wgrid {
    pub fn run(self) -> Result<(), WgridError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            no_progress_bars,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity)?;
        // Enable progress bars if the user didn't say "no progress bars".
        if !no_progress_bars {
            PROGRESS_BARS.store(true);
        }

        // Print the version of wgrid and its build-time information.
        let sub_command = match &self.command {
            Command::Grid(_) => "grid",
            Command::RandomSamples(_) => "random-samples",
        };
        info!("wgrid {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args)?;
                    f.write_all(toml_str.as_bytes())?;
                }
                args.run(dry_run)?;
            }};
        }

        match self.command {
            Command::Grid(args) => merge_save_run!(args),

            Command::RandomSamples(args) => {
                if save_toml.is_some() {
                    "random-samples doesn't take an argument file; ignoring --save-toml".warn();
                }
                args.run(dry_run)?
            }
        }

        info!("wgrid {} complete.", sub_command);
        Ok(())
    }
}

/// The log level for a `-v` count.
fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Send all log messages to `stdout`. Colours are only used on a tty. From
/// `-vvv`, each message carries a timestamp and its source line.
fn setup_logging(verbosity: u8) -> Result<(), WgridError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .target(env_logger::Target::Stdout)
        .format_target(false)
        .filter_level(log_level(verbosity));
    if verbosity >= 3 {
        builder.format(|buf, record| {
            use std::io::Write;

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        });
    }
    builder.try_init()?;
    Ok(())
}

/// Report the git commit and compiler that built this binary.
fn display_build_info() {
    let commit = match (GIT_COMMIT_HASH_SHORT, GIT_DIRTY) {
        (Some(hash), Some(true)) => format!("{hash} (dirty)"),
        (Some(hash), _) => hash.to_string(),
        (None, _) => "<no git info>".to_string(),
    };
    let mut printer = InfoPrinter::new("Build".into());
    let mut git = vec![format!("Git commit: {commit}").into()];
    if let Some(head_ref) = GIT_HEAD_REF {
        git.push(format!("Git head ref: {head_ref}").into());
    }
    printer.push_block(git);
    printer.push_block(vec![
        format!("Built: {BUILT_TIME_UTC}").into(),
        format!("Compiler: {RUSTC_VERSION}").into(),
    ]);
    printer.display();
}
