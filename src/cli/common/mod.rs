// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments shared between `wgrid` subcommands, as well as argument-file
//! handling.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{num::NonZeroUsize, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::DEFAULT_NUM_SAMPLES,
    dispatch::{new_grid_dispatch, DispatchError, DispatchKind, GridDispatch},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref DISPATCH_KINDS_COMMA_SEPARATED: String = DispatchKind::iter().join(", ");

    static ref DISPATCH_HELP: String =
        format!("How gridding is executed. Supported kinds: {}. Default: {}", *DISPATCH_KINDS_COMMA_SEPARATED, DispatchKind::CpuParallel);

    static ref NUM_SAMPLES_HELP: String =
        format!("The number of physical samples to grid. Each is gridded once per channel. Default: {DEFAULT_NUM_SAMPLES}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// Read an argument file into whatever type is expected at the call site. The
/// file's extension decides how it is decoded.
macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(WgridError::ArgFile(format!(
                            "Couldn't decode toml structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(WgridError::ArgFile(format!(
                            "Couldn't decode json structure from {}:\n{err}",
                            $arg_file.display()
                        )))
                    }
                }
            }

            _ => {
                return Err(WgridError::ArgFile(format!(
                    "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file.display(), *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments describing the physical samples.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SampleArgs {
    #[clap(short = 'n', long, help = NUM_SAMPLES_HELP.as_str(), help_heading = "SAMPLES")]
    pub(super) num_samples: Option<usize>,

    /// The seed of the random-number generator used to synthesise samples.
    /// Default: 1
    #[clap(long, help_heading = "SAMPLES")]
    pub(super) seed: Option<u32>,
}

impl SampleArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            num_samples: self.num_samples.or(other.num_samples),
            seed: self.seed.or(other.seed),
        }
    }
}

/// Arguments controlling how gridding is executed.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DispatchArgs {
    /// Grid on a single CPU core. This overrides --dispatch.
    #[clap(long, help_heading = "DISPATCH")]
    #[serde(default)]
    pub(super) cpu: bool,

    #[clap(long, help = DISPATCH_HELP.as_str(), help_heading = "DISPATCH")]
    pub(super) dispatch: Option<String>,

    /// The number of threads used for parallel gridding. The default is to
    /// use all available cores.
    #[clap(short = 't', long, help_heading = "DISPATCH")]
    pub(super) num_threads: Option<usize>,
}

impl DispatchArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            cpu: self.cpu || other.cpu,
            dispatch: self.dispatch.or(other.dispatch),
            num_threads: self.num_threads.or(other.num_threads),
        }
    }

    pub(super) fn parse(self) -> Result<Box<dyn GridDispatch>, DispatchArgsError> {
        let DispatchArgs {
            cpu,
            dispatch,
            num_threads,
        } = self;

        let kind = match dispatch {
            Some(s) => DispatchKind::from_str(&s.to_lowercase())
                .map_err(|_| DispatchArgsError::InvalidKind(s))?,
            None => DispatchKind::CpuParallel,
        };
        let kind = if cpu {
            if kind != DispatchKind::Cpu {
                format!("--cpu was given; ignoring the '{kind}' dispatch").warn();
            }
            DispatchKind::Cpu
        } else {
            kind
        };

        let num_threads = match num_threads {
            Some(0) => return Err(DispatchArgsError::ZeroThreads),
            Some(n) => {
                if kind == DispatchKind::Cpu {
                    format!("Sequential gridding uses one thread; ignoring --num-threads {n}")
                        .warn();
                }
                NonZeroUsize::new(n)
            }
            None => None,
        };

        Ok(new_grid_dispatch(kind, num_threads)?)
    }
}

#[derive(Error, Debug)]
pub(super) enum DispatchArgsError {
    #[error("'{0}' is not a valid dispatch kind. Supported kinds: {}", *DISPATCH_KINDS_COMMA_SEPARATED)]
    InvalidKind(String),

    #[error("The number of threads cannot be 0!")]
    ZeroThreads,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
