// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all wgrid-related errors. This should be the *only* error
//! enum that is publicly visible from the CLI.

use thiserror::Error;

use super::{common::DispatchArgsError, grid::GridArgsError};
use crate::{
    io::{FileWriteError, WriteGridError},
    params::GridParamsError,
};

/// The *only* publicly visible error from the `wgrid` CLI. Each error message
/// should carry a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum WgridError {
    /// An error related to the grid geometry or gridding itself.
    #[error("{0}\n\nEvery sample's footprint must lie on the grid. A larger grid size or cell size, or a smaller baseline, keeps samples in range.")]
    Grid(String),

    /// An error related to reading or synthesising samples.
    #[error("{0}\n\nSample files hold 4 little-endian f64s per sample; see the random-samples subcommand for generating one.")]
    Samples(String),

    /// An error related to how gridding is executed.
    #[error("{0}\n\nTry --cpu to grid on a single core.")]
    Dispatch(String),

    /// An error related to writing files.
    #[error("{0}\n\nCheck that the output path is writable and that there is enough disk space.")]
    FileWrite(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON, with the same field names as the long CLI arguments (with underscores).")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<GridArgsError> for WgridError {
    fn from(e: GridArgsError) -> Self {
        let s = e.to_string();
        match e {
            GridArgsError::SamplesFileDoesntExist(_) => Self::Samples(s),
            GridArgsError::Dispatch(e) => Self::from(e),
            GridArgsError::FileWrite(e) => Self::from(e),
            GridArgsError::GridSizeZero
            | GridArgsError::NumChansZero
            | GridArgsError::WSizeZero
            | GridArgsError::CellSizeInvalid(_)
            | GridArgsError::BaselineInvalid(_) => Self::Grid(s),
        }
    }
}

impl From<DispatchArgsError> for WgridError {
    fn from(e: DispatchArgsError) -> Self {
        Self::Dispatch(e.to_string())
    }
}

impl From<GridParamsError> for WgridError {
    fn from(e: GridParamsError) -> Self {
        let s = e.to_string();
        match e {
            GridParamsError::ReadSamples(_) => Self::Samples(s),
            GridParamsError::Convolution(_) | GridParamsError::Map(_) | GridParamsError::Grid(_) => {
                Self::Grid(s)
            }
            GridParamsError::WriteGrid(_) => Self::FileWrite(s),
        }
    }
}

impl From<WriteGridError> for WgridError {
    fn from(e: WriteGridError) -> Self {
        Self::FileWrite(e.to_string())
    }
}

impl From<FileWriteError> for WgridError {
    fn from(e: FileWriteError) -> Self {
        Self::FileWrite(e.to_string())
    }
}

impl From<toml::ser::Error> for WgridError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(format!("Couldn't serialise arguments to toml: {e}"))
    }
}

impl From<log::SetLoggerError> for WgridError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Failed to initialise logging: {e}"))
    }
}

impl From<std::io::Error> for WgridError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
