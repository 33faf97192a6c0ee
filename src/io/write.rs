// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write grids and sample coordinates.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use byteorder::{LittleEndian, WriteBytesExt};
use log::trace;
use ndarray::prelude::*;

use super::{FileWriteError, WriteGridError};
use crate::{c64, cli::Warn, samples::SampleDraws};

/// Write a grid row by row. Each cell is written as its real part then its
/// imaginary part.
pub fn write_grid<W: Write>(mut writer: W, grid: ArrayView2<c64>) -> Result<(), WriteGridError> {
    // `iter` visits elements in logical (row-major) order regardless of the
    // memory layout.
    for cell in grid.iter() {
        writer.write_f64::<LittleEndian>(cell.re)?;
        writer.write_f64::<LittleEndian>(cell.im)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_grid_to_file(file: &Path, grid: ArrayView2<c64>) -> Result<(), WriteGridError> {
    trace!("Writing a {:?} grid to {}", grid.dim(), file.display());
    let fh = File::create(file).map_err(|err| WriteGridError::Create {
        file: file.to_path_buf(),
        err,
    })?;
    write_grid(BufWriter::new(fh), grid)
}

/// Write random draws in the layout expected by
/// [`read_sample_draws`](super::read_sample_draws).
pub fn write_sample_draws<W: Write>(
    mut writer: W,
    draws: &[SampleDraws],
) -> Result<(), std::io::Error> {
    for &d in draws.iter().flatten() {
        writer.write_f64::<LittleEndian>(d)?;
    }
    writer.flush()
}

pub fn write_sample_draws_to_file(
    file: &Path,
    draws: &[SampleDraws],
) -> Result<(), WriteGridError> {
    trace!("Writing {} samples to {}", draws.len(), file.display());
    let fh = File::create(file).map_err(|err| WriteGridError::Create {
        file: file.to_path_buf(),
        err,
    })?;
    write_sample_draws(BufWriter::new(fh), draws)?;
    Ok(())
}

/// Test whether a file can be written to, before doing any expensive work.
/// A warning is issued if the file will be overwritten.
pub(crate) fn can_write_to_file(file: &Path) -> Result<(), FileWriteError> {
    trace!("Testing whether we can write to {}", file.display());

    let file_exists = file.exists();
    match std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable.
        Ok(_) => {
            // If the file in question didn't already exist, `OpenOptions::new`
            // creates it as part of its work. We don't want to keep the 0-sized
            // file; remove it if it didn't exist before.
            if file_exists {
                format!("Will overwrite the existing file '{}'", file.display()).warn();
            } else {
                std::fs::remove_file(file)?;
            }
        }

        // File doesn't exist. Attempt to make the directories leading up to the
        // file; if this fails, then we can't write the file anyway.
        Err(std::io::ErrorKind::NotFound) => {
            if let Some(p) = file.parent() {
                match std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .map_err(|e| e.kind())
                {
                    Ok(()) => (),
                    Err(std::io::ErrorKind::PermissionDenied) => {
                        return Err(FileWriteError::NewDirectory(p.to_path_buf()))
                    }
                    Err(e) => return Err(FileWriteError::IO(e.into())),
                }
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(FileWriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => return Err(FileWriteError::IO(e.into())),
    }

    Ok(())
}
