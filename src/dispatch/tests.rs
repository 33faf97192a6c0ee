// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{num::NonZeroUsize, str::FromStr};

use ndarray::prelude::*;
use strum::IntoEnumIterator;

use super::*;
use crate::{
    gridding::{grid_sample, map_offsets, new_grid, OffsetMapper},
    samples::{channel_freqs, Lcg, Visibilities},
};

const GRID_SIZE: usize = 64;

fn setup(num_samples: usize, num_chans: usize, seed: u32) -> (ConvolutionTable, Vec<Sample>) {
    let baseline = 20.0;
    let cell_size = 5.0;
    let num_chans = NonZeroUsize::new(num_chans).unwrap();
    let freqs = channel_freqs(num_chans);
    let table = ConvolutionTable::with_over_sample(freqs[0], cell_size, baseline, 5, 4).unwrap();
    let mapper = OffsetMapper::new(&table, cell_size, GRID_SIZE);
    let draws = Lcg::new(seed).sample_draws(num_samples);
    let vis = Visibilities::from_draws(&draws, baseline, num_chans);
    let samples = map_offsets(&vis, &freqs, &mapper).unwrap();
    (table, samples)
}

/// Grid with [`grid_sample`] directly, in sample order.
fn reference_grid(table: &ConvolutionTable, samples: &[Sample]) -> Array2<c64> {
    let mut grid = new_grid(GRID_SIZE);
    for sample in samples {
        grid_sample(grid.view_mut(), table, sample);
    }
    grid
}

#[test]
fn test_sequential_matches_reference() {
    let (table, samples) = setup(300, 2, 1);
    let mut grid = new_grid(GRID_SIZE);
    CpuSequential
        .accumulate(&table, &samples, grid.view_mut())
        .unwrap();
    assert_eq!(grid, reference_grid(&table, &samples));
}

#[test]
fn test_parallel_is_bit_identical_to_sequential() {
    let (table, samples) = setup(500, 3, 7);
    let expected = reference_grid(&table, &samples);

    let mut grid = new_grid(GRID_SIZE);
    CpuParallel::new()
        .accumulate(&table, &samples, grid.view_mut())
        .unwrap();
    assert_eq!(grid, expected);

    // Band heights that don't divide the grid, that are smaller than a
    // footprint, and that cover the whole grid.
    for band_height in [1, 3, 7, 13, GRID_SIZE, GRID_SIZE * 2] {
        for num_threads in [1, 3] {
            let dispatch = CpuParallel::with_threads(NonZeroUsize::new(num_threads).unwrap())
                .unwrap()
                .band_height(NonZeroUsize::new(band_height).unwrap());
            let mut grid = new_grid(GRID_SIZE);
            dispatch
                .accumulate(&table, &samples, grid.view_mut())
                .unwrap();
            assert_eq!(
                grid, expected,
                "band height {band_height}, {num_threads} threads"
            );
        }
    }
}

#[test]
fn test_accumulation_adds_to_existing_grid() {
    let (table, samples) = setup(50, 1, 3);
    let (first, second) = samples.split_at(20);

    for dispatch in [
        Box::new(CpuSequential) as Box<dyn GridDispatch>,
        Box::new(CpuParallel::new()),
    ] {
        let mut grid = new_grid(GRID_SIZE);
        dispatch.accumulate(&table, first, grid.view_mut()).unwrap();
        dispatch
            .accumulate(&table, second, grid.view_mut())
            .unwrap();
        assert_eq!(grid, reference_grid(&table, &samples));
    }
}

#[test]
fn test_no_samples_leaves_grid_unchanged() {
    let (table, _) = setup(1, 1, 1);
    for kind in DispatchKind::iter() {
        let dispatch = new_grid_dispatch(kind, None).unwrap();
        let mut grid = new_grid(GRID_SIZE);
        dispatch.accumulate(&table, &[], grid.view_mut()).unwrap();
        assert!(grid.iter().all(|c| *c == c64::default()));

        grid[(5, 6)] = c64::new(1.0, -1.0);
        let before = grid.clone();
        dispatch.accumulate(&table, &[], grid.view_mut()).unwrap();
        assert_eq!(grid, before);
    }
}

#[test]
fn test_bad_samples_leave_grid_unchanged() {
    let (table, mut samples) = setup(100, 1, 11);
    samples[60].iu = GRID_SIZE as i64;

    for kind in DispatchKind::iter() {
        let dispatch = new_grid_dispatch(kind, NonZeroUsize::new(2)).unwrap();
        let mut grid = new_grid(GRID_SIZE);
        let result = dispatch.accumulate(&table, &samples, grid.view_mut());
        assert!(matches!(
            result,
            Err(GridError::FootprintOutOfBounds { index: 60, .. })
        ));
        assert!(grid.iter().all(|c| *c == c64::default()));
    }

    let (table, mut samples) = setup(10, 1, 11);
    samples[3].c_offset = table.len() as i64;
    let result = CpuParallel::new().accumulate(&table, &samples, new_grid(GRID_SIZE).view_mut());
    assert!(matches!(
        result,
        Err(GridError::OffsetOutOfRange { index: 3, .. })
    ));
}

#[test]
fn test_non_square_grid_is_rejected() {
    let (table, samples) = setup(10, 1, 1);
    let mut grid = Array2::zeros((GRID_SIZE, GRID_SIZE + 1));
    for kind in DispatchKind::iter() {
        let dispatch = new_grid_dispatch(kind, None).unwrap();
        assert!(matches!(
            dispatch.accumulate(&table, &samples, grid.view_mut()),
            Err(GridError::NotSquare { .. })
        ));
    }
}

#[test]
fn test_dispatch_kind_strings() {
    assert_eq!(DispatchKind::from_str("cpu").unwrap(), DispatchKind::Cpu);
    assert_eq!(
        DispatchKind::from_str("cpu-parallel").unwrap(),
        DispatchKind::CpuParallel
    );
    assert!(DispatchKind::from_str("gpu").is_err());
    assert_eq!(DispatchKind::CpuParallel.to_string(), "cpu-parallel");
}

#[test]
fn test_descriptions() {
    assert!(CpuSequential.description().contains("sequential"));
    let dispatch = CpuParallel::with_threads(NonZeroUsize::new(3).unwrap()).unwrap();
    assert!(dispatch.description().contains("3 threads"));
}
