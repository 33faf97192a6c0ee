// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::num::NonZeroUsize;

use criterion::*;

use wprojection::{
    channel_freqs, gridding::OffsetMapper, map_offsets, new_grid, ConvolutionTable, CpuParallel,
    CpuSequential, GridDispatch, Lcg, Visibilities,
};

const GRID_SIZE: usize = 1024;
const CELL_SIZE: f64 = 5.0;
const BASELINE: f64 = 500.0;
const W_SIZE: usize = 17;
const NUM_SAMPLES: usize = 10_000;

fn convolution_table(c: &mut Criterion) {
    let freq = channel_freqs(NonZeroUsize::new(1).unwrap())[0];
    c.bench_function("convolution table", |b| {
        b.iter(|| ConvolutionTable::new(freq, CELL_SIZE, BASELINE, W_SIZE).unwrap())
    });
}

fn gridding(c: &mut Criterion) {
    let num_chans = NonZeroUsize::new(4).unwrap();
    let freqs = channel_freqs(num_chans);
    let table = ConvolutionTable::new(freqs[0], CELL_SIZE, BASELINE, W_SIZE).unwrap();
    let mapper = OffsetMapper::new(&table, CELL_SIZE, GRID_SIZE);
    let draws = Lcg::default().sample_draws(NUM_SAMPLES);
    let vis = Visibilities::from_draws(&draws, BASELINE, num_chans);

    c.bench_function("map offsets", |b| {
        b.iter(|| map_offsets(&vis, &freqs, &mapper).unwrap())
    });

    let samples = map_offsets(&vis, &freqs, &mapper).unwrap();
    let mut group = c.benchmark_group("accumulate");
    group.throughput(Throughput::Elements(
        (samples.len() * table.footprint_len()) as u64,
    ));
    group.sample_size(10);
    let dispatches: [(&str, Box<dyn GridDispatch>); 2] = [
        ("sequential", Box::new(CpuSequential)),
        ("parallel", Box::new(CpuParallel::new())),
    ];
    for (name, dispatch) in dispatches {
        group.bench_function(name, |b| {
            let mut grid = new_grid(GRID_SIZE);
            b.iter(|| dispatch.accumulate(&table, &samples, grid.view_mut()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, convolution_table, gridding);
criterion_main!(benches);
