// MIT License
//
// Copyright (c) 2024 Erik Holum
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use codspeed_criterion_compat::{criterion_group, criterion_main, Criterion};
use rustroadmap::{Obstacle, PositionConfigurationSpace, Prm, PrmConfig, SearchStrategy, Vec2};

fn space() -> PositionConfigurationSpace {
    PositionConfigurationSpace::new(vec![
        Obstacle::circle(Vec2::new(0.0, 0.0), 30.0),
        Obstacle::circle(Vec2::new(-50.0, -40.0), 15.0),
    ])
}

fn grow(seed: u64, space: &PositionConfigurationSpace) -> Prm {
    let mut prm = Prm::seeded(seed);
    let result = prm.grow_with(&PrmConfig::default(), space);
    assert!(result.is_ok(), "Expected Ok result, got Err");
    prm
}

fn bench_grow(c: &mut Criterion) {
    let space = space();
    c.bench_function("prm_grow", |b| b.iter(|| grow(1, &space)));
}

fn bench_search(c: &mut Criterion) {
    let space = space();
    let prm = grow(1, &space);
    let (start, goal) = (Vec2::new(-90.0, 90.0), Vec2::new(90.0, -90.0));

    for strategy in [
        SearchStrategy::DepthFirst,
        SearchStrategy::BreadthFirst,
        SearchStrategy::UniformCost,
        SearchStrategy::AStar,
        SearchStrategy::WeightedAStar(1.5),
    ] {
        c.bench_function(strategy.name(), |b| {
            b.iter(|| {
                let path = prm.search(strategy, start, goal, 8.0, 12.0, &space);
                assert!(!path.is_empty(), "Path should not be empty");
            });
        });
    }
}

criterion_group!(benches, bench_grow, bench_search);
criterion_main!(benches);
