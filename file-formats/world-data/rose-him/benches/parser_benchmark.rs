//! Benchmarks for the HIM parser

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;

use rose_him::{Heightmap, HimParser, QuadrantLayout, compute_bounds};

fn create_heightmap() -> Heightmap {
    let mut map = Heightmap::default();
    for y in 0..65 {
        for x in 0..65 {
            map.set_height(x, y, ((x * 7 + y * 13) % 100) as f32 * 0.25);
        }
    }
    map
}

fn bench_parse(c: &mut Criterion) {
    let mut data = Vec::new();
    HimParser::new().write(&mut data, &create_heightmap()).unwrap();

    c.bench_function("parse_him", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(&data);
            HimParser::new().parse(&mut cursor).unwrap()
        })
    });
}

fn bench_write(c: &mut Criterion) {
    let map = create_heightmap();
    let parser = HimParser::new().with_quadrant_layout(QuadrantLayout::quad_tree());

    c.bench_function("write_him", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(20 * 1024);
            parser.write(&mut buffer, black_box(&map)).unwrap();
            buffer
        })
    });
}

fn bench_bounds(c: &mut Criterion) {
    let map = create_heightmap();
    let layout = QuadrantLayout::quad_tree();

    c.bench_function("compute_bounds", |b| {
        b.iter(|| compute_bounds(black_box(&map), &layout).unwrap())
    });
}

criterion_group!(benches, bench_parse, bench_write, bench_bounds);
criterion_main!(benches);
