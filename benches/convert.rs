use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::*;

use chromasaver::{
    color::{is_light, rgb_to_hsl, BaseColor},
    models::Color,
};

fn random_colors(count: usize) -> Vec<Color> {
    let mut rng = rand::rng();

    (0..count)
        .map(|_| {
            Color::new(
                rng.random::<u8>(),
                rng.random::<u8>(),
                rng.random::<u8>(),
            )
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let colors = random_colors(1024);

    c.bench_function(&format!("rgb_to_hsl {} colors", colors.len()), |b| {
        b.iter(|| {
            colors
                .iter()
                .map(|color| rgb_to_hsl(*color))
                .fold(0u32, |acc, hsl| acc.wrapping_add(hsl.h))
        })
    });

    c.bench_function(&format!("classify {} colors", colors.len()), |b| {
        b.iter(|| {
            colors
                .iter()
                .filter(|color| BaseColor::classify(rgb_to_hsl(**color)) != BaseColor::Gray)
                .count()
        })
    });

    c.bench_function(&format!("is_light {} colors", colors.len()), |b| {
        b.iter(|| colors.iter().filter(|color| is_light(**color)).count())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
