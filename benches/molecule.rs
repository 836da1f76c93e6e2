//! Benchmarks for molecule sampling and population spawn.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use protocell::{Molecule, MoleculeSampler, ParticleKind, ParticlePopulation, SpawnConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");

    group.bench_function("already_valid", |b| {
        let mol = Molecule::from_counts(0, 0, 0, 0, 0, 2, 1);
        b.iter(|| black_box(mol.repair()))
    });

    group.bench_function("sheds_halogens", |b| {
        let mol = Molecule::from_counts(3, 3, 0, 0, 0, 0, 1);
        b.iter(|| black_box(mol.repair()))
    });

    group.bench_function("unrepairable", |b| {
        let mol = Molecule::from_counts(0, 15, 0, 0, 0, 0, 0);
        b.iter(|| black_box(mol.repair()))
    });

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    group.bench_function("sample_valid", |b| {
        let mut sampler = MoleculeSampler::new();
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| black_box(sampler.sample_valid(&mut rng)))
    });

    group.bench_function("sample_child", |b| {
        let mut sampler = MoleculeSampler::new();
        let mut rng = StdRng::seed_from_u64(7);
        let parent = Molecule::from_counts(0, 0, 0, 1, 0, 4, 0);
        b.iter(|| black_box(sampler.sample_child(parent, &mut rng)))
    });

    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");
    let bounds = Vec2::new(16.0, 9.0);

    for count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("random", count), &count, |b, &count| {
            let mut particles = ParticlePopulation::with_capacity(count);
            let config = SpawnConfig {
                randomize_molecules: true,
                seed: 1,
                ..Default::default()
            };
            b.iter(|| particles.spawn(&config, bounds))
        });
    }

    group.bench_function("molecule_bearing_only", |b| {
        let mut particles = ParticlePopulation::with_capacity(1_000);
        let config = SpawnConfig {
            uniform_kinds: vec![ParticleKind::Synthase],
            seed: 1,
            ..Default::default()
        };
        b.iter(|| particles.spawn(&config, bounds))
    });

    group.finish();
}

criterion_group!(benches, bench_repair, bench_sampling, bench_spawn);
criterion_main!(benches);
