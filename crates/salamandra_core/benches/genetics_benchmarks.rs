use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use salamandra_core::config::{AppConfig, GeneticsConfig};
use salamandra_core::genetics::{calculate_camouflage, generate_initial_traits, inherit_traits};
use salamandra_core::lifecycle::{create_initial_game_state, start_new_cycle};
use salamandra_data::{EnvironmentType, StatKey};

/// Benchmark a single breeding with two favored stats.
fn bench_inherit_traits(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let config = GeneticsConfig::default();
    let p1 = generate_initial_traits(&config, &mut rng);
    let p2 = generate_initial_traits(&config, &mut rng);
    let favored = [StatKey::Speed, StatKey::Perception];

    c.bench_function("inherit_traits", |b| {
        b.iter(|| {
            let child = inherit_traits(black_box(&p1), black_box(&p2), &favored, &config, &mut rng);
            black_box(child)
        })
    });
}

fn bench_camouflage(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let traits = generate_initial_traits(&GeneticsConfig::default(), &mut rng);

    c.bench_function("calculate_camouflage", |b| {
        b.iter(|| {
            let score = calculate_camouflage(black_box(&traits), EnvironmentType::Plants);
            black_box(score)
        })
    });
}

/// Benchmark a full cycle transition, including pond regeneration.
fn bench_start_new_cycle(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let config = AppConfig::default();
    let mut state = create_initial_game_state(&config, &mut rng, 0);
    state.pond.cycle = 2;
    let partner = generate_initial_traits(&config.genetics, &mut rng);

    c.bench_function("start_new_cycle", |b| {
        b.iter(|| {
            let next = start_new_cycle(black_box(&state), &partner, &[], &config, &mut rng, 0);
            black_box(next)
        })
    });
}

criterion_group!(
    benches,
    bench_inherit_traits,
    bench_camouflage,
    bench_start_new_cycle
);
criterion_main!(benches);
