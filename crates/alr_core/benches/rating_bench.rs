use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

use alr_core::{GameBalanceConfig, IntegrityCalculator, RankCalculator, UserProgress};

fn sample_progress() -> UserProgress {
    let core_values = ["Courage", "Wisdom", "Compassion", "Discipline", "Honesty"];
    let stats = ["Strength", "Focus", "Charisma", "Vitality", "Insight", "Resolve"];

    let mut progress = UserProgress::default();
    progress.path_level = 42;
    progress.shadow_path_level = 7;
    for (i, name) in core_values.iter().enumerate() {
        progress.core_value_light_xp.insert(name.to_string(), 4_000 * (i as u64 + 1));
        progress.core_value_shadow_xp.insert(name.to_string(), 300 * (i as u64 + 1));
    }
    progress.light_stat_values = stats
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), 25.0 * (i as f64 + 1.0)))
        .collect();
    progress.shadow_stat_values =
        HashMap::from([("Strength".to_string(), 12.0), ("Focus".to_string(), 3.0)]);
    progress
}

fn bench_integrity_rating(c: &mut Criterion) {
    let config = GameBalanceConfig::default();
    let progress = sample_progress();

    c.bench_function("integrity_rating", |b| {
        b.iter(|| IntegrityCalculator::integrity_rating(black_box(&progress), black_box(&config)))
    });
}

fn bench_rank_from_xp(c: &mut Criterion) {
    let config = GameBalanceConfig::default();
    let thresholds = &config.personal_value_thresholds;
    // One XP value per band, plus a deep Enlightenment total
    let samples: Vec<u64> =
        vec![0, 60, 200, 400, 600, 900, 1_200, 1_600, 2_000, 2_500, 2_800, 500_000];

    c.bench_function("rank_from_xp", |b| {
        b.iter(|| {
            for xp in &samples {
                black_box(RankCalculator::rank_from_xp(black_box(*xp), thresholds));
            }
        })
    });
}

criterion_group!(benches, bench_integrity_rating, bench_rank_from_xp);
criterion_main!(benches);
