use criterion::{criterion_group, criterion_main, Criterion};
use cyber_fitness_tracker::models::{DayKey, DayRoutine, Exercise, Intensity, WeeklyRoutine};
use cyber_fitness_tracker::services::calories::{compute_calories, EXERCISE_CATALOG};
use cyber_fitness_tracker::services::stats::summarize;
use std::collections::BTreeMap;
use std::hint::black_box;

/// A week with every day logged, `per_day` entries each, cycling the catalog.
fn full_week(per_day: usize) -> WeeklyRoutine {
    let mut routines = BTreeMap::new();
    for (d, day) in DayKey::ALL.into_iter().enumerate() {
        let exercises: Vec<Exercise> = (0..per_day)
            .map(|i| {
                let entry = &EXERCISE_CATALOG[(d + i) % EXERCISE_CATALOG.len()];
                let intensity = Intensity::ALL[i % Intensity::ALL.len()];
                let duration = 15.0 + (i % 6) as f64 * 10.0;
                Exercise {
                    id: format!("{}-{}", day, i),
                    name: entry.name.to_string(),
                    met: entry.met,
                    duration,
                    weight: 72.5,
                    intensity,
                    calories: compute_calories(72.5, entry.met, duration, intensity),
                }
            })
            .collect();
        let total_calories = exercises.iter().map(|e| e.calories).sum();
        routines.insert(
            day,
            DayRoutine {
                id: format!("bench-1704585600000-{}", day),
                date: "2024-01-08T10:00:00.000Z".to_string(),
                exercises,
                total_calories,
            },
        );
    }
    WeeklyRoutine {
        id: "bench-1704585600000".to_string(),
        user_id: "bench".to_string(),
        start_date: "2024-01-07T08:00:00.000Z".to_string(),
        routines,
    }
}

fn benchmark_weekly_summary(c: &mut Criterion) {
    let typical = full_week(4);
    let heavy = full_week(50);

    let mut group = c.benchmark_group("weekly_summary");

    group.bench_function("typical_week", |b| {
        b.iter(|| summarize(black_box(Some(&typical)), black_box(2500.0)))
    });

    group.bench_function("max_entries_week", |b| {
        b.iter(|| summarize(black_box(Some(&heavy)), black_box(2500.0)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_weekly_summary);
criterion_main!(benches);
