use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use lantern::frame::FrameQueue;
use lantern::locale::{normalize_locale, StaticLanguages, SupportedLocales};
use lantern::model::Role;
use lantern::storage::MemoryStorage;
use lantern::{AppStore, Store, Theme};

fn session_store() -> (AppStore, Arc<FrameQueue>) {
    let frames = Arc::new(FrameQueue::new());
    let store = AppStore::builder(Arc::new(MemoryStorage::new()), frames.clone())
        .languages(StaticLanguages::default())
        .build();
    (store, frames)
}

fn normalize_locale_benchmark(c: &mut Criterion) {
    let locales = SupportedLocales::default();

    c.bench_function("normalize_locale", |b| {
        b.iter(|| normalize_locale(black_box(" zh-Hant-TW "), &locales));
    });
}

fn theme_transition_benchmark(c: &mut Criterion) {
    let (store, frames) = session_store();

    c.bench_function("theme_transition", |b| {
        let mut theme = Theme::Dark;
        b.iter(|| {
            theme = theme.toggled();
            store.set_theme(black_box(theme));
            frames.run_until_idle(4);
        });
    });
}

fn role_list_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_role_list");

    for role_count in [10, 100, 1000].iter() {
        let (store, _frames) = session_store();
        let roles: Vec<Role> = (0..*role_count)
            .map(|i| Role::new(format!("role-{i}"), format!("Role {i}")))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(role_count), role_count, |b, _| {
            b.iter(|| store.set_role_list(black_box(roles.clone())));
        });
    }
    group.finish();
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    #[derive(Clone)]
    struct State {
        value: usize,
    }

    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(State { value: 0 });

        for _ in 0..*subscriber_count {
            store
                .subscribe(|_| {
                    // Empty subscriber
                })
                .detach();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.update(|state| state.value = black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    normalize_locale_benchmark,
    theme_transition_benchmark,
    role_list_benchmark,
    store_subscribe_benchmark,
);
criterion_main!(benches);
