use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use linkedhashmap::map::OrderedMap;
use linkedhashmap::policy::{FixedCapacity, FnPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_push_get(c: &mut Criterion) {
    c.bench_function("ordered_map_push_get", |b| {
        b.iter_batched(
            || {
                let mut map = OrderedMap::with_reserved(1024, 1024, FixedCapacity);
                for i in 0..1024u64 {
                    map.push(i, i);
                }
                map
            },
            |mut map| {
                for i in 0..1024u64 {
                    map.push(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(map.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_update_churn(c: &mut Criterion) {
    c.bench_function("ordered_map_update_churn", |b| {
        b.iter_batched(
            || {
                let mut map = OrderedMap::new(0, FixedCapacity);
                for i in 0..1024u64 {
                    map.push(i, i);
                }
                let mut rng = StdRng::seed_from_u64(42);
                let keys: Vec<u64> = (0..4096).map(|_| rng.random_range(0..1024)).collect();
                (map, keys)
            },
            |(mut map, keys)| {
                for k in keys {
                    map.push(std::hint::black_box(k), k);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_sweep(c: &mut Criterion) {
    c.bench_function("ordered_map_resize_sweep", |b| {
        b.iter_batched(
            || {
                let mut map = OrderedMap::new(0, FixedCapacity);
                for i in 0..4096u64 {
                    map.push(i, i);
                }
                map
            },
            |mut map| {
                map.resize(std::hint::black_box(16));
                map
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_dynamic_capacity(c: &mut Criterion) {
    c.bench_function("ordered_map_dynamic_capacity", |b| {
        b.iter(|| {
            let policy = FnPolicy::new(
                |_k: u64, v: u64| {
                    std::hint::black_box(v);
                },
                |cap, len, _head, _tail| {
                    if len > 256 {
                        cap.saturating_sub(1).max(128)
                    } else {
                        cap + 4
                    }
                },
            );
            let mut map = OrderedMap::new(64, policy);
            for i in 0..4096u64 {
                map.push(i % 512, i);
            }
            std::hint::black_box(map.len())
        })
    });
}

criterion_group!(
    benches,
    bench_push_get,
    bench_update_churn,
    bench_eviction_sweep,
    bench_dynamic_capacity
);
criterion_main!(benches);
