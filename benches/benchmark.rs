use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tiervec::TierVec;

fn push_benchmark_tiervec(c: &mut Criterion) {
    c.bench_function("tiervec push", |c| {
        c.iter(|| {
            let mut tv = TierVec::<u32>::new();
            for i in 0..(1 << 23) {
                tv.push(i);
            }
        });
    });
}

fn push_benchmark_vec(c: &mut Criterion) {
    c.bench_function("vec push", |c| {
        c.iter(|| {
            let mut vec = Vec::<u32>::new();
            for i in 0..(1 << 23) {
                vec.push(i);
            }
        });
    });
}

fn tiervec_iter_bench(c: &mut Criterion) {
    let mut tv = TierVec::<u32>::new();
    for i in 0..(1 << 23) {
        tv.push(i);
    }

    c.bench_function("tiervec iter", |c| {
        c.iter(|| {
            tv.iter().for_each(|x| {
                black_box(x);
            });
        });
    });
}

// exercises the conservative 1.5x tier for large elements
fn push_benchmark_large_elem(c: &mut Criterion) {
    c.bench_function("tiervec push [u8; 256]", |c| {
        c.iter(|| {
            let mut tv = TierVec::<[u8; 256]>::new();
            for i in 0..(1 << 14) {
                tv.push([i as u8; 256]);
            }
        });
    });
}

criterion_group!(
    benches,
    push_benchmark_tiervec,
    push_benchmark_vec,
    tiervec_iter_bench,
    push_benchmark_large_elem
);
criterion_main!(benches);
