//! Ad-hoc timing demos comparing `TierVec` against `std::vec::Vec`.
//!
//! Takes a single selector argument naming the routine to run. Numbers here
//! are one-shot wall-clock readings; use the criterion benches for anything
//! statistically meaningful.

use std::env;
use std::hint::black_box;
use std::process::ExitCode;
use std::time::Instant;

use tiervec::TierVec;

const USAGE: &str = "usage: demo <single-push|bulk|nested>";

/// Accumulates per-test timings so the summary can be printed at the end.
#[derive(Default)]
struct Stats {
    results: Vec<(String, u128, u128)>,
}

impl Stats {
    fn record(&mut self, name: &str, tier_ns: u128, vec_ns: u128) {
        println!("{name:<28}| TierVec: {tier_ns:>9}ns | Vec: {vec_ns:>9}ns");
        self.results.push((name.to_string(), tier_ns, vec_ns));
    }

    fn report(&self) {
        if self.results.is_empty() {
            return;
        }
        let wins = self.results.iter().filter(|r| r.1 < r.2).count();
        let tier_total: u128 = self.results.iter().map(|r| r.1).sum();
        let vec_total: u128 = self.results.iter().map(|r| r.2).sum();
        println!("{}", "-".repeat(60));
        println!(
            "TierVec wins {wins}/{} tests | totals: TierVec {tier_total}ns, Vec {vec_total}ns",
            self.results.len()
        );
    }
}

fn time<R>(f: impl FnOnce() -> R) -> u128 {
    let start = Instant::now();
    black_box(f());
    start.elapsed().as_nanos()
}

fn single_push(stats: &mut Stats) {
    let tier_ns = time(|| {
        let mut tv = TierVec::new();
        tv.push(String::from("HEY"));
        tv
    });
    let vec_ns = time(|| {
        let mut v = Vec::new();
        v.push(String::from("HEY"));
        v
    });
    stats.record("String - one push", tier_ns, vec_ns);
}

fn bulk(stats: &mut Stats) {
    for count in [10usize, 100, 1000, 10_000] {
        let tier_ns = time(|| {
            let mut tv = TierVec::new();
            for i in 0..count {
                tv.push(i as u32);
            }
            tv
        });
        let vec_ns = time(|| {
            let mut v = Vec::new();
            for i in 0..count {
                v.push(i as u32);
            }
            v
        });
        stats.record(&format!("{count} u32 pushes"), tier_ns, vec_ns);
    }

    for count in [10usize, 100, 1000] {
        let tier_ns = time(|| {
            let mut tv = TierVec::new();
            for i in 0..count {
                tv.push(format!("String_{i}_test_data"));
            }
            tv
        });
        let vec_ns = time(|| {
            let mut v = Vec::new();
            for i in 0..count {
                v.push(format!("String_{i}_test_data"));
            }
            v
        });
        stats.record(&format!("{count} String pushes"), tier_ns, vec_ns);
    }
}

fn nested(stats: &mut Stats) {
    let mut tier2d = TierVec::new();
    let mut vec2d = Vec::new();
    for _ in 0..100 {
        let mut row = TierVec::new();
        row.extend(0..1000u32);
        tier2d.push(row);
        vec2d.push((0..1000u32).collect::<Vec<_>>());
    }

    let tier_ns = time(|| {
        let mut sum = 0u64;
        for row in tier2d.iter() {
            for v in row.iter() {
                sum += u64::from(*v);
            }
        }
        sum
    });
    let vec_ns = time(|| {
        let mut sum = 0u64;
        for row in vec2d.iter() {
            for v in row.iter() {
                sum += u64::from(*v);
            }
        }
        sum
    });
    stats.record("sum 100x1000 nested", tier_ns, vec_ns);
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(selector) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let mut stats = Stats::default();
    match selector.as_str() {
        "single-push" => single_push(&mut stats),
        "bulk" => bulk(&mut stats),
        "nested" => nested(&mut stats),
        other => {
            eprintln!("unknown demo: {other}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    }
    stats.report();
    ExitCode::SUCCESS
}
