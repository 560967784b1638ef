use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use yazim::{SpellChecker, WordlistEntry};

const SYLLABLES: &[&str] = &[
    "ka", "le", "mi", "ço", "ğu", "şe", "yı", "ba", "dü", "ne", "ta", "rı", "sö", "gü", "ma",
    "la", "ci", "öz", "at", "ev",
];

fn wordlist(size: usize) -> Vec<WordlistEntry> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|i| {
            let syllables = 2 + i % 3;
            let word: String = (0..syllables)
                .filter_map(|_| SYLLABLES.choose(&mut rng).copied())
                .collect();
            WordlistEntry::with_frequency(word, 1 + (i % 50) as u32)
        })
        .collect()
}

fn loaded_checker(size: usize) -> SpellChecker {
    let mut checker = SpellChecker::default();
    checker.load(wordlist(size));
    checker
}

fn bench_load(c: &mut Criterion) {
    let entries = wordlist(20_000);
    c.bench_function("load_20k", |b| {
        b.iter(|| {
            let mut checker = SpellChecker::default();
            checker.load(black_box(entries.clone()))
        })
    });
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    for size in [1_000, 20_000] {
        let checker = loaded_checker(size);
        for query in ["kalemi", "dunyaa", "sogüka"] {
            group.bench_with_input(
                BenchmarkId::new(query, size),
                &query,
                |b, query| b.iter(|| checker.suggest(black_box(query), 5)),
            );
        }
    }
    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let checker = loaded_checker(20_000);
    let text = "Kalemi masaya bıraktı, dünyanın en güzel şehri İstanbul'dur. ".repeat(20);
    c.bench_function("check_paragraph", |b| b.iter(|| checker.check(black_box(&text))));
}

criterion_group!(benches, bench_load, bench_suggest, bench_check);
criterion_main!(benches);
