use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use findex::{process_queries, DocId, DocumentStatus, ExecutionMode, SearchEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WORD_POOL: [&str; 24] = [
    "moon", "river", "stone", "bird", "cloud", "fox", "ember", "reed", "wolf", "pine", "lark",
    "frost", "dune", "ash", "vale", "briar", "heron", "moss", "crag", "fern", "gale", "tarn",
    "wren", "sedge",
];

fn build_engine(doc_count: usize, words_per_doc: usize) -> SearchEngine {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = SearchEngine::from_text("the of and in").unwrap();
    for id in 0..doc_count {
        let text: String = (0..words_per_doc)
            .map(|_| WORD_POOL[rng.gen_range(0..WORD_POOL.len())])
            .collect::<Vec<_>>()
            .join(" ");
        engine
            .add_document(
                DocId(id as i64),
                &text,
                DocumentStatus::Actual,
                &[rng.gen_range(-5..10)],
            )
            .unwrap();
    }
    engine
}

fn bench_find_top_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_top_documents");
    for doc_count in [1_000, 10_000] {
        let engine = build_engine(doc_count, 40);
        group.bench_with_input(
            BenchmarkId::new("sequential", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .find_top_documents(black_box("moon river fox ember -wolf"))
                        .unwrap()
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .find_top_documents_with(
                            ExecutionMode::Parallel,
                            black_box("moon river fox ember -wolf"),
                            |_, status, _| status == DocumentStatus::Actual,
                        )
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_process_queries(c: &mut Criterion) {
    let engine = build_engine(5_000, 40);
    let mut rng = StdRng::seed_from_u64(7);
    let queries: Vec<String> = (0..64)
        .map(|_| {
            (0..3)
                .map(|_| WORD_POOL[rng.gen_range(0..WORD_POOL.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    c.bench_function("process_queries_64", |b| {
        b.iter(|| process_queries(black_box(&engine), black_box(&queries)).unwrap());
    });
}

fn bench_remove_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        group.bench_function(
            BenchmarkId::from_parameter(format!("{mode:?}")),
            |b| {
                b.iter_batched(
                    || build_engine(1_000, 40),
                    |mut engine| {
                        for id in 0..100 {
                            engine.remove_document_with(mode, DocId(id));
                        }
                        engine
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_find_top_documents,
    bench_process_queries,
    bench_remove_document
);
criterion_main!(benches);
