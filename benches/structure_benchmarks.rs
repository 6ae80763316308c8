//! Benchmarks for the structuring pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use folio_oxide::layout::{classify, segment};
use folio_oxide::model::{ImagePlan, ImageSlot, PageImages, PageText};
use folio_oxide::structure::build_structure;
use folio_oxide::StructurePipeline;

/// A synthetic book: one chapter every ten pages, bullets, callouts and
/// paragraphs split across blank lines.
fn sample_pages(count: u32) -> Vec<PageText> {
    (1..=count)
        .map(|n| {
            let text = if n % 10 == 1 {
                format!(
                    "Chapter {}: Practical Endgame Technique\n\nWhen the queens come off, the king walks forward.\n\n\
                     • Activate the king\n\n• Create a passed pawn",
                    n / 10 + 1
                )
            } else {
                "Rook Behind The Passed Pawn:\n\nThe rook belongs behind the pawn, whether\n\nit is yours or \
                 the opponent's.\n\nMistake 1: passive rooks\n\n- they lose tempo\n\nTip: cut the king off first."
                    .to_string()
            };
            PageText::new(n, text)
        })
        .collect()
}

fn sample_images(count: u32) -> ImagePlan {
    ImagePlan {
        pages: (1..=count)
            .step_by(3)
            .map(|n| PageImages {
                page_number: n,
                images: vec![ImageSlot::planned(format!("slot_{}", n), n, "left-top")],
            })
            .collect(),
    }
}

// ============================================================================
// Stage Benchmarks
// ============================================================================

fn bench_segment(c: &mut Criterion) {
    let pages = sample_pages(10);
    c.bench_function("segment_page", |b| {
        b.iter(|| segment(black_box(&pages[1].text)));
    });
}

fn bench_build_structure(c: &mut Criterion) {
    let pages = sample_pages(200);
    c.bench_function("build_structure_200_pages", |b| {
        b.iter(|| build_structure(black_box(&pages), "Endgame Manual"));
    });
}

fn bench_classify(c: &mut Criterion) {
    let lines: Vec<String> = (0..500)
        .map(|i| match i % 4 {
            0 => format!("Tip {}: keep the king active", i),
            1 => "- and centralise it early".to_string(),
            2 => "• Push passed pawns".to_string(),
            _ => "The rook belongs behind the pawn.".to_string(),
        })
        .collect();
    c.bench_function("classify_500_lines", |b| {
        b.iter(|| classify(black_box(&lines)));
    });
}

// ============================================================================
// Full Pipeline Benchmarks
// ============================================================================

fn bench_pipeline_run(c: &mut Criterion) {
    let pages = sample_pages(200);
    let images = sample_images(200);
    let pipeline = StructurePipeline::new();
    c.bench_function("pipeline_run_200_pages", |b| {
        b.iter(|| pipeline.run(black_box(&pages), "Endgame Manual", &images).unwrap());
    });
}

criterion_group!(stages, bench_segment, bench_build_structure, bench_classify);
criterion_group!(pipeline, bench_pipeline_run);
criterion_main!(stages, pipeline);
