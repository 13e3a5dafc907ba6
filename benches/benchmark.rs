//! Benchmarks for the storyboard editor.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storyboard_editor::{GeneratedImage, MoveDirection, RecordingNotifier, StoryboardEditor};

fn editor_with(n: usize) -> StoryboardEditor<RecordingNotifier> {
    let mut editor = StoryboardEditor::new(RecordingNotifier::new());
    for i in 0..n {
        editor.set_description(format!("Scene {} - a wide shot of the valley at dusk", i));
        let pending = editor.begin_generation().unwrap();
        editor
            .complete_generation(
                pending,
                Ok(GeneratedImage {
                    image_url: format!("https://cdn.example/{}.png", i),
                }),
            )
            .unwrap();
    }
    editor.notifier().take();
    editor
}

fn bench_generation_roundtrip(c: &mut Criterion) {
    c.bench_function("begin_complete_generation", |b| {
        let mut editor = StoryboardEditor::new(RecordingNotifier::new());
        let mut i = 0u64;
        b.iter(|| {
            editor.set_description("A knight at dawn");
            let pending = editor.begin_generation().unwrap();
            editor
                .complete_generation(
                    pending,
                    Ok(GeneratedImage {
                        image_url: format!("https://cdn.example/{}.png", i),
                    }),
                )
                .unwrap();
            editor.notifier().take();
            i += 1;
        })
    });
}

fn bench_move_scene(c: &mut Criterion) {
    c.bench_function("move_scene_up_down", |b| {
        let mut editor = editor_with(100);
        b.iter(|| {
            editor.move_scene(black_box(50), MoveDirection::Up);
            editor.move_scene(black_box(49), MoveDirection::Down);
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    for size in [10, 100, 1000] {
        let editor = editor_with(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let artifact = editor.export();
                editor.notifier().take();
                black_box(artifact)
            })
        });
    }
    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let editor = editor_with(100);
    c.bench_function("preview_100", |b| b.iter(|| black_box(editor.preview())));
}

criterion_group!(
    benches,
    bench_generation_roundtrip,
    bench_move_scene,
    bench_export,
    bench_preview
);
criterion_main!(benches);
