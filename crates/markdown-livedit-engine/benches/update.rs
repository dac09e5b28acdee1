use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use markdown_livedit_engine::{
    Attribute, BoundaryPoint, ContentUpdater, Dom, DocumentSelection, Range, RenderOptions,
    SelectionService, capture_offset, render_markdown,
};
mod common;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    for size in [1, 10, 100] {
        let content = common::generate_markdown_content(size);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("render_markdown", size),
            &content,
            |b, content| {
                let options = RenderOptions::default();
                b.iter(|| {
                    let html = render_markdown(std::hint::black_box(content), &options);
                    std::hint::black_box(html);
                });
            },
        );
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let html = render_markdown(&content, &RenderOptions::default());
    let middle = content.chars().count() / 2;

    group.bench_function("update_with_caret_in_middle", |b| {
        let mut dom = Dom::new();
        let root = dom.root();
        let editor = dom.create_element_with_attrs("article", vec![Attribute::new("id", "bench")]);
        dom.append_child(root, editor);
        dom.set_inner_html(editor, &content);
        let typed = dom.first_child(editor);

        let mut updater: ContentUpdater = ContentUpdater::default();
        if let Some(typed) = typed {
            updater
                .selection_mut()
                .set_single_range(Range::collapsed_at(BoundaryPoint::new(typed, middle)));
        }

        b.iter(|| {
            let report = updater
                .update(&mut dom, "bench", std::hint::black_box(&html))
                .unwrap();
            std::hint::black_box(report);
        });
    });

    group.finish();
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");
    group.sample_size(20);

    for paragraphs in [1_000, 4_000, 16_000] {
        let markup: String = (0..paragraphs).map(|i| format!("<p>paragraph {i}</p>")).collect();
        let mut dom = Dom::new();
        let root = dom.root();
        let editor = dom.create_element("article");
        dom.append_child(root, editor);
        dom.set_inner_html(editor, &markup);

        let middle = dom.children(editor)[paragraphs / 2];
        let Some(text) = dom.first_child(middle) else {
            continue;
        };
        let selection = DocumentSelection::with_range(Range::collapsed_at(BoundaryPoint::new(text, 3)));

        group.bench_with_input(
            BenchmarkId::new("middle_caret", paragraphs),
            &selection,
            |b, selection| {
                b.iter(|| {
                    let offset = capture_offset(&dom, editor, std::hint::black_box(selection));
                    std::hint::black_box(offset);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_update, bench_capture);
criterion_main!(benches);
