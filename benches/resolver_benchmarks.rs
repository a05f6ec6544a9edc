//! Performance benchmarks for binding-model resolution.
//!
//! - Polymorphism: dispatch ordering over a deep synthetic hierarchy
//! - Classes: whole-class resolution for wide, deep and polymorphic classes
//! - Driver: `resolve_all` over a generated descriptor set
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to collect per-pass timings:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use xmlbind::prelude::*;
use xmlbind_resolver::dispatch_order;

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print the total time recorded per top-level scope.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        println!("Profiler not initialized");
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut scope_timings: HashMap<String, i64> = HashMap::new();
    let mut frame_count = 0i64;
    for frame in view.recent_frames() {
        frame_count += 1;
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread_info, stream_info) in unpacked.thread_streams.iter() {
            let Ok(scopes) = Reader::from_start(&stream_info.stream).read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *scope_timings.entry(details.name().to_string()).or_insert(0) +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    println!("\n=== Profiling Summary ({} frames) ===", frame_count);
    let mut entries: Vec<_> = scope_timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, ns) in entries {
        let avg = if frame_count > 0 { ns / frame_count } else { ns };
        println!(
            "  {:40} {:>10.2?} avg",
            name,
            std::time::Duration::from_nanos(avg as u64)
        );
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

// =============================================================================
// Synthetic sources
// =============================================================================

/// A single inheritance chain `t.C0 <- t.C1 <- ... <- t.C{depth-1}`.
fn chain_source(depth: usize) -> DescriptorSet {
    let classes = (0..depth).map(|i| {
        let class = ClassDescriptor::new(format!("t.C{i}").as_str())
            .with_xml(XmlDirective::default().without_inheritance());
        if i == 0 {
            class
        } else {
            class.with_superclass(format!("t.C{}", i - 1).as_str())
        }
    });
    DescriptorSet::from_classes(classes).unwrap()
}

/// One class with `width` attributes and `width` property elements.
fn wide_source(width: usize) -> DescriptorSet {
    let mut class = ClassDescriptor::new("w.Wide").bindable();
    for i in 0..width {
        class = class
            .with_field(
                FieldDescriptor::new(format!("a{i}"), TypeRef::String)
                    .with_directive(Directive::attribute()),
            )
            .with_field(
                FieldDescriptor::new(format!("e{i}"), TypeRef::String)
                    .with_directive(Directive::property_element())
                    .with_directive(Directive::path(format!("group{}", i % 8))),
            );
    }
    DescriptorSet::from_classes([class]).unwrap()
}

/// An open interface with `count` registered implementations and one holder.
fn generic_source(count: usize) -> DescriptorSet {
    let mut classes = vec![ClassDescriptor::interface("p.Node").with_flags(ClassFlags::OPEN_POLYMORPHIC)];
    for i in 0..count {
        classes.push(
            ClassDescriptor::new(format!("p.Kind{i}").as_str())
                .bindable()
                .with_interface("p.Node"),
        );
    }
    classes.push(
        ClassDescriptor::new("p.Holder").bindable().with_field(
            FieldDescriptor::new("nodes", TypeRef::list_of(TypeRef::class("p.Node")))
                .with_directive(Directive::element()),
        ),
    );
    DescriptorSet::from_classes(classes).unwrap()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn polymorphism_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("polymorphism/dispatch_order");

    for depth in [8usize, 64, 256] {
        let source = chain_source(depth);
        let hierarchy = TypeHierarchy::from_source(&source);
        let matchers: Vec<TypeMatcher> = (0..depth)
            .map(|i| TypeMatcher::new(format!("c{i}"), format!("t.C{i}").as_str()))
            .collect();

        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("chain", depth), &matchers, |b, m| {
            b.iter(|| {
                let order = dispatch_order(&hierarchy, black_box(m));
                end_profiling_frame();
                black_box(order)
            });
        });
    }

    group.finish();
}

fn class_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver/classes");

    for width in [16usize, 128] {
        let source = wide_source(width);
        let resolver = Resolver::new(&source);
        let name = QualifiedName::from("w.Wide");
        group.bench_function(BenchmarkId::new("wide", width), |b| {
            b.iter(|| {
                let model = resolver.resolve_class(black_box(&name)).unwrap();
                end_profiling_frame();
                black_box(model)
            });
        });
    }

    let source = generic_source(64);
    let resolver = Resolver::new(&source);
    let name = QualifiedName::from("p.Holder");
    group.bench_function("generic_64", |b| {
        b.iter(|| {
            let model = resolver.resolve_class(black_box(&name)).unwrap();
            end_profiling_frame();
            black_box(model)
        });
    });

    group.finish();
}

fn driver_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver/driver");

    let source = generic_source(256);
    group.throughput(Throughput::Elements(source.len() as u64));
    group.bench_function("discover_and_resolve_all", |b| {
        b.iter(|| {
            let report = Resolver::new(black_box(&source)).resolve_all().unwrap();
            end_profiling_frame();
            black_box(report.models.len())
        });
    });

    group.finish();
    print_profiling_stats();
}

criterion_group!(
    benches,
    polymorphism_benchmarks,
    class_benchmarks,
    driver_benchmarks
);

criterion_main!(benches);
