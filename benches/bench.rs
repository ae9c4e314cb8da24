use criterion::{criterion_group, criterion_main, Criterion};
use yaml_emit::{Emitter, Encoding, Event, MappingStyle, ScalarStyle, SequenceStyle};

fn sample_events() -> Vec<Event> {
    let mut events = vec![
        Event::stream_start(Encoding::Utf8),
        Event::document_start(None, &[], true),
        Event::mapping_start(None, None, true, MappingStyle::Block),
    ];
    for i in 0..200 {
        events.push(Event::scalar(
            None,
            None,
            &format!("key-{i}"),
            true,
            true,
            ScalarStyle::Plain,
        ));
        events.push(Event::sequence_start(None, None, true, SequenceStyle::Flow));
        events.push(Event::scalar(None, None, "a", true, true, ScalarStyle::Plain));
        events.push(Event::scalar(None, None, "b", true, true, ScalarStyle::Plain));
        events.push(Event::sequence_end());
    }
    events.push(Event::mapping_end());
    events.push(Event::document_end(true));
    events.push(Event::stream_end());
    events
}

pub fn emit_large(c: &mut Criterion) {
    let events = sample_events();
    c.bench_function("yaml-emit emit large mapping", |b| {
        b.iter(|| {
            let mut buffer = Vec::new();
            let mut emitter = Emitter::new();
            emitter.set_output_string(&mut buffer);
            for event in &events {
                // `emit` takes ownership; callers normally produce events once
                // and move them in, but the benchmark reuses the same fixture.
                emitter.emit(clone_event(event)).unwrap();
            }
        })
    });
}

fn clone_event(event: &Event) -> Event {
    use yaml_emit::EventData;
    match &event.data {
        EventData::StreamStart { encoding } => Event::stream_start(*encoding),
        EventData::StreamEnd => Event::stream_end(),
        EventData::DocumentStart {
            version_directive,
            tag_directives,
            implicit,
        } => Event::document_start(*version_directive, tag_directives, *implicit),
        EventData::DocumentEnd { implicit } => Event::document_end(*implicit),
        EventData::Alias { anchor } => Event::alias(anchor),
        EventData::Scalar {
            anchor,
            tag,
            value,
            plain_implicit,
            quoted_implicit,
            style,
        } => Event::scalar(
            anchor.as_deref(),
            tag.as_deref(),
            value,
            *plain_implicit,
            *quoted_implicit,
            *style,
        ),
        EventData::SequenceStart {
            anchor,
            tag,
            implicit,
            style,
        } => Event::sequence_start(anchor.as_deref(), tag.as_deref(), *implicit, *style),
        EventData::SequenceEnd => Event::sequence_end(),
        EventData::MappingStart {
            anchor,
            tag,
            implicit,
            style,
        } => Event::mapping_start(anchor.as_deref(), tag.as_deref(), *implicit, *style),
        EventData::MappingEnd => Event::mapping_end(),
    }
}

criterion_group!(benches, emit_large);
criterion_main!(benches);
