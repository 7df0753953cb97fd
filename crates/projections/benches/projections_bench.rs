use std::sync::Arc;

use common::{ConferenceId, ParticipantId, RoomType, RoomTypeRegistry};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{ConferenceEvent, DomainEvent};
use event_store::{EventEnvelope, EventStore, InMemoryEventStore};
use projections::{Projection, ProjectionProcessor, RegistrationView, RoomPairingView};

fn registry() -> RoomTypeRegistry {
    RoomTypeRegistry::default()
}

fn make_envelope(conference_id: ConferenceId, event: &ConferenceEvent) -> EventEnvelope {
    EventEnvelope::builder()
        .event_type(event.event_type())
        .conference_id(conference_id)
        .payload(event)
        .unwrap()
        .build()
}

/// Populate the log with N add/remove pair cycles across all room types.
async fn populate_store(store: &InMemoryEventStore, n: usize) {
    let conference_id = ConferenceId::new();
    let room_types = registry();

    for i in 0..n {
        let room_type = &room_types.all_room_type_ids()[i % 4];
        let p1 = ParticipantId::new(format!("member{}", 2 * i));
        let p2 = ParticipantId::new(format!("member{}", 2 * i + 1));

        let added =
            ConferenceEvent::room_pair_was_added(room_type.clone(), p1.clone(), p2.clone());
        let removed = ConferenceEvent::room_pair_was_removed(room_type.clone(), p1, p2);

        store
            .append(vec![
                make_envelope(conference_id, &added),
                make_envelope(conference_id, &removed),
            ])
            .await
            .unwrap();
    }
}

fn bench_rebuild(c: &mut Criterion, name: &str, cycles: usize) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryEventStore::new();

    rt.block_on(populate_store(&store, cycles));

    c.bench_function(name, |b| {
        b.iter(|| {
            rt.block_on(async {
                let registration = RegistrationView::new(registry());
                let pairing = RoomPairingView::new(registry(), Arc::new(registration.clone()));

                let mut processor = ProjectionProcessor::new(store.clone());
                processor.register(Box::new(registration) as Box<dyn Projection>);
                processor.register(Box::new(pairing) as Box<dyn Projection>);
                processor.run_catch_up().await.unwrap();
            });
        });
    });
}

fn bench_catch_up_200_events(c: &mut Criterion) {
    bench_rebuild(c, "projections/catch_up_200_events", 100);
}

fn bench_catch_up_2000_events(c: &mut Criterion) {
    bench_rebuild(c, "projections/catch_up_2000_events", 1000);
}

criterion_group!(benches, bench_catch_up_200_events, bench_catch_up_2000_events);
criterion_main!(benches);
