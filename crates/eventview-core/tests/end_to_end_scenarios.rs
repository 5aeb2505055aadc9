use std::sync::Arc;

use eventview_core::{make_system, make_writer, read_view, EngineConfig};
use eventview_types::{Entity, EntityDescriptor, PathElement, PrimitiveFieldValue, ViewDescriptor, ViewExpectation};

fn entity(descriptor: EntityDescriptor, fields: &[(&str, PrimitiveFieldValue)]) -> Entity {
    Entity::new(descriptor, fields.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect())
}

#[tokio::test]
async fn manager_and_employee_round_trip_through_the_public_api() {
    let (dispatch, log) = make_system(EngineConfig::default());
    let writer = make_writer(406, log).unwrap();

    let manager = EntityDescriptor::new(0, 23);
    let manager_result = writer.write_event(entity(manager, &[("name", "ted".into()), ("age", 56u64.into())])).await;
    assert!(manager_result.is_ok());
    let manager = EntityDescriptor::new(manager_result.event_id().unwrap(), 23);

    let employee = EntityDescriptor::new(0, 21);
    let employee_result = writer
        .write_event(entity(employee, &[("name", "john".into()), ("age", 41u64.into()), ("manager_id", PrimitiveFieldValue::Ref(manager))]))
        .await;
    assert!(employee_result.is_ok());

    let view_desc = ViewDescriptor::new(
        manager,
        vec![
            vec![PathElement::value("name")],
            vec![PathElement::value("age")],
            vec![PathElement::reverse_ref("manager_id", 21), PathElement::value("name")],
        ],
    );
    let view = read_view(&dispatch, view_desc).await.unwrap().expect("view present");
    assert_eq!(view.get_one("name").unwrap().as_str(), Some("ted"));
    assert_eq!(view.get_one("age").unwrap().as_uint(), Some(56));
    assert_eq!(view.get_one("manager_id.name").unwrap().as_str(), Some("john"));
}

#[tokio::test]
async fn forward_reference_before_target_exists_resolves_once_target_is_written() {
    let (dispatch, log) = make_system(EngineConfig::default());
    let writer = make_writer(1, log).unwrap();

    let manager = EntityDescriptor::new(9001, 23);
    let employee = EntityDescriptor::new(0, 21);
    let employee_result = writer
        .write_event(entity(employee, &[("manager_id", PrimitiveFieldValue::Ref(manager))]))
        .await;
    assert!(employee_result.is_ok());

    // Manager not written yet: the view is absent (stub has no name field).
    let view_desc = ViewDescriptor::new(manager, vec![vec![PathElement::value("name")]]);
    let view = read_view(&dispatch, view_desc.clone()).await.unwrap();
    assert!(view.is_none() || view.unwrap().get_one("name").is_none());

    writer.write_event(entity(manager, &[("name", "ted".into())])).await;

    let view = read_view(&dispatch, view_desc).await.unwrap().expect("view present after manager write");
    assert_eq!(view.get_one("name").unwrap().as_str(), Some("ted"));
}

#[tokio::test]
async fn expectation_fence_blocks_reads_for_events_not_yet_applied() {
    let (dispatch, log) = make_system(EngineConfig::default());
    let writer = make_writer(2, log).unwrap();

    let subject = EntityDescriptor::new(0, 23);
    let result = writer.write_event(entity(subject, &[("name", "ted".into())])).await;
    let event_id = result.event_id().unwrap();
    let subject = EntityDescriptor::new(event_id, 23);

    let far_future = ViewDescriptor::new(subject, vec![vec![PathElement::value("name")]])
        .with_expectation(ViewExpectation { target: subject, at_least: event_id + 100 });
    assert!(read_view(&dispatch, far_future).await.unwrap().is_none());

    let exact = ViewDescriptor::new(subject, vec![vec![PathElement::value("name")]])
        .with_expectation(ViewExpectation { target: subject, at_least: event_id });
    assert!(read_view(&dispatch, exact).await.unwrap().is_some());
}

#[tokio::test]
async fn concurrent_writers_each_get_unique_strictly_increasing_event_ids() {
    let (_dispatch, log) = make_system(EngineConfig::default());
    let writer_a = Arc::new(make_writer(10, log.clone()).unwrap());
    let writer_b = Arc::new(make_writer(11, log).unwrap());

    let mut handles = Vec::new();
    for writer in [writer_a, writer_b] {
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for _ in 0..25 {
                let result = writer.write_event(entity(EntityDescriptor::new(0, 50), &[])).await;
                ids.push(result.event_id().unwrap());
            }
            ids
        }));
    }

    let mut all_ids = Vec::new();
    for handle in handles {
        all_ids.extend(handle.await.unwrap());
    }
    let mut unique = all_ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), all_ids.len(), "writer_id separation must keep ids globally unique");
}
