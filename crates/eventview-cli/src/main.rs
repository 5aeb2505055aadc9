//! eventview-cli: minimal single-entity write/read smoke demo.
//!
//! For the fuller manager/employee reverse-reference walkthrough, see the
//! workspace root's own binary (`eventview-demo`, `src/main.rs`).

use eventview_core::{make_system, make_writer, read_view, EngineConfig};
use eventview_types::{Entity, EntityDescriptor, PathElement, PrimitiveFieldValue, ViewDescriptor};

#[tokio::main]
async fn main() {
    println!("eventview-cli");
    println!("=============");

    let (dispatch, log) = make_system(EngineConfig::default());
    let writer = make_writer(0, log).expect("writer_id 0 is always valid");

    let fields = [("value".to_string(), PrimitiveFieldValue::from("hello from cli"))].into_iter().collect();
    let result = writer.write_event(Entity::new(EntityDescriptor::new(0, 1), fields)).await;

    match result.event_id() {
        Some(event_id) => {
            let view_desc = ViewDescriptor::new(EntityDescriptor::new(event_id, 1), vec![vec![PathElement::value("value")]]);
            match read_view(&dispatch, view_desc).await {
                Ok(Some(view)) => println!("value = {:?}", view.get_one("value").and_then(|v| v.as_str())),
                Ok(None) => println!("view absent"),
                Err(e) => eprintln!("read failed: {e}"),
            }
        }
        None => eprintln!("write failed: {}", result.error().unwrap_or("unknown error")),
    }
}
