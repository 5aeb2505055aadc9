//! Demo binary: writes a manager and an employee referencing it, then reads
//! a view that follows the reverse reference back from manager to employee.

use eventview::config::EngineConfigEnv;
use eventview::{make_system, make_writer, read_view};
use eventview_types::{Entity, EntityDescriptor, PathElement, PrimitiveFieldValue, ViewDescriptor};

const MANAGER_TYPE: u64 = 23;
const EMPLOYEE_TYPE: u64 = 21;

#[tokio::main]
async fn main() {
    env_logger_init();

    let env_config = EngineConfigEnv::from_env_or_defaults();
    let writer_id = env_config.writer_id;
    let (dispatch, log) = make_system(env_config.into_engine_config());
    let writer = make_writer(writer_id, log).expect("writer_id must fit in 10 bits");

    let manager_fields: eventview_types::ValueNode =
        [("name".to_string(), PrimitiveFieldValue::from("ted")), ("age".to_string(), PrimitiveFieldValue::from(56u64))]
            .into_iter()
            .collect();
    let manager_write = writer.write_event(Entity::new(EntityDescriptor::new(0, MANAGER_TYPE), manager_fields)).await;
    let manager = EntityDescriptor::new(manager_write.event_id().expect("manager write should succeed"), MANAGER_TYPE);

    let employee_fields: eventview_types::ValueNode = [
        ("name".to_string(), PrimitiveFieldValue::from("john")),
        ("age".to_string(), PrimitiveFieldValue::from(41u64)),
        ("manager_id".to_string(), PrimitiveFieldValue::Ref(manager)),
    ]
    .into_iter()
    .collect();
    let employee_write = writer.write_event(Entity::new(EntityDescriptor::new(0, EMPLOYEE_TYPE), employee_fields)).await;
    println!("wrote employee event {}", employee_write.event_id().expect("employee write should succeed"));

    let view_desc = ViewDescriptor::new(
        manager,
        vec![
            vec![PathElement::value("name")],
            vec![PathElement::value("age")],
            vec![PathElement::reverse_ref("manager_id", EMPLOYEE_TYPE), PathElement::value("name")],
        ],
    );

    match read_view(&dispatch, view_desc).await {
        Ok(Some(view)) => {
            println!("manager.name = {:?}", view.get_one("name").and_then(|v| v.as_str()));
            println!("manager.age = {:?}", view.get_one("age").and_then(|v| v.as_uint()));
            println!("manager.manager_id.name (reverse ref) = {:?}", view.get_one("manager_id.name").and_then(|v| v.as_str()));
        }
        Ok(None) => println!("view absent"),
        Err(e) => eprintln!("read failed: {e}"),
    }
}

fn env_logger_init() {
    let _ = env_logger_try_init();
}

fn env_logger_try_init() -> Result<(), log::SetLoggerError> {
    // A minimal stderr logger so `log::info!`/`log::warn!` calls inside the
    // engine are visible when running the demo; real embedders bring their
    // own subscriber.
    struct StderrLogger;
    impl log::Log for StderrLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Info
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                eprintln!("[{}] {}", record.level(), record.args());
            }
        }
        fn flush(&self) {}
    }
    static LOGGER: StderrLogger = StderrLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Info);
    Ok(())
}
