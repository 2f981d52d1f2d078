//! Dispatcher Tests
//!
//! Tests for routing command lines to the engine.

use logkv::protocol::Response;
use logkv::session::{Dispatcher, Reply};
use logkv::{Config, Engine};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_dispatcher() -> (TempDir, Dispatcher) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .log_path(temp_dir.path().join("data.db"))
        .build();
    let engine = Engine::open(config).unwrap();
    (temp_dir, Dispatcher::new(engine))
}

fn respond(dispatcher: &mut Dispatcher, line: &str) -> String {
    match dispatcher.handle_line(line) {
        Some(Reply::Respond(response)) => response.to_string(),
        other => panic!("Expected a response for {:?}, got {:?}", line, other),
    }
}

// =============================================================================
// Routing Tests
// =============================================================================

#[test]
fn test_blank_line_produces_nothing() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(dispatcher.handle_line(""), None);
    assert_eq!(dispatcher.handle_line("   \n"), None);
}

#[test]
fn test_set_then_get() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(respond(&mut dispatcher, "SET a 1"), "OK");
    assert_eq!(respond(&mut dispatcher, "GET a"), "1");
}

#[test]
fn test_commands_are_case_insensitive() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(respond(&mut dispatcher, "set Name Ada"), "OK");
    assert_eq!(respond(&mut dispatcher, "get Name"), "Ada");
    assert_eq!(respond(&mut dispatcher, "GET name"), "Key not found");
}

#[test]
fn test_value_keeps_spaces() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    respond(&mut dispatcher, "SET motto  keep   calm  ");

    assert_eq!(respond(&mut dispatcher, "GET motto"), "keep   calm");
}

#[test]
fn test_get_missing_key() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(respond(&mut dispatcher, "GET missing"), "Key not found");
}

#[test]
fn test_set_without_value() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(
        respond(&mut dispatcher, "SET onlykey"),
        "Error: SET requires key and value"
    );
    assert_eq!(
        respond(&mut dispatcher, "SET"),
        "Error: SET requires key and value"
    );
    assert!(dispatcher.engine().is_empty());
}

#[test]
fn test_get_without_key() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(respond(&mut dispatcher, "GET"), "Error: GET requires a key");
}

#[test]
fn test_unknown_command() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(respond(&mut dispatcher, "FOO bar"), "Unknown command: FOO");
    assert_eq!(respond(&mut dispatcher, "del a"), "Unknown command: DEL");
}

#[test]
fn test_exit() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(dispatcher.handle_line("EXIT"), Some(Reply::Exit));
    assert_eq!(dispatcher.handle_line("exit"), Some(Reply::Exit));
}

#[test]
fn test_dispatch_with_split_parts() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    assert_eq!(dispatcher.dispatch("SET", "k v"), Reply::Respond(Response::Ok));
    assert_eq!(
        dispatcher.dispatch("GET", "k"),
        Reply::Respond(Response::Value("v".to_string()))
    );
}

#[test]
fn test_errors_do_not_stop_dispatching() {
    let (_temp, mut dispatcher) = setup_dispatcher();

    respond(&mut dispatcher, "BOGUS");
    respond(&mut dispatcher, "SET");
    respond(&mut dispatcher, "GET nothing");

    assert_eq!(respond(&mut dispatcher, "SET k v"), "OK");
    assert_eq!(respond(&mut dispatcher, "GET k"), "v");
}

#[test]
fn test_into_engine_keeps_state() {
    let (_temp, mut dispatcher) = setup_dispatcher();
    respond(&mut dispatcher, "SET a 1");

    let engine = dispatcher.into_engine();

    assert_eq!(engine.get("a").unwrap(), "1");
}
