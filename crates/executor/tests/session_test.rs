//! End-to-end command-protocol sessions.
//!
//! Drives whole scripts through one `Executor` and asserts the exact wire
//! strings (and JSON payloads) the protocol promises, the way a transport
//! would observe them.

use mirror_executor::{error_to_json, wire_error, Executor};
use serde_json::json;

/// Run one line, rendering success and failure to the protocol string.
fn run(exec: &mut Executor, line: &str) -> String {
    match exec.execute_line(line) {
        Ok(output) => output.to_string(),
        Err(err) => wire_error(&err),
    }
}

#[test]
fn test_reverse_lookup_session() {
    let mut exec = Executor::new();

    assert_eq!(run(&mut exec, "SET a 10"), "Set a = 10");
    assert_eq!(run(&mut exec, "SET b 10"), "Set b = 10");
    assert_eq!(run(&mut exec, "COUNTS 10"), "2");
    assert_eq!(run(&mut exec, "FIND 10"), "a b");

    assert_eq!(run(&mut exec, "UNSET a"), "Unset a");
    assert_eq!(run(&mut exec, "COUNTS 10"), "1");
    assert_eq!(run(&mut exec, "FIND 10"), "b");

    assert_eq!(run(&mut exec, "UNSET b"), "Unset b");
    assert_eq!(run(&mut exec, "COUNTS 10"), "0");
    assert_eq!(run(&mut exec, "FIND 10"), "NONE");
    assert_eq!(run(&mut exec, "GET a"), "NULL");
}

#[test]
fn test_transaction_commit_session() {
    let mut exec = Executor::new();

    assert_eq!(run(&mut exec, "BEGIN"), "Transaction started");
    assert_eq!(run(&mut exec, "SET k v"), "Set k = v");

    let output = exec.execute_line("COMMIT").unwrap();
    assert_eq!(output.to_string(), "Commit successful");
    assert_eq!(output.changes().unwrap(), ["BEGIN", "SET k v"]);
    assert_eq!(run(&mut exec, "GET k"), "v");
}

#[test]
fn test_transaction_rollback_session() {
    let mut exec = Executor::new();
    run(&mut exec, "SET a 1");

    run(&mut exec, "BEGIN");
    run(&mut exec, "SET a 2");
    run(&mut exec, "UNSET a");

    let output = exec.execute_line("ROLLBACK").unwrap();
    assert_eq!(output.to_string(), "Rollback successful");
    assert_eq!(output.changes().unwrap(), ["BEGIN", "SET a 2", "UNSET a"]);
    assert_eq!(run(&mut exec, "GET a"), "1");
}

#[test]
fn test_nested_transaction_session() {
    let mut exec = Executor::new();

    run(&mut exec, "BEGIN");
    run(&mut exec, "SET a 1");
    run(&mut exec, "BEGIN");
    run(&mut exec, "SET a 2");
    assert_eq!(run(&mut exec, "GET a"), "2");

    // Only the inner frame's mutations are undone.
    assert_eq!(run(&mut exec, "ROLLBACK"), "Rollback successful");
    assert_eq!(run(&mut exec, "GET a"), "1");

    // The outer commit reports only its own entries.
    let output = exec.execute_line("COMMIT").unwrap();
    assert_eq!(output.changes().unwrap(), ["BEGIN", "SET a 1"]);
    assert_eq!(run(&mut exec, "GET a"), "1");
}

#[test]
fn test_no_transaction_errors() {
    let mut exec = Executor::new();
    run(&mut exec, "SET a 1");

    assert_eq!(run(&mut exec, "COMMIT"), "NO TRANSACTION");
    assert_eq!(run(&mut exec, "ROLLBACK"), "NO TRANSACTION");

    // State untouched, loop still alive.
    assert_eq!(run(&mut exec, "GET a"), "1");
}

#[test]
fn test_invalid_commands_use_uppercased_keyword() {
    let mut exec = Executor::new();

    assert_eq!(run(&mut exec, "frobnicate a"), "Invalid command: FROBNICATE");
    assert_eq!(run(&mut exec, "set a"), "Invalid command: SET");
    assert_eq!(run(&mut exec, "GET a b c"), "Invalid command: GET");
    assert_eq!(run(&mut exec, ""), "Empty command");
}

#[test]
fn test_bad_commands_leave_state_intact() {
    let mut exec = Executor::new();
    run(&mut exec, "SET a 1");
    run(&mut exec, "BEGIN");

    run(&mut exec, "bogus");
    run(&mut exec, "SET too few");
    run(&mut exec, "SET");

    assert_eq!(exec.store().depth(), 1);
    assert_eq!(run(&mut exec, "ROLLBACK"), "Rollback successful");
    assert_eq!(run(&mut exec, "GET a"), "1");
}

#[test]
fn test_json_payload_shapes() {
    let mut exec = Executor::new();

    assert_eq!(
        exec.execute_line("SET a 10").unwrap().to_json(),
        json!({"result": "Set a = 10"})
    );
    exec.execute_line("SET b 10").unwrap();
    assert_eq!(
        exec.execute_line("COUNTS 10").unwrap().to_json(),
        json!({"result": 2})
    );
    assert_eq!(
        exec.execute_line("FIND 10").unwrap().to_json(),
        json!({"result": ["a", "b"]})
    );
    assert_eq!(
        exec.execute_line("FIND 99").unwrap().to_json(),
        json!({"result": "NONE"})
    );

    exec.execute_line("BEGIN").unwrap();
    exec.execute_line("UNSET a").unwrap();
    assert_eq!(
        exec.execute_line("ROLLBACK").unwrap().to_json(),
        json!({"result": "Rollback successful", "changes": ["BEGIN", "UNSET a"]})
    );

    let err = exec.execute_line("COMMIT").unwrap_err();
    assert_eq!(error_to_json(&err), json!({"error": "NO TRANSACTION"}));
}

#[test]
fn test_interleaved_mixed_session() {
    let mut exec = Executor::new();

    run(&mut exec, "SET a 10");
    run(&mut exec, "BEGIN");
    run(&mut exec, "SET b 10");
    assert_eq!(run(&mut exec, "COUNTS 10"), "2");
    assert_eq!(run(&mut exec, "FIND 10"), "a b");

    run(&mut exec, "BEGIN");
    run(&mut exec, "SET a 20");
    assert_eq!(run(&mut exec, "FIND 10"), "b");
    run(&mut exec, "COMMIT");
    assert_eq!(run(&mut exec, "GET a"), "20");

    // Outer rollback undoes the committed inner SET as well.
    run(&mut exec, "ROLLBACK");
    assert_eq!(run(&mut exec, "GET a"), "10");
    assert_eq!(run(&mut exec, "GET b"), "NULL");
    assert_eq!(run(&mut exec, "COUNTS 10"), "1");
}
