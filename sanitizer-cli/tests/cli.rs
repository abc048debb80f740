use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const INPUT_A: &str = "6767676767676767676767676767676767676767676767676767676767676767";
const ADDRESS: &str = "00000000000000000000000000000000000000000000000000000000";

/// Minimal unwitnessed transaction: two plain-array inputs, one legacy
/// output, zero fee.
fn simple_tx_hex() -> String {
    let body = format!(
        "a30082825820{INPUT_A}00825820{INPUT_A}010200018182581c{ADDRESS}1a04000000"
    );
    format!("84{body}a0f5f6")
}

/// Same transaction with a Conway-only donation field (body key 22).
fn tx_with_donation_hex() -> String {
    let body = format!(
        "a40082825820{INPUT_A}00825820{INPUT_A}010200018182581c{ADDRESS}1a040000001601"
    );
    format!("84{body}a0f5f6")
}

fn sanitizer() -> Command {
    Command::cargo_bin("cardano-tx-sanitizer").unwrap()
}

#[test]
fn inspect_prints_parsed_transaction() {
    sanitizer()
        .args(["inspect", "--cbor-hex", &simple_tx_hex()])
        .assert()
        .success()
        .stdout(predicate::str::contains("transaction_body"))
        .stdout(predicate::str::contains("fee"));
}

#[test]
fn inspect_reads_envelope_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"type": "Unwitnessed Tx ConwayEra", "description": "", "cborHex": "{}"}}"#,
        simple_tx_hex()
    )
    .unwrap();

    sanitizer()
        .args(["inspect", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("transaction_body"));
}

#[test]
fn inspect_reads_minimal_envelope_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"cborHex": "{}"}}"#, simple_tx_hex()).unwrap();

    sanitizer()
        .args(["inspect", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("transaction_body"));
}

#[test]
fn help_describes_the_tool() {
    sanitizer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("normalized encodings"));
}

#[test]
fn export_conway_default_tags_inputs() {
    sanitizer()
        .args([
            "export",
            "--cbor-hex",
            &simple_tx_hex(),
            "--era",
            "conway",
            "--format",
            "cbor-hex",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("d90102"));
}

#[test]
fn export_forced_lists_drop_set_tags() {
    sanitizer()
        .args([
            "export",
            "--cbor-hex",
            &simple_tx_hex(),
            "--era",
            "conway",
            "--collections",
            "list",
            "--format",
            "cbor-hex",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("d90102").not());
}

#[test]
fn export_envelope_names_era_and_witness_status() {
    sanitizer()
        .args(["export", "--cbor-hex", &simple_tx_hex(), "--era", "conway"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unwitnessed Tx ConwayEra"))
        .stdout(predicate::str::contains("cborHex"));
}

#[test]
fn export_to_babbage_warns_about_dropped_fields() {
    sanitizer()
        .args([
            "export",
            "--cbor-hex",
            &tx_with_donation_hex(),
            "--era",
            "babbage",
            "--format",
            "cbor-hex",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("donation"));
}

#[test]
fn export_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.json");

    sanitizer()
        .args(["export", "--cbor-hex", &simple_tx_hex(), "--output"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("Unwitnessed Tx ConwayEra"));
}

#[test]
fn rejects_garbage_hex() {
    sanitizer()
        .args(["inspect", "--cbor-hex", "not-hex"])
        .assert()
        .failure();
}

#[test]
fn rejects_missing_input_source() {
    sanitizer().arg("inspect").assert().failure();
}
