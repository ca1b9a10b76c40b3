use assert_cmd::Command;
use edam_validator::ontology::RelationKind;
use edam_validator::test_utils::fixtures::{ClassSpec, DocumentFixture, OwlDocument};
use predicates::prelude::*;
use serde_json::Value;

const OBSOLETE_LINE: &str = "Error: obsolete replacedBy obsolete - 'Topic A' \
     (http://edamontology.org/topic_0001) -> 'Data B' (http://edamontology.org/data_0002)";
const CROSS_AXIS_LINE: &str = "Error: obsolete 'topic' term replacedBy 'data' term - \
     'Topic A' (http://edamontology.org/topic_0001) -> 'Data B' (http://edamontology.org/data_0002)";

fn validator(fixture: &DocumentFixture) -> Command {
    let mut cmd = Command::cargo_bin("edam-validator").unwrap();
    cmd.current_dir(&fixture.root)
        .env("NO_COLOR", "1")
        .env_remove("FORCE_COLOR")
        .env_remove("RUST_LOG")
        .env_remove("EDAM_VALIDATOR_CONFIG")
        .env_remove("EDAM_VALIDATOR_STRICT")
        .env_remove("EDAM_VALIDATOR_SKIP")
        .env_remove("EDAM_VALIDATOR_MAX_ERRORS")
        .env_remove("EDAM_VALIDATOR_ORDER")
        .env_remove("EDAM_VALIDATOR_PARALLEL");
    cmd
}

fn obsolete_chain() -> OwlDocument {
    OwlDocument::new(10)
        .class(
            ClassSpec::new("topic_0001")
                .label("Topic A")
                .deprecated()
                .replaced_by("data_0002"),
        )
        .class(ClassSpec::new("data_0002").label("Data B").deprecated())
}

fn shared_id() -> OwlDocument {
    OwlDocument::new(10)
        .class(ClassSpec::new("topic_0001").label("A"))
        .class(ClassSpec::new("data_0001").label("B"))
}

fn clean() -> OwlDocument {
    OwlDocument::new(10)
        .class(ClassSpec::new("data_0001").label("Data"))
        .class(
            ClassSpec::new("operation_0002")
                .label("Operation")
                .relation(RelationKind::HasInput, "data_0001"),
        )
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("edam-validator").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("edam-validator").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_clean_document_passes_silently() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&clean());

    validator(&fixture)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_errors_fail_with_one_line_each() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    validator(&fixture)
        .arg(&path)
        .assert()
        .code(1)
        .stdout(format!("{OBSOLETE_LINE}\n{CROSS_AXIS_LINE}\n"));
}

#[test]
fn test_warnings_do_not_fail() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&shared_id());

    validator(&fixture)
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "Warning: id used more than once - 'B' (http://edamontology.org/data_0001) -> \
             'A' (http://edamontology.org/topic_0001)\n",
        );
}

#[test]
fn test_strict_env_turns_warnings_into_errors() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&shared_id());

    validator(&fixture)
        .env("EDAM_VALIDATOR_STRICT", "1")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: id used more than once"));
}

#[test]
fn test_project_config_skips_rules() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&shared_id());
    let _ = fixture.create_file("edam-validator.toml", "[rules]\nskip = [\"id-reuse\"]\n");

    validator(&fixture)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_skip_flag_disables_dependents() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    validator(&fixture)
        .args(["--skip", "obsolete-replaced-by-obsolete"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_live_cross_axis_replacement_passes() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(
        &OwlDocument::new(10)
            .class(
                ClassSpec::new("topic_0001")
                    .label("Topic A")
                    .deprecated()
                    .replaced_by("data_0002"),
            )
            .class(ClassSpec::new("data_0002").label("Data B")),
    );

    validator(&fixture)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_dangling_reference_warns_unless_legacy() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(
        &OwlDocument::new(10).class(
            ClassSpec::new("topic_0001")
                .label("A")
                .subclass_of("topic_0404")
                .subclass_of("http://www.w3.org/2002/07/owl#Thing"),
        ),
    );

    validator(&fixture)
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "Warning: unresolved subClassOf reference - 'A' (http://edamontology.org/topic_0001) \
             -> 'no label' (http://edamontology.org/topic_0404)\n",
        );

    validator(&fixture)
        .arg("--legacy")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_report() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    let output = validator(&fixture)
        .args(["--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let data = &json["data"];
    assert_eq!(data["verdict"], "fail");
    assert_eq!(data["next_id"], 10);
    assert_eq!(data["concepts"], 2);
    assert_eq!(data["errors"], 2);
    assert_eq!(data["truncated"], false);
    let rules: Vec<&str> = data["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(rules, ["obsolete-replaced-by-obsolete", "cross-axis-replacement"]);
    assert_eq!(
        data["findings"][1]["targets"][0]["identity"],
        "http://edamontology.org/data_0002"
    );
}

#[test]
fn test_max_errors_truncates() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    validator(&fixture)
        .args(["--max-errors", "1"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(format!("{OBSOLETE_LINE}\n"));
}

#[test]
fn test_zero_max_errors_still_fails() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(
        &OwlDocument::new(10)
            .class(ClassSpec::new("topic_0001").label("A"))
            .class(ClassSpec::new("data_0001").label("Bad.")),
    );

    let output = validator(&fixture)
        .args(["--format", "json", "--max-errors", "0"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let data = &json["data"];
    assert_eq!(data["verdict"], "fail");
    assert_eq!(data["truncated"], true);
    assert_eq!(data["errors"], 0);
    assert_eq!(data["warnings"], 1);
    assert_eq!(data["findings"][0]["rule_id"], "id-reuse");
}

#[test]
fn test_summary_follows_findings() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    validator(&fixture)
        .arg("--summary")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(
            predicate::str::starts_with(OBSOLETE_LINE)
                .and(predicate::str::contains("Summary"))
                .and(predicate::str::contains("fail")),
        );
}

#[test]
fn test_color_always_styles_severity() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(&obsolete_chain());

    validator(&fixture)
        .env_remove("NO_COLOR")
        .args(["--color", "always"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn test_missing_next_id_is_structural() {
    let fixture = DocumentFixture::new();
    let path = fixture.write_document(
        &OwlDocument::without_next_id().class(ClassSpec::new("topic_0001").label("A")),
    );

    validator(&fixture)
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("next_id"));
}

#[test]
fn test_malformed_xml_is_structural() {
    let fixture = DocumentFixture::new();
    let path = fixture.create_file("EDAM.owl", "<rdf:RDF><owl:Class></rdf:RDF>");

    validator(&fixture)
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed XML"));
}

#[test]
fn test_missing_document() {
    let fixture = DocumentFixture::new();

    validator(&fixture)
        .arg(fixture.root.join("absent.owl"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.owl"));
}

#[test]
fn test_list_rules() {
    let fixture = DocumentFixture::new();

    validator(&fixture)
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("id-range")
                .and(predicate::str::contains("cross-axis-replacement"))
                .and(predicate::str::contains("unresolved-reference")),
        );
}

#[test]
fn test_explain_rule_json() {
    let fixture = DocumentFixture::new();

    let output = validator(&fixture)
        .args(["--format", "json", "--explain", "cross-axis-replacement"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["category"], "lifecycle");
    assert_eq!(
        json["data"]["depends_on"][0],
        "obsolete-replaced-by-obsolete"
    );
}

#[test]
fn test_explain_unknown_rule() {
    let fixture = DocumentFixture::new();

    validator(&fixture)
        .args(["--explain", "no-such-rule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-rule"));
}
