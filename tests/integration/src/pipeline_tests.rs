//! Multi-run pipeline tests across the fs and core crates.

use overmodel_core::apply::GuardState;
use overmodel_core::model::Rule;
use overmodel_core::{ApplyGuard, ApplyOptions, ConfigCompiler, ConfigTree};
use overmodel_fs::checksum::compute_checksum;
use overmodel_fs::{ConfigLayout, NormalizedPath};
use overmodel_test_utils::TestWorkspace;
use pretty_assertions::assert_eq;

/// Two model roots (`site` overrides `base`), an environment variant and
/// two nested templates.
fn project() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write_model(
        "base",
        "service.yaml",
        "service:\n  name:\n    value: shop\n  port:\n    value: 8080\n",
    );
    ws.write_model(
        "base",
        "db.properties",
        "db.host=localhost\ndb.url=postgres://{{db.host}}:{{db.port}}/{{service.name}}\ndb.port=5432\n",
    );
    ws.write_model("base", "env/prod/.db.properties", "db.host=db.internal\n");
    ws.write_model(
        "site",
        "service.yaml",
        "service:\n  port:\n    value: 443\n  port_metadata:\n    unit: tcp\n",
    );

    ws.write_template("etc/service.conf", "listen {{service.port}}\nname {{service.name}}\n");
    ws.write_template("etc/db/db.conf", "url={{db.url}}\n");
    ws.write_target("etc/service.conf", "");
    ws.write_target("etc/db/db.conf", "");
    ws
}

fn compile(ws: &TestWorkspace, rules: &[&str]) -> ConfigTree {
    ConfigCompiler::new(
        vec![
            NormalizedPath::new(ws.model_dir("base")),
            NormalizedPath::new(ws.model_dir("site")),
        ],
        rules.iter().map(|r| Rule::parse(r).unwrap()).collect(),
    )
    .compile()
    .unwrap()
}

fn guard(ws: &TestWorkspace) -> ApplyGuard {
    ApplyGuard::new(ConfigLayout::new(
        NormalizedPath::new(ws.config_dir()),
        NormalizedPath::new(ws.root()),
    ))
}

#[test]
fn full_pipeline_renders_every_target() {
    let ws = project();
    let config = compile(&ws, &["env=prod"]);

    let report = guard(&ws).apply(&config, &ApplyOptions::default()).unwrap();

    assert!(report.is_success());
    assert_eq!(ws.read_target("etc/service.conf"), "listen 443\nname shop\n");
    assert_eq!(
        ws.read_target("etc/db/db.conf"),
        "url=postgres://db.internal:5432/shop\n"
    );

    let files: Vec<&str> = report.applied.iter().map(|a| a.file.as_str()).collect();
    assert_eq!(files, vec!["etc/db/db.conf", "etc/service.conf"]);
    assert_eq!(
        report.applied[1].checksum,
        compute_checksum(b"listen 443\nname shop\n")
    );
}

#[test]
fn metadata_travels_with_the_leaf() {
    let ws = project();
    let config = compile(&ws, &[]);

    let leaf = config.leaf("service.port").unwrap();

    assert_eq!(leaf.value, "443");
    assert_eq!(leaf.metadata.get("unit").map(String::as_str), Some("tcp"));
}

#[test]
fn second_apply_sees_matching_snapshots() {
    let ws = project();
    let config = compile(&ws, &[]);
    guard(&ws).apply(&config, &ApplyOptions::default()).unwrap();

    let report = guard(&ws).apply(&config, &ApplyOptions::default()).unwrap();

    assert!(report.is_success());
    assert!(
        report
            .applied
            .iter()
            .all(|a| a.state == GuardState::SnapshotMatchesTarget)
    );
}

#[test]
fn model_change_is_applied_but_local_edit_is_protected() {
    let ws = project();
    guard(&ws)
        .apply(&compile(&ws, &[]), &ApplyOptions::default())
        .unwrap();

    // Operator edits one target by hand, then the environment changes
    ws.write_target("etc/service.conf", "listen 1\n");
    let report = guard(&ws)
        .apply(&compile(&ws, &["env=prod"]), &ApplyOptions::default())
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file(), "etc/service.conf");
    assert_eq!(ws.read_target("etc/service.conf"), "listen 1\n");
    assert_eq!(
        ws.read_target("etc/db/db.conf"),
        "url=postgres://db.internal:5432/shop\n"
    );
}

#[test]
fn report_serializes_for_scripting() {
    let ws = project();
    ws.write_snapshot("etc/service.conf", "old");
    ws.write_target("etc/service.conf", "new");
    let config = compile(&ws, &[]);

    let report = guard(&ws).apply(&config, &ApplyOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["failures"][0]["kind"], "drift_conflict");
    assert_eq!(json["failures"][0]["file"], "etc/service.conf");
    assert!(json["failures"][0]["diff"]["parts"].is_array());
    assert_eq!(json["applied"][0]["file"], "etc/db/db.conf");
}
