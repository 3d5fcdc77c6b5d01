//! End-to-end scenarios: model compilation, rendering and guarded apply.

use overmodel_core::apply::{AcceptSet, GuardState};
use overmodel_core::model::{ModelFile, Rule, RuleFilter};
use overmodel_core::{
    ApplyGuard, ApplyOptions, ConfigCompiler, ConfigTree, FileFailure, TemplateResolver,
};
use overmodel_fs::{ConfigLayout, NormalizedPath};
use overmodel_test_utils::TestWorkspace;
use pretty_assertions::assert_eq;

fn compile(ws: &TestWorkspace, roots: &[&str], rules: &[&str]) -> ConfigTree {
    ConfigCompiler::new(
        roots
            .iter()
            .map(|name| NormalizedPath::new(ws.model_dir(name)))
            .collect(),
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
fn scenario_a_deeper_model_wins() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "host.properties", "host.name=alice\n");
    ws.write_model("site", "tier/.host.properties", "host.name=bob\n");

    let config = compile(&ws, &["base", "site"], &["tier="]);

    assert_eq!(config.value_at("host.name"), Some("bob"));
}

#[test]
fn scenario_a_holds_with_roots_reversed() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "host.properties", "host.name=alice\n");
    ws.write_model("site", "tier/.host.properties", "host.name=bob\n");

    let config = compile(&ws, &["site", "base"], &["tier="]);

    assert_eq!(config.value_at("host.name"), Some("bob"));
}

#[test]
fn scenario_b_template_renders() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "host.json", r#"{"host": {"name": {"value": "bob"}}}"#);
    let config = compile(&ws, &["base"], &[]);

    let result = TemplateResolver::new(&config).render("Hello {{host.name}}");

    assert_eq!(result.rendered_text, "Hello bob");
    assert!(result.missing_variables.is_empty());
}

#[test]
fn scenario_c_rule_selects_prod_only() {
    let root = NormalizedPath::new("models");
    let files = vec![
        ModelFile::new(root.clone(), "env/dev/.app.yaml".into()),
        ModelFile::new(root, "env/prod/.app.yaml".into()),
    ];

    let selected = RuleFilter::new(vec![Rule::parse("env=prod").unwrap()]).apply(files);

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].relative_path.as_str(), "env/prod/.app.yaml");
}

#[test]
fn scenario_c_end_to_end() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "env/dev/.app.yaml", "stage:\n  value: dev\n");
    ws.write_model("base", "env/prod/.app.yaml", "stage:\n  value: prod\n");

    let config = compile(&ws, &["base"], &["env=prod"]);

    assert_eq!(config.value_at("stage"), Some("prod"));
}

#[test]
fn scenario_c_flat_variant_files() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "app.yaml", "stage:\n  value: base\n");
    ws.write_model("base", "env/dev.yaml", "stage:\n  value: dev\n");
    ws.write_model("base", "env/prod.yaml", "stage:\n  value: prod\n");

    let config = compile(&ws, &["base"], &["env=prod"]);

    assert_eq!(config.value_at("stage"), Some("prod"));
}

#[test]
fn scenario_d_drift_is_refused() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "app.properties", "letter=Z\n");
    ws.write_template("app.conf", "{{letter}}");
    ws.write_snapshot("app.conf", "X");
    ws.write_target("app.conf", "Y");
    let config = compile(&ws, &["base"], &[]);

    let report = guard(&ws).apply(&config, &ApplyOptions::default()).unwrap();

    assert!(!report.is_success());
    assert!(matches!(
        &report.failures[0],
        FileFailure::DriftConflict { file, .. } if file == "app.conf"
    ));
    assert_eq!(ws.read_target("app.conf"), "Y");
    assert_eq!(ws.read_snapshot("app.conf").as_deref(), Some("X"));
}

#[test]
fn scenario_e_accept_overwrites() {
    let ws = TestWorkspace::new();
    ws.write_model("base", "app.properties", "letter=Z\n");
    ws.write_template("app.conf", "{{letter}}");
    ws.write_snapshot("app.conf", "X");
    ws.write_target("app.conf", "Y");
    let config = compile(&ws, &["base"], &[]);
    let options = ApplyOptions {
        accept: ["app.conf"].into_iter().collect::<AcceptSet>(),
        dry_run: false,
    };

    let report = guard(&ws).apply(&config, &options).unwrap();

    assert!(report.is_success());
    assert_eq!(report.applied[0].state, GuardState::SnapshotDiffersFromTarget);
    assert_eq!(ws.read_target("app.conf"), "Z");
    assert_eq!(ws.read_snapshot("app.conf").as_deref(), Some("Z"));
}
