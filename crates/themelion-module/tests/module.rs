//! Module generation, caching and watch-loop tests against fixture trees.

use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::event::{AccessKind, ModifyKind};
use notify::{Event, EventKind};
use tempfile::TempDir;
use themelion_content::ContentSources;
use themelion_model::ContentCatalog;
use themelion_module::{
    ChangeOutcome, ContentPlugin, GeneratedModule, ModuleError, ModuleFormat,
    RESOLVED_VIRTUAL_MODULE_ID, ReloadSink, WriteOutcome, process_events, render_module,
    write_if_changed,
};

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const PYTHON: &str = r#"{"id":"python","name":"Python","ext":".py","monacoLanguage":"python","label":"Python","icon":"python","runner":"python3"}"#;

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("data/languages/python.json"), PYTHON);
    write(
        &root.join("data/content/fundamentos/arrays/topic.mdx"),
        "---\ntitle: Arrays\nslug: arrays\nroom: fundamentos\ncategory: estruturas\n---\n\n# Arrays\n",
    );
    dir
}

fn modify(path: &Path) -> notify::Result<Event> {
    Ok(Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.to_path_buf()))
}

#[derive(Default)]
struct RecordingSink {
    reloads: Vec<String>,
    failures: usize,
}

impl ReloadSink for RecordingSink {
    fn full_reload(&mut self, module: &GeneratedModule) {
        self.reloads.push(module.fingerprint.clone());
    }

    fn reload_failed(&mut self, _error: &ModuleError) {
        self.failures += 1;
    }
}

#[test]
fn empty_catalog_renders_helpers() {
    let code = render_module(&ContentCatalog::default()).unwrap();
    assert!(code.starts_with("\nconst _rooms = [];\n"));
    assert!(code.contains("export const roadmaps = _roadmaps;\n"));
    assert!(code.contains(
        "export function getTopicBySlug(slug) {\n\treturn _topics.find((t) => t.slug === slug) || null;\n}\n"
    ));
    assert!(code.ends_with("}\n"));
}

#[test]
fn module_embeds_catalog_as_json() {
    let dir = fixture();
    let mut plugin = ContentPlugin::new(ContentSources::new(dir.path()));
    let module = plugin.module().unwrap();
    let declarations: Vec<&str> = module
        .code
        .lines()
        .filter(|line| line.starts_with("const _languages") || line.starts_with("const _roadmaps"))
        .collect();
    insta::assert_snapshot!(declarations.join("\n"), @r#"
const _languages = [{"id":"python","name":"Python","ext":".py","monacoLanguage":"python","label":"Python","icon":"python"}];
const _roadmaps = [];
"#);
    assert!(!module.code.contains("runner"));
}

#[test]
fn load_only_answers_the_resolved_id() {
    let dir = fixture();
    let mut plugin = ContentPlugin::new(ContentSources::new(dir.path()));
    assert!(plugin.load("virtual:content").unwrap().is_none());
    assert!(!plugin.is_cached());
    assert!(plugin.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap().is_some());
    assert!(plugin.is_cached());
}

#[test]
fn changes_under_source_roots_invalidate() {
    let dir = fixture();
    let root = dir.path();
    let mut plugin = ContentPlugin::new(ContentSources::new(root));
    let before = plugin.module().unwrap().fingerprint.clone();

    assert_eq!(
        plugin.handle_change(&root.join("README.md")),
        ChangeOutcome::Ignored
    );
    assert!(plugin.is_cached());

    write(
        &root.join("data/content/fundamentos/arrays/topic.mdx"),
        "---\ntitle: Vetores\nslug: arrays\nroom: fundamentos\ncategory: estruturas\n---\n\n# Vetores\n",
    );
    assert_eq!(
        plugin.handle_change(&root.join("data/content/fundamentos/arrays/topic.mdx")),
        ChangeOutcome::FullReload
    );
    assert!(!plugin.is_cached());

    let after = plugin.module().unwrap();
    assert_ne!(after.fingerprint, before);
    assert!(after.code.contains("Vetores"));
}

#[test]
fn regeneration_without_changes_is_identical() {
    let dir = fixture();
    let mut plugin = ContentPlugin::new(ContentSources::new(dir.path()));
    let first = plugin.module().unwrap().code.clone();
    plugin.invalidate();
    assert_eq!(plugin.module().unwrap().code, first);
}

#[test]
fn json_format_produces_plain_payload() {
    let dir = fixture();
    let mut plugin =
        ContentPlugin::new(ContentSources::new(dir.path())).with_format(ModuleFormat::Json);
    let module = plugin.module().unwrap();
    let value: serde_json::Value = serde_json::from_str(&module.code).unwrap();
    assert_eq!(value["topics"][0]["slug"], "arrays");
    assert_eq!(value["topics"][0]["status"], "implemented");
}

#[test]
fn burst_of_events_triggers_one_reload() {
    let dir = fixture();
    let root = dir.path();
    let mut plugin = ContentPlugin::new(ContentSources::new(root));
    let (tx, rx) = mpsc::channel();
    let topic = root.join("data/content/fundamentos/arrays/topic.mdx");
    tx.send(modify(&topic)).unwrap();
    tx.send(modify(&root.join("data/languages/python.json")))
        .unwrap();
    tx.send(modify(&topic)).unwrap();
    drop(tx);

    let mut sink = RecordingSink::default();
    process_events(&mut plugin, &rx, &mut sink, Duration::from_millis(50)).unwrap();
    assert_eq!(sink.reloads.len(), 1);
    assert_eq!(sink.failures, 0);
}

#[test]
fn irrelevant_events_are_ignored() {
    let dir = fixture();
    let root = dir.path();
    let mut plugin = ContentPlugin::new(ContentSources::new(root));
    let (tx, rx) = mpsc::channel();
    tx.send(modify(&root.join("src/main.ts"))).unwrap();
    tx.send(Ok(Event::new(EventKind::Access(AccessKind::Any))
        .add_path(root.join("data/content/fundamentos/arrays/topic.mdx"))))
        .unwrap();
    tx.send(Err(notify::Error::generic("backend hiccup")))
        .unwrap();
    drop(tx);

    let mut sink = RecordingSink::default();
    process_events(&mut plugin, &rx, &mut sink, Duration::from_millis(10)).unwrap();
    assert!(sink.reloads.is_empty());
    assert_eq!(sink.failures, 0);
}

#[test]
fn failed_regeneration_is_reported_and_watching_continues() {
    let dir = fixture();
    let root = dir.path();
    let mut plugin = ContentPlugin::new(ContentSources::new(root));
    let broken = root.join("data/content/fundamentos/broken/topic.mdx");
    write(&broken, "---\ntitle: Broken\n");

    let mut sink = RecordingSink::default();
    let (tx, rx) = mpsc::channel();
    tx.send(modify(&broken)).unwrap();
    drop(tx);
    process_events(&mut plugin, &rx, &mut sink, Duration::from_millis(10)).unwrap();
    assert_eq!(sink.failures, 1);
    assert!(sink.reloads.is_empty());

    fs::remove_file(&broken).unwrap();
    let (tx, rx) = mpsc::channel();
    tx.send(modify(&broken)).unwrap();
    drop(tx);
    process_events(&mut plugin, &rx, &mut sink, Duration::from_millis(10)).unwrap();
    assert_eq!(sink.failures, 1);
    assert_eq!(sink.reloads.len(), 1);
}

#[test]
fn unchanged_output_is_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".themelion/virtual-content.js");
    assert_eq!(
        write_if_changed(&path, "export const rooms = [];\n").unwrap(),
        WriteOutcome::Written
    );
    assert_eq!(
        write_if_changed(&path, "export const rooms = [];\n").unwrap(),
        WriteOutcome::Unchanged
    );
    assert_eq!(
        write_if_changed(&path, "export const rooms = [1];\n").unwrap(),
        WriteOutcome::Written
    );
}
