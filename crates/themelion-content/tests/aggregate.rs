//! End-to-end tests for the aggregation pass over fixture trees.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use themelion_content::{ContentError, ContentSources, ProjectConfig, aggregate};
use themelion_model::TopicStatus;
use tracing_subscriber::fmt::MakeWriter;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const PYTHON: &str = r#"{"id":"python","name":"Python","ext":".py","monacoLanguage":"python","label":"Python","icon":"python","runner":"python3"}"#;

const ROOM: &str = r#"
room: fundamentos
name: Fundamentos
description: Base de tudo
icon: book
order: 1
categories:
  - slug: estruturas-de-dados
    name: Estruturas de dados
    order: 1
    topics:
      - slug: arrays
        title: Arrays
        difficulty: beginner
        order: 1
        prerequisites: []
        tags: [arrays]
"#;

fn topic_doc(slug: &str, title: &str) -> String {
    format!(
        "---\ntitle: {title}\nslug: {slug}\nroom: fundamentos\ncategory: estruturas-de-dados\ndifficulty: beginner\norder: 1\nprerequisites: []\ntags: [arrays]\n---\n\n# {title}\n\nConteudo.\n"
    )
}

/// Scenario A layout: one language, one room, one topic with one example.
fn scenario_a() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("data/languages/python.json"), PYTHON);
    write(&root.join("data/registry/rooms/fundamentos.yaml"), ROOM);
    write(
        &root.join("data/content/fundamentos/estruturas-de-dados/arrays/topic.mdx"),
        &topic_doc("arrays", "Arrays"),
    );
    write(
        &root.join("data/content/fundamentos/estruturas-de-dados/arrays/examples/arrays.py"),
        "numeros = [10, 20, 30]\n",
    );
    dir
}

#[test]
fn implemented_topic_upgrades_registry_summary() {
    let dir = scenario_a();
    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let catalog = result.catalog;

    let topic = catalog.topic_by_slug("arrays").expect("arrays topic");
    assert_eq!(topic.status, TopicStatus::Implemented);
    assert_eq!(
        topic.content_path,
        "data/content/fundamentos/estruturas-de-dados/arrays/topic.mdx"
    );
    assert_eq!(topic.content, "# Arrays\n\nConteudo.");
    assert_eq!(topic.examples.len(), 1);
    assert_eq!(topic.examples[0].language_id, "python");
    assert_eq!(
        topic.examples[0].file_path,
        "data/content/fundamentos/estruturas-de-dados/arrays/examples/arrays.py"
    );
    assert_eq!(topic.examples[0].code, "numeros = [10, 20, 30]\n");

    let room = catalog.room_by_slug("fundamentos").expect("room");
    assert_eq!(room.categories[0].topics[0].status, TopicStatus::Implemented);
    assert!(result.diagnostics.example_fallbacks.is_empty());
}

#[test]
fn missing_content_leaves_summary_planned() {
    let dir = scenario_a();
    fs::remove_file(
        dir.path()
            .join("data/content/fundamentos/estruturas-de-dados/arrays/topic.mdx"),
    )
    .unwrap();

    let catalog = aggregate(&ContentSources::new(dir.path()))
        .expect("aggregate")
        .catalog;
    assert!(catalog.topic_by_slug("arrays").is_none());
    assert!(catalog.topics.is_empty());
    let room = catalog.room_by_slug("fundamentos").expect("room");
    assert_eq!(room.categories[0].topics[0].status, TopicStatus::Planned);
}

#[test]
fn unknown_extension_falls_back_to_raw_extension() {
    let dir = scenario_a();
    write(
        &dir.path()
            .join("data/content/fundamentos/estruturas-de-dados/arrays/examples/notes.xyz"),
        "free text",
    );

    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let topic = result.catalog.topic_by_slug("arrays").expect("topic");
    let ids: Vec<&str> = topic
        .examples
        .iter()
        .map(|e| e.language_id.as_str())
        .collect();
    assert_eq!(ids, vec!["python", "xyz"]);
    assert_eq!(result.diagnostics.example_fallbacks.len(), 1);
    assert_eq!(result.diagnostics.example_fallbacks[0].extension, "xyz");
}

#[test]
fn duplicate_slugs_resolve_to_the_later_path() {
    let dir = scenario_a();
    write(
        &dir.path().join("data/content/a/dup/topic.mdx"),
        &topic_doc("dup", "First"),
    );
    write(
        &dir.path().join("data/content/b/dup/topic.mdx"),
        &topic_doc("dup", "Second"),
    );

    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let dups: Vec<_> = result
        .catalog
        .topics
        .iter()
        .filter(|t| t.slug == "dup")
        .collect();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].title, "Second");
    assert_eq!(dups[0].content_path, "data/content/b/dup/topic.mdx");

    // The winner keeps the slot of the first occurrence.
    let slugs: Vec<&str> = result.catalog.topics.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["dup", "arrays"]);

    let duplicates = &result.diagnostics.duplicate_topics;
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].replaced, "data/content/a/dup/topic.mdx");
    assert_eq!(duplicates[0].kept, "data/content/b/dup/topic.mdx");
}

#[test]
fn replaced_topic_takes_its_example_fallbacks_along() {
    let dir = scenario_a();
    write(
        &dir.path().join("data/content/a/dup/topic.mdx"),
        &topic_doc("dup", "First"),
    );
    write(
        &dir.path().join("data/content/a/dup/examples/notes.xyz"),
        "first\n",
    );
    write(
        &dir.path().join("data/content/b/dup/topic.mdx"),
        &topic_doc("dup", "Second"),
    );
    write(
        &dir.path().join("data/content/b/dup/examples/sketch.abc"),
        "second\n",
    );

    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let fallbacks: Vec<&str> = result
        .diagnostics
        .example_fallbacks
        .iter()
        .map(|fallback| fallback.file_path.as_str())
        .collect();
    assert_eq!(fallbacks, vec!["data/content/b/dup/examples/sketch.abc"]);
    let topic = result.catalog.topic_by_slug("dup").expect("dup topic");
    assert_eq!(topic.examples.len(), 1);
    assert_eq!(topic.examples[0].language_id, "abc");
}

#[test]
fn non_utf8_example_is_decoded_lossily() {
    let dir = scenario_a();
    let example = dir
        .path()
        .join("data/content/fundamentos/estruturas-de-dados/arrays/examples/latin1.cs");
    fs::write(&example, b"// caf\xe9\n").unwrap();

    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let topic = result.catalog.topic_by_slug("arrays").expect("arrays topic");
    let latin1 = topic
        .examples
        .iter()
        .find(|example| example.file_path.ends_with("latin1.cs"))
        .expect("latin1 example");
    assert_eq!(latin1.code, "// caf\u{FFFD}\n");
}

#[test]
fn non_utf8_document_is_decoded_lossily() {
    let dir = scenario_a();
    let mut raw = topic_doc("acentos", "Acentos").into_bytes();
    raw.extend_from_slice(b"Ol\xe1\n");
    write(&dir.path().join("data/content/acentos/topic.mdx"), "");
    fs::write(dir.path().join("data/content/acentos/topic.mdx"), raw).unwrap();

    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    let topic = result.catalog.topic_by_slug("acentos").expect("acentos topic");
    assert!(topic.content.ends_with("Ol\u{FFFD}"));
}

#[test]
fn dangling_roadmap_reference_is_tolerated() {
    let dir = scenario_a();
    write(
        &dir.path().join("data/registry/roadmaps/backend.yaml"),
        r#"
roadmap: backend
name: Backend
description: Caminho backend
icon: server
stages:
  - slug: base
    name: Base
    description: Primeiros passos
    order: 1
    topics: [arrays, ghost]
"#,
    );

    let catalog = aggregate(&ContentSources::new(dir.path()))
        .expect("aggregate")
        .catalog;
    let roadmap = catalog.roadmap_by_slug("backend").expect("roadmap");
    assert_eq!(roadmap.stages[0].topics, vec!["arrays", "ghost"]);
    assert!(catalog.topic_by_slug("ghost").is_none());
}

#[test]
fn rooms_sort_by_order_and_roadmaps_by_name() {
    let dir = scenario_a();
    let root = dir.path();
    write(
        &root.join("data/registry/rooms/aaa-frontend.yaml"),
        "room: frontend\nname: Frontend\norder: 2\ncategories: []\n",
    );
    write(
        &root.join("data/registry/rooms/zzz-intro.yaml"),
        "room: intro\nname: Intro\norder: 0\n",
    );
    write(
        &root.join("data/registry/roadmaps/a.yaml"),
        "roadmap: zeta\nname: Zeta\nstages: []\n",
    );
    write(
        &root.join("data/registry/roadmaps/b.yaml"),
        "roadmap: alpha\nname: alpha\nstages: []\n",
    );

    let catalog = aggregate(&ContentSources::new(root)).expect("aggregate").catalog;
    let rooms: Vec<&str> = catalog.rooms.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(rooms, vec!["intro", "fundamentos", "frontend"]);
    let roadmaps: Vec<&str> = catalog.roadmaps.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(roadmaps, vec!["alpha", "Zeta"]);
}

#[test]
fn aggregation_is_idempotent() {
    let dir = scenario_a();
    let sources = ContentSources::new(dir.path());
    let first = aggregate(&sources).expect("first pass");
    let second = aggregate(&sources).expect("second pass");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.catalog).unwrap(),
        serde_json::to_string(&second.catalog).unwrap()
    );
}

#[test]
fn runner_is_stripped_from_languages() {
    let dir = scenario_a();
    let catalog = aggregate(&ContentSources::new(dir.path()))
        .expect("aggregate")
        .catalog;
    let json = serde_json::to_value(&catalog.languages).unwrap();
    assert!(json[0].get("runner").is_none());
    assert_eq!(json[0]["ext"], ".py");
}

#[test]
fn empty_project_aggregates_to_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let result = aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    assert_eq!(result.catalog, Default::default());
}

#[test]
fn malformed_room_fails_the_pass() {
    let dir = scenario_a();
    write(
        &dir.path().join("data/registry/rooms/broken.yaml"),
        "room: [unclosed\n",
    );
    let err = aggregate(&ContentSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, ContentError::Yaml { .. }));
}

#[test]
fn malformed_language_fails_the_pass() {
    let dir = scenario_a();
    write(&dir.path().join("data/languages/go.json"), "{\"id\": \"go\"");
    let err = aggregate(&ContentSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, ContentError::Json { .. }));
}

#[test]
fn document_without_slug_fails_the_pass() {
    let dir = scenario_a();
    write(
        &dir.path().join("data/content/x/untitled/topic.mdx"),
        "---\ntitle: Untitled\n---\nBody\n",
    );
    let err = aggregate(&ContentSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, ContentError::MissingSlug { .. }));
}

#[test]
fn configured_source_directories_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("langs/python.json"), PYTHON);
    write(&root.join("reg/rooms/fundamentos.yaml"), ROOM);
    write(&root.join("docs/arrays/topic.mdx"), &topic_doc("arrays", "Arrays"));
    write(
        &root.join("themelion.toml"),
        "[sources]\ncontent = \"docs\"\nregistry = \"reg\"\nlanguages = \"langs\"\n",
    );

    let config = ProjectConfig::load(root).expect("config");
    let catalog = aggregate(&ContentSources::from_config(root, &config))
        .expect("aggregate")
        .catalog;
    assert_eq!(catalog.languages.len(), 1);
    assert_eq!(catalog.topics[0].content_path, "docs/arrays/topic.mdx");
    assert_eq!(
        catalog.rooms[0].categories[0].topics[0].status,
        TopicStatus::Implemented
    );
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn every_stage_logs_its_count_and_duration() {
    let dir = scenario_a();
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        aggregate(&ContentSources::new(dir.path())).expect("aggregate");
    });

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    for (message, count) in [
        ("languages loaded", "language_count=1"),
        ("rooms loaded", "room_count=1"),
        ("roadmaps loaded", "roadmap_count=0"),
        ("topics loaded", "topic_count=1"),
    ] {
        let line = text
            .lines()
            .find(|line| line.contains(message))
            .unwrap_or_else(|| panic!("no `{message}` event in:\n{text}"));
        assert!(line.contains(count), "{line}");
        assert!(line.contains("duration_ms="), "{line}");
    }
}
