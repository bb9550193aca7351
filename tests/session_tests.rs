//! Session tests: the full open action from schema file to images

use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use xsdgraph::config::{AppConfig, RenderConfig};
use xsdgraph::error::{Error, Result};
use xsdgraph::loaders::Loader;
use xsdgraph::render::Renderer;
use xsdgraph::{Category, SchemaGraph, Session};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Renders successfully until `fail_at` calls have been made
struct FlakyRenderer {
    calls: Cell<usize>,
    fail_at: usize,
}

impl FlakyRenderer {
    fn failing_at(fail_at: usize) -> Self {
        Self {
            calls: Cell::new(0),
            fail_at,
        }
    }
}

impl Renderer for FlakyRenderer {
    fn render(&self, graph: &SchemaGraph, output: &Path) -> Result<()> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call >= self.fail_at {
            return Err(Error::Render("layout engine exited with status 1".to_string()));
        }
        std::fs::write(output, format!("{} nodes", graph.node_count()))?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "png"
    }
}

#[test]
fn test_open_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(Loader::new(), FlakyRenderer::failing_at(usize::MAX), dir.path());

    let opened = session.open(&fixture("scenario_a.xsd")).unwrap();
    assert!(opened.source.ends_with("scenario_a.xsd"));
    assert_eq!(opened.graphs.import.node_count(), 2);

    let images: Vec<(Category, PathBuf)> = opened
        .images
        .iter()
        .map(|image| (image.category, image.path.clone()))
        .collect();
    assert_eq!(
        images,
        vec![
            (Category::Import, dir.path().join("import_xsd_graph.png")),
            (Category::Export, dir.path().join("export_xsd_graph.png")),
        ]
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("import_xsd_graph.png")).unwrap(),
        "2 nodes"
    );
}

#[test]
fn test_render_failure_keeps_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    // Third render call fails: the first open succeeds, the second fails midway
    let mut session = Session::new(Loader::new(), FlakyRenderer::failing_at(3), dir.path());

    session.open(&fixture("scenario_a.xsd")).unwrap();
    let err = session.open(&fixture("scenario_b.xsd")).unwrap_err();
    assert!(matches!(err, Error::Render(_)));

    let graphs = session.graphs().unwrap();
    assert!(graphs.import.contains_edge("importUser", "importAddress"));
    assert!(graphs.export.is_empty());
    assert_eq!(session.images().len(), 2);
}

#[test]
fn test_export_failure_keeps_previous_images() {
    let dir = tempfile::tempdir().unwrap();
    // Fourth render call fails: the second open renders import, then fails on export
    let mut session = Session::new(Loader::new(), FlakyRenderer::failing_at(4), dir.path());

    session.open(&fixture("scenario_a.xsd")).unwrap();
    let import_image = dir.path().join("import_xsd_graph.png");
    assert_eq!(std::fs::read_to_string(&import_image).unwrap(), "2 nodes");

    let err = session.open(&fixture("scenario_b.xsd")).unwrap_err();
    assert!(matches!(err, Error::Render(_)));

    assert!(session.current().unwrap().source.ends_with("scenario_a.xsd"));
    assert_eq!(std::fs::read_to_string(&import_image).unwrap(), "2 nodes");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("export_xsd_graph.png")).unwrap(),
        "0 nodes"
    );

    // No staging files are left behind
    let mut entries: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["export_xsd_graph.png", "import_xsd_graph.png"]);
}

#[test]
fn test_missing_file_keeps_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(Loader::new(), FlakyRenderer::failing_at(usize::MAX), dir.path());

    let err = session.open(&fixture("does_not_exist.xsd")).unwrap_err();
    assert!(matches!(err, Error::Resource(_)));
    assert!(session.current().is_none());
}

#[test]
fn test_output_dir_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("graphs").join("latest");
    let mut session = Session::new(Loader::new(), FlakyRenderer::failing_at(usize::MAX), &nested);

    session.open(&fixture("scenario_d.xsd")).unwrap();
    assert!(nested.join("import_xsd_graph.png").exists());
    assert!(nested.join("export_xsd_graph.png").exists());
}

#[test]
fn test_from_config_uses_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default().with_render(RenderConfig {
        format: "svg".to_string(),
        output_dir: Some(dir.path().to_path_buf()),
        ..RenderConfig::default()
    });

    let session = Session::from_config(&config).unwrap();
    assert_eq!(session.output_dir(), dir.path());
    assert_eq!(
        session.image_path(Category::Export),
        dir.path().join("export_xsd_graph.svg")
    );
}

/// Graphviz stand-in: copies the DOT text from stdin to the `-o` path
#[cfg(unix)]
#[test]
fn test_graphviz_renderer_pipes_dot() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let engine = dir.path().join("fake-dot");
    std::fs::write(&engine, "#!/bin/sh\ncat > \"$3\"\n").unwrap();
    std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();

    let out = dir.path().join("out");
    let config = AppConfig::default().with_render(RenderConfig {
        engine: engine.display().to_string(),
        output_dir: Some(out.clone()),
        ..RenderConfig::default()
    });

    let mut session = Session::from_config(&config).unwrap();
    session.open(&fixture("scenario_a.xsd")).unwrap();

    let import_dot = std::fs::read_to_string(out.join("import_xsd_graph.png")).unwrap();
    assert!(import_dot.contains("\"importUser\" [shape=\"ellipse\"];"));
    assert!(import_dot.contains("\"importUser\" -> \"importAddress\" [arrowhead=\"vee\"];"));

    let export_dot = std::fs::read_to_string(out.join("export_xsd_graph.png")).unwrap();
    assert_eq!(export_dot, "digraph \"export_xsd_graph\" {\n}\n");
}
