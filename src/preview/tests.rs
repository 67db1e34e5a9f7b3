use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::*;

/// Surface that keeps every committed document, in commit order.
#[derive(Clone, Default)]
struct RecordingSurface {
    commits: Arc<Mutex<Vec<String>>>,
}

impl RecordingSurface {
    fn history(&self) -> Vec<String> {
        self.commits.lock().clone()
    }
}

impl RenderingSurface for RecordingSurface {
    fn name(&self) -> &str {
        "recording"
    }

    fn replace(&mut self, document: &CompositeDocument) -> Result<(), SurfaceError> {
        self.commits.lock().push(document.as_str().to_string());
        Ok(())
    }
}

struct FailingSurface;

impl RenderingSurface for FailingSurface {
    fn name(&self) -> &str {
        "failing"
    }

    fn replace(&mut self, _: &CompositeDocument) -> Result<(), SurfaceError> {
        Err(SurfaceError::Io {
            path: PathBuf::from("/dev/full"),
            source: std::io::Error::new(std::io::ErrorKind::StorageFull, "no space left"),
        })
    }
}

fn attached(panels: Panels) -> (PreviewAssembler<Panels>, MemorySurface) {
    let surface = MemorySurface::new();
    let mut assembler = PreviewAssembler::new(panels, Skeleton::default());
    assembler.attach_surface(Box::new(surface.clone()));
    (assembler, surface)
}

fn expected(structure: &str, style: &str, behavior: &str) -> String {
    compose(
        &Snapshot::new(structure, style, behavior),
        &Skeleton::default(),
    )
    .into_string()
}

#[test]
fn test_refresh_scenario() {
    let (mut assembler, surface) =
        attached(Panels::new("<p>hi</p>", "p{color:red}", "console.log(1)"));

    assembler.refresh().unwrap();

    let doc = assembler.compose();
    assert_eq!(doc.section(Section::Style), "p{color:red}");
    assert_eq!(doc.section(Section::Body), "<p>hi</p>");
    assert_eq!(doc.section(Section::Behavior), "console.log(1)");
    assert_eq!(surface.content(), doc.as_str());
}

#[test]
fn test_refresh_without_surface() {
    let mut assembler = PreviewAssembler::new(Panels::default(), Skeleton::default());

    let err = assembler.refresh().unwrap_err();
    assert!(matches!(err, RefreshError::SurfaceUnavailable));
    assert!(!assembler.is_attached());
}

#[test]
fn test_refresh_after_detach() {
    let (mut assembler, surface) = attached(Panels::default());
    assembler.refresh().unwrap();

    assert!(assembler.detach_surface().is_some());
    assert!(matches!(
        assembler.refresh(),
        Err(RefreshError::SurfaceUnavailable)
    ));
    assert_eq!(surface.commits(), 1);
}

#[test]
fn test_attach_returns_previous_surface() {
    let (mut assembler, _) = attached(Panels::default());
    let previous = assembler.attach_surface(Box::new(MemorySurface::new()));
    assert_eq!(previous.map(|s| s.name().to_string()), Some("memory".into()));
}

#[test]
fn test_surface_error_is_reported() {
    let mut assembler = PreviewAssembler::new(Panels::default(), Skeleton::default());
    assembler.attach_surface(Box::new(FailingSurface));

    let err = assembler.refresh().unwrap_err();
    assert!(matches!(
        err,
        RefreshError::Surface(SurfaceError::Io { .. })
    ));
}

#[test]
fn test_refresh_is_idempotent() {
    let (mut assembler, surface) = attached(Panels::new("<b>x</b>", "b{}", "let x = 1;"));

    assembler.refresh().unwrap();
    let first = surface.content();
    let first_doc = assembler.compose();

    assembler.refresh().unwrap();
    let second = surface.content();

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(first_doc.as_bytes(), assembler.compose().as_bytes());
    // No duplicated embedded blocks
    assert_eq!(second.matches("<style>").count(), 1);
    assert_eq!(second.matches("<script>").count(), 1);
    assert_eq!(surface.commits(), 2);
}

#[test]
fn test_replacement_never_accumulates() {
    let (mut assembler, surface) = attached(Panels::new("<p>ONE</p>", ".one{}", "one()"));
    assembler.refresh().unwrap();

    assembler
        .sources_mut()
        .set(SourceRole::Structure, "<p>TWO</p>");
    assembler.sources_mut().set(SourceRole::Style, ".two{}");
    assembler.sources_mut().set(SourceRole::Behavior, "two()");
    assembler.refresh().unwrap();

    let content = surface.content();
    assert_eq!(content, expected("<p>TWO</p>", ".two{}", "two()"));
    assert!(!content.contains("ONE"));
    assert_eq!(content.matches("<!DOCTYPE html>").count(), 1);
}

#[test]
fn test_empty_sources_refresh() {
    let (mut assembler, surface) = attached(Panels::default());

    assembler.refresh().unwrap();

    let content = surface.content();
    assert_eq!(content, expected("", "", ""));
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("<body>"));
    assert!(content.trim_end().ends_with("</html>"));
}

#[test]
fn test_last_write_wins_sequential() {
    let (mut assembler, surface) = attached(Panels::default());

    // S1 then S2 triggered back to back, no refresh observed in between
    assembler.sources_mut().set(SourceRole::Structure, "<p>s1</p>");
    assembler.refresh().unwrap();
    assembler.sources_mut().set(SourceRole::Structure, "<p>s2</p>");
    assembler.sources_mut().set(SourceRole::Style, "p{color:blue}");
    assembler.refresh().unwrap();

    assert_eq!(surface.content(), expected("<p>s2</p>", "p{color:blue}", ""));
}

#[test]
fn test_every_commit_is_one_whole_snapshot() {
    let recorder = RecordingSurface::default();
    let mut assembler = PreviewAssembler::new(Panels::default(), Skeleton::default());
    assembler.attach_surface(Box::new(recorder.clone()));

    let inputs = [
        ("<p>a</p>", "a{}", "a()"),
        ("<p>b</p>", "b{}", "b()"),
        ("<p>c</p>", "c{}", "c()"),
    ];
    for (h, c, j) in inputs {
        let sources = assembler.sources_mut();
        sources.set(SourceRole::Structure, h);
        sources.set(SourceRole::Style, c);
        sources.set(SourceRole::Behavior, j);
        assembler.refresh().unwrap();
    }

    let history = recorder.history();
    assert_eq!(history.len(), 3);
    for (commit, (h, c, j)) in history.iter().zip(inputs) {
        assert_eq!(commit, &expected(h, c, j));
    }
}

#[test]
fn test_last_write_wins_across_threads() {
    let surface = MemorySurface::new();
    let recorder = RecordingSurface::default();
    let assembler = {
        let mut assembler = PreviewAssembler::new(Panels::default(), Skeleton::default());
        assembler.attach_surface(Box::new(recorder.clone()));
        Arc::new(Mutex::new(assembler))
    };

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let assembler = Arc::clone(&assembler);
            std::thread::spawn(move || {
                let mut assembler = assembler.lock();
                let sources = assembler.sources_mut();
                sources.set(SourceRole::Structure, format!("<p>{i}</p>"));
                sources.set(SourceRole::Style, format!(".t{i}{{}}"));
                sources.set(SourceRole::Behavior, format!("run({i})"));
                assembler.refresh().unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Final state is exactly the last committed document
    let history = recorder.history();
    assert_eq!(history.len(), 8);
    let last = history.last().unwrap().clone();
    let matching: Vec<_> = (0..8)
        .filter(|i| last == expected(&format!("<p>{i}</p>"), &format!(".t{i}{{}}"), &format!("run({i})")))
        .collect();
    assert_eq!(matching.len(), 1);

    // Re-committing into a memory surface reproduces it byte for byte
    let mut assembler = assembler.lock();
    assembler.attach_surface(Box::new(surface.clone()));
    assembler.refresh().unwrap();
    assert_eq!(surface.content(), last);
}

#[test]
fn test_skeleton_change_applies_on_next_refresh() {
    let (mut assembler, surface) = attached(Panels::new("<p>x</p>", "", ""));
    assembler.refresh().unwrap();

    assembler.set_skeleton(Skeleton {
        title: "Playground".into(),
        scripts: vec!["https://code.jquery.com/jquery.min.js".into()],
        ..Skeleton::default()
    });
    assembler.refresh().unwrap();

    let content = surface.content();
    assert!(content.contains("<title>Playground</title>"));
    assert!(content.contains("<script src=\"https://code.jquery.com/jquery.min.js\"></script>"));
    assert_eq!(assembler.compose().section(Section::Body), "<p>x</p>");
}

#[test]
fn test_file_sources_into_file_surface() {
    let temp = tempfile::TempDir::new().unwrap();
    let paths = SourcePaths::in_dir(temp.path());
    std::fs::write(&paths.structure, "<p>hi</p>").unwrap();
    std::fs::write(&paths.style, "p{color:red}").unwrap();
    std::fs::write(&paths.behavior, "console.log(1)").unwrap();

    let output = temp.path().join("preview.html");
    let mut assembler =
        PreviewAssembler::new(FileSources::open(paths).unwrap(), Skeleton::default());
    assembler.attach_surface(Box::new(FileSurface::new(&output)));
    assembler.refresh().unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, expected("<p>hi</p>", "p{color:red}", "console.log(1)"));
}
