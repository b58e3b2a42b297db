//! Navigation engine tests for millr
//!
//! These tests drive the column engine through event sequences, mostly against a synthetic
//! directory tree so no filesystem is needed, and check the state invariants after every
//! transition. The last few run the engine on a real temporary directory.

use millr::app::{ColumnLayout, EngineState, Event, Navigator};
use millr::core::{
    AsciiImage, BrowseError, DirectoryLister, Entry, FilePreviewer, FsLister, Opener,
    PreviewContent, Previewer,
};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::tempdir;

const ROOT: &str = "/t";

/// Every directory under /t holds `a`, `b`, `locked` and `x.txt`; `locked` can't be listed.
struct TreeLister;

impl DirectoryLister for TreeLister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, BrowseError> {
        let locked = path.components().any(|c| c.as_os_str() == "locked");
        if locked || !path.starts_with(ROOT) {
            return Err(BrowseError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        let mut entries = Vec::new();
        if path != Path::new(ROOT)
            && let Some(parent) = path.parent()
        {
            entries.push(Entry::parent_link(parent));
        }
        entries.push(Entry::dir(path.join("a")));
        entries.push(Entry::dir(path.join("b")));
        entries.push(Entry::dir(path.join("locked")));
        entries.push(Entry::file(path.join("x.txt")));
        Ok(entries)
    }
}

/// A hundred numbered lines for every file.
struct LinesPreviewer;

impl Previewer for LinesPreviewer {
    fn preview(&self, _path: &Path) -> Result<PreviewContent, BrowseError> {
        let text = (1..=100).map(|n| format!("line {n}\n")).collect::<String>();
        Ok(PreviewContent::text(text))
    }
}

struct NoopOpener;

impl Opener for NoopOpener {
    fn open(&self, _path: &Path) -> Result<(), BrowseError> {
        Ok(())
    }
}

fn navigator() -> Navigator {
    Navigator::new(
        Box::new(TreeLister),
        Box::new(LinesPreviewer),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    )
}

fn step(nav: &Navigator, state: EngineState, event: Event) -> EngineState {
    let (next, _) = nav.transition(state, event);
    assert!(next.is_consistent(), "invariant broken after {event:?}: {next:#?}");
    next
}

fn run(nav: &Navigator, mut state: EngineState, events: &[Event]) -> EngineState {
    for event in events {
        state = step(nav, state, *event);
    }
    state
}

fn column_paths(state: &EngineState) -> Vec<PathBuf> {
    state.columns().iter().map(|c| c.path().to_path_buf()).collect()
}

#[test]
fn test_invariants_hold_for_random_sequences() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let layout = ColumnLayout::default();

    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = nav.init(Path::new(ROOT), 100, 30)?;

        for _ in 0..400 {
            let event = match rng.random_range(0..13) {
                0 | 1 => Event::MoveUp,
                2 | 3 => Event::MoveDown,
                4 | 5 => Event::Descend,
                6 => Event::Ascend,
                7 => Event::EnterPreview,
                8 => Event::ExitPreview,
                9 => Event::ScrollDown,
                10 => Event::ScrollPageUp,
                11 => Event::Home,
                _ => Event::Resize(rng.random_range(0..240), rng.random_range(0..60)),
            };
            let before = state.columns().len();
            state = step(&nav, state, event);

            assert!(!state.columns().is_empty());
            assert_eq!(state.max_columns(), layout.max_columns(state.width()));
            let expected = layout.column_width(state.width(), state.columns().len());
            assert!(state.columns().iter().all(|c| c.width() == expected));
            if matches!(event, Event::Descend) {
                assert!(state.columns().len() <= before.max(state.max_columns()));
            }
            if let Some(preview) = state.preview() {
                assert!(preview.offset() <= preview.max_offset());
            }
        }
    }
    Ok(())
}

#[test]
fn test_descend_then_ascend_round_trip() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let wide = nav.init(Path::new(ROOT), 200, 30)?;
    let start = run(&nav, wide, &[Event::Descend, Event::MoveDown, Event::Descend]);
    assert_eq!(start.columns().len(), 3);

    let after = run(&nav, start.clone(), &[Event::Descend, Event::Ascend]);
    assert_eq!(after, start);
    Ok(())
}

#[test]
fn test_four_descends_evict_root() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    assert_eq!(start.max_columns(), 3);

    let state = run(
        &nav,
        start,
        &[
            Event::Descend,
            Event::MoveDown,
            Event::Descend,
            Event::MoveDown,
            Event::Descend,
            Event::MoveDown,
            Event::Descend,
        ],
    );
    assert_eq!(state.columns().len(), 3);
    assert_eq!(state.active_index(), 2);
    assert_eq!(
        column_paths(&state),
        vec![
            PathBuf::from("/t/a/a"),
            PathBuf::from("/t/a/a/a"),
            PathBuf::from("/t/a/a/a/a"),
        ]
    );
    assert_eq!(state.visible_range(), 0..3);
    Ok(())
}

#[test]
fn test_eviction_never_grows_past_max() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let mut state = nav.init(Path::new(ROOT), 100, 30)?;
    for _ in 0..10 {
        state = run(&nav, state, &[Event::Descend, Event::MoveDown]);
        assert!(state.columns().len() <= 3);
    }
    assert_eq!(state.columns().len(), 3);
    Ok(())
}

#[test]
fn test_resize_keeps_columns() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 200, 30)?;
    let deep = run(
        &nav,
        start,
        &[Event::Descend, Event::MoveDown, Event::Descend, Event::MoveDown, Event::Descend],
    );
    assert_eq!(deep.columns().len(), 4);
    let paths = column_paths(&deep);

    let narrow = step(&nav, deep.clone(), Event::Resize(64, 30));
    assert_eq!(column_paths(&narrow), paths);
    assert_eq!(narrow.max_columns(), 2);
    assert_eq!(narrow.visible_range(), 2..4);
    assert!(narrow.columns().iter().all(|c| c.width() == 31));

    let tiny = step(&nav, narrow, Event::Resize(10, 5));
    assert_eq!(column_paths(&tiny), paths);
    assert_eq!(tiny.visible_range(), 3..4);

    let back = step(&nav, tiny, Event::Resize(200, 30));
    assert_eq!(back, deep);
    Ok(())
}

#[test]
fn test_preview_round_trip() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    // select x.txt
    let browsing = run(&nav, start, &[Event::MoveDown, Event::MoveDown, Event::MoveDown]);
    assert_eq!(
        browsing.selected_entry().map(|e| e.name_str().into_owned()),
        Some("x.txt".to_string())
    );

    let previewing = step(&nav, browsing.clone(), Event::EnterPreview);
    let preview = previewing.preview().ok_or("preview not open")?;
    assert!(!preview.is_image());
    assert_eq!(preview.line_count(), 100);

    let scrolled = run(
        &nav,
        previewing,
        &[Event::ScrollDown, Event::ScrollPageDown, Event::ScrollUp],
    );
    let preview = scrolled.preview().ok_or("preview not open")?;
    // viewport is 25 rows high: +1 +12 -1
    assert_eq!(preview.height(), 25);
    assert_eq!(preview.offset(), 12);

    let after = step(&nav, scrolled, Event::ExitPreview);
    assert_eq!(after, browsing);
    Ok(())
}

#[test]
fn test_ascend_at_root_is_noop() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = run(&nav, nav.init(Path::new(ROOT), 100, 30)?, &[Event::MoveDown]);
    let (after, outcome) = nav.transition(start.clone(), Event::Ascend);
    assert!(outcome.is_continue());
    assert_eq!(after, start);
    Ok(())
}

#[test]
fn test_failed_descend_leaves_state() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    let state = run(&nav, start, &[Event::Descend, Event::MoveDown, Event::MoveDown, Event::MoveDown]);
    assert_eq!(
        state.selected_entry().map(|e| e.name_str().into_owned()),
        Some("locked".to_string())
    );

    let (after, outcome) = nav.transition(state.clone(), Event::Descend);
    let err = outcome.error().ok_or("descend should fail")?;
    assert!(err.is_io());
    assert_eq!(err.path(), Path::new("/t/a/locked"));
    assert_eq!(after.columns().len(), state.columns().len());
    assert_eq!(after.active_index(), state.active_index());
    assert_eq!(after, state);
    Ok(())
}

#[test]
fn test_failed_descend_at_max_does_not_evict() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 40, 30)?;
    assert_eq!(start.max_columns(), 1);
    let state = run(&nav, start, &[Event::MoveDown, Event::MoveDown]);

    let (after, outcome) = nav.transition(state.clone(), Event::Descend);
    assert!(outcome.error().is_some());
    assert_eq!(after, state);
    Ok(())
}

/// Lists like [TreeLister] until the root is switched off, as if it were removed.
struct VanishingRoot {
    gone: Arc<AtomicBool>,
}

impl DirectoryLister for VanishingRoot {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, BrowseError> {
        if path == Path::new(ROOT) && self.gone.load(Ordering::SeqCst) {
            return Err(BrowseError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
        TreeLister.list(path)
    }
}

/// Counts launches without starting anything.
struct CountingOpener {
    calls: Arc<AtomicUsize>,
}

impl Opener for CountingOpener {
    fn open(&self, _path: &Path) -> Result<(), BrowseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_failed_home_leaves_state() -> Result<(), Box<dyn error::Error>> {
    let gone = Arc::new(AtomicBool::new(false));
    let nav = Navigator::new(
        Box::new(VanishingRoot { gone: gone.clone() }),
        Box::new(LinesPreviewer),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    );
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    let deep = run(&nav, start, &[Event::Descend, Event::MoveDown, Event::Descend]);
    assert_eq!(deep.columns().len(), 3);

    gone.store(true, Ordering::SeqCst);
    let (after, outcome) = nav.transition(deep.clone(), Event::Home);
    let err = outcome.error().ok_or("home should fail")?;
    assert_eq!(err.path(), Path::new(ROOT));
    assert_eq!(after, deep);

    gone.store(false, Ordering::SeqCst);
    let (home, outcome) = nav.transition(after, Event::Home);
    assert!(outcome.is_continue());
    assert_eq!(column_paths(&home), vec![PathBuf::from(ROOT)]);
    Ok(())
}

#[test]
fn test_open_on_directory_is_noop() -> Result<(), Box<dyn error::Error>> {
    let calls = Arc::new(AtomicUsize::new(0));
    let nav = Navigator::new(
        Box::new(TreeLister),
        Box::new(LinesPreviewer),
        Box::new(CountingOpener { calls: calls.clone() }),
        ColumnLayout::default(),
    );
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    assert_eq!(start.selected_entry().map(|e| e.is_dir()), Some(true));

    let (after, outcome) = nav.transition(start.clone(), Event::Open);
    assert!(outcome.is_continue());
    assert_eq!(after, start);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // x.txt goes through
    let file = run(&nav, start, &[Event::MoveDown, Event::MoveDown, Event::MoveDown]);
    let (_, outcome) = nav.transition(file, Event::Open);
    assert!(outcome.is_continue());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_resize_while_previewing_clamps_offset() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new(ROOT), 100, 30)?;
    let mut state = run(
        &nav,
        start,
        &[Event::MoveDown, Event::MoveDown, Event::MoveDown, Event::EnterPreview],
    );
    for _ in 0..80 {
        state = step(&nav, state, Event::ScrollDown);
    }
    let preview = state.preview().ok_or("preview not open")?;
    assert_eq!(preview.height(), 25);
    assert_eq!(preview.offset(), 75);

    let taller = step(&nav, state, Event::Resize(100, 60));
    let preview = taller.preview().ok_or("preview not open")?;
    assert_eq!(preview.height(), 55);
    assert_eq!(preview.max_offset(), 45);
    assert_eq!(preview.offset(), 45);

    // shrinking again keeps the clamped offset
    let shorter = step(&nav, taller, Event::Resize(100, 30));
    assert_eq!(shorter.preview().map(|p| p.offset()), Some(45));
    Ok(())
}

#[test]
fn test_listing_order_on_disk() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("b.txt"), "b")?;
    fs::create_dir(dir.path().join("a"))?;

    let names: Vec<String> = FsLister
        .list(dir.path())?
        .iter()
        .map(|e| e.name_str().into_owned())
        .collect();
    assert_eq!(names, vec!["..", "a", "b.txt"]);
    Ok(())
}

#[test]
fn test_real_directory_session() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let root = dir.path().canonicalize()?;
    fs::create_dir(root.join("docs"))?;
    fs::write(root.join("docs").join("notes.md"), "# notes\n\nhello\n")?;
    image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]))
        .save(root.join("docs").join("logo.png"))?;

    let nav = Navigator::new(
        Box::new(FsLister),
        Box::new(FilePreviewer::new(None, Box::new(AsciiImage::new(8, 4)), 1024, 100)),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    );

    // "..", "docs"
    let state = nav.init(&root, 120, 40)?;
    let state = run(&nav, state, &[Event::MoveDown, Event::Descend]);
    assert_eq!(state.columns().len(), 2);
    assert_eq!(state.columns()[1].path(), root.join("docs"));

    // "..", "logo.png", "notes.md"
    let image = run(&nav, state.clone(), &[Event::MoveDown, Event::EnterPreview]);
    let preview = image.preview().ok_or("image preview not open")?;
    assert!(preview.is_image());
    assert_eq!(preview.content(), "████████\n████████\n████████\n████████");

    let text = run(&nav, state, &[Event::MoveDown, Event::MoveDown, Event::EnterPreview]);
    let preview = text.preview().ok_or("text preview not open")?;
    assert!(!preview.is_image());
    assert_eq!(preview.content(), "# notes\n\nhello\n");
    Ok(())
}

#[test]
fn test_broken_image_does_not_open_preview() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let root = dir.path().canonicalize()?;
    fs::write(root.join("broken.png"), "not a png")?;

    let nav = Navigator::new(
        Box::new(FsLister),
        Box::new(FilePreviewer::default()),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    );
    let state = run(&nav, nav.init(&root, 100, 30)?, &[Event::MoveDown]);
    let (after, outcome) = nav.transition(state.clone(), Event::EnterPreview);
    assert!(outcome.error().is_some_and(|e| e.is_decode()));
    assert!(!after.is_previewing());
    assert_eq!(after, state);
    Ok(())
}
