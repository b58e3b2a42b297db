//! UI-related tests for millr
//!
//! These tests render engine states off-screen, either to plain strings or to a ratatui
//! buffer when styling matters, and check what the user would see: column headers, entry
//! rows, the visible column window, the preview frame and the status line.

use millr::app::{ColumnLayout, EngineState, Event, Navigator};
use millr::config::Theme;
use millr::core::{BrowseError, DirectoryLister, Entry, Opener, PreviewContent, Previewer};
use millr::ui;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use std::collections::HashMap;
use std::error;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// /r -> one -> two -> three -> four, with a few files along the way.
struct ChainLister {
    dirs: HashMap<PathBuf, Vec<Entry>>,
}

impl ChainLister {
    fn new() -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(
            PathBuf::from("/r"),
            vec![Entry::dir("/r/one"), Entry::dir("/r/void"), Entry::file("/r/readme.md")],
        );
        dirs.insert(PathBuf::from("/r/void"), vec![Entry::parent_link(Path::new("/r"))]);
        dirs.insert(
            PathBuf::from("/r/one"),
            vec![
                Entry::parent_link(Path::new("/r")),
                Entry::dir("/r/one/two"),
                Entry::file("/r/one/logo.png"),
            ],
        );
        dirs.insert(
            PathBuf::from("/r/one/two"),
            vec![Entry::parent_link(Path::new("/r/one")), Entry::dir("/r/one/two/three")],
        );
        dirs.insert(
            PathBuf::from("/r/one/two/three"),
            vec![
                Entry::parent_link(Path::new("/r/one/two")),
                Entry::dir("/r/one/two/three/four"),
            ],
        );
        dirs.insert(
            PathBuf::from("/r/one/two/three/four"),
            vec![Entry::parent_link(Path::new("/r/one/two/three"))],
        );
        Self { dirs }
    }
}

impl DirectoryLister for ChainLister {
    fn list(&self, path: &Path) -> Result<Vec<Entry>, BrowseError> {
        self.dirs.get(path).cloned().ok_or_else(|| {
            BrowseError::io(path, io::Error::new(io::ErrorKind::NotFound, "not found"))
        })
    }
}

struct StubPreviewer;

impl Previewer for StubPreviewer {
    fn preview(&self, path: &Path) -> Result<PreviewContent, BrowseError> {
        if path.extension().is_some_and(|e| e == "png") {
            Ok(PreviewContent::image("████\n▒▒▒▒"))
        } else {
            Ok(PreviewContent::text("first line\nsecond line\n"))
        }
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
        Box::new(ChainLister::new()),
        Box::new(StubPreviewer),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    )
}

fn run(nav: &Navigator, mut state: EngineState, events: &[Event]) -> EngineState {
    for event in events {
        state = nav.transition(state, *event).0;
    }
    state
}

fn lines(rendered: &str) -> Vec<&str> {
    rendered.split('\n').collect()
}

/// A single directory whose file names need cleaning before they reach the screen.
struct AwkwardNames;

impl DirectoryLister for AwkwardNames {
    fn list(&self, _path: &Path) -> Result<Vec<Entry>, BrowseError> {
        Ok(vec![
            Entry::file(format!("/w/{}", "a".repeat(80))),
            Entry::file("/w/bell\u{7}.txt"),
            Entry::file("/w/tab\tname"),
        ])
    }
}

#[test]
fn test_entry_names_are_cleaned_and_clipped() -> Result<(), Box<dyn error::Error>> {
    let nav = Navigator::new(
        Box::new(AwkwardNames),
        Box::new(StubPreviewer),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    );
    let state = nav.init(Path::new("/w"), 40, 6)?;
    assert_eq!(state.columns()[0].width(), 38);

    let out = ui::render_to_string(&state, &Theme::default(), None, 40, 6);
    let rows = lines(&out);
    for row in &rows[..5] {
        // the long name stops short of the border instead of pushing it
        assert_eq!(row.chars().nth(37), Some('│'), "row {:?}", row);
        assert!(!row.chars().any(char::is_control), "row {:?}", row);
    }
    assert_eq!(rows[1], format!("  {}│", "a".repeat(35)));
    assert!(rows[2].starts_with("  bell.txt "), "row {:?}", rows[2]);
    assert!(rows[3].starts_with("  tab name "), "row {:?}", rows[3]);
    Ok(())
}

#[test]
fn test_preview_shows_exit_mark() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new("/r"), 40, 10)?;
    let browsing = ui::render_to_string(&start, &Theme::default(), None, 40, 10);
    assert!(!browsing.contains("[x]"));

    let previewing = run(&nav, start, &[Event::MoveDown, Event::MoveDown, Event::EnterPreview]);
    let out = ui::render_to_string(&previewing, &Theme::default(), None, 40, 10);
    let top = lines(&out)[0];
    // the clickable close mark sits at the right end of the top border
    assert!(top.ends_with(" [x] ╮"), "top: {:?}", top);
    assert_eq!(top.chars().count(), 40);
    Ok(())
}

#[test]
fn test_single_column_rows() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = nav.init(Path::new("/r"), 60, 8)?;
    let out = ui::render_to_string(&state, &Theme::default(), None, 60, 8);
    let rows = lines(&out);

    assert_eq!(rows.len(), 8);
    assert!(rows[0].starts_with(" r"), "header: {:?}", rows[0]);
    assert!(rows[1].starts_with("▶ one"), "row: {:?}", rows[1]);
    assert!(rows[2].starts_with("▶ void"), "row: {:?}", rows[2]);
    assert!(rows[3].starts_with("  readme.md"), "row: {:?}", rows[3]);
    // status line: selected path and its (unknown) modification time
    assert_eq!(rows[7], "/r/one  -");
    Ok(())
}

#[test]
fn test_only_active_column_highlights() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = run(&nav, nav.init(Path::new("/r"), 100, 10)?, &[Event::Descend]);
    assert_eq!(state.columns().len(), 2);
    assert_eq!(state.columns()[0].width(), 49);

    let area = Rect::new(0, 0, 100, 10);
    let mut buf = Buffer::empty(area);
    ui::draw(&mut buf, area, &state, &Theme::default(), None);

    let reversed = |x: u16, y: u16| {
        buf.cell((x, y))
            .is_some_and(|c| c.modifier.contains(Modifier::REVERSED))
    };
    // both columns select their first row
    assert!(!reversed(2, 1), "inactive column must not highlight");
    assert!(reversed(51, 1), "active column highlights its selection");
    assert!(!reversed(51, 2));
    Ok(())
}

#[test]
fn test_column_borders_line_up() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = run(
        &nav,
        nav.init(Path::new("/r"), 100, 6)?,
        &[Event::Descend, Event::MoveDown, Event::Descend],
    );
    assert_eq!(state.columns().len(), 3);

    let out = ui::render_to_string(&state, &Theme::default(), None, 100, 6);
    for row in lines(&out).iter().take(5) {
        let cells: Vec<char> = row.chars().collect();
        // uniform width of 32: right borders at 31, 63 and 95
        for x in [31, 63, 95] {
            assert_eq!(cells.get(x), Some(&'│'), "row {:?}", row);
        }
    }
    Ok(())
}

#[test]
fn test_empty_column_placeholder() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = run(
        &nav,
        nav.init(Path::new("/r"), 60, 6)?,
        &[Event::MoveDown, Event::Descend],
    );
    // "/r/void" only holds ".."; the placeholder is for directories without entries
    let out = ui::render_to_string(&state, &Theme::default(), None, 60, 6);
    assert!(!out.contains("[Empty]"));

    let empty = tempdir()?;

    // a column with no entries at all
    struct NothingLister;
    impl DirectoryLister for NothingLister {
        fn list(&self, _path: &Path) -> Result<Vec<Entry>, BrowseError> {
            Ok(Vec::new())
        }
    }
    let bare = Navigator::new(
        Box::new(NothingLister),
        Box::new(StubPreviewer),
        Box::new(NoopOpener),
        ColumnLayout::default(),
    );
    let state = bare.init(empty.path(), 60, 6)?;
    let out = ui::render_to_string(&state, &Theme::default(), None, 60, 6);
    let rows = lines(&out);
    // one column of width 58, its right border at x = 57
    assert_eq!(rows[1], format!("{:<57}│", "  [Empty]"));
    assert_eq!(rows[5], "");
    Ok(())
}

#[test]
fn test_only_visible_window_is_drawn() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = run(
        &nav,
        nav.init(Path::new("/r"), 100, 6)?,
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

    let out = ui::render_to_string(&state, &Theme::default(), None, 100, 6);
    let header = lines(&out)[0];
    assert!(header.starts_with(" two"), "header: {:?}", header);
    assert!(header.contains(" three"));
    assert!(header.contains(" four"));
    assert!(!header.contains("one"));
    assert!(!header.starts_with(" r "));
    Ok(())
}

#[test]
fn test_preview_frames() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let start = nav.init(Path::new("/r"), 40, 10)?;

    let text = run(&nav, start.clone(), &[Event::MoveDown, Event::MoveDown, Event::EnterPreview]);
    assert!(text.is_previewing());
    let out = ui::render_to_string(&text, &Theme::default(), None, 40, 10);
    let rows = lines(&out);
    assert!(rows[0].contains(" File Preview "), "title: {:?}", rows[0]);
    assert!(rows[0].starts_with('╭'));
    // border then one cell of padding
    assert!(rows[2].starts_with("│ first line"), "row: {:?}", rows[2]);
    assert!(rows[3].starts_with("│ second line"));
    assert!(rows[8].starts_with('╰'));
    assert_eq!(rows[9], "/r/readme.md  -");

    let image = run(&nav, start, &[Event::Descend, Event::MoveDown, Event::MoveDown, Event::EnterPreview]);
    let out = ui::render_to_string(&image, &Theme::default(), None, 40, 10);
    let rows = lines(&out);
    assert!(rows[0].contains(" Image Preview "), "title: {:?}", rows[0]);
    assert!(rows[2].starts_with("│ ████"));
    assert!(rows[3].starts_with("│ ▒▒▒▒"));
    Ok(())
}

#[test]
fn test_preview_scroll_offset_is_rendered() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let text = run(
        &nav,
        nav.init(Path::new("/r"), 40, 6)?,
        &[Event::MoveDown, Event::MoveDown, Event::EnterPreview, Event::ScrollDown],
    );
    // viewport of a single row over two lines
    let preview = text.preview().ok_or("preview not open")?;
    assert_eq!(preview.height(), 1);
    assert_eq!(preview.offset(), 1);

    let out = ui::render_to_string(&text, &Theme::default(), None, 40, 6);
    assert!(lines(&out)[2].starts_with("│ second line"));
    Ok(())
}

#[test]
fn test_status_message_replaces_path() -> Result<(), Box<dyn error::Error>> {
    let nav = navigator();
    let state = nav.init(Path::new("/r"), 60, 5)?;
    let out = ui::render_to_string(
        &state,
        &Theme::default(),
        Some("/r/one: permission denied"),
        60,
        5,
    );
    assert_eq!(lines(&out)[4], "/r/one: permission denied");
    Ok(())
}
