//! Shared fixtures: a mutable node source and recording collaborators.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use outline::{
    Clipboard, Collaborators, EventResult, EventSink, FileOperations, Node, NodeSource,
    OperationId, OutlineConfig, OutlineController, PointerEvent, Rect, SharedFlags, WindowLimit,
};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Node source backed by a tree the test can rewrite between reloads.
#[derive(Clone, Default)]
pub struct TreeSource(pub Rc<RefCell<Vec<Node>>>);

impl NodeSource for TreeSource {
    fn roots(&self) -> Vec<Node> {
        self.0.borrow().clone()
    }
}

/// Every call the controller made to the file-operation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    OpenNewTab(String),
    OpenInSystemBrowser(String),
    PromptRename(OperationId, String),
    ConfirmAndDelete(OperationId, Vec<String>, bool),
    CreateFolder(OperationId, String),
    Paste(OperationId, String),
    Move(OperationId, String),
    FullRefresh,
}

#[derive(Clone, Default)]
pub struct RecordingFiles(pub Rc<RefCell<Vec<Call>>>);

impl FileOperations for RecordingFiles {
    fn open_new_tab(&mut self, path: &str) {
        self.0.borrow_mut().push(Call::OpenNewTab(path.to_string()));
    }

    fn open_in_system_browser(&mut self, path: &str) {
        self.0
            .borrow_mut()
            .push(Call::OpenInSystemBrowser(path.to_string()));
    }

    fn prompt_rename(&mut self, op: OperationId, path: &str) {
        self.0
            .borrow_mut()
            .push(Call::PromptRename(op, path.to_string()));
    }

    fn confirm_and_delete(&mut self, op: OperationId, paths: &[String], show_prompt: bool) {
        self.0
            .borrow_mut()
            .push(Call::ConfirmAndDelete(op, paths.to_vec(), show_prompt));
    }

    fn create_folder(&mut self, op: OperationId, parent: &str) {
        self.0
            .borrow_mut()
            .push(Call::CreateFolder(op, parent.to_string()));
    }

    fn paste_from_clipboard(&mut self, op: OperationId, target: &str) {
        self.0.borrow_mut().push(Call::Paste(op, target.to_string()));
    }

    fn move_from_clipboard(&mut self, op: OperationId, target: &str) {
        self.0.borrow_mut().push(Call::Move(op, target.to_string()));
    }

    fn full_refresh(&mut self) {
        self.0.borrow_mut().push(Call::FullRefresh);
    }
}

#[derive(Debug, Default)]
pub struct ClipboardState {
    pub holds_file: bool,
    pub writes: Vec<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct FakeClipboard(pub Rc<RefCell<ClipboardState>>);

impl Clipboard for FakeClipboard {
    fn holds_file_reference(&self) -> bool {
        self.0.borrow().holds_file
    }

    fn write_file_references(&mut self, paths: &[String]) {
        let mut state = self.0.borrow_mut();
        state.holds_file = true;
        state.writes.push(paths.to_vec());
    }
}

#[derive(Clone)]
pub struct FakeWindows {
    pub count: Rc<Cell<usize>>,
    pub max: usize,
}

impl WindowLimit for FakeWindows {
    fn window_count(&self) -> usize {
        self.count.get()
    }

    fn max_windows(&self) -> usize {
        self.max
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub forwarded: RefCell<Vec<PointerEvent>>,
}

impl EventSink for RecordingSink {
    fn pointer_down(&self, event: &PointerEvent) -> EventResult {
        self.forwarded.borrow_mut().push(*event);
        EventResult::Consumed
    }
}

/// Sample tree. With `/home` expanded the rows are:
///
/// ```text
/// 0 /home
/// 1 /home/a
/// 2 /home/b
/// 3 /home/c
/// 4 /tmp
/// 5 /var
/// ```
pub fn sample_tree() -> Vec<Node> {
    vec![
        Node::new("/home", "home").children_from([
            Node::new("/home/a", "a"),
            Node::new("/home/b", "b"),
            Node::new("/home/c", "c"),
        ]),
        Node::new("/tmp", "tmp"),
        Node::new("/var", "var"),
    ]
}

pub struct Harness {
    pub controller: OutlineController,
    pub flags: SharedFlags,
    pub tree: Rc<RefCell<Vec<Node>>>,
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub clipboard: Rc<RefCell<ClipboardState>>,
    pub window_count: Rc<Cell<usize>>,
    pub sink: Rc<RecordingSink>,
}

pub const MAX_WINDOWS: usize = 3;

pub fn harness() -> Harness {
    harness_with(OutlineConfig::default())
}

/// Controller over [`sample_tree`] with `/home` expanded, a 40x20
/// viewport at the origin (row N is at y = N) and a next responder.
pub fn harness_with(config: OutlineConfig) -> Harness {
    init_logging();

    let flags = SharedFlags::new();
    let tree = Rc::new(RefCell::new(sample_tree()));
    let files = RecordingFiles::default();
    let clipboard = FakeClipboard::default();
    let windows = FakeWindows {
        count: Rc::new(Cell::new(1)),
        max: MAX_WINDOWS,
    };

    let calls = files.0.clone();
    let clipboard_state = clipboard.0.clone();
    let window_count = windows.count.clone();

    let mut controller = OutlineController::new(
        config,
        flags.clone(),
        TreeSource(tree.clone()),
        Collaborators::new(files, clipboard, windows),
    )
    .expect("valid config");
    controller.set_viewport(Rect::new(0, 0, 40, 20));
    controller.expand("/home");

    let sink = Rc::new(RecordingSink::default());
    let responder: Rc<dyn EventSink> = sink.clone();
    controller.set_next_responder(&responder);

    controller.drain_events();

    Harness {
        controller,
        flags,
        tree,
        calls,
        clipboard: clipboard_state,
        window_count,
        sink,
    }
}

impl Harness {
    pub fn click(&mut self, row: u16) -> EventResult {
        self.controller.on_mouse_down(&PointerEvent::primary(2, row))
    }

    pub fn right_click(&mut self, row: u16) -> bool {
        self.controller
            .on_right_mouse_down(&PointerEvent::secondary(2, row))
            .is_some()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| **c == Call::FullRefresh)
            .count()
    }

    /// Visibly highlighted nodes.
    pub fn highlighted(&self) -> Vec<String> {
        self.controller.selected_paths()
    }
}
