//! Display state the animators drive: one cell per array element, a highlight
//! per cell, a message line and a narrative log.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data_models::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Low,
    Mid,
    High,
    Found,
    /// About to be repositioned by the sort animation.
    Moving,
}

impl Highlight {
    fn marker(self) -> &'static str {
        match self {
            Highlight::Low => "L",
            Highlight::Mid => "M",
            Highlight::High => "H",
            Highlight::Found => "*",
            Highlight::Moving => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Muted,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn muted(text: impl Into<String>) -> Message {
        Message {
            kind: MessageKind::Muted,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Message {
        Message {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Message {
        Message {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Message {
        Message {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            MessageKind::Muted => "..",
            MessageKind::Info => "ii",
            MessageKind::Success => "ok",
            MessageKind::Error => "!!",
        };
        write!(f, "[{tag}] {}", self.text)
    }
}

pub trait View: Send + 'static {
    /// Replaces the displayed cells and drops every highlight.
    fn render_array(&mut self, values: &[f64]);

    /// Out-of-range indices are ignored.
    fn highlight(&mut self, index: usize, highlight: Highlight);

    fn clear_highlights(&mut self);

    /// Clears every highlight, then highlights a single cell.
    fn focus(&mut self, index: usize, highlight: Highlight) {
        self.clear_highlights();
        self.highlight(index, highlight);
    }

    /// The element at `from` in the current layout travels to `to` in the
    /// layout that `render_array` will finalize.
    fn move_element(&mut self, from: usize, to: usize);

    fn set_message(&mut self, message: Message);

    fn narrate(&mut self, line: String);

    /// Back to the empty state of a fresh session.
    fn reset(&mut self);
}

/// Keeps everything in memory; what tests inspect.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    pub values: Vec<f64>,
    pub highlights: BTreeMap<usize, Highlight>,
    pub message: Option<Message>,
    pub log: Vec<String>,
    pub moves: Vec<(usize, usize)>,
    /// Highlight state after every highlight change.
    pub history: Vec<BTreeMap<usize, Highlight>>,
    pub mutations: usize,
}

impl RecordingView {
    pub fn new() -> RecordingView {
        RecordingView::default()
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    fn snapshot(&mut self) {
        self.history.push(self.highlights.clone());
    }
}

impl View for RecordingView {
    fn render_array(&mut self, values: &[f64]) {
        self.mutations += 1;
        self.values = values.to_vec();
        self.highlights.clear();
    }

    fn highlight(&mut self, index: usize, highlight: Highlight) {
        self.mutations += 1;
        if index < self.values.len() {
            self.highlights.insert(index, highlight);
        }
        self.snapshot();
    }

    fn clear_highlights(&mut self) {
        self.mutations += 1;
        self.highlights.clear();
        self.snapshot();
    }

    fn focus(&mut self, index: usize, highlight: Highlight) {
        self.mutations += 1;
        self.highlights.clear();
        if index < self.values.len() {
            self.highlights.insert(index, highlight);
        }
        self.snapshot();
    }

    fn move_element(&mut self, from: usize, to: usize) {
        self.mutations += 1;
        self.moves.push((from, to));
    }

    fn set_message(&mut self, message: Message) {
        self.mutations += 1;
        self.message = Some(message);
    }

    fn narrate(&mut self, line: String) {
        self.mutations += 1;
        self.log.push(line);
    }

    fn reset(&mut self) {
        *self = RecordingView::default();
    }
}

/// Prints a frame whenever the highlighted cells change. Lines are handed to a
/// blocking writer task, so a slow terminal never stalls the animation while it
/// holds the view lock. Must be created inside a tokio runtime.
pub struct TerminalView<W> {
    lines: mpsc::UnboundedSender<String>,
    writer: JoinHandle<W>,
    values: Vec<f64>,
    highlights: BTreeMap<usize, Highlight>,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> TerminalView<std::io::Stdout> {
        TerminalView::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalView<W> {
    pub fn new(mut out: W) -> TerminalView<W> {
        let (lines, mut rx) = mpsc::unbounded_channel::<String>();
        let writer = tokio::task::spawn_blocking(move || {
            while let Some(line) = rx.blocking_recv() {
                if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
                    log::warn!("failed writing to terminal: {e}");
                }
            }
            out
        });
        TerminalView {
            lines,
            writer,
            values: Vec::new(),
            highlights: BTreeMap::new(),
        }
    }

    /// Waits until every emitted line has been written and returns the sink.
    pub async fn finish(self) -> std::io::Result<W> {
        drop(self.lines);
        self.writer.await.map_err(std::io::Error::other)
    }

    fn frame(&self) -> String {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let marker = self.highlights.get(&i).map(|h| h.marker()).unwrap_or(" ");
                format!("[{}]{}", format_number(*v), marker)
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn emit(&mut self, line: &str) {
        if self.lines.send(line.to_string()).is_err() {
            log::warn!("terminal writer has stopped, dropping output");
        }
    }

    fn emit_frame(&mut self) {
        let frame = self.frame();
        self.emit(&format!("  {frame}"));
    }
}

impl<W: Write + Send + 'static> View for TerminalView<W> {
    fn render_array(&mut self, values: &[f64]) {
        self.values = values.to_vec();
        self.highlights.clear();
        self.emit_frame();
    }

    fn highlight(&mut self, index: usize, highlight: Highlight) {
        if index < self.values.len() {
            self.highlights.insert(index, highlight);
            self.emit_frame();
        }
    }

    fn clear_highlights(&mut self) {
        if !self.highlights.is_empty() {
            self.highlights.clear();
            self.emit_frame();
        }
    }

    fn focus(&mut self, index: usize, highlight: Highlight) {
        self.highlights.clear();
        if index < self.values.len() {
            self.highlights.insert(index, highlight);
        }
        self.emit_frame();
    }

    fn move_element(&mut self, from: usize, to: usize) {
        let value = self.values.get(from).map(|v| format_number(*v));
        if let Some(value) = value {
            self.emit(&format!("  move {value}: {from} -> {to}"));
        }
    }

    fn set_message(&mut self, message: Message) {
        self.emit(&message.to_string());
    }

    fn narrate(&mut self, line: String) {
        self.emit(&format!("  > {line}"));
    }

    fn reset(&mut self) {
        self.values.clear();
        self.highlights.clear();
    }
}

#[tokio::test]
async fn test_terminal_view_frames() {
    let mut view = TerminalView::new(Vec::<u8>::new());
    view.render_array(&[1.0, 3.0, 4.5]);
    view.focus(1, Highlight::Mid);
    view.highlight(7, Highlight::High);
    view.set_message(Message::success("done"));
    let out = String::from_utf8(view.finish().await.unwrap()).unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines, vec!["  [1]  [3]  [4.5] ", "  [1]  [3]M [4.5] ", "[ok] done"]);
}
