/*!
## Terminal host

Reads commands and INPUT answers with linefeed and runs the
interpreter against a mortal terminal in between.

*/

use crate::mach::{Append, Console, Cursor, Event, Runtime, Status};
use ansi_term::Style;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Signal, Terminal};
use mortal::{Event as TermEvent, Key, PrepareConfig, PrepareState};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const CYCLES_PER_SLICE: usize = 5000;

pub fn main() {
    init_logging();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let filename = std::env::args().nth(1);
    if let Err(error) = main_loop(interrupted, filename) {
        eprintln!("{}", error);
    }
}

fn init_logging() {
    if let Ok(level) = std::env::var("KBASIC_LOG") {
        let level = level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::DEBUG);
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main_loop(interrupted: Arc<AtomicBool>, filename: Option<String>) -> std::io::Result<()> {
    let mut runtime = Runtime::default();
    let mut console = TermConsole::new()?;
    let command = Interface::new("KBASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);

    command.write_fmt(format_args!("KBASIC\n"))?;
    if let Some(filename) = filename {
        debug!(%filename, "startup load");
        runtime.enter(&format!("LOAD \"{}\"", filename));
    }
    let mut ready = true;
    let mut entered = String::new();

    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        console.begin()?;
        let event = runtime.execute(&mut console, CYCLES_PER_SLICE);
        console.take_error()?;
        match event {
            Event::Stopped => {
                console.end()?;
                if console.is_quitting() {
                    break;
                }
                if ready {
                    command.write_fmt(format_args!("READY.\n"))?;
                    ready = false;
                }
                let saved_completer = command.completer();
                command.set_completer(Arc::new(LineCompleter::new(&runtime)));
                let string = match command.read_line()? {
                    ReadResult::Input(string) => string,
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
                command.set_completer(saved_completer);
                console.newline_entered();
                if runtime.enter(&string) {
                    if !string.trim().is_empty() {
                        command.add_history_unique(string.clone());
                    }
                    if !starts_with_digit(&string) {
                        ready = true;
                    }
                }
                entered = string;
            }
            Event::Input(prompt) => {
                console.end()?;
                input.set_prompt(&prompt)?;
                match input.read_line()? {
                    ReadResult::Input(string) => {
                        console.newline_entered();
                        if runtime.enter(&string) {
                            input.add_history_unique(string);
                        }
                    }
                    ReadResult::Signal(Signal::Interrupt) => {
                        input.set_buffer("")?;
                        input.lock_reader().cancel_read_line()?;
                        runtime.interrupt();
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
            }
            Event::Errors(errors) => {
                console.end()?;
                for error in errors.iter() {
                    if error.is_direct() && error.column() != (0..0) {
                        let columns = [error.column()];
                        command.write_fmt(format_args!(
                            "{}\n",
                            decorate_list(&entered, &columns)
                        ))?;
                    }
                    command.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(format!("?{}", error))
                    ))?;
                }
                ready = true;
            }
            Event::Running => {}
        }
    }
    console.end()?;
    Ok(())
}

fn starts_with_digit(s: &str) -> bool {
    s.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

/// ## Console on a real terminal
///
/// The terminal is only prepared while the interpreter runs so that
/// linefeed has it to itself when reading lines. Write errors are kept
/// and reported after the slice.

struct TermConsole {
    term: mortal::Terminal,
    state: Option<PrepareState>,
    cursor: Cursor,
    keys: VecDeque<String>,
    quitting: bool,
    error: Option<std::io::Error>,
}

impl TermConsole {
    fn new() -> std::io::Result<TermConsole> {
        let term = mortal::Terminal::new()?;
        let size = term.size()?;
        Ok(TermConsole {
            term,
            state: None,
            cursor: Cursor::new(size.columns.max(1), size.lines.max(1)),
            keys: VecDeque::new(),
            quitting: false,
            error: None,
        })
    }

    fn begin(&mut self) -> std::io::Result<()> {
        if self.state.is_none() {
            let config = PrepareConfig {
                block_signals: false,
                ..PrepareConfig::default()
            };
            self.state = Some(self.term.prepare(config)?);
        }
        Ok(())
    }

    fn end(&mut self) -> std::io::Result<()> {
        if let Some(state) = self.state.take() {
            self.term.restore(state)?;
        }
        Ok(())
    }

    fn is_quitting(&self) -> bool {
        self.quitting
    }

    fn take_error(&mut self) -> std::io::Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// linefeed leaves the cursor at the start of a fresh line.
    fn newline_entered(&mut self) {
        self.cursor.newline();
    }

    fn write(&mut self, s: &str) {
        if self.error.is_none() {
            if let Err(error) = self.term.write_str(s) {
                self.error = Some(error);
            }
        }
    }

    fn newline(&mut self) {
        self.write("\r\n");
        self.cursor.newline();
    }

    /// Move the terminal cursor from where it was to the tracked cursor.
    /// Only relative moves are available so rows are counted from `from`.
    fn follow_cursor(&mut self, from: Cursor) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = move_relative(&self.term, from, self.cursor) {
            self.error = Some(error);
        }
    }

    fn poll(&mut self) {
        loop {
            match self.term.read_event(Some(Duration::from_millis(0))) {
                Ok(Some(TermEvent::Key(key))) => {
                    let key = match key {
                        Key::Char(ch) => ch.to_string(),
                        Key::Enter => "\r".to_string(),
                        Key::Backspace => "\x08".to_string(),
                        Key::Tab => "\t".to_string(),
                        Key::Escape => "\x1b".to_string(),
                        _ => continue,
                    };
                    self.keys.push_back(key);
                }
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(error) => {
                    self.error = Some(error);
                    break;
                }
            }
        }
    }
}

impl Console for TermConsole {
    fn add_text(&mut self, text: &str, mode: Append) {
        for ch in text.chars() {
            let mut buf = [0; 4];
            self.write(ch.encode_utf8(&mut buf));
            self.cursor.advance();
        }
        match mode {
            Append::None => self.newline(),
            Append::Append => {}
            Append::Tab => match self.cursor.tab_padding() {
                Some(padding) => {
                    let spaces = " ".repeat(padding);
                    self.write(&spaces);
                    for _ in 0..padding {
                        self.cursor.advance();
                    }
                }
                None => self.newline(),
            },
        }
    }

    fn put_text_at(&mut self, offset: usize, text: &str, mode: Append) {
        let from = self.cursor;
        self.cursor.set_offset(offset);
        self.follow_cursor(from);
        self.add_text(text, mode);
    }

    fn clear_text(&mut self) {
        if let Err(error) = self.term.clear_screen() {
            self.error = Some(error);
        }
        self.cursor.home();
    }

    fn terminate(&mut self) {
        self.quitting = true;
    }

    fn get_key(&mut self) -> String {
        self.poll();
        self.keys.pop_front().unwrap_or_default()
    }

    fn line_size(&self) -> usize {
        self.cursor.width()
    }

    fn line_count(&self) -> usize {
        self.cursor.height()
    }

    fn cursor_pos(&self) -> (usize, usize) {
        (self.cursor.col, self.cursor.row)
    }

    fn set_cursor_pos(&mut self, col: usize, row: usize) {
        let from = self.cursor;
        self.cursor.set(col, row);
        self.follow_cursor(from);
    }

    fn tick(&mut self) -> Status {
        if self.quitting {
            return Status::Quitting;
        }
        self.poll();
        if let Some(index) = self.keys.iter().position(|k| k == "\x1b") {
            self.keys.remove(index);
            return Status::Escape;
        }
        Status::Running
    }
}

/// Rows to move (negative is up) and columns right of the first column.
fn cursor_moves(from: Cursor, to: Cursor) -> (isize, usize) {
    (to.row as isize - from.row as isize, to.col)
}

fn move_relative(term: &mortal::Terminal, from: Cursor, to: Cursor) -> std::io::Result<()> {
    let (rows, cols) = cursor_moves(from, to);
    term.move_to_first_column()?;
    if rows < 0 {
        term.move_up(rows.unsigned_abs())?;
    } else if rows > 0 {
        term.move_down(rows as usize)?;
    }
    if cols > 0 {
        term.move_right(cols)?;
    }
    Ok(())
}

/// Typing a line number then TAB brings back that line for editing.
struct LineCompleter {
    lines: BTreeMap<u16, String>,
}

impl LineCompleter {
    fn new(runtime: &Runtime) -> LineCompleter {
        let lines = runtime
            .listing()
            .lines()
            .map(|line| (line.number(), line.to_string()))
            .collect();
        LineCompleter { lines }
    }
}

impl<Term: Terminal> Completer<Term> for LineCompleter {
    fn complete(
        &self,
        _word: &str,
        prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let num = prompter.buffer().trim().parse::<u16>().ok()?;
        let line = self.lines.get(&num)?;
        let mut comp = Completion::simple(line.clone());
        comp.suffix = linefeed::complete::Suffix::None;
        Some(vec![comp])
    }
}

/// Underlines the columns an error points at.
fn decorate_list(ins: &str, columns: &[std::ops::Range<usize>]) -> String {
    let mut under_on = false;
    let mut out = String::new();
    let style = Style::new().underline();
    let prefix = format!("{}", style.prefix());
    let suffix = format!("{}", style.suffix());
    let mut index = 0;
    for (pos, ch) in ins.char_indices() {
        index = pos;
        let do_under = columns.iter().any(|c| c.contains(&pos));
        if under_on && !do_under {
            out.push_str(&suffix);
        } else if !under_on && do_under {
            out.push_str(&prefix);
        }
        under_on = do_under;
        out.push(ch);
        index += ch.len_utf8();
    }
    if columns.iter().any(|c| c.start == index) {
        if !under_on {
            out.push_str(&prefix);
        }
        under_on = true;
        out.push(' ');
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}
