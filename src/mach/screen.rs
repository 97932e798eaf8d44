use super::console::{Append, Console, Cursor, Status};
use std::collections::VecDeque;

/// ## In-memory console
///
/// A character grid that scrolls like a terminal. Keys are queued ahead of
/// time and an Escape can be scheduled after a number of ticks.

#[derive(Debug)]
pub struct Screen {
    rows: Vec<Vec<char>>,
    cursor: Cursor,
    keys: VecDeque<String>,
    escape_after: Option<usize>,
    ticks: usize,
    terminated: bool,
}

impl Default for Screen {
    fn default() -> Screen {
        Screen::new(64, 25)
    }
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Screen {
        let cursor = Cursor::new(width, height);
        Screen {
            rows: vec![vec![]; cursor.height()],
            cursor,
            keys: VecDeque::new(),
            escape_after: None,
            ticks: 0,
            terminated: false,
        }
    }

    pub fn push_key(&mut self, key: &str) {
        self.keys.push_back(key.to_string());
    }

    /// Report Escape from the nth tick on.
    pub fn escape_after(&mut self, ticks: usize) {
        self.escape_after = Some(self.ticks + ticks);
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Visible rows, trailing blanks trimmed. Rows below the cursor are
    /// dropped when empty.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.len() > self.cursor.row + 1 && lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn scroll(&mut self) {
        self.rows.remove(0);
        self.rows.push(vec![]);
    }

    fn put_char(&mut self, ch: char) {
        if ch == '\n' {
            if self.cursor.newline() {
                self.scroll();
            }
            return;
        }
        let row = &mut self.rows[self.cursor.row];
        if row.len() <= self.cursor.col {
            row.resize(self.cursor.col + 1, ' ');
        }
        row[self.cursor.col] = ch;
        if self.cursor.advance() {
            self.scroll();
        }
    }
}

impl Console for Screen {
    fn add_text(&mut self, text: &str, mode: Append) {
        for ch in text.chars() {
            self.put_char(ch);
        }
        match mode {
            Append::Append => {}
            Append::None => self.put_char('\n'),
            Append::Tab => match self.cursor.tab_padding() {
                Some(n) => {
                    for _ in 0..n {
                        self.put_char(' ');
                    }
                }
                None => self.put_char('\n'),
            },
        }
    }

    fn put_text_at(&mut self, offset: usize, text: &str, mode: Append) {
        self.cursor.set_offset(offset);
        self.add_text(text, mode);
    }

    fn clear_text(&mut self) {
        for row in self.rows.iter_mut() {
            row.clear();
        }
        self.cursor.home();
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }

    fn get_key(&mut self) -> String {
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
        self.cursor.set(col, row);
    }

    fn tick(&mut self) -> Status {
        self.ticks += 1;
        if self.terminated {
            return Status::Quitting;
        }
        match self.escape_after {
            Some(n) if self.ticks >= n => {
                self.escape_after = None;
                Status::Escape
            }
            _ => Status::Running,
        }
    }
}
