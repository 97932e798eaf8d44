/// What happens to the cursor after a piece of text is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Append {
    /// End the line.
    None,
    /// Stay just after the text.
    Append,
    /// Move to the next tab stop, wrapping if it is past the line width.
    Tab,
}

/// Host state reported by [`Console::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Running,
    Escape,
    Quitting,
}

/// ## Display collaborator
///
/// The runtime performs every visible effect through this trait. Line
/// input is not part of it: the runtime asks the host for a line with
/// `Event::Input` and the host answers with `Runtime::enter`.
pub trait Console {
    fn add_text(&mut self, text: &str, mode: Append);
    /// Write at an absolute offset. Row is `offset / line_size()`.
    fn put_text_at(&mut self, offset: usize, text: &str, mode: Append);
    fn clear_text(&mut self);
    fn terminate(&mut self);
    /// A pending key press or the empty string. Never blocks.
    fn get_key(&mut self) -> String;
    fn line_size(&self) -> usize;
    fn line_count(&self) -> usize;
    fn cursor_pos(&self) -> (usize, usize);
    fn set_cursor_pos(&mut self, col: usize, row: usize);
    /// Called once per program line and while waiting for keys.
    fn tick(&mut self) -> Status;
}

pub const TAB_WIDTH: usize = 10;

/// Cursor arithmetic for a fixed size text screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
    width: usize,
    height: usize,
}

impl Cursor {
    pub fn new(width: usize, height: usize) -> Cursor {
        Cursor {
            col: 0,
            row: 0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn home(&mut self) {
        self.col = 0;
        self.row = 0;
    }

    pub fn set(&mut self, col: usize, row: usize) {
        self.col = col.min(self.width - 1);
        self.row = row.min(self.height - 1);
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.set(offset % self.width, offset / self.width);
    }

    /// Step past one written character. Returns true when the screen
    /// must scroll up one row.
    pub fn advance(&mut self) -> bool {
        self.col += 1;
        if self.col >= self.width {
            self.newline()
        } else {
            false
        }
    }

    pub fn newline(&mut self) -> bool {
        self.col = 0;
        if self.row + 1 >= self.height {
            true
        } else {
            self.row += 1;
            false
        }
    }

    /// Columns of padding to the next tab stop, or `None` to wrap.
    pub fn tab_padding(&self) -> Option<usize> {
        let next = (self.col / TAB_WIDTH + 1) * TAB_WIDTH;
        if next >= self.width {
            None
        } else {
            Some(next - self.col)
        }
    }
}
