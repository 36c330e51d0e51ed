use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Normal,
    Error,
}

/// Everything the shell renders besides the input line.
#[derive(Debug, Clone, PartialEq)]
pub struct UiOutputState {
    pub status_text: String,
    pub severity: Severity,
    pub report_visible: bool,
    pub report_payload: Value,
    pub help_visible: bool,
}

impl Default for UiOutputState {
    fn default() -> Self {
        Self {
            status_text: String::new(),
            severity: Severity::Normal,
            report_visible: false,
            report_payload: Value::Object(Default::default()),
            help_visible: false,
        }
    }
}

impl UiOutputState {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Single-line text input with a byte-offset cursor kept on char boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = self.next_boundary(self.cursor);
        self.value.drain(self.cursor..next);
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Hand out the current text and leave the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
