//! Rendering options and configuration.

/// Options for rendering a generated list as text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// User units represented by one character column
    pub column_width: f32,

    /// Total line width in characters (page numbers are right-aligned to it)
    pub line_width: usize,

    /// Character filling the gap between title and page number
    pub leader: Option<char>,

    /// Print the list title as the first line
    pub include_title: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user units per character column.
    pub fn with_column_width(mut self, width: f32) -> Self {
        self.column_width = width;
        self
    }

    /// Set the line width in characters.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Set the leader character; `None` fills with spaces.
    pub fn with_leader(mut self, leader: Option<char>) -> Self {
        self.leader = leader;
        self
    }

    /// Enable or disable the title line.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            column_width: 2.0,
            line_width: 72,
            leader: Some('.'),
            include_title: true,
        }
    }
}
