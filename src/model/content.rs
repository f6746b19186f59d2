//! Typed payloads of content nodes.

use super::ContentType;
use crate::error::{Error, Result, Warning};
use md5::{Digest, Md5};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::OnceLock;

/// Formula fonts supported by the external renderer.
pub const FORMULA_FONTS: [&str; 7] = [
    "TeX",
    "STIX-Web",
    "Asana-Math",
    "Neo-Euler",
    "Gyre-Pagella",
    "Gyre-Termes",
    "Latin-Modern",
];

/// Payload of a node; selects its [`ContentType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// The document root
    Document,
    /// A section
    Section,
    /// Running text
    Text(Text),
    /// An image
    Image(Image),
    /// A formula
    Formula(Formula),
    /// A generated list
    List(ListSpec),
}

impl Content {
    /// Type tag of the payload.
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Document => ContentType::Document,
            Content::Section => ContentType::Section,
            Content::Text(_) => ContentType::Text,
            Content::Image(_) => ContentType::Image,
            Content::Formula(_) => ContentType::Formula,
            Content::List(_) => ContentType::List,
        }
    }

    /// List specification, if this is a list.
    pub fn as_list(&self) -> Option<&ListSpec> {
        match self {
            Content::List(spec) => Some(spec),
            _ => None,
        }
    }

    /// Normalize invalid settings, returning what was corrected.
    pub(crate) fn validate(&mut self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        match self {
            Content::Formula(formula) => warnings.extend(formula.validate_font()),
            Content::List(spec) => warnings.extend(spec.validate()),
            _ => {}
        }
        warnings
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment (default)
    #[default]
    Justify,
}

/// A block of running text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    /// The text content
    pub body: String,

    /// Text alignment
    pub alignment: Alignment,

    /// Allow hyphenation by the layout engine
    pub hyphenate: bool,
}

impl Text {
    /// Create a text block.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            alignment: Alignment::default(),
            hyphenate: true,
        }
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Page dimension an image size can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDimension {
    /// Full page width
    PageWidth,
    /// Page width minus left and right margins
    TextWidth,
    /// Full page height
    PageHeight,
}

/// Page and text area sizes in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMeasurements {
    /// Width of the page
    pub page_width: f32,
    /// Width of the text area
    pub text_width: f32,
    /// Height of the page
    pub page_height: f32,
    /// Height of the text area
    pub text_height: f32,
}

impl PageMeasurements {
    /// Measurements of a page with the given size and margins (left, right, top, bottom).
    pub fn new(page_width: f32, page_height: f32, margins: [f32; 4]) -> Self {
        let [left, right, top, bottom] = margins;
        Self {
            page_width,
            text_width: page_width - left - right,
            page_height,
            text_height: page_height - top - bottom,
        }
    }

    fn get(&self, reference: ReferenceDimension) -> f32 {
        match reference {
            ReferenceDimension::PageWidth => self.page_width,
            ReferenceDimension::TextWidth => self.text_width,
            ReferenceDimension::PageHeight => self.page_height,
        }
    }
}

/// One axis of an image size specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Size in user units
    Absolute(f32),
    /// `factor * reference`, e.g. `0.5*textwidth`
    Relative {
        /// Multiplier
        factor: f32,
        /// Page dimension
        reference: ReferenceDimension,
    },
}

impl Dimension {
    /// Size in user units on a page.
    pub fn resolve(&self, page: &PageMeasurements) -> f32 {
        match self {
            Dimension::Absolute(value) => *value,
            Dimension::Relative { factor, reference } => factor * page.get(*reference),
        }
    }
}

fn dimension_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:([0-9]*\.?[0-9]+)\s*\*\s*)?(pagewidth|textwidth|pageheight)\s*$")
            .unwrap()
    })
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(value) = s.trim().parse::<f32>() {
            if value.is_finite() && value > 0.0 {
                return Ok(Dimension::Absolute(value));
            }
            return Err(Error::InvalidImageSize(s.to_string()));
        }

        let lower = s.to_lowercase();
        let caps = dimension_regex()
            .captures(&lower)
            .ok_or_else(|| Error::InvalidImageSize(s.to_string()))?;

        let factor = match caps.get(1) {
            Some(m) => m
                .as_str()
                .parse::<f32>()
                .map_err(|_| Error::InvalidImageSize(s.to_string()))?,
            None => 1.0,
        };
        let reference = match &caps[2] {
            "pagewidth" => ReferenceDimension::PageWidth,
            "textwidth" => ReferenceDimension::TextWidth,
            _ => ReferenceDimension::PageHeight,
        };
        Ok(Dimension::Relative { factor, reference })
    }
}

/// An image. Intrinsic sizes are supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Path of the image file
    pub path: String,

    /// Caption shown with the image
    pub caption: Option<String>,

    /// Requested width
    pub width: Option<Dimension>,

    /// Requested height
    pub height: Option<Dimension>,

    /// Derive the height from the width and the intrinsic aspect ratio
    pub keep_aspect_ratio: bool,

    /// Size of the image file in user units, if known
    pub intrinsic_size: Option<(f32, f32)>,
}

impl Image {
    /// Create an image for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            caption: None,
            width: None,
            height: None,
            keep_aspect_ratio: true,
            intrinsic_size: None,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Parse and set the requested size, e.g. `("0.5*textwidth", "pageheight")`.
    pub fn with_size(mut self, width: &str, height: &str) -> Result<Self> {
        self.width = Some(width.parse()?);
        self.height = Some(height.parse()?);
        Ok(self)
    }

    /// Set the intrinsic size of the image file.
    pub fn with_intrinsic_size(mut self, width: f32, height: f32) -> Self {
        self.intrinsic_size = Some((width, height));
        self
    }

    /// Enable or disable aspect ratio preservation.
    pub fn with_keep_aspect_ratio(mut self, keep: bool) -> Self {
        self.keep_aspect_ratio = keep;
        self
    }

    /// Final `(width, height)` of the image on a page.
    pub fn dimensions(&self, page: &PageMeasurements) -> Result<(f32, f32)> {
        let aspect = self
            .intrinsic_size
            .filter(|(w, h)| *w > 0.0 && *h > 0.0)
            .map(|(w, h)| w / h);
        let width = self.width.map(|d| d.resolve(page));
        let height = self.height.map(|d| d.resolve(page));

        match (width, height, aspect) {
            (None, None, _) => self
                .intrinsic_size
                .ok_or_else(|| Error::InvalidImageSize(format!("no size known for {}", self.path))),
            (Some(w), _, Some(ratio)) if self.keep_aspect_ratio => Ok((w, w / ratio)),
            (Some(w), Some(h), _) => Ok((w, h)),
            (Some(w), None, Some(ratio)) => Ok((w, w / ratio)),
            (None, Some(h), Some(ratio)) => Ok((h * ratio, h)),
            _ => Err(Error::InvalidImageSize(format!(
                "incomplete size for {} without intrinsic size",
                self.path
            ))),
        }
    }
}

/// Source format of formula code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeFormat {
    /// TeX math
    #[default]
    TeX,
    /// MathML markup
    MathML,
    /// AsciiMath notation
    AsciiMath,
}

impl CodeFormat {
    /// Name used by the external renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeFormat::TeX => "TeX",
            CodeFormat::MathML => "MathML",
            CodeFormat::AsciiMath => "AsciiMath",
        }
    }
}

/// A formula rendered to an image by an external service.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    /// Formula source code
    pub code: String,

    /// Font requested from the renderer
    pub font: String,

    /// Source format of `code`
    pub format: CodeFormat,
}

impl Formula {
    /// Create a TeX formula in the TeX font.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            font: "TeX".to_string(),
            format: CodeFormat::TeX,
        }
    }

    /// Set the font. Unknown fonts fall back to TeX when the node is created.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the code format.
    pub fn with_format(mut self, format: CodeFormat) -> Self {
        self.format = format;
        self
    }

    fn validate_font(&mut self) -> Option<Warning> {
        if FORMULA_FONTS.contains(&self.font.as_str()) {
            return None;
        }
        let requested = std::mem::replace(&mut self.font, "TeX".to_string());
        Some(Warning::UnknownFormulaFont(requested))
    }

    /// Content hash under which the rendered image is cached.
    pub fn cache_key(&self) -> String {
        let mut hasher = Md5::new();
        hasher.update(self.format.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.font.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.code.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// File name of the cached image.
    pub fn cache_file_name(&self) -> String {
        format!("{}.svg", self.cache_key())
    }
}

/// Specification of a generated list (table of contents, list of figures, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    /// Types of content included in the list
    pub display_types: BTreeSet<ContentType>,

    /// Deepest traversal depth included (-1 = unlimited)
    pub max_depth: i32,

    /// Show the page-number column
    pub show_pages: bool,

    /// Deepest depth that gets its own indentation (-1 = unlimited, 0 = none)
    pub indent_max_level: i32,

    /// Width of the page-number column in user units
    pub page_number_width: f32,

    /// Minimum distance between title and page-number column
    pub min_page_num_distance: f32,

    /// Minimum title width in percent of the list width
    pub min_title_width_percentage: f32,

    /// Space between a number and its text in user units
    pub number_gap: f32,

    /// Text indent for rows without computed indentation
    pub default_text_indent: f32,
}

impl ListSpec {
    /// List of the given content types.
    pub fn new(display_types: impl IntoIterator<Item = ContentType>) -> Self {
        Self {
            display_types: display_types.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Table of contents (sections only).
    pub fn table_of_contents() -> Self {
        Self::default()
    }

    /// Set the traversal depth limit.
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable the page-number column.
    pub fn with_show_pages(mut self, show: bool) -> Self {
        self.show_pages = show;
        self
    }

    /// Set the deepest indented level.
    pub fn with_indent_max_level(mut self, level: i32) -> Self {
        self.indent_max_level = level;
        self
    }

    /// Set the number-to-text gap.
    pub fn with_number_gap(mut self, gap: f32) -> Self {
        self.number_gap = gap;
        self
    }

    /// Set the minimum title width percentage.
    pub fn with_min_title_width_percentage(mut self, percentage: f32) -> Self {
        self.min_title_width_percentage = percentage;
        self
    }

    /// Human-readable description, used as the list's alt title.
    pub fn describe(&self) -> String {
        let types: Vec<&str> = self.display_types.iter().map(|t| t.as_str()).collect();
        format!("List of: {}", types.join(", "))
    }

    pub(crate) fn validate(&mut self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if self.max_depth < -1 {
            warnings.push(Warning::InvalidMaxDepth(self.max_depth));
            self.max_depth = -1;
        }
        if self.indent_max_level < -1 {
            warnings.push(Warning::InvalidMaxDepth(self.indent_max_level));
            self.indent_max_level = -1;
        }
        warnings
    }
}

impl Default for ListSpec {
    fn default() -> Self {
        Self {
            display_types: BTreeSet::from([ContentType::Section]),
            max_depth: -1,
            show_pages: true,
            indent_max_level: -1,
            page_number_width: 8.0,
            min_page_num_distance: 15.0,
            min_title_width_percentage: 20.0,
            number_gap: 2.5,
            default_text_indent: 8.5,
        }
    }
}
