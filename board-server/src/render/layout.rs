//! Layout configuration for the board image.

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;

use crate::domain::DirectionCode;

use super::surface::Font;

/// Horizontal margin used by the generated column layouts.
const MARGIN: u32 = 20;

/// Top of the first column, below the title and clock.
const COLUMNS_TOP: i32 = 110;

/// Errors in a [`LayoutConfig`].
///
/// A layout that passes [`LayoutConfig::validate`] renders without error
/// for any departure board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Width or height is zero
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    /// A strftime pattern contains an unknown specifier
    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),

    /// No columns configured
    #[error("layout has no columns")]
    NoColumns,

    /// A column has a zero row height or logo diameter
    #[error("column {0} must have non-zero row height and logo diameter")]
    DegenerateColumn(DirectionCode),

    /// A column starts or extends outside the canvas
    #[error("column {0} lies outside the canvas")]
    ColumnOutOfBounds(DirectionCode),

    /// The last row of a column would be cut off by the bottom edge
    #[error("column {direction} needs {needed}px of height, canvas has {height}px")]
    ColumnTooTall {
        direction: DirectionCode,
        needed: i64,
        height: u32,
    },

    /// The route badge is taller than the row holding it
    #[error("column {0} has a logo larger than its row height")]
    OverlappingRows(DirectionCode),
}

/// Intensities, fonts and spacing shared by all columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub background: u8,
    /// Title, clock, headings and departure times
    pub text: u8,
    /// Dimmed dash for rows without a departure
    pub placeholder: u8,
    pub placeholder_text: String,
    /// Route badge circle
    pub logo_fill: u8,
    /// Route letter inside the badge
    pub logo_text: u8,
    /// Space between the badge and the departure time
    pub logo_gap: u32,
    /// Space below a column heading
    pub heading_gap: u32,
    pub title_font: Font,
    pub clock_font: Font,
    pub heading_font: Font,
    pub time_font: Font,
    pub logo_font: Font,
    pub error_font: Font,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: 255,
            text: 0,
            placeholder: 160,
            placeholder_text: "--".to_string(),
            logo_fill: 0,
            logo_text: 255,
            logo_gap: 16,
            heading_gap: 12,
            title_font: Font::Large,
            clock_font: Font::Medium,
            heading_font: Font::Bold,
            time_font: Font::Large,
            logo_font: Font::Large,
            error_font: Font::Medium,
        }
    }
}

/// One column of departures, showing one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub direction: DirectionCode,
    /// Text drawn above the rows, e.g. "Manhattan-bound (N)"
    pub heading: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub row_height: u32,
    pub logo_diameter: u32,
    /// Rows always drawn, with placeholders for missing departures
    pub max_rows: usize,
}

/// Everything the renderer needs besides the board and the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_y: i32,
    pub clock_y: i32,
    /// Text drawn before the current time
    pub clock_prefix: String,
    /// strftime pattern for the current time
    pub clock_format: String,
    /// strftime pattern for departure times
    pub time_format: String,
    /// Zone in which all times are displayed
    pub time_zone: Tz,
    pub columns: Vec<Column>,
    pub style: Style,
}

impl LayoutConfig {
    /// Create a layout with default fonts and formats and no columns.
    pub fn new(width: u32, height: u32, title: impl Into<String>, time_zone: Tz) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            title_y: 20,
            clock_y: 60,
            clock_prefix: "Current Time: ".to_string(),
            clock_format: "%Y-%m-%d %H:%M".to_string(),
            time_format: "%H:%M".to_string(),
            time_zone,
            columns: Vec::new(),
            style: Style::default(),
        }
    }

    /// Generate columns for `directions`, each showing `rows` rows.
    ///
    /// A single direction gets one column spanning the canvas; several
    /// directions are placed side by side in equal-width columns.
    pub fn with_columns_for(mut self, directions: &[(DirectionCode, String)], rows: usize) -> Self {
        let count = directions.len().max(1) as u32;
        let usable = self.width.saturating_sub(2 * MARGIN);
        let column_width = usable / count;

        self.columns = directions
            .iter()
            .enumerate()
            .map(|(i, (code, label))| Column {
                direction: *code,
                heading: Some(format!("{label} ({code})")),
                x: (MARGIN + column_width * i as u32) as i32,
                y: COLUMNS_TOP,
                width: column_width,
                row_height: 64,
                logo_diameter: 48,
                max_rows: rows,
            })
            .collect();
        self
    }

    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = pattern.into();
        self
    }

    /// Whether the board is drawn as one unified column.
    pub fn is_single_column(&self) -> bool {
        self.columns.len() == 1
    }

    /// Lowest pixel row touched by `column`, counting its heading and
    /// every row it always draws.
    fn column_bottom(&self, column: &Column) -> i64 {
        let style = &self.style;
        let heading = match column.heading {
            Some(_) => i64::from(style.heading_font.line_height()) + i64::from(style.heading_gap),
            None => 0,
        };
        let rows = i64::try_from(column.max_rows.max(1)).unwrap_or(i64::MAX);
        let last_row = (rows - 1)
            .saturating_mul(i64::from(column.row_height))
            .saturating_add(i64::from(column.y) + heading);
        let row_content = column
            .logo_diameter
            .max(style.time_font.line_height());
        last_row.saturating_add(i64::from(row_content))
    }

    /// Check the layout for problems that would break rendering.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }

        check_format(&self.clock_format)?;
        check_format(&self.time_format)?;

        if self.columns.is_empty() {
            return Err(LayoutError::NoColumns);
        }

        for column in &self.columns {
            if column.row_height == 0 || column.logo_diameter == 0 {
                return Err(LayoutError::DegenerateColumn(column.direction));
            }
            if column.logo_diameter > column.row_height {
                return Err(LayoutError::OverlappingRows(column.direction));
            }

            let right = i64::from(column.x) + i64::from(column.width);
            let inside = column.x >= 0
                && column.y >= 0
                && right <= i64::from(self.width)
                && i64::from(column.y) < i64::from(self.height);
            if !inside {
                return Err(LayoutError::ColumnOutOfBounds(column.direction));
            }

            let needed = self.column_bottom(column);
            if needed > i64::from(self.height) {
                return Err(LayoutError::ColumnTooTall {
                    direction: column.direction,
                    needed,
                    height: self.height,
                });
            }
        }

        Ok(())
    }
}

fn check_format(pattern: &str) -> Result<(), LayoutError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LayoutError::InvalidTimeFormat(pattern.to_string()));
    }
    Ok(())
}
