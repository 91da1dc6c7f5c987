//! Board layout and rendering.
//!
//! The image is a title, the current time, and one column per direction.
//! Each column always shows `max_rows` rows: a route badge and departure
//! time when a departure is known, a dimmed dash otherwise. The layout is
//! fixed so the e-ink screen never reflows between refreshes.

use std::fmt::Write;

use chrono::DateTime;
use chrono_tz::Tz;
use embedded_graphics::geometry::Point;
use tracing::error;

use crate::domain::{Departure, DepartureBoard};

use super::canvas::PixelBuffer;
use super::layout::{Column, LayoutConfig};
use super::surface::Surface;

/// Render `board` onto a new buffer of the configured size.
///
/// Deterministic: the same board, layout and `now` always produce the
/// same pixels.
pub fn render(board: &DepartureBoard, layout: &LayoutConfig, now: &DateTime<Tz>) -> PixelBuffer {
    let mut canvas = PixelBuffer::new(layout.width, layout.height, layout.style.background);
    draw_board(&mut canvas, board, layout, now);
    canvas
}

/// Draw `board` onto any surface.
pub fn draw_board<S: Surface>(
    surface: &mut S,
    board: &DepartureBoard,
    layout: &LayoutConfig,
    now: &DateTime<Tz>,
) {
    let style = &layout.style;
    surface.fill_background(style.background);

    let title = &layout.title;
    let size = surface.measure(title, style.title_font);
    let x = centered(0, layout.width, size.width);
    surface.draw_text(title, Point::new(x, layout.title_y), style.title_font, style.text);

    let now = now.with_timezone(&layout.time_zone);
    let clock = format!(
        "{}{}",
        layout.clock_prefix,
        format_time(&now, &layout.clock_format)
    );
    let size = surface.measure(&clock, style.clock_font);
    let x = centered(0, layout.width, size.width);
    surface.draw_text(&clock, Point::new(x, layout.clock_y), style.clock_font, style.text);

    let single = layout.is_single_column();
    for column in &layout.columns {
        draw_column(surface, column, board.get(column.direction), layout, single);
    }
}

fn draw_column<S: Surface>(
    surface: &mut S,
    column: &Column,
    departures: &[Departure],
    layout: &LayoutConfig,
    single: bool,
) {
    let style = &layout.style;
    let mut y = column.y;

    if let Some(heading) = &column.heading {
        let size = surface.measure(heading, style.heading_font);
        let x = if single {
            centered(column.x, column.width, size.width)
        } else {
            column.x
        };
        surface.draw_text(heading, Point::new(x, y), style.heading_font, style.text);
        y += (size.height + style.heading_gap) as i32;
    }

    let diameter = column.logo_diameter;

    for row in 0..column.max_rows {
        match departures.get(row) {
            Some(departure) => {
                let route = &departure.route_id;
                surface.fill_circle(Point::new(column.x, y), diameter, style.logo_fill);

                let size = surface.measure(route, style.logo_font);
                let glyph = Point::new(
                    centered(column.x, diameter, size.width),
                    centered(y, diameter, size.height),
                );
                surface.draw_text(route, glyph, style.logo_font, style.logo_text);

                let predicted = departure.predicted_time.with_timezone(&layout.time_zone);
                let time = format_time(&predicted, &layout.time_format);
                let size = surface.measure(&time, style.time_font);
                let at = Point::new(
                    column.x + (diameter + style.logo_gap) as i32,
                    centered(y, diameter, size.height),
                );
                surface.draw_text(&time, at, style.time_font, style.text);
            }
            None => {
                let dash = &style.placeholder_text;
                let size = surface.measure(dash, style.time_font);
                let x = if single {
                    centered(column.x, column.width, size.width)
                } else {
                    column.x
                };
                let at = Point::new(x, centered(y, diameter, size.height));
                surface.draw_text(dash, at, style.time_font, style.placeholder);
            }
        }
        y += column.row_height as i32;
    }
}

/// Offset that centers `extent` within `span` starting at `origin`.
fn centered(origin: i32, span: u32, extent: u32) -> i32 {
    origin + (span as i32 - extent as i32) / 2
}

/// Format with a strftime pattern.
///
/// Patterns are checked by [`LayoutConfig::validate`]; an invalid one
/// here is a configuration bug and is logged rather than panicking.
fn format_time(time: &DateTime<Tz>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        error!(pattern, "invalid time format in layout");
        out.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DirectionCode;
    use crate::render::Font;
    use chrono::{Duration, TimeZone};
    use embedded_graphics::geometry::Size;

    /// Surface that records drawing calls instead of drawing.
    #[derive(Debug, Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(u8),
        Text {
            text: String,
            at: Point,
            font: Font,
            intensity: u8,
        },
        Circle {
            at: Point,
            diameter: u32,
            intensity: u8,
        },
    }

    impl Surface for Recorder {
        fn fill_background(&mut self, intensity: u8) {
            self.ops.push(Op::Fill(intensity));
        }

        // Proportional metrics: '1' and ':' are narrow, everything else 10px.
        fn measure(&self, text: &str, _font: Font) -> Size {
            let width = text
                .chars()
                .map(|c| if c == '1' || c == ':' { 4 } else { 10 })
                .sum();
            Size::new(width, 20)
        }

        fn draw_text(&mut self, text: &str, at: Point, font: Font, intensity: u8) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                at,
                font,
                intensity,
            });
        }

        fn fill_circle(&mut self, at: Point, diameter: u32, intensity: u8) {
            self.ops.push(Op::Circle {
                at,
                diameter,
                intensity,
            });
        }
    }

    impl Recorder {
        fn texts(&self) -> Vec<(&str, Point, u8)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text {
                        text,
                        at,
                        intensity,
                        ..
                    } => Some((text.as_str(), *at, *intensity)),
                    _ => None,
                })
                .collect()
        }

        fn circles(&self) -> Vec<Point> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Circle { at, .. } => Some(*at),
                    _ => None,
                })
                .collect()
        }
    }

    fn dir(s: &str) -> DirectionCode {
        DirectionCode::parse(s).unwrap()
    }

    fn tz() -> Tz {
        chrono_tz::America::New_York
    }

    fn now() -> DateTime<Tz> {
        tz().with_ymd_and_hms(2026, 10, 15, 8, 30, 0).unwrap()
    }

    fn layout() -> LayoutConfig {
        LayoutConfig::new(800, 600, "Utica Av (A/C)", tz()).with_columns_for(
            &[
                (dir("N"), "Manhattan-bound".to_string()),
                (dir("S"), "Brooklyn-bound".to_string()),
            ],
            3,
        )
    }

    fn departure(route: &str, direction: &str, minutes: i64) -> Departure {
        Departure {
            route_id: route.to_string(),
            direction: dir(direction),
            predicted_time: now() + Duration::minutes(minutes),
        }
    }

    fn board(north: Vec<Departure>, south: Vec<Departure>) -> DepartureBoard {
        let mut board = DepartureBoard::with_directions([dir("N"), dir("S")]);
        board.insert(dir("N"), north);
        board.insert(dir("S"), south);
        board
    }

    #[test]
    fn header_is_centered_with_measured_width() {
        let mut surface = Recorder::default();
        draw_board(&mut surface, &board(vec![], vec![]), &layout(), &now());

        assert_eq!(surface.ops[0], Op::Fill(255));
        let texts = surface.texts();

        // "Utica Av (A/C)" is 14 chars, 140px wide.
        assert_eq!(texts[0], ("Utica Av (A/C)", Point::new(330, 20), 0));

        // "Current Time: 2026-10-15 08:30": four '1's/':'s at 4px, 26 others at 10px.
        let (clock, at, _) = texts[1];
        assert_eq!(clock, "Current Time: 2026-10-15 08:30");
        let width = 4 * 4 + 26 * 10;
        assert_eq!(at, Point::new((800 - width) / 2, 60));
    }

    #[test]
    fn clock_uses_layout_zone() {
        let mut surface = Recorder::default();
        let utc_now = now().with_timezone(&chrono_tz::UTC);
        draw_board(&mut surface, &board(vec![], vec![]), &layout(), &utc_now);
        assert_eq!(surface.texts()[1].0, "Current Time: 2026-10-15 08:30");
    }

    #[test]
    fn empty_direction_draws_placeholders() {
        let mut surface = Recorder::default();
        let board = board(vec![departure("A", "N", 4)], vec![]);
        draw_board(&mut surface, &board, &layout(), &now());

        let dashes: Vec<_> = surface
            .texts()
            .into_iter()
            .filter(|(text, _, _)| *text == "--")
            .collect();

        // Two missing rows in N, three in S.
        assert_eq!(dashes.len(), 5);
        assert!(dashes.iter().all(|(_, _, intensity)| *intensity == 160));

        // Multi-column layouts left-align dashes.
        let south_x = layout().columns[1].x;
        assert_eq!(
            dashes.iter().filter(|(_, at, _)| at.x == south_x).count(),
            3
        );
    }

    #[test]
    fn departure_row_has_badge_and_time() {
        let mut surface = Recorder::default();
        let board = board(vec![departure("A", "N", 7)], vec![]);
        draw_board(&mut surface, &board, &layout(), &now());

        let column = &layout().columns[0];
        // Heading (20px tall) plus 12px gap.
        let row_y = column.y + 32;
        assert_eq!(surface.circles(), vec![Point::new(column.x, row_y)]);
        assert!(surface.ops.contains(&Op::Circle {
            at: Point::new(column.x, row_y),
            diameter: 48,
            intensity: 0,
        }));

        let texts = surface.texts();
        let badge = texts.iter().find(|(t, _, _)| *t == "A").unwrap();
        // 10px glyph centered in a 48px badge, 20px tall.
        assert_eq!(badge.1, Point::new(column.x + 19, row_y + 14));
        assert_eq!(badge.2, 255);

        let time = texts.iter().find(|(t, _, _)| *t == "08:37").unwrap();
        assert_eq!(time.1, Point::new(column.x + 48 + 16, row_y + 14));
        assert_eq!(time.2, 0);
        assert!(surface.ops.contains(&Op::Text {
            text: "08:37".to_string(),
            at: time.1,
            font: Font::Large,
            intensity: 0,
        }));
    }

    #[test]
    fn rows_advance_by_row_height() {
        let mut surface = Recorder::default();
        let board = board(
            vec![
                departure("A", "N", 2),
                departure("C", "N", 5),
                departure("A", "N", 9),
            ],
            vec![],
        );
        draw_board(&mut surface, &board, &layout(), &now());

        let ys: Vec<i32> = surface.circles().iter().map(|p| p.y).collect();
        assert_eq!(ys.len(), 3);
        assert_eq!(ys[1] - ys[0], 64);
        assert_eq!(ys[2] - ys[1], 64);
    }

    #[test]
    fn extra_departures_beyond_rows_are_not_drawn() {
        let mut surface = Recorder::default();
        let many: Vec<_> = (1..=6).map(|m| departure("A", "S", m)).collect();
        draw_board(&mut surface, &board(vec![], many), &layout(), &now());
        assert_eq!(surface.circles().len(), 3);
    }

    #[test]
    fn single_column_centers_placeholders() {
        let layout = LayoutConfig::new(800, 600, "Uptown", tz())
            .with_columns_for(&[(dir("N"), "Uptown".to_string())], 2);
        let board = DepartureBoard::with_directions([dir("N")]);

        let mut surface = Recorder::default();
        draw_board(&mut surface, &board, &layout, &now());

        let dashes: Vec<_> = surface
            .texts()
            .into_iter()
            .filter(|(text, _, _)| *text == "--")
            .collect();
        assert_eq!(dashes.len(), 2);
        // 20px dash centered in the 760px column starting at 20.
        assert!(dashes.iter().all(|(_, at, _)| at.x == 20 + 370));
    }

    #[test]
    fn render_is_deterministic() {
        let board = board(
            vec![departure("A", "N", 3), departure("C", "N", 11)],
            vec![departure("C", "S", 6)],
        );
        let first = render(&board, &layout(), &now());
        let second = render(&board, &layout(), &now());
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn render_has_configured_size_and_draws_badges() {
        let board = board(vec![departure("A", "N", 3)], vec![]);
        let layout = layout();
        let buffer = render(&board, &layout, &now());

        assert_eq!(buffer.width(), 800);
        assert_eq!(buffer.height(), 600);

        // Top edge of the badge is filled; the glyph sits lower.
        let column = &layout.columns[0];
        let x = (column.x + 24) as u32;
        let y = (column.y + 32 + 2) as u32;
        assert_eq!(buffer.pixel(x, y), Some(0));

        // Bottom-right corner stays background.
        assert_eq!(buffer.pixel(799, 599), Some(255));
    }

    #[test]
    fn render_empty_board_still_draws_dashes() {
        let layout = layout();
        let buffer = render(&DepartureBoard::default(), &layout, &now());
        let dimmed = buffer.as_raw().iter().filter(|&&p| p == 160).count();
        assert!(dimmed > 0);
    }
}
