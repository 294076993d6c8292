use crate::components::theme::{Palette, Theme, resolve};
use nfl_api::field_position;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

pub const FIELD_HEIGHT: u16 = 9;
const END_ZONE_WIDTH: usize = 5;
const BALL: &str = "●";

/// Top-down football field with the ball spotted by yards to the end zone.
pub struct FieldView<'a> {
    pub yards_to_endzone: u8,
    pub possession: &'a str,
    pub theme: Theme,
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = resolve(Palette::Field, self.theme);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let playing = (inner.width as usize).saturating_sub(2 * END_ZONE_WIDTH + 2);
        if playing < 20 || inner.height == 0 {
            let pos = field_position(self.yards_to_endzone);
            Paragraph::new(format!("{} ball, {pos} yds to go", self.possession))
                .style(resolve(Palette::Team, self.theme))
                .render(inner, buf);
            return;
        }

        let turf = if self.theme == Theme::Plain { " " } else { "░" };
        let ball = ball_column(self.yards_to_endzone, playing);
        let field = resolve(Palette::Field, self.theme);
        let row = |middle: Vec<Span<'static>>, ends: Span<'static>| {
            let mut spans = vec![ends.clone(), Span::styled("│", field)];
            spans.extend(middle);
            spans.push(Span::styled("│", field));
            spans.push(ends);
            Line::from(spans)
        };
        let blank_end = Span::raw(" ".repeat(END_ZONE_WIDTH));
        let turf_row = || vec![Span::styled(turf.repeat(playing), field)];

        let lines = vec![
            row(
                vec![Span::raw(" ".repeat(playing))],
                Span::styled(center("END", END_ZONE_WIDTH), resolve(Palette::EndZone, self.theme)),
            ),
            row(
                vec![Span::styled(yard_markers(playing), resolve(Palette::Team, self.theme))],
                blank_end.clone(),
            ),
            row(turf_row(), blank_end.clone()),
            row(
                vec![
                    Span::styled(turf.repeat(ball), field),
                    Span::styled(BALL, resolve(Palette::Ball, self.theme)),
                    Span::styled(turf.repeat(playing - ball - 1), field),
                ],
                blank_end.clone(),
            ),
            row(turf_row(), blank_end.clone()),
            row(vec![Span::styled(yard_lines(playing), field)], blank_end.clone()),
            row(
                vec![Span::styled(
                    center(&format!("<-- {} BALL -->", self.possession), playing),
                    resolve(Palette::Team, self.theme),
                )],
                blank_end,
            ),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Column of the ball within a playing surface `width` cells wide.
pub fn ball_column(yards_to_endzone: u8, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let travelled = 100 - usize::from(field_position(yards_to_endzone));
    (travelled * (width - 1) / 100).min(width - 1)
}

fn yard_markers(width: usize) -> String {
    let mut cells = vec![' '; width];
    for yard in (10..100).step_by(10) {
        let label = (if yard <= 50 { yard } else { 100 - yard }).to_string();
        let col = (yard * (width - 1) / 100).saturating_sub(label.len() / 2);
        for (i, ch) in label.chars().enumerate() {
            if let Some(cell) = cells.get_mut(col + i) {
                *cell = ch;
            }
        }
    }
    cells.into_iter().collect()
}

fn yard_lines(width: usize) -> String {
    (0..width).map(|i| if i % 5 == 2 { '┼' } else { '─' }).collect()
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(width - len - left))
}
