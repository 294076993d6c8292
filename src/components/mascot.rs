use crate::components::theme::{Palette, Theme, resolve};
use crate::state::live::Mood;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

pub const FRAME_COUNT: usize = 4;
pub const MASCOT_WIDTH: u16 = 14;

const DANCING: [[&str; 3]; 4] = [
    ["   O  ", "  /|\\ ", "  / \\ "],
    ["   O  ", "  \\|/ ", "  / \\ "],
    ["   O  ", "  /|/ ", "   |  "],
    ["   O  ", "  \\|\\ ", "   |  "],
];

const SAD: [[&str; 3]; 2] = [
    ["   O  ", "  /|  ", "  / \\ "],
    ["   o  ", "  /|  ", "  / \\ "],
];

const CELEBRATING: [[&str; 3]; 4] = [
    ["  \\O/ ", "   |  ", "  / \\ "],
    ["  \\O/ ", "   |  ", "  /|\\ "],
    ["   O  ", "  \\|/ ", "   ^  "],
    ["  \\O/ ", "   |  ", "  < > "],
];

const FIREWORKS: [[&str; 3]; 5] = [
    ["    *    ", "         ", "         "],
    ["   ***   ", "   *•*   ", "         "],
    ["  * * *  ", "  *•*•*  ", "  * * *  "],
    [" *  *  * ", "  * • *  ", " *  *  * "],
    ["*   *   *", "    •    ", "*   *   *"],
];

const FIREWORK_COLORS: [u8; 6] = [196, 226, 21, 201, 46, 208];

pub fn mascot_frame(mood: Mood, frame: usize) -> [&'static str; 3] {
    match mood {
        Mood::Normal => DANCING[frame % DANCING.len()],
        Mood::Sad => SAD[frame % SAD.len()],
        Mood::Celebrating => CELEBRATING[frame % CELEBRATING.len()],
    }
}

pub fn fireworks_frame(frame: usize) -> [&'static str; 3] {
    FIREWORKS[frame % FIREWORKS.len()]
}

/// Primary team color as a 256-color index.
pub fn team_color(abbreviation: &str) -> Color {
    let index = match abbreviation {
        "ARI" => 161,
        "ATL" | "KC" | "SF" | "TB" => 196,
        "BAL" | "MIN" => 55,
        "BUF" | "DAL" | "IND" | "LAR" | "NE" | "NYG" => 21,
        "CAR" | "DET" | "LAC" | "TEN" => 39,
        "CHI" => 202,
        "CIN" | "CLE" | "DEN" => 208,
        "GB" | "NYJ" | "SEA" => 28,
        "HOU" | "WAS" => 124,
        "JAX" | "PHI" => 30,
        "LV" => 247,
        "MIA" => 37,
        "NO" | "PIT" => 220,
        _ => 255,
    };
    Color::Indexed(index)
}

pub struct MascotView<'a> {
    pub team: &'a str,
    pub mood: Mood,
    pub frame: usize,
    pub theme: Theme,
}

impl Widget for MascotView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let body = if self.theme == Theme::Plain {
            Style::default()
        } else {
            Style::default().fg(team_color(self.team)).add_modifier(Modifier::BOLD)
        };

        let mut lines = Vec::with_capacity(7);
        if self.mood == Mood::Celebrating {
            let sparks = if self.theme == Theme::Plain {
                Style::default()
            } else {
                let color = FIREWORK_COLORS[self.frame % FIREWORK_COLORS.len()];
                Style::default().fg(Color::Indexed(color)).add_modifier(Modifier::BOLD)
            };
            lines.extend(fireworks_frame(self.frame).map(|row| Line::from(Span::styled(row, sparks))));
        }
        lines.push(Line::from(Span::styled(
            format!(" {} ", self.team),
            resolve(Palette::Title, self.theme),
        )));
        lines.extend(mascot_frame(self.mood, self.frame).map(|row| Line::from(Span::styled(row, body))));

        Paragraph::new(lines).alignment(Alignment::Center).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle_per_mood() {
        assert_eq!(mascot_frame(Mood::Normal, 0), mascot_frame(Mood::Normal, FRAME_COUNT));
        assert_eq!(mascot_frame(Mood::Sad, 1), mascot_frame(Mood::Sad, 3));
        assert_ne!(mascot_frame(Mood::Celebrating, 0), mascot_frame(Mood::Normal, 0));
        assert_eq!(fireworks_frame(5), fireworks_frame(0));
    }

    #[test]
    fn unknown_team_falls_back_to_white() {
        assert_eq!(team_color("KC"), Color::Indexed(196));
        assert_eq!(team_color("XYZ"), Color::Indexed(255));
    }
}
