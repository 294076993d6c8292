use crate::components::field::FIELD_HEIGHT;
use crate::components::mascot::MASCOT_WIDTH;
use tui::layout::{Constraint, Layout, Rect};

pub const HEADER_HEIGHT: u16 = 4;
pub const SITUATION_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const LOG_HEIGHT: u16 = 10;

/// Screen row of the first recent play: the plays block border and its
/// column header sit above it.
pub const PLAYS_FIRST_ROW: u16 = HEADER_HEIGHT + FIELD_HEIGHT + SITUATION_HEIGHT + 2;

/// Pre-computed layout areas for one frame. Unused areas are `Rect::ZERO`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    pub header: Rect,
    pub field: Rect,
    pub mascot: Rect,
    pub situation: Rect,
    pub plays: Rect,
    pub footer: Rect,
    pub logs: Rect,
}

impl LayoutAreas {
    /// Logs and footer are carved from the bottom so the top rows never move.
    pub fn new(area: Rect, full_screen: bool, show_logs: bool, mascot: bool) -> Self {
        let mut areas = LayoutAreas::default();

        let main = if show_logs {
            let [main, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_HEIGHT)]).areas(area);
            areas.logs = logs;
            main
        } else {
            area
        };

        let body = if full_screen {
            main
        } else {
            let [body, footer] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(FOOTER_HEIGHT)])
                    .areas(main);
            areas.footer = footer;
            body
        };

        let [header, field_row, situation, plays] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(SITUATION_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(body);

        if mascot {
            let [field, mascot] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(MASCOT_WIDTH)])
                    .areas(field_row);
            areas.field = field;
            areas.mascot = mascot;
        } else {
            areas.field = field_row;
        }

        areas.header = header;
        areas.situation = situation;
        areas.plays = plays;
        areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_start_at_fixed_row() {
        let areas = LayoutAreas::new(Rect::new(0, 0, 100, 40), false, true, true);
        assert_eq!(areas.plays.y + 2, PLAYS_FIRST_ROW);
        assert_eq!(areas.logs.height, LOG_HEIGHT);
        assert_eq!(areas.footer.height, FOOTER_HEIGHT);
        assert_eq!(areas.mascot.width, MASCOT_WIDTH);
    }

    #[test]
    fn full_screen_drops_footer() {
        let areas = LayoutAreas::new(Rect::new(0, 0, 100, 40), true, false, false);
        assert_eq!(areas.footer, Rect::ZERO);
        assert_eq!(areas.logs, Rect::ZERO);
        assert_eq!(areas.mascot, Rect::ZERO);
        assert_eq!(areas.plays.y + 2, PLAYS_FIRST_ROW);
        assert_eq!(areas.plays.bottom(), 40);
    }
}
