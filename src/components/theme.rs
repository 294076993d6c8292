use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Border,
    Title,
    Team,
    Score,
    Muted,
    Live,
    Final,
    Highlight,
    Alert,
    Field,
    EndZone,
    Ball,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Styled,
    /// No colors. Emphasis survives as bold/reverse only.
    Plain,
}

impl Theme {
    pub fn from_plain(plain: bool) -> Self {
        if plain { Theme::Plain } else { Theme::Styled }
    }
}

pub fn resolve(palette: Palette, theme: Theme) -> Style {
    if theme == Theme::Plain {
        return match palette {
            Palette::Title | Palette::Score | Palette::Ball => {
                Style::default().add_modifier(Modifier::BOLD)
            }
            Palette::Highlight => Style::default().add_modifier(Modifier::REVERSED),
            _ => Style::default(),
        };
    }

    match palette {
        Palette::Border => Style::default().fg(Color::Indexed(39)),
        Palette::Title => Style::default().fg(Color::Indexed(39)).add_modifier(Modifier::BOLD),
        Palette::Team => Style::default().fg(Color::White),
        Palette::Score => Style::default().fg(Color::Indexed(226)).add_modifier(Modifier::BOLD),
        Palette::Muted => Style::default().fg(Color::Indexed(241)),
        Palette::Live => Style::default().fg(Color::Indexed(196)).add_modifier(Modifier::BOLD),
        Palette::Final => Style::default().fg(Color::Indexed(40)),
        Palette::Highlight => Style::default().fg(Color::Black).bg(Color::Indexed(226)),
        Palette::Alert => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Palette::Field => Style::default().fg(Color::Indexed(34)),
        Palette::EndZone => Style::default().fg(Color::Indexed(196)).add_modifier(Modifier::BOLD),
        Palette::Ball => Style::default().fg(Color::Indexed(208)).add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_has_no_colors() {
        for palette in [Palette::Border, Palette::Score, Palette::Live, Palette::Highlight] {
            let style = resolve(palette, Theme::Plain);
            assert_eq!(style.fg, None);
            assert_eq!(style.bg, None);
        }
        assert!(resolve(Palette::Highlight, Theme::Plain).add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn styled_theme_colors_live_status() {
        assert_eq!(resolve(Palette::Live, Theme::Styled).fg, Some(Color::Indexed(196)));
        assert_eq!(Theme::from_plain(true), Theme::Plain);
        assert_eq!(Theme::from_plain(false), Theme::Styled);
    }
}
