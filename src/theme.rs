//! Per-genre presentation themes.
//!
//! A theme is a pure function of the genre and is applied only at the
//! rendering boundary; playback logic never reads or mutates it.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub dim: Color,
}

/// Theme descriptor for a genre. Unknown genres fall back to the lofi look,
/// matching the stock default genre.
pub fn theme_for(genre: &str) -> Theme {
    match genre {
        "classical" => Theme {
            accent: Color::Rgb(212, 175, 55),
            dim: Color::Rgb(120, 100, 40),
        },
        "blues" => Theme {
            accent: Color::Rgb(70, 130, 200),
            dim: Color::Rgb(40, 70, 110),
        },
        // "lofi" and anything unknown
        _ => Theme {
            accent: Color::Rgb(170, 130, 210),
            dim: Color::Rgb(95, 70, 120),
        },
    }
}
