//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. The
//! per-genre theme is resolved here — the single "apply theme" boundary —
//! and `draw` returns the rects of the clickable regions for mouse mapping.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::facts::FactBox;
use crate::player::{AlbumArt, PlaybackState, TransitionSequencer};
use crate::theme::theme_for;

/// Clickable regions of the last rendered frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiLayout {
    pub progress: Rect,
    pub volume: Rect,
    /// Inner genre list area; one genre per row in display order.
    pub genres: Rect,
    /// Inner track list area; one track per row in playlist order.
    pub tracks: Rect,
}

/// Format a `Duration` as `M:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    [
        "[space] play/pause".to_string(),
        format!("[←/→] seek -/+{}s", seek_seconds),
        "[↑/↓] volume".to_string(),
        "[m] mute".to_string(),
        "[n/p] next/prev".to_string(),
        "[j/k] genre".to_string(),
        "[1-9] track".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Half-block rendering: every text row carries two pixel rows, upper as
/// foreground and lower as background of `▀`.
fn art_lines(art: &AlbumArt, faded: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity((art.height / 2) as usize);
    for row in 0..art.height / 2 {
        let mut spans = Vec::with_capacity(art.width as usize);
        for x in 0..art.width {
            let (tr, tg, tb) = art.pixel(x, row * 2);
            let (br, bg, bb) = art.pixel(x, row * 2 + 1);
            let mut style = Style::default()
                .fg(Color::Rgb(tr, tg, tb))
                .bg(Color::Rgb(br, bg, bb));
            if faded {
                style = style.add_modifier(Modifier::DIM);
            }
            spans.push(Span::styled("▀", style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the entire UI. Returns the clickable regions of this frame.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playback: &PlaybackState,
    sequencer: &TransitionSequencer,
    facts: &FactBox,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiLayout {
    let theme = theme_for(&app.genre);
    let mut layout = UiLayout::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadence ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Three columns: genres+tracks | player | facts+credits
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28),
            Constraint::Min(30),
            Constraint::Length(40),
        ])
        .split(chunks[1]);

    draw_left(frame, app, theme.accent, columns[0], &mut layout);
    draw_player(
        frame,
        app,
        playback,
        sequencer,
        theme.accent,
        columns[1],
        &mut layout,
    );
    draw_right(frame, app, facts, columns[2]);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    layout
}

fn draw_left(frame: &mut Frame, app: &App, accent: Color, area: Rect, layout: &mut UiLayout) {
    let genre_count = app.catalog.genres().len() as u16;
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(genre_count.saturating_add(2).max(3)),
            Constraint::Min(3),
        ])
        .split(area);

    // Genre list
    let genre_lines: Vec<Line> = app
        .catalog
        .genres()
        .iter()
        .map(|g| {
            if g.id == app.genre {
                Line::from(Span::styled(
                    format!("> {}", g.label),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", g.label))
            }
        })
        .collect();
    let genres =
        Paragraph::new(genre_lines).block(Block::default().borders(Borders::ALL).title(" genres "));
    frame.render_widget(genres, halves[0]);
    layout.genres = inner(halves[0]);

    // Track list
    let track_lines: Vec<Line> = app
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let text = format!("{}. {}", i + 1, track.display());
            if i == app.track_index {
                Line::from(Span::styled(
                    text,
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();
    let tracks = if track_lines.is_empty() {
        Paragraph::new("No tracks")
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
    } else {
        Paragraph::new(track_lines)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
    };
    frame.render_widget(tracks, halves[1]);
    layout.tracks = inner(halves[1]);
}

fn draw_player(
    frame: &mut Frame,
    app: &App,
    playback: &PlaybackState,
    sequencer: &TransitionSequencer,
    accent: Color,
    area: Rect,
    layout: &mut UiLayout,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" player ")
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        });
    let body = block.inner(area);
    frame.render_widget(block, area);

    let Some(track) = app.current_track() else {
        let placeholder = Paragraph::new("No track loaded for this genre yet.")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, body);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // album art
            Constraint::Length(2), // title + artist
            Constraint::Length(1), // progress bar
            Constraint::Length(1), // time labels
            Constraint::Length(1), // volume row
            Constraint::Length(1), // playback status
        ])
        .split(body);

    let faded = !sequencer.info_visible();

    // Album art (the visible slot of the double buffer)
    match sequencer.art() {
        Some(art) => {
            let paragraph = Paragraph::new(art_lines(art, faded)).alignment(Alignment::Center);
            frame.render_widget(paragraph, rows[0]);
        }
        None => {
            let placeholder = Paragraph::new("♪")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, rows[0]);
        }
    }

    // Track info, dimmed while fading
    let info_style = if faded {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            track.title.clone(),
            info_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            track.artist.clone().unwrap_or_default(),
            info_style,
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(info, rows[1]);

    // Progress bar
    let progress = Gauge::default()
        .ratio(playback.progress_ratio())
        .gauge_style(Style::default().fg(accent))
        .label("");
    frame.render_widget(progress, rows[2]);
    layout.progress = rows[2];

    // Time labels
    let times = Paragraph::new(format!(
        "{} / {}",
        format_mmss(playback.current_time),
        format_mmss(playback.duration)
    ))
    .alignment(Alignment::Center);
    frame.render_widget(times, rows[3]);

    // Volume row
    let width = rows[4].width.saturating_sub(12).max(4) as usize;
    let filled = ((playback.volume as f64) * width as f64).round() as usize;
    let bar: String = "█".repeat(filled.min(width)) + &"░".repeat(width - filled.min(width));
    let label = if playback.is_muted {
        "muted".to_string()
    } else {
        format!("{:>3.0}%", playback.volume * 100.0)
    };
    let volume = Paragraph::new(format!("vol {bar} {label}"));
    frame.render_widget(volume, rows[4]);
    layout.volume = rows[4];

    // Playback status
    let status = if playback.is_playing { "Playing" } else { "Paused" };
    let status_par = Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().fg(accent));
    frame.render_widget(status_par, rows[5]);
}

fn draw_right(frame: &mut Frame, app: &App, facts: &FactBox, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(area);

    // Fact box, dimmed while fading between facts
    let fact_style = if facts.visible() {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let fact = Paragraph::new(facts.fact())
        .style(fact_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" did you know? ")
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(fact, halves[0]);

    // Music credits for the current track
    let credits = match app.current_track() {
        Some(track) => format!(
            "Title: {}\nArtist: {}\nAlbum: {}\nLicense: {}",
            track.title,
            track.artist.as_deref().unwrap_or("-"),
            track.album.as_deref().unwrap_or("-"),
            track.license.as_deref().unwrap_or("-"),
        ),
        None => "Music credits and source info will appear here.".to_string(),
    };
    let credits_par = Paragraph::new(credits)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" music credits ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(credits_par, halves[1]);
}
