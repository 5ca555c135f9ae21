//! Command surface: keyboard, mouse and MPRIS all funnel into the same
//! controller/shell operations — one mutation path for playback state.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::App;
use crate::config::ControlsSettings;
use crate::player::PlayerController;
use crate::ui::UiLayout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    PlaySelected,
    SeekForward,
    SeekBack,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    NextTrack,
    PrevTrack,
    SelectTrack(usize),
    SelectGenre(usize),
    CycleGenre,
    CycleGenreBack,
    SeekToFraction(f64),
    SetVolumeFraction(f64),
    Quit,
}

/// Map a key press to a command. There is no text-entry mode in this UI,
/// so the shortcuts are always active.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char(' ') => Some(Command::TogglePlay),
        KeyCode::Enter => Some(Command::PlaySelected),
        KeyCode::Right => Some(Command::SeekForward),
        KeyCode::Left => Some(Command::SeekBack),
        KeyCode::Up => Some(Command::VolumeUp),
        KeyCode::Down => Some(Command::VolumeDown),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMute),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NextTrack),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::PrevTrack),
        KeyCode::Char('j') | KeyCode::Tab => Some(Command::CycleGenre),
        KeyCode::Char('k') => Some(Command::CycleGenreBack),
        KeyCode::Char(c @ '1'..='9') => {
            Some(Command::SelectTrack(c as usize - '1' as usize))
        }
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Map a left click to a command using the rects of the last rendered
/// frame. A click on the progress bar seeks to the horizontal fraction of
/// the bar width; the volume bar sets volume the same way.
pub fn map_mouse(event: MouseEvent, layout: &UiLayout) -> Option<Command> {
    if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
        return None;
    }
    let (x, y) = (event.column, event.row);

    if hit(layout.progress, x, y) {
        return Some(Command::SeekToFraction(fraction(layout.progress, x)));
    }
    if hit(layout.volume, x, y) {
        return Some(Command::SetVolumeFraction(fraction(layout.volume, x)));
    }
    if hit(layout.tracks, x, y) {
        return Some(Command::SelectTrack((y - layout.tracks.y) as usize));
    }
    if hit(layout.genres, x, y) {
        return Some(Command::SelectGenre((y - layout.genres.y) as usize));
    }
    None
}

fn hit(rect: Rect, x: u16, y: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && x >= rect.x
        && x < rect.x + rect.width
        && y >= rect.y
        && y < rect.y + rect.height
}

fn fraction(rect: Rect, x: u16) -> f64 {
    if rect.width == 0 {
        return 0.0;
    }
    let offset = x.saturating_sub(rect.x) as f64;
    (offset / rect.width as f64).clamp(0.0, 1.0)
}

/// Execute a command against the shell and the controller. Returns `true`
/// when the app should quit.
pub fn apply(
    command: Command,
    app: &mut App,
    controller: &mut PlayerController,
    controls: &ControlsSettings,
) -> bool {
    match command {
        Command::TogglePlay => controller.toggle_play(),
        Command::PlaySelected => controller.play(),
        Command::SeekForward => controller.seek_by(controls.seek_seconds as i64),
        Command::SeekBack => controller.seek_by(-(controls.seek_seconds as i64)),
        Command::VolumeUp => controller.step_volume(controls.volume_step),
        Command::VolumeDown => controller.step_volume(-controls.volume_step),
        Command::ToggleMute => controller.toggle_mute(),
        Command::NextTrack => {
            if app.has_tracks() {
                controller.arm_autoplay();
                app.next_track();
            }
        }
        Command::PrevTrack => {
            if app.has_tracks() {
                controller.arm_autoplay();
                app.prev_track();
            }
        }
        Command::SelectTrack(index) => {
            if app.select_track(index) {
                controller.arm_autoplay();
            }
        }
        // Switching genre never auto-plays.
        Command::SelectGenre(position) => {
            app.select_genre_at(position);
        }
        Command::CycleGenre => {
            app.cycle_genre();
        }
        Command::CycleGenreBack => {
            app.cycle_genre_back();
        }
        Command::SeekToFraction(fraction) => {
            let duration = controller.state().duration;
            if !duration.is_zero() {
                controller.seek_to(duration.mul_f64(fraction));
            }
        }
        Command::SetVolumeFraction(fraction) => controller.set_volume(fraction as f32),
        Command::Quit => return true,
    }
    false
}
