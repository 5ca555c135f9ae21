use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::commands::{self, Command};
use crate::config;
use crate::facts::FactBox;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlayerController, PlayerSignal, TransitionSequencer};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui::{self, UiLayout};

/// Main terminal event loop: advances the swap/fact state machines, drains
/// transport and MPRIS events, draws the UI and dispatches input. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController,
    sequencer: &mut TransitionSequencer,
    facts: &mut FactBox,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut layout = UiLayout::default();
    let mut last_genre = app.genre.clone();
    let mut last_mpris_index = usize::MAX;
    let mut last_mpris_playing = false;
    let mut last_mpris_has_track = false;

    loop {
        let now = Instant::now();

        // A changed selection starts the swap sequence for the new track.
        if app.track_dirty {
            app.clear_track_dirty();
            match app.current_track().cloned() {
                Some(track) => sequencer.begin(track, now, controller),
                None => sequencer.clear(controller),
            }
        }

        // Genre changes swap the fact box as well.
        if app.genre != last_genre {
            facts.on_genre_change(&app.genre, now);
            last_genre = app.genre.clone();
        }

        // Transport events → derived state; completion advances the track
        // (the auto-play intent is already armed by the controller).
        for signal in controller.drain_transport() {
            match signal {
                PlayerSignal::TrackEnded => app.next_track(),
            }
        }

        sequencer.tick(now, controller);
        facts.tick(now);

        // Keep MPRIS in sync even when changes come from auto-advance.
        let playing = controller.state().is_playing;
        if app.track_index != last_mpris_index
            || playing != last_mpris_playing
            || controller.has_track() != last_mpris_has_track
        {
            update_mpris(mpris, app, controller);
            last_mpris_index = app.track_index;
            last_mpris_playing = playing;
            last_mpris_has_track = controller.has_track();
        }

        terminal.draw(|f| {
            layout = ui::draw(
                f,
                app,
                controller.state(),
                sequencer,
                facts,
                &settings.ui,
                &settings.controls,
            );
        })?;

        // MPRIS commands funnel into the same operations as local input.
        while let Ok(cmd) = control_rx.try_recv() {
            match cmd {
                ControlCmd::Quit => return Ok(()),
                ControlCmd::Play => controller.play(),
                ControlCmd::Pause => controller.pause(),
                ControlCmd::PlayPause => controller.toggle_play(),
                ControlCmd::Stop => {
                    controller.pause();
                    controller.seek_to(Duration::ZERO);
                }
                ControlCmd::Next => {
                    commands::apply(Command::NextTrack, app, controller, &settings.controls);
                }
                ControlCmd::Prev => {
                    commands::apply(Command::PrevTrack, app, controller, &settings.controls);
                }
                ControlCmd::SetVolume(v) => controller.set_volume(v as f32),
            }
            update_mpris(mpris, app, controller);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(command) = commands::map_key(key) {
                        if commands::apply(command, app, controller, &settings.controls) {
                            break;
                        }
                        update_mpris(mpris, app, controller);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(command) = commands::map_mouse(mouse, &layout) {
                        if commands::apply(command, app, controller, &settings.controls) {
                            break;
                        }
                        update_mpris(mpris, app, controller);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
