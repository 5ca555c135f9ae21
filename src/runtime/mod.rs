use std::env;
use std::sync::mpsc;
use std::time::Instant;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::facts::{FactBox, FactDb};
use crate::mpris::ControlCmd;
use crate::player::{PlayerController, SequencerTimings, TransitionSequencer};
use crate::transport::RodioTransport;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();

    // An assets directory on the command line overrides the configured one.
    if let Some(dir) = env::args().nth(1) {
        settings.catalog.assets_dir = dir;
    }

    let catalog = startup::load_catalog(&settings);
    let mut app = App::new(catalog, &settings.catalog.default_genre);
    log::info!(
        "catalog: {} genres, starting on '{}'",
        app.catalog.genres().len(),
        app.genre
    );

    let transport = RodioTransport::new();
    let mut controller =
        PlayerController::new(Box::new(transport), settings.audio.default_volume);
    let mut sequencer = TransitionSequencer::new(SequencerTimings::new(
        settings.audio.swap_delay_ms,
        settings.audio.info_fade_ms,
        settings.ui.reduced_motion,
    ));
    let mut facts = FactBox::new(
        FactDb::embedded(),
        &app.genre,
        settings.ui.fact_rotate_ms,
        settings.ui.reduced_motion,
        Instant::now(),
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app, &controller);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &mut sequencer,
        &mut facts,
        &mpris,
        &control_rx,
    );

    // Join the transport thread before restoring the terminal so no late
    // audio callback outlives the player.
    controller.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    run_result
}
