use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::prelude::AudioFile;
use rodio::{OutputStreamBuilder, Sink};

use super::clock::PositionClock;
use super::sink::create_sink_at;
use super::types::{TransportCmd, TransportEvent, TransportEventKind};

pub(super) fn spawn_transport_thread(
    rx: Receiver<TransportCmd>,
    events: Sender<TransportEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut source: Option<PathBuf> = None;
        let mut paused = true;
        let mut clock = PositionClock::new();
        let mut volume: f32 = 1.0;
        let mut generation: u64 = 0;
        // Completion must be reported exactly once per loaded source.
        let mut ended_sent = false;

        let emit = |generation: u64, kind: TransportEventKind| {
            let _ = events.send(TransportEvent { generation, kind });
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    TransportCmd::Load {
                        source: path,
                        generation: load_generation,
                    } => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        generation = load_generation;
                        paused = true;
                        ended_sent = false;
                        clock.reset();

                        // Decoders often cannot report totals; tags can.
                        if let Ok(tagged) = lofty::read_from_path(&path) {
                            emit(
                                generation,
                                TransportEventKind::MetadataReady(tagged.properties().duration()),
                            );
                        }

                        match create_sink_at(&stream, &path, Duration::ZERO) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                sink = Some(new_sink);
                                source = Some(path);
                                emit(generation, TransportEventKind::ReadyToPlay);
                            }
                            Err(e) => {
                                log::warn!("transport: cannot load {}: {e}", path.display());
                                source = None;
                                emit(generation, TransportEventKind::Unplayable);
                            }
                        }
                    }

                    TransportCmd::Play => {
                        if let Some(s) = &sink {
                            s.play();
                            if paused {
                                clock.start(Instant::now());
                                paused = false;
                            }
                        }
                    }

                    TransportCmd::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                        }
                        if !paused {
                            clock.pause(Instant::now());
                            paused = true;
                        }
                    }

                    TransportCmd::SeekTo(position) => {
                        // Scrubbing rebuilds the sink and skips into the file.
                        let Some(path) = source.clone() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }
                        if let Some(s) = sink.take() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &path, position) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if paused {
                                    new_sink.pause();
                                } else {
                                    new_sink.play();
                                }
                                sink = Some(new_sink);
                                clock.set(position, Instant::now());
                                ended_sent = false;
                                emit(generation, TransportEventKind::Progress(position));
                            }
                            Err(e) => {
                                log::warn!("transport: seek failed on {}: {e}", path.display());
                                source = None;
                                paused = true;
                                emit(generation, TransportEventKind::Unplayable);
                            }
                        }
                    }

                    TransportCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(s) = &sink {
                            s.set_volume(v);
                        }
                    }

                    TransportCmd::Quit => {
                        if let Some(s) = &sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic progress report + completion check.
                    if let Some(s) = &sink {
                        if !paused {
                            if s.empty() && !ended_sent {
                                ended_sent = true;
                                paused = true;
                                clock.pause(Instant::now());
                                emit(generation, TransportEventKind::Ended);
                            } else if !s.empty() {
                                emit(
                                    generation,
                                    TransportEventKind::Progress(clock.elapsed(Instant::now())),
                                );
                            }
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
