use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_transport_thread;
use super::types::{Transport, TransportCmd, TransportEvent};

/// The production [`Transport`]: a `rodio` sink driven on a dedicated audio
/// thread through an mpsc command channel. Events flow back over a second
/// channel and are drained by the controller on the UI thread.
pub struct RodioTransport {
    tx: Sender<TransportCmd>,
    events_rx: Receiver<TransportEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioTransport {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<TransportCmd>();
        let (events_tx, events_rx) = mpsc::channel::<TransportEvent>();
        let join = spawn_transport_thread(rx, events_tx);

        Self {
            tx,
            events_rx,
            join: Mutex::new(Some(join)),
        }
    }

    fn send(&self, cmd: TransportCmd) {
        let _ = self.tx.send(cmd);
    }
}

impl Default for RodioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RodioTransport {
    fn load(&mut self, source: &Path, generation: u64) {
        self.send(TransportCmd::Load {
            source: source.to_path_buf(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(TransportCmd::Play);
    }

    fn pause(&mut self) {
        self.send(TransportCmd::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.send(TransportCmd::SeekTo(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(TransportCmd::SetVolume(volume));
    }

    fn events(&mut self) -> Vec<TransportEvent> {
        self.events_rx.try_iter().collect()
    }

    fn shutdown(&mut self) {
        self.send(TransportCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for RodioTransport {
    fn drop(&mut self) {
        self.shutdown();
    }
}
