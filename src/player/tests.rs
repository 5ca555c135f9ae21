use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::catalog::Track;
use crate::transport::{Transport, TransportEvent, TransportEventKind};

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Load(PathBuf, u64),
    Play,
    Pause,
    SeekTo(Duration),
    SetVolume(f32),
    Shutdown,
}

#[derive(Default)]
struct MockInner {
    ops: Vec<Op>,
    queued: Vec<TransportEvent>,
}

/// Recording transport double: every operation is logged, events are
/// whatever the test queues up.
#[derive(Clone, Default)]
pub(crate) struct MockTransport(Arc<Mutex<MockInner>>);

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.lock().unwrap().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.0.lock().unwrap().ops.clear();
    }

    pub fn push_event(&self, generation: u64, kind: TransportEventKind) {
        self.0
            .lock()
            .unwrap()
            .queued
            .push(TransportEvent { generation, kind });
    }

    /// Generation of the most recent `Load`, as the controller assigned it.
    pub fn last_load_generation(&self) -> u64 {
        self.0
            .lock()
            .unwrap()
            .ops
            .iter()
            .rev()
            .find_map(|op| match op {
                Op::Load(_, generation) => Some(*generation),
                _ => None,
            })
            .expect("no Load recorded")
    }

    pub fn count(&self, matcher: impl Fn(&Op) -> bool) -> usize {
        self.0.lock().unwrap().ops.iter().filter(|op| matcher(op)).count()
    }
}

impl Transport for MockTransport {
    fn load(&mut self, source: &Path, generation: u64) {
        self.0
            .lock()
            .unwrap()
            .ops
            .push(Op::Load(source.to_path_buf(), generation));
    }

    fn play(&mut self) {
        self.0.lock().unwrap().ops.push(Op::Play);
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().ops.push(Op::Pause);
    }

    fn seek_to(&mut self, position: Duration) {
        self.0.lock().unwrap().ops.push(Op::SeekTo(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.lock().unwrap().ops.push(Op::SetVolume(volume));
    }

    fn events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.0.lock().unwrap().queued)
    }

    fn shutdown(&mut self) {
        self.0.lock().unwrap().ops.push(Op::Shutdown);
    }
}

pub(crate) fn track(title: &str, audio: &str) -> Track {
    Track {
        id: 1,
        title: title.to_string(),
        artist: Some("Artist".to_string()),
        album: None,
        license: None,
        audio: PathBuf::from(audio),
        thumb: None,
        duration: None,
    }
}

fn controller_with_mock() -> (PlayerController, MockTransport) {
    let mock = MockTransport::new();
    let controller = PlayerController::new(Box::new(mock.clone()), DEFAULT_VOLUME);
    mock.clear_ops(); // drop the initial SetVolume
    (controller, mock)
}

/// Load a source and mark it ready, as the transport would after a swap.
/// Returns the generation the controller assigned to the load.
fn load_ready(controller: &mut PlayerController, mock: &MockTransport, audio: &str) -> u64 {
    controller.commit_swap(Path::new(audio));
    let generation = mock.last_load_generation();
    mock.push_event(generation, TransportEventKind::ReadyToPlay);
    controller.drain_transport();
    mock.clear_ops();
    generation
}

#[test]
fn operations_are_noops_without_a_track() {
    let (mut controller, mock) = controller_with_mock();

    controller.toggle_play();
    controller.seek_to(Duration::from_secs(10));
    controller.seek_by(5);
    assert!(mock.ops().is_empty());
    assert!(!controller.state().is_playing);
}

#[test]
fn toggle_play_drives_transport_play_then_pause() {
    let (mut controller, mock) = controller_with_mock();
    load_ready(&mut controller, &mock, "/music/a.mp3");

    controller.toggle_play();
    assert!(controller.state().is_playing);
    assert_eq!(mock.ops(), vec![Op::Play]);

    controller.toggle_play();
    assert!(!controller.state().is_playing);
    assert_eq!(mock.ops(), vec![Op::Play, Op::Pause]);
}

#[test]
fn play_before_ready_retries_once_on_ready_signal() {
    let (mut controller, mock) = controller_with_mock();
    controller.commit_swap(Path::new("/music/a.mp3"));
    let generation = mock.last_load_generation();
    mock.clear_ops();

    // Not ready yet: intent flips but no transport play is issued.
    controller.toggle_play();
    assert!(controller.state().is_playing);
    assert!(mock.ops().is_empty());

    // The ready signal triggers the single deferred retry.
    mock.push_event(generation, TransportEventKind::ReadyToPlay);
    controller.drain_transport();
    assert_eq!(mock.ops(), vec![Op::Play]);
}

#[test]
fn unplayable_source_settles_to_paused_with_zero_duration() {
    let (mut controller, mock) = controller_with_mock();
    controller.commit_swap(Path::new("/music/broken.mp3"));
    let generation = mock.last_load_generation();

    controller.toggle_play();
    mock.push_event(generation, TransportEventKind::Unplayable);
    controller.drain_transport();

    assert!(!controller.state().is_playing);
    assert_eq!(controller.state().duration, Duration::ZERO);
    // No play call was ever issued for the broken source.
    assert_eq!(mock.count(|op| matches!(op, Op::Play)), 0);
}

#[test]
fn set_volume_zero_mutes_and_toggle_mute_restores_exactly() {
    let (mut controller, _mock) = controller_with_mock();

    controller.set_volume(0.55);
    assert!(!controller.state().is_muted);

    controller.set_volume(0.0);
    assert!(controller.state().is_muted);

    controller.toggle_mute();
    assert!(!controller.state().is_muted);
    assert!((controller.state().volume - 0.55).abs() < 1e-6);
}

#[test]
fn toggle_mute_records_and_restores_current_volume() {
    let (mut controller, mock) = controller_with_mock();

    controller.set_volume(0.3);
    controller.toggle_mute();
    assert!(controller.state().is_muted);
    assert_eq!(controller.state().volume, 0.0);

    controller.toggle_mute();
    assert!((controller.state().volume - 0.3).abs() < 1e-6);
    // Volume changes were forwarded to the transport each time.
    assert_eq!(mock.count(|op| matches!(op, Op::SetVolume(_))), 3);
}

#[test]
fn volume_steps_clamp_and_mute_at_zero() {
    let (mut controller, _mock) = controller_with_mock();

    // 0.8 default; twenty decrements floor at 0.0 and mute, never negative.
    for _ in 0..20 {
        controller.step_volume(-0.05);
    }
    assert_eq!(controller.state().volume, 0.0);
    assert!(controller.state().is_muted);

    // Stepping back up unmutes immediately.
    controller.step_volume(0.05);
    assert!(!controller.state().is_muted);

    for _ in 0..30 {
        controller.step_volume(0.05);
    }
    assert_eq!(controller.state().volume, 1.0);
}

#[test]
fn seek_clamps_to_track_bounds() {
    let (mut controller, mock) = controller_with_mock();
    let generation = load_ready(&mut controller, &mock, "/music/a.mp3");
    // hand the controller a known duration
    mock.push_event(
        generation,
        TransportEventKind::MetadataReady(Duration::from_secs(200)),
    );
    controller.drain_transport();
    mock.clear_ops();

    controller.seek_to(Duration::from_secs(9999));
    assert_eq!(controller.state().current_time, Duration::from_secs(200));
    assert_eq!(mock.ops(), vec![Op::SeekTo(Duration::from_secs(200))]);

    controller.seek_to(Duration::ZERO);
    controller.seek_by(-5);
    assert_eq!(controller.state().current_time, Duration::ZERO);
}

#[test]
fn seek_is_ignored_until_metadata_arrives() {
    let (mut controller, mock) = controller_with_mock();
    load_ready(&mut controller, &mock, "/music/a.mp3");

    controller.seek_to(Duration::from_secs(30));
    assert!(mock.ops().is_empty());
    assert_eq!(controller.state().current_time, Duration::ZERO);
}

#[test]
fn completion_signals_advance_exactly_once_and_arms_autoplay() {
    let (mut controller, mock) = controller_with_mock();
    let generation = load_ready(&mut controller, &mock, "/music/a.mp3");

    controller.toggle_play();
    mock.push_event(generation, TransportEventKind::Ended);
    let signals = controller.drain_transport();

    assert_eq!(signals, vec![PlayerSignal::TrackEnded]);
    assert!(!controller.state().is_playing);
    assert!(controller.state().auto_play_intent);

    // Nothing further pending: no duplicate advance.
    assert!(controller.drain_transport().is_empty());
}

#[test]
fn events_from_superseded_generations_are_discarded() {
    let (mut controller, mock) = controller_with_mock();
    let stale = load_ready(&mut controller, &mock, "/music/a.mp3");

    controller.commit_swap(Path::new("/music/b.mp3"));

    mock.push_event(stale, TransportEventKind::Ended);
    mock.push_event(stale, TransportEventKind::Progress(Duration::from_secs(50)));
    let signals = controller.drain_transport();

    assert!(signals.is_empty());
    assert_eq!(controller.state().current_time, Duration::ZERO);
    assert!(!controller.state().auto_play_intent);
}

// --- sequencer ---

fn sequencer() -> TransitionSequencer {
    TransitionSequencer::new(SequencerTimings::new(180, 260, false))
}

#[test]
fn swap_sequence_commits_after_delay_and_consumes_autoplay() {
    let (mut controller, mock) = controller_with_mock();
    let mut seq = sequencer();
    let t0 = Instant::now();

    controller.arm_autoplay();
    seq.begin(track("Last Summer", "/music/lofi-01.mp3"), t0, &mut controller);

    // Old audio is silenced immediately; info hides for the fade-out.
    assert!(!seq.info_visible());
    assert_eq!(mock.ops(), vec![Op::Pause]);

    // Before the delay elapses nothing is committed.
    seq.tick(t0 + Duration::from_millis(100), &mut controller);
    assert_eq!(mock.count(|op| matches!(op, Op::Load(..))), 0);

    // Deadline passed: the source commits and (thumbless) preload settles.
    seq.tick(t0 + Duration::from_millis(200), &mut controller);
    assert_eq!(mock.count(|op| matches!(op, Op::Load(..))), 1);

    seq.tick(t0 + Duration::from_millis(201), &mut controller);
    assert!(seq.info_visible());
    // Intent was consumed and playback intent re-established.
    assert!(!controller.state().auto_play_intent);
    assert!(controller.state().is_playing);

    // Once the transport reports ready, the deferred play is issued.
    let generation = mock.last_load_generation();
    mock.push_event(generation, TransportEventKind::ReadyToPlay);
    controller.drain_transport();
    assert_eq!(mock.count(|op| matches!(op, Op::Play)), 1);

    // Fade-in completes back to Idle.
    seq.tick(t0 + Duration::from_secs(2), &mut controller);
    assert!(seq.is_idle());
}

#[test]
fn second_change_inside_delay_window_discards_the_first() {
    let (mut controller, mock) = controller_with_mock();
    let mut seq = sequencer();
    let t0 = Instant::now();

    seq.begin(track("First", "/music/first.mp3"), t0, &mut controller);
    // 100ms later — still inside the 180ms window — the target changes.
    seq.begin(
        track("Second", "/music/second.mp3"),
        t0 + Duration::from_millis(100),
        &mut controller,
    );

    // Run well past both deadlines.
    let mut now = t0 + Duration::from_millis(300);
    for _ in 0..4 {
        seq.tick(now, &mut controller);
        now += Duration::from_millis(50);
    }

    // Only the latest track's source was ever committed.
    let loads: Vec<Op> = mock
        .ops()
        .into_iter()
        .filter(|op| matches!(op, Op::Load(..)))
        .collect();
    assert_eq!(
        loads,
        vec![Op::Load(PathBuf::from("/music/second.mp3"), 1)]
    );
}

#[test]
fn stale_preload_results_never_flip_the_art() {
    let (mut controller, _mock) = controller_with_mock();
    let mut seq = sequencer();
    let t0 = Instant::now();

    // First sequence commits (thumbless preload settles into the channel).
    seq.begin(track("First", "/music/first.mp3"), t0, &mut controller);
    seq.tick(t0 + Duration::from_millis(200), &mut controller);

    // Before the settle is processed the target changes again.
    seq.begin(
        track("Second", "/music/second.mp3"),
        t0 + Duration::from_millis(210),
        &mut controller,
    );

    let mut now = t0 + Duration::from_millis(400);
    for _ in 0..4 {
        seq.tick(now, &mut controller);
        now += Duration::from_millis(50);
    }
    seq.tick(t0 + Duration::from_secs(2), &mut controller);

    // The stale epoch's settle was discarded; the second sequence still
    // settled on its own result and completed.
    assert!(seq.info_visible());
    assert!(seq.is_idle());
}

#[test]
fn clear_unloads_and_hides_visuals() {
    let (mut controller, mock) = controller_with_mock();
    let mut seq = sequencer();
    let t0 = Instant::now();

    controller.arm_autoplay();
    seq.begin(track("First", "/music/first.mp3"), t0, &mut controller);
    seq.clear(&mut controller);

    assert!(!seq.info_visible());
    assert!(seq.art().is_none());
    assert!(!controller.has_track());
    assert!(!controller.state().is_playing);

    // The abandoned sequence never commits.
    seq.tick(t0 + Duration::from_secs(1), &mut controller);
    assert_eq!(mock.count(|op| matches!(op, Op::Load(..))), 0);
}

#[test]
fn reduced_motion_collapses_delays_but_keeps_ordering() {
    let (mut controller, mock) = controller_with_mock();
    let mut seq = TransitionSequencer::new(SequencerTimings::new(180, 260, true));
    let t0 = Instant::now();

    controller.arm_autoplay();
    seq.begin(track("First", "/music/first.mp3"), t0, &mut controller);

    // Zero-length deadlines: the very next ticks run the whole sequence.
    seq.tick(t0, &mut controller);
    seq.tick(t0, &mut controller);
    seq.tick(t0, &mut controller);

    assert_eq!(mock.count(|op| matches!(op, Op::Load(..))), 1);
    assert!(seq.info_visible());
    assert!(!controller.state().auto_play_intent);
    assert!(seq.is_idle());
}

#[test]
fn art_buffer_flips_between_slots() {
    let mut buffer = ArtBuffer::new();
    assert!(buffer.visible().is_none());
    assert_eq!(buffer.visible_index(), 0);

    buffer.stage(None);
    buffer.flip();
    assert_eq!(buffer.visible_index(), 1);
    assert!(buffer.visible().is_none());

    buffer.flip();
    assert_eq!(buffer.visible_index(), 0);
}
