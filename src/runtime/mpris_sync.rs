use crate::app::App;
use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::player::PlayerController;

pub fn update_mpris(mpris: &MprisHandle, app: &App, controller: &PlayerController) {
    let track = app.current_track();
    mpris.set_track_metadata(track.map(|_| app.track_index), track);

    let status = if !controller.has_track() {
        PlaybackStatus::Stopped
    } else if controller.state().is_playing {
        PlaybackStatus::Playing
    } else {
        PlaybackStatus::Paused
    };
    mpris.set_playback(status);
    mpris.set_volume(controller.state().volume as f64);
}
