//! Timeline engine: keyframe store, playback, and drive selection

use crate::easing::Easing;
use crate::export::{generate_code, ExportSettings};
use crate::keyframe::{sort_by_time, Keyframe};
use crate::path::preview_points;
use crate::playback::{DriveMode, PlayState, ScrollDrive, ScrollSettings};
use crate::timeline::Timeline;
use prism_core::{CameraPose, KeyframeId, Vec3};
use prism_scene::CameraRig;

/// Owns the keyframe list and the derived interpolation timeline, and
/// drives the camera from either the frame clock or a scroll fraction.
///
/// Every operation that needs at least 2 keyframes silently no-ops below
/// that threshold — the timeline simply is not ready yet.
pub struct TimelineEngine {
    keyframes: Vec<Keyframe>,
    easing: Easing,
    /// Nominal animation duration setting in seconds. Segment spans come
    /// from keyframe times; this setting is carried for UI and export
    /// metadata only.
    duration: f64,
    looping: bool,
    timeline: Option<Timeline>,
    state: PlayState,
    elapsed: f64,
    drive: DriveMode,
    scroll: ScrollDrive,
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
            easing: Easing::default(),
            duration: 5.0,
            looping: false,
            timeline: None,
            state: PlayState::Stopped,
            elapsed: 0.0,
            drive: DriveMode::Clock,
            scroll: ScrollDrive::default(),
        }
    }
}

impl TimelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- keyframe mutation API (the commands' mutation path) ----

    /// Add a keyframe capturing the camera's current pose.
    ///
    /// With no explicit time, spacing is deterministic: one second after
    /// the last keyframe, or zero on an empty list. Returns a clone of
    /// the stored keyframe (commands keep it by value for undo).
    pub fn add_keyframe(&mut self, camera: &CameraRig, time: Option<f64>) -> Keyframe {
        let time = time.unwrap_or_else(|| {
            self.keyframes.last().map_or(0.0, |last| last.time + 1.0)
        });
        let keyframe = Keyframe::new(time, camera.pose());
        log::debug!("timeline: add keyframe {:?} at {}s", keyframe.id, keyframe.time);
        self.insert_keyframe(keyframe.clone());
        keyframe
    }

    /// Insert an already-built keyframe (redo path re-inserts the same id),
    /// keeping the list sorted and rebuilding the timeline.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
        sort_by_time(&mut self.keyframes);
        self.rebuild();
    }

    /// Remove a keyframe by id. Absent ids are a no-op, not an error.
    pub fn remove_keyframe(&mut self, id: KeyframeId) {
        let _ = self.take_keyframe(id);
    }

    /// Remove and return a keyframe by id (undo keeps it for re-insertion).
    pub fn take_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        let index = self.keyframes.iter().position(|k| k.id == id)?;
        let keyframe = self.keyframes.remove(index);
        self.rebuild();
        Some(keyframe)
    }

    /// Overwrite a keyframe's pose from the camera; time and id unchanged.
    pub fn update_keyframe(&mut self, id: KeyframeId, camera: &CameraRig) {
        let _ = self.set_keyframe_pose(id, camera.pose());
    }

    /// Overwrite a keyframe's pose, returning the previous pose.
    pub fn set_keyframe_pose(&mut self, id: KeyframeId, pose: CameraPose) -> Option<CameraPose> {
        let keyframe = self.keyframes.iter_mut().find(|k| k.id == id)?;
        let previous = keyframe.pose();
        keyframe.set_pose(pose);
        self.rebuild();
        Some(previous)
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|k| k.id == id)
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Rebuild the derived timeline from the keyframe list.
    ///
    /// Below 2 keyframes the timeline is torn down and playback resets —
    /// there is nothing left to play.
    pub fn rebuild(&mut self) {
        self.timeline = Timeline::build(&self.keyframes, self.easing);
        if self.timeline.is_none() {
            self.state = PlayState::Stopped;
            self.elapsed = 0.0;
        }
    }

    // ---- settings ----

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
        self.rebuild();
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// See the field note: a display/export setting, not a segment span.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    pub fn duration_setting(&self) -> f64 {
        self.duration
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    // ---- free playback ----

    /// Start playback. No-op without a playable timeline or while the
    /// scroll drive owns the transport. Returns whether state changed.
    pub fn play(&mut self) -> bool {
        if self.timeline.is_none() || self.drive == DriveMode::Scroll {
            return false;
        }
        if self.state == PlayState::Playing {
            return false;
        }
        self.state = PlayState::Playing;
        true
    }

    /// Freeze at the current elapsed time.
    pub fn pause(&mut self) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        self.state = PlayState::Paused;
        true
    }

    /// Stop playback, reset elapsed time, and snap the camera to the
    /// first keyframe's stored pose (not the evaluated time-zero pose).
    pub fn stop(&mut self, camera: &mut CameraRig) -> bool {
        if self.timeline.is_none() {
            return false;
        }
        self.state = PlayState::Stopped;
        self.elapsed = 0.0;
        if let Some(first) = self.keyframes.first() {
            camera.set_pose(first.pose());
        }
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.state == PlayState::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Jump to an absolute timeline time and apply the pose (scrubber).
    pub fn scrub(&mut self, time: f64, camera: &mut CameraRig) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        self.elapsed = time.clamp(0.0, timeline.end_time());
        camera.set_pose(timeline.evaluate(self.elapsed));
    }

    // ---- scroll-linked drive ----

    /// Switch between clock-driven and scroll-driven playback. Enabling
    /// the scroll drive stops free playback; only one source is active.
    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        let mode = if enabled {
            DriveMode::Scroll
        } else {
            DriveMode::Clock
        };
        if self.drive == mode {
            return;
        }
        self.drive = mode;
        self.state = PlayState::Stopped;
        self.elapsed = 0.0;
        self.scroll.reset();
    }

    pub fn scroll_enabled(&self) -> bool {
        self.drive == DriveMode::Scroll
    }

    pub fn set_scroll_settings(&mut self, settings: ScrollSettings) {
        self.scroll.settings = settings;
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        self.scroll.settings
    }

    /// Feed the external page-scroll fraction `p ∈ [0, 1]`. With smoothing
    /// off the pose applies immediately; otherwise `tick` eases toward it.
    pub fn set_scroll_fraction(&mut self, p: f64, camera: &mut CameraRig) {
        if self.drive != DriveMode::Scroll {
            return;
        }
        let progress = self.scroll.set_fraction(p);
        if !self.scroll.settings.smooth {
            self.apply_progress(progress, camera);
        }
    }

    // ---- per-frame drive ----

    /// Advance the active drive by `dt` seconds. Called once per rendered
    /// frame by the owner of the frame clock; the engine has no clock of
    /// its own.
    pub fn tick(&mut self, dt: f64, camera: &mut CameraRig) {
        match self.drive {
            DriveMode::Scroll => {
                if self.timeline.is_some() {
                    let progress = self.scroll.advance(dt);
                    self.apply_progress(progress, camera);
                }
            }
            DriveMode::Clock => {
                if self.state != PlayState::Playing {
                    return;
                }
                let Some(timeline) = &self.timeline else {
                    return;
                };
                let end = timeline.end_time();
                self.elapsed += dt;
                if self.elapsed >= end {
                    if self.looping {
                        self.elapsed = if end > 0.0 { self.elapsed % end } else { 0.0 };
                    } else {
                        self.elapsed = end;
                        self.state = PlayState::Paused;
                    }
                }
                camera.set_pose(timeline.evaluate(self.elapsed));
            }
        }
    }

    fn apply_progress(&mut self, progress: f64, camera: &mut CameraRig) {
        let Some(timeline) = &self.timeline else {
            return;
        };
        self.elapsed = progress * timeline.end_time();
        camera.set_pose(timeline.evaluate(self.elapsed));
    }

    // ---- queries for the presentation layer ----

    pub fn is_playable(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn play_state(&self) -> PlayState {
        self.state
    }

    /// Current playback position in seconds
    pub fn playback_time(&self) -> f64 {
        self.elapsed
    }

    /// Time of the last keyframe (total timeline extent), if playable
    pub fn end_time(&self) -> Option<f64> {
        self.timeline.as_ref().map(Timeline::end_time)
    }

    /// Camera-position samples for the path visualization
    pub fn path_preview(&self) -> Vec<Vec3> {
        preview_points(&self.keyframes, self.easing)
    }

    /// Generate the export program, or `None` below 2 keyframes.
    pub fn export_code(&self) -> Option<String> {
        generate_code(
            &self.keyframes,
            &ExportSettings {
                easing: self.easing,
                looping: self.looping,
                scroll_enabled: self.scroll_enabled(),
                scroll: self.scroll.settings,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Vec3;

    fn camera_at(x: f32) -> CameraRig {
        CameraRig::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, -1.0))
    }

    #[test]
    fn test_default_spacing_rule() {
        let mut engine = TimelineEngine::new();
        let camera = camera_at(0.0);

        assert_eq!(engine.add_keyframe(&camera, None).time, 0.0);
        assert_eq!(engine.add_keyframe(&camera, None).time, 1.0);
        assert_eq!(engine.add_keyframe(&camera, Some(5.0)).time, 5.0);
        assert_eq!(engine.add_keyframe(&camera, None).time, 6.0);
    }

    #[test]
    fn test_list_stays_sorted() {
        let mut engine = TimelineEngine::new();
        let camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(5.0));
        engine.add_keyframe(&camera, Some(0.0));
        engine.add_keyframe(&camera, Some(2.0));

        let times: Vec<f64> = engine.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_playable_threshold() {
        let mut engine = TimelineEngine::new();
        let camera = camera_at(0.0);
        assert!(!engine.is_playable());
        assert!(!engine.play());

        let first = engine.add_keyframe(&camera, None);
        assert!(!engine.is_playable());

        engine.add_keyframe(&camera, None);
        assert!(engine.is_playable());
        assert!(engine.play());

        // Dropping below 2 keyframes tears the timeline down
        engine.remove_keyframe(first.id);
        assert!(!engine.is_playable());
        assert_eq!(engine.play_state(), PlayState::Stopped);
        assert!(engine.path_preview().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_noop() {
        let mut engine = TimelineEngine::new();
        let camera = camera_at(0.0);
        engine.add_keyframe(&camera, None);
        engine.remove_keyframe(KeyframeId::from_raw(u64::MAX));
        assert_eq!(engine.keyframes().len(), 1);
    }

    #[test]
    fn test_tick_advances_and_moves_camera() {
        let mut engine = TimelineEngine::new();
        engine.set_easing(Easing::Linear);
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        let far = camera_at(4.0);
        engine.insert_keyframe(Keyframe::new(2.0, far.pose()));

        engine.play();
        engine.tick(1.0, &mut camera);
        assert!((engine.playback_time() - 1.0).abs() < 1e-9);
        assert!((camera.position().x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut engine = TimelineEngine::new();
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.add_keyframe(&camera_at(1.0), Some(2.0));

        engine.play();
        engine.tick(0.5, &mut camera);
        engine.pause();
        engine.tick(0.5, &mut camera);
        assert!((engine.playback_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_non_looping_completes_and_pauses() {
        let mut engine = TimelineEngine::new();
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.add_keyframe(&camera_at(1.0), Some(1.0));

        engine.play();
        engine.tick(5.0, &mut camera);
        assert_eq!(engine.play_state(), PlayState::Paused);
        assert_eq!(engine.playback_time(), 1.0);
    }

    #[test]
    fn test_looping_wraps() {
        let mut engine = TimelineEngine::new();
        engine.set_looping(true);
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.add_keyframe(&camera_at(1.0), Some(2.0));

        engine.play();
        engine.tick(2.5, &mut camera);
        assert_eq!(engine.play_state(), PlayState::Playing);
        assert!((engine.playback_time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stop_snaps_to_first_keyframe_pose() {
        let mut engine = TimelineEngine::new();
        let mut camera = camera_at(7.0);
        // First keyframe does not start at t=0; stop still snaps to its pose
        engine.add_keyframe(&camera, Some(1.0));
        engine.add_keyframe(&camera_at(3.0), Some(4.0));

        camera.set_pose(CameraPose::new(Vec3::new(99.0, 0.0, 0.0), Vec3::ZERO));
        engine.play();
        engine.tick(2.0, &mut camera);
        engine.stop(&mut camera);

        assert_eq!(engine.playback_time(), 0.0);
        assert_eq!(engine.play_state(), PlayState::Stopped);
        assert_eq!(camera.position(), Vec3::new(7.0, 0.0, 0.0));
        assert_eq!(camera.target(), Vec3::new(7.0, 0.0, -1.0));
    }

    #[test]
    fn test_duplicate_time_playback_holds() {
        let mut engine = TimelineEngine::new();
        engine.set_easing(Easing::Linear);
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.insert_keyframe(Keyframe::new(3.0, camera_at(3.0).pose()));
        engine.insert_keyframe(Keyframe::new(3.0, camera_at(9.0).pose()));

        engine.play();
        // Ticking through the duplicate point never raises; motion holds
        for _ in 0..40 {
            engine.tick(0.1, &mut camera);
        }
        assert!(camera.position().x >= 3.0);
    }

    #[test]
    fn test_scroll_drive_excludes_free_playback() {
        let mut engine = TimelineEngine::new();
        engine.set_easing(Easing::Linear);
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.insert_keyframe(Keyframe::new(2.0, camera_at(8.0).pose()));

        engine.set_scroll_enabled(true);
        assert!(!engine.play());

        engine.set_scroll_settings(ScrollSettings {
            start_pct: 0.0,
            end_pct: 100.0,
            smooth: false,
        });
        engine.set_scroll_fraction(0.5, &mut camera);
        assert!((camera.position().x - 4.0).abs() < 1e-5);

        // Disabling scroll restores the clock drive
        engine.set_scroll_enabled(false);
        assert!(engine.play());
    }

    #[test]
    fn test_smoothed_scroll_converges_via_tick() {
        let mut engine = TimelineEngine::new();
        engine.set_easing(Easing::Linear);
        let mut camera = camera_at(0.0);
        engine.add_keyframe(&camera, Some(0.0));
        engine.insert_keyframe(Keyframe::new(2.0, camera_at(8.0).pose()));

        engine.set_scroll_enabled(true);
        engine.set_scroll_fraction(1.0, &mut camera);
        // Not applied yet: smoothing eases toward the target each tick
        assert!(camera.position().x < 8.0);
        for _ in 0..300 {
            engine.tick(0.05, &mut camera);
        }
        assert!((camera.position().x - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_keyframe_pose_only() {
        let mut engine = TimelineEngine::new();
        let camera = camera_at(0.0);
        let kf = engine.add_keyframe(&camera, Some(1.5));

        engine.update_keyframe(kf.id, &camera_at(5.0));
        let updated = engine.keyframe(kf.id).unwrap();
        assert_eq!(updated.time, 1.5);
        assert_eq!(updated.position.x, 5.0);
    }
}
