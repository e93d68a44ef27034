//! The editor facade
//!
//! Owns all mutable editor state and wires the subsystems together:
//! undoable actions go through the command history, the per-frame tick
//! advances the clock, timeline playback and physics, and every mutating
//! call pushes events for a presentation layer to drain.

use prism_core::{KeyframeId, ObjectId, PrismError, Result, Vec3};
use prism_history::{
    AddKeyframeCommand, AddObjectCommand, AddPhysicsCommand, Command, CommandHistory,
    EditorContext, MultiCommand, RemoveKeyframeCommand, RemoveObjectCommand,
    RemovePhysicsCommand, SetMaterialCommand, SetMaterialValueCommand, SetPositionCommand,
    SetRotationCommand, SetScaleCommand, UpdateKeyframeCommand,
};
use prism_physics::{BodySpec, PhysicsService, RapierPhysics};
use prism_runtime::{EditorEvent, EventBus, FrameClock, PlaybackChange};
use prism_scene::{
    load_snapshot_string, save_snapshot_string, CameraRig, Material, MaterialValue, ObjectKind,
    Scene, SceneObject,
};
use prism_timeline::{Easing, Keyframe, PlayState, ScrollSettings, TimelineEngine};

/// Everything the editor session owns.
///
/// Single logical thread: all mutation happens through `&mut self` calls
/// and the per-frame [`Editor::tick`]; there is no locking anywhere.
pub struct Editor {
    scene: Scene,
    camera: CameraRig,
    timeline: TimelineEngine,
    history: CommandHistory,
    physics: Box<dyn PhysicsService>,
    clock: FrameClock,
    events: EventBus,
    simulating: bool,
    spawn_counter: u64,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_physics(Box::new(RapierPhysics::new()))
    }

    /// Build an editor over a specific physics backend (tests use the
    /// null backend to exercise readiness gating).
    pub fn with_physics(physics: Box<dyn PhysicsService>) -> Self {
        Self {
            scene: Scene::new(),
            camera: CameraRig::default(),
            timeline: TimelineEngine::new(),
            history: CommandHistory::new(),
            physics,
            clock: FrameClock::default(),
            events: EventBus::new(),
            simulating: false,
            spawn_counter: 0,
        }
    }

    // ---- per-frame update ----

    /// One logical tick per rendered frame: advance the clock, drive
    /// timeline playback, then step physics if the simulation is running.
    pub fn tick(&mut self) {
        let dt = self.clock.tick();
        self.advance(dt);
    }

    /// Advance by an explicit delta (tests drive time directly).
    pub fn advance(&mut self, dt: f64) {
        let was_playing = self.timeline.play_state();
        self.timeline.tick(dt, &mut self.camera);
        if was_playing == PlayState::Playing && self.timeline.play_state() == PlayState::Paused {
            // Non-looping playback reached the end
            self.events
                .push(EditorEvent::Playback(PlaybackChange::Paused));
        }

        self.camera.update();

        if self.simulating && self.physics.is_ready() {
            self.physics.step(dt, &mut self.scene);
            self.events.push(EditorEvent::SceneChanged);
        }
    }

    // ---- object actions (undoable) ----

    /// Spawn a new object of the given kind, select it, record history.
    pub fn spawn_object(&mut self, kind: ObjectKind) -> ObjectId {
        self.spawn_counter += 1;
        let name = format!("{} {}", kind.label(), self.spawn_counter);
        let command = AddObjectCommand::new(SceneObject::new(kind, &name));
        let id = command.object_id();
        self.run(Box::new(command));
        self.events
            .push(EditorEvent::SelectionChanged(self.scene.selected()));
        self.events.push(EditorEvent::success(format!("{name} added")));
        id
    }

    /// Delete an object (and its physics body). Unknown ids no-op.
    pub fn delete_object(&mut self, id: ObjectId) {
        if !self.scene.contains(id) {
            return;
        }
        self.run(Box::new(RemoveObjectCommand::new(id)));
        self.events
            .push(EditorEvent::SelectionChanged(self.scene.selected()));
    }

    /// Duplicate an object: a fresh id and name, slightly offset so the
    /// copy is visible next to the original. One undo step.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        let source = self.scene.object(id)?;
        let mut copy = SceneObject::new(source.kind, format!("{} Copy", source.name));
        copy.transform = source.transform;
        copy.material = source.material;
        copy.visible = source.visible;
        let offset = copy.transform.position + Vec3::new(0.5, 0.0, 0.5);

        let add = AddObjectCommand::new(copy);
        let new_id = add.object_id();
        let place = SetPositionCommand::new(&self.scene, new_id, offset);
        self.run(Box::new(MultiCommand::new(
            "Duplicate Object",
            vec![Box::new(add) as Box<dyn Command>, Box::new(place)],
        )));
        self.events
            .push(EditorEvent::SelectionChanged(self.scene.selected()));
        Some(new_id)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) {
        let command = SetPositionCommand::new(&self.scene, id, position);
        self.run(Box::new(command));
    }

    pub fn set_rotation(&mut self, id: ObjectId, rotation: Vec3) {
        let command = SetRotationCommand::new(&self.scene, id, rotation);
        self.run(Box::new(command));
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: Vec3) {
        let command = SetScaleCommand::new(&self.scene, id, scale);
        self.run(Box::new(command));
    }

    /// Replace an object's whole material (material preset picker).
    pub fn set_material(&mut self, id: ObjectId, material: Material) {
        let command = SetMaterialCommand::new(&self.scene, id, material);
        self.run(Box::new(command));
    }

    /// Edit a single material field.
    pub fn set_material_value(&mut self, id: ObjectId, value: MaterialValue) {
        let command = SetMaterialValueCommand::new(&self.scene, id, value);
        self.run(Box::new(command));
    }

    /// Change the selection. Not undoable; selection is view state.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.scene.select(id);
        self.events
            .push(EditorEvent::SelectionChanged(self.scene.selected()));
    }

    // ---- keyframe actions (undoable) ----

    /// Capture the current camera pose as a keyframe. With no explicit
    /// time, it lands one second after the last keyframe.
    pub fn add_keyframe(&mut self, time: Option<f64>) -> Option<KeyframeId> {
        // The id is only known after the first apply, so run manually
        let mut command = Box::new(AddKeyframeCommand::new(time));
        {
            let mut ctx = EditorContext {
                scene: &mut self.scene,
                camera: &mut self.camera,
                timeline: &mut self.timeline,
                physics: self.physics.as_mut(),
            };
            command.apply(&mut ctx);
        }
        let id = command.keyframe_id();
        self.push_applied(command);
        if let Some(id) = id {
            self.events.push(EditorEvent::KeyframeAdded(id));
            self.events.push(EditorEvent::success("Keyframe added"));
        }
        self.events.push(EditorEvent::TimelineChanged);
        self.events.push(EditorEvent::HistoryChanged);
        id
    }

    pub fn remove_keyframe(&mut self, id: KeyframeId) {
        self.run(Box::new(RemoveKeyframeCommand::new(id)));
        self.events.push(EditorEvent::TimelineChanged);
    }

    /// Overwrite a keyframe's pose with the current camera pose.
    pub fn update_keyframe(&mut self, id: KeyframeId) {
        let command = UpdateKeyframeCommand::new(&self.timeline, id);
        self.run(Box::new(command));
        self.events.push(EditorEvent::TimelineChanged);
    }

    // ---- physics actions (undoable, gated on readiness) ----

    /// Attach a physics body. Fails (with a user-visible notice) when
    /// the backend is not ready, and on unknown object ids.
    pub fn add_physics(&mut self, id: ObjectId, spec: BodySpec) -> Result<()> {
        if !self.physics.is_ready() {
            self.events
                .push(EditorEvent::error("Physics engine not loaded yet"));
            return Err(PrismError::PhysicsNotReady);
        }
        if !self.scene.contains(id) {
            return Err(PrismError::ObjectNotFound(id.to_string()));
        }
        self.run(Box::new(AddPhysicsCommand::new(id, spec)));
        Ok(())
    }

    pub fn remove_physics(&mut self, id: ObjectId) {
        if !self.physics.is_ready() {
            return;
        }
        self.run(Box::new(RemovePhysicsCommand::new(id)));
    }

    /// Start/stop advancing the physics simulation each tick
    pub fn set_simulating(&mut self, simulating: bool) {
        self.simulating = simulating;
    }

    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let description = self.history.undo_description().map(str::to_owned);
        let mut ctx = EditorContext {
            scene: &mut self.scene,
            camera: &mut self.camera,
            timeline: &mut self.timeline,
            physics: self.physics.as_mut(),
        };
        let done = self.history.undo(&mut ctx);
        if done {
            if let Some(description) = description {
                self.events
                    .push(EditorEvent::info(format!("Undo: {description}")));
            }
            self.push_mutation_events();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let description = self.history.redo_description().map(str::to_owned);
        let mut ctx = EditorContext {
            scene: &mut self.scene,
            camera: &mut self.camera,
            timeline: &mut self.timeline,
            physics: self.physics.as_mut(),
        };
        let done = self.history.redo(&mut ctx);
        if done {
            if let Some(description) = description {
                self.events
                    .push(EditorEvent::info(format!("Redo: {description}")));
            }
            self.push_mutation_events();
        }
        done
    }

    // ---- playback ----

    /// Start timeline playback. Below 2 keyframes this surfaces a notice
    /// instead of playing.
    pub fn play(&mut self) {
        if !self.timeline.is_playable() {
            self.events
                .push(EditorEvent::error("Add at least 2 keyframes to play"));
            return;
        }
        if self.timeline.play() {
            self.events
                .push(EditorEvent::Playback(PlaybackChange::Started));
        }
    }

    pub fn pause(&mut self) {
        if self.timeline.pause() {
            self.events
                .push(EditorEvent::Playback(PlaybackChange::Paused));
        }
    }

    /// Stop playback and snap the camera back to the first keyframe.
    pub fn stop(&mut self) {
        if self.timeline.stop(&mut self.camera) {
            self.events
                .push(EditorEvent::Playback(PlaybackChange::Stopped));
        }
    }

    pub fn toggle_play(&mut self) {
        if self.timeline.play_state() == PlayState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump the playhead to an absolute time (timeline scrubber).
    pub fn scrub(&mut self, time: f64) {
        self.timeline.scrub(time, &mut self.camera);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.timeline.set_easing(easing);
        self.events.push(EditorEvent::TimelineChanged);
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.timeline.set_duration(duration);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.timeline.set_looping(looping);
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.timeline.set_scroll_enabled(enabled);
        self.events.push(EditorEvent::TimelineChanged);
    }

    pub fn set_scroll_settings(&mut self, settings: ScrollSettings) {
        self.timeline.set_scroll_settings(settings);
    }

    /// Feed the external page-scroll fraction when scroll drive is on.
    pub fn set_scroll_fraction(&mut self, fraction: f64) {
        self.timeline
            .set_scroll_fraction(fraction, &mut self.camera);
    }

    // ---- export and persistence ----

    /// Generate the standalone animation script. Fails (with a notice)
    /// below 2 keyframes.
    pub fn export_animation(&mut self) -> Result<String> {
        match self.timeline.export_code() {
            Some(code) => {
                self.events
                    .push(EditorEvent::success("Animation code generated"));
                Ok(code)
            }
            None => {
                self.events
                    .push(EditorEvent::error("Add at least 2 keyframes to export"));
                Err(PrismError::ExportError(
                    "at least 2 keyframes are required".into(),
                ))
            }
        }
    }

    /// Serialize the scene to a JSON snapshot string.
    pub fn save_scene(&self) -> Result<String> {
        save_snapshot_string(&self.scene)
    }

    /// Replace the scene from a snapshot. History and physics bodies are
    /// reset; loaded state has no undo past the load point.
    pub fn load_scene(&mut self, data: &str) -> Result<()> {
        load_snapshot_string(&mut self.scene, data)?;
        self.history.clear();
        self.physics.clear();
        self.events.push(EditorEvent::SceneChanged);
        self.events.push(EditorEvent::HistoryChanged);
        self.events.push(EditorEvent::success("Scene loaded"));
        Ok(())
    }

    /// Clear the scene, timeline and history (new-scene action).
    pub fn clear(&mut self) {
        log::info!("editor: clearing scene");
        self.scene.clear();
        self.physics.clear();
        self.history.clear();
        for keyframe in self.timeline.keyframes().to_vec() {
            self.timeline.remove_keyframe(keyframe.id);
        }
        self.events.push(EditorEvent::SceneChanged);
        self.events.push(EditorEvent::TimelineChanged);
        self.events.push(EditorEvent::HistoryChanged);
    }

    // ---- presentation-layer queries ----

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Mutable camera access for direct orbiting (not undoable)
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn timeline(&self) -> &TimelineEngine {
        &self.timeline
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        self.timeline.keyframes()
    }

    pub fn path_preview(&self) -> Vec<Vec3> {
        self.timeline.path_preview()
    }

    pub fn physics_ready(&self) -> bool {
        self.physics.is_ready()
    }

    pub fn has_physics(&self, id: ObjectId) -> bool {
        self.physics.has_body(id)
    }

    /// Drain queued events for the presentation layer
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    // ---- internals ----

    /// Execute a command through the history and emit the standard
    /// post-mutation events.
    fn run(&mut self, command: Box<dyn Command>) {
        let mut ctx = EditorContext {
            scene: &mut self.scene,
            camera: &mut self.camera,
            timeline: &mut self.timeline,
            physics: self.physics.as_mut(),
        };
        self.history.execute(command, &mut ctx);
        self.events.push(EditorEvent::SceneChanged);
        self.events.push(EditorEvent::HistoryChanged);
    }

    /// Push an already-applied command onto the history without running
    /// it again (used when the caller needs the command's output first).
    fn push_applied(&mut self, command: Box<dyn Command>) {
        self.history.push_applied(command);
    }

    fn push_mutation_events(&mut self) {
        self.events.push(EditorEvent::SceneChanged);
        self.events.push(EditorEvent::TimelineChanged);
        self.events.push(EditorEvent::HistoryChanged);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_physics::NullPhysics;
    use prism_runtime::NoticeLevel;

    fn has_error_notice(events: &[EditorEvent]) -> bool {
        events.iter().any(|e| {
            matches!(
                e,
                EditorEvent::Notice {
                    level: NoticeLevel::Error,
                    ..
                }
            )
        })
    }

    fn positions(editor: &Editor) -> Vec<(ObjectId, Vec3)> {
        editor
            .scene()
            .objects()
            .map(|o| (o.id, o.transform.position))
            .collect()
    }

    #[test]
    fn test_mixed_session_full_undo_restores_initial_state() {
        let mut editor = Editor::new();

        let a = editor.spawn_object(ObjectKind::Box);
        editor.set_position(a, Vec3::new(2.0, 0.0, 0.0));
        let b = editor.spawn_object(ObjectKind::Sphere);
        editor.set_scale(b, Vec3::new(2.0, 2.0, 2.0));
        editor.add_keyframe(Some(0.0));
        editor.add_keyframe(Some(2.0));
        editor.add_physics(a, BodySpec::dynamic(1.0)).unwrap();
        editor.delete_object(b);

        while editor.undo() {}

        assert!(editor.scene().is_empty());
        assert!(editor.keyframes().is_empty());
        assert!(!editor.has_physics(a));
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_partial_undo_then_redo_reproduces_state() {
        let mut editor = Editor::new();

        let a = editor.spawn_object(ObjectKind::Box);
        editor.set_position(a, Vec3::new(1.0, 0.0, 0.0));
        editor.set_position(a, Vec3::new(2.0, 0.0, 0.0));
        editor.add_keyframe(Some(0.0));
        editor.set_rotation(a, Vec3::new(0.0, 45.0, 0.0));

        let after = positions(&mut editor);
        let keyframe_count = editor.keyframes().len();

        for _ in 0..3 {
            assert!(editor.undo());
        }
        for _ in 0..3 {
            assert!(editor.redo());
        }

        assert_eq!(positions(&mut editor), after);
        assert_eq!(editor.keyframes().len(), keyframe_count);
        assert_eq!(
            editor.scene().object(a).unwrap().transform.rotation,
            Vec3::new(0.0, 45.0, 0.0)
        );
    }

    #[test]
    fn test_new_action_after_undo_clears_redo() {
        let mut editor = Editor::new();

        editor.spawn_object(ObjectKind::Box);
        editor.spawn_object(ObjectKind::Cone);
        editor.undo();
        assert!(editor.history().can_redo());

        editor.spawn_object(ObjectKind::Torus);
        assert!(!editor.history().can_redo());
        assert!(!editor.redo());
    }

    #[test]
    fn test_keyframe_default_spacing_through_editor() {
        let mut editor = Editor::new();
        editor.add_keyframe(None);
        editor.add_keyframe(None);
        editor.add_keyframe(None);

        let times: Vec<f64> = editor.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_stop_snaps_camera_to_first_keyframe() {
        let mut editor = Editor::new();
        editor.camera_mut().set_pose(CameraPoseFixture::at(7.0));
        editor.add_keyframe(Some(1.0));
        editor.camera_mut().set_pose(CameraPoseFixture::at(3.0));
        editor.add_keyframe(Some(4.0));

        editor.play();
        editor.advance(2.0);
        editor.stop();

        assert_eq!(editor.camera().position(), Vec3::new(7.0, 0.0, 0.0));
    }

    // Small helper for camera poses along the x axis
    struct CameraPoseFixture;

    impl CameraPoseFixture {
        fn at(x: f32) -> prism_core::CameraPose {
            prism_core::CameraPose::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO)
        }
    }

    #[test]
    fn test_play_without_keyframes_surfaces_notice() {
        let mut editor = Editor::new();
        editor.drain_events();

        editor.play();
        let events = editor.drain_events();
        assert!(has_error_notice(&events));
        assert_eq!(editor.timeline().play_state(), PlayState::Stopped);
    }

    #[test]
    fn test_playback_drives_camera() {
        let mut editor = Editor::new();
        editor.set_easing(Easing::Linear);
        editor.camera_mut().set_pose(CameraPoseFixture::at(0.0));
        editor.add_keyframe(Some(0.0));
        editor.camera_mut().set_pose(CameraPoseFixture::at(4.0));
        editor.add_keyframe(Some(2.0));

        editor.play();
        editor.advance(1.0);
        assert!((editor.camera().position().x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_physics_gating_when_backend_not_ready() {
        let mut editor = Editor::with_physics(Box::new(NullPhysics));
        let id = editor.spawn_object(ObjectKind::Box);
        editor.drain_events();

        assert!(matches!(
            editor.add_physics(id, BodySpec::default()),
            Err(PrismError::PhysicsNotReady)
        ));
        assert!(has_error_notice(&editor.drain_events()));
        // The rejected action never reached the history
        assert_eq!(editor.history().undo_description(), Some("Add Box"));
    }

    #[test]
    fn test_physics_on_unknown_object_fails() {
        let mut editor = Editor::new();
        assert!(matches!(
            editor.add_physics(ObjectId::from_raw(u64::MAX), BodySpec::default()),
            Err(PrismError::ObjectNotFound(_))
        ));
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_simulation_moves_dynamic_body() {
        let mut editor = Editor::new();
        let id = editor.spawn_object(ObjectKind::Sphere);
        editor.set_position(id, Vec3::new(0.0, 10.0, 0.0));
        editor.add_physics(id, BodySpec::dynamic(1.0)).unwrap();

        editor.set_simulating(true);
        for _ in 0..60 {
            editor.advance(1.0 / 60.0);
        }

        assert!(editor.scene().object(id).unwrap().transform.position.y < 10.0);
    }

    #[test]
    fn test_export_requires_two_keyframes() {
        let mut editor = Editor::new();
        editor.add_keyframe(Some(0.0));
        editor.drain_events();

        assert!(matches!(
            editor.export_animation(),
            Err(PrismError::ExportError(_))
        ));
        assert!(has_error_notice(&editor.drain_events()));

        editor.add_keyframe(Some(1.0));
        let code = editor.export_animation().unwrap();
        assert!(code.contains("setupCameraAnimation"));
    }

    #[test]
    fn test_save_load_roundtrip_resets_history() {
        let mut editor = Editor::new();
        let a = editor.spawn_object(ObjectKind::Box);
        editor.set_position(a, Vec3::new(5.0, 1.0, 0.0));

        let saved = editor.save_scene().unwrap();
        editor.clear();
        assert!(editor.scene().is_empty());

        editor.load_scene(&saved).unwrap();
        assert_eq!(editor.scene().len(), 1);
        let restored = editor.scene().objects().next().unwrap();
        assert_eq!(restored.transform.position, Vec3::new(5.0, 1.0, 0.0));
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut editor = Editor::new();
        let a = editor.spawn_object(ObjectKind::Box);
        editor.set_position(a, Vec3::new(1.0, 0.0, 1.0));

        let b = editor.duplicate_object(a).unwrap();
        let copy = editor.scene().object(b).unwrap();
        assert_eq!(copy.transform.position, Vec3::new(1.5, 0.0, 1.5));
        assert!(copy.name.ends_with("Copy"));

        // The add and the offset undo together as one step
        assert_eq!(editor.history().undo_description(), Some("Duplicate Object"));
        editor.undo();
        assert!(!editor.scene().contains(b));
        assert!(editor.scene().contains(a));

        editor.redo();
        assert_eq!(
            editor.scene().object(b).unwrap().transform.position,
            Vec3::new(1.5, 0.0, 1.5)
        );
    }

    #[test]
    fn test_material_swap_is_undoable() {
        let mut editor = Editor::new();
        let id = editor.spawn_object(ObjectKind::Sphere);

        let mut chrome = Material::default();
        chrome.metalness = 1.0;
        chrome.roughness = 0.1;
        editor.set_material(id, chrome);
        assert_eq!(editor.scene().object(id).unwrap().material, chrome);

        editor.undo();
        assert_eq!(
            editor.scene().object(id).unwrap().material,
            Material::default()
        );
    }

    #[test]
    fn test_scroll_mode_blocks_play_and_maps_fraction() {
        let mut editor = Editor::new();
        editor.set_easing(Easing::Linear);
        editor.camera_mut().set_pose(CameraPoseFixture::at(0.0));
        editor.add_keyframe(Some(0.0));
        editor.camera_mut().set_pose(CameraPoseFixture::at(8.0));
        editor.add_keyframe(Some(2.0));

        editor.set_scroll_enabled(true);
        editor.set_scroll_settings(ScrollSettings {
            start_pct: 0.0,
            end_pct: 100.0,
            smooth: false,
        });
        editor.play();
        assert_ne!(editor.timeline().play_state(), PlayState::Playing);

        editor.set_scroll_fraction(0.5);
        assert!((editor.camera().position().x - 4.0).abs() < 1e-5);
    }
}
