//! Drives a headless editing session: build a small scene, animate the
//! camera over three keyframes, play it back, undo part of the work, and
//! print the exported animation code.
//!
//! Run with: cargo run -p prism-editor --example editor_session

use anyhow::Result;
use prism_core::Vec3;
use prism_editor::Editor;
use prism_physics::BodySpec;
use prism_scene::ObjectKind;
use prism_timeline::Easing;

fn main() -> Result<()> {
    env_logger::init();

    let mut editor = Editor::new();

    // Build a scene
    let cube = editor.spawn_object(ObjectKind::Box);
    editor.set_position(cube, Vec3::new(0.0, 0.5, 0.0));
    let ball = editor.spawn_object(ObjectKind::Sphere);
    editor.set_position(ball, Vec3::new(0.0, 6.0, 0.0));
    editor.add_physics(ball, BodySpec::dynamic(1.0))?;

    // Author a camera move
    editor.set_easing(Easing::Power2InOut);
    editor.camera_mut().set_position(Vec3::new(0.0, 5.0, 10.0));
    editor.add_keyframe(Some(0.0));
    editor.camera_mut().set_position(Vec3::new(8.0, 3.0, 0.0));
    editor.add_keyframe(Some(2.0));
    editor.camera_mut().set_position(Vec3::new(0.0, 8.0, -10.0));
    editor.add_keyframe(Some(4.0));

    // Play it back alongside the physics simulation
    editor.set_simulating(true);
    editor.play();
    for _ in 0..240 {
        editor.advance(1.0 / 60.0);
    }
    println!(
        "camera after playback: {:?}, ball height: {:.2}",
        editor.camera().position(),
        editor.scene().object(ball).map(|o| o.transform.position.y).unwrap_or_default()
    );

    // Undo the last keyframe, then bring it back
    editor.undo();
    println!("keyframes after undo: {}", editor.keyframes().len());
    editor.redo();

    for event in editor.drain_events() {
        log::info!("event: {event:?}");
    }

    let code = editor.export_animation()?;
    println!("\n{code}");

    Ok(())
}
