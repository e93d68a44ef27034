//! Animation code export
//!
//! Serializes the keyframe list and timeline settings into a JavaScript
//! program for the GSAP animation library. The generated setup function
//! repeats the exact segment-construction rules of the live timeline
//! (consecutive pairs, zero-duration pairs skipped, shared easing name),
//! so exported output matches preview behavior.

use crate::easing::Easing;
use crate::keyframe::Keyframe;
use crate::playback::ScrollSettings;
use std::fmt::Write;

/// Settings carried into the exported program
#[derive(Debug, Clone, Copy)]
pub struct ExportSettings {
    pub easing: Easing,
    pub looping: bool,
    pub scroll_enabled: bool,
    pub scroll: ScrollSettings,
}

/// Generate the animation program text. Returns `None` below 2 keyframes
/// (the caller surfaces that as a notice, not an error).
pub fn generate_code(keyframes: &[Keyframe], settings: &ExportSettings) -> Option<String> {
    if keyframes.len() < 2 {
        return None;
    }

    let mut code = String::new();
    // Infallible writes to a String; discard the Ok(())s
    let _ = writeln!(code, "// GSAP Camera Animation Code");
    let _ = writeln!(code, "// Total keyframes: {}\n", keyframes.len());

    let _ = writeln!(code, "// Import GSAP (in your HTML or via import):");
    let _ = writeln!(
        code,
        "// <script src=\"https://cdnjs.cloudflare.com/ajax/libs/gsap/3.11.4/gsap.min.js\"></script>"
    );
    if settings.scroll_enabled {
        let _ = writeln!(
            code,
            "// <script src=\"https://cdnjs.cloudflare.com/ajax/libs/gsap/3.11.4/ScrollTrigger.min.js\"></script>"
        );
        let _ = writeln!(code, "// gsap.registerPlugin(ScrollTrigger);");
    }
    code.push('\n');

    let _ = writeln!(code, "// Keyframes data");
    let _ = writeln!(code, "const keyframes = [");
    for kf in keyframes {
        let _ = writeln!(code, "  {{");
        let _ = writeln!(code, "    time: {},", kf.time);
        let _ = writeln!(
            code,
            "    position: {{ x: {:.2}, y: {:.2}, z: {:.2} }},",
            kf.position.x, kf.position.y, kf.position.z
        );
        let _ = writeln!(
            code,
            "    target: {{ x: {:.2}, y: {:.2}, z: {:.2} }}",
            kf.target.x, kf.target.y, kf.target.z
        );
        let _ = writeln!(code, "  }},");
    }
    let _ = writeln!(code, "];\n");

    let _ = writeln!(code, "// Animation setup function");
    let _ = writeln!(code, "function setupCameraAnimation(camera, controls) {{");
    let _ = writeln!(code, "  // Create timeline");
    let _ = writeln!(code, "  const timeline = gsap.timeline({{");
    let _ = writeln!(code, "    paused: {},", !settings.scroll_enabled);
    if settings.looping && !settings.scroll_enabled {
        let _ = writeln!(code, "    repeat: -1, // Loop indefinitely");
    }
    let _ = writeln!(code, "  }});\n");

    let _ = writeln!(code, "  // Add animation segments");
    let _ = writeln!(code, "  for (let i = 1; i < keyframes.length; i++) {{");
    let _ = writeln!(code, "    const prevKeyframe = keyframes[i-1];");
    let _ = writeln!(code, "    const currentKeyframe = keyframes[i];");
    let _ = writeln!(
        code,
        "    const segmentDuration = currentKeyframe.time - prevKeyframe.time;\n"
    );
    let _ = writeln!(code, "    // Skip if segment has no duration");
    let _ = writeln!(code, "    if (segmentDuration <= 0) continue;\n");
    let _ = writeln!(code, "    // Camera position animation");
    let _ = writeln!(code, "    timeline.to(camera.position, {{");
    let _ = writeln!(code, "      x: currentKeyframe.position.x,");
    let _ = writeln!(code, "      y: currentKeyframe.position.y,");
    let _ = writeln!(code, "      z: currentKeyframe.position.z,");
    let _ = writeln!(code, "      duration: segmentDuration,");
    let _ = writeln!(code, "      ease: \"{}\",", settings.easing.name());
    let _ = writeln!(code, "      onUpdate: () => camera.updateProjectionMatrix()");
    let _ = writeln!(code, "    }}, prevKeyframe.time);\n");
    let _ = writeln!(code, "    // Camera target animation (for orbit controls)");
    let _ = writeln!(code, "    timeline.to(controls.target, {{");
    let _ = writeln!(code, "      x: currentKeyframe.target.x,");
    let _ = writeln!(code, "      y: currentKeyframe.target.y,");
    let _ = writeln!(code, "      z: currentKeyframe.target.z,");
    let _ = writeln!(code, "      duration: segmentDuration,");
    let _ = writeln!(code, "      ease: \"{}\",", settings.easing.name());
    let _ = writeln!(code, "      onUpdate: () => controls.update()");
    let _ = writeln!(code, "    }}, prevKeyframe.time);");
    let _ = writeln!(code, "  }}\n");

    if settings.scroll_enabled {
        let _ = writeln!(code, "  // Set up scroll trigger");
        let _ = writeln!(code, "  ScrollTrigger.create({{");
        let _ = writeln!(
            code,
            "    trigger: \"#your-scroll-container\", // Replace with your container"
        );
        let _ = writeln!(code, "    start: \"top {}%\",", settings.scroll.start_pct);
        let _ = writeln!(code, "    end: \"bottom {}%\",", settings.scroll.end_pct);
        let scrub = if settings.scroll.smooth { "0.5" } else { "false" };
        let _ = writeln!(code, "    scrub: {scrub},");
        let _ = writeln!(code, "    animation: timeline,");
        let _ = writeln!(code, "    markers: true // Remove in production");
        let _ = writeln!(code, "  }});\n");
    }

    let _ = writeln!(code, "  return timeline;");
    let _ = writeln!(code, "}}\n");

    let _ = writeln!(code, "// Usage example:");
    let _ = writeln!(
        code,
        "// const cameraTimeline = setupCameraAnimation(camera, controls);"
    );
    if !settings.scroll_enabled {
        let _ = writeln!(code, "// cameraTimeline.play();");
    }

    Some(code)
}
