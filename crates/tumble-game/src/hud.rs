//! HUD text
//!
//! The overlay is plain text so any front end can draw it.

use std::fmt;

use glam::Vec3;
use serde::Serialize;

/// Control hints shown under the readouts
pub const KEY_HINTS: [&str; 6] = [
    "WASD  Move",
    "Mouse  Look",
    "SPACE  Jump",
    "F  Shoot sphere",
    "G  Spawn crate",
    "R  Reset   ESC  Quit",
];

/// Snapshot of what the overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudInfo {
    pub fps: f32,
    pub object_count: usize,
    pub player_position: Vec3,
}

impl HudInfo {
    /// Overlay lines top to bottom; the empty line is a spacer
    pub fn lines(&self) -> Vec<String> {
        let p = self.player_position;
        let mut lines = vec![
            format!("FPS: {:.0}", self.fps),
            format!("Objects: {}", self.object_count),
            format!("Pos: {:.1} {:.1} {:.1}", p.x, p.y, p.z),
            String::new(),
        ];
        lines.extend(KEY_HINTS.iter().map(|hint| hint.to_string()));
        lines
    }
}

impl fmt::Display for HudInfo {
    /// Single-line readout for logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.player_position;
        write!(
            f,
            "FPS: {:.0} | Objects: {} | Pos: {:.1} {:.1} {:.1}",
            self.fps, self.object_count, p.x, p.y, p.z
        )
    }
}
