//! Log-backed renderer for headless runs.

use granny_gameplay::{FrameSnapshot, Renderer};
use tracing::{info, trace};

/// Renderer that writes a one-line summary of every Nth frame to the log.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    interval: u64,
    frames: u64,
}

impl TraceRenderer {
    /// Create a renderer logging every `interval` frames (0 = never).
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            frames: 0,
        }
    }

    /// Whether frame number `frame` gets logged.
    fn is_logged(&self, frame: u64) -> bool {
        self.interval > 0 && frame % self.interval == 0
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, snapshot: &FrameSnapshot) {
        self.frames += 1;
        if !self.is_logged(self.frames) {
            trace!("frame {} (tick {})", self.frames, snapshot.tick);
            return;
        }

        let granny = snapshot.granny.map_or_else(
            || "absent".to_string(),
            |g| {
                format!(
                    "{:?} at ({:.1}, {:.1}, {:.1})",
                    g.mode, g.position.x, g.position.y, g.position.z
                )
            },
        );
        info!(
            "t={:.1}s room={} camera=({:.1}, {:.1}, {:.1}) crouch={} hidden={} granny={} items_left={} bg={:06x}",
            snapshot.elapsed,
            snapshot.room,
            snapshot.camera.x,
            snapshot.camera.y,
            snapshot.camera.z,
            snapshot.crouching,
            snapshot.hidden,
            granny,
            snapshot.items_remaining,
            snapshot.background,
        );
    }
}
