//! Frame-rate pacing for caller-driven animation loops.

#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_interval_ms: u64,
    last_frame_ms: u64,
    has_rendered: bool,
}

impl FramePacer {
    /// Pace at `fps` frames per second. Zero is treated as one.
    pub fn new(fps: u32) -> Self {
        Self {
            frame_interval_ms: 1000 / u64::from(fps.max(1)),
            last_frame_ms: 0,
            has_rendered: false,
        }
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    /// Decide whether the next frame is due.
    ///
    /// The first call always renders; afterwards at most one frame per
    /// `frame_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64) -> bool {
        if !self.has_rendered || now_ms.saturating_sub(self.last_frame_ms) >= self.frame_interval_ms
        {
            self.has_rendered = true;
            self.last_frame_ms = now_ms;
            return true;
        }
        false
    }

    /// Milliseconds to sleep before the next frame is due.
    pub fn wait_ms(&self, now_ms: u64) -> u64 {
        if !self.has_rendered {
            return 0;
        }
        let elapsed = now_ms.saturating_sub(self.last_frame_ms);
        self.frame_interval_ms.saturating_sub(elapsed)
    }
}
