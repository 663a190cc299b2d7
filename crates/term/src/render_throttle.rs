//! Decides when a frame is worth drawing.
//!
//! While sprites move every frame is drawn. Once everything has settled the
//! screen is only redrawn when its fingerprint changes, or at a slow keepalive
//! interval so the terminal recovers from outside damage.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    static_interval_ms: u64,
    last: Option<(u64, u64)>,
}

impl RenderThrottle {
    pub fn new(static_interval_ms: u64) -> Self {
        Self {
            static_interval_ms,
            last: None,
        }
    }

    /// Forget the last frame so the next call renders (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let render = match self.last {
            None => true,
            Some(_) if !is_static => true,
            Some((_, fp)) if fp != fingerprint => true,
            Some((at, _)) => now_ms.saturating_sub(at) >= self.static_interval_ms,
        };
        if render {
            self.last = Some((now_ms, fingerprint));
        }
        render
    }
}
