use crate::FRAME_DT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FadeStatus {
    None,
    /// Black overlay clearing to transparent.
    FadeIn,
    /// Transparent to black.
    FadeOut,
}

/// Full-screen black overlay driven by a fixed-step counter.
#[derive(Clone, Debug)]
pub struct Fade {
    status: FadeStatus,
    duration: f32,
    counter: f32,
}

impl Default for Fade {
    fn default() -> Self {
        Self { status: FadeStatus::None, duration: 0.0, counter: 0.0 }
    }
}

impl Fade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, status: FadeStatus, duration: f32) {
        self.status = status;
        self.duration = duration;
        self.counter = 0.0;
    }

    pub fn stop(&mut self) {
        self.status = FadeStatus::None;
    }

    pub fn update(&mut self) {
        if self.status == FadeStatus::None {
            return;
        }
        self.counter = (self.counter + FRAME_DT).min(self.duration);
    }

    /// Overlay opacity in [0, 1]. Zero when idle.
    pub fn alpha(&self) -> f32 {
        let progress = if self.duration > 0.0 { self.counter / self.duration } else { 1.0 };
        match self.status {
            FadeStatus::None => 0.0,
            FadeStatus::FadeIn => (1.0 - progress).clamp(0.0, 1.0),
            FadeStatus::FadeOut => progress.clamp(0.0, 1.0),
        }
    }

    /// An idle fade counts as finished.
    pub fn is_finished(&self) -> bool {
        match self.status {
            FadeStatus::None => true,
            FadeStatus::FadeIn | FadeStatus::FadeOut => self.counter >= self.duration,
        }
    }

    pub fn status(&self) -> FadeStatus {
        self.status
    }
}
