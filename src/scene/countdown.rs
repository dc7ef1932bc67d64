use crate::FRAME_DT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartPhase {
    /// Showing 3, 2, 1.
    Counting,
    /// Showing the "Start" banner.
    ShowStart,
    Playing,
}

/// Pre-play countdown. Gameplay only simulates once this reports started.
#[derive(Clone, Debug)]
pub struct StartCountdown {
    phase: StartPhase,
    counter: f32,
    banner_time: f32,
    banner_timer: f32,
    count_index: u32,
}

impl StartCountdown {
    pub fn new(count_time: f32, banner_time: f32) -> Self {
        Self {
            phase: StartPhase::Counting,
            counter: count_time,
            banner_time,
            banner_timer: 0.0,
            count_index: Self::index_for(count_time),
        }
    }

    /// Remaining seconds rounded up and held to 1..=3, so 0 is never shown.
    fn index_for(counter: f32) -> u32 {
        ((counter + 0.999) as i32).clamp(1, 3) as u32
    }

    pub fn update(&mut self) {
        match self.phase {
            StartPhase::Counting => {
                if self.counter > 0.0 {
                    self.counter -= FRAME_DT;
                    self.count_index = Self::index_for(self.counter);
                } else {
                    self.phase = StartPhase::ShowStart;
                    self.banner_timer = self.banner_time;
                }
            }
            StartPhase::ShowStart => {
                self.banner_timer -= FRAME_DT;
                if self.banner_timer <= 0.0 {
                    self.phase = StartPhase::Playing;
                }
            }
            StartPhase::Playing => {}
        }
    }

    pub fn phase(&self) -> StartPhase { self.phase }
    pub fn count_index(&self) -> u32 { self.count_index }
    pub fn is_started(&self) -> bool { self.phase == StartPhase::Playing }
}
