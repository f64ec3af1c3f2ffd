use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Where a [`FrameClock`] takes its time from
#[derive(Debug, Clone, Copy)]
enum Pace {
    /// Wall clock; starts on the first stamped frame
    RealTime {
        start: Option<Instant>,
        last: Option<Instant>,
    },
    /// Exactly `step` seconds between frames
    FixedStep(f32),
}

/// Frame clock. Each call to `next` stamps one frame; the first frame is at
/// time zero with a zero delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    next_number: u64,
    pace: Pace,
}

impl FrameClock {
    pub fn real_time() -> Self {
        Self {
            next_number: 0,
            pace: Pace::RealTime { start: None, last: None },
        }
    }

    /// Deterministic clock advancing `step` seconds per frame
    pub fn fixed_step(step: f32) -> Self {
        Self {
            next_number: 0,
            pace: Pace::FixedStep(step),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::real_time()
    }
}

impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let number = self.next_number;
        self.next_number += 1;

        let (time, delta) = match &mut self.pace {
            Pace::RealTime { start, last } => {
                let now = Instant::now();
                let start = *start.get_or_insert(now);
                let delta = last.map_or(0.0, |prev| now.duration_since(prev).as_secs_f32());
                *last = Some(now);
                (now.duration_since(start).as_secs_f32(), delta)
            }
            Pace::FixedStep(step) => {
                let delta = if number == 0 { 0.0 } else { *step };
                (number as f32 * *step, delta)
            }
        };

        Some(FrameInfo::new(number, time, delta))
    }
}

/// Averages frame deltas and reports once per interval
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: f32,
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            elapsed: 0.0,
            fps: 0.0,
        }
    }

    /// Record one frame; returns the fresh average when an interval completes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.interval {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_numbers_frames() {
        let mut clock = FrameClock::real_time();
        let numbers: Vec<u64> = clock.by_ref().take(3).map(|f| f.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(clock.next().map(|f| f.number), Some(3));
    }

    #[test]
    fn test_real_time_starts_at_first_frame() {
        let mut clock = FrameClock::real_time();
        thread::sleep(Duration::from_millis(5));
        let first = clock.next().unwrap();
        assert_eq!(first.delta, 0.0);
        assert!(first.time < 0.004, "setup time leaked into frame 0: {}", first.time);
    }

    #[test]
    fn test_real_time_is_monotonic() {
        let mut clock = FrameClock::real_time();
        let first = clock.next().unwrap();
        thread::sleep(Duration::from_millis(5));
        let second = clock.next().unwrap();
        assert!(second.time > first.time);
        assert!(second.delta >= 0.004);
    }

    #[test]
    fn test_fixed_step_is_exact() {
        let frames: Vec<FrameInfo> = FrameClock::fixed_step(0.5).take(3).collect();
        assert_eq!(frames[0], FrameInfo::new(0, 0.0, 0.0));
        assert_eq!(frames[1], FrameInfo::new(1, 0.5, 0.5));
        assert_eq!(frames[2], FrameInfo::new(2, 1.0, 0.5));
    }

    #[test]
    fn test_fps_counter_reports_after_interval() {
        let mut counter = FpsCounter::new(1.0);
        for _ in 0..3 {
            assert_eq!(counter.tick(0.25), None);
        }
        assert_eq!(counter.tick(0.25), Some(4.0));
        assert_eq!(counter.fps(), 4.0);
        // Next interval starts from zero
        assert_eq!(counter.tick(0.25), None);
    }
}
