//! Simulation clock
//!
//! Tracks wall-clock time for the frame loop:
//! - Delta time calculation, capped after stalls
//! - Elapsed animation time, frozen while paused
//! - Frame rate averaging for the window title

use std::time::Instant;

/// Longest step handed to the simulation
const MAX_DT: f64 = 0.25;

/// Timing of one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Animation time in seconds since start, excluding pauses
    pub elapsed: f32,
    /// Capped wall-clock step in seconds
    pub dt: f32,
    /// Whether the animation is frozen
    pub paused: bool,
}

/// Manages the animation clock
pub struct SimulationSystem {
    last_frame: Instant,
    /// Kept in f64 so long sessions do not drift with the frame rate
    elapsed: f64,
    paused: bool,
    fps_window: f64,
    fps_frames: u32,
    fps: Option<f32>,
}

impl SimulationSystem {
    /// Create a new clock starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed: 0.0,
            paused: false,
            fps_window: 0.0,
            fps_frames: 0,
            fps: None,
        }
    }

    /// Measure the time since the previous frame and advance
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.advance(raw_dt)
    }

    /// Advance by a raw step
    ///
    /// The step is capped to keep the first frame and resumed windows from
    /// jumping. Paused clocks keep reporting `dt` for the camera but do not
    /// move `elapsed`.
    pub fn advance(&mut self, raw_dt: f64) -> FrameTime {
        let dt = raw_dt.clamp(0.0, MAX_DT);
        if !self.paused {
            self.elapsed += dt;
        }

        self.fps_window += dt;
        self.fps_frames += 1;
        if self.fps_window >= 1.0 {
            self.fps = Some((self.fps_frames as f64 / self.fps_window) as f32);
            self.fps_window = 0.0;
            self.fps_frames = 0;
        }

        FrameTime {
            elapsed: self.elapsed as f32,
            dt: dt as f32,
            paused: self.paused,
        }
    }

    /// Toggle the pause state, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Animation time in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Frames per second over the last full second, once available
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_time_capped() {
        let mut sim = SimulationSystem::new();
        let time = sim.advance(3.0);
        assert_eq!(time.dt, MAX_DT as f32);
        assert_eq!(time.elapsed, MAX_DT as f32);
    }

    #[test]
    fn test_negative_step_clamped() {
        let mut sim = SimulationSystem::new();
        assert_eq!(sim.advance(-1.0).dt, 0.0);
    }

    #[test]
    fn test_elapsed_accumulates() {
        let mut sim = SimulationSystem::new();
        for _ in 0..10 {
            sim.advance(0.1);
        }
        assert!((sim.elapsed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_independent_of_frame_rate() {
        // One hour of wall time at two refresh rates
        let mut slow = SimulationSystem::new();
        for _ in 0..216_000 {
            slow.advance(1.0 / 60.0);
        }
        let mut fast = SimulationSystem::new();
        for _ in 0..518_400 {
            fast.advance(1.0 / 144.0);
        }

        assert!((slow.elapsed() - 3600.0).abs() < 1e-2, "{}", slow.elapsed());
        assert!((fast.elapsed() - 3600.0).abs() < 1e-2, "{}", fast.elapsed());
        assert!((slow.elapsed() - fast.elapsed()).abs() < 1e-2);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut sim = SimulationSystem::new();
        sim.advance(0.1);
        assert!(sim.toggle_pause());
        let time = sim.advance(0.1);
        assert!(time.paused);
        assert_eq!(time.dt, 0.1);
        assert!((time.elapsed - 0.1).abs() < 1e-6);

        assert!(!sim.toggle_pause());
        let time = sim.advance(0.1);
        assert!((time.elapsed - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_fps_after_one_second() {
        let mut sim = SimulationSystem::new();
        assert!(sim.fps().is_none());
        for _ in 0..25 {
            sim.advance(0.05);
        }
        let fps = sim.fps().unwrap();
        assert!((fps - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!(sim.last_frame.elapsed().as_millis() < 100);
        assert!(!sim.is_paused());
    }
}
