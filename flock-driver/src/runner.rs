use std::str::FromStr;
use std::time::{Duration, Instant};

use flock_core::FlockSimulation;
use flock_shared::FrameReport;

/// Plane size change applied before the given frame is stepped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl FromStr for ResizeEvent {
    type Err = String;

    /// Parses `FRAME:WIDTHxHEIGHT`, e.g. `120:1024x768`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, size) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:WIDTHxHEIGHT, got '{}'", s))?;
        let (width, height) = size
            .split_once('x')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", size))?;

        let frame = frame
            .trim()
            .parse()
            .map_err(|e| format!("bad frame '{}': {}", frame, e))?;
        let width: f32 = width
            .trim()
            .parse()
            .map_err(|e| format!("bad width '{}': {}", width, e))?;
        let height: f32 = height
            .trim()
            .parse()
            .map_err(|e| format!("bad height '{}': {}", height, e))?;
        if !(width > 0.0 && height > 0.0) {
            return Err(format!("size must be positive, got {}x{}", width, height));
        }

        Ok(Self {
            frame,
            width,
            height,
        })
    }
}

/// Frames-per-second counter, averaged over one wall-clock second
#[derive(Debug)]
pub struct FpsMeter {
    window_start: Instant,
    frames_in_window: u32,
    fps: f32,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames_in_window: 0,
            fps: 0.0,
        }
    }

    /// Records a finished frame. Returns the new average once a full second
    /// has elapsed since the window started.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames_in_window += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
            self.frames_in_window = 0;
            self.window_start = now;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Instantaneous rate from a single frame duration.
    pub fn instant_fps(frame_time: Duration) -> f32 {
        let ms = frame_time.as_secs_f32() * 1000.0;
        if ms > 0.0 {
            1000.0 / ms
        } else {
            f32::INFINITY
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Outcome of [`Driver::run`]
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub slowest_frame: Duration,
    pub report: FrameReport,
}

impl RunSummary {
    pub fn mean_fps(&self) -> f32 {
        let secs = self.elapsed.as_secs_f32();
        if secs > 0.0 {
            self.frames as f32 / secs
        } else {
            0.0
        }
    }
}

/// Owns the simulation and calls `step` once per frame.
pub struct Driver {
    sim: FlockSimulation,
    resizes: Vec<ResizeEvent>,
}

impl Driver {
    pub fn new(sim: FlockSimulation, mut resizes: Vec<ResizeEvent>) -> Self {
        resizes.sort_by_key(|event| event.frame);
        Self { sim, resizes }
    }

    pub fn simulation(&self) -> &FlockSimulation {
        &self.sim
    }

    /// Steps `frames` frames as fast as possible, logging a report every second.
    pub fn run(&mut self, frames: u64) -> RunSummary {
        let started = Instant::now();
        let mut meter = FpsMeter::new(started);
        let mut slowest_frame = Duration::ZERO;

        for _ in 0..frames {
            self.apply_resizes();

            let frame_start = Instant::now();
            self.sim.step();
            let now = Instant::now();

            let frame_time = now.duration_since(frame_start);
            if frame_time > slowest_frame {
                slowest_frame = frame_time;
            }
            log::trace!(
                "Frame {} took {:?} ({:.2} fps)",
                self.sim.frame(),
                frame_time,
                FpsMeter::instant_fps(frame_time)
            );

            if let Some(fps) = meter.tick(now) {
                let report = self.report(fps);
                log::info!(
                    "Frame {}: {:.2} fps, mean speed {:.2}",
                    report.frame,
                    report.fps,
                    report.mean_speed
                );
            }
        }

        let mut summary = RunSummary {
            frames,
            elapsed: started.elapsed(),
            slowest_frame,
            report: self.report(meter.fps()),
        };
        if summary.elapsed > Duration::ZERO {
            summary.report.fps = summary.mean_fps();
        }
        summary
    }

    pub fn report(&self, fps: f32) -> FrameReport {
        let boids = self.sim.boids();
        let mean_speed = if boids.is_empty() {
            0.0
        } else {
            boids.iter().map(|b| b.speed()).sum::<f32>() / boids.len() as f32
        };

        FrameReport {
            frame: self.sim.frame(),
            boid_count: boids.len(),
            predator_count: self.sim.predators().len(),
            fps,
            mean_speed,
        }
    }

    fn apply_resizes(&mut self) {
        let frame = self.sim.frame();
        while let Some(event) = self.resizes.first().copied() {
            if event.frame > frame {
                break;
            }
            self.resizes.remove(0);
            log::info!(
                "Resizing plane to {}x{} at frame {}",
                event.width,
                event.height,
                frame
            );
            self.sim.resize(event.width, event.height);
        }
    }
}
