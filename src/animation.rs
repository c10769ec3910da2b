use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use cgmath::Vector2;
use parking_lot::Mutex;

use crate::config::{ConfigError, FieldConfig};
use crate::shape::Viewport;
use crate::store::Particles;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    PointerMoved { x: f32, y: f32 },
    Resized { width: f32, height: f32 },
}

/// Cloneable producer side of the host event queue. Events are applied at
/// the start of the next frame, never in the middle of one.
#[derive(Clone, Default)]
pub struct EventSender {
    queue: Arc<Mutex<VecDeque<HostEvent>>>,
}

impl EventSender {
    pub fn send(&self, event: HostEvent) {
        self.queue.lock().push_back(event);
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.send(HostEvent::PointerMoved { x, y });
    }

    pub fn resized(&self, width: f32, height: f32) {
        self.send(HostEvent::Resized { width, height });
    }

    fn drain(&self) -> Vec<HostEvent> {
        self.queue.lock().drain(..).collect()
    }
}

#[derive(Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// Drives one particle field: host events in, one cleared and redrawn
/// surface out per frame.
pub struct Animation {
    particles: Particles,
    pointer: Option<Vector2<f32>>,
    events: EventSender,
    stop: StopHandle,
    frames: u64,
}

impl Animation {
    pub fn new(config: FieldConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        Ok(Self {
            particles: Particles::new(config, viewport)?,
            pointer: None,
            events: EventSender::default(),
            stop: StopHandle::default(),
            frames: 0,
        })
    }

    pub fn sender(&self) -> EventSender {
        self.events.clone()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Particles {
        &mut self.particles
    }

    pub fn pointer(&self) -> Option<Vector2<f32>> {
        self.pointer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn apply_events(&mut self, surface: &mut impl Surface) {
        for event in self.events.drain() {
            match event {
                HostEvent::PointerMoved { x, y } => {
                    if self.pointer.is_none() {
                        log::debug!("pointer first seen at ({}, {})", x, y);
                    }
                    self.pointer = Some(cgmath::vec2(x, y));
                }
                HostEvent::Resized { width, height } => match Viewport::new(width, height) {
                    Ok(viewport) => {
                        log::debug!("resize to {}x{}", width, height);
                        surface.resize(width, height);
                        self.particles.regenerate(viewport);
                    }
                    Err(err) => log::warn!("ignoring resize: {}", err),
                },
            }
        }
    }

    /// Runs a single frame unless the stop handle has fired.
    pub fn frame(&mut self, surface: &mut impl Surface) -> FrameStatus {
        if self.stop.is_stopped() {
            return FrameStatus::Stopped;
        }

        self.apply_events(surface);

        surface.clear();
        self.particles.update(self.pointer);
        self.particles.draw(surface);

        self.frames += 1;
        log::trace!("frame {} drew {} particles", self.frames, self.particles.len());

        FrameStatus::Continue
    }

    /// Runs at most `count` frames and returns how many actually ran.
    pub fn run_frames(&mut self, surface: &mut impl Surface, count: usize) -> usize {
        let mut ran = 0;
        while ran < count && self.frame(surface) == FrameStatus::Continue {
            ran += 1;
        }
        ran
    }

    /// Runs frames at most once per `period` until the stop handle fires.
    pub fn run(&mut self, surface: &mut impl Surface, period: Duration) -> u64 {
        log::info!("animation loop started");
        let started = self.frames;

        loop {
            let frame_start = Instant::now();
            if self.frame(surface) == FrameStatus::Stopped {
                break;
            }
            thread::sleep(period.saturating_sub(frame_start.elapsed()));
        }

        log::info!("animation loop stopped after {} frames", self.frames - started);
        self.frames - started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    fn animation() -> Animation {
        let config = FieldConfig::default().with_seed(5);
        Animation::new(config, Viewport { width: 800.0, height: 600.0 }).unwrap()
    }

    #[test]
    fn test_frame_clears_then_draws_every_particle() {
        let mut animation = animation();
        let mut recorder = Recorder::new();

        assert_eq!(animation.frame(&mut recorder), FrameStatus::Continue);

        assert_eq!(recorder.commands[0], DrawCommand::Clear);
        assert_eq!(recorder.commands.len(), 1001);
        assert_eq!(animation.frames(), 1);
    }

    #[test]
    fn test_draw_order_matches_store_order() {
        let mut animation = animation();
        let mut recorder = Recorder::new();
        animation.frame(&mut recorder);

        for (command, particle) in recorder.last_frame().iter().zip(animation.particles().as_slice()) {
            match *command {
                DrawCommand::Circle { x, y, .. } => {
                    assert_eq!((x, y), (particle.position.x, particle.position.y));
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn test_pointer_starts_unknown_and_tracks_latest_event() {
        let mut animation = animation();
        let mut recorder = Recorder::new();
        assert_eq!(animation.pointer(), None);

        let sender = animation.sender();
        sender.pointer_moved(10.0, 20.0);
        sender.pointer_moved(30.0, 40.0);
        animation.frame(&mut recorder);

        assert_eq!(animation.pointer(), Some(cgmath::vec2(30.0, 40.0)));
    }

    #[test]
    fn test_resize_reaches_surface_and_store() {
        let mut animation = animation();
        let mut recorder = Recorder::new();

        animation.sender().resized(1280.0, 720.0);
        animation.frame(&mut recorder);

        assert_eq!(recorder.commands[0], DrawCommand::Resize { width: 1280.0, height: 720.0 });
        assert_eq!(animation.particles().generation(), 1);
        assert_eq!(animation.particles().viewport(), Viewport { width: 1280.0, height: 720.0 });
    }

    #[test]
    fn test_invalid_resize_keeps_generation() {
        let mut animation = animation();
        let mut recorder = Recorder::new();

        animation.sender().resized(f32::NAN, 720.0);
        animation.frame(&mut recorder);

        assert_eq!(animation.particles().generation(), 0);
    }

    #[test]
    fn test_stop_handle_bounds_run_frames() {
        let mut animation = animation();
        let mut recorder = Recorder::new();

        assert_eq!(animation.run_frames(&mut recorder, 3), 3);
        animation.stop_handle().stop();
        assert_eq!(animation.run_frames(&mut recorder, 3), 0);
        assert_eq!(animation.frame(&mut recorder), FrameStatus::Stopped);
        assert_eq!(recorder.frames(), 3);
    }

    #[test]
    fn test_run_returns_once_stopped_from_another_thread() {
        let mut animation = animation();
        let mut recorder = Recorder::new();
        let stop = animation.stop_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            stop.stop();
        });

        let ran = animation.run(&mut recorder, Duration::from_millis(1));
        stopper.join().unwrap();

        assert!(ran > 0);
        assert_eq!(ran, recorder.frames() as u64);
    }
}
