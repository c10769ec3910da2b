pub mod animation;
pub mod config;
pub mod shape;
pub mod store;
pub mod surface;

pub use animation::{Animation, EventSender, FrameStatus, HostEvent, StopHandle};
pub use config::{ConfigError, FieldConfig, Rgb, ShapeKind};
pub use shape::{Geometry, Particle, Viewport, ViewportError};
pub use store::Particles;
pub use surface::{DrawCommand, Recorder, Surface};
