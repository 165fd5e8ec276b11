// lib.rs - mouse-drag and arrow-key camera control for embedded 360 video players

pub mod config;
pub mod error;
pub mod overlay;
pub mod panorama;
pub mod player;
pub mod range;
pub mod throttle;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{ConfigError, PlayerError, RangeError, TrackerError};
pub use overlay::{ElementRect, EventOverlay};
pub use player::{is_360_video, CameraPlayer, CameraProps};
pub use range::{map_position_and_width, BoundedRange, RangeTransform};
pub use throttle::{Clock, ManualClock, SystemClock, Throttle, Throttled};
pub use tracker::{CameraInputTracker, EventResponse, InputEvent, Key};
