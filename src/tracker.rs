// tracker.rs - turns pointer drags and arrow keys into camera moves on a 360 player

use log::{debug, info, trace};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::overlay::{ElementRect, EventOverlay, Listener, DRAGGING_CLASS};
use crate::player::{CameraPlayer, CameraProps};
use crate::range::{map_position_and_width, BoundedRange, RangeTransform};
use crate::throttle::{Clock, SystemClock, Throttle};

pub const YAW_MIN: f64 = 0.0;
pub const YAW_MAX: f64 = 360.0;
pub const PITCH_MIN: f64 = -90.0;
pub const PITCH_MAX: f64 = 90.0;

/// Fraction of the element's width (height) a drag has to cover to sweep the whole yaw (pitch) range.
pub const DRAG_SPAN_RATIO: f64 = 0.5;

pub fn yaw_range(yaw: f64) -> Result<BoundedRange, TrackerError> {
    Ok(BoundedRange::wrapping(YAW_MIN, YAW_MAX, yaw)?)
}

pub fn pitch_range(pitch: f64) -> Result<BoundedRange, TrackerError> {
    Ok(BoundedRange::clamped(PITCH_MIN, PITCH_MAX, pitch)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => Key::Other,
        }
    }
}

/// Raw input reaching the overlay (or, for keys, the window).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { client_x: f64, client_y: f64 },
    MouseMove { client_x: f64, client_y: f64 },
    MouseUp,
    KeyDown { key: Key },
    Focus,
    Blur,
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventResponse {
    pub prevent_default: bool,
    /// Props echoed by the player, when a camera write went through.
    pub camera: Option<CameraProps>,
}

impl EventResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled(camera: Option<CameraProps>) -> Self {
        Self {
            prevent_default: true,
            camera,
        }
    }
}

/// Pointer-coordinate ranges for the active drag, one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragData {
    pub x_range: BoundedRange,
    pub y_range: BoundedRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging(DragData),
}

/// Steers the camera of one player from input captured on its overlay.
///
/// Each tracker owns its yaw and pitch ranges. They only change once the player
/// has accepted a write, so a rejected write leaves them where they were.
pub struct CameraInputTracker<P, C = SystemClock> {
    element: ElementRect,
    player: P,
    overlay: EventOverlay,
    config: TrackerConfig,
    throttle: Option<Throttle<C>>,
    yaw: BoundedRange,
    pitch: BoundedRange,
    gesture: Gesture,
}

impl<P: CameraPlayer> CameraInputTracker<P, SystemClock> {
    pub fn new(
        element: ElementRect,
        player: P,
        yaw: f64,
        pitch: f64,
        config: TrackerConfig,
    ) -> Result<Self, TrackerError> {
        Self::with_clock(element, player, yaw, pitch, config, SystemClock::new())
    }

    /// Builds a tracker seeded from the player's current camera.
    ///
    /// Fails when the player cannot report camera props, i.e. for non-360 videos.
    pub async fn attach(
        element: ElementRect,
        player: P,
        config: TrackerConfig,
    ) -> Result<Self, TrackerError> {
        Self::attach_with_clock(element, player, config, SystemClock::new()).await
    }
}

impl<P: CameraPlayer, C: Clock> CameraInputTracker<P, C> {
    pub fn with_clock(
        element: ElementRect,
        player: P,
        yaw: f64,
        pitch: f64,
        config: TrackerConfig,
        clock: C,
    ) -> Result<Self, TrackerError> {
        let throttle = config
            .input_throttle()
            .map(|limit| Throttle::with_clock(limit, clock));

        info!(
            "camera input tracker attached at yaw={yaw} pitch={pitch}, throttle={}ms",
            config.input_throttle_ms
        );

        Ok(Self {
            element,
            player,
            overlay: EventOverlay::new(),
            config,
            throttle,
            yaw: yaw_range(yaw)?,
            pitch: pitch_range(pitch)?,
            gesture: Gesture::Idle,
        })
    }

    pub async fn attach_with_clock(
        element: ElementRect,
        player: P,
        config: TrackerConfig,
        clock: C,
    ) -> Result<Self, TrackerError> {
        let camera = player.get_camera_props().await?;
        Self::with_clock(element, player, camera.yaw, camera.pitch, config, clock)
    }

    pub fn yaw(&self) -> f64 {
        self.yaw.current()
    }

    pub fn pitch(&self) -> f64 {
        self.pitch.current()
    }

    pub fn overlay(&self) -> &EventOverlay {
        &self.overlay
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn element(&self) -> ElementRect {
        self.element
    }

    pub fn set_element_size(&mut self, element: ElementRect) {
        self.element = element;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    pub fn drag_data(&self) -> Option<&DragData> {
        match &self.gesture {
            Gesture::Dragging(data) => Some(data),
            Gesture::Idle => None,
        }
    }

    /// Routes one input event. Events the overlay is not listening for are ignored.
    pub async fn handle(&mut self, event: InputEvent) -> Result<EventResponse, TrackerError> {
        match event {
            InputEvent::MouseDown { client_x, client_y } if self.overlay.listens(Listener::MouseDown) => {
                self.start_drag(client_x, client_y)?;
                Ok(EventResponse::ignored())
            }
            InputEvent::MouseMove { client_x, client_y } if self.overlay.listens(Listener::MouseMove) => {
                let camera = self.drag_to(client_x, client_y).await?;
                Ok(EventResponse::handled(camera))
            }
            InputEvent::MouseUp if self.overlay.listens(Listener::MouseUp) => {
                self.end_drag();
                Ok(EventResponse::ignored())
            }
            InputEvent::KeyDown { key } if self.overlay.listens(Listener::WindowKeyDown) => {
                self.key_down(key).await
            }
            InputEvent::Focus => {
                self.overlay.focus();
                Ok(EventResponse::ignored())
            }
            InputEvent::Blur => {
                self.overlay.blur();
                Ok(EventResponse::ignored())
            }
            _ => Ok(EventResponse::ignored()),
        }
    }

    /// Moves the camera, subject to the configured throttle.
    ///
    /// Returns `Ok(None)` when the call was dropped by the throttle.
    pub async fn move_camera(&mut self, yaw: f64, pitch: f64) -> Result<Option<CameraProps>, TrackerError> {
        if let Some(throttle) = &mut self.throttle {
            if !throttle.try_acquire() {
                debug!("camera move to yaw={yaw} pitch={pitch} dropped by throttle");
                return Ok(None);
            }
        }
        self.write_camera(yaw, pitch).await.map(Some)
    }

    /// The only path that changes the camera.
    ///
    /// Roll and fov are carried over from the player. The tracker's own ranges
    /// are committed only after the player accepts the write.
    async fn write_camera(&mut self, yaw: f64, pitch: f64) -> Result<CameraProps, TrackerError> {
        let camera = self.player.get_camera_props().await?;

        let next_yaw = self.yaw.with_current(yaw);
        let next_pitch = self.pitch.with_current(pitch);

        let echoed = self
            .player
            .set_camera_props(CameraProps {
                yaw: next_yaw.current(),
                pitch: next_pitch.current(),
                ..camera
            })
            .await?;

        self.yaw = next_yaw;
        self.pitch = next_pitch;
        trace!("camera at yaw={} pitch={}", echoed.yaw, echoed.pitch);
        Ok(echoed)
    }

    fn start_drag(&mut self, client_x: f64, client_y: f64) -> Result<(), TrackerError> {
        let data = DragData {
            x_range: map_position_and_width(&self.yaw, client_x, self.element.width * DRAG_SPAN_RATIO)?,
            y_range: map_position_and_width(&self.pitch, client_y, self.element.height * DRAG_SPAN_RATIO)?,
        };

        self.overlay.add_class(DRAGGING_CLASS);
        self.overlay.listen(Listener::MouseMove);
        self.gesture = Gesture::Dragging(data);
        debug!("drag started at ({client_x}, {client_y})");
        Ok(())
    }

    async fn drag_to(&mut self, client_x: f64, client_y: f64) -> Result<Option<CameraProps>, TrackerError> {
        let Gesture::Dragging(data) = &mut self.gesture else {
            return Ok(None);
        };

        data.x_range.set_current(client_x);
        data.y_range.set_current(client_y);

        let next_yaw = RangeTransform::new(&data.x_range, &self.yaw).apply(data.x_range.current());
        let next_pitch = RangeTransform::new(&data.y_range, &self.pitch).apply(data.y_range.current());

        self.move_camera(next_yaw, next_pitch).await
    }

    fn end_drag(&mut self) {
        self.overlay.remove_class(DRAGGING_CLASS);
        self.overlay.unlisten(Listener::MouseMove);
        if self.is_dragging() {
            debug!("drag ended");
        }
        self.gesture = Gesture::Idle;
    }

    async fn key_down(&mut self, key: Key) -> Result<EventResponse, TrackerError> {
        if !self.overlay.is_focused() {
            return Ok(EventResponse::ignored());
        }

        let step = self.config.key_press_increment;
        let (yaw, pitch) = (self.yaw.current(), self.pitch.current());
        let (yaw, pitch) = match key {
            Key::ArrowRight => (yaw + step, pitch),
            Key::ArrowLeft => (yaw - step, pitch),
            Key::ArrowUp => (yaw, pitch + step),
            Key::ArrowDown => (yaw, pitch - step),
            Key::Other => return Ok(EventResponse::ignored()),
        };

        let camera = self.move_camera(yaw, pitch).await?;
        Ok(EventResponse::handled(camera))
    }
}
