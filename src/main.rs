// main.rs - desktop front-end: the window stands in for the player element

use vimeo360_input::panorama::PanoramaPlayer;
use vimeo360_input::{
    is_360_video, CameraInputTracker, CameraProps, ElementRect, EventResponse, InputEvent, Key,
    TrackerConfig, TrackerError,
};

use anyhow::Context;
use log::{info, warn};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

const START_YAW: f64 = 180.0;
const START_PITCH: f64 = 0.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TrackerConfig::resolve_from_args().context("resolving tracker config")?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("360 camera")
        .with_inner_size(LogicalSize::new(1280, 720))
        .build(&event_loop)
        .context("creating window")?;

    let player = PanoramaPlayer::facing(START_YAW, START_PITCH);
    if !pollster::block_on(is_360_video(&player)) {
        anyhow::bail!("player is not showing 360 content");
    }

    let mut tracker = pollster::block_on(CameraInputTracker::attach(
        element_rect(&window),
        player,
        config,
    ))
    .context("attaching camera input tracker")?;
    show_camera(&window, tracker.yaw(), tracker.pitch());

    let mut cursor = PhysicalPosition::new(0.0, 0.0);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let Event::WindowEvent { event, .. } = event else {
            return;
        };

        let input = match event {
            WindowEvent::CloseRequested => {
                *control_flow = ControlFlow::Exit;
                None
            }

            WindowEvent::Resized(_) => {
                tracker.set_element_size(element_rect(&window));
                None
            }

            WindowEvent::Focused(true) => Some(InputEvent::Focus),
            WindowEvent::Focused(false) => Some(InputEvent::Blur),

            WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                let key = match input.virtual_keycode {
                    Some(VirtualKeyCode::Left) => Key::ArrowLeft,
                    Some(VirtualKeyCode::Right) => Key::ArrowRight,
                    Some(VirtualKeyCode::Up) => Key::ArrowUp,
                    Some(VirtualKeyCode::Down) => Key::ArrowDown,
                    _ => Key::Other,
                };
                Some(InputEvent::KeyDown { key })
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let logical = cursor.to_logical::<f64>(window.scale_factor());
                Some(match state {
                    ElementState::Pressed => InputEvent::MouseDown {
                        client_x: logical.x,
                        client_y: logical.y,
                    },
                    ElementState::Released => InputEvent::MouseUp,
                })
            }

            WindowEvent::CursorMoved { position, .. } => {
                cursor = position;
                let logical = position.to_logical::<f64>(window.scale_factor());
                Some(InputEvent::MouseMove {
                    client_x: logical.x,
                    client_y: logical.y,
                })
            }

            _ => None,
        };

        if let Some(input) = input {
            match pollster::block_on(tracker.handle(input)) {
                Ok(EventResponse {
                    camera: Some(CameraProps { yaw, pitch, .. }),
                    ..
                }) => show_camera(&window, yaw, pitch),
                Ok(_) => {}
                Err(TrackerError::Player(e)) => warn!("camera update rejected: {e}"),
                Err(e) => warn!("input ignored: {e}"),
            }
        }
    });
}

fn element_rect(window: &Window) -> ElementRect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    ElementRect::new(size.width, size.height)
}

fn show_camera(window: &Window, yaw: f64, pitch: f64) {
    info!("camera yaw={yaw:.1} pitch={pitch:.1}");
    window.set_title(&format!("360 camera | Yaw: {yaw:.1}° | Pitch: {pitch:.1}°"));
}
