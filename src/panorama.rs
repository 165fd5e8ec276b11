// panorama.rs - in-process 360 player holding the camera of a panorama view

use std::cell::Cell;

use async_trait::async_trait;

use crate::error::PlayerError;
use crate::player::{CameraPlayer, CameraProps};

pub const DEFAULT_FOV: f64 = 46.8;

/// A local player whose camera state lives in memory.
///
/// Writes are accepted as-is and echoed back. A player built with
/// [`PanoramaPlayer::flat`] behaves like one showing a regular, non-360 video
/// and rejects every camera call.
#[derive(Debug)]
pub struct PanoramaPlayer {
    camera: Cell<Option<CameraProps>>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl PanoramaPlayer {
    pub fn new(camera: CameraProps) -> Self {
        Self {
            camera: Cell::new(Some(camera)),
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    pub fn flat() -> Self {
        Self {
            camera: Cell::new(None),
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    /// Camera facing `yaw`/`pitch` with no roll and the default field of view.
    pub fn facing(yaw: f64, pitch: f64) -> Self {
        Self::new(CameraProps {
            yaw,
            pitch,
            roll: 0.0,
            fov: DEFAULT_FOV,
        })
    }

    pub fn camera(&self) -> Option<CameraProps> {
        self.camera.get()
    }

    /// Number of `get_camera_props` calls served so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of `set_camera_props` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl CameraPlayer for PanoramaPlayer {
    async fn get_camera_props(&self) -> Result<CameraProps, PlayerError> {
        self.reads.set(self.reads.get() + 1);
        self.camera.get().ok_or(PlayerError::Not360Video)
    }

    async fn set_camera_props(&self, props: CameraProps) -> Result<CameraProps, PlayerError> {
        self.writes.set(self.writes.get() + 1);
        if self.camera.get().is_none() {
            return Err(PlayerError::Not360Video);
        }
        self.camera.set(Some(props));
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_written_props() {
        let player = PanoramaPlayer::facing(10.0, 5.0);
        let props = CameraProps {
            yaw: 20.0,
            pitch: -5.0,
            roll: 1.0,
            fov: 90.0,
        };

        let echoed = pollster::block_on(player.set_camera_props(props)).unwrap();
        assert_eq!(echoed, props);
        assert_eq!(player.camera(), Some(props));
        assert_eq!(player.writes(), 1);
    }

    #[test]
    fn flat_player_rejects_camera_calls() {
        let player = PanoramaPlayer::flat();
        assert_eq!(
            pollster::block_on(player.get_camera_props()),
            Err(PlayerError::Not360Video)
        );
        assert!(pollster::block_on(player.set_camera_props(CameraProps {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: DEFAULT_FOV,
        }))
        .is_err());
        assert_eq!(player.camera(), None);
    }
}
