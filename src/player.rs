// player.rs - the video player capability consumed by the tracker

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Camera orientation of a 360 video, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraProps {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    pub fov: f64,
}

/// Camera access on an embedded video player.
///
/// Calls resolve on the UI thread, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait CameraPlayer {
    /// Fails with [`PlayerError::Not360Video`] when the loaded video is not a 360 video.
    async fn get_camera_props(&self) -> Result<CameraProps, PlayerError>;

    /// Applies `props` and echoes back what the player actually set.
    async fn set_camera_props(&self, props: CameraProps) -> Result<CameraProps, PlayerError>;
}

/// A player is showing 360 content exactly when it can report camera props.
pub async fn is_360_video<P: CameraPlayer + ?Sized>(player: &P) -> bool {
    player.get_camera_props().await.is_ok()
}
