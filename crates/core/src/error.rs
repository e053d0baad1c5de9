use std::io;

use thiserror::Error;

use crate::entity::EntityId;
use crate::scene_set::SceneId;
use crate::types::Size;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene size must be non-zero on both axes, got {0}")]
    EmptySize(Size),
    #[error("entity {0} is not attached to this scene")]
    UnknownEntity(EntityId),
    #[error("scene {0} does not exist")]
    UnknownScene(SceneId),
    #[error("an animated sprite needs at least one frame")]
    NoFrames,
    #[error("failed to present frame: {0}")]
    Present(#[from] io::Error),
}
