use great_circle::GeometryError;
use thiserror::Error;

use crate::ImageId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlapError {
    #[error("overlap walk did not close after {steps} steps")]
    WalkDidNotTerminate { steps: usize },
    #[error("image {image} has no usable outline: {source}")]
    Frustum {
        image: ImageId,
        source: GeometryError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("no image named {0}")]
    UnknownImage(ImageId),
    #[error(transparent)]
    Overlap(#[from] OverlapError),
}
