use std::path::PathBuf;

use thiserror::Error;

/// Failures from loading assets, reading configuration and writing images.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("OBJ file {} contains no objects", .0.display())]
    EmptyModel(PathBuf),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture {} has zero size", .path.display())]
    EmptyTexture { path: PathBuf },

    #[error("invalid render config: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error("render config field `{0}` must be nonzero")]
    ZeroSize(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
