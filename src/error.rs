use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{0}` is not a #rrggbb color.")]
    InvalidColor(String),

    #[error("`{0}` is not a NAME=#rrggbb swatch.")]
    InvalidSwatch(String),

    #[error("A {width}x{height} frame does not match its pixel data.")]
    FrameSize { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
