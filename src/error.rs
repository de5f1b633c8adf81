use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// operation requested before a target image was loaded
    #[error("engine is not ready: no target image loaded")]
    NotReady,

    /// the collaborator delivered a buffer that is not work_size² RGBA
    #[error("target buffer is {actual} bytes, expected {expected} for {size}x{size} RGBA")]
    TargetSizeMismatch {
        size: u32,
        expected: usize,
        actual: usize,
    },

    /// diagnostic probe asked for a pixel outside the working canvas
    #[error("pixel ({x}, {y}) is outside the {size}x{size} working canvas")]
    PixelOutOfBounds { x: u32, y: u32, size: u32 },

    #[error("image i/o failed")]
    Image(#[from] image::ImageError),
}
