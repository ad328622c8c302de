//! Contract violations surfaced by the rasterizer.
//!
//! These are precondition failures, not recoverable runtime conditions: a
//! `clear` or `draw` that hits one aborts and reports it instead of writing
//! through bad bindings.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid buffer dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("no render target bound")]
    NoRenderTargetBound,
    #[error("no vertex buffer bound")]
    NoVertexBufferBound,
    #[error("no index buffer bound")]
    NoIndexBufferBound,
    #[error("render target has {color} elements but depth buffer has {depth}")]
    BufferSizeMismatch { color: usize, depth: usize },
    #[error("index {index} out of range for buffer of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("degenerate triangle with zero signed area")]
    DegenerateTriangle,
}
