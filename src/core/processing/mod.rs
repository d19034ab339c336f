//! Per-image transform: decode, resize, watermark, encode.
pub mod font;
pub mod pipeline;
pub mod resize;
pub mod save;
pub mod watermark;
