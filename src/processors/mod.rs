//! Image processing building blocks.
//!
//! * [`geometry`] - Sizes, crop boxes, and the overlap predicate
//! * [`sampler`] - Rejection sampling of non-overlapping crop regions
//! * [`transforms`] - Pre- and post-crop image transforms

pub mod geometry;
pub mod sampler;
pub mod transforms;

pub use geometry::{CanvasSize, CropBox, CropSize, Size};
pub use sampler::{RegionSet, generate_crops};
pub use transforms::{
    GreyscaleTransform, ImageTransform, RotateTransform, Rotation, TransformChain,
    TransformConfig, TransformFactory,
};
