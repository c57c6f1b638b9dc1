//! Image generation side channel

pub mod image;

pub use image::{run_image_worker, ImageResponse, ImageService, WorkerReport};
