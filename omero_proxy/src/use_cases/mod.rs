// Use cases: the login-then-fetch flow, metadata lookups and renderers.

pub mod fetch_image;
pub mod metadata;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use fetch_image::ImageFetchUseCase;
pub use metadata::{MetadataFailure, MetadataUseCase};
pub use render::{ImageFormat, ImagePayload, render_image, render_json_pretty};
pub use types::{SessionCell, StatusBoard};
