mod endpoints;
mod errors;
mod ports;
mod session;

// Re-export the domain boundary types and ports.
pub use endpoints::{
    ImageKind, full_image_url, login_url, metadata_url, thumbnail_url, viewer_url,
};
pub use errors::{FetchError, GatewayError, MetadataError};
pub use ports::{LoginReply, MetadataDocument, MetadataSource, OmeroGateway};
pub use session::{Credentials, ImageId, SessionHandle};
