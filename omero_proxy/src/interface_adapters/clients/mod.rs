// The clients defined here are reqwest clients for the external services we proxy.

pub mod metadata;
pub mod omero;

pub use metadata::MetadataClient;
pub use omero::OmeroClient;
