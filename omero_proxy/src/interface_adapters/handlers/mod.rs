pub mod dashboard;
pub mod images;
pub mod metadata;
