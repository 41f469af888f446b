use serde_json::Value;

// Declared format of an image payload. Both OMERO render endpoints produce JPEG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

pub fn render_image(bytes: Vec<u8>) -> ImagePayload {
    ImagePayload {
        bytes,
        format: ImageFormat::Jpeg,
    }
}

pub fn render_json_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
