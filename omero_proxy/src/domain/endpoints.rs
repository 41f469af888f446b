// URL templates for the OMERO webgateway/webclient and the metadata API.
// Bases are stored without a trailing slash; ids are substituted verbatim.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Thumbnail,
    Full,
}

impl ImageKind {
    pub fn url(self, base: &str, image_id: &str) -> String {
        match self {
            ImageKind::Thumbnail => thumbnail_url(base, image_id),
            ImageKind::Full => full_image_url(base, image_id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Thumbnail => "thumbnail",
            ImageKind::Full => "full",
        }
    }
}

pub fn thumbnail_url(base: &str, image_id: &str) -> String {
    format!("{base}/webgateway/render_thumbnail/{image_id}/")
}

pub fn full_image_url(base: &str, image_id: &str) -> String {
    format!("{base}/webgateway/render_image/{image_id}/")
}

// Interactive iviewer page, embedded by the dashboard as an iframe.
pub fn viewer_url(base: &str, image_id: &str) -> String {
    format!("{base}/iviewer/?images={image_id}")
}

pub fn login_url(base: &str) -> String {
    format!("{base}/webclient/login/")
}

// Join a caller-supplied path onto the metadata API base with exactly one slash,
// carrying the caller's raw query string through unchanged.
pub fn metadata_url(base: &str, path: &str, query: Option<&str>) -> String {
    let url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{url}?{query}"),
        None => url,
    }
}
