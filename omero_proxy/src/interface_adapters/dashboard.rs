use crate::domain::{ImageId, ImageKind, viewer_url};
use crate::interface_adapters::protocol::DashboardQuery;
use crate::interface_adapters::state::DashboardSettings;

// Everything the dashboard page shows, resolved from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub image_id: Option<String>,
    pub raw_url: String,
    pub viewer_src: Option<String>,
    pub status: String,
}

impl DashboardView {
    pub fn resolve(query: DashboardQuery, settings: &DashboardSettings, status: String) -> Self {
        let image_id = match query.image_id {
            Some(raw) => ImageId::parse(&raw).ok(),
            None => ImageId::parse(&settings.default_image_id).ok(),
        }
        .map(|id| id.as_str().to_string());
        let raw_url = query.raw_url.unwrap_or_default().trim().to_string();

        // A pasted viewer URL is trusted as given and wins over the image id.
        let viewer_src = if !raw_url.is_empty() {
            Some(raw_url.clone())
        } else {
            image_id
                .as_deref()
                .map(|id| viewer_url(&settings.omero_base, id))
        };

        Self {
            image_id,
            raw_url,
            viewer_src,
            status,
        }
    }
}

pub fn render_page(view: &DashboardView) -> String {
    let image_id = view.image_id.as_deref().unwrap_or_default();

    let images = match view.image_id.as_deref() {
        Some(id) => format!(
            r#"<div class="card"><h2>Thumbnail (proxied)</h2><img alt="thumbnail" src="{thumb}"></div>
<div class="card"><h2>Full image (proxied)</h2><img alt="full image" src="{full}"></div>"#,
            thumb = escape_html(&proxy_image_path(ImageKind::Thumbnail, id)),
            full = escape_html(&proxy_image_path(ImageKind::Full, id)),
        ),
        None => String::new(),
    };

    let viewer = match view.viewer_src.as_deref() {
        Some(src) => format!(
            r#"<div class="card wide"><h2>Interactive iviewer</h2><iframe src="{}" allowfullscreen></iframe></div>"#,
            escape_html(src)
        ),
        None => r#"<div class="card wide"><p>Provide an image ID or URL to view.</p></div>"#
            .to_string(),
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>OMERO Proxy Viewer</title>
<style>
body {{ font-family: sans-serif; margin: 0; display: flex; }}
aside {{ width: 22rem; padding: 1rem; background: #f4f4f4; min-height: 100vh; }}
main {{ flex: 1; padding: 1rem; display: flex; flex-wrap: wrap; gap: 1rem; }}
input {{ width: 100%; margin-bottom: 0.5rem; }}
.card {{ border: 1px solid #ccc; border-radius: 8px; padding: 0.5rem; flex: 1 1 20rem; }}
.card img {{ max-width: 100%; }}
.wide {{ flex-basis: 100%; }}
iframe {{ width: 100%; height: 80vh; border: none; }}
</style>
</head>
<body>
<aside>
<form method="get" action="/">
<label for="image_id">OMERO Image ID</label>
<input id="image_id" name="image_id" value="{image_id}">
<label for="raw_url">Or full OMERO viewer URL (overrides Image ID)</label>
<input id="raw_url" name="raw_url" value="{raw_url}">
<button type="submit">Load Image</button>
</form>
<hr>
<p id="status">Status: {status}</p>
<p>The browser only talks to this proxy. The proxy logs in to OMERO with a service account and forwards <code>/webgateway</code> renders.</p>
</aside>
<main>
{images}
{viewer}
</main>
</body>
</html>
"#,
        image_id = escape_html(image_id),
        raw_url = escape_html(&view.raw_url),
        status = escape_html(&view.status),
    )
}

// Proxy route for an image, with the id percent-encoded as one path segment.
pub fn proxy_image_path(kind: ImageKind, image_id: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(image_id.as_bytes()).collect();
    format!("/images/{}/{}", segment.replace('+', "%20"), kind.as_str())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
