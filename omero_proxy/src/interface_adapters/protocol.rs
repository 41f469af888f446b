use serde::{Deserialize, Serialize};

// Query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    // Absent means "use the default id"; present but blank means no id.
    pub image_id: Option<String>,
    // Full viewer URL that overrides the computed iviewer URL when non-blank.
    pub raw_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    // Latest user-visible status message.
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResetResponse {
    // Whether a session handle was stored before the reset.
    pub cleared: bool,
}
