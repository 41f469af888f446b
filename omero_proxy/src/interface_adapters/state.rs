use crate::use_cases::{ImageFetchUseCase, MetadataUseCase};

#[derive(Clone)]
pub struct AppState {
    // Use cases hold Arc<dyn Port> so any gateway implementation can be injected.
    pub images: ImageFetchUseCase,
    pub metadata: MetadataUseCase,
    pub dashboard: DashboardSettings,
}

// Values the dashboard page needs besides the live status.
#[derive(Clone, Debug)]
pub struct DashboardSettings {
    pub omero_base: String,
    pub default_image_id: String,
}
