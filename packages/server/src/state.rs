use std::sync::Arc;

use crate::config::AppConfig;
use crate::service::PictureService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pictures: Arc<PictureService>,
}
