use std::sync::Arc;

use crate::generator::PageGenerator;

#[derive(Clone)]
pub struct AppState {
    /// Rendered-page cache and its regeneration machinery
    pub generator: Arc<PageGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<PageGenerator>) -> Self {
        Self { generator }
    }
}
