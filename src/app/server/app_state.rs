use crate::app::points::PointSet;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) points: Arc<PointSet>,
    pub(crate) extent: u32,
}
