use crate::models::WorkingSet;
use crate::shots::Policy;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub policy: Policy,
    pub data: Arc<Mutex<WorkingSet>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, policy: Policy, data: WorkingSet) -> Self {
        Self {
            data_path,
            policy,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
