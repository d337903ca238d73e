use crate::errors::AppError;
use crate::models::WorkingSet;
use crate::shots::Policy;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/board.json"))
}

pub fn resolve_policy() -> Policy {
    match env::var("SHOT_POLICY") {
        Ok(value) => Policy::parse(&value).unwrap_or_else(|| {
            warn!("unrecognised SHOT_POLICY {value:?}, using sum-of-increments");
            Policy::default()
        }),
        Err(_) => Policy::default(),
    }
}

pub async fn load_data(path: &Path) -> WorkingSet {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                WorkingSet::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => WorkingSet::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            WorkingSet::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &WorkingSet) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
