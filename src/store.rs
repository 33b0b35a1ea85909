use crate::types::AppResult;
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path};

pub fn save_to_json<T: Serialize>(path: &Path, data: &T) -> AppResult<()> {
    let file = File::create(path)?;
    let buffer = std::io::BufWriter::new(file);
    serde_json::to_writer(buffer, data)?;
    Ok(())
}

pub fn load_from_json<T: for<'a> Deserialize<'a>>(path: &Path) -> AppResult<T> {
    let file = File::open(path)?;
    let data: T = serde_json::from_reader(file)?;
    Ok(data)
}
