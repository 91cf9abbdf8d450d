//! Application Configuration

use std::path::PathBuf;

/// Academy application configuration
#[derive(Debug, Clone)]
pub struct AcademyConfig {
    /// Directory uploaded material files are stored under
    pub materials_dir: PathBuf,
}

impl Default for AcademyConfig {
    fn default() -> Self {
        Self {
            materials_dir: PathBuf::from("media/materials"),
        }
    }
}
