use std::path::PathBuf;

use sensi_model::{AlignmentResult, AssayCatalog, FileLayout};

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub date_formats: Vec<String>,
    pub alignment: AlignmentResult,
}

#[derive(Debug)]
pub struct InspectResult {
    pub input: PathBuf,
    pub files: Vec<InspectedFile>,
    pub catalog: AssayCatalog,
}

#[derive(Debug)]
pub struct InspectedFile {
    pub layout: FileLayout,
    pub rows: usize,
}
