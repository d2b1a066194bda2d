/// Color of a worker's progress bar in the operator surface
#[derive(Debug, Clone, Default)]
pub enum BarColor {
    #[default]
    CYAN,
    MAGENTA,
    RED,
    GREEN,
}

/// A progress report sent from a decode worker to the UI thread
#[derive(Debug, Clone, Default)]
pub struct WorkerStatus {
    pub progress: f32,
    pub file_number: usize,
    pub worker_id: usize,
    pub color: BarColor,
}

impl WorkerStatus {
    pub fn new(progress: f32, file_number: usize, worker_id: usize, color: BarColor) -> Self {
        Self {
            progress,
            file_number,
            worker_id,
            color,
        }
    }
}
