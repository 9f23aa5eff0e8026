#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    FitStart { planets: usize },
    PlanetCarved { index: usize, factor_min: f64 },
    FitFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Optional sink for [`Progress`] events. Planet events may arrive out of
/// order when per-planet work runs in parallel.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
