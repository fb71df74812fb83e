use anyhow::bail;

/// Size of the scanning window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: usize,
    pub cols: usize,
}

/// How a window is split into cells before computing LBP histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub rows: usize,
    pub cols: usize,
}

impl CellGrid {
    pub fn count(&self) -> usize {
        self.rows * self.cols
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectorParams {
    pub window: WindowSize,
    pub stride: usize,
    pub cells: CellGrid,
    /// Number of pyramid levels, the first one being the original image.
    pub levels: usize,
    /// Scale applied between two consecutive pyramid levels.
    pub factor: f64,
    /// Windows must score strictly above this value to become candidates.
    pub threshold: f32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            window: WindowSize { rows: 128, cols: 64 },
            stride: 25,
            cells: CellGrid { rows: 6, cols: 4 },
            levels: 3,
            factor: 0.5,
            threshold: 0.0,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window.rows == 0 || self.window.cols == 0 {
            bail!("Window size must be positive, got {}x{}", self.window.rows, self.window.cols);
        }
        if self.stride == 0 {
            bail!("Stride must be positive");
        }
        if self.levels == 0 {
            bail!("At least one pyramid level is needed");
        }
        if !(self.factor > 0.0 && self.factor <= 1.0) {
            bail!("Pyramid factor must be in (0, 1], got {}", self.factor);
        }
        if self.cells.rows == 0
            || self.cells.cols == 0
            || self.cells.rows > self.window.rows
            || self.cells.cols > self.window.cols
        {
            bail!(
                "Cell grid {}x{} does not fit a {}x{} window",
                self.cells.rows,
                self.cells.cols,
                self.window.rows,
                self.window.cols
            );
        }

        Ok(())
    }
}
