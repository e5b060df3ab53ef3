//! In-memory view
//!
//! Holds exactly what a real surface would show. The terminal view renders
//! from it and tests assert against it.

use tictac_domain::{
    BoardSnapshot, Cell, CellIndex, ScorePanel, ViewPhase, ViewRegion, ViewRegionState,
    BOARD_SIZE,
};

use crate::ports::outbound::{ViewError, ViewPort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryView {
    regions: ViewRegionState,
    cells: [Cell; BOARD_SIZE],
    score: Option<ScorePanel>,
    phase: ViewPhase,
    region_writes: usize,
    presents: usize,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self {
            regions: ViewRegionState::markup_default(),
            cells: [Cell::Empty; BOARD_SIZE],
            score: None,
            phase: ViewPhase::default(),
            region_writes: 0,
            presents: 0,
        }
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &ViewRegionState {
        &self.regions
    }

    pub fn is_visible(&self, region: ViewRegion) -> bool {
        self.regions.is_visible(region)
    }

    pub fn visible_regions(&self) -> Vec<ViewRegion> {
        self.regions.visible_regions().collect()
    }

    pub fn board(&self) -> BoardSnapshot {
        BoardSnapshot::from(self.cells)
    }

    pub fn score(&self) -> Option<&ScorePanel> {
        self.score.as_ref()
    }

    /// Phase passed to the last `present`
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Number of `set_region_visible` calls so far
    pub fn region_writes(&self) -> usize {
        self.region_writes
    }

    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl ViewPort for MemoryView {
    fn set_region_visible(&mut self, region: ViewRegion, visible: bool) -> Result<(), ViewError> {
        self.regions.set(region, visible);
        self.region_writes += 1;
        Ok(())
    }

    fn write_cell(&mut self, index: CellIndex, cell: Cell) -> Result<(), ViewError> {
        self.cells[index.as_usize()] = cell;
        Ok(())
    }

    fn write_score(&mut self, score: &ScorePanel) -> Result<(), ViewError> {
        self.score = Some(score.clone());
        Ok(())
    }

    fn present(&mut self, phase: ViewPhase) -> Result<(), ViewError> {
        self.phase = phase;
        self.presents += 1;
        Ok(())
    }
}
