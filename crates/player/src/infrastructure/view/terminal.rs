//! Terminal view for the native client
//!
//! Mirrors every write into a [`MemoryView`] and prints the whole page on
//! `present`, once per event.

use std::io::Write;

use tictac_domain::{Cell, CellIndex, ScorePanel, ViewPhase, ViewRegion};

use crate::ports::outbound::{ViewError, ViewPort};

use super::memory::MemoryView;

pub struct TerminalView<W: Write> {
    out: W,
    mirror: MemoryView,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            mirror: MemoryView::new(),
        }
    }

    pub fn mirror(&self) -> &MemoryView {
        &self.mirror
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ViewPort for TerminalView<W> {
    fn set_region_visible(&mut self, region: ViewRegion, visible: bool) -> Result<(), ViewError> {
        self.mirror.set_region_visible(region, visible)
    }

    fn write_cell(&mut self, index: CellIndex, cell: Cell) -> Result<(), ViewError> {
        self.mirror.write_cell(index, cell)
    }

    fn write_score(&mut self, score: &ScorePanel) -> Result<(), ViewError> {
        self.mirror.write_score(score)
    }

    fn present(&mut self, phase: ViewPhase) -> Result<(), ViewError> {
        self.mirror.present(phase)?;
        let page = render_page(&self.mirror);
        self.out.write_all(page.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Text for everything currently visible in `view`.
///
/// Empty cells show their index so the player knows what to type.
pub fn render_page(view: &MemoryView) -> String {
    let mut lines = Vec::new();

    if view.is_visible(ViewRegion::ActiveGame) {
        let board = view.board();
        let rows: Vec<String> = board
            .cells()
            .chunks(3)
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        Cell::Empty => (row * 3 + col).to_string(),
                        Cell::Taken(symbol) => symbol.to_string(),
                    })
                    .map(|text| format!(" {} ", text))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect();
        lines.push(rows.join("\n---+---+---\n"));

        if view.is_visible(ViewRegion::XTurnBadge) {
            lines.push("Next: x".to_string());
        } else if view.is_visible(ViewRegion::OTurnBadge) {
            lines.push("Next: o".to_string());
        }
    }

    if view.is_visible(ViewRegion::StatsPanel) {
        if let Some(score) = view.score() {
            lines.push(format!(
                "{} (x) {}  ties {}  {} {} (o)",
                score.x_name,
                score.x_wins(),
                score.ties(),
                score.o_wins(),
                score.o_name
            ));
        }
    }

    if view.is_visible(ViewRegion::Waiting) {
        lines.push("Waiting for an opponent...".to_string());
    }
    if view.is_visible(ViewRegion::FullGameNotice) {
        lines.push("This game is full.".to_string());
    }
    if view.is_visible(ViewRegion::NewGameButton) {
        lines.push("Round over. Type `n` for a new round.".to_string());
    }

    let mut page = lines.join("\n");
    page.push_str("\n\n");
    page
}
