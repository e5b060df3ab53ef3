//! Named, independently show/hide-able areas of the page

use crate::value_objects::Symbol;

const REGION_COUNT: usize = 7;

/// A region of the game page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewRegion {
    Waiting,
    NewGameButton,
    ActiveGame,
    FullGameNotice,
    StatsPanel,
    XTurnBadge,
    OTurnBadge,
}

impl ViewRegion {
    pub const ALL: [ViewRegion; REGION_COUNT] = [
        ViewRegion::Waiting,
        ViewRegion::NewGameButton,
        ViewRegion::ActiveGame,
        ViewRegion::FullGameNotice,
        ViewRegion::StatsPanel,
        ViewRegion::XTurnBadge,
        ViewRegion::OTurnBadge,
    ];

    /// Badge announcing that `symbol` moves next
    pub fn turn_badge(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => ViewRegion::XTurnBadge,
            Symbol::O => ViewRegion::OTurnBadge,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ViewRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewRegion::Waiting => "waiting",
            ViewRegion::NewGameButton => "newGameButton",
            ViewRegion::ActiveGame => "activeGame",
            ViewRegion::FullGameNotice => "fullGameNotice",
            ViewRegion::StatsPanel => "statsPanel",
            ViewRegion::XTurnBadge => "xTurnBadge",
            ViewRegion::OTurnBadge => "oTurnBadge",
        };
        f.write_str(name)
    }
}

/// Visibility flag for every region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRegionState {
    visible: [bool; REGION_COUNT],
}

impl ViewRegionState {
    /// Every region hidden
    pub fn all_hidden() -> Self {
        Self {
            visible: [false; REGION_COUNT],
        }
    }

    /// What the host page shows before any event arrives
    pub fn markup_default() -> Self {
        Self::only(ViewRegion::Waiting)
    }

    /// `region` visible, everything else hidden
    pub fn only(region: ViewRegion) -> Self {
        let mut state = Self::all_hidden();
        state.show(region);
        state
    }

    pub fn is_visible(&self, region: ViewRegion) -> bool {
        self.visible[region.slot()]
    }

    pub fn set(&mut self, region: ViewRegion, visible: bool) {
        self.visible[region.slot()] = visible;
    }

    pub fn show(&mut self, region: ViewRegion) {
        self.set(region, true);
    }

    pub fn hide(&mut self, region: ViewRegion) {
        self.set(region, false);
    }

    /// Show the badge for `next` and hide the other one
    pub fn set_turn(&mut self, next: Symbol) {
        self.show(ViewRegion::turn_badge(next));
        self.hide(ViewRegion::turn_badge(next.other()));
    }

    pub fn visible_regions(&self) -> impl Iterator<Item = ViewRegion> + '_ {
        ViewRegion::ALL
            .into_iter()
            .filter(move |region| self.is_visible(*region))
    }

    /// Every region paired with its flag, in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (ViewRegion, bool)> + '_ {
        ViewRegion::ALL
            .into_iter()
            .map(move |region| (region, self.is_visible(region)))
    }

    /// Regions whose flag differs in `next`, with the flag they should take
    pub fn diff(&self, next: &ViewRegionState) -> Vec<(ViewRegion, bool)> {
        next.entries()
            .filter(|(region, visible)| self.is_visible(*region) != *visible)
            .collect()
    }
}

impl Default for ViewRegionState {
    fn default() -> Self {
        Self::markup_default()
    }
}
