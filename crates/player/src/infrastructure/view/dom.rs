//! DOM view for the browser client
//!
//! Every element the page contract names is looked up once, at init, into
//! [`UiElements`]. Visibility is the presence of the `hidden` class.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use tictac_domain::{Cell, CellIndex, GameName, ScorePanel, ViewRegion, BOARD_SIZE};

use crate::ports::outbound::{ViewError, ViewPort};

use super::{element_id, HIDDEN_CLASS};

/// Id of the board root; without it the page has no game
pub const ROOT_ID: &str = "game";

/// Handles to every element the game page is made of
#[derive(Debug, Clone)]
pub struct UiElements {
    pub root: Element,
    pub waiting: Element,
    pub new_game: Element,
    pub full_game: Element,
    pub stats: Element,
    pub x_turn: Element,
    pub o_turn: Element,
    pub x_name: Element,
    pub o_name: Element,
    pub x_score: Element,
    pub ties_score: Element,
    pub o_score: Element,
    pub cells: [Element; BOARD_SIZE],
}

impl UiElements {
    /// Look every element up.
    ///
    /// `Ok(None)` when the page has no `#game`: this is not a game page.
    /// Any other missing element is an error.
    pub fn locate(document: &Document) -> Result<Option<Self>, ViewError> {
        let Some(root) = document.get_element_by_id(ROOT_ID) else {
            return Ok(None);
        };
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| ViewError::MissingElement(id.to_string()))
        };

        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for index in CellIndex::all() {
            cells.push(find(&format!("index_{}", index))?);
        }
        let cells: [Element; BOARD_SIZE] = cells
            .try_into()
            .map_err(|_| ViewError::Surface("board cell count".to_string()))?;

        Ok(Some(Self {
            waiting: find(element_id(ViewRegion::Waiting))?,
            new_game: find(element_id(ViewRegion::NewGameButton))?,
            full_game: find(element_id(ViewRegion::FullGameNotice))?,
            stats: find(element_id(ViewRegion::StatsPanel))?,
            x_turn: find(element_id(ViewRegion::XTurnBadge))?,
            o_turn: find(element_id(ViewRegion::OTurnBadge))?,
            x_name: find("x_name")?,
            o_name: find("o_name")?,
            x_score: find("x_score")?,
            ties_score: find("ties_score")?,
            o_score: find("o_score")?,
            root,
            cells,
        }))
    }

    /// Game name from the root's `data-name`
    pub fn game_name(&self) -> Result<GameName, ViewError> {
        let name = self
            .root
            .get_attribute("data-name")
            .ok_or_else(|| ViewError::MissingElement(format!("{}[data-name]", ROOT_ID)))?;
        GameName::new(name).map_err(|e| ViewError::Surface(e.to_string()))
    }

    pub fn region(&self, region: ViewRegion) -> &Element {
        match region {
            ViewRegion::Waiting => &self.waiting,
            ViewRegion::NewGameButton => &self.new_game,
            ViewRegion::ActiveGame => &self.root,
            ViewRegion::FullGameNotice => &self.full_game,
            ViewRegion::StatsPanel => &self.stats,
            ViewRegion::XTurnBadge => &self.x_turn,
            ViewRegion::OTurnBadge => &self.o_turn,
        }
    }
}

fn surface_error(e: JsValue) -> ViewError {
    ViewError::Surface(format!("{:?}", e))
}

/// [`ViewPort`] over the host page
pub struct DomView {
    elements: UiElements,
}

impl DomView {
    pub fn new(elements: UiElements) -> Self {
        Self { elements }
    }
}

impl ViewPort for DomView {
    fn set_region_visible(&mut self, region: ViewRegion, visible: bool) -> Result<(), ViewError> {
        let classes = self.elements.region(region).class_list();
        if visible {
            classes.remove_1(HIDDEN_CLASS).map_err(surface_error)
        } else {
            classes.add_1(HIDDEN_CLASS).map_err(surface_error)
        }
    }

    fn write_cell(&mut self, index: CellIndex, cell: Cell) -> Result<(), ViewError> {
        self.elements.cells[index.as_usize()].set_text_content(Some(cell.as_str()));
        Ok(())
    }

    fn write_score(&mut self, score: &ScorePanel) -> Result<(), ViewError> {
        let elements = &self.elements;
        elements.x_name.set_text_content(Some(&score.x_name));
        elements.o_name.set_text_content(Some(&score.o_name));
        elements
            .x_score
            .set_text_content(Some(&score.x_wins().to_string()));
        elements
            .ties_score
            .set_text_content(Some(&score.ties().to_string()));
        elements
            .o_score
            .set_text_content(Some(&score.o_wins().to_string()));
        Ok(())
    }
}
