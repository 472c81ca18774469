//! Main UI application
//!
//! Holds cursor and input-field state and translates key events into
//! session operations. All derived data comes from the session on
//! every draw, so handlers never need to trigger redraws by hand.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::MatchFlags;
use crate::query::CategoryFilter;
use crate::session::{ItemRow, PriceView, Session};

/// Which view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Items,
    Price,
}

/// Whether keystrokes go to navigation or the filter field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    EditFilter,
}

/// Main UI application state
pub struct App {
    pub(crate) tab: Tab,
    pub(crate) input_mode: InputMode,
    /// Mirror of the session's text filter, edited in place
    pub(crate) filter_input: String,
    /// Mirror of the session's price-search input
    pub(crate) price_input: String,
    /// Selected row per tab (index into the flattened item rows)
    pub(crate) items_cursor: usize,
    pub(crate) price_cursor: usize,
    /// Index into [All, category 0, category 1, ...]
    pub(crate) category_index: usize,
    pub(crate) show_reset_modal: bool,
    pub(crate) show_detail: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Items,
            input_mode: InputMode::Browse,
            filter_input: String::new(),
            price_input: String::new(),
            items_cursor: 0,
            price_cursor: 0,
            category_index: 0,
            show_reset_modal: false,
            show_detail: false,
        }
    }

    /// Handle keyboard input, returns true if the app should quit
    pub fn handle_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.show_reset_modal {
            self.handle_reset_modal_input(key, session);
            return Ok(false);
        }

        if self.show_detail {
            self.show_detail = false;
            return Ok(false);
        }

        if self.input_mode == InputMode::EditFilter {
            self.handle_filter_input(key, session);
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab => self.switch_tab(),
            KeyCode::Char('r') => self.show_reset_modal = true,
            _ => match self.tab {
                Tab::Items => self.handle_items_input(key, session),
                Tab::Price => self.handle_price_input(key, session),
            },
        }

        Ok(false)
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Items => Tab::Price,
            Tab::Price => Tab::Items,
        };
    }

    fn handle_reset_modal_input(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                session.reset();
                log::info!("Identification state reset from UI");
                self.show_reset_modal = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => self.show_reset_modal = false,
            _ => {}
        }
    }

    fn handle_filter_input(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Browse,
            KeyCode::Backspace => {
                self.filter_input.pop();
                session.set_filter(self.filter_input.clone());
                self.items_cursor = 0;
            }
            KeyCode::Char(c) => {
                self.filter_input.push(c);
                session.set_filter(self.filter_input.clone());
                self.items_cursor = 0;
            }
            _ => {}
        }
    }

    fn handle_items_input(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Char('/') => self.input_mode = InputMode::EditFilter,
            KeyCode::Char('s') => session.set_sort(session.query().sort.next()),
            KeyCode::Char('c') => self.cycle_category(session),
            KeyCode::Char('d') => {
                if self.selected_name(session).is_some() {
                    self.show_detail = true;
                }
            }
            KeyCode::Esc => {
                if !self.filter_input.is_empty() {
                    self.filter_input.clear();
                    session.set_filter("");
                    self.items_cursor = 0;
                }
            }
            KeyCode::Up => self.items_cursor = self.items_cursor.saturating_sub(1),
            KeyCode::Down => {
                let count = visible_rows(self, session).len();
                if self.items_cursor + 1 < count {
                    self.items_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(session),
            _ => {}
        }
    }

    fn handle_price_input(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.price_input.push(c);
                self.submit_price_search(session);
            }
            KeyCode::Backspace => {
                self.price_input.pop();
                self.submit_price_search(session);
            }
            KeyCode::Esc => {
                self.price_input.clear();
                self.submit_price_search(session);
            }
            KeyCode::Char('b') => {
                let mut flags = session.query().price_flags;
                flags.buy = !flags.buy;
                self.submit_with_flags(session, flags);
            }
            KeyCode::Char('s') => {
                let mut flags = session.query().price_flags;
                flags.sell = !flags.sell;
                self.submit_with_flags(session, flags);
            }
            KeyCode::Char('d') => {
                if self.selected_name(session).is_some() {
                    self.show_detail = true;
                }
            }
            KeyCode::Up => self.price_cursor = self.price_cursor.saturating_sub(1),
            KeyCode::Down => {
                let count = visible_rows(self, session).len();
                if self.price_cursor + 1 < count {
                    self.price_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(session),
            _ => {}
        }
    }

    fn submit_price_search(&mut self, session: &mut Session) {
        let flags = session.query().price_flags;
        session.search_by_price(self.price_input.clone(), flags);
        self.price_cursor = 0;
    }

    fn submit_with_flags(&mut self, session: &mut Session, flags: MatchFlags) {
        session.search_by_price(self.price_input.clone(), flags);
        self.price_cursor = 0;
    }

    fn cycle_category(&mut self, session: &mut Session) {
        let order = session.catalog().category_order().to_vec();
        self.category_index = (self.category_index + 1) % (order.len() + 1);
        let filter = if self.category_index == 0 {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(order[self.category_index - 1].clone())
        };
        session.set_category_filter(filter);
        self.items_cursor = 0;
    }

    fn toggle_selected(&mut self, session: &mut Session) {
        if let Some(name) = self.selected_name(session) {
            session.toggle_identification(&name);
        }
    }

    /// Name of the item under the cursor in the active tab
    pub(crate) fn selected_name(&self, session: &Session) -> Option<String> {
        let rows = visible_rows(self, session);
        rows.get(self.cursor()).map(|row| row.item.name.clone())
    }

    pub(crate) fn cursor(&self) -> usize {
        match self.tab {
            Tab::Items => self.items_cursor,
            Tab::Price => self.price_cursor,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The flattened item rows the active tab currently shows
pub(crate) fn visible_rows<'a>(app: &App, session: &'a Session) -> Vec<ItemRow<'a>> {
    match app.tab {
        Tab::Items => session
            .catalog_view()
            .into_iter()
            .flat_map(|group| group.items)
            .collect(),
        Tab::Price => match session.price_view() {
            PriceView::Matches { groups, .. } => {
                groups.into_iter().flat_map(|group| group.items).collect()
            }
            _ => Vec::new(),
        },
    }
}
