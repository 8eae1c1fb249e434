use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::{ListState, TableState},
};
use strum::IntoEnumIterator;

use crate::{
    app::{Portfolio, ui},
    services::RefreshRate,
};

pub struct App {
    portfolio: Portfolio,
    table_state: TableState,
    entries_state: TableState,
    rate_state: ListState,
    popup_message: Option<String>,
    error_popup: Option<String>,
    show_entries_popup: bool,
    show_rate_popup: bool,
    last_refresh: Option<Instant>,
}

impl App {
    pub fn new(portfolio: Portfolio) -> Self {
        let mut rate_state = ListState::default();
        rate_state.select(Some(0));
        Self {
            portfolio,
            table_state: TableState::default(),
            entries_state: TableState::default(),
            rate_state,
            popup_message: None,
            error_popup: None,
            show_entries_popup: false,
            show_rate_popup: false,
            last_refresh: None,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.portfolio,
                &mut self.table_state,
                &self.popup_message,
                &self.error_popup,
                self.show_entries_popup,
                &mut self.entries_state,
                self.show_rate_popup,
                &mut self.rate_state,
            )
        })?;

        Ok(())
    }

    /// Fetches prices and re-aggregates. Manual refreshes bypass the feed's
    /// staleness window and show a progress popup while in flight.
    async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>, force: bool) -> Result<()> {
        if force {
            self.show_popup("Updating prices...");
            self.draw(terminal)?;
        }

        let load_result = self.portfolio.load().await;
        let price_result = self.portfolio.update_prices(force).await;
        self.portfolio.update_fear_greed().await;
        self.last_refresh = Some(Instant::now());

        self.clear_popup();
        self.draw(terminal)?;

        if let Err(e) = load_result {
            self.show_error_popup(&format!("Error loading entries: {:?}", e));
        } else if let Err(e) = price_result {
            self.show_error_popup(&format!("Error updating prices: {:?}", e));
        }

        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            let needs_refresh = self.last_refresh.is_none_or(|at| {
                at.elapsed() >= self.portfolio.refresh_rate().interval()
            });
            if needs_refresh {
                self.refresh(terminal, false).await?;
            }

            self.draw(terminal)?;

            if !event::poll(Duration::from_millis(200))? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if self.error_popup.is_some() {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.clear_error_popup();
                }
                continue;
            }

            if self.show_rate_popup {
                self.handle_rate_popup_key(key.code)?;
                continue;
            }

            if self.show_entries_popup {
                self.handle_entries_popup_key(key.code).await?;
                continue;
            }

            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') | KeyCode::F(5) => {
                    self.refresh(terminal, true).await?;
                }
                KeyCode::F(8) => {
                    let current = RefreshRate::iter()
                        .position(|rate| &rate == self.portfolio.refresh_rate())
                        .unwrap_or(0);
                    self.rate_state.select(Some(current));
                    self.show_rate_popup = true;
                }
                KeyCode::Enter => {
                    if self.table_state.selected().is_some() {
                        self.entries_state.select(Some(0));
                        self.show_entries_popup = true;
                    }
                }
                KeyCode::Esc => {
                    self.table_state.select(None);
                }
                KeyCode::Down => {
                    let holdings = self.portfolio.summary().holdings();
                    if !holdings.is_empty() {
                        let i = match self.table_state.selected() {
                            Some(i) => {
                                if i >= holdings.len() - 1 {
                                    0
                                } else {
                                    i + 1
                                }
                            }
                            None => 0,
                        };
                        self.table_state.select(Some(i));
                    }
                }
                KeyCode::Up => {
                    let holdings = self.portfolio.summary().holdings();
                    if !holdings.is_empty() {
                        let i = match self.table_state.selected() {
                            Some(i) => {
                                if i == 0 {
                                    holdings.len() - 1
                                } else {
                                    i - 1
                                }
                            }
                            None => 0,
                        };
                        self.table_state.select(Some(i));
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_rate_popup_key(&mut self, code: KeyCode) -> Result<()> {
        let count = RefreshRate::iter().len();

        match code {
            KeyCode::Esc => self.show_rate_popup = false,
            KeyCode::Down => {
                let i = match self.rate_state.selected() {
                    Some(i) => {
                        if i >= count - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.rate_state.select(Some(i));
            }
            KeyCode::Up => {
                let i = match self.rate_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            count - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.rate_state.select(Some(i));
            }
            KeyCode::Enter => {
                if let Some(i) = self.rate_state.selected() {
                    let rate = RefreshRate::iter()
                        .nth(i)
                        .with_context(|| "Cannot select refresh rate")?;
                    self.portfolio.set_refresh_rate(rate);
                    self.show_rate_popup = false;
                }
            }
            _ => {}
        }

        Ok(())
    }

    async fn handle_entries_popup_key(&mut self, code: KeyCode) -> Result<()> {
        let entry_count = self
            .table_state
            .selected()
            .and_then(|i| self.portfolio.summary().holdings().get(i))
            .map(|holding| holding.entries().len())
            .unwrap_or(0);

        if entry_count == 0 {
            self.show_entries_popup = false;
            return Ok(());
        }

        match code {
            KeyCode::Esc => {
                self.show_entries_popup = false;
                self.entries_state.select(None);
            }
            KeyCode::Down => {
                let i = match self.entries_state.selected() {
                    Some(i) => {
                        if i >= entry_count - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.entries_state.select(Some(i));
            }
            KeyCode::Up => {
                let i = match self.entries_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            entry_count - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.entries_state.select(Some(i));
            }
            KeyCode::Char('d') => {
                let entry_id = self
                    .table_state
                    .selected()
                    .and_then(|i| self.portfolio.summary().holdings().get(i))
                    .and_then(|holding| {
                        self.entries_state
                            .selected()
                            .and_then(|i| holding.entries().get(i))
                    })
                    .map(|entry| *entry.id());

                if let Some(id) = entry_id {
                    match self.portfolio.delete_entry(id).await {
                        Ok(true) => {
                            // Holding order can shift after re-aggregation,
                            // so drop the selection along with the popup.
                            self.show_entries_popup = false;
                            self.entries_state.select(None);
                            self.table_state.select(None);
                        }
                        Ok(false) => {
                            self.show_error_popup(&format!("No entry with id {}", id));
                        }
                        Err(e) => {
                            self.show_error_popup(&format!("Error deleting entry: {:?}", e));
                        }
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}
