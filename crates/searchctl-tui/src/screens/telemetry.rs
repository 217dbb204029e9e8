//! Crawler and indexer fleet tables, one screen per node kind.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use searchctl_core::view::{self, NodeRow};
use searchctl_core::{NodeKind, TableSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct TelemetryScreen {
    kind: NodeKind,
    focused: bool,
    snapshot: TableSnapshot,
    table: TableState,
}

impl TelemetryScreen {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            focused: false,
            snapshot: TableSnapshot::default(),
            table: TableState::default(),
        }
    }

    fn len(&self) -> usize {
        self.snapshot.rows.len()
    }

    fn select(&mut self, idx: usize) {
        let len = self.len();
        if len == 0 {
            self.table.select(None);
        } else {
            self.table.select(Some(idx.min(len - 1)));
        }
    }

    fn move_selection(&mut self, down: bool) {
        let current = self.table.selected().unwrap_or(0);
        let next = if down {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };
        self.select(next);
    }

    fn title(&self) -> String {
        let label = match self.kind {
            NodeKind::Crawler => "Crawlers",
            NodeKind::Indexer => "Indexers",
        };
        let alive = self.snapshot.rows.iter().filter(|r| !r.is_dead()).count();
        format!(" {label} ({alive}/{} alive) ", self.len())
    }

    fn updated_label(&self) -> String {
        self.snapshot.fetched_at.map_or_else(
            || " waiting for first poll… ".to_owned(),
            |at| {
                format!(
                    " updated {} ",
                    at.with_timezone(&chrono::Local).format("%H:%M:%S")
                )
            },
        )
    }

    fn widths(&self) -> Vec<Constraint> {
        view::columns(self.kind)
            .iter()
            .enumerate()
            .map(|(i, _)| match i {
                0 => Constraint::Min(21),
                1 => Constraint::Length(7),
                _ => Constraint::Fill(1),
            })
            .collect()
    }
}

fn row_for(row: &NodeRow) -> Row<'static> {
    let style = if row.is_dead() {
        theme::dead_row()
    } else {
        theme::table_row()
    };
    Row::new(row.cells().into_iter().map(Cell::from)).style(style)
}

impl Component for TelemetryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Char('g') | KeyCode::Home => self.select(0),
            KeyCode::Char('G') | KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::TelemetryUpdated(kind, snapshot) = action {
            if *kind == self.kind {
                self.snapshot = snapshot.clone();
                self.select(self.table.selected().unwrap_or(0));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.title())
            .title_style(theme::title_style())
            .title_bottom(Line::from(self.updated_label()).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        if self.snapshot.rows.is_empty() {
            let text = if self.snapshot.is_loaded() {
                "No nodes reported"
            } else {
                "Loading…"
            };
            frame.render_widget(
                Paragraph::new(text)
                    .style(theme::key_hint())
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        }

        let header = Row::new(
            view::columns(self.kind)
                .into_iter()
                .map(|c| Cell::from(c).style(theme::table_header())),
        );
        let rows: Vec<Row> = self.snapshot.rows.iter().map(row_for).collect();

        let table = Table::new(rows, self.widths())
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        &[("j/k", "move"), ("g/G", "top/bottom")]
    }
}
