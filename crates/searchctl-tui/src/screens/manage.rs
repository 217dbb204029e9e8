//! Domains and Keywords tabs: an admin form above one managed list.
//!
//! The form pane owns typed text; the list pane takes single-letter
//! commands. `Esc` moves focus from the form to the list, `i` moves it back.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::{Input, InputRequest};

use searchctl_core::{ListKind, ListRow, ListTable, TextField, Trigger};

use crate::action::{Action, ListTicket};
use crate::component::Component;
use crate::theme;

// ── Text input ──────────────────────────────────────────────────────

/// Single-line editor behind an admin form.
#[derive(Debug, Default)]
pub struct FormInput(Input);

impl FormInput {
    /// Apply an editing key. Returns `false` for keys that are not edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let request = match key.code {
            KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
            KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                InputRequest::InsertChar(c)
            }
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return false,
        };
        let _ = self.0.handle(request);
        true
    }

    pub fn value(&self) -> &str {
        self.0.value()
    }
}

impl TextField for FormInput {
    fn text(&self) -> &str {
        self.0.value()
    }

    fn clear(&mut self) {
        self.0.reset();
    }
}

// ── Screen ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Form,
    List,
}

pub struct ManageScreen {
    kind: ListKind,
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    input: FormInput,
    pane: Pane,
    list: Option<ListTable>,
    table: TableState,
    /// A form submission is in flight.
    submitting: bool,
    /// A delete is in flight.
    deleting: bool,
    /// Row awaiting a y/n answer before it is deleted.
    confirm: Option<ListRow>,
    loaded_once: bool,
    /// Last ticket handed out for a list request.
    issued: u64,
    /// Ticket of the request whose table is on screen.
    shown: u64,
}

impl ManageScreen {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            focused: false,
            action_tx: None,
            input: FormInput::default(),
            pane: Pane::Form,
            list: None,
            table: TableState::default(),
            submitting: false,
            deleting: false,
            confirm: None,
            loaded_once: false,
            issued: 0,
            shown: 0,
        }
    }

    /// Form action bound to Enter.
    fn primary_trigger(&self) -> Trigger {
        match self.kind {
            ListKind::DomainBlacklist => Trigger::IncludeDomain,
            ListKind::IllegalKeywords => Trigger::AddKeyword,
        }
    }

    /// Form actions this screen can submit.
    fn owns(&self, trigger: Trigger) -> bool {
        match self.kind {
            ListKind::DomainBlacklist => {
                matches!(trigger, Trigger::IncludeDomain | Trigger::BlacklistDomain)
            }
            ListKind::IllegalKeywords => trigger == Trigger::AddKeyword,
        }
    }

    /// Whether a successful `trigger` changes the list shown here.
    fn changes_list(trigger: Trigger) -> bool {
        matches!(trigger, Trigger::BlacklistDomain | Trigger::AddKeyword)
    }

    fn submit(&mut self, trigger: Trigger) -> Option<Action> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(Action::Submit(trigger, self.input.value().to_owned()))
    }

    fn ticket(&mut self) -> ListTicket {
        self.issued += 1;
        ListTicket {
            kind: self.kind,
            seq: self.issued,
        }
    }

    /// Show `table` unless a later request's table is already on screen.
    fn accept_list(&mut self, ticket: ListTicket, table: &ListTable) {
        if ticket.seq <= self.shown {
            tracing::debug!(
                kind = ?self.kind,
                seq = ticket.seq,
                shown = self.shown,
                "discarding stale list"
            );
            return;
        }
        self.shown = ticket.seq;
        self.replace_list(table.clone());
    }

    fn len(&self) -> usize {
        self.list.as_ref().map_or(0, ListTable::len)
    }

    fn select(&mut self, idx: usize) {
        let len = self.len();
        if len == 0 {
            self.table.select(None);
        } else {
            self.table.select(Some(idx.min(len - 1)));
        }
    }

    fn selected_row(&self) -> Option<&ListRow> {
        let idx = self.table.selected()?;
        self.list.as_ref()?.rows.get(idx)
    }

    fn replace_list(&mut self, table: ListTable) {
        self.list = Some(table);
        self.select(self.table.selected().unwrap_or(0));
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.submit(self.primary_trigger()),
            KeyCode::Char('b') if ctrl && self.kind == ListKind::DomainBlacklist => {
                self.submit(Trigger::BlacklistDomain)
            }
            KeyCode::Esc | KeyCode::Down => {
                self.pane = Pane::List;
                None
            }
            // The pending submission owns the text until its result lands.
            _ if self.submitting => None,
            _ => {
                self.input.handle_key(key);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select(self.table.selected().map_or(0, |i| i.saturating_add(1)));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.table.selected() == Some(0) {
                    self.pane = Pane::Form;
                } else {
                    self.select(self.table.selected().unwrap_or(0).saturating_sub(1));
                }
            }
            KeyCode::Char('g') | KeyCode::Home => self.select(0),
            KeyCode::Char('G') | KeyCode::End => self.select(usize::MAX),
            KeyCode::Char('i' | '/') => self.pane = Pane::Form,
            KeyCode::Char('r') => return Some(Action::RefreshList(self.ticket())),
            KeyCode::Char('d') | KeyCode::Delete if !self.deleting => {
                self.confirm = self.selected_row().cloned();
            }
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                let row = self.confirm.take()?;
                self.deleting = true;
                Some(Action::DeleteEntry(self.ticket(), row))
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.confirm = None;
                None
            }
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn pane_border(&self, pane: Pane) -> Style {
        if self.focused && self.pane == pane && self.confirm.is_none() {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let title = match self.kind {
            ListKind::DomainBlacklist => " Domains ",
            ListKind::IllegalKeywords => " Illegal keyword ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.pane_border(Pane::Form));
        let inner = block.inner(area);

        let width = usize::from(inner.width.max(1) - 1);
        let scroll = self.input.0.visual_scroll(width);
        let text = if self.submitting {
            Span::styled("submitting…", theme::key_hint())
        } else {
            Span::styled(self.input.value(), theme::table_row())
        };
        let scroll_x = u16::try_from(scroll).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(Line::from(text))
                .scroll((0, scroll_x))
                .block(block),
            area,
        );

        if self.focused && self.pane == Pane::Form && self.confirm.is_none() && !self.submitting {
            let offset = self.input.0.visual_cursor().saturating_sub(scroll);
            let x = inner
                .x
                .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.list {
            Some(list) => format!(" {} ({}) ", self.kind.label(), list.len()),
            None => format!(" {} ", self.kind.label()),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.pane_border(Pane::List));

        let Some(list) = self.list.as_ref().filter(|l| !l.is_empty()) else {
            let text = if self.list.is_some() {
                "No entries"
            } else {
                "Press r to load"
            };
            frame.render_widget(
                Paragraph::new(text)
                    .style(theme::key_hint())
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        };

        let header = Row::new([
            Cell::from("#").style(theme::table_header()),
            Cell::from(self.kind.entry_label()).style(theme::table_header()),
        ]);
        let rows: Vec<Row> = list
            .rows
            .iter()
            .map(|row| {
                Row::new([
                    Cell::from((row.key + 1).to_string()),
                    Cell::from(row.value.as_str()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(5), Constraint::Fill(1)])
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, row: &ListRow) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 5u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let dialog = Rect::new(x, y, width, height);

        frame.render_widget(Clear, dialog);
        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::YELLOW))
            .style(Style::default().bg(theme::BG_DARK));

        let text = vec![
            Line::from(format!(
                " Remove {} '{}'?",
                self.kind.entry_label().to_lowercase(),
                row.value
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("delete    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text).block(block), dialog);
    }
}

impl Component for ManageScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = if self.confirm.is_some() {
            self.handle_confirm_key(key)
        } else {
            match self.pane {
                Pane::Form => self.handle_form_key(key),
                Pane::List => self.handle_list_key(key),
            }
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Submitted(trigger, feedback) if self.owns(*trigger) => {
                self.submitting = false;
                feedback.apply_to(&mut self.input);
                if feedback.is_success() && Self::changes_list(*trigger) {
                    return Ok(Some(Action::RefreshList(self.ticket())));
                }
            }
            Action::ListLoaded(ticket, result) if ticket.kind == self.kind => {
                self.loaded_once = true;
                if let Ok(table) = result {
                    self.accept_list(*ticket, table);
                }
            }
            Action::EntryDeleted(ticket, outcome) if ticket.kind == self.kind => {
                self.deleting = false;
                match &outcome.refreshed {
                    Some(Ok(table)) => self.accept_list(*ticket, table),
                    Some(Err(_)) => {
                        tracing::warn!(kind = ?self.kind, "list refresh after delete failed; showing stale list");
                    }
                    None => {}
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [form_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_form(frame, form_area);
        self.render_list(frame, list_area);
        if let Some(row) = &self.confirm {
            self.render_confirm(frame, area, row);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && !self.loaded_once && self.action_tx.is_some() {
            let ticket = self.ticket();
            if let Some(tx) = &self.action_tx {
                let _ = tx.send(Action::RefreshList(ticket));
            }
        }
    }

    fn captures_text(&self) -> bool {
        self.confirm.is_some() || self.pane == Pane::Form
    }

    fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        match (self.pane, self.kind) {
            (Pane::Form, ListKind::DomainBlacklist) => &[
                ("Enter", "include"),
                ("Ctrl+B", "blacklist"),
                ("Esc", "list"),
            ],
            (Pane::Form, ListKind::IllegalKeywords) => &[("Enter", "add"), ("Esc", "list")],
            (Pane::List, _) => &[
                ("j/k", "move"),
                ("r", "refresh"),
                ("d", "delete"),
                ("i", "edit"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use searchctl_core::{DeleteOutcome, Feedback};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(screen: &mut ManageScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn list(kind: ListKind, entries: &[&str]) -> ListTable {
        ListTable::from_entries(kind, entries.iter().map(ToString::to_string).collect())
    }

    fn ticket(kind: ListKind, seq: u64) -> ListTicket {
        ListTicket { kind, seq }
    }

    fn loaded(kind: ListKind, seq: u64, entries: &[&str]) -> Action {
        Action::ListLoaded(ticket(kind, seq), Ok(list(kind, entries)))
    }

    #[test]
    fn form_input_edits_and_clears() {
        let mut input = FormInput::default();
        for c in "exampel".chars() {
            assert!(input.handle_key(key(KeyCode::Char(c))));
        }
        input.handle_key(key(KeyCode::Backspace));
        input.handle_key(key(KeyCode::Backspace));
        input.handle_key(key(KeyCode::Char('l')));
        input.handle_key(key(KeyCode::Char('e')));
        assert_eq!(input.text(), "example");
        assert!(!input.handle_key(key(KeyCode::Enter)));

        input.handle_key(ctrl('u'));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn enter_submits_current_text_once() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        type_text(&mut screen, "a.com|b.org");

        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            action,
            Some(Action::Submit(Trigger::IncludeDomain, ref text)) if text == "a.com|b.org"
        ));
        assert!(screen.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());
    }

    #[test]
    fn empty_input_is_still_submitted() {
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(
            action,
            Some(Action::Submit(Trigger::AddKeyword, ref text)) if text.is_empty()
        ));
    }

    #[test]
    fn ctrl_b_blacklists_only_on_domains() {
        let mut domains = ManageScreen::new(ListKind::DomainBlacklist);
        type_text(&mut domains, "spam.com");
        assert!(matches!(
            domains.handle_key_event(ctrl('b')).unwrap(),
            Some(Action::Submit(Trigger::BlacklistDomain, _))
        ));

        let mut keywords = ManageScreen::new(ListKind::IllegalKeywords);
        assert!(keywords.handle_key_event(ctrl('b')).unwrap().is_none());
    }

    #[test]
    fn success_clears_input_and_refreshes_list() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        type_text(&mut screen, "spam.com");
        screen.handle_key_event(ctrl('b')).unwrap();

        let follow_up = screen
            .update(&Action::Submitted(
                Trigger::BlacklistDomain,
                Feedback::success(Trigger::BlacklistDomain.success_message()),
            ))
            .unwrap();
        assert_eq!(screen.input.text(), "");
        assert!(matches!(
            follow_up,
            Some(Action::RefreshList(ListTicket {
                kind: ListKind::DomainBlacklist,
                ..
            }))
        ));
    }

    #[test]
    fn failure_keeps_input() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        type_text(&mut screen, "a.com");
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();

        let follow_up = screen
            .update(&Action::Submitted(
                Trigger::IncludeDomain,
                Feedback::failure(Trigger::IncludeDomain.failure_message()),
            ))
            .unwrap();
        assert_eq!(screen.input.text(), "a.com");
        assert!(follow_up.is_none());
        assert!(!screen.submitting);
    }

    #[test]
    fn other_screens_results_are_ignored() {
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        type_text(&mut screen, "casino");
        screen
            .update(&Action::Submitted(
                Trigger::IncludeDomain,
                Feedback::success(Trigger::IncludeDomain.success_message()),
            ))
            .unwrap();
        assert_eq!(screen.input.text(), "casino");
    }

    #[test]
    fn delete_sends_the_selected_rows_value_after_confirm() {
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        screen
            .update(&loaded(ListKind::IllegalKeywords, 1, &["casino", "poker"]))
            .unwrap();
        screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();

        assert!(screen.handle_key_event(key(KeyCode::Char('d'))).unwrap().is_none());
        assert!(screen.captures_text());

        let action = screen.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        let Some(Action::DeleteEntry(ticket, row)) = action else {
            panic!("expected a delete, got {action:?}");
        };
        assert_eq!(ticket.kind, ListKind::IllegalKeywords);
        assert_eq!(row, ListRow { key: 1, value: "poker".into() });
    }

    #[test]
    fn declining_confirm_sends_nothing() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        screen
            .update(&loaded(ListKind::DomainBlacklist, 1, &["spam.com"]))
            .unwrap();
        screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        screen.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        assert!(screen.handle_key_event(key(KeyCode::Char('n'))).unwrap().is_none());
        assert!(screen.confirm.is_none());
    }

    #[test]
    fn refreshed_list_replaces_after_delete() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        screen
            .update(&loaded(ListKind::DomainBlacklist, 1, &["a.com", "b.com"]))
            .unwrap();
        screen
            .update(&Action::EntryDeleted(
                ticket(ListKind::DomainBlacklist, 2),
                DeleteOutcome {
                    feedback: Feedback::success("Operation succeeded"),
                    refreshed: Some(Ok(list(ListKind::DomainBlacklist, &["b.com"]))),
                },
            ))
            .unwrap();
        assert_eq!(screen.len(), 1);
        assert_eq!(screen.selected_row().unwrap().value, "b.com");
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        screen
            .update(&loaded(ListKind::DomainBlacklist, 1, &["a.com"]))
            .unwrap();
        screen
            .update(&Action::ListLoaded(
                ticket(ListKind::DomainBlacklist, 2),
                Err(Feedback::failure("Operation failed")),
            ))
            .unwrap();
        assert_eq!(screen.len(), 1);
    }

    #[test]
    fn first_focus_requests_the_list() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        screen.init(tx).unwrap();
        screen.set_focused(true);
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::RefreshList(ListTicket {
                kind: ListKind::IllegalKeywords,
                seq: 1
            }))
        ));
    }

    #[test]
    fn older_list_result_does_not_overwrite_newer_one() {
        let mut screen = ManageScreen::new(ListKind::DomainBlacklist);
        screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        let Some(Action::RefreshList(first)) =
            screen.handle_key_event(key(KeyCode::Char('r'))).unwrap()
        else {
            panic!("expected a refresh");
        };
        let Some(Action::RefreshList(second)) =
            screen.handle_key_event(key(KeyCode::Char('r'))).unwrap()
        else {
            panic!("expected a refresh");
        };
        assert!(second.seq > first.seq);

        screen
            .update(&Action::ListLoaded(second, Ok(list(ListKind::DomainBlacklist, &["b.com"]))))
            .unwrap();
        screen
            .update(&Action::ListLoaded(
                first,
                Ok(list(ListKind::DomainBlacklist, &["a.com", "b.com"])),
            ))
            .unwrap();

        assert_eq!(screen.len(), 1);
        assert_eq!(screen.selected_row().unwrap().value, "b.com");
    }

    #[test]
    fn slow_refresh_does_not_restore_a_deleted_row() {
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        let Some(Action::RefreshList(initial)) =
            screen.handle_key_event(key(KeyCode::Char('r'))).unwrap()
        else {
            panic!("expected a refresh");
        };
        screen
            .update(&Action::ListLoaded(
                initial,
                Ok(list(ListKind::IllegalKeywords, &["casino", "poker"])),
            ))
            .unwrap();
        screen.handle_key_event(key(KeyCode::Char('g'))).unwrap();

        let Some(Action::RefreshList(slow)) =
            screen.handle_key_event(key(KeyCode::Char('r'))).unwrap()
        else {
            panic!("expected a refresh");
        };
        screen.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        let Some(Action::DeleteEntry(delete, _)) =
            screen.handle_key_event(key(KeyCode::Char('y'))).unwrap()
        else {
            panic!("expected a delete");
        };

        screen
            .update(&Action::EntryDeleted(
                delete,
                DeleteOutcome {
                    feedback: Feedback::success("Operation succeeded"),
                    refreshed: Some(Ok(list(ListKind::IllegalKeywords, &["poker"]))),
                },
            ))
            .unwrap();
        screen
            .update(&Action::ListLoaded(
                slow,
                Ok(list(ListKind::IllegalKeywords, &["casino", "poker"])),
            ))
            .unwrap();

        assert_eq!(screen.len(), 1);
        assert_eq!(screen.selected_row().unwrap().value, "poker");
    }

    #[test]
    fn typing_is_ignored_while_submitting() {
        let mut screen = ManageScreen::new(ListKind::IllegalKeywords);
        type_text(&mut screen, "casino");
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        type_text(&mut screen, "poker");
        assert_eq!(screen.input.text(), "casino");

        screen
            .update(&Action::Submitted(
                Trigger::AddKeyword,
                Feedback::success(Trigger::AddKeyword.success_message()),
            ))
            .unwrap();
        type_text(&mut screen, "dice");
        assert_eq!(screen.input.text(), "dice");
    }
}
