//! Application core: event loop, tab management, action dispatch.
//!
//! Screens never call the backend themselves. They emit actions; the app
//! runs the matching [`AdminActions`] call on a task and feeds the result
//! back as another action.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use searchctl_core::{AdminActions, AdminClient, Feedback, Poller, ViewSelection};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::telemetry_bridge;
use crate::theme;
use crate::tui::Tui;

pub struct App {
    client: Arc<AdminClient>,
    actions: AdminActions,
    poll_interval: Duration,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Result of the last admin action; blocks input until dismissed.
    feedback: Option<Feedback>,
    /// Tells the poller which views are on screen.
    selection_tx: watch::Sender<ViewSelection>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: Arc<AdminClient>, poll_interval: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let active_screen = ScreenId::default();
        let (selection_tx, _) = watch::channel(active_screen.selection());

        Self {
            actions: AdminActions::new(Arc::clone(&client)),
            client,
            poll_interval,
            active_screen,
            screens: create_screens(),
            running: true,
            help_visible: false,
            feedback: None,
            selection_tx,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let poller = Poller::new(
            Arc::clone(&self.client),
            self.selection_tx.subscribe(),
            self.poll_interval,
        )
        .start();
        let cancel = CancellationToken::new();
        tokio::spawn(telemetry_bridge::run(
            poller.tables().clone(),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        cancel.cancel();
        poller.shutdown().await;
        info!("event loop ended");
        Ok(())
    }

    /// Map a key to an action. Modal layers go first, then global keys,
    /// then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.feedback.is_some() {
            return Ok(match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::DismissFeedback),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Tab => return Ok(Some(Action::NextScreen)),
            KeyCode::BackTab => return Ok(Some(Action::PrevScreen)),
            _ => {}
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };
        if screen.captures_text() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                Ok(Some(Action::ToggleHelp))
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c.to_digit(10).unwrap_or(0)).unwrap_or(0);
                Ok(ScreenId::from_number(n).map(Action::SwitchScreen))
            }
            _ => screen.handle_key_event(key),
        }
    }

    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!(from = %self.active_screen, to = %target, "switching screen");
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        self.selection_tx.send_replace(target.selection());
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Run an admin call off the event loop and post its result back.
    fn spawn_admin<F, Fut>(&self, call: F)
    where
        F: FnOnce(AdminActions) -> Fut,
        Fut: std::future::Future<Output = Action> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        let fut = call(self.actions.clone());
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchScreen(target) => self.switch_screen(*target),
            Action::NextScreen => self.switch_screen(self.active_screen.next()),
            Action::PrevScreen => self.switch_screen(self.active_screen.prev()),
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::DismissFeedback => self.feedback = None,
            Action::Render | Action::Tick => {}

            Action::Submit(trigger, text) => {
                let (trigger, text) = (*trigger, text.clone());
                self.spawn_admin(move |actions| async move {
                    Action::Submitted(trigger, actions.execute(trigger, &text).await)
                });
            }
            Action::RefreshList(ticket) => {
                let ticket = *ticket;
                self.spawn_admin(move |actions| async move {
                    Action::ListLoaded(ticket, actions.refresh_list(ticket.kind).await)
                });
            }
            Action::DeleteEntry(ticket, row) => {
                let (ticket, row) = (*ticket, row.clone());
                self.spawn_admin(move |actions| async move {
                    Action::EntryDeleted(ticket, actions.delete_entry(ticket.kind, &row).await)
                });
            }

            // Results go to every screen; each picks out its own.
            Action::Submitted(_, feedback) => {
                self.feedback = Some(*feedback);
                self.broadcast(action)?;
            }
            Action::ListLoaded(_, result) => {
                if let Err(feedback) = result {
                    self.feedback = Some(*feedback);
                }
                self.broadcast(action)?;
            }
            Action::EntryDeleted(_, outcome) => {
                self.feedback = Some(outcome.feedback);
                self.broadcast(action)?;
            }
            Action::TelemetryUpdated(..) => self.broadcast(action)?,
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [tab_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tab_bar(frame, tab_area);
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            render_help_overlay(frame, area);
        }
        if let Some(feedback) = &self.feedback {
            render_feedback(frame, area, feedback);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {id} "), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.client.base_url()),
            Style::default().fg(theme::GREEN),
        )];
        let hints = self
            .screens
            .get(&self.active_screen)
            .map_or(&[][..], |s| s.key_hints());
        for (key, label) in hints.iter().chain(&[("?", "help"), ("q", "quit")]) {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(*label, theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback) {
    let (color, icon) = if feedback.is_success() {
        (theme::GREEN, "✓")
    } else {
        (theme::RED, "✗")
    };
    let width = u16::try_from(feedback.message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(10)
        .max(30);
    let dialog = centered(area, width, 5);

    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let text = vec![
        Line::from(Span::styled(
            format!(" {icon} {}", feedback.message),
            Style::default().fg(color),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled("dismiss", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).block(block), dialog);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    const ROWS: [(&str, &str); 12] = [
        ("1-4", "Jump to tab"),
        ("Tab", "Next tab"),
        ("j/k ↑/↓", "Move selection"),
        ("g/G", "Top / bottom"),
        ("Enter", "Include domains / add keyword"),
        ("Ctrl+B", "Blacklist domain (Domains tab)"),
        ("Esc", "Form → list"),
        ("i", "List → form"),
        ("r", "Refresh list"),
        ("d", "Delete selected entry"),
        ("?", "This help"),
        ("q", "Quit"),
    ];

    let dialog = centered(area, 52, 16);
    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));

    let mut lines = vec![Line::from("")];
    lines.extend(ROWS.iter().map(|(key, label)| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(*label, theme::key_hint()),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}
