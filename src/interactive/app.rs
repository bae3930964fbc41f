//! Dashboard state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::activity::{ActivityWidget, ChartDimensions, DayLabeler};
use crate::api::ApiClient;
use crate::models::{Event, Skill};
use crate::skills::SkillStats;
use crate::timeline;
use crate::utils;

use super::messages::{Message, MessageType};

/// Number of messages kept for the messages pane
const MESSAGE_HISTORY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the dashboard
    Normal,
    /// Waiting for 'y' to delete the selected event
    DeleteEvent,
    /// Help screen
    Help,
}

pub struct App {
    pub client: ApiClient,
    pub events: Vec<Event>,
    pub skills: Vec<Skill>,
    pub stats: SkillStats,
    /// Memoized 7-day activity summary, refreshed every loop iteration
    pub activity: ActivityWidget,
    /// Index into [`App::timeline_events`]
    pub selected_event: Option<usize>,
    pub mode: AppMode,
    pub messages: Vec<Message>,
}

impl App {
    /// Build the dashboard around an existing backend client and load data
    pub async fn new(client: ApiClient, labeler: DayLabeler, dimensions: ChartDimensions) -> Self {
        let mut app = App {
            client,
            events: Vec::new(),
            skills: Vec::new(),
            stats: SkillStats::from_skills(&[]),
            activity: ActivityWidget::new(labeler, dimensions),
            selected_event: None,
            mode: AppMode::Normal,
            messages: Vec::new(),
        };

        app.load_data().await;
        app.tick();
        app
    }

    /// Re-fetch events and skills; failures are reported, not fatal
    pub async fn load_data(&mut self) {
        match self.client.list_events(None).await {
            Ok(events) => self.events = events,
            Err(e) => {
                tracing::error!(error = %e, "failed to load events");
                self.push_message(MessageType::Error, format!("Failed to load events: {}", e));
            }
        }

        match self.client.list_skills().await {
            Ok(skills) => {
                self.stats = SkillStats::from_skills(&skills);
                self.skills = skills;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load skills");
                self.push_message(MessageType::Error, format!("Failed to load skills: {}", e));
            }
        }

        self.clamp_selection();
        self.push_message(
            MessageType::Info,
            format!(
                "Loaded {} events and {} skills from {}",
                self.events.len(),
                self.skills.len(),
                self.client.base_url()
            ),
        );
    }

    /// Per-iteration housekeeping before drawing
    pub fn tick(&mut self) {
        self.activity.summarize(&self.events, utils::today());
        self.messages.retain(|m| !m.is_expired());
    }

    /// Events in timeline order: newest date first, undated last
    pub fn timeline_events(&self) -> Vec<&Event> {
        timeline::recent(&self.events, usize::MAX)
    }

    pub fn selected(&self) -> Option<&Event> {
        let idx = self.selected_event?;
        self.timeline_events().get(idx).copied()
    }

    pub fn push_message(&mut self, message_type: MessageType, text: impl Into<String>) {
        self.messages.push(Message::new(message_type, text));
        if self.messages.len() > MESSAGE_HISTORY {
            let excess = self.messages.len() - MESSAGE_HISTORY;
            self.messages.drain(..excess);
        }
    }

    /// Handle a key press; returns false when the app should exit
    pub async fn handle_event(&mut self, event: KeyEvent) -> Result<bool> {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(false);
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_mode(event).await,
            AppMode::DeleteEvent => self.handle_delete_mode(event).await,
            AppMode::Help => {
                self.mode = AppMode::Normal;
                Ok(true)
            }
        }
    }

    async fn handle_normal_mode(&mut self, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(false);
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.messages.clear();
                self.activity.invalidate();
                self.load_data().await;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => {
                if !self.events.is_empty() {
                    self.selected_event = Some(0);
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(selected) = self.selected() {
                    let prompt = format!(
                        "Delete \"{}\" ({})? Press 'y' to confirm, any other key to cancel",
                        selected.title,
                        selected.date.as_deref().unwrap_or(timeline::UNDATED)
                    );
                    self.mode = AppMode::DeleteEvent;
                    self.push_message(MessageType::Warning, prompt);
                } else {
                    self.push_message(MessageType::Info, "Select an event to delete first");
                }
            }
            _ => {}
        }
        Ok(true)
    }

    async fn handle_delete_mode(&mut self, event: KeyEvent) -> Result<bool> {
        self.mode = AppMode::Normal;
        self.messages.retain(|m| m.message_type != MessageType::Warning);

        if !matches!(event.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.push_message(MessageType::Info, "Delete cancelled");
            return Ok(true);
        }

        let Some(id) = self.selected().map(|e| e.id.clone()) else {
            return Ok(true);
        };

        match self.client.delete_event(&id).await {
            Ok(()) => {
                self.events.retain(|e| e.id != id);
                self.clamp_selection();
                self.push_message(MessageType::Success, "Event deleted");
            }
            Err(e) => {
                tracing::error!(error = %e, id = %id, "failed to delete event");
                self.push_message(MessageType::Error, format!("Delete failed: {}", e));
            }
        }
        Ok(true)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.events.len();
        if len == 0 {
            self.selected_event = None;
            return;
        }

        let next = match self.selected_event {
            None => 0,
            Some(idx) => idx.saturating_add_signed(delta).min(len - 1),
        };
        self.selected_event = Some(next);
    }

    fn clamp_selection(&mut self) {
        self.selected_event = match (self.selected_event, self.events.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => None,
        };
    }
}
