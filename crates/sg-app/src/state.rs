use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use tokio::sync::mpsc::UnboundedSender;

use sg_core::VideoModel;

use crate::config::Config;
use crate::events::SessionEvent;
use crate::generator::client::SoraClient;
use crate::generator::store::DiskStore;
use crate::generator::{self, Generator, GeneratorHandle, PollPolicy};
use crate::job::{SessionPhase, SessionSnapshot};

const QUIT_CONFIRM_WINDOW: Duration = Duration::from_secs(2);
const MAX_ACTIVITY_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Main,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    ApiKey,
    SaveLocation,
}

pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub text: String,
}

/// Presenter-side state: the latest controller snapshot plus everything
/// the terminal needs to render and edit. Mutated only by key events and
/// session events on the app task.
pub struct AppState {
    pub screen: Screen,
    pub config: Config,
    pub setup_focus: SetupField,
    pub api_key_input: String,
    pub save_location_input: String,
    pub prompt: String,
    pub session: SessionSnapshot,
    pub activity: Vec<ActivityEntry>,
    pub should_quit: bool,
    job_started: Option<Instant>,
    quit_pending: Option<Instant>,
    events_tx: UnboundedSender<SessionEvent>,
    generator: Option<GeneratorHandle>,
}

impl AppState {
    pub fn new(config: Config, events_tx: UnboundedSender<SessionEvent>) -> Self {
        let screen = if config.api_key.trim().is_empty() {
            Screen::Setup
        } else {
            Screen::Main
        };

        let mut state = Self {
            screen,
            api_key_input: config.api_key.clone(),
            save_location_input: config.save_location.clone(),
            config,
            setup_focus: SetupField::ApiKey,
            prompt: String::new(),
            session: SessionSnapshot::default(),
            activity: Vec::new(),
            should_quit: false,
            job_started: None,
            quit_pending: None,
            events_tx,
            generator: None,
        };

        if state.screen == Screen::Main {
            state.start_generator();
        }

        state
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.on_ctrl_c();
            return;
        }

        match self.screen {
            Screen::Setup => self.on_setup_key(key),
            Screen::Main => self.on_main_key(key),
            Screen::Help => self.on_help_key(key),
        }
    }

    pub fn on_session_event(&mut self, event: SessionEvent) {
        let SessionEvent::Update(snapshot) = event;

        if snapshot.phase == SessionPhase::Creating && self.session.phase != SessionPhase::Creating
        {
            self.job_started = Some(Instant::now());
        }
        if snapshot.phase.is_terminal() {
            self.job_started = None;
        }

        self.push_activity(snapshot.message.clone());
        if snapshot.phase == SessionPhase::Failed {
            if let Some(error) = &snapshot.last_error {
                self.push_activity(error.clone());
            }
        }

        self.session = snapshot;
    }

    /// Seconds since the current job entered Creating; None once it lands
    /// in a terminal phase.
    pub fn elapsed_secs(&self) -> Option<u64> {
        self.job_started.map(|t| t.elapsed().as_secs())
    }

    pub fn shutdown(&self) {
        if let Some(generator) = &self.generator {
            generator.shutdown();
        }
    }

    fn on_ctrl_c(&mut self) {
        let now = Instant::now();
        if let Some(previous) = self.quit_pending {
            if now.duration_since(previous) < QUIT_CONFIRM_WINDOW {
                self.should_quit = true;
                return;
            }
        }
        self.quit_pending = Some(now);
        self.push_activity("Press Ctrl-C again to exit");
    }

    fn on_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.setup_focus = match self.setup_focus {
                    SetupField::ApiKey => SetupField::SaveLocation,
                    SetupField::SaveLocation => SetupField::ApiKey,
                };
            }
            KeyCode::Enter => self.apply_setup(),
            KeyCode::Backspace => {
                self.focused_setup_input().pop();
            }
            KeyCode::Char(c) => self.focused_setup_input().push(c),
            _ => {}
        }
    }

    fn on_main_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Esc => self.prompt.clear(),
            KeyCode::F(1) => self.screen = Screen::Help,
            KeyCode::Char('?') if self.prompt.is_empty() => self.screen = Screen::Help,
            KeyCode::Backspace => {
                self.prompt.pop();
            }
            KeyCode::Char(c) => self.prompt.push(c),
            _ => {}
        }
    }

    fn on_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            self.screen = Screen::Main;
        }
    }

    fn focused_setup_input(&mut self) -> &mut String {
        match self.setup_focus {
            SetupField::ApiKey => &mut self.api_key_input,
            SetupField::SaveLocation => &mut self.save_location_input,
        }
    }

    fn apply_setup(&mut self) {
        if self.api_key_input.trim().is_empty() {
            return;
        }

        self.config.api_key = self.api_key_input.trim().to_string();
        let location = self.save_location_input.trim();
        self.config.save_location = if location.is_empty() {
            Config::default().save_location
        } else {
            location.to_string()
        };

        if let Err(err) = self.config.save() {
            self.push_activity(format!("Could not save config: {err}"));
        }
        if let Err(err) = std::fs::create_dir_all(self.config.save_dir()) {
            self.push_activity(format!(
                "Could not create {}: {err}",
                self.config.save_location
            ));
        }

        self.start_generator();
        self.screen = Screen::Main;
    }

    /// The controller lives for the rest of the session; config is handed
    /// over once and never re-read.
    fn start_generator(&mut self) {
        let client = SoraClient::new(self.config.api_key.clone());
        let controller = Generator::new(
            client,
            DiskStore,
            VideoModel::default(),
            self.config.save_dir(),
            PollPolicy::default(),
            self.events_tx.clone(),
        );
        self.generator = Some(generator::spawn(controller));
        info!("generator started (save dir: {})", self.config.save_location);
    }

    fn submit_prompt(&mut self) {
        if self.prompt.trim().is_empty() || !self.session.phase.accepts_submission() {
            return;
        }
        if let Some(generator) = &self.generator {
            generator.submit(self.prompt.clone());
        }
    }

    fn push_activity(&mut self, text: impl Into<String>) {
        self.activity.push(ActivityEntry {
            at: Local::now(),
            text: text.into(),
        });
        if self.activity.len() > MAX_ACTIVITY_LINES {
            self.activity.remove(0);
        }
    }
}
