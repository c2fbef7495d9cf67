use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use regex::Regex;

use crate::api::{HttpInboxApi, InboxApi};
use crate::inbox::{Dispatcher, Effect, InboxScreen, NoticeLevel};
use crate::io::config_io::load_config;
use crate::io::qr_file::QrFileCache;
use crate::model::{ClientConfig, InboxItem};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
}

/// Main application state
pub struct App {
    pub screen: InboxScreen,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Shown in the header
    pub base_url: String,
    /// Cursor into the visible (filtered) list
    pub cursor: usize,
    /// First visible item
    pub scroll: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Filter applied to the list
    pub last_search: Option<String>,
    /// How long a notification stays up
    pub notification_ttl: Duration,
    /// Effects waiting for the dispatcher
    pub outbox: Vec<Effect>,
    pub qr_files: QrFileCache,
    /// Flow whose image has been written to disk
    qr_written: Option<u64>,
    /// Where the shown QR image was saved
    pub qr_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: &ClientConfig, qr_dir: PathBuf) -> Self {
        App {
            screen: InboxScreen::new(config.credentials.approver_id().map(str::to_string)),
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            base_url: config.server.base_url.clone(),
            cursor: 0,
            scroll: 0,
            show_help: false,
            search_input: String::new(),
            last_search: None,
            notification_ttl: Duration::from_secs(config.ui.notification_secs.max(1)),
            outbox: Vec::new(),
            qr_files: QrFileCache::new(qr_dir),
            qr_written: None,
            qr_path: None,
        }
    }

    /// Queue effects produced by the screen
    pub fn queue(&mut self, effects: Vec<Effect>) {
        self.outbox.extend(effects);
    }

    /// Get the active search regex.
    /// In Search mode: compiles from current input. In Navigate: compiles from last_search.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            Mode::Navigate => self.last_search.as_deref()?,
            _ => return None,
        };
        Regex::new(&format!("(?i){}", pattern))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }

    /// Items shown in the list, in backend order, after the filter
    pub fn visible_items(&self) -> Vec<&InboxItem> {
        let re = self.active_search_re();
        self.screen
            .store()
            .items()
            .filter(|item| match &re {
                Some(re) => {
                    re.is_match(&item.title)
                        || re.is_match(&item.request_id)
                        || re.is_match(&item.requested_by_id)
                }
                None => true,
            })
            .collect()
    }

    pub fn selected_item(&self) -> Option<&InboxItem> {
        self.visible_items().get(self.cursor).copied()
    }

    /// Keep the cursor on a real row after the list changed
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            self.cursor = 0;
            self.scroll = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Mirror the QR modal onto disk: write the ready image once, remove it
    /// when the modal moves on.
    pub fn sync_qr_file(&mut self) {
        let ready = self
            .screen
            .qr()
            .artifact()
            .map(|a| a.flow_id)
            .filter(|flow_id| self.qr_written != Some(*flow_id));
        if let Some(flow_id) = ready {
            self.qr_written = Some(flow_id);
            let stored = match self.screen.qr().artifact() {
                Some(artifact) => self.qr_files.store(flow_id, &artifact.png),
                None => return,
            };
            match stored {
                Ok(path) => self.qr_path = Some(path),
                Err(e) => {
                    self.qr_path = None;
                    self.screen
                        .notify(NoticeLevel::Error, format!("Could not save QR image: {}", e));
                }
            }
            return;
        }

        let showing = self.screen.qr().artifact().map(|a| a.flow_id);
        if self.qr_written.is_some() && showing != self.qr_written {
            self.qr_files.release();
            self.qr_written = None;
            self.qr_path = None;
        }
    }

    /// Drop stale notifications and repair view state after a tick
    pub fn tick(&mut self, now: Instant) {
        self.screen.expire_notifications(now, self.notification_ttl);
        self.clamp_cursor();
        self.sync_qr_file();
    }
}

/// Run the interactive inbox. QR images are written under `data_dir`.
pub fn run(
    config_path: Option<&std::path::Path>,
    data_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    tracing::info!(base_url = %config.server.base_url, "starting inbox");

    let api: Arc<dyn InboxApi> = Arc::new(HttpInboxApi::new(&config)?);
    let dispatcher = Dispatcher::new(api);
    let mut app = App::new(&config, data_dir);
    let effects = app.screen.open();
    app.queue(effects);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &dispatcher);

    // Late results are ignored from here on
    app.screen.close();
    app.sync_qr_file();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        dispatcher.dispatch_all(app.outbox.drain(..));
        for event in dispatcher.poll() {
            app.screen.apply(event);
        }
        app.tick(Instant::now());

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
