// TUI module - Terminal User Interface
//
// This module manages the terminal view using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, selection changes)
// - Turning keys into actions (select, export, copy, quit)

pub mod app;
pub mod clipboard;
pub mod toast;
pub mod ui;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::export::{write_export, CsvDocument};
use crate::logging::LogBuffer;
use crate::selection::{Origin, SelectionState, SessionHandle};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Something the event loop must do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a pick to the selection session
    Select(String),
    /// Write the CSV export to the export directory
    Export,
    /// Copy the CSV export to the clipboard
    CopyCsv,
}

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, then
/// restores the terminal even if the loop failed.
pub async fn run_tui(
    config: Config,
    catalog: Arc<Catalog>,
    session: SessionHandle,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(
        catalog,
        session.current(),
        log_buffer,
        config.web_url(),
        config.export.clone(),
    );

    let result = run_event_loop(&mut terminal, &mut app, &session).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, a redraw tick and selection changes published by
/// the session (picks made in the web view show up here too).
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &SessionHandle,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));
    let mut selection_rx: watch::Receiver<SelectionState> = session.subscribe();
    let mut session_open = true;

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => {
                if let Some(Event::Key(key_event)) = input {
                    if let Some(action) = handle_key_event(app, key_event) {
                        perform_action(app, session, action).await;
                    }
                }
            }

            _ = tick_interval.tick() => {
                app.on_tick();
            }

            changed = selection_rx.changed(), if session_open => {
                match changed {
                    Ok(()) => {
                        let state = selection_rx.borrow_and_update().clone();
                        app.apply_selection(state);
                    }
                    Err(_) => {
                        tracing::warn!("Selection session closed");
                        session_open = false;
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Map a key press to app changes and, when needed, an action to perform
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Option<Action> {
    // Some terminals report releases and repeats too
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_up();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_down();
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.cursor_home();
            None
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.cursor_end();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => app
            .cursor_record()
            .map(|record| Action::Select(record.id.clone())),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('y') => Some(Action::CopyCsv),
        _ => None,
    }
}

async fn perform_action(app: &mut App, session: &SessionHandle, action: Action) {
    match action {
        Action::Select(id) => match session.select(id, Origin::Terminal).await {
            Ok(state) => app.apply_selection(state),
            Err(e) => {
                tracing::warn!("Selection failed: {:#}", e);
                app.show_toast("Selection unavailable");
            }
        },
        Action::Export => {
            let doc = export_document(app);
            match write_export(&app.export.dir, &doc) {
                Ok(path) => app.show_toast(format!("Exported to {}", path.display())),
                Err(e) => {
                    tracing::warn!("Export failed: {:#}", e);
                    app.show_toast("Export failed (see logs)");
                }
            }
        }
        Action::CopyCsv => {
            let doc = export_document(app);
            match clipboard::copy_to_clipboard(&doc.body) {
                Ok(()) => {
                    tracing::info!(records = app.catalog.len(), "Catalog CSV copied to clipboard");
                    app.show_toast("CSV copied to clipboard");
                }
                Err(e) => {
                    tracing::warn!("Clipboard copy failed: {:#}", e);
                    app.show_toast("Clipboard unavailable");
                }
            }
        }
    }
}

fn export_document(app: &App) -> CsvDocument {
    CsvDocument::build(
        app.catalog.records(),
        app.export.header,
        &app.export.filename,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::selection::SelectionController;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_export(export: ExportConfig) -> App {
        App::new(
            Arc::new(Catalog::load()),
            SelectionState::default(),
            LogBuffer::new(),
            String::new(),
            export,
        )
    }

    fn app() -> App {
        app_with_export(ExportConfig::default())
    }

    #[test]
    fn enter_selects_record_under_cursor() {
        let mut app = app();
        handle_key_event(&mut app, press(KeyCode::Down));
        handle_key_event(&mut app, press(KeyCode::Down));
        assert_eq!(
            handle_key_event(&mut app, press(KeyCode::Enter)),
            Some(Action::Select("2B033".to_string()))
        );
    }

    #[test]
    fn quit_keys_set_flag() {
        let mut app = app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn releases_are_ignored() {
        let mut app = app();
        let release = KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key_event(&mut app, release);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn export_and_copy_keys_map_to_actions() {
        let mut app = app();
        assert_eq!(
            handle_key_event(&mut app, press(KeyCode::Char('e'))),
            Some(Action::Export)
        );
        assert_eq!(
            handle_key_event(&mut app, press(KeyCode::Char('y'))),
            Some(Action::CopyCsv)
        );
    }

    #[tokio::test]
    async fn select_action_goes_through_session() {
        let catalog = Arc::new(Catalog::load());
        let (session, _task) = SessionHandle::spawn(SelectionController::new(
            catalog.clone(),
            Default::default(),
        ));
        let mut app = app();

        perform_action(&mut app, &session, Action::Select("2B050".to_string())).await;

        assert_eq!(app.selection.selected_id(), Some("2B050"));
        assert_eq!(session.current().selected_id(), Some("2B050"));
    }

    #[tokio::test]
    async fn export_action_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let (session, _task) = SessionHandle::spawn(SelectionController::new(
            Arc::new(Catalog::load()),
            Default::default(),
        ));
        let mut app = app_with_export(ExportConfig {
            dir: tmp.path().to_path_buf(),
            ..ExportConfig::default()
        });

        perform_action(&mut app, &session, Action::Export).await;

        let written =
            std::fs::read_to_string(tmp.path().join("communes_haute_corse.csv")).unwrap();
        assert_eq!(written.lines().count(), 16);
        assert!(app.toast.unwrap().message.starts_with("Exported to"));
    }
}
