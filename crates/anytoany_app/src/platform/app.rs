use std::io::{self, BufRead, Stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anytoany_core::{render, update, AppState, Msg, SelectedFile, SessionState};
use convert_logging::{convert_info, convert_warn};

use super::effects::EffectRunner;
use super::logging;
use super::settings::{load_settings, Settings, SETTINGS_FILENAME};
use super::ui::commands::{parse_command, Command, HELP_TEXT};
use super::ui::terminal::TerminalSurface;

/// Everything the main loop reacts to, in arrival order.
pub enum AppEvent {
    Input(Command),
    InputClosed,
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let settings_path = Path::new(SETTINGS_FILENAME);
    let (settings, load_problem) = match load_settings(settings_path) {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    logging::initialize(settings.log_destination, settings.level_filter());
    if let Some(err) = load_problem {
        convert_warn!("{:#}; using default settings", err);
        eprintln!("Warning: {err:#}; using default settings");
    }
    convert_info!(
        "Starting with endpoint {} (max {} files, downloads in {:?})",
        settings.base_url,
        settings.max_files,
        settings.download_dir
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&settings, event_tx.clone())?;
    spawn_input_reader(event_tx)?;

    let mut app = App {
        state: AppState::with_config(settings.controller_config()),
        surface: TerminalSurface::new(io::stdout()),
        runner,
        closing: false,
    };
    app.surface.note("AnyToAny batch converter. Type 'help' for commands.")?;
    app.render_full()?;

    for event in event_rx {
        match event {
            AppEvent::Input(command) => app.handle_command(command)?,
            AppEvent::InputClosed => app.request_close()?,
            AppEvent::Msg(msg) => app.dispatch(msg)?,
        }
        if app.closing && app.state.session() == SessionState::Idle {
            break;
        }
    }

    convert_info!("Exiting");
    Ok(())
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("anytoany-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if events.send(AppEvent::Input(parse_command(&line))).is_err() {
                    return;
                }
            }
            let _ = events.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

struct App {
    state: AppState,
    surface: TerminalSurface<Stdout>,
    runner: EffectRunner,
    closing: bool,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            render(&self.state.view(), &mut self.surface);
            self.surface.present(self.state.target_format())?;
        }
        self.runner.run(effects, &mut self.surface);
        Ok(())
    }

    fn render_full(&mut self) -> io::Result<()> {
        render(&self.state.view(), &mut self.surface);
        self.surface.present_full(self.state.target_format())
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Select(paths) => {
                for path in paths.iter().filter(|path| !path.is_file()) {
                    convert_warn!("Selected path {:?} is not a readable file", path);
                }
                let files = paths.into_iter().map(SelectedFile::from_path).collect();
                self.dispatch(Msg::FilesSelected(files))
            }
            Command::Format(format) => {
                let view = self.state.view();
                if view.formats.iter().any(|known| known.eq_ignore_ascii_case(&format)) {
                    self.dispatch(Msg::FormatChosen(format))
                } else {
                    self.surface.note(&format!(
                        "Unknown format '{}'. Available: {}",
                        format,
                        view.formats.join(", ")
                    ))
                }
            }
            Command::Formats => {
                let view = self.state.view();
                self.surface.note(&format!(
                    "Available formats: {} (current: {})",
                    view.formats.join(", "),
                    view.target_format
                ))
            }
            Command::Submit => {
                if self.state.session() == SessionState::Submitting {
                    return self.surface.note("A conversion is already running.");
                }
                self.dispatch(Msg::SubmitClicked)
            }
            Command::Clear => self.dispatch(Msg::SelectionCleared),
            Command::Status => {
                self.render_full()?;
                match self.state.view().last_download {
                    Some(location) => self.surface.note(&format!("Last download: {location}")),
                    None => Ok(()),
                }
            }
            Command::Help => self.surface.note(HELP_TEXT),
            Command::Quit => self.request_close(),
            Command::Empty => Ok(()),
            Command::Invalid(reason) => self.surface.note(&reason),
        }
    }

    fn request_close(&mut self) -> io::Result<()> {
        self.closing = true;
        if self.state.session() == SessionState::Submitting {
            self.surface
                .note("Waiting for the running conversion to finish...")?;
        }
        Ok(())
    }
}
