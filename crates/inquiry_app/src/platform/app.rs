use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use inquiry_client::{ClientHandle, ClientSettings, ExportWriter};
use inquiry_core::{update, AppState, Msg, PollerState, SelectedFile};
use inquiry_logging::{inquiry_debug, inquiry_info, inquiry_warn};

use super::cli::Cli;
use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::render::{self, Style};

const TICK: Duration = Duration::from_millis(75);
const HISTORY_GRACE: Duration = Duration::from_secs(2);

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = match config::load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let level = inquiry_logging::level_from_str(
        cli.log_level.as_deref().unwrap_or(&config.log_level),
    );
    logging::initialize(config.log_destination, level);
    if let Some(err) = config_error {
        inquiry_warn!("Using default settings: {:#}", err);
    }

    let base_url = cli.base_url.as_deref().unwrap_or(&config.base_url);
    let mut settings = ClientSettings::new(base_url)
        .with_context(|| format!("invalid service url {base_url}"))?;
    settings.connect_timeout = config.connect_timeout();
    settings.request_timeout = config.request_timeout();
    let client = ClientHandle::new(settings).context("starting service client")?;

    let style = Style {
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        client,
        ExportWriter::new(config.export_dir.clone()),
        style,
        msg_tx,
    );
    let mut session = Session::new(
        AppState::with_poll_interval(config.poll_interval()),
        runner,
        style,
    );

    let file = selected_file(&cli.file)?;
    inquiry_info!("Processing {:?} against {}", file.location, base_url);

    session.dispatch(Msg::Mounted);
    session.dispatch(Msg::FileChosen(file));

    session.wait_for(&msg_rx, Wait::Job, None)?;

    let completed = session.state.poller() == PollerState::Completed;
    if completed {
        session.dispatch(Msg::PageSelected(cli.page));
        session.print_results();
        if let Some(position) = cli.detail {
            session.print_detail(position);
        }
        if cli.export {
            session.dispatch(Msg::ExportRequested);
        }
    }
    session.wait_for(&msg_rx, Wait::History, Some(Instant::now() + HISTORY_GRACE))?;
    session.print_history();
    session.dispatch(Msg::Detached);

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let meta = fs::metadata(path).with_context(|| format!("reading {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, meta.len(), path))
}

/// What the terminal session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wait {
    /// Upload and progress polling.
    Job,
    History,
}

impl Wait {
    fn is_pending(self, state: &AppState) -> bool {
        match self {
            Wait::Job => state.is_busy(),
            Wait::History => state.is_history_loading(),
        }
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    style: Style,
    last_frame: Vec<String>,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner, style: Style) -> Self {
        Self {
            state,
            runner,
            style,
            last_frame: Vec::new(),
        }
    }

    /// Pumps messages while `wait` is pending, or until `deadline` passes.
    fn wait_for(
        &mut self,
        msg_rx: &mpsc::Receiver<Msg>,
        wait: Wait,
        deadline: Option<Instant>,
    ) -> anyhow::Result<()> {
        while wait.is_pending(&self.state) {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                inquiry_debug!("Stopped waiting for {:?}", wait);
                return Ok(());
            }
            let msg = match msg_rx.recv_timeout(TICK) {
                Ok(msg) => msg,
                Err(mpsc::RecvTimeoutError::Timeout) => Msg::Tick,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.dispatch(Msg::Detached);
                    bail!("service client stopped unexpectedly");
                }
            };
            self.dispatch(msg);
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        inquiry_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        if self.state.consume_dirty() {
            self.draw();
        }
    }

    /// Prints the live status only when it differs from the previous frame.
    fn draw(&mut self) {
        let frame = render::render(&self.state.view(), self.style);
        if frame != self.last_frame {
            for line in &frame {
                println!("{line}");
            }
            self.last_frame = frame;
        }
    }

    fn print_results(&self) {
        println!();
        for line in render::results_table(&self.state.view(), self.style) {
            println!("{line}");
        }
    }

    fn print_detail(&self, position: usize) {
        println!();
        match position
            .checked_sub(1)
            .and_then(|index| self.state.results().get(index))
        {
            Some(record) => {
                for line in render::record_detail(position, record, self.style) {
                    println!("{line}");
                }
            }
            None => println!("No result #{position}."),
        }
    }

    fn print_history(&self) {
        println!();
        println!("Recent batches:");
        for line in render::history_list(&self.state.view()) {
            println!("  {line}");
        }
    }
}
