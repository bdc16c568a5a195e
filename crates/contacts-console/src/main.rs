// # contacts - terminal front end
//
// Thin integration layer: reads configuration, sets up logging and the
// runtime, wires `RestClient` and `ToastQueue` into `ContactsApp`, then
// runs a line-oriented loop over stdin. All behavior lives in
// contacts-core.
//
// ## Configuration
//
// - `CONTACTS_CONFIG`: JSON config file, applied before the variables below
// - `CONTACTS_API_URL`: Backend base URL (default http://127.0.0.1:5000)
// - `CONTACTS_API_TIMEOUT_SECS`: Request timeout (default: none)
// - `CONTACTS_MIN_NAME_LEN`: Minimum first/last name length (default 3)
// - `CONTACTS_TOAST_TTL_SECS`: How long notifications stay visible (default 5)
// - `CONTACTS_LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// Logs go to stderr so they never interleave with the table on stdout.

mod command;
mod render;
mod session;

use anyhow::Result;
use contacts_core::{ClientConfig, ContactsApp, ToastQueue};
use contacts_http::RestClient;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::command::Command;
use crate::session::{Flow, Session};

/// Process exit codes
#[derive(Debug, Clone, Copy)]
enum ContactsExitCode {
    /// User quit or stdin closed
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected)
    RuntimeError = 2,
}

impl From<ContactsExitCode> for ExitCode {
    fn from(code: ContactsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let config = match ClientConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ContactsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ContactsExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ContactsExitCode::ConfigError.into();
    }

    info!("Starting contacts against {}", config.api.base_url);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ContactsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let session = match build_session(&config) {
            Ok(session) => session,
            Err(e) => {
                error!("Startup error: {}", e);
                return ContactsExitCode::ConfigError;
            }
        };

        if let Err(e) = run(session).await {
            error!("Runtime error: {}", e);
            ContactsExitCode::RuntimeError
        } else {
            ContactsExitCode::CleanShutdown
        }
    })
    .into()
}

fn build_session(config: &ClientConfig) -> Result<Session> {
    let client = RestClient::from_config(&config.api)?;
    let toasts = ToastQueue::new(Duration::from_secs(config.notifications.ttl_secs));
    let app = ContactsApp::from_config(Box::new(client), Arc::new(toasts.clone()), config)?;
    Ok(Session::new(app, toasts))
}

/// Read commands from stdin until `quit` or end of input
async fn run(mut session: Session) -> Result<()> {
    print_block(&session.start().await)?;

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    loop {
        prompt()?;
        let Some(line) = lines.next().await else {
            info!("End of input");
            break;
        };

        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(e) => {
                print_block(&e.to_string())?;
                continue;
            }
        };

        let (flow, out) = session.handle(command).await;
        print_block(&out)?;
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

fn print_block(text: &str) -> Result<()> {
    if !text.is_empty() {
        writeln!(std::io::stdout().lock(), "{}", text)?;
    }
    Ok(())
}
