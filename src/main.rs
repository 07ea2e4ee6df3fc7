use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

mod api;
mod cli;
mod config;
mod models;
mod routes;
mod tui;

use api::{FormsApi, HttpFormsApi};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "formdash=info");
    }

    let cli = Cli::parse();

    // Log to a file so the TUI display is never disturbed; print commands
    // additionally log to stderr.
    init_logging(cli.command.is_some());

    let config = Config::from_env()?;
    config.validate()?;

    let api = HttpFormsApi::new(&config)?;

    match cli.command {
        Some(Commands::List) => run_list(&api).await,
        Some(Commands::Create { template }) => run_create(&api, &config, &template).await,
        None => run_dashboard(config, api).await,
    }
}

fn init_logging(print_mode: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "formdash.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .with(print_mode.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        }))
        .init();
}

/// Print the form listing and exit
async fn run_list(api: &HttpFormsApi) -> Result<()> {
    let forms = api.list_forms().await?;

    if forms.is_empty() {
        println!("No forms yet. Create your first form with `formdash create`.");
        return Ok(());
    }

    println!(
        "{:<14} {:<40} {:<14} {:>10}",
        "Id", "Title", "Created", "Responses"
    );
    println!("{}", "-".repeat(82));

    for entry in &forms {
        let responses = entry
            .response_count()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<14} {:<40} {:<14} {:>10}",
            entry.form.id,
            truncate(&entry.form.title, 38),
            tui::format::format_created_date(entry.form.created_at),
            responses
        );
    }

    println!();
    println!("Total: {} form(s)", forms.len());
    Ok(())
}

/// Create a form from a template and print its editor link
async fn run_create(api: &HttpFormsApi, config: &Config, template: &str) -> Result<()> {
    info!("Creating form from template '{}'", template);
    let form = api.create_form(template).await?;

    println!("Created form {} ({})", form.id, form.title);
    println!(
        "Edit it at {}",
        routes::absolute(&config.api_base_url, &routes::form_editor(&form.id))
    );
    Ok(())
}

/// Launch the interactive dashboard
async fn run_dashboard(config: Config, api: HttpFormsApi) -> Result<()> {
    info!("Starting formdash TUI");

    // Setup terminal for TUI mode
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = tui::App::new(config, Arc::new(api));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            if !app.is_signed_in() {
                println!("You are not signed in. Set FORMDASH_API_TOKEN and try again.");
            } else {
                info!("formdash exited successfully");
            }
            Ok(())
        }
        Err(e) => {
            error!("formdash encountered an error: {}", e);
            Err(e)
        }
    }
}

/// Truncate a string to a maximum number of characters with an ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
