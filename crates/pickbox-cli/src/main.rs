//! Pickbox CLI - run, check and serve combo box stories.

mod script;
mod story;

use clap::{Parser, Subcommand};
use pickbox_test::Harness;
use script::Step;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use story::StoryError;
use tiny_http::{Header, Response, Server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pickbox")]
#[command(about = "Searchable combo box demo harness")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a story headlessly and replay interaction steps
    Demo {
        /// Path to story file
        #[arg(default_value = "stories/frontend.yaml")]
        story: PathBuf,

        /// Comma-separated steps: open, toggle, type:<text>, enter,
        /// backspace, pick:<label>, outside
        #[arg(short, long, value_delimiter = ',')]
        script: Vec<String>,
    },

    /// Check story file validity
    Check {
        /// Path to story file
        #[arg(default_value = "stories/frontend.yaml")]
        story: PathBuf,
    },

    /// Serve the browser demo page
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory to serve (default: www)
        #[arg(short, long, default_value = "www")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Demo { story, script } => demo(&story, &script),
        Commands::Check { story } => check_story(&story),
        Commands::Serve { port, dir } => serve(port, &dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn demo(path: &Path, raw_steps: &[String]) -> Result<(), StoryError> {
    let steps = raw_steps
        .iter()
        .map(|s| s.trim().parse::<Step>())
        .collect::<Result<Vec<_>, _>>()?;
    let props = story::load(path)?;
    let mut harness = Harness::try_new(props.to_combo_box())?;

    println!("mount");
    print!("{}", script::frame(&harness));
    let mut reported = harness.changes().len();
    report_changes(&harness, 0);

    for step in &steps {
        step.apply(&mut harness);
        println!("{step}");
        print!("{}", script::frame(&harness));
        report_changes(&harness, reported);
        reported = harness.changes().len();
    }
    Ok(())
}

fn report_changes(harness: &Harness, already: usize) {
    for id in harness.changes().iter().skip(already) {
        println!("  onChange(\"{id}\")");
    }
}

fn check_story(path: &Path) -> Result<(), StoryError> {
    println!("Checking story: {}", path.display());
    let props = story::load(path)?;
    let warnings = story::check(&props)?;
    println!("Story valid!");
    println!("  Options: {}", props.options.len());
    if let Some(default_value) = &props.default_value {
        println!("  Default: {default_value}");
    }
    for warning in warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}

fn serve(port: u16, dir: &Path) -> Result<(), StoryError> {
    let addr = format!("0.0.0.0:{port}");
    let server = Server::http(&addr)
        .map_err(|e| StoryError::Invalid(format!("cannot bind {addr}: {e}")))?;
    println!("Serving {} at http://localhost:{port}", dir.display());
    println!("Press Ctrl+C to stop");

    for request in server.incoming_requests() {
        let url = request.url().split('?').next().unwrap_or("/").to_string();
        let response = match resolve(dir, &url) {
            Some(path) => match fs::read(&path) {
                Ok(content) => {
                    let header =
                        Header::from_bytes(&b"Content-Type"[..], content_type(&path).as_bytes());
                    let response = Response::from_data(content);
                    match header {
                        Ok(header) => response.with_header(header),
                        Err(()) => response,
                    }
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "read failed");
                    Response::from_string("500 Internal Server Error").with_status_code(500)
                }
            },
            None => Response::from_string("404 Not Found").with_status_code(404),
        };
        info!(url = %url, "request");
        let _ = request.respond(response);
    }
    Ok(())
}

/// Map a request path onto a file under `dir`, refusing to leave it.
fn resolve(dir: &Path, url: &str) -> Option<PathBuf> {
    let relative = url.trim_start_matches('/');
    if relative.split('/').any(|part| part == "..") {
        return None;
    }
    let path = if relative.is_empty() {
        dir.join("index.html")
    } else {
        dir.join(relative)
    };
    path.is_file().then_some(path)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("yaml" | "yml") => "text/yaml",
        _ => "application/octet-stream",
    }
}
