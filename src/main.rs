use bookmark_ingest::{
    categorize, generate_notes, IngestConfig, IngestError, Ingestor, LlmProvider, OpenRouterProvider, ParseMode,
};
use log::{error, info};
use std::env;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

const USAGE: &str = "Usage: bookmark-ingest [smart|grouped|strict|html|auto|analyze|notes] [FILE]";

enum Command {
    Parse(ParseMode),
    Analyze,
    /// Auto-mode parse, then a note for every record that has none
    Notes,
}

fn parse_command(arg: Option<&str>) -> Result<Command, String> {
    match arg {
        None => Ok(Command::Parse(ParseMode::Auto)),
        Some("analyze") => Ok(Command::Analyze),
        Some("notes") => Ok(Command::Notes),
        Some(mode) => mode.parse().map(Command::Parse),
    }
}

async fn read_input(path: Option<&str>) -> Result<String, IngestError> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

fn remote_provider(config: &IngestConfig) -> Option<OpenRouterProvider> {
    match OpenRouterProvider::new(&config.ai) {
        Ok(provider) => Some(provider),
        Err(e) => {
            info!("Using local analysis only: {}", e);
            None
        }
    }
}

async fn run(command: Command, text: &str, config: &IngestConfig) -> Result<String, IngestError> {
    let ingestor = Ingestor::from_config(config);

    let json = match command {
        Command::Parse(mode) => serde_json::to_string_pretty(&ingestor.ingest(text, mode)?),
        Command::Analyze => {
            let report = ingestor.ingest(text, ParseMode::Auto)?;
            let urls: Vec<&str> = report.records.iter().map(|r| r.url.as_str()).collect();

            let provider = remote_provider(config);
            let provider = provider.as_ref().map(|p| p as &dyn LlmProvider);

            let result = categorize(&urls, provider, ingestor.knowledge_base()).await;
            serde_json::to_string_pretty(&result)
        }
        Command::Notes => {
            let mut report = ingestor.ingest(text, ParseMode::Auto)?;

            let provider = remote_provider(config);
            let provider = provider.as_ref().map(|p| p as &dyn LlmProvider);

            for record in report.records.iter_mut().filter(|r| r.notes.is_empty()) {
                let notes = generate_notes(record, provider, ingestor.knowledge_base()).await;
                record.notes = notes;
            }
            serde_json::to_string_pretty(&report)
        }
    };

    json.map_err(|e| IngestError::Provider(format!("Failed to serialise output: {e}")))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let command = match parse_command(args.get(1).map(String::as_str)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match IngestConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let text = match read_input(args.get(2).map(String::as_str)).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(command, &text, &config).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
