//! PhishGuard - Command Line Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use phishguard::logic::context::DetectionContext;
use phishguard::logic::detect::{classify_email, detect_phishing};
use phishguard::logic::fetch::HttpFetcher;
use phishguard::logic::model::ModelBundle;
use phishguard::logic::store::SqliteSink;

#[derive(Parser)]
#[command(name = "phishguard", about = "Phishing URL and spam email detection")]
struct Cli {
    /// Directory holding the `url/` and `email/` model bundles
    #[arg(long, default_value = "models")]
    models: PathBuf,

    /// SQLite database for result records
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a URL
    Url {
        target: String,
        /// Skip the live page fetch; markup features take their defaults
        #[arg(long)]
        no_fetch: bool,
    },
    /// Classify an email body
    Email {
        #[arg(long)]
        address: String,
        #[arg(long)]
        body: String,
        /// Attachment filename, repeatable
        #[arg(long = "attachment")]
        attachments: Vec<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let url_bundle = match ModelBundle::load(&cli.models.join("url")) {
        Ok(b) => b,
        Err(e) => {
            log::error!("url model bundle: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let email_bundle = match ModelBundle::load(&cli.models.join("email")) {
        Ok(b) => b,
        Err(e) => {
            log::error!("email model bundle: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = DetectionContext::new(Box::new(url_bundle), Box::new(email_bundle));

    if let Some(path) = &cli.db {
        match SqliteSink::open(path) {
            Ok(sink) => ctx = ctx.with_sink(Box::new(sink)),
            Err(e) => {
                log::error!("result store: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let record = match cli.command {
        Command::Url { target, no_fetch } => {
            if !no_fetch {
                ctx = ctx.with_fetcher(Box::new(HttpFetcher::new()));
            }
            detect_phishing(&ctx, &target).to_display_map()
        }
        Command::Email {
            address,
            body,
            attachments,
        } => classify_email(&ctx, &address, &body, &attachments).to_display_map(),
    };

    match serde_json::to_string_pretty(&serde_json::Value::Object(record)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("record serialization: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
