mod cli;
mod error;
mod gemini;
mod interactive;
mod metadata;
mod prompts;
mod render;
mod session;
mod storage;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, GenerateArgs};
use crate::error::ServiceResult;
use crate::gemini::GeminiClient;
use crate::session::Session;
use crate::storage::Storage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut storage = Storage::new();
    storage.initialize()?;
    let mut session = Session::new(storage);

    // A key given on the command line or via GEMINI_API_KEY counts as
    // explicit entry and is persisted for later sessions.
    if let Some(key) = &cli.api_key {
        session.set_api_key(key)?;
    }

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => interactive::run(&mut session)?,
        Command::Generate(args) => {
            if let Err(err) = generate_once(&mut session, args) {
                tracing::debug!(error = %err, "one-shot generation failed");
                if let Some(message) = &session.last_error {
                    eprintln!("{}", session.theme.error(message));
                } else {
                    eprintln!("{}", session.theme.error(&err.user_message()));
                }
                std::process::exit(1);
            }
        }
        Command::List => render::print_saved_list(session.saved(), session.theme),
        Command::Show(args) => {
            session.load_saved(&args.id)?;
            render::print_roadmap(&session.roadmap, session.theme);
        }
    }

    Ok(())
}

fn generate_once(session: &mut Session, args: GenerateArgs) -> ServiceResult<()> {
    session.preferences.goal = args.goal;
    session.preferences.timeframe = args.timeframe.unwrap_or_default();
    session.preferences.experience = args.experience.unwrap_or_default();
    session.preferences.dedication = args.dedication.unwrap_or_default();

    let key = session.api_key().ok_or_else(|| {
        crate::error::ServiceError::Validation(
            "Gemini API key is required (pass --api-key or set GEMINI_API_KEY)".to_string(),
        )
    })?;

    let client = GeminiClient::new(key);
    session.generate(&client)?;
    render::print_roadmap(&session.roadmap, session.theme);

    if args.save {
        if let Some(saved) = session.save_current()? {
            println!("Saved roadmap {}.", saved.id);
        }
    }
    Ok(())
}
