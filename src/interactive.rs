//! Interactive session: the menu loop standing in for the original form.
//! Every action is a synchronous, user-triggered event; the only blocking
//! operation is the generation call itself.

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::error::ServiceResult;
use crate::gemini::GeminiClient;
use crate::render;
use crate::session::Session;
use crate::types::{Dedication, Experience, Timeframe};

pub fn run(session: &mut Session) -> ServiceResult<()> {
    let theme = ColorfulTheme::default();
    loop {
        let items = [
            "Generate roadmap",
            "Edit preferences",
            "Set API key",
            "Save current roadmap",
            "Load saved roadmap",
            "Toggle dark/light mode",
            "Quit",
        ];
        let choice = Select::with_theme(&theme)
            .with_prompt("skillpath")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => generate(session, &theme)?,
            1 => edit_preferences(session, &theme)?,
            2 => set_api_key(session, &theme)?,
            3 => save_current(session)?,
            4 => load_saved(session, &theme)?,
            5 => {
                session.toggle_theme();
                println!("Switched to {} mode.", session.theme.label());
            }
            _ => break,
        }
    }
    Ok(())
}

fn generate(session: &mut Session, theme: &ColorfulTheme) -> ServiceResult<()> {
    if session.preferences.goal.trim().is_empty() {
        edit_preferences(session, theme)?;
    }
    if session.api_key().is_none() {
        set_api_key(session, theme)?;
    }
    let Some(key) = session.api_key() else {
        println!("{}", session.theme.error("Gemini API key is required"));
        return Ok(());
    };

    let client = GeminiClient::new(key);
    println!("Generating roadmap, this can take a little while...");
    match session.generate(&client) {
        Ok(()) => render::print_roadmap(&session.roadmap, session.theme),
        Err(_) => {
            // Detail already went to the log; only the collapsed message is shown.
            if let Some(message) = &session.last_error {
                println!("{}", session.theme.error(message));
            }
        }
    }
    Ok(())
}

fn edit_preferences(session: &mut Session, theme: &ColorfulTheme) -> ServiceResult<()> {
    let goal: String = Input::with_theme(theme)
        .with_prompt("What do you want to learn?")
        .with_initial_text(session.preferences.goal.clone())
        .allow_empty(true)
        .interact_text()?;
    session.preferences.goal = goal.trim().to_string();

    session.preferences.timeframe = pick(
        theme,
        "Timeframe",
        &Timeframe::ALL,
        session.preferences.timeframe,
    )?;
    session.preferences.experience = pick(
        theme,
        "Experience level",
        &Experience::ALL,
        session.preferences.experience,
    )?;
    session.preferences.dedication = pick(
        theme,
        "Time dedication",
        &Dedication::ALL,
        session.preferences.dedication,
    )?;
    Ok(())
}

fn pick<T: Copy + PartialEq + std::fmt::Display>(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[T],
    current: T,
) -> ServiceResult<T> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index])
}

fn set_api_key(session: &mut Session, theme: &ColorfulTheme) -> ServiceResult<()> {
    let key = Password::with_theme(theme)
        .with_prompt("Gemini API key")
        .allow_empty_password(true)
        .interact()?;
    session.set_api_key(&key)?;
    Ok(())
}

fn save_current(session: &mut Session) -> ServiceResult<()> {
    match session.save_current()? {
        Some(saved) => println!("Saved roadmap {}.", saved.id),
        None => println!("Nothing to save yet; generate a roadmap first."),
    }
    Ok(())
}

fn load_saved(session: &mut Session, theme: &ColorfulTheme) -> ServiceResult<()> {
    if session.saved().is_empty() {
        println!("No saved roadmaps.");
        return Ok(());
    }
    let labels: Vec<String> = session.saved().iter().map(render::saved_summary).collect();
    let index = Select::with_theme(theme)
        .with_prompt("Load which roadmap?")
        .items(&labels)
        .default(0)
        .interact()?;
    let id = session.saved()[index].id.clone();
    session.load_saved(&id)?;
    render::print_roadmap(&session.roadmap, session.theme);
    Ok(())
}
