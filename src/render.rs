use colored::{ColoredString, Colorize};

use crate::types::{RoadmapStep, SavedRoadmap};

/// Display mode for terminal output. Session-only; not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    fn heading(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_cyan().bold(),
            Theme::Light => text.blue().bold(),
        }
    }

    fn accent(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_yellow(),
            Theme::Light => text.magenta(),
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_black(),
            Theme::Light => text.dimmed(),
        }
    }

    pub fn error(&self, text: &str) -> ColoredString {
        match self {
            Theme::Dark => text.bright_red().bold(),
            Theme::Light => text.red().bold(),
        }
    }
}

pub fn print_roadmap(steps: &[RoadmapStep], theme: Theme) {
    if steps.is_empty() {
        println!("{}", theme.muted("No roadmap generated yet."));
        return;
    }
    for (i, step) in steps.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            theme.accent(&format!("Phase {}:", i + 1)),
            theme.heading(&step.title)
        );
        if !step.timeframe.is_empty() {
            println!("  {}", theme.muted(&step.timeframe));
        }
        if !step.description.is_empty() {
            println!("  {}", step.description);
        }
        if !step.skills.is_empty() {
            println!("  {} {}", theme.accent("skills:"), step.skills.join(", "));
        }
        for resource in &step.resources {
            println!(
                "  - {} {}",
                resource.title,
                theme.muted(&format!("<{}>", resource.url))
            );
        }
    }
    println!();
}

pub fn print_saved_list(saved: &[SavedRoadmap], theme: Theme) {
    if saved.is_empty() {
        println!("{}", theme.muted("No saved roadmaps."));
        return;
    }
    for entry in saved {
        println!(
            "{}  {}  {}",
            theme.accent(&entry.id),
            entry.preferences.goal,
            theme.muted(&entry.created_at)
        );
    }
}

/// One-line label used when picking a saved roadmap from a menu.
pub fn saved_summary(entry: &SavedRoadmap) -> String {
    format!(
        "{} ({} steps, {})",
        entry.preferences.goal,
        entry.steps.len(),
        entry.created_at
    )
}
