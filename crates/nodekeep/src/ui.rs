//! Console output and prompts. Status lines go to stdout, complaints to
//! stderr, questions block on stdin. A closed stdin answers every question
//! with its safe default so piped runs cannot hang.

use std::io::{self, Write};

use colored::Colorize;

use nodekeep_core::{CandidatePrompt, PromptChoice};

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Ask a yes/no question. Enter keeps the shown default; an unreadable or
/// closed stdin does too.
pub fn confirm(question: &str, default_yes: bool) -> bool {
    let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
    print!("{} {question} {hint} ", "?".yellow().bold());
    if io::stdout().flush().is_err() {
        return default_yes;
    }

    match read_answer() {
        Some(answer) if answer.is_empty() => default_yes,
        Some(answer) => answer == "y" || answer == "yes",
        None => default_yes,
    }
}

/// Ask the user to pick one of `options` by number. Enter or a closed stdin
/// cancels.
pub fn choose(question: &str, options: &[String]) -> Option<usize> {
    println!("{}", question.bold());
    for (index, option) in options.iter().enumerate() {
        println!("  {}. {option}", index + 1);
    }

    loop {
        print!(
            "{} Pick a number, or press Enter to cancel: ",
            "?".yellow().bold()
        );
        if io::stdout().flush().is_err() {
            return None;
        }
        let answer = read_answer()?;
        if answer.is_empty() {
            return None;
        }
        match answer.parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => return Some(choice - 1),
            _ => warning(&format!("pick a number between 1 and {}", options.len())),
        }
    }
}

/// Present one install candidate and map the answer onto a
/// [`PromptChoice`]. "all" and "skip all" broadcast to everything after it.
pub fn prompt_candidate(prompt: &CandidatePrompt) -> PromptChoice {
    println!();
    println!("{}", prompt.name.bold());
    if !prompt.description.is_empty() {
        println!("  {}", prompt.description);
    }
    println!(
        "  installed: {}",
        prompt.installed.as_deref().unwrap_or("not installed")
    );
    println!(
        "  latest:    {}",
        prompt.latest.as_deref().unwrap_or("unknown")
    );

    loop {
        print!(
            "{} Install it? [y]es / [n]o / [a]ll remaining / [s]kip remaining ",
            "?".yellow().bold()
        );
        if io::stdout().flush().is_err() {
            return PromptChoice::SkipAllRemaining;
        }
        let Some(answer) = read_answer() else {
            return PromptChoice::SkipAllRemaining;
        };
        match answer.as_str() {
            "y" | "yes" => return PromptChoice::Install,
            "n" | "no" => return PromptChoice::Skip,
            "a" | "all" => return PromptChoice::InstallAllRemaining,
            "s" | "skip" => return PromptChoice::SkipAllRemaining,
            _ => warning("answer y, n, a, or s"),
        }
    }
}

fn read_answer() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        // Zero bytes means stdin is closed, as in a piped run.
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_lowercase()),
        Err(_) => None,
    }
}
