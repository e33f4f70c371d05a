use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use parish_survey::survey::{FieldDescriptor, FieldKind};
use parish_survey::viewer::{summarize, SummaryBody, FILTER_ALL};
use parish_survey::{
    AdvanceOutcome, AppConfig, DraftStore, ResponseFilter, ResponseStore, SupabaseSink,
    SurveySession,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("responses") => {
            let age = args.get(1).map(String::as_str).unwrap_or(FILTER_ALL);
            let member = args.get(2).map(String::as_str).unwrap_or(FILTER_ALL);
            view_responses(age, member).await
        }
        Some("help") | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
        None => run_survey().await,
    }
}

fn print_usage() {
    println!("Holy Trinity Parish Survey");
    println!();
    println!("Usage:");
    println!("  parish-survey                      fill in the survey");
    println!("  parish-survey responses [age] [member]");
    println!("                                     list submitted responses,");
    println!("                                     filtered by age group and");
    println!("                                     membership (default: all all)");
    println!();
    println!("While filling in the survey, enter !back to return to the");
    println!("previous page or !restart to discard the draft and start over.");
}

fn build_sink(config: &AppConfig) -> Result<Arc<SupabaseSink>> {
    let sink = SupabaseSink::from_config(config)
        .context("Survey backend is not configured. Check SUPABASE_URL / SUPABASE_ANON_KEY.")?;
    Ok(Arc::new(sink))
}

/// Outcome of prompting one page worth of fields.
enum PageInput {
    Filled,
    Back,
    Restart,
}

async fn run_survey() -> Result<()> {
    let config = AppConfig::from_env();
    let sink = build_sink(&config)?;
    let draft = DraftStore::new(&config.draft_path);
    let mut session = SurveySession::resume(draft, sink);

    println!("=== Holy Trinity Parish Survey ===");
    if !session.answers().is_empty() {
        println!("(Welcome back - your saved draft has been restored.)");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let page = session.current_page();
        println!();
        println!(
            "--- {} (page {}/{}, {:.0}% complete) ---",
            page.title,
            session.page_index() + 1,
            session.page_count(),
            session.progress_percent()
        );

        let fields: Vec<FieldDescriptor> = page
            .visible_fields(session.visible_section())
            .copied()
            .collect();

        match prompt_page(&mut session, &fields, &mut lines)? {
            PageInput::Back => {
                session.retreat();
                continue;
            }
            PageInput::Restart => {
                session.restart();
                println!("Draft discarded. Starting over.");
                continue;
            }
            PageInput::Filled => {}
        }

        match session.advance().await {
            AdvanceOutcome::Blocked(report) => {
                println!();
                for error in &report.errors {
                    println!("  ✗ {}: {}", error.label, error.message);
                }
                println!("Please correct the highlighted answers.");
            }
            AdvanceOutcome::Moved(_) => {}
            AdvanceOutcome::Completed => {
                println!();
                println!("🎊 Thank you for completing the survey! 🎊");
                println!("Your feedback helps our parish grow.");
                return Ok(());
            }
        }
    }
}

fn prompt_page(
    session: &mut SurveySession,
    fields: &[FieldDescriptor],
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<PageInput> {
    for field in fields {
        let current = describe_current(session, field);
        let hint = input_hint(field, &current);

        print!("{}{}: ", field.label, hint);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        let input = line.trim();

        match input {
            "!back" => return Ok(PageInput::Back),
            "!restart" => return Ok(PageInput::Restart),
            // Empty input keeps whatever the draft already holds.
            "" => continue,
            _ => apply_input(session, field, input),
        }
    }
    Ok(PageInput::Filled)
}

fn describe_current(session: &SurveySession, field: &FieldDescriptor) -> Option<String> {
    match field.kind {
        FieldKind::Checkbox => session.answers().get(field.key).map(|_| {
            let state = if session.answers().flag(field.key) { "yes" } else { "no" };
            state.to_string()
        }),
        _ => session.answers().text(field.key).map(str::to_string),
    }
}

fn input_hint(field: &FieldDescriptor, current: &Option<String>) -> String {
    match field.kind {
        FieldKind::Checkbox => match current {
            Some(value) => format!(" [y/n, saved: {}]", value),
            None => " [y/n]".to_string(),
        },
        FieldKind::Radio(options) => match current {
            Some(value) => format!(" ({}, saved: {})", options.join("/"), value),
            None => format!(" ({})", options.join("/")),
        },
        _ => match current {
            Some(value) => format!(" [saved: {}]", value),
            None => String::new(),
        },
    }
}

fn apply_input(session: &mut SurveySession, field: &FieldDescriptor, input: &str) {
    match field.kind {
        FieldKind::Checkbox => {
            let checked = matches!(input.to_lowercase().as_str(), "y" | "yes" | "x");
            session.record_answer(field.key, checked);
        }
        FieldKind::Radio(options) => {
            // Accept the option text as typed; validation catches anything
            // that does not match a known choice by leaving it unanswered.
            let normalized = input.to_lowercase();
            if options.contains(&normalized.as_str()) {
                session.record_answer(field.key, normalized);
            } else {
                println!("  (please choose one of: {})", options.join(", "));
            }
        }
        _ => session.record_answer(field.key, input),
    }
}

async fn view_responses(age: &str, member: &str) -> Result<()> {
    let config = AppConfig::from_env();
    let sink = build_sink(&config)?;
    let mut store = ResponseStore::new(sink);

    println!("Loading responses...");
    if let Err(e) = store.refresh().await {
        eprintln!("Failed to load responses. Please try again. ({})", e);
        std::process::exit(1);
    }

    let stats = store.stats();
    println!();
    println!("Total responses: {}", stats.total);
    match stats.last_submission {
        Some(ts) => println!("Last submission: {}", ts.format("%b %e, %Y %H:%M UTC")),
        None => println!("Last submission: N/A"),
    }

    let filter = ResponseFilter::from_selections(age, member);
    let filtered = store.filtered(&filter);
    if filtered.is_empty() {
        println!();
        println!("No responses match the current filters.");
        return Ok(());
    }

    println!();
    let now = Utc::now();
    for record in &filtered {
        let date = record
            .created_at
            .map(|ts| ts.format("%b %e, %Y").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let badge = if ResponseStore::is_recent(record, now) {
            " [NEW]"
        } else {
            ""
        };
        println!(
            "{:<14} {:<24} {:<28} {:<12} {}{}",
            date,
            record.full_name.as_deref().unwrap_or("N/A"),
            record.email.as_deref().unwrap_or("N/A"),
            match record.parish_member.as_deref() {
                Some("yes") => "Member",
                _ => "Non-Member",
            },
            record.age_group.as_deref().unwrap_or("N/A"),
            badge,
        );
    }

    println!();
    println!("--- Question Summary ({} filtered) ---", filtered.len());
    for summary in summarize(&filtered) {
        println!();
        println!("{} ({} answer(s))", summary.label, summary.total);
        match &summary.body {
            SummaryBody::Choices(tallies) => {
                for tally in tallies {
                    println!("  {:<20} {:>4}  ({}%)", tally.choice, tally.count, tally.percent);
                }
            }
            SummaryBody::Answers(answers) => {
                for answer in answers {
                    println!("  - {}", answer);
                }
            }
        }
    }

    Ok(())
}
