use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::filters::{FiltersPatch, parse_filter, sort_results};
use crate::models::{
    CaseDetail, DefaultView, PreferencesPatch, SearchResult, SignupRequest, SortOrder, Theme,
};

#[derive(Parser)]
#[command(name = "legal-case-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Search and browse legal cases", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search cases by text and filters
    Search {
        /// Text matched against case titles and summaries
        query: Option<String>,
        /// Filter expression, e.g. 'category:Employment status:pending'
        #[arg(short, long)]
        filter: Option<String>,
        /// Result order (defaults to the saved preference)
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },
    /// Show or clear recent searches
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Show a case, optionally generating an analysis or saving it
    Case {
        id: String,
        #[arg(long)]
        analyze: bool,
        #[arg(long)]
        save: bool,
    },
    /// Manage saved cases
    Saved {
        #[command(subcommand)]
        action: Option<SavedAction>,
    },
    /// Show or update preferences
    Prefs {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        view: Option<DefaultView>,
        #[arg(long)]
        sort: Option<SortOrder>,
        #[arg(long)]
        email_notifications: Option<bool>,
    },
    /// Sign in (stand-in: any well-formed credentials are accepted)
    Login { email: String, password: String },
    /// Create an account (stand-in)
    Signup {
        email: String,
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved cases
    List,
    /// Remove a saved case by id
    Remove { id: String },
    /// Remove all saved cases
    Clear,
}

pub async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = AppConfig::load(cli.config.as_deref())?;
    let context = AppContext::from_config(&config)?;
    let outcome = dispatch(&context, command).await;
    context.shutdown();
    outcome
}

async fn dispatch(context: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Search { query, filter, sort } => {
            run_search(context, query.unwrap_or_default(), filter, sort).await
        }
        Commands::History { clear } => {
            show_history(context, clear);
            Ok(())
        }
        Commands::Case { id, analyze, save } => show_case(context, &id, analyze, save).await,
        Commands::Saved { action } => {
            manage_saved(context, action.unwrap_or(SavedAction::List));
            Ok(())
        }
        Commands::Prefs { theme, view, sort, email_notifications } => {
            let patch = PreferencesPatch {
                theme,
                email_notifications,
                default_view: view,
                default_sort: sort,
            };
            if patch != PreferencesPatch::default() {
                context.dashboard.update_preferences(patch);
            }
            let prefs = context.dashboard.preferences();
            println!("Theme: {}", prefs.theme);
            println!("Email notifications: {}", prefs.email_notifications);
            println!("Default view: {}", prefs.default_view);
            println!("Default sort: {}", prefs.default_sort);
            Ok(())
        }
        Commands::Login { email, password } => {
            context.auth.login(&email, &password).await;
            report_auth(context)
        }
        Commands::Signup { email, password, first_name, last_name } => {
            let request = SignupRequest {
                email,
                confirm_password: password.clone(),
                password,
                first_name,
                last_name,
            };
            context.auth.signup(&request).await;
            report_auth(context)
        }
        Commands::Logout => {
            context.auth.logout();
            println!("Signed out");
            Ok(())
        }
        Commands::Whoami => {
            match context.auth.user() {
                Some(user) => println!("{} {} <{}>", user.first_name, user.last_name, user.email),
                None => println!("Not signed in"),
            }
            Ok(())
        }
    }
}

async fn run_search(
    context: &AppContext,
    query: String,
    filter: Option<String>,
    sort: Option<SortOrder>,
) -> Result<()> {
    let filters = parse_filter(filter.as_deref().unwrap_or_default())?;
    let search = &context.search;
    search.set_query(query.clone());
    search.set_filters(FiltersPatch::from(filters));
    search.search().await;

    if let Some(error) = search.error() {
        bail!(error);
    }

    let mut results = search.results();
    let order = sort.unwrap_or(context.dashboard.preferences().default_sort);
    sort_results(&mut results, order, &query);

    let active = search.active_filter_count();
    if active > 0 {
        println!("Found {} cases ({} active filters)", results.len(), active);
    } else {
        println!("Found {} cases", results.len());
    }
    for result in &results {
        print_result(result);
    }
    Ok(())
}

fn print_result(result: &SearchResult) {
    println!();
    println!("[{}] {}", result.id, result.title);
    if let Some(court) = &result.court {
        println!("  {}", court);
    }
    println!("  Filed: {}", result.date.format("%Y-%m-%d"));
    if !result.categories.is_empty() {
        println!("  Categories: {}", result.categories.join(", "));
    }
    println!("  {}", result.summary);
}

fn show_history(context: &AppContext, clear: bool) {
    if clear {
        context.search.clear_history();
        println!("Search history cleared");
        return;
    }

    let history = context.search.history();
    if history.is_empty() {
        println!("No recent searches");
        return;
    }
    for item in history {
        let active = item.filters.active_count();
        println!(
            "{}  {}{}",
            item.timestamp.format("%Y-%m-%d %H:%M:%S"),
            item.query,
            if active > 0 { format!(" ({} filters)", active) } else { String::new() }
        );
    }
}

async fn show_case(context: &AppContext, id: &str, analyze: bool, save: bool) -> Result<()> {
    let state = &context.case_detail;
    state.fetch_case(id).await;
    if let Some(error) = state.error() {
        bail!(error);
    }
    if analyze {
        state.generate_analysis().await;
        if let Some(error) = state.error() {
            bail!(error);
        }
    }

    let Some(case) = state.current_case() else {
        bail!("Case '{}' not found", id);
    };
    print_case(&case);

    if save {
        if context.dashboard.add_saved_case(case) {
            println!("\nSaved case {}", id);
        } else {
            println!("\nCase {} is already saved", id);
        }
    }
    Ok(())
}

fn print_case(case: &CaseDetail) {
    println!("{}", case.title);
    println!("================================");
    println!("Court: {}", case.court);
    println!("Jurisdiction: {}", case.jurisdiction);
    println!("Filed: {}", case.date.format("%Y-%m-%d"));
    println!("Judges: {}", case.judges.join(", "));
    println!("Plaintiff: {}", case.parties.plaintiff);
    println!("Defendant: {}", case.parties.defendant);
    println!("Citations: {}", case.citations.join("; "));
    println!();
    println!("{}", case.summary);

    if let Some(analysis) = &case.analysis {
        println!();
        println!("Analysis");
        println!("--------------------------------");
        println!("{}", analysis.summary);
        for point in &analysis.key_points {
            println!("  - {}", point);
        }
        for principle in &analysis.legal_principles {
            println!("  Principle: {}", principle);
        }
        for similar in &analysis.similar_cases {
            println!("  Similar: [{}] {} ({:.0}%)", similar.id, similar.title, similar.similarity * 100.0);
        }
        println!("{}", analysis.ai_insights);
    }
}

fn manage_saved(context: &AppContext, action: SavedAction) {
    let dashboard = &context.dashboard;
    match action {
        SavedAction::List => {
            let saved = dashboard.saved_cases();
            if saved.is_empty() {
                println!("No saved cases yet");
            }
            for case in saved {
                let marker = if case.has_analysis() { " (analyzed)" } else { "" };
                println!("[{}] {}{}", case.id, case.title, marker);
            }
        }
        SavedAction::Remove { id } => {
            if dashboard.remove_saved_case(&id) {
                println!("Removed case {}", id);
            } else {
                println!("Case {} is not saved", id);
            }
        }
        SavedAction::Clear => {
            dashboard.clear_saved_cases();
            println!("All saved cases have been removed");
        }
    }
}

fn report_auth(context: &AppContext) -> Result<()> {
    if let Some(error) = context.auth.error() {
        bail!(error);
    }
    match context.auth.user() {
        Some(user) => {
            println!("Signed in as {}", user.email);
            Ok(())
        }
        None => bail!("Sign-in did not complete"),
    }
}
