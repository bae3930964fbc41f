use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::process;

use skillstack::activity::ActivitySummary;
use skillstack::api::ApiClient;
use skillstack::config::Config;
use skillstack::models::{NewEvent, NewSkill, Progress, Recommendation, SkillPatch};
use skillstack::render::{svg, text};
use skillstack::skills::{
    filter_by_progress, filter_skills, format_hours, sort_skills, SkillSort, SkillStats,
};
use skillstack::timeline::group_by_date;
use skillstack::utils::{self, truncate_string};
use skillstack::{interactive, logging, DayLabeler};

#[derive(Parser)]
#[command(name = "skillstack")]
#[command(about = "Track skills and practice activity from the terminal", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    /// Backend URL (overrides config file and SKILLSTACK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the 7-day activity widget
    Activity {
        /// Reference day (YYYY-MM-DD, YYYY.MM.DD, or YYYY/MM/DD format, default: today)
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Read events from a JSON file instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Manage practice events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Events grouped by date, newest first
    Timeline {
        /// Read events from a JSON file instead of the backend
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Manage skills
    Skills {
        #[command(subcommand)]
        command: SkillCommands,
    },
    /// Ask the backend for learning resources
    Recommend {
        /// What you want to learn
        query: String,

        /// Number of suggestions
        #[arg(short = 'k', long, default_value_t = 5)]
        top_k: u32,
    },
    /// Summarize a piece of text
    Summarize {
        text: String,

        #[arg(short, long, default_value_t = 3)]
        max_sentences: u32,

        /// Use the OpenAI summarizer instead of the local one
        #[arg(long)]
        openai: bool,
    },
    /// Interactive terminal dashboard
    Dashboard,
    /// Show the configuration, or store --api-url / --locale in it
    Config {
        /// Locale for weekday labels, e.g. de_DE
        #[arg(long)]
        locale: Option<String>,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// List events, optionally within a date range
    List {
        #[arg(short, long, requires = "end")]
        start: Option<String>,

        #[arg(short, long, requires = "start")]
        end: Option<String>,
    },
    /// Log a practice event
    Add {
        #[arg(short, long)]
        title: String,

        /// Date (default: today)
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Duration in minutes (default: 30)
        #[arg(short, long)]
        minutes: Option<i64>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Skill the event belongs to
        #[arg(short, long)]
        skill: Option<i64>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SkillCommands {
    /// List skills with overall stats
    List {
        /// Case-insensitive filter on name, platform and resource type
        #[arg(short, long)]
        search: Option<String>,

        /// Only skills at this progress (started, in-progress or completed)
        #[arg(long)]
        progress: Option<Progress>,

        /// Order: recent, difficulty or hours
        #[arg(long, default_value = "recent")]
        sort: SkillSort,
    },
    /// Add a skill
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        resource_type: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        /// started, in-progress or completed
        #[arg(long, default_value = "started")]
        progress: Progress,

        #[arg(long, default_value_t = 0.0)]
        hours: f64,

        /// 1 (easy) to 5 (hard)
        #[arg(short, long, default_value_t = 3)]
        difficulty: i64,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Update selected fields of a skill
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        resource_type: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        progress: Option<Progress>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(short, long)]
        difficulty: Option<i64>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a skill
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    /// Full card: header, sparkline and day bars
    Svg,
    /// Sparkline only, sized to the configured chart
    SparklineSvg,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // The dashboard owns the terminal, so its logs go to a file
    if matches!(cli.command, Some(Commands::Dashboard)) {
        logging::init_with_file("skillstack.log")
            .map_err(|e| anyhow!("Failed to set up logging: {}", e))?;
    } else {
        logging::init();
    }

    let mut config = Config::load()?;
    if let Some(url) = &cli.api_url {
        config.override_api_url(url);
    }

    // Each command validates only the settings it uses, so `config` can
    // still repair a broken file and offline commands ignore the URL
    match cli.command {
        Some(Commands::Activity { date, input, format }) => {
            handle_activity(&config, date, input, format).await?;
        }
        Some(Commands::Events { command }) => handle_events(&connect(&config)?, command).await?,
        Some(Commands::Timeline { input }) => handle_timeline(&config, input).await?,
        Some(Commands::Skills { command }) => handle_skills(&connect(&config)?, command).await?,
        Some(Commands::Recommend { query, top_k }) => {
            let recommendations = connect(&config)?.recommend(&query, top_k).await?;
            if recommendations.is_empty() {
                println!("No recommendations for \"{}\".", query);
            }
            for (i, rec) in recommendations.iter().enumerate() {
                println!("{}", recommendation_line(i + 1, rec));
                if let Some(url) = &rec.url {
                    println!("   {}", url);
                }
            }
        }
        Some(Commands::Summarize {
            text,
            max_sentences,
            openai,
        }) => match connect(&config)?
            .summarize(&text, max_sentences, openai)
            .await?
        {
            Some(summary) => println!("{}", summary),
            None => println!("No summary returned."),
        },
        Some(Commands::Dashboard) => {
            config.validate_chart()?;
            interactive::run_dashboard(connect(&config)?, &config).await?
        }
        Some(Commands::Config { locale }) => handle_config(&config, cli.api_url, locale)?,
        None => {
            // Default action when no command is provided
            println!("No command specified. Use --help for available commands.");
        }
    }

    Ok(())
}

/// Backend client for commands that actually talk to the server
fn connect(config: &Config) -> Result<ApiClient> {
    config.validate_api_url()?;
    Ok(ApiClient::new(&config.api_url))
}

/// One numbered recommendation, with its relevance score when the backend sent one
fn recommendation_line(rank: usize, rec: &Recommendation) -> String {
    match rec.score {
        Some(score) => format!("{}. {} ({}) score {:.2}", rank, rec.title, rec.platform, score),
        None => format!("{}. {} ({})", rank, rec.title, rec.platform),
    }
}

async fn handle_activity(
    config: &Config,
    date: Option<String>,
    input: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    config.validate_chart()?;
    let today = utils::date_or_today(date.as_deref())?;
    let events = match input {
        Some(path) => utils::load_events_file(&path)?,
        None => connect(config)?.list_events(None).await?,
    };

    let labeler = DayLabeler::from_config(config.locale.as_deref());
    let summary = ActivitySummary::compose(&events, today, &labeler, config.chart);

    match format {
        OutputFormat::Text => {
            for line in text::render(&summary) {
                println!("{}", line);
            }
        }
        OutputFormat::Svg => println!("{}", svg::render_card(&summary)),
        OutputFormat::SparklineSvg => println!("{}", svg::render_sparkline(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

async fn handle_events(client: &ApiClient, command: EventCommands) -> Result<()> {
    match command {
        EventCommands::List { start, end } => {
            let range = match (start, end) {
                (Some(start), Some(end)) => {
                    Some((utils::parse_date(&start)?, utils::parse_date(&end)?))
                }
                _ => None,
            };

            let events = client.list_events(range).await?;
            if events.is_empty() {
                println!("No events found.");
            }
            for event in &events {
                println!(
                    "{:<8} {:<10} {:>5}  {}",
                    truncate_string(&event.id, 8),
                    event.date.as_deref().unwrap_or("-"),
                    event
                        .duration_minutes
                        .map(|m| format!("{}m", m))
                        .unwrap_or_default(),
                    event.title
                );
            }
        }
        EventCommands::Add {
            title,
            date,
            minutes,
            notes,
            skill,
        } => {
            let date = utils::date_or_today(date.as_deref())?;
            let new_event = NewEvent::new(&title, date, minutes, notes, skill)?;
            let created = client.create_event(&new_event).await?;
            println!(
                "✅ Logged \"{}\" on {} ({} min), id {}",
                created.title, new_event.date, new_event.duration_minutes, created.id
            );
        }
        EventCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete event {}?", id))? {
                println!("Operation cancelled.");
                return Ok(());
            }
            client.delete_event(&id).await?;
            println!("✅ Event {} deleted", id);
        }
    }

    Ok(())
}

async fn handle_timeline(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let events = match input {
        Some(path) => utils::load_events_file(&path)?,
        None => connect(config)?.list_events(None).await?,
    };

    let groups = group_by_date(&events);
    if groups.is_empty() {
        println!("No activities yet.");
        return Ok(());
    }

    for group in &groups {
        println!("{}  ({} min)", group.date, group.total_minutes());
        for event in &group.events {
            match event.duration_minutes {
                Some(m) => println!("  - {} ({} min)", event.title, m),
                None => println!("  - {}", event.title),
            }
            if let Some(notes) = event.notes.as_deref().filter(|n| !utils::is_blank(n)) {
                println!("      {}", notes);
            }
        }
    }

    Ok(())
}

async fn handle_skills(client: &ApiClient, command: SkillCommands) -> Result<()> {
    match command {
        SkillCommands::List {
            search,
            progress,
            sort,
        } => {
            let skills = client.list_skills().await?;
            let stats = SkillStats::from_skills(&skills);

            println!(
                "{} skills, {} hours total (started {}, in progress {}, completed {})",
                stats.total_skills,
                format_hours(stats.total_hours),
                stats.count(Progress::Started),
                stats.count(Progress::InProgress),
                stats.count(Progress::Completed)
            );

            let mut shown =
                filter_by_progress(filter_skills(&skills, search.as_deref().unwrap_or("")), progress);
            sort_skills(&mut shown, sort);
            if shown.is_empty() {
                println!("No skills found.");
            }
            for skill in shown {
                println!(
                    "{:<8} {:<30} {:<12} {:>6}h  {}",
                    truncate_string(&skill.id, 8),
                    truncate_string(&skill.name, 30),
                    skill.progress.as_deref().unwrap_or("-"),
                    format_hours(skill.hours_spent.unwrap_or(0.0)),
                    skill.platform.as_deref().unwrap_or("")
                );
            }
        }
        SkillCommands::Add {
            name,
            resource_type,
            platform,
            progress,
            hours,
            difficulty,
            notes,
        } => {
            let skill = NewSkill {
                name: name.trim().to_string(),
                resource_type,
                platform,
                progress,
                hours_spent: hours,
                difficulty,
                notes: notes.unwrap_or_default(),
            };
            let created = client.create_skill(&skill).await?;
            println!("✅ Added skill \"{}\", id {}", created.name, created.id);
        }
        SkillCommands::Update {
            id,
            name,
            resource_type,
            platform,
            progress,
            hours,
            difficulty,
            notes,
        } => {
            let patch = SkillPatch {
                name,
                resource_type,
                platform,
                progress,
                hours_spent: hours,
                difficulty,
                notes,
            };
            if patch.is_empty() {
                return Err(anyhow!("Nothing to update. Pass at least one field."));
            }
            let updated = client.update_skill(&id, &patch).await?;
            println!("✅ Updated skill \"{}\"", updated.name);
        }
        SkillCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete skill {}?", id))? {
                println!("Operation cancelled.");
                return Ok(());
            }
            client.delete_skill(&id).await?;
            println!("✅ Skill {} deleted", id);
        }
    }

    Ok(())
}

fn handle_config(
    effective: &Config,
    api_url: Option<String>,
    locale: Option<String>,
) -> Result<()> {
    let path = Config::get_config_path();

    if api_url.is_none() && locale.is_none() {
        match &path {
            Some(path) => println!("Config file: {}", path.display()),
            None => println!("Config file: (no config directory available)"),
        }
        println!("{}", serde_json::to_string_pretty(effective)?);
        return Ok(());
    }

    // Start from the stored file so environment overrides are not persisted
    let mut config = match &path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    if let Some(url) = api_url {
        config.override_api_url(&url);
    }
    if let Some(locale) = locale {
        config.locale = Some(locale.trim().to_string()).filter(|l| !l.is_empty());
    }

    config.save()?;
    println!("✅ Configuration saved");
    Ok(())
}

/// Ask a yes/no question on stdin; only "y" confirms
fn confirm(question: &str) -> Result<bool> {
    println!("{} (y/N)", question);

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(score: Option<f64>) -> Recommendation {
        Recommendation {
            title: "The Rust Book".to_string(),
            platform: "rust-lang.org".to_string(),
            url: None,
            score,
        }
    }

    #[test]
    fn test_recommendation_line_with_score() {
        assert_eq!(
            recommendation_line(1, &recommendation(Some(0.8312))),
            "1. The Rust Book (rust-lang.org) score 0.83"
        );
    }

    #[test]
    fn test_recommendation_line_without_score() {
        assert_eq!(
            recommendation_line(2, &recommendation(None)),
            "2. The Rust Book (rust-lang.org)"
        );
    }

    #[test]
    fn test_connect_checks_url() {
        let mut config = Config::default();
        assert!(connect(&config).is_ok());

        config.api_url = "localhost:8000".to_string();
        assert!(connect(&config).is_err());
    }
}
