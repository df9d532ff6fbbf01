//! Genealogy Tree CLI tool
//!
//! A command-line tool for turning family records into LaTeX node entries.

use std::process;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use gentree::clock::{Clock, FixedClock, SystemClock};
use gentree::date::{parse_date, ParsedDate, Precision};
use gentree::latex::{render_with, RenderOptions};
use gentree::person::{estimate_age, Parents, Person, PersonRecord, RandomPlaceholders};
use gentree::records::{expand_globs, load_records};

/// Genealogy Tree - Render family records as LaTeX
#[derive(Parser)]
#[command(name = "gentree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Render one person
    gentree render --name Gianni --surname Armani --sex male --birth 2000 --death 3/03/2100

    # Render every record file in a folder, with profession and comment lines
    gentree file --full \"records/*.toml\"

    # Check how a date is read
    gentree date 06.1884

    # Estimate an age as of a given day
    gentree age 1884-06-19 --today 1900-01-01")]
struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single person given on the command line
    Render {
        #[command(flatten)]
        person: PersonArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render every person in TOML record files
    File {
        /// Record files. Supports glob patterns like "records/*.toml"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Precede each entry with a "% id: ..." comment line
        #[arg(long)]
        ids: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show how a date string is parsed
    Date {
        /// Date as written in the record (e.g. "1884-06-19", "06.1884", "1884")
        date: String,
    },

    /// Estimate an age from a birth date and an optional death date
    Age {
        /// Birth date
        birth: String,

        /// Death date; today is used when omitted
        death: Option<String>,

        /// Date to use as today (YYYY-MM-DD, DD.MM.YYYY or DD/MM/YYYY)
        #[arg(long)]
        today: Option<String>,
    },
}

/// Fields of a person record
#[derive(Args)]
struct PersonArgs {
    /// Given name
    #[arg(long)]
    name: Option<String>,

    /// Family name
    #[arg(long)]
    surname: Option<String>,

    /// Nickname, rendered with \nick{}
    #[arg(long)]
    nickname: Option<String>,

    /// Sex keyword for the node (e.g. male, female)
    #[arg(long)]
    sex: Option<String>,

    /// Birth date
    #[arg(long)]
    birth: Option<String>,

    /// Birth place or other details
    #[arg(long)]
    birth_details: Option<String>,

    /// Extra birth entry; renders the key as birth+
    #[arg(long)]
    birth_plus: Option<String>,

    /// Death date
    #[arg(long)]
    death: Option<String>,

    /// Death place or other details
    #[arg(long)]
    death_details: Option<String>,

    /// Extra death entry; renders the key as death+
    #[arg(long)]
    death_plus: Option<String>,

    /// Occupation
    #[arg(long)]
    work: Option<String>,

    /// Occupation details
    #[arg(long)]
    work_details: Option<String>,

    /// Free-text comment
    #[arg(long)]
    comment: Option<String>,
}

impl From<PersonArgs> for PersonRecord {
    fn from(args: PersonArgs) -> Self {
        PersonRecord {
            name: args.name,
            surname: args.surname,
            nickname: args.nickname,
            sex: args.sex,
            birth_date: args.birth,
            birth_details: args.birth_details,
            birth_plus: args.birth_plus,
            death_date: args.death,
            death_details: args.death_details,
            death_plus: args.death_plus,
            work: args.work,
            work_details: args.work_details,
            comment: args.comment,
        }
    }
}

/// Options shared by the rendering commands
#[derive(Args)]
struct OutputArgs {
    /// Also render profession and comment lines
    #[arg(long)]
    full: bool,

    /// Seed for placeholder ids of records with missing name, surname or birth date
    #[arg(long)]
    seed: Option<u64>,

    /// Date to use as today for living persons (YYYY-MM-DD, DD.MM.YYYY or DD/MM/YYYY)
    #[arg(long)]
    today: Option<String>,
}

impl OutputArgs {
    fn render_options(&self) -> RenderOptions {
        if self.full {
            RenderOptions::full()
        } else {
            RenderOptions::default()
        }
    }

    fn placeholders(&self) -> RandomPlaceholders {
        match self.seed {
            Some(seed) => RandomPlaceholders::seeded(seed),
            None => RandomPlaceholders::from_entropy(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Render { person, output } => cmd_render(person, output),
        Commands::File { inputs, ids, output } => cmd_file(inputs, ids, output),
        Commands::Date { date } => cmd_date(&date),
        Commands::Age { birth, death, today } => {
            cmd_age(&birth, death.as_deref(), today.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Install a stderr subscriber; RUST_LOG overrides the given level
fn init_logging(level: &str) {
    let level = parse_level(level).unwrap_or(LevelFilter::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

/// Resolve --today into a clock
fn clock_for(today: Option<&str>) -> Result<Box<dyn Clock>> {
    match today {
        None => Ok(Box::new(SystemClock)),
        Some(text) => Ok(Box::new(FixedClock(parse_today(text)?))),
    }
}

/// Parse an explicit "today"; only full dates make sense here
fn parse_today(text: &str) -> Result<NaiveDate> {
    let parsed = parse_date(text).with_context(|| format!("Invalid --today value: {}", text))?;
    if parsed.precision() != Precision::Day {
        bail!("--today needs a full date, got {}", text);
    }
    Ok(parsed.date)
}

/// Render a single person from command-line fields
fn cmd_render(person: PersonArgs, output: OutputArgs) -> Result<()> {
    let clock = clock_for(output.today.as_deref())?;
    let mut placeholders = output.placeholders();

    let person = Person::build(
        person.into(),
        Parents::default(),
        clock.as_ref(),
        &mut placeholders,
    )
    .context("Failed to build person")?;

    print!("{}", render_with(&person, &output.render_options()));
    Ok(())
}

/// Render all records from the matched files
fn cmd_file(inputs: Vec<String>, ids: bool, output: OutputArgs) -> Result<()> {
    let paths = expand_globs(&inputs)?;
    let clock = clock_for(output.today.as_deref())?;
    let mut placeholders = output.placeholders();
    let options = output.render_options();

    let mut first = true;
    for path in &paths {
        let records = load_records(path)?;
        info!(path = %path.display(), count = records.len(), "rendering records");

        for (index, record) in records.into_iter().enumerate() {
            let person =
                Person::build(record, Parents::default(), clock.as_ref(), &mut placeholders)
                    .with_context(|| format!("{}: person #{}", path.display(), index + 1))?;

            if !first {
                println!();
            }
            first = false;

            if ids {
                println!("% id: {}", person.id());
            }
            print!("{}", render_with(&person, &options));
        }
    }

    Ok(())
}

/// Show the parsed form of a date
fn cmd_date(text: &str) -> Result<()> {
    let parsed = parse_date(text)?;

    println!("Date: {}", parsed.date);
    println!("Format: {}", parsed.pattern.format());
    println!("Precision: {:?}", parsed.precision());

    Ok(())
}

/// Print an estimated age
fn cmd_age(birth: &str, death: Option<&str>, today: Option<&str>) -> Result<()> {
    let start = parse_date(birth).context("Invalid birth date")?;
    let end = match death {
        Some(death) => parse_date(death).context("Invalid death date")?,
        None => ParsedDate::today(clock_for(today)?.today()),
    };

    println!("{}", estimate_age(&start, &end));
    Ok(())
}
