//! Discourse CLI
//!
//! Usage:
//!   discourse --text "your text here"        # Single turn
//!   discourse --interactive                  # Chat loop (default)
//!   discourse --serve                        # HTTP API server
//!   discourse --text "text" --json           # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use discourse_engine::core::{run_server, ConversationSession};
use discourse_engine::types::{EngineStats, TurnReport};
use discourse_engine::{EngineConfig, EngineError, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "discourse",
    version = VERSION,
    about = "Discourse engine - classify, track and shape conversational turns",
    long_about = "Turn-based conversational pipeline.\n\n\
                  Each utterance is classified (intent, topic, sentiment,\n\
                  complexity, flow), tracked against the running topic, and\n\
                  answered with a shaped reply.\n\n\
                  Modes:\n  \
                  --text         Single turn\n  \
                  --interactive  Chat loop, 'quit' or 'exit' to leave\n  \
                  --serve        HTTP API server mode\n\n\
                  Logging follows RUST_LOG and goes to stderr."
)]
struct Args {
    /// Text to answer (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive chat loop reading lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal and shaping breakdown
    #[arg(long)]
    verbose: bool,

    /// Fixed RNG seed for reproducible replies
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// stderr subscriber; RUST_LOG wins over the mode default
fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "discourse_engine=debug,info"
    } else if args.serve {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

async fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    if args.serve {
        run_serve(args, config).await
    } else if args.interactive {
        run_interactive(args, &config)
    } else if let Some(ref text) = args.text {
        run_single(text, args, &config)
    } else {
        // Default to interactive if no mode specified
        run_interactive(args, &config)
    }
}

/// Config file first, then CLI overrides
fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Run a single turn
fn run_single(text: &str, args: &Args, config: &EngineConfig) -> Result<()> {
    let mut session = ConversationSession::new(config);
    let report = session.respond(text)?;
    print_report(&report, args)
}

/// Run the interactive chat loop
fn run_interactive(args: &Args, config: &EngineConfig) -> Result<()> {
    let mut session = ConversationSession::new(config);

    print_header("Chat Mode");
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(&session));
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match session.respond(line) {
            Ok(report) => print_report(&report, args)?,
            Err(EngineError::EmptyUtterance) => continue,
            Err(e) => return Err(e),
        }
    }

    print_summary(session.stats());
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: EngineConfig) -> Result<()> {
    print_header("API Server");
    println!("Listening on {}", args.addr.bold());
    println!();
    run_server(&args.addr, config).await
}

fn print_report(report: &TurnReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(report)?);
    } else if args.verbose {
        print_verbose(report);
    } else if args.no_color {
        println!("{}", report.to_parseable_string());
    } else {
        println!("{}", report.to_terminal_string());
    }
    Ok(())
}

/// Print header
fn print_header(mode: &str) {
    let title = format!("  Discourse v{} - {}", VERSION, mode);
    println!("{}", "========================================".bold());
    println!("{}", title.bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Prompt showing the running topic and depth
fn format_prompt(session: &ConversationSession) -> String {
    let tracker = session.tracker();
    if tracker.is_fresh() {
        return format!("{} > ", "[new]".bright_black());
    }
    let label = format!("[{} | depth={}]", tracker.current_topic(), tracker.topic_depth());
    format!("{} > ", label.cyan())
}

/// Signal and shaping breakdown for one turn
fn print_verbose(report: &TurnReport) {
    let signal = &report.signal;
    let rule = "+--------------------------------------".bright_black();

    println!("{}", rule);
    println!("| intent:      {}", signal.intent);
    println!("| topic:       {} (depth {})", signal.topic, report.topic_depth);
    println!("| sentiment:   {}", signal.sentiment);
    println!("| complexity:  {}", signal.complexity);
    println!("| flow:        {}", signal.conversation_flow);
    println!("| follow-up:   {}", signal.requires_follow_up);
    println!("{}", rule);
    println!("| path:        {}", report.path);
    if let Some(optimized) = &report.optimized {
        println!("| tone:        {}", optimized.tone);
        println!("| duration:    ~{}s", optimized.estimated_duration_seconds);
        if let Some(question) = &optimized.follow_up_question {
            println!("| question:    {}", question);
        }
    }
    if report.transition_applied {
        println!("| bridge:      {}", "yes".yellow());
    }
    println!("| took:        {}ms", report.processing_ms);
    println!("{}", rule);
    println!("{}", report.reply);
}

fn print_summary(stats: &EngineStats) {
    println!();
    println!(
        "Session ended. Turns: {} | switches: {} | cache hits: {} ({:.0}%) | avg {:.1}ms",
        stats.conversation_turns,
        stats.topic_switches,
        stats.cache_hits,
        stats.cache_hit_rate() * 100.0,
        stats.average_response_ms,
    );
    if !stats.active_topics.is_empty() {
        println!("Recent topics: {}", stats.active_topics.join(", "));
    }
}
