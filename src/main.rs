//! Ringbite CLI
//!
//! Usage:
//!   ringbite --script round.txt             # Run a round script
//!   ringbite --interactive                  # Type script commands live
//!   ringbite --serve                        # HTTP API server
//!   ringbite --script round.txt --json      # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use ringbite::core::{
    load_config, load_frame_table, run_server, save_record, Round, ScriptDriver, ScriptParser,
};
use ringbite::types::{
    BiteMode, EligibilityPolicy, FrameTable, MouthConfig, RoundOutcome, RoundRecord, RoundSnapshot,
    ScriptCommand,
};
use ringbite::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "ringbite",
    version = VERSION,
    about = "Ringbite - steal the ring before the mouth bites",
    long_about = "Ringbite drives the mouth state machine from a script, from stdin\n\
                  or over HTTP.\n\n\
                  Script commands (one per line, # comments):\n  \
                  finger X Y     Move the finger tip\n  \
                  ring X Y       Move the ring\n  \
                  tick DT [xN]   Advance N steps of DT seconds\n  \
                  enter | exit   Finger entered / left the mouth zone\n  \
                  touch          Pull the ring\n  \
                  bite           Force a bite\n  \
                  restart        Start the round over\n\n\
                  Phases:\n  \
                  IDLE, ALERT_CLOSING, ALERT_OPENING,\n  \
                  FINGER_INSIDE_COUNTING, BITE_CHOMPING, RING_COLLECTED"
)]
struct Args {
    /// Round script to run
    #[arg(long)]
    script: Option<String>,

    /// Read script commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// MouthConfig JSON file
    #[arg(long)]
    config: Option<String>,

    /// Frame table JSON file
    #[arg(long)]
    frames: Option<String>,

    /// Generated frame count when no frame file is given
    #[arg(long, default_value_t = 6)]
    frame_count: usize,

    /// Collection eligibility policy
    #[arg(long, value_enum)]
    policy: Option<EligibilityPolicy>,

    /// What a finger entering the mouth does
    #[arg(long, value_enum)]
    bite_mode: Option<BiteMode>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,

    /// Directory for round records (default: ./records)
    #[arg(long, default_value = "./records")]
    record_dir: String,

    /// Do not save round records
    #[arg(long)]
    no_record: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if args.serve {
        run_serve(&args, config).await;
        return;
    }

    let frames = match build_frames(&args) {
        Ok(frames) => frames,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let driver = ScriptDriver::new(Round::new(config, Some(frames)));

    if let Some(ref path) = args.script {
        run_script(path, driver, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(driver, &args);
    }
}

/// Logs go to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "ringbite=debug" } else { "ringbite=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<MouthConfig, String> {
    let mut config = match args.config {
        Some(ref path) => load_config(path).map_err(|e| format!("config {}: {}", path, e))?,
        None => MouthConfig::default(),
    };
    if let Some(policy) = args.policy {
        config = config.with_eligibility(policy);
    }
    if let Some(mode) = args.bite_mode {
        config = config.with_bite_mode(mode);
    }
    debug!(?config, "mouth config");
    Ok(config)
}

fn build_frames(args: &Args) -> Result<FrameTable, String> {
    match args.frames {
        Some(ref path) => load_frame_table(path).map_err(|e| format!("frames {}: {}", path, e)),
        None => FrameTable::uniform(args.frame_count).map_err(|e| format!("frame count: {}", e)),
    }
}

/// Run a script file start to finish
fn run_script(path: &str, mut driver: ScriptDriver, args: &Args) {
    let commands = match ScriptParser::new().parse_file(path) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(2);
        }
    };

    if !args.json {
        print_header("Script", args.no_color);
    }
    for command in &commands {
        run_command(&mut driver, command, args);
    }
    finish_round(&driver, args);
}

/// Read script commands from stdin, one per line
fn run_interactive(mut driver: ScriptDriver, args: &Args) {
    let parser = ScriptParser::new();

    print_header("Interactive", args.no_color);
    println!("Type script commands (finger X Y, tick 0.1, enter, touch, ...). Type 'quit' to exit.");
    println!("Goal: pull the ring out before the mouth bites.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(driver.round(), args.no_color));
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
            break;
        }

        match parser.parse_line(line) {
            Ok(Some(command)) => run_command(&mut driver, &command, args),
            Ok(None) => {}
            Err(reason) => println!("  {}", reason),
        }
    }

    println!("\nRound ended. Steps: {}", driver.round().steps());
    finish_round(&driver, args);
}

fn run_command(driver: &mut ScriptDriver, command: &ScriptCommand, args: &Args) {
    // Keep the finished round on disk before it is thrown away
    if *command == ScriptCommand::Restart && driver.round().steps() > 0 {
        store_record(driver.round(), args);
    }

    let was_ended = driver.round().outcome().is_ended();
    for snapshot in driver.apply(command) {
        print_snapshot(&snapshot, args);
    }
    let outcome = driver.round().outcome();
    if !was_ended && outcome.is_ended() && !args.json {
        print_outcome(outcome, args.no_color);
    }
}

fn finish_round(driver: &ScriptDriver, args: &Args) {
    if driver.round().steps() > 0 {
        store_record(driver.round(), args);
    }
}

fn store_record(round: &Round, args: &Args) {
    if args.no_record {
        return;
    }
    let record = RoundRecord::from_round(round);
    match save_record(&record, &args.record_dir) {
        Ok(path) => {
            if !args.json {
                println!("Record saved: {}", path);
            }
        }
        Err(e) => warn!(error = %e, "record not saved"),
    }
}

fn print_snapshot(snapshot: &RoundSnapshot, args: &Args) {
    if args.json {
        match serde_json::to_string(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "snapshot not serializable"),
        }
    } else if args.no_color {
        println!(
            "step={} | outcome={} | {}",
            snapshot.step,
            snapshot.outcome,
            snapshot.mouth.to_parseable_string()
        );
    } else {
        println!("[{:>4}] {}", snapshot.step, snapshot.mouth.to_terminal_string());
        if snapshot.retry_prompt_visible {
            println!("{}", "  ↻ Try again? (restart)".bright_black());
        }
    }
}

fn print_outcome(outcome: RoundOutcome, no_color: bool) {
    let line = match outcome {
        RoundOutcome::Won => "  ✓ RING COLLECTED - you win",
        RoundOutcome::Bitten => "  ✗ BITTEN - the mouth got you",
        RoundOutcome::Playing => return,
    };
    if no_color {
        println!("{}", line);
    } else if outcome == RoundOutcome::Won {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("  Ringbite v{} - {}", VERSION, mode);
    println!("========================================");
    if no_color {
        println!("{}", title);
    } else {
        println!("{}", title.bold());
    }
    println!("========================================");
    println!();
}

/// Format interactive prompt
fn format_prompt(round: &Round, no_color: bool) -> String {
    let phase = round.mouth().phase();
    if no_color {
        return format!("[{}] > ", phase);
    }
    let marker = if phase.is_threatening() { "!" } else { " " };
    format!("{}{} [{}] > ", phase.emoji(), marker, phase)
        .color(phase.color())
        .to_string()
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: MouthConfig) {
    println!();
    print_header("API Server", args.no_color);

    if let Err(e) = run_server(&args.addr, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
