//! bf-runtime - CLI Entry Point
//!
//! Commands:
//! - `bf-runtime run <program>` - Run a program file
//! - `bf-runtime check <program>` - Validate a program file
//! - `bf-runtime test` - Built-in self-test

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bf-runtime")]
#[command(version)]
#[command(about = "An interpreter for the eight-instruction tape language")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program to completion
    Run {
        /// Path to the program source
        program: String,
        /// Input text consumed by `,`
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,
        /// Read input text from a file
        #[arg(long)]
        input_file: Option<String>,
        /// JSON file with setting overrides
        #[arg(short, long)]
        config: Option<String>,
        /// Number of tape cells
        #[arg(long)]
        cells: Option<usize>,
        /// End-of-input behavior: zero, negative-one or nop
        #[arg(long)]
        eof: Option<bfrt::EofMode>,
        /// Keep `#` as a debug dump instruction
        #[arg(long)]
        debug_marker: bool,
        /// Stop after this many instructions
        #[arg(long)]
        max_steps: Option<u64>,
        /// Engine: basic or jump-table
        #[arg(short, long, default_value = "basic")]
        engine: bfrt::EngineKind,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a program without running it
    Check {
        /// Path to the program source
        program: String,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Run {
            program,
            input,
            input_file,
            config,
            cells,
            eof,
            debug_marker,
            max_steps,
            engine,
            json,
        }) => {
            let opts = RunOptions {
                input,
                input_file,
                config,
                cells,
                eof,
                debug_marker,
                max_steps,
                engine,
                json,
            };
            run_program(&program, opts);
        }
        Some(Commands::Check { program }) => {
            check_program(&program);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("bf-runtime v{}", env!("CARGO_PKG_VERSION"));
            println!("An interpreter for the eight-instruction tape language");
            println!();
            println!("Use --help for available commands");
        }
    }
}

struct RunOptions {
    input: Option<String>,
    input_file: Option<String>,
    config: Option<String>,
    cells: Option<usize>,
    eof: Option<bfrt::EofMode>,
    debug_marker: bool,
    max_steps: Option<u64>,
    engine: bfrt::EngineKind,
    json: bool,
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn run_program(path: &str, opts: RunOptions) {
    use bfrt::{ExecutionControl, Overrides, Runtime, BasicParser, stringify_result};

    let source = read_file(path);

    let input = match (opts.input, opts.input_file) {
        (Some(text), _) => text,
        (None, Some(file)) => read_file(&file),
        (None, None) => String::new(),
    };

    // File overrides first, flags on top
    let mut overrides = match opts.config {
        Some(config_path) => match Overrides::load(&config_path) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("❌ Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => Overrides::none(),
    };
    if let Some(cells) = opts.cells {
        overrides = overrides.tape_length(cells);
    }
    if let Some(mode) = opts.eof {
        overrides = overrides.eof_mode(mode);
    }
    if opts.debug_marker {
        overrides = overrides.debug_marker(true);
    }

    let mut control = ExecutionControl::unbounded();
    if let Some(limit) = opts.max_steps {
        control = control.with_max_steps(limit);
    }

    let mut runtime = Runtime::with_parts(source, input, &overrides, BasicParser, opts.engine)
        .with_control(control);
    let result = runtime.run();

    if opts.json {
        match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to encode result: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", stringify_result(result));
    }

    if !result.is_success() {
        std::process::exit(1);
    }
}

fn check_program(path: &str) {
    use bfrt::{parse_source, Settings};

    let source = read_file(path);

    match parse_source(&source, &Settings::default()) {
        Ok(program) => {
            println!("✓ {} instructions ({} source characters)",
                program.len(), program.original().chars().count());
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn run_self_test() {
    use bfrt::{EngineKind, EofMode, Overrides, Runtime, RunResult, BasicParser};

    println!("━━━ bf-runtime Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let cases: [(&str, &str, &str, Overrides, RunResult); 5] = [
        (
            "Hello World",
            "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.",
            "",
            Overrides::none(),
            RunResult::success("Hello World!\n"),
        ),
        (
            "Obscure problems",
            "[]++++++++++[>>+>+>++++++[<<+<+++>>>-]<<<<-]\"A*$\";?@![#>>+<<]>[>>]<<<<[>++<[-]]>.>.",
            "",
            Overrides::none(),
            // Usually quoted as "H"; the final `>.` also prints a newline
            RunResult::success("H\n"),
        ),
        (
            "Unbalanced bracket",
            "]",
            "",
            Overrides::none(),
            RunResult::failure("Imbalanced brackets detected!"),
        ),
        (
            "Echo input",
            ",[.,]",
            "echo",
            Overrides::none(),
            RunResult::success("echo"),
        ),
        (
            "EOF leaves cell unchanged",
            "+++,.",
            "",
            Overrides::none().eof_mode(EofMode::Nop),
            RunResult::success("\u{3}"),
        ),
    ];

    for (name, source, input, overrides, expected) in cases.iter() {
        for kind in [EngineKind::Basic, EngineKind::JumpTable] {
            print!("{} ({:?})... ", name, kind);
            let mut rt = Runtime::with_parts(*source, *input, overrides, BasicParser, kind);
            let got = rt.run();
            if got == expected {
                println!("✓");
                passed += 1;
            } else {
                println!("✗ (got {:?}, expected {:?})", got, expected);
                failed += 1;
            }
        }
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
