// Linen: lexer, parser and syntax tree browser

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use linen::parser::constants::DEMO_SOURCE_LENGTH;
use linen::parser::printer::{format_tokens, format_tree};
use linen::parser::{analyze_source, SourceError};
use linen::ui::App;

/// Command-line options
struct Options {
    path: String,
    max_length: usize,
    dump: bool,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} <file.lnn> [--max-length N] [--dump]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --max-length N   refuse sources longer than N bytes (default {})",
        DEMO_SOURCE_LENGTH
    );
    eprintln!("  --dump           print tokens and syntax tree instead of opening the browser");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/control_flow.lnn", program_name);
    eprintln!("  {} demos/control_flow.lnn --dump", program_name);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut max_length = DEMO_SOURCE_LENGTH;
    let mut dump = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dump" => dump = true,
            "--max-length" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--max-length needs a value".to_string())?;
                max_length = value
                    .parse()
                    .map_err(|_| format!("Invalid --max-length value '{}'", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            file if path.is_none() => path = Some(file.to_string()),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let path = path.ok_or_else(|| "No input file provided".to_string())?;
    Ok(Options {
        path,
        max_length,
        dump,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("linen");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            process::exit(1);
        }
    };

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path);
        usage(program_name);
        process::exit(1);
    }

    // Read source code; the lexer only understands '\n' line ends
    let source = fs::read_to_string(&options.path)?.replace("\r\n", "\n");

    eprintln!("Parsing {}...", options.path);
    let analysis = analyze_source(&source, options.max_length);

    match &analysis.program {
        Ok(program) => eprintln!(
            "Parsed successfully. Found {} top-level statements.",
            program.len()
        ),
        Err(SourceError::Lexical(errors)) => {
            for e in errors {
                eprintln!("{}", e);
            }
            eprintln!("{} lexical error(s); syntax tree not built.", errors.len());
        }
        Err(SourceError::Syntax(e)) => eprintln!("{}", e),
    }

    if options.dump {
        println!("{}", format_tokens(&analysis.tokens));
        if let Ok(program) = &analysis.program {
            print!("{}", format_tree(program));
        }
        if !analysis.is_ok() {
            process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source, analysis);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
