//! codebox - highlight and complete text in the terminal
//!
//! Opens FILE in a small editor with live line highlighting and a
//! completion popup fed from a dictionary file, or prints the highlighted
//! file with `--print`.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codebox::terminal::{self, Terminal, CELL_HEIGHT, CELL_WIDTH};
use codebox::{load_dictionary, CodeBox, CodeBoxError, Config, Key, KeyOutcome, MemoryHost, Result};

const STATUS: &str = "C-q quit | Up/Down pick | RET/SPC accept | ESC dismiss";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    print: bool,
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--print" | "-p" => args.print = true,
            "--config" | "-c" => args.config = Some(flag_value(&mut iter, &arg)?),
            "--dictionary" | "-d" => args.dictionary = Some(flag_value(&mut iter, &arg)?),
            _ if arg.starts_with('-') => {
                return Err(CodeBoxError::Message(format!("Unknown option: {}", arg)));
            }
            _ => args.file = Some(PathBuf::from(arg)),
        }
    }
    Ok(Some(args))
}

fn flag_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf> {
    iter.next()
        .map(PathBuf::from)
        .ok_or_else(|| CodeBoxError::Message(format!("{} requires a file argument", flag)))
}

fn run() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let text = match &args.file {
        Some(path) if path.exists() => fs::read_to_string(path)?,
        _ => String::new(),
    };

    let host = MemoryHost::with_text(&text).with_cell_size(CELL_WIDTH, CELL_HEIGHT);
    let mut code_box = CodeBox::new(host, &config)?;
    let guard = code_box.suppression();
    code_box.host_mut().bind(guard);

    if let Some(path) = &args.dictionary {
        let words = load_dictionary(path)?;
        info!("Loaded {} dictionary entries from {}", words.len(), path.display());
        code_box.set_dictionary(words);
    }

    code_box.highlight_all();

    if args.print {
        let stdout = io::stdout();
        return terminal::write_highlighted(&mut stdout.lock(), code_box.host());
    }

    let mut terminal = Terminal::new()?;
    edit(&mut terminal, &mut code_box)
}

/// Interactive loop: route keys through the core, then apply the ones it
/// leaves alone to the buffer
fn edit(terminal: &mut Terminal, code_box: &mut CodeBox<MemoryHost>) -> Result<()> {
    loop {
        terminal.draw(code_box.host(), STATUS)?;

        let Some(key) = Key::from_event(terminal.read_key()?) else {
            continue;
        };
        if key == Key::Ctrl('q') {
            return Ok(());
        }

        if code_box.on_key_down(key) == KeyOutcome::Ignored && apply_key(code_box.host_mut(), key) {
            code_box.on_text_changed();
        }
        code_box.on_key_up(key);

        // Notices only matter to tests
        code_box.host_mut().take_notices();
    }
}

/// Apply a key's default action; returns whether the text changed
fn apply_key(host: &mut MemoryHost, key: Key) -> bool {
    match key {
        Key::Char(ch) => host.type_str(ch.encode_utf8(&mut [0; 4])),
        Key::Space => host.type_str(" "),
        Key::Enter => host.type_str("\n"),
        Key::Backspace => {
            let before = host.char_len();
            host.backspace();
            return host.char_len() != before;
        }
        Key::Left => {
            host.move_caret(-1);
            return false;
        }
        Key::Right => {
            host.move_caret(1);
            return false;
        }
        Key::Up => {
            host.move_caret_lines(-1);
            return false;
        }
        Key::Down => {
            host.move_caret_lines(1);
            return false;
        }
        Key::Escape | Key::Ctrl(_) | Key::Other => return false,
    }
    true
}

fn print_usage() {
    println!("codebox {} - highlighting and completion for plain text", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codebox [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -c, --config FILE      Read settings from FILE instead of ~/.codebox.toml");
    println!("  -d, --dictionary FILE  Completion candidates, one per line");
    println!("  -p, --print            Print FILE highlighted and exit");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!();
    println!("Key bindings:");
    println!("  Up, Down       Move in the suggestion list (or between lines)");
    println!("  RET, SPC       Accept the highlighted suggestion");
    println!("  ESC            Dismiss the suggestion list");
    println!("  C-q            Quit");
    println!();
    println!("Set RUST_LOG=debug for diagnostics on stderr");
}

fn print_version() {
    println!("codebox {}", env!("CARGO_PKG_VERSION"));
}
