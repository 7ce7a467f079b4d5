// bftty: threaded brainfuck interpreter with a live terminal debugger

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bftty::config::{Config, ConfigError};
use bftty::interpreter::constants::{DEFAULT_CELL_COUNT, DEFAULT_DELAY};
use bftty::interpreter::headless::{run_headless, StdioPort};
use bftty::interpreter::runner::Engine;
use bftty::memory::CellWidth;
use bftty::parser::loader;
use bftty::ui::App;

#[derive(Parser, Debug)]
#[command(name = "bftty")]
#[command(about = "Run a brainfuck program, optionally inside a live debugger", long_about = None)]
#[command(disable_help_flag = true)]
struct Cli {
    /// A file containing a brainfuck program, or "-" to read from stdin
    program: PathBuf,

    /// Don't show the debugger; run over stdin/stdout
    #[arg(short = 'n', long, action = ArgAction::SetTrue)]
    no_curses: bool,

    /// Start in step-by-step mode
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug_mode: bool,

    /// Run at the highest speed possible
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    highest_speed: bool,

    /// Delay between instructions in microseconds; a positive multiple of 10
    #[arg(short = 'u', long, value_name = "USECS")]
    delay: Option<u64>,

    /// Extra instruction characters, e.g. '?' for random fill
    #[arg(short = 's', long, value_name = "CHARS", default_value = "")]
    support: String,

    /// Number of tape cells
    #[arg(long, default_value_t = DEFAULT_CELL_COUNT)]
    cells: usize,

    /// Cell width in bits (8, 16 or 32)
    #[arg(long, default_value_t = 8)]
    cell_bits: u32,

    /// Seed for the random-fill instruction
    #[arg(long)]
    seed: Option<u64>,

    /// The program is already run-length encoded
    #[arg(long, action = ArgAction::SetTrue)]
    encoded: bool,

    /// Write the run-length encoded program to this file
    #[arg(short = 'o', long, value_name = "PATH")]
    emit_encoded: Option<PathBuf>,

    /// Exit after writing the encoded program
    #[arg(short = 'x', long = "exit", action = ArgAction::SetTrue)]
    exit_after_emit: bool,

    /// Overwrite the --emit-encoded file if it exists
    #[arg(short = 'f', long, action = ArgAction::SetTrue)]
    force_write: bool,

    /// Write logs to this file (the debugger otherwise discards them)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn to_config(&self) -> Result<Config, ConfigError> {
        let cell_width =
            CellWidth::from_bits(self.cell_bits).ok_or(ConfigError::InvalidCellWidth(self.cell_bits))?;

        let delay = match self.delay {
            Some(micros) => Config::parse_delay(micros)?,
            None if self.highest_speed || self.no_curses => Duration::ZERO,
            None => DEFAULT_DELAY,
        };

        let config = Config {
            headless: self.no_curses,
            cell_count: self.cells,
            cell_width,
            delay,
            start_paused: self.debug_mode,
            extensions: self.support.clone(),
            seed: self.seed,
            encoded: self.encoded,
            emit_encoded: self.emit_encoded.clone(),
            exit_after_emit: self.exit_after_emit,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(headless: bool, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bftty=warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // Anything written to the terminal would tear through the debugger
        None if headless => builder.with_writer(io::stderr).init(),
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

/// Read the program from a file or stdin, filtered unless already encoded
fn read_program(path: &Path, config: &Config) -> Result<Vec<u8>, bftty::parser::LoadError> {
    let mut reader: Box<dyn Read> = if path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(path)?)
    };

    if config.encoded {
        let mut source = Vec::new();
        reader.read_to_end(&mut source)?;
        Ok(source)
    } else {
        loader::load(reader, &config.alphabet()?)
    }
}

fn write_encoded(path: &Path, encoded: &[u8], overwrite: bool) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path)?.write_all(encoded)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    init_tracing(config.headless, cli.log_file.as_deref())?;

    let source = match read_program(&cli.program, &config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: {}", cli.program.display(), e);
            process::exit(2);
        }
    };
    info!(bytes = source.len(), "program loaded");

    if let Some(path) = &config.emit_encoded {
        let encoded = config.encode(&source);
        if let Err(e) = write_encoded(path, &encoded, cli.force_write) {
            eprintln!("{}: {}", path.display(), e);
            process::exit(1);
        }
        info!(path = %path.display(), bytes = encoded.len(), "encoded program written");
        if config.exit_after_emit {
            return Ok(());
        }
    }

    let program = match config.build_program(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", cli.program.display(), e);
            process::exit(2);
        }
    };
    let program_text = program.text().to_vec();
    let mut interpreter = config.build_interpreter(program);

    if config.headless {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut port = StdioPort::new(stdin.lock(), BufWriter::new(stdout.lock()));
        if let Err(e) = run_headless(&mut interpreter, &mut port, config.delay) {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
        return Ok(());
    }

    let (engine, controller) = Engine::new(interpreter, config.engine_options());
    let engine_thread = engine.spawn()?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller.clone(), program_text, config.cell_width);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.stop();
    if engine_thread.join().is_err() {
        error!("execution thread panicked");
    }

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
