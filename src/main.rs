mod commands;
mod config;
mod error;
mod icons;
mod logging;
mod picker;
mod snippet;
mod ui;
mod vault;

use std::io;
use std::path::PathBuf;
use std::env;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::time::Duration;
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use crate::icons::{IconRegistry, IconSet};
use crate::picker::{IconPicker, SuggestModal};
use crate::ui::app::{App, Screen};
use crate::ui::theme::Theme;
use crate::vault::Vault;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("calloutmd {} - Callout tag snippet generator and icon picker", VERSION);
    println!();
    println!("USAGE:");
    println!("    calloutmd [OPTIONS] [FILE]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!("    --vault <DIR>           Vault directory (default: current directory)");
    println!("    --generate              Write the callout CSS snippet and exit");
    println!("    --icons [QUERY]         List icon ids containing QUERY and exit");
    println!();
    println!("Set CALLOUTMD_DEBUG=1 to write a debug log to ~/.calloutmd/debug/");
}

fn print_version() {
    println!("calloutmd {}", VERSION);
}

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Help,
    Version,
    Generate,
    Icons(String),
    Interactive(Option<PathBuf>),
}

#[derive(Debug)]
struct Options {
    vault: Option<PathBuf>,
    mode: Mode,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut vault = None;
    let mut mode = None;
    let mut file = None;
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => mode = Some(Mode::Help),
            "-v" | "--version" => mode = Some(Mode::Version),
            "--generate" => mode = Some(Mode::Generate),
            "--vault" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| "--vault requires a directory argument".to_string())?;
                vault = Some(PathBuf::from(dir));
            }
            "--icons" => {
                // 쿼리는 선택 사항
                let query = match iter.peek() {
                    Some(next) if !next.starts_with('-') => iter.next().cloned().unwrap_or_default(),
                    _ => String::new(),
                };
                mode = Some(Mode::Icons(query));
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => {
                if file.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                file = Some(PathBuf::from(other));
            }
        }
        if matches!(mode, Some(Mode::Help) | Some(Mode::Version)) {
            break;
        }
    }

    Ok(Options {
        vault,
        mode: mode.unwrap_or(Mode::Interactive(file)),
    })
}

fn open_vault(dir: Option<PathBuf>) -> Result<Vault, error::CalloutError> {
    let root = match dir {
        Some(d) => d,
        None => env::current_dir()?,
    };
    Vault::open(root)
}

fn main() -> io::Result<()> {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Use --help for usage information");
            return Ok(());
        }
    };

    let file = match options.mode {
        Mode::Help => {
            print_help();
            return Ok(());
        }
        Mode::Version => {
            print_version();
            return Ok(());
        }
        Mode::Interactive(file) => file,
        Mode::Generate | Mode::Icons(_) => {
            if let Err(e) = run_batch(options) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    let vault = match open_vault(options.vault) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    };

    // Activation happens before the terminal switches to raw mode
    let theme = Theme::detect();
    let mut app = App::activate(vault, file.as_deref(), theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Non-interactive modes: `--generate` and `--icons`.
/// Generation needs no settings, so the data file is not read here.
fn run_batch(options: Options) -> Result<(), error::CalloutError> {
    let vault = open_vault(options.vault)?;
    let icons = IconSet::with_extra_file(&vault.icon_list_path()).unwrap_or_else(|e| {
        eprintln!("Warning: failed to read {}: {}", vault.icon_list_path().display(), e);
        IconSet::builtin()
    });

    match options.mode {
        Mode::Generate => {
            let path = vault.snippet_path();
            let bytes = snippet::write_snippet(&path, &icons)?;
            println!(
                "{} ({} bytes, {} icons)",
                path.display(),
                bytes,
                icons.icon_ids().len()
            );
        }
        Mode::Icons(query) => {
            let picker = IconPicker::new(&icons);
            for id in picker.suggestions(&query) {
                let row = picker.render(&id);
                println!("{} {}", row.glyph, row.label);
            }
        }
        _ => {}
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw::draw(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                handle_key(app, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Right) && app.overlay.is_none() {
                    app.open_context_menu();
                }
            }
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    // 전역 단축키
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('p') | KeyCode::Char('P') if ctrl => {
            app.open_palette();
            return;
        }
        _ => {}
    }

    if app.overlay.is_some() {
        ui::dialogs::handle_overlay_input(app, code, modifiers);
        return;
    }

    match app.current_screen {
        Screen::Editor => match code {
            KeyCode::F(10) => app.open_context_menu(),
            KeyCode::F(2) => app.run_action(commands::Action::OpenSettings),
            KeyCode::Char(',') if ctrl => app.run_action(commands::Action::OpenSettings),
            _ => ui::editor::handle_input(app, code, modifiers),
        },
        Screen::Settings => ui::settings_tab::handle_input(app, code, modifiers),
    }
}
