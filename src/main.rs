use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use term_desk::DesktopApp;
use term_desk::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver, OutputDriver};
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::tracing_sub;

#[derive(Debug, Parser)]
#[command(name = "term-desk", about, version)]
struct Args {
    /// Directory the browser shell opens in (defaults to the working
    /// directory).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Event poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_rate: u64,

    /// Append tracing output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable mouse capture (keyboard-only mode; widgets cannot be
    /// dragged).
    #[arg(long)]
    no_mouse: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_sub::init(args.log_file.as_deref())?;

    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut app = DesktopApp::new(dir);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    if !args.no_mouse {
        input.set_mouse_capture(true)?;
    }
    tracing::debug!("terminal entered, starting event loop");

    let mut events = EventLoop::new(input, Duration::from_millis(args.tick_rate));
    let result = events.run(|_, event| {
        if let Some(event) = event {
            app.handle_event(&event);
        }
        output.draw(|mut frame| app.render(&mut frame))?;
        Ok(if app.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    });

    output.exit()?;
    result
}
