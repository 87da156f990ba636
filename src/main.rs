/// Headless color editing session for native builds.
///
/// Reads line commands from stdin (`help` lists them), prints the derived
/// color and the four gradient swatches after each change, and keeps the
/// last-used color on disk.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{self, BufRead, Write};

    use reactive_color::config::AppConfig;
    use reactive_color::input::COMMAND_HELP;
    use reactive_color::logging::init_logging;
    use reactive_color::{
        ColorMode, ColorStore, Command, Field, JsonFileStore, Session, SessionOptions, SwatchSet,
    };

    pub fn run() -> Result<(), Box<dyn Error>> {
        let config = AppConfig::load_from_default_path().unwrap_or_default();
        let prefs = &config.preferences;
        init_logging(prefs.log_level);

        let store = match &prefs.store_path {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::default_location()?,
        };
        log::info!("Using color store at {:?}", store.path());

        let session = Session::open(store, &SessionOptions::from(prefs));
        let swatches = SwatchSet::attach_with_steps(session.model(), prefs.gradient_steps);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_session(session, swatches, io::stdin().lock(), &mut out)
    }

    /// Drive a session from line input, then close it.
    ///
    /// The session is closed, saving unsaved edits, even when reading input
    /// or writing output fails; the first error is returned.
    fn run_session<S: ColorStore>(
        mut session: Session<S>,
        swatches: SwatchSet,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        let edited = edit_loop(&mut session, &swatches, input, out);
        if let Err(e) = &edited {
            log::error!("Session input failed: {}", e);
        }

        drop(swatches);
        let closed = session.close();
        edited?;
        closed?;
        Ok(())
    }

    fn edit_loop<S: ColorStore>(
        session: &mut Session<S>,
        swatches: &SwatchSet,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn Error>> {
        print_color(out, session.state().mode, swatches)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            match command {
                Command::Edit(edit) => session.apply(edit),
                Command::ToggleMode => session.toggle_mode(),
                Command::Shuffle => session.shuffle(),
                Command::Undo => {
                    if !session.undo() {
                        writeln!(out, "nothing to undo")?;
                    }
                }
                Command::Redo => {
                    if !session.redo() {
                        writeln!(out, "nothing to redo")?;
                    }
                }
                Command::Save => {
                    if let Err(e) = session.save() {
                        writeln!(out, "error: {}", e)?;
                    }
                }
                Command::Show => {}
                Command::Help => {
                    writeln!(out, "{}", COMMAND_HELP)?;
                    continue;
                }
                Command::Quit => break,
            }

            print_color(out, session.state().mode, swatches)?;
            if let Some(Err(e)) = session.tick() {
                writeln!(out, "auto-save failed: {}", e)?;
            }
        }
        Ok(())
    }

    fn print_color(out: &mut impl Write, mode: ColorMode, swatches: &SwatchSet) -> io::Result<()> {
        let canvas = swatches.canvas();
        writeln!(out, "[{}] {} {}", mode.name(), canvas.to_hex(), canvas)?;

        for field in Field::all() {
            if let Some(gradient) = swatches.gradient(field) {
                let stops: Vec<String> = gradient
                    .stops
                    .iter()
                    .map(|stop| stop.color.to_hex())
                    .collect();
                writeln!(out, "  {:<10} {}", field.label(mode), stops.join(" -> "))?;
            }
        }
        Ok(())
    }

}

// WASM has no stdin session; the library is used directly
#[cfg(target_arch = "wasm32")]
fn main() {}
