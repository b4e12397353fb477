// The binary uses the library, not duplicate modules
use flight_route_explorer::{logging, run, settings::Settings};

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_cli();
    logging::setup_logging();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&settings, &mut out)
}
