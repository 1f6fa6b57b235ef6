//! # GROTTO CLI
//!
//! Prints cave maps to the terminal.
//!
//! ```bash
//! # Default 256x128 map, regenerate with Enter, quit with q
//! grotto
//!
//! # Config file, fresh seed each time
//! grotto caves/mossy.toml --random
//!
//! # Single map for scripting
//! grotto caves/mossy.toml --once > map.txt
//! ```

use std::io;
use std::process::ExitCode;

use grotto::host::{self, HostArgs, USAGE};

fn main() -> ExitCode {
    let args = match HostArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match host::run(&config, io::stdin().lock(), io::stdout().lock(), args.once) {
        Ok(maps) => {
            tracing::info!(maps, "grotto exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
