#[macro_use]
extern crate slog;
#[macro_use]
extern crate trackable;

use clap::{Arg, Command};
use flog::{Config, LoggerConfig};

fn main() {
    let matches = Command::new("hello")
        .arg(Arg::new("CONFIG_FILE").index(1).required(true))
        .get_matches();
    let config_file = matches
        .get_one::<String>("CONFIG_FILE")
        .expect("required argument");

    let config: LoggerConfig =
        track_try_unwrap!(serdeconv::from_toml_file(config_file).map_err(|e| {
            flog::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        }));
    let logger = track_try_unwrap!(config.build_logger());
    track_try_unwrap!(logger.notice("Hello from flog"));

    let logger = logger.into_slog();
    info!(logger, "Hello World!"; "config" => config_file);
}
