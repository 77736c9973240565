use sorg::chrono::Local;

use crate::compile::Build;
use crate::config::Conf;

mod compile;
mod config;
mod views;

fn init_logging(conf: &Conf) {
    let level = if conf.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

pub fn main() {
    let started = Local::now();
    let conf = match Conf::load() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("error: {}", e.one_line());
            std::process::exit(1);
        }
    };

    init_logging(&conf);
    if let Err(e) = Build::new(&conf, ".", started).run() {
        log::error!("{}", e.one_line());
        std::process::exit(1);
    }

    let elapsed = Local::now().signed_duration_since(started);
    log::info!("done in {}ms", elapsed.num_milliseconds());
}
