use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;

mod cmd_append;
mod cmd_clear;
mod cmd_doctor;
mod cmd_export;
mod cmd_init;
mod cmd_list;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./snapring ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Init {
            path,
            capacity,
            key_prefix,
        } => cmd_init::exec(path, capacity, key_prefix),

        cli::Cmd::Append {
            path,
            file,
            data_url,
            mime,
        } => cmd_append::exec(path, file, data_url, mime),

        cli::Cmd::List { path, json } => cmd_list::exec(path, json),

        cli::Cmd::Export { path, out_dir, raw } => cmd_export::exec(path, out_dir, raw),

        cli::Cmd::Clear { path } => cmd_clear::exec(path),

        cli::Cmd::Status { path, json } => cmd_status::exec(path, json),

        cli::Cmd::Doctor { path, json } => cmd_doctor::exec(path, json),
    }
}
