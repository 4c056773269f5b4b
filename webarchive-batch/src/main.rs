use std::io::Write;

use anyhow::Result;
use clap::Parser;
use webarchive_batch::{
    normalize_legacy_flags, process_bookmark_service, process_export_file, Cli, Mode,
    PocketConfig, WebArchiver,
};

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:<5}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    // Accept both `-pocket` and `--pocket`
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));
    init_logging(cli.debug);

    let Some(mode) = cli.mode() else {
        eprintln!("Must specify Instapaper or Pocket style");
        eprintln!("Usage: webarchive-batch -destination_dir <PATH> -unprocessed_url_list <FILE> (-instapaper_csv <FILE> | -pocket [-delete_pocket])");
        std::process::exit(1);
    };

    let mut archiver = WebArchiver::new(&cli.archiver);

    let summary = match mode {
        Mode::Pocket {
            delete_after_success,
        } => {
            let config = PocketConfig::from_file(&cli.config)?;
            let mut pocket = config.client()?;
            process_bookmark_service(
                &mut pocket,
                &cli.destination_dir,
                &cli.unprocessed_url_list,
                delete_after_success,
                &mut archiver,
            )?
        }
        Mode::Export(export_file) => process_export_file(
            &export_file,
            &cli.destination_dir,
            &cli.unprocessed_url_list,
            &mut archiver,
        )?,
    };

    log::info!("Done: {}", summary);
    if summary.failed > 0 {
        log::info!(
            "Unprocessed URLs written to {}",
            cli.unprocessed_url_list.display()
        );
    }

    Ok(())
}
