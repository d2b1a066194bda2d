use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use libtc_reader::config::Config;
use libtc_reader::process::{create_subsets, merge_results, process_subset};
use libtc_reader::worker_status::BarColor;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

fn bar_style(color: &BarColor) -> ProgressStyle {
    let color_name = match color {
        BarColor::CYAN => "cyan",
        BarColor::MAGENTA => "magenta",
        BarColor::RED => "red",
        BarColor::GREEN => "green",
    };
    ProgressStyle::with_template(&format!(
        "{{prefix}} [{{bar:40.{color_name}}}] {{percent}}%"
    ))
    .expect("Could not create progress bar style!")
    .progress_chars("=> ")
}

fn main() {
    // Create a cli
    let matches = Command::new("tc_reader_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Initialize feedback: terminal plus a log file for the run
    let now = time::OffsetDateTime::now_utc();
    let log_name = format!(
        "tc_reader_{:04}{:02}{:02}_{:02}{:02}{:02}.log",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    );
    let log_file = File::create(&log_name).expect("Could not create log file!");
    let logger = simplelog::CombinedLogger::new(vec![
        simplelog::TermLogger::new(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        ),
        simplelog::WriteLogger::new(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            log_file,
        ),
    ]);

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");
    log::set_max_level(log::LevelFilter::Info);

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if let Some(("new", _)) = matches.subcommand() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Raw Path: {}", config.raw_path.to_string_lossy());
    log::info!("Output Path: {}", config.output_path.to_string_lossy());
    match &config.spill_path {
        Some(path) => log::info!("Spill Path: {}", path.to_string_lossy()),
        None => log::info!("Spill Path: not set, spill tagging is disabled"),
    }
    log::info!("Strict decoding: {}", config.strict);

    if !config.is_n_threads_valid() {
        log::error!("Number of workers must be at least 1!");
        return;
    }

    // Divide the files amongst the workers. Files are dealt round-robin, so
    // the leading subsets are the non-empty ones and worker ids stay dense.
    let subsets = match create_subsets(&config) {
        Ok(subsets) => subsets,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    // Spawn the workers!
    let (tx, rx) = mpsc::channel();
    let mut workers = Vec::new();
    let mut bars = Vec::new();
    for (idx, subset) in subsets.into_iter().enumerate() {
        // Dont make empty workers
        if subset.is_empty() {
            continue;
        }
        let conf = config.clone();
        let tx = tx.clone();
        let bar = pb_manager.add(ProgressBar::new(100));
        bar.set_style(bar_style(&BarColor::CYAN));
        bar.set_prefix(format!("Worker {idx}"));
        bars.push(bar);
        workers.push(std::thread::spawn(move || {
            process_subset(conf, subset, tx, idx)
        }));
    }
    drop(tx);

    // Drain status messages until every worker has hung up its sender
    while let Ok(status) = rx.recv() {
        let bar = &bars[status.worker_id];
        bar.set_style(bar_style(&status.color));
        bar.set_prefix(format!(
            "Worker {} | File {}",
            status.worker_id, status.file_number
        ));
        bar.set_position((status.progress * 100.0) as u64);
    }

    // Collect the workers
    let mut results = Vec::new();
    let mut n_failed_workers = 0;
    for worker in workers {
        match worker.join() {
            Ok(Ok(mut subset_results)) => results.append(&mut subset_results),
            Ok(Err(e)) => {
                n_failed_workers += 1;
                log::error!("Worker failed with error: {e}");
            }
            Err(_) => {
                n_failed_workers += 1;
                log::error!("Failed to join a worker thread!");
            }
        }
    }
    for bar in bars.iter() {
        bar.finish();
    }

    // Merge back in file enumeration order and report the run totals
    let dataset = merge_results(results);
    log::info!(
        "Run complete: {} candidates and {} activities from {} fragments ({} empty, {} failed).",
        dataset.len(),
        dataset.total_activities(),
        dataset.fragments_read(),
        dataset.fragments_empty(),
        dataset.fragments_failed()
    );
    if n_failed_workers > 0 {
        log::warn!("{n_failed_workers} worker(s) exited with an error; check the log file {log_name} for details.");
    }
    log::info!("Done.");
}
