mod cli;

use std::{fs, process::exit};

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use detector::{
    dataset::{Dataset, DatasetEntry},
    evaluation::RunStatistics,
    report::{save_annotated, show_and_wait},
    DetectorSystem, SvmClassifier, WindowClassifier,
};
use rand::thread_rng;

fn main() {
    let args = Cli::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(stats) => println!("{stats}"),
        Err(e) => {
            log::error!("Error: {e:#}");
            exit(-1);
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<RunStatistics> {
    let classifier = SvmClassifier::load(&args.model)?;
    let system = DetectorSystem::new(classifier, args.detector_params())?;
    let dataset = Dataset::open(&args.test_dataset)?;

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir).with_context(|| format!("could not create output directory '{}'", dir.display()))?;
    }

    let mut stats = RunStatistics::new();
    for entry in dataset.entries() {
        process_entry(&system, entry, args, &mut stats)?;
    }

    Ok(stats)
}

fn process_entry<C: WindowClassifier>(
    system: &DetectorSystem<C>,
    entry: &DatasetEntry,
    args: &Cli,
    stats: &mut RunStatistics,
) -> anyhow::Result<()> {
    let evaluation = system.evaluate_entry(entry, args.iou_th, stats)?;
    let img = evaluation.annotated(&mut thread_rng())?;

    if let Some(dir) = &args.output_dir {
        save_annotated(&img, dir, &entry.image)?;
    }
    if !args.no_display {
        show_and_wait(&img)?;
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let res = if verbose {
        simple_log::quick!("debug")
    } else {
        simple_log::quick!("info")
    };
    if let Err(e) = res {
        eprintln!("Failed to set up logging: {e}");
    }
}
