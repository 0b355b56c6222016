extern crate pretty_env_logger;

#[macro_use]
extern crate log;

use clap::Parser;
use roomcluster::{
    load_rooms, ArgParser, ClusterAssignment, ClusterEngine, ClusterLoss, ClusterParams,
    LossParams, RoomClusterParams,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Serialize)]
struct Report<'a> {
    params: &'a ClusterParams,
    scoring: &'a LossParams,
    clusters: &'a ClusterAssignment,
    loss: &'a ClusterLoss,
}

fn run(args: &ArgParser) -> Result<(), Box<dyn std::error::Error>> {
    let rooms = load_rooms(&args.io.rooms, &args.io.layout)?;
    info!("loaded {} rooms", rooms.len());

    let mut engine = ClusterEngine::new(rooms, args.cluster.clone())?;
    engine.cluster_rooms()?;
    let loss = engine.loss(&args.loss);
    for (label, rooms) in engine.clusters() {
        info!(
            "cluster {}: {} rooms, loss {:.2}",
            label,
            rooms.len(),
            loss.get(label).copied().unwrap_or_default()
        );
    }

    let report = Report {
        params: engine.params(),
        scoring: &args.loss,
        clusters: engine.clusters(),
        loss: &loss,
    };

    let mut writer: Box<dyn Write> = match args.io.out {
        Some(ref path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() {
    let args = ArgParser::parse();
    let level = if args.debug() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("starting");
    info!("params: {:#?}", args);
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("finished");
}
