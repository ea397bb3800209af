#[macro_use]
extern crate log;

use std::io::{BufRead, Write};

use env_logger::Env;
use simulator::{PoseSample, Simulator};
use waypoint_planner::Status;

fn init<'a>(matches: &'a clap::ArgMatches<'a>) -> Result<Simulator, String> {
    let assignments = matches.values_of("set").into_iter().flatten();
    Simulator::setup(matches.value_of("waypoints"), assignments)
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("simulator")
        .version("0.1")
        .author("qiuchengxuan")
        .about("Feeds pose samples from stdin into waypoint planner")
        .arg(clap::Arg::with_name("waypoints").long("waypoints").help("Waypoint file").takes_value(true))
        .arg(
            clap::Arg::with_name("set")
                .long("set")
                .help("Tolerance override, e.g. yaw-max-error=0.3")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .get_matches();
    let mut simulator = match init(&matches) {
        Ok(simulator) => simulator,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: PoseSample = match serde_json::from_str(&line) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Pose sample malformed: {}", e);
                continue;
            }
        };
        let telemetry = simulator.update_pose(sample);
        serde_json::to_writer(&mut stdout, &telemetry.target)?;
        writeln!(stdout)?;
        if telemetry.status == Status::Finished {
            break;
        }
    }
    Ok(())
}
