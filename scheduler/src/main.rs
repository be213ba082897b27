use cpu_scheduling_sim::{
    scheduler::{chart, ReplayRunner},
    simulate, ConfigError, Workload,
};
use crossterm::{
    execute,
    terminal::{self, Clear, ClearType},
};
use log::error;
use std::{env, io, process::ExitCode};

const USAGE: &str = "usage: cpu-scheduling-sim <workload.json> [fcfs|sjf|srtf|priority|rr[:quantum]|edf|rm] [--plain]";

struct Args {
    workload: String,
    policy: Option<String>,
    plain: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        let mut positional = Vec::new();
        let mut plain = false;
        for arg in args {
            match arg.as_str() {
                "--plain" => plain = true,
                "-h" | "--help" => return Err(ConfigError::Usage(USAGE.to_owned())),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let workload = positional
            .next()
            .ok_or_else(|| ConfigError::Usage(USAGE.to_owned()))?;
        let policy = positional.next();
        if positional.next().is_some() {
            return Err(ConfigError::Usage(USAGE.to_owned()));
        }

        Ok(Self {
            workload,
            policy,
            plain,
        })
    }
}

fn run() -> Result<(), ConfigError> {
    let args = Args::parse(env::args().skip(1))?;
    let workload = Workload::from_path(&args.workload)?;
    let policy = workload.policy(args.policy.as_deref())?;
    let simulation = simulate(&workload.processes, policy)?;

    if args.plain {
        let width = terminal::size().map_or(80, |(columns, _)| columns as usize);
        print!("{}", chart::render(&simulation, width));
        return Ok(());
    }

    execute!(io::stdout(), Clear(ClearType::All))?;

    {
        let mut runner = ReplayRunner::new(simulation)?;
        while runner.run()? {}
    }

    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConfigError::Usage(usage)) => {
            eprintln!("{usage}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
