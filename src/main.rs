use std::thread;

use anyhow::Context;
use lifelike::{FileSink, Grid, GridCodec, Simulation, Status, TextGrid};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

mod console;
mod options;
mod stats;

use stats::Recorder;

fn init_tracing(console: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    // keep the console view readable unless asked otherwise
    let default = if console { "lifelike=warn" } else { "lifelike=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Loads or generates the first generation, along with the name used for outputs
fn initial_grid(args: &options::Args, rng: &mut StdRng) -> anyhow::Result<(Grid, String)> {
    if let Some(path) = args.input_path() {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading grid file {}", path.display()))?;
        let grid = TextGrid
            .decode(&text)
            .with_context(|| format!("loading grid file {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok((grid, name));
    }

    let (rows, cols) = args.grid_size()?;
    let mode = args.fill_mode()?;
    let grid = mode.create_grid(rows, cols, rng)?;
    Ok((grid, format!("{mode}-{rows}x{cols}")))
}

fn main() -> anyhow::Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };
    init_tracing(args.console());

    let rules = args.rules()?;
    let seed = args.seed()?.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let (grid, input_name) = initial_grid(&args, &mut rng)?;
    info!(
        %rules,
        seed,
        rows = grid.rows(),
        cols = grid.cols(),
        population = grid.population(),
        "loaded {input_name}"
    );

    // setup the sinks, engine and reporting metrics
    let file_sink = match args.output_path(&rules, &input_name) {
        Some(path) => {
            let sink =
                FileSink::new(&path).with_context(|| format!("creating {}", path.display()))?;
            info!(path = %sink.path().display(), "writing snapshots");
            Some(sink)
        }
        None => None,
    };
    let console = if args.console() {
        Some(console::ConsoleRender::new()?)
    } else {
        None
    };
    let mut sink = (file_sink, console);
    let sleep = args.sleep()?;
    let parallel = args.multithreading();

    let mut game = Simulation::with_rng(grid, rules, rng);
    let mut stats = stats::SwitchRecorder::new(
        game.generation(),
        game.population(),
        args.stats_file().is_some(),
    );
    game.start(&mut sink)?;

    'generations: for _ in 0..args.generations()? {
        if let Some(ref mut console) = sink.1 {
            while let Some(cmd) = console.poll_events()? {
                if let console::ConsoleCommand::Exit = cmd {
                    break 'generations;
                }
            }
        }

        // report metrics every 500ms
        if stats.has_report() {
            let report = stats.report();
            match sink.1 {
                Some(ref mut console) => console.set_report(report),
                None => info!("{report}"),
            }
        }

        // compute the next generation
        let status = if parallel {
            game.step_parallel(&mut sink)?
        } else {
            game.step(&mut sink)?
        };
        stats.record(game.generation(), game.population());
        if status == Status::Finished {
            break;
        }
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    // restores the terminal before anything else is printed
    std::mem::drop(sink);

    match game.termination() {
        Some(reason) => info!(
            generation = game.generation(),
            population = game.population(),
            ?reason,
            "run finished"
        ),
        None => info!(
            generation = game.generation(),
            population = game.population(),
            "run stopped"
        ),
    }

    if let Some(file_name) = args.stats_file() {
        stats
            .save(&file_name)
            .with_context(|| format!("writing stats to {file_name}"))?;
    }

    Ok(())
}
