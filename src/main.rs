use std::{fs, io, thread, time::Duration};

mod console;
mod options;

use lifebench::{
    Engine, Grid, ParallelEngine, Result, SequentialEngine, SimulateOptions,
    simulate::{self, millis},
    stats::{GenerationLog, Recorder, Throughput},
};
use options::{Args, EngineChoice};

/// Steps `game` once and rewinds it, so its thread pool and the rule table
/// are initialized before the timed run
fn warm_up<E: Engine + ?Sized>(game: &mut E) {
    game.step();
    game.restart();
}

fn run<E: Engine>(
    label: &str,
    game: &mut E,
    args: &Args,
    generations: i32,
    options: &SimulateOptions,
) -> Result<Duration> {
    let path = args.output_dir().join(format!("{label}_simulation.txt"));
    let mut writer = io::BufWriter::new(fs::File::create(&path)?);
    let alive = game.current_grid().alive_count();

    warm_up(game);
    println!("\nStarting {label} simulation...");
    let elapsed = match args.stats_prefix() {
        Some(prefix) => {
            let mut log = GenerationLog::new(label, alive);
            let elapsed =
                lifebench::simulate_recorded(game, generations, &mut writer, options, &mut log)?;
            log.save(format!("{prefix}_{label}.csv"))?;
            elapsed
        }
        None => {
            let mut throughput = Throughput::new(label, alive);
            lifebench::simulate_recorded(game, generations, &mut writer, options, &mut throughput)?
        }
    };
    simulate::write_summary(&mut writer, label, elapsed)?;

    println!(
        "{label} completed. Results saved to {}. Time spent: {:.2} ms",
        path.display(),
        millis(elapsed)
    );
    Ok(elapsed)
}

fn run_console(args: &Args, initial: Grid) -> Result<()> {
    let limit = args.console_limit()?;

    // the console only drives one engine, parallel unless asked otherwise
    let sequential = args.engine()? == EngineChoice::Sequential;
    let label = if sequential { "sequential" } else { "parallel" };
    let mut game: Box<dyn Engine> = if sequential {
        Box::new(SequentialEngine::new(initial)?)
    } else {
        Box::new(ParallelEngine::with_config(initial, args.parallel_config()?)?)
    };
    let sleep = args.sleep()?;
    let mut console = console::ConsoleRender::new(args.symbols()?)?;
    let mut stats = Throughput::new(label, game.current_grid().alive_count());

    let mut shown = 0;
    'generations: while limit.is_none_or(|limit| shown < limit) {
        while let Some(cmd) = console.poll_events()? {
            match cmd {
                console::ConsoleCommand::Exit => break 'generations,
                console::ConsoleCommand::Restart => game.restart(),
                console::ConsoleCommand::Handled => {}
            }
        }
        if stats.has_report() {
            console.set_report(stats.report());
        }
        console.render(game.current_grid())?;

        game.step();
        shown += 1;
        stats.record(game.current_grid().alive_count());
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = Args::from_env()? else {
        return Ok(());
    };

    let initial = args.initial_grid()?;
    println!(
        "grid: {}x{}, alive: {}",
        initial.rows(),
        initial.cols(),
        initial.alive_count()
    );

    if args.console() {
        return run_console(&args, initial);
    }

    let generations = args.generations()?;
    let engine = args.engine()?;
    let options = SimulateOptions {
        render: args.render(),
        symbols: args.symbols()?,
    };

    let mut parallel_time = None;
    if engine.runs_parallel() {
        let mut game = ParallelEngine::with_config(initial.clone(), args.parallel_config()?)?;
        println!(
            "parallel engine: {} threads, {} rows per chunk",
            game.thread_count(),
            game.chunk_rows()
        );
        parallel_time = Some(run("parallel", &mut game, &args, generations, &options)?);
    }

    let mut sequential_time = None;
    if engine.runs_sequential() {
        let mut game = SequentialEngine::new(initial)?;
        sequential_time = Some(run("sequential", &mut game, &args, generations, &options)?);
    }

    if let (Some(par), Some(seq)) = (parallel_time, sequential_time) {
        println!(
            "\nspeedup: {:.2}x",
            seq.as_secs_f64() / par.as_secs_f64().max(f64::EPSILON)
        );
    }

    Ok(())
}
