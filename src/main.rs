/**
 * Monte Carlo photoionisation of spherical accretion flows
 */




// ============================================================================
use tokio::runtime::Runtime;
use ionfront::app::{App, Configuration, Control, DESCRIPTION, VERSION_AND_BUILD};
use ionfront::eos::EquationOfState;
use ionfront::hydro::AnyHydro;
use ionfront::io::{self, FrontLog};
use ionfront::products::Products;
use ionfront::scheme::{self, StepReport};
use ionfront::state::State;
use ionfront::tasks::Tasks;
use ionfront::traits::Hydrodynamics;




// ============================================================================
fn side_effects(state: &State, tasks: &mut Tasks, config: &Configuration, report: &StepReport, outdir: &str)
    -> anyhow::Result<()>
{
    let Control { checkpoint_interval, products_interval, .. } = config.control;

    if tasks.iteration_message.next_time <= state.time {
        let time = tasks.iteration_message.advance(0.0);
        let mcps = 1e-6 * state.total_cells() as f64 / time;
        if tasks.iteration_message.count_this_run > 1 {
            println!("[{:05}] t={:.4e} dt={:.3e} R={:.4e} packets={} Mcps={:.2}",
                state.iteration,
                state.time,
                report.dt,
                report.front_radius,
                state.bank.live_count(),
                mcps);
        }
    }

    if tasks.write_products.next_time <= state.time {
        tasks.write_products.advance(products_interval);
        let filename = format!("{}/prods.{:04}.cbor", outdir, tasks.write_products.count - 1);
        let products = Products::from_state(state, &config.eos, config);
        io::write_cbor(&products, &filename)?;
    }

    if tasks.write_checkpoint.next_time <= state.time {
        tasks.write_checkpoint.advance(checkpoint_interval);
        let filename = format!("{}/chkpt.{:04}.cbor", outdir, tasks.write_checkpoint.count - 1);
        let app = App {
            state: state.clone(),
            tasks: tasks.clone(),
            config: config.clone(),
            version: VERSION_AND_BUILD.to_string(),
        };
        io::write_cbor(&app, &filename)?;
    }

    Ok(())
}




// ============================================================================
fn run<H: Hydrodynamics>(
    mut state: State,
    mut tasks: Tasks,
    hydro: H,
    config: Configuration,
    outdir: String) -> anyhow::Result<()>
{
    let eos: EquationOfState = config.eos.clone();
    let Control { final_time, num_threads, block_size, .. } = config.control;

    let runtime = if num_threads > 0 {
        Some(tokio::runtime::Builder::new_multi_thread()
            .worker_threads(num_threads)
            .build()?)
    } else {
        None
    };
    let runtime: Option<&Runtime> = runtime.as_ref();
    let mut log = FrontLog::open(&format!("{}/{}", outdir, config.radiation.log_file))?;
    let mut report = StepReport::default();

    while state.time < final_time {
        side_effects(&state, &mut tasks, &config, &report, &outdir)?;
        report = scheme::advance(&mut state, &hydro, &eos, &config.radiation, block_size, runtime, &mut log)?;

        if let Some(record) = report.record {
            println!("front moved to R={:.6e} (Q={:.4e})", record.radius, record.ionising_rate);
        }
    }

    side_effects(&state, &mut tasks, &config, &report, &outdir)?;

    Ok(())
}




// ============================================================================
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let input = match args.next() {
        None => anyhow::bail!("no input file given"),
        Some(input) => input,
    };
    let patches: Vec<_> = args.collect();
    let outdir = io::parent_directory(&input);

    println!();
    println!("\t{}", DESCRIPTION);
    println!("\t{}", VERSION_AND_BUILD);
    println!();
    println!("\tinput file ........ {}", input);
    println!("\toutput directory .. {}", outdir);

    let App { state, tasks, config, .. } = App::from_preset_or_file(&input, &patches)?.validate()?;

    for line in serde_yaml::to_string(&config)?.split('\n').skip(1) {
        println!("\t{}", line);
    }
    println!();

    match config.hydro.clone() {
        AnyHydro::Static(hydro) => run(state, tasks, hydro, config, outdir),
    }
}
