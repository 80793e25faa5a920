use futures::future::join_all;
use tokio::runtime::Runtime;
use crate::cell::Cell;
use crate::eos::EquationOfState;
use crate::equilibrium;
use crate::front::{self, FrontRecord, IonisationMode};
use crate::io::FrontLog;
use crate::physics::{LIGHT_SPEED, RadiationError};
use crate::radiation::Radiation;
use crate::source::EmissionSource;
use crate::state::State;
use crate::traits::Hydrodynamics;
use crate::transport::{self, TransportStats};




/**
 * Summary of one time step, for the iteration message
 */
#[derive(Clone, Debug, Default)]
pub struct StepReport {
    pub dt: f64,
    pub front_radius: f64,
    pub transport: TransportStats,
    pub record: Option<FrontRecord>,
}




// ============================================================================
async fn map_blocks<F>(cells: Vec<Cell>, block_size: usize, runtime: &Runtime, f: F) -> Result<Vec<Cell>, RadiationError>
where
    F: Fn(&mut Cell) + Clone + Send + 'static
{
    let mut blocks = Vec::new();
    let mut cells = cells.into_iter().peekable();

    while cells.peek().is_some() {
        blocks.push(cells.by_ref().take(block_size).collect::<Vec<_>>());
    }

    let handles = blocks.into_iter().map(|mut block| {
        let f = f.clone();
        runtime.spawn(async move {
            block.iter_mut().for_each(&f);
            block
        })
    });

    let mut result = Vec::new();

    for block in join_all(handles).await {
        result.extend(block.map_err(|e| RadiationError::WorkerFailed(e.to_string()))?);
    }
    Ok(result)
}




/**
 * Apply `f` to every cell. With a runtime, the cells are split into blocks of
 * `block_size` which are processed concurrently; the cells are put back in
 * their original order.
 */
pub fn map_cells<F>(cells: &mut Vec<Cell>, block_size: usize, runtime: Option<&Runtime>, f: F) -> Result<(), RadiationError>
where
    F: Fn(&mut Cell) + Clone + Send + 'static
{
    match runtime {
        None => {
            cells.iter_mut().for_each(f);
        }
        Some(runtime) => {
            let taken = std::mem::take(cells);
            *cells = runtime.block_on(map_blocks(taken, block_size.max(1), runtime, f))?;
        }
    }
    Ok(())
}




/**
 * Run one Monte Carlo radiation transfer over a time step `dt`: resume the
 * banked packets, emit the new ones, and solve for the ionization balance of
 * every cell. The bank is compacted for the next step. Fails as soon as the
 * bank overflows, in which case the state must not be used further.
 */
pub fn transfer(
    state: &mut State,
    source: &EmissionSource,
    dt: f64,
    block_size: usize,
    runtime: Option<&Runtime>) -> Result<TransportStats, RadiationError>
{
    let mut stats = TransportStats::default();
    let light_crossing = LIGHT_SPEED * dt;

    map_cells(&mut state.cells, block_size, runtime, |cell| {
        cell.path_length = 0.0;
        cell.mean_intensity = 0.0;
    })?;

    let State { cells, bank, rng, .. } = state;

    for index in 0..bank.live_count() {
        let mut packet = bank.current(index);

        if packet.cell >= cells.len() || packet.is_terminated() {
            stats.skipped += 1;
            continue
        }
        let mut budget = light_crossing;
        stats.reactivated += 1;
        stats.record(transport::resume(cells, &mut packet, &mut budget, bank));
    }

    source.emit(cells, light_crossing, bank, rng, &mut stats);

    let photons_per_step = source.photons_per_step;
    let ionising_rate = source.ionising_rate;

    map_cells(cells, block_size, runtime, move |cell| {
        cell.mean_intensity = equilibrium::mean_intensity(cell, ionising_rate, photons_per_step);
        equilibrium::update_ionization(cell, dt);
    })?;

    bank.check_capacity()?;
    bank.compact();
    Ok(stats)
}




/**
 * Locate the ionisation front for this step, map its profile onto the cells,
 * and log it if it moved appreciably since it was last logged.
 */
pub fn ionise<W: std::io::Write>(
    state: &mut State,
    radiation: &Radiation,
    dt: f64,
    block_size: usize,
    runtime: Option<&Runtime>,
    log: &mut FrontLog<W>) -> anyhow::Result<StepReport>
{
    let luminosity_factor = state.accretion.luminosity_factor();
    let mut report = StepReport { dt, ..StepReport::default() };

    let ionising_rate = match radiation.mode {
        IonisationMode::Constant => {
            report.front_radius = radiation.initial_radius;
            radiation.ionising_rate
        }
        IonisationMode::SelfConsistent => {
            map_cells(&mut state.cells, block_size, runtime, |cell| {
                cell.shell_budget = front::shell_budget(cell);
            })?;
            let budget = state.front.target_budget * luminosity_factor;
            report.front_radius = front::self_consistent_radius(&state.cells, budget);
            budget
        }
        IonisationMode::MonteCarlo => {
            let source = radiation.source(luminosity_factor);
            report.transport = transfer(state, &source, dt, block_size, runtime)?;
            report.front_radius = front::threshold_radius(&state.cells);
            source.ionising_rate
        }
    };

    let profile = radiation.profile(report.front_radius);

    map_cells(&mut state.cells, block_size, runtime, move |cell| {
        cell.mapped_neutral_fraction = profile.neutral_fraction(cell.lower_wall, cell.upper_wall);
    })?;

    if state.front.update(report.front_radius) && radiation.mode != IonisationMode::Constant {
        let record = FrontRecord {
            time: state.time,
            radius: report.front_radius,
            ionising_rate,
        };
        log.append(&record)?;
        report.record = Some(record);
    }
    Ok(report)
}




/**
 * Advance the state by one time step: ionise the gas, then hand the mapped
 * neutral fractions to the hydrodynamics, and grow the central source by the
 * mass it accreted.
 */
pub fn advance<H, W>(
    state: &mut State,
    hydro: &H,
    eos: &EquationOfState,
    radiation: &Radiation,
    block_size: usize,
    runtime: Option<&Runtime>,
    log: &mut FrontLog<W>) -> anyhow::Result<StepReport>
where
    H: Hydrodynamics,
    W: std::io::Write
{
    let dt = hydro.time_step(&state.cells);
    let report = ionise(state, radiation, dt, block_size, runtime, log)?;
    let mass_flux = hydro.advance(&mut state.cells, eos, dt)?;

    state.accretion.accrete(mass_flux);
    state.time += dt;
    state.iteration += 1;

    Ok(report)
}
