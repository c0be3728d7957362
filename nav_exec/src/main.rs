//! Main navigation executable entry point.
//!
//! # Architecture
//!
//! The executable is a thin mode selector over the navigation library:
//!
//!     - Initialise the session and logging
//!     - Load parameters
//!     - Pick the start position (spawn placement, except in grid mode)
//!     - Build the session over the external interfaces
//!     - Run the selected mode loop to completion and archive the outcome
//!
//! All control logic lives in the library modules, see `nav_lib`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

// Internal
use nav_lib::{
    goal_ctrl::GoalCtrl,
    grid_exec::GridExec,
    manual_ctrl::{self, ManualBlender},
    nav_session::{self, NavSession, Outcome},
    spawn,
    telem::CsvTelemetry
};
use sim_if::{HeadlessRender, NoInput, PacedClock};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options
#[derive(Debug, StructOpt)]
#[structopt(name = "nav_exec", about = "2D point-agent navigation sessions")]
struct Opt {
    /// Control mode to run
    #[structopt(possible_values = &["manual", "goal", "goal-manual", "grid"])]
    mode: String,

    /// Seed for the spawn placement RNG, drawn from entropy when omitted
    #[structopt(long)]
    seed: Option<u64>
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("nav_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("PointNav Navigation Executable\n");
    info!("Mode: {}", opt.mode);
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let session_params: nav_session::Params =
        params::load_or_default("nav_session.toml")
            .wrap_err("Could not load session params")?;
    let spawn_params: spawn::Params = params::load_or_default("spawn.toml")
        .wrap_err("Could not load spawn params")?;
    let manual_params: manual_ctrl::Params =
        params::load_or_default("manual_ctrl.toml")
            .wrap_err("Could not load manual control params")?;

    info!("Exec parameters loaded");

    // ---- SPAWN PLACEMENT ----

    // Grid mode executes a scripted plan from the canvas origin, the other
    // modes spawn away from the goal
    let start = if opt.mode == "grid" {
        Vector2::new(0f64, 0f64)
    }
    else {
        let mut rng = match opt.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };

        spawn::select_spawn(
            &session_params.goal().position,
            &spawn_params,
            &mut rng
        )
        .wrap_err("Failed to place the agent spawn")?
    };

    info!("Agent spawned at ({:.2}, {:.2})", start[0], start[1]);

    // ---- BUILD SESSION ----

    let render = HeadlessRender::new(start);
    let telem = CsvTelemetry::new(&session, "telem.csv")
        .wrap_err("Failed to create the telemetry archive")?;
    let clock = PacedClock::new(session_params.tick_interval_s);
    let goal = session_params.goal();

    let mut nav_session =
        NavSession::new(session_params, render, NoInput, telem, clock);

    let blender = ManualBlender::new(manual_params);

    // ---- RUN MODE ----

    let outcome = match opt.mode.as_str() {
        "manual" => nav_session.run_manual(&blender),
        "goal" | "goal-manual" => {
            let mut ctrl = GoalCtrl::default();
            ctrl.init("goal_ctrl.toml", &session)
                .wrap_err("Failed to initialise GoalCtrl")?;
            ctrl.set_goal(goal);
            info!("GoalCtrl init complete");

            let blender = match opt.mode.as_str() {
                "goal-manual" => Some(&blender),
                _ => None
            };

            nav_session
                .run_goal(&mut ctrl, blender)
                .wrap_err("Goal session failed")?
        }
        "grid" => {
            let mut exec = GridExec::default();
            exec.init("grid_exec.toml", &session)
                .wrap_err("Failed to initialise GridExec")?;
            info!("GridExec init complete");

            nav_session
                .run_grid(&mut exec)
                .wrap_err("Grid session failed")?
        }
        m => unreachable!("mode {} rejected by the CLI parser", m)
    };

    // ---- REPORT OUTCOME ----

    match outcome {
        Outcome::Arrived { elapsed_s, ticks } => {
            info!("Arrived at the goal after {:.2} s ({} ticks)", elapsed_s, ticks)
        }
        Outcome::PlanComplete { elapsed_s, ticks } => {
            info!("Plan complete after {:.2} s ({} ticks)", elapsed_s, ticks)
        }
        Outcome::DidNotConverge { ticks } => {
            info!("Did not converge within {} ticks", ticks)
        }
    }

    let mut outcome_path = session.session_root.clone();
    outcome_path.push("outcome.json");
    let outcome_file = std::fs::File::create(outcome_path)
        .wrap_err("Failed to create the outcome file")?;
    serde_json::to_writer_pretty(outcome_file, &outcome)
        .wrap_err("Failed to write the outcome file")?;

    Ok(())
}
