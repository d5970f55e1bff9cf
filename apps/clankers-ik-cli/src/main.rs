//! Clankers analytic IK CLI.
//!
//! Provides three modes of operation against a planar arm:
//! - `solve`: Solve IK for a planar pose and print every solution
//! - `fk`: Print the end-effector pose for a joint configuration
//! - `info`: Print solver metadata

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use clankers_core::{ClankersError, IkError};
use clankers_ik::{AnalyticIkSolver, EndEffectorPose, IkReal, PlanarArmSolver, compute};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Closed-form inverse kinematics for planar arms.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Arm configuration (TOML). Defaults to a three-link arm.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve IK for a planar pose.
    Solve {
        /// Target x (meters).
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,

        /// Target y (meters).
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,

        /// Target heading about +Z (radians).
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        theta: f64,

        /// Free joint values, comma separated (radians).
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        free: Vec<f64>,
    },

    /// Forward kinematics for a joint configuration.
    Fk {
        /// Joint values (radians), base to tip.
        #[arg(required = true, allow_negative_numbers = true)]
        joints: Vec<f64>,
    },

    /// Print solver information.
    Info,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn format_row(values: &[IkReal]) -> String {
    values
        .iter()
        .map(|v| format!("{v:+.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_solve(
    solver: &PlanarArmSolver,
    x: f64,
    y: f64,
    theta: f64,
    free: &[f64],
) -> Result<(), IkError> {
    let pose = EndEffectorPose::planar(x, y, theta);
    let flat = compute(solver, &pose, free)?;

    if flat.is_empty() {
        println!("no solutions");
        return Ok(());
    }
    for (i, row) in flat.iter().enumerate() {
        println!("solution {}: {}", i + 1, format_row(row));
    }
    println!(
        "\ntotal: solutions={}, joints={}",
        flat.num_solutions(),
        flat.num_joints()
    );
    Ok(())
}

fn run_fk(solver: &PlanarArmSolver, joints: &[f64]) -> Result<(), IkError> {
    if joints.len() != solver.num_joints() {
        return Err(IkError::JointCountMismatch {
            expected: solver.num_joints(),
            got: joints.len(),
        });
    }
    let pose = solver.compute_fk(joints);
    let heading = pose.rotation[3].atan2(pose.rotation[0]);
    println!("translation: {}", format_row(&pose.translation));
    println!("heading:     {heading:+.6}");
    Ok(())
}

fn run_info(solver: &PlanarArmSolver) {
    println!("clankers-ik v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("kinematics:      {}", solver.kinematics_hash());
    println!("ik type:         {:?}", solver.ik_type());
    println!("joints:          {}", solver.num_joints());
    println!("free parameters: {:?}", solver.free_indices());
    println!("reach:           {:.3} m", solver.config().reach());
}

fn run(cli: Cli) -> Result<(), ClankersError> {
    let solver = match &cli.config {
        Some(path) => {
            debug!("clankers-ik-cli: loading {}", path.display());
            PlanarArmSolver::from_file(path)?
        }
        None => PlanarArmSolver::default(),
    };

    match cli.command {
        Commands::Solve { x, y, theta, free } => run_solve(&solver, x, y, theta, &free)?,
        Commands::Fk { joints } => run_fk(&solver, &joints)?,
        Commands::Info => run_info(&solver),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("clankers-ik-cli: {e}");
            ExitCode::FAILURE
        }
    }
}
