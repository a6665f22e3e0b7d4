use canopy_light_core::{
    create_partition_model, run_sweep, Kilopascals, LaiSweep, PartitionModel, SpeciesTemplate,
    SubDailyConfig, SweepResult,
};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Radiation partitioning demo over a sweep of total leaf area index
#[derive(Parser, Debug)]
#[command(name = "canopy-light-demo")]
#[command(about = "Light interception of intercropped species", long_about = None)]
struct Args {
    /// Partition model (cycles, wallace, apsim, sub-daily)
    #[arg(short, long, default_value = "cycles")]
    model: PartitionModel,

    /// Second model to compare against
    #[arg(short, long)]
    compare: Option<PartitionModel>,

    /// Extinction coefficient per species (repeat for each species)
    #[arg(long = "k")]
    extinction: Vec<f64>,

    /// Plant height per species (default 1.0)
    #[arg(long)]
    height: Vec<f64>,

    /// Share of the total LAI per species (default: equal shares)
    #[arg(long)]
    share: Vec<f64>,

    /// Leaf angle distribution ratio per species, needed by sub-daily
    #[arg(long)]
    x_ratio: Vec<f64>,

    /// Total LAI at the first sweep point
    #[arg(long, default_value_t = 0.01)]
    min_lai: f64,

    /// Total LAI at the last sweep point
    #[arg(long, default_value_t = 7.0)]
    max_lai: f64,

    /// Number of sweep points
    #[arg(short, long, default_value_t = 10)]
    points: usize,

    /// Atmospheric transmittance for sub-daily
    #[arg(long, default_value_t = 0.75)]
    atm_transmittance: f64,

    /// Atmospheric pressure in kPa for sub-daily
    #[arg(long, default_value_t = 101.3)]
    pressure: f64,

    /// Leaf transmittance for sub-daily
    #[arg(long, default_value_t = 0.8)]
    leaf_transmittance: f64,

    /// Print the sweep as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let templates = species_templates(args)?;
    let sweep = LaiSweep::new(args.min_lai, args.max_lai, args.points)?;

    let primary = with_atmosphere(&args.model, args);
    let model = create_partition_model(&primary)?;
    let result = run_sweep(model.as_ref(), &templates, &sweep)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("=== Canopy Light Demo ===\n");
    for (i, t) in templates.iter().enumerate() {
        println!(
            "Species {}: k = {:.2}, height = {:.2}, LAI share = {:.0}%{}",
            i + 1,
            t.extinction_coefficient,
            t.height,
            t.lai_share * 100.0,
            t.leaf_angle_ratio
                .map(|x| format!(", x = {x:.2}"))
                .unwrap_or_default()
        );
    }
    println!();

    println!("Model: {}", primary);
    print_table(&result);

    if let Some(other) = &args.compare {
        let other = with_atmosphere(other, args);
        let other_model = create_partition_model(&other)?;
        let compared = run_sweep(other_model.as_ref(), &templates, &sweep)?;
        println!("\nModel: {}", other);
        print_table(&compared);

        println!("\nDifference ({} - {}):", primary, other);
        let difference = result.difference(&compared)?;
        print_header(difference.len());
        for (p, total_lai) in result.total_lai.iter().enumerate() {
            let row: Vec<String> = difference
                .iter()
                .map(|d| format!("{:+9.4}", d[p]))
                .collect();
            println!("{total_lai:9.3} | {}", row.join(" | "));
        }
    }
    Ok(())
}

/// Build the species templates from the repeated per-species flags
fn species_templates(args: &Args) -> Result<Vec<SpeciesTemplate>, String> {
    if args.extinction.is_empty() {
        // Erectophile and planophile species sharing LAI evenly
        return Ok(vec![
            SpeciesTemplate::new(0.4, 1.0, 0.5).with_leaf_angle_ratio(0.5),
            SpeciesTemplate::new(0.6, 1.0, 0.5).with_leaf_angle_ratio(2.0),
        ]);
    }

    let n = args.extinction.len();
    for (flag, values) in [
        ("--height", &args.height),
        ("--share", &args.share),
        ("--x-ratio", &args.x_ratio),
    ] {
        if !values.is_empty() && values.len() != n {
            return Err(format!(
                "{flag} given {} times, expected {n} (once per --k)",
                values.len()
            ));
        }
    }

    Ok((0..n)
        .map(|i| {
            let template = SpeciesTemplate::new(
                args.extinction[i],
                args.height.get(i).copied().unwrap_or(1.0),
                args.share.get(i).copied().unwrap_or(1.0 / n as f64),
            );
            match args.x_ratio.get(i) {
                Some(&x) => template.with_leaf_angle_ratio(x),
                None => template,
            }
        })
        .collect())
}

/// Apply the atmosphere flags to a sub-daily selector
fn with_atmosphere(model: &PartitionModel, args: &Args) -> PartitionModel {
    match model {
        PartitionModel::SubDaily(_) => PartitionModel::SubDaily(
            SubDailyConfig::clear_sky()
                .with_atmospheric_transmittance(args.atm_transmittance)
                .with_atmospheric_pressure(Kilopascals::new(args.pressure))
                .with_leaf_transmittance(args.leaf_transmittance),
        ),
        other => other.clone(),
    }
}

fn print_header(species: usize) {
    let columns: Vec<String> = (1..=species)
        .map(|i| format!("{:>9}", format!("sp{i}")))
        .collect();
    println!("Total LAI | {}", columns.join(" | "));
    println!("----------|{}", vec!["-----------"; species].join("|"));
}

fn print_table(result: &SweepResult) {
    print_header(result.species_count());
    for (p, total_lai) in result.total_lai.iter().enumerate() {
        let row: Vec<String> = result
            .interception
            .iter()
            .map(|series| format!("{:9.4}", series[p]))
            .collect();
        println!("{total_lai:9.3} | {}", row.join(" | "));
    }
}
