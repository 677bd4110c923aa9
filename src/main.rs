use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use deltawye::{algorithm::*, data, *};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "deltawye")]
#[command(about = "Delta-wye reduction of plane graphs")]
struct Cmd {
    /// Graph files list edge ids instead of neighbors
    #[arg(long, global = true)]
    incidence: bool,

    /// Seed for every random choice; fresh entropy if omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log every applied transformation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    #[command(flatten)]
    Run(Algorithm),
    /// Run an algorithm repeatedly and summarize the sequence lengths
    Batch {
        count: usize,
        #[command(subcommand)]
        algorithm: Algorithm,
    },
    /// Print vertex, edge, face, loop and parallel edge counts
    Stats { file: PathBuf },
    /// Print the graph in Graphviz DOT format
    Dot {
        file: PathBuf,
        /// Label edge ends with their clockwise rotation index
        #[arg(long)]
        rotation: bool,
    },
    /// Print the adjacency list of a generated graph
    Generate {
        #[command(subcommand)]
        shape: Shape,
    },
}

#[derive(Subcommand, Clone)]
enum Algorithm {
    /// Lens-based reduction of a 3-connected graph to K4
    Steinitz {
        /// random, min, max, pole or nonpole
        strategy: LensTriangleSelectionStrategy,
        file: PathBuf,
    },
    /// Edge-labelling reduction of a connected graph to K1
    Feoprovan {
        /// min, max or random
        start: StartVertexStrategy,
        /// random, minlabel, maxlabel, mindegree, maxdegree, vertexfirst or facefirst
        strategy: TransformSelectionStrategy,
        file: PathBuf,
        /// Report the edges created by each transformation
        #[arg(long)]
        new_edges: bool,
    },
    /// Randomized reduction of a 3-connected graph to K4
    Temperature {
        /// random, short or long
        strategy: TemperatureStrategy,
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum Shape {
    /// Wheel with `n` vertices
    Wheel { n: usize },
    /// Grid on a cylinder with `n` columns and `m` rows
    Cylinder { n: usize, m: usize },
}

impl Algorithm {
    fn file(&self) -> &Path {
        match self {
            Algorithm::Steinitz { file, .. }
            | Algorithm::Feoprovan { file, .. }
            | Algorithm::Temperature { file, .. } => file,
        }
    }

    fn build(&self, graph: &PlaneGraph, rng: StdRng) -> Result<Box<dyn ReductionAlgorithm>> {
        Ok(match *self {
            Algorithm::Steinitz { strategy, .. } => {
                Box::new(SteinitzGruenbaum::with_rng(graph, strategy, rng))
            }
            Algorithm::Feoprovan {
                start,
                strategy,
                new_edges,
                ..
            } => Box::new(
                FeoProvan::with_rng(graph, start, strategy, rng)?.with_report_new_edges(new_edges),
            ),
            Algorithm::Temperature { strategy, .. } => {
                Box::new(TemperatureReduction::with_rng(graph, strategy, rng))
            }
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();

    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(if cmd.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cmd.action {
        Action::Run(algorithm) => {
            let graph = load(algorithm.file(), cmd.incidence)?;
            single_run(algorithm.build(&graph, rng)?.as_mut())
        }
        Action::Batch { count, algorithm } => {
            ensure!(count > 0, "batch needs at least one iteration");
            let graph = load(algorithm.file(), cmd.incidence)?;
            batch(algorithm.build(&graph, rng)?.as_mut(), count)
        }
        Action::Stats { file } => {
            let graph = load(&file, cmd.incidence)?;
            print!("{}", GraphStatistics::new(&graph)?);
            Ok(())
        }
        Action::Dot { file, rotation } => {
            let graph = load(&file, cmd.incidence)?;
            let opt = PlaneGraphDotOptions {
                edge_ids: true,
                rotation,
            };
            print!("{}", graph.dot(opt));
            Ok(())
        }
        Action::Generate { shape } => generate(shape),
    }
}

fn load(file: &Path, incidence: bool) -> Result<PlaneGraph> {
    let graph = if incidence {
        read_incidence_list(file)?
    } else {
        read_adjacency_list(file)?
    };
    tracing::debug!("loaded {}: {graph}", file.display());
    Ok(graph)
}

fn single_run(algorithm: &mut dyn ReductionAlgorithm) -> Result<()> {
    println!("{algorithm}");
    println!();

    let sequence = algorithm.run()?;
    for step in &sequence {
        println!("{step}");
    }

    println!();
    println!("Reduction completed after {} steps.", sequence.len());
    println!(
        "Normalized reduction length: {}",
        algorithm.normalized_length(&sequence)
    );
    println!(
        "Number of Delta-Wye Transformations: {}",
        algorithm.delta_wye_count(&sequence)
    );
    println!(
        "Number of Wye-Delta Transformations: {}",
        algorithm.wye_delta_count(&sequence)
    );
    Ok(())
}

fn batch(algorithm: &mut dyn ReductionAlgorithm, count: usize) -> Result<()> {
    println!("{algorithm}");
    println!("Batch run: {count} iterations.");
    println!();

    let mut lengths = Vec::with_capacity(count);
    let mut normalized = Vec::with_capacity(count);

    for i in 1..=count {
        algorithm.reset()?;
        let sequence = algorithm.run()?;
        let length = algorithm.normalized_length(&sequence);
        println!(
            "Run {i} completed after {} steps with {} Delta-Wye and {} Wye-Delta transformations (normalized length: {length}).",
            sequence.len(),
            algorithm.delta_wye_count(&sequence),
            algorithm.wye_delta_count(&sequence),
        );
        lengths.push(sequence.len());
        normalized.push(length);
    }

    println!();
    println!("RESULTS:");
    summary(&lengths);
    println!();
    println!("NORMALIZED RESULTS:");
    summary(&normalized);
    Ok(())
}

fn summary(lengths: &[usize]) {
    let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) else {
        return;
    };
    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;

    println!("  Shortest sequence: {min}");
    println!("  Longest sequence: {max}");
    println!("  Average length: {average:.2}");
}

fn generate(shape: Shape) -> Result<()> {
    let rows = match shape {
        Shape::Wheel { n } => data::wheel(n).context("a wheel needs at least 4 vertices")?,
        Shape::Cylinder { n, m } => {
            data::cylinder(n, m).context("a cylinder needs at least 3 columns and 2 rows")?
        }
    };

    for row in rows {
        let row: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", row.join(" "));
    }
    Ok(())
}
