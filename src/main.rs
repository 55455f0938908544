use anyhow::{Context, Result};
use average::Estimate;
use burst_sim::{
    RunSummary,
    cli::Cli,
    sim::{generate, read_jobs},
    simulate,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let jobs = match (&cli.jobs, cli.workload()) {
        (_, Some(params)) => generate(&params, cli.seed),
        (Some(path), None) => read_jobs(path)?,
        (None, None) => anyhow::bail!("no job file given"),
    };

    let summary = simulate(cli.policy, jobs, &cli.sim_config())
        .with_context(|| format!("cannot run {:?} simulation", cli.policy))?;
    report(&summary);

    Ok(())
}

fn report(summary: &RunSummary) {
    for snapshot in &summary.snapshots {
        println!("CPU clock value = {}", snapshot.clock);
        println!("Number of jobs in ReadyQueue = {}", snapshot.ready);
        println!("Number of jobs in BlockedQueue = {}", snapshot.io_blocked);
        println!("Number of jobs completed = {}", snapshot.completed);
        println!();
    }

    for job in &summary.records {
        println!("ID: {}", job.id);
        println!("Arrived at {}", job.arrival_time);
        println!("Completed at {}", job.end_time);
        println!("Processing time {}", job.processing_time);
        println!("Waiting time {}", job.waiting_time);
        println!("Turn around time {}", job.turnaround_time);
        println!("CPU shots used {}", job.shots_used);
        println!();
    }

    println!("{}", summary.policy);
    println!("CPU clock value = {}", summary.final_clock);

    let Some(avg) = summary.averages else {
        println!("No jobs completed");
        return;
    };

    // Time to first run
    let response_times = summary
        .records
        .iter()
        .map(|j| j.start_time as f64 - j.arrival_time as f64);

    println!("Average processing time = {:.2}", avg.processing_time);
    println!("Average waiting time = {:.2}", avg.waiting_time);
    println!("Average turn around time = {:.2}", avg.turnaround_time);
    println!("Average shots used = {:.2}", avg.shots_used);
    println!("Average response time = {:.2}", mean(response_times));
    println!("Total I/O queue wait = {}", summary.io_wait_total);
    println!("Peak jobs in memory = {}", summary.peak_memory);
}

fn mean(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
