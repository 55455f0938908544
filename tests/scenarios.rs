use burst_sim::{
    AdmissionMode, JobStats, PolicyKind, Sim, SimConfig, SimError,
    core::{CpuSnapshot, SchedEvent, Ticks},
    error::{ConfigError, FeedError},
    scheduler::{Fcfs, Policy, RoundRobin, Sjf},
    sim::{Job, parse_jobs},
    simulate,
};
use pretty_assertions::assert_eq;

fn jobs(text: &str) -> Vec<Job> {
    parse_jobs(text).unwrap()
}

fn record(records: &[JobStats], id: u64) -> JobStats {
    *records.iter().find(|r| r.id == id).unwrap()
}

fn completion_order(records: &[JobStats]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

// Steps the simulation to the end, keeping each event with the clock value
// observed after the step that produced it.
fn trace<P: Policy>(jobs: Vec<Job>, config: &SimConfig) -> Vec<(Ticks, SchedEvent)> {
    let mut sim = Sim::<P>::new(jobs, config).unwrap();
    let mut out = Vec::new();
    while !sim.is_finished() {
        let events = sim.step();
        let now = sim.core.now();
        out.extend(events.into_iter().map(|e| (now, e)));
    }
    out
}

#[test]
fn fcfs_single_burst() {
    let summary = simulate(PolicyKind::Fcfs, jobs("1 0 1 5"), &SimConfig::default()).unwrap();

    assert_eq!(
        summary.records,
        vec![JobStats {
            id: 1,
            arrival_time: 0,
            start_time: 0,
            end_time: 5,
            processing_time: 5,
            waiting_time: 0,
            turnaround_time: 5,
            shots_used: 1,
        }]
    );
    assert_eq!(summary.final_clock, 5);
    assert_eq!(summary.policy, "FCFS");
}

#[test]
fn sjf_runs_shorter_job_first() {
    let summary = simulate(
        PolicyKind::Sjf,
        jobs("1 0 1 7\n2 0 1 3"),
        &SimConfig::default(),
    )
    .unwrap();

    assert_eq!(completion_order(&summary.records), vec![2, 1]);
    let short = record(&summary.records, 2);
    let long = record(&summary.records, 1);
    assert_eq!((short.end_time, short.waiting_time), (3, 0));
    assert_eq!((long.end_time, long.waiting_time), (10, 3));
    assert_eq!(summary.final_clock, 10);
}

#[test]
fn round_robin_preempts_on_quantum() {
    let config = SimConfig::default().with_quantum(3);
    let events = trace::<RoundRobin>(jobs("1 0 1 7"), &config);

    let preempted_at: Vec<Ticks> = events
        .iter()
        .filter(|(_, e)| matches!(e, SchedEvent::Preempted { .. }))
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(preempted_at, vec![3, 6]);

    let done = events
        .iter()
        .find_map(|(_, e)| match e {
            SchedEvent::Completed(stats) => Some(*stats),
            _ => None,
        })
        .unwrap();
    assert_eq!(done.end_time, 7);
    assert_eq!(done.shots_used, 3);
    assert_eq!(done.waiting_time, 0);
}

#[test]
fn round_robin_interleaves_jobs() {
    let config = SimConfig::default().with_quantum(2);
    let summary = simulate(PolicyKind::Rr, jobs("1 0 1 5\n2 0 1 3"), &config).unwrap();

    assert_eq!(completion_order(&summary.records), vec![2, 1]);
    let a = record(&summary.records, 1);
    let b = record(&summary.records, 2);
    assert_eq!((b.end_time, b.waiting_time, b.shots_used), (7, 4, 2));
    assert_eq!((a.end_time, a.waiting_time, a.shots_used), (8, 3, 3));
}

#[test]
fn io_burst_rejoins_after_device_time() {
    let events = trace::<Fcfs>(jobs("1 0 2 4 4"), &SimConfig::default());

    assert!(events.contains(&(
        4,
        SchedEvent::Blocked {
            job: 1,
            io_completion: 14
        }
    )));
    // Returned during the 14 -> 15 tick
    assert!(events.contains(&(15, SchedEvent::Unblocked { job: 1 })));

    let stats = events
        .iter()
        .find_map(|(_, e)| match e {
            SchedEvent::Completed(stats) => Some(*stats),
            _ => None,
        })
        .unwrap();
    assert_eq!(stats.processing_time, 18);
    assert_eq!(stats.end_time, 19);
    assert_eq!(stats.waiting_time, 1);
    assert_eq!(stats.shots_used, 2);
}

#[test]
fn io_device_is_shared_serially() {
    let summary = simulate(
        PolicyKind::Fcfs,
        jobs("1 0 2 2 1\n2 0 2 2 1"),
        &SimConfig::default(),
    )
    .unwrap();

    // Job 2 blocks at 4 behind job 1's I/O (done at 12): waits 8 then 10
    assert_eq!(summary.io_wait_total, 8);

    let first = record(&summary.records, 1);
    let second = record(&summary.records, 2);
    assert_eq!((first.end_time, first.waiting_time), (14, 1));
    assert_eq!(second.processing_time, 13);
    assert_eq!((second.end_time, second.waiting_time), (24, 11));
    assert_eq!(summary.final_clock, 24);
}

#[test]
fn fcfs_keeps_admission_order() {
    let summary = simulate(
        PolicyKind::Fcfs,
        jobs("1 0 1 4\n2 0 1 2\n3 0 1 6"),
        &SimConfig::default(),
    )
    .unwrap();

    assert_eq!(completion_order(&summary.records), vec![1, 2, 3]);
    let ends: Vec<Ticks> = summary.records.iter().map(|r| r.end_time).collect();
    assert_eq!(ends, vec![4, 6, 12]);
}

#[test]
fn sjf_does_not_interrupt_running_burst() {
    let config = SimConfig::default().with_admission(AdmissionMode::ArrivalGated);
    let summary = simulate(PolicyKind::Sjf, jobs("1 0 1 5\n2 1 1 1"), &config).unwrap();

    assert_eq!(completion_order(&summary.records), vec![1, 2]);
    let late = record(&summary.records, 2);
    assert_eq!(late.start_time, 5);
    assert_eq!(late.end_time, 6);
    assert_eq!(late.turnaround_time, 5);
    assert_eq!(late.waiting_time, 4);
}

#[test]
fn gated_admission_idles_until_arrival() {
    let config = SimConfig::default().with_admission(AdmissionMode::ArrivalGated);
    let summary = simulate(PolicyKind::Fcfs, jobs("1 10 1 2"), &config).unwrap();

    let job = record(&summary.records, 1);
    assert_eq!(job.start_time, 10);
    assert_eq!(job.end_time, 12);
    assert_eq!(job.waiting_time, 0);
}

#[test]
fn memory_never_exceeds_capacity() {
    let text: String = (1..=25).map(|id| format!("{id} 0 1 1\n")).collect();
    let summary = simulate(PolicyKind::Fcfs, jobs(&text), &SimConfig::default()).unwrap();

    assert_eq!(summary.peak_memory, 10);
    assert_eq!(summary.jobs_completed, 25);
    assert_eq!(summary.final_clock, 25);
    assert_eq!(completion_order(&summary.records), (1..=25).collect::<Vec<_>>());
}

#[test]
fn fcfs_reports_periodic_snapshots() {
    let events = trace::<Fcfs>(jobs("1 0 1 450"), &SimConfig::default());
    let snapshots: Vec<CpuSnapshot> = events
        .into_iter()
        .filter_map(|(_, e)| match e {
            SchedEvent::Snapshot(s) => Some(s),
            _ => None,
        })
        .collect();

    assert_eq!(
        snapshots,
        vec![
            CpuSnapshot {
                clock: 200,
                ready: 1,
                io_blocked: 0,
                completed: 0
            },
            CpuSnapshot {
                clock: 400,
                ready: 1,
                io_blocked: 0,
                completed: 0
            },
        ]
    );

    let sjf = trace::<Sjf>(jobs("1 0 1 450"), &SimConfig::default());
    assert!(!sjf.iter().any(|(_, e)| matches!(e, SchedEvent::Snapshot(_))));
}

#[test]
fn summary_carries_fcfs_snapshots() {
    let summary = simulate(
        PolicyKind::Fcfs,
        jobs("1 0 1 450\n2 0 2 5 5"),
        &SimConfig::default(),
    )
    .unwrap();
    let clocks: Vec<Ticks> = summary.snapshots.iter().map(|s| s.clock).collect();
    assert_eq!(clocks, vec![200, 400]);
    assert_eq!(summary.snapshots[0].ready, 2);

    let quiet = SimConfig {
        snapshot_interval: None,
        ..SimConfig::default()
    };
    let summary = simulate(PolicyKind::Fcfs, jobs("1 0 1 450"), &quiet).unwrap();
    assert!(summary.snapshots.is_empty());

    let summary = simulate(PolicyKind::Sjf, jobs("1 0 1 450"), &SimConfig::default()).unwrap();
    assert!(summary.snapshots.is_empty());
}

#[test]
fn gated_far_arrival_skips_idle_time() {
    let config = SimConfig::default().with_admission(AdmissionMode::ArrivalGated);
    let far: Ticks = 1_000_000_000_000;
    let mut sim = Sim::<Fcfs>::new(jobs(&format!("1 0 1 2\n2 {far} 1 3")), &config).unwrap();

    let mut steps = 0;
    let mut jumped = Vec::new();
    while !sim.is_finished() {
        for event in sim.step() {
            if let SchedEvent::IdleUntil { clock } = event {
                jumped.push(clock);
            }
        }
        steps += 1;
        assert!(steps < 100, "still idling at clock {}", sim.core.now());
    }

    assert_eq!(jumped, vec![far]);
    let late = record(sim.records(), 2);
    assert_eq!((late.start_time, late.end_time), (far, far + 3));
    assert_eq!(late.waiting_time, 0);
}

#[test]
fn core_state_is_visible_read_only() {
    let mut sim = Sim::<RoundRobin>::new(
        jobs("1 0 1 3\n2 0 2 1 1"),
        &SimConfig::default().with_quantum(2),
    )
    .unwrap();
    sim.step();

    let ctx = sim.core.ctx();
    assert_eq!(ctx.now(), 1);
    assert_eq!(ctx.ready_len(), 2);
    assert_eq!(ctx.io_blocked_len(), 0);
    assert_eq!(ctx.ready_jobs().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(ctx.jobs_in_memory(), 2);
    assert_eq!(sim.core.policy().quantum().get(), 2);
}

#[test]
fn empty_feed_completes_nothing() {
    let summary = simulate(PolicyKind::Sjf, Vec::new(), &SimConfig::default()).unwrap();
    assert_eq!(summary.final_clock, 0);
    assert_eq!(summary.jobs_completed, 0);
    assert!(summary.averages.is_none());
}

#[test]
fn averages_cover_all_jobs() {
    let summary = simulate(
        PolicyKind::Sjf,
        jobs("1 0 1 7\n2 0 1 3"),
        &SimConfig::default(),
    )
    .unwrap();
    let avg = summary.averages.unwrap();

    assert_eq!(avg.processing_time, 5.0);
    assert_eq!(avg.waiting_time, 1.5);
    assert_eq!(avg.turnaround_time, 6.5);
    assert_eq!(avg.shots_used, 1.0);
}

#[test]
fn bad_configuration_fails_before_running() {
    let err = simulate(PolicyKind::Rr, jobs("1 0 1 5"), &SimConfig::default()).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::MissingQuantum)));

    let config = SimConfig::default().with_quantum(0);
    let err = simulate(PolicyKind::Rr, jobs("1 0 1 5"), &config).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::InvalidQuantum(0))));

    let err = simulate(
        PolicyKind::Fcfs,
        jobs("1 0 1 5\n1 0 1 2"),
        &SimConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::Feed(FeedError::DuplicateJob(1))));
}
