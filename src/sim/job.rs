use rustc_hash::FxHashSet;
use std::{collections::VecDeque, fs, path::Path, str::FromStr};

use crate::{
    core::state::Ticks,
    error::{FeedError, RecordError},
};

pub type JobId = u64;

/// Latest arrival time a record may carry; stats are signed tick counts.
pub const MAX_ARRIVAL: Ticks = i64::MAX as Ticks;

fn check_arrival(arrival_time: Ticks) -> Result<Ticks, RecordError> {
    if arrival_time > MAX_ARRIVAL {
        return Err(RecordError::ArrivalOutOfRange(arrival_time));
    }
    Ok(arrival_time)
}

/// A job descriptor as it appears in the feed, before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub bursts: Vec<Ticks>,
}

fn number<T: FromStr>(field: &'static str, token: Option<&str>) -> Result<T, RecordError> {
    let token = token.ok_or(RecordError::MissingField(field))?;
    token.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

/// `<id> <arrival> <num_bursts> <burst_1> ... <burst_n>`
impl FromStr for Job {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        let id = number("id", tokens.next())?;
        let arrival_time = check_arrival(number("arrival_time", tokens.next())?)?;
        let expected: usize = number("num_bursts", tokens.next())?;
        if expected == 0 {
            return Err(RecordError::NoBursts);
        }

        let bursts = tokens
            .map(|token| number::<Ticks>("burst", Some(token)))
            .collect::<Result<Vec<_>, _>>()?;
        if bursts.len() != expected {
            return Err(RecordError::BurstCountMismatch {
                expected,
                found: bursts.len(),
            });
        }
        if let Some(index) = bursts.iter().position(|&b| b == 0) {
            return Err(RecordError::ZeroBurst { index: index + 1 });
        }

        Ok(Self {
            id,
            arrival_time,
            bursts,
        })
    }
}

/// Parses a whole job file. Blank lines are skipped; line numbers in errors
/// are 1-based.
pub fn parse_jobs(text: &str) -> Result<Vec<Job>, FeedError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse()
                .map_err(|source| FeedError::Malformed { line: i + 1, source })
        })
        .collect()
}

pub fn read_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>, FeedError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(&text)
}

/// Jobs not yet admitted, in feed order.
#[derive(Debug, Default)]
pub struct JobFeed {
    jobs: VecDeque<Job>,
}

impl JobFeed {
    pub fn new(jobs: Vec<Job>) -> Result<Self, FeedError> {
        let mut seen = FxHashSet::default();
        for (i, job) in jobs.iter().enumerate() {
            if !seen.insert(job.id) {
                return Err(FeedError::DuplicateJob(job.id));
            }

            // Descriptors built in code skip the parser's checks
            let problem = if let Err(err) = check_arrival(job.arrival_time) {
                Some(err)
            } else if job.bursts.is_empty() {
                Some(RecordError::NoBursts)
            } else {
                job.bursts
                    .iter()
                    .position(|&b| b == 0)
                    .map(|index| RecordError::ZeroBurst { index: index + 1 })
            };
            if let Some(source) = problem {
                return Err(FeedError::Malformed { line: i + 1, source });
            }
        }

        Ok(Self { jobs: jobs.into() })
    }

    pub fn peek(&self) -> Option<&Job> {
        self.jobs.front()
    }

    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
