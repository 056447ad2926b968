use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::buildcore::{AnyQueue, BoundedQueue, Item, QueueBuilder, QueueError, QueueKind, Retention};
use crate::core::config::{ConfigError, StressConfig};
use crate::core::log::{Logger, RoundEntry};

#[derive(Debug, Error)]
pub enum StressError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Totals of one stress run over a single representation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    pub kind: QueueKind,
    pub rounds: u64,
    pub appended: u64,
    pub rejected: u64,
    pub drained: u64,
    pub evicted: u64,
    pub elapsed_micros: u64,
}

/// Build a queue of `kind` from the config and stress it
pub fn stress_kind(kind: QueueKind, config: &StressConfig, logger: &mut Logger) -> Result<StressReport, StressError> {
    config.validate()?;
    let mut queue: AnyQueue<usize> = QueueBuilder::new(kind, config.initial_capacity)
        .overwritable(config.overwritable)
        .build()?;
    run_stress(&mut queue, config, logger)
}

/// Repeatedly resize, fill and drain `queue`, logging every round.
///
/// Round capacities come from `config.capacities()`; batch `i` of a round
/// appends `i` copies of `i` as one flattened argument.
pub fn run_stress(
    queue: &mut AnyQueue<usize>,
    config: &StressConfig,
    logger: &mut Logger,
) -> Result<StressReport, StressError> {
    config.validate()?;
    let kind = queue.kind();
    let leftover = queue.drain_all().len();
    if leftover > 0 {
        debug!(leftover, "discarded values present before the stress run");
    }

    let started = Instant::now();
    let mut report = StressReport {
        kind,
        rounds: 0,
        appended: 0,
        rejected: 0,
        drained: 0,
        evicted: 0,
        elapsed_micros: 0,
    };

    for capacity in config.capacities() {
        let round_started = Instant::now();
        queue.resize(capacity, Retention::KeepOldest)?;

        let mut appended = 0u64;
        let mut rejected = 0u64;
        for i in 0..config.batches {
            match queue.append(vec![Item::Many(vec![i; i])]) {
                Ok(()) => appended += i as u64,
                Err(QueueError::BufferFull { .. }) => rejected += i as u64,
                Err(err) => return Err(err.into()),
            }
        }
        let drained = queue.by_ref().count() as u64;

        let entry = RoundEntry {
            round: report.rounds,
            kind,
            capacity,
            appended,
            rejected,
            drained,
            elapsed_micros: round_started.elapsed().as_micros() as u64,
        };
        debug!(%entry, "stress round finished");
        report.rounds += 1;
        report.appended += appended;
        report.rejected += rejected;
        report.drained += drained;
        report.evicted += entry.evicted();
        logger.log(entry);
    }

    report.elapsed_micros = started.elapsed().as_micros() as u64;
    info!(
        %kind,
        rounds = report.rounds,
        drained = report.drained,
        evicted = report.evicted,
        elapsed_micros = report.elapsed_micros,
        "stress run finished"
    );
    Ok(report)
}
