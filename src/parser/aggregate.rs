// Aggregator: run one task per block and merge results into a snapshot.
//
// Two phases separated by a join barrier. Phase one materializes info,
// programstatus and every host; phase two attaches services. A service can
// therefore never miss a host that exists anywhere in the file, whatever the
// scheduling order. Duplicates resolve by block index (last in file wins),
// never by completion order.

use super::decoder::decode_body;
use super::dispatch::{Record, convert};
use super::splitter::{BlockKind, RawBlock};
use crate::models::{Diagnostic, HostRecord, Info, ProgramStatus, ServiceRecord, StatusSnapshot};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// A value tagged with the index of the block it came from.
#[derive(Debug)]
struct Versioned<T> {
    block: usize,
    value: T,
}

/// State built in phase one.
#[derive(Debug, Default)]
struct Materialized {
    info: Option<Versioned<Info>>,
    program_status: Option<Versioned<ProgramStatus>>,
    hosts: HashMap<String, Versioned<HostRecord>>,
}

type ServiceTable = HashMap<String, Versioned<ServiceRecord>>;

/// Per-host service tables. The outer map is read-only during phase two;
/// each table has its own lock so services of different hosts never contend.
type LockTable = HashMap<String, Mutex<ServiceTable>>;

type Diagnostics = Arc<Mutex<Vec<Diagnostic>>>;

/// Merges `blocks` into a snapshot. Must run inside a Tokio runtime.
#[instrument(skip(blocks), fields(blocks = blocks.len()))]
pub async fn aggregate(blocks: Vec<RawBlock>) -> StatusSnapshot {
    let diagnostics: Diagnostics = Arc::default();

    let (closed, unterminated): (Vec<_>, Vec<_>) = blocks.into_iter().partition(|b| b.closed);
    for block in unterminated {
        warn!(block = block.index, kind = %block.kind, "block never closed; dropped");
        lock(&diagnostics).push(Diagnostic::UnterminatedBlock {
            block: block.index,
            block_kind: block.kind.to_string(),
            lines: block.body.len(),
        });
    }

    let (services, others): (Vec<_>, Vec<_>) = closed
        .into_iter()
        .partition(|b| b.kind == BlockKind::ServiceStatus);

    // Phase one: hosts and singletons.
    let state = Arc::new(Mutex::new(Materialized::default()));
    let mut tasks = JoinSet::new();
    let mut ignored = 0usize;
    for block in others {
        if matches!(block.kind, BlockKind::Other(_)) {
            ignored += 1;
            continue;
        }
        let state = state.clone();
        let diagnostics = diagnostics.clone();
        tasks.spawn(async move {
            if let Some((index, record)) = decode_block(block, &diagnostics) {
                merge_primary(&mut lock(&state), index, record);
            }
        });
    }
    join_all(&mut tasks).await;
    let Materialized {
        info,
        program_status,
        hosts,
    } = std::mem::take(&mut *lock(&state));

    // Phase two: services under their hosts.
    let lock_table: Arc<LockTable> = Arc::new(
        hosts
            .keys()
            .map(|name| (name.clone(), Mutex::default()))
            .collect(),
    );
    for block in services {
        let lock_table = lock_table.clone();
        let diagnostics = diagnostics.clone();
        tasks.spawn(async move {
            if let Some((index, record)) = decode_block(block, &diagnostics) {
                attach_service(&lock_table, &diagnostics, index, record);
            }
        });
    }
    join_all(&mut tasks).await;

    let hosts = hosts
        .into_iter()
        .map(|(name, Versioned { value: mut host, .. })| {
            if let Some(table) = lock_table.get(&name) {
                host.services = std::mem::take(&mut *lock(table))
                    .into_iter()
                    .map(|(desc, svc)| (desc, svc.value))
                    .collect();
            }
            (name, host)
        })
        .collect();

    let mut diagnostics = std::mem::take(&mut *lock(&diagnostics));
    diagnostics.sort_by_key(Diagnostic::block);

    debug!(
        operation = "aggregate",
        ignored_blocks = ignored,
        dropped_blocks = diagnostics.len(),
        "aggregation complete"
    );

    StatusSnapshot {
        info: info.map(|v| v.value).unwrap_or_default(),
        program_status: program_status.map(|v| v.value).unwrap_or_default(),
        hosts,
        diagnostics,
    }
}

/// Decodes and converts one block; a failure becomes a diagnostic.
fn decode_block(block: RawBlock, diagnostics: &Mutex<Vec<Diagnostic>>) -> Option<(usize, Record)> {
    let RawBlock {
        index, kind, body, ..
    } = block;
    match convert(&kind, decode_body(&body)) {
        Ok(record) => record.map(|r| (index, r)),
        Err(reason) => {
            warn!(block = index, kind = %kind, error = %reason, "skipping undecodable block");
            lock(diagnostics).push(Diagnostic::SkippedBlock {
                block: index,
                block_kind: kind.to_string(),
                reason,
            });
            None
        }
    }
}

fn merge_primary(state: &mut Materialized, index: usize, record: Record) {
    match record {
        Record::Info(info) => keep_latest(&mut state.info, index, info),
        Record::ProgramStatus(status) => keep_latest(&mut state.program_status, index, status),
        Record::Host { name, record } => upsert_latest(&mut state.hosts, name, index, record),
        Record::Service { .. } => {}
    }
}

fn attach_service(
    lock_table: &LockTable,
    diagnostics: &Mutex<Vec<Diagnostic>>,
    index: usize,
    record: Record,
) {
    let Record::Service {
        host_name,
        description,
        record,
    } = record
    else {
        return;
    };
    match lock_table.get(&host_name) {
        Some(table) => upsert_latest(&mut lock(table), description, index, record),
        None => {
            warn!(
                block = index,
                host = %host_name,
                service = %description,
                "service references unknown host; dropped"
            );
            lock(diagnostics).push(Diagnostic::UnresolvedService {
                block: index,
                host_name,
                service_description: description,
            });
        }
    }
}

fn keep_latest<T>(slot: &mut Option<Versioned<T>>, block: usize, value: T) {
    if slot.as_ref().is_none_or(|cur| cur.block < block) {
        *slot = Some(Versioned { block, value });
    }
}

fn upsert_latest<K: Eq + Hash, T>(map: &mut HashMap<K, Versioned<T>>, key: K, block: usize, value: T) {
    match map.entry(key) {
        Entry::Occupied(mut e) => {
            if e.get().block < block {
                e.insert(Versioned { block, value });
            }
        }
        Entry::Vacant(e) => {
            e.insert(Versioned { block, value });
        }
    }
}

async fn join_all(tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            warn!(error = %e, operation = "aggregate", "block task failed");
        }
    }
}

/// Every critical section here leaves the data consistent, so a poisoned
/// lock is still safe to use.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
