//! The Executor - single entry point to the record store.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate store operations and converts results to outputs.

use std::path::Path;

use tracing::{debug, info, warn};

use ledgerstore_core::LedgerAdapter;
use ledgerstore_engine::{AccessGate, KindRegistry, RecordStore, StoreConfig};

use crate::convert::convert_result;
use crate::handlers;
use crate::routes::RouteTable;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the record store.
///
/// The Executor is **stateless**: it holds the validated configuration but
/// no ledger state. Every call receives the adapter for its own host
/// transaction, and a fresh [`RecordStore`] is built on top of it.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use ledgerstore_executor::Executor;
///
/// let executor = Executor::new(StoreConfig::default())?;
///
/// let txn = ledger.begin(caller);
/// executor.invoke(&txn, "initLedger", &[])?;
/// let cars = executor.invoke(&txn, "queryCarsByOwner", &["Tomoko".to_string()])?;
/// txn.commit()?;
/// ```
#[derive(Debug)]
pub struct Executor {
    config: StoreConfig,
    registry: KindRegistry,
    routes: RouteTable,
}

impl Executor {
    /// Build an executor, validating the configuration and route table.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let registry = config.registry()?;
        let routes = RouteTable::build(&config.routes, &registry)?;
        info!(
            target: "ledgerstore::executor",
            kinds = registry.kinds().count(),
            routes = routes.len(),
            seed_records = config.seed.len(),
            "executor ready"
        );
        Ok(Executor {
            config,
            registry,
            routes,
        })
    }

    /// Build an executor from a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(StoreConfig::from_file(path)?)
    }

    /// The configuration this executor was built from
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Registered record kinds
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// The validated route table
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Access gate applied to guarded reads
    pub fn gate(&self) -> &AccessGate {
        &self.config.gate
    }

    /// Call a named function with positional arguments.
    ///
    /// Guarded routes check the caller against the gate before their
    /// arguments are bound. Returns the rendered boundary payload.
    pub fn invoke<L: LedgerAdapter + ?Sized>(
        &self,
        ledger: &L,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>> {
        info!(target: "ledgerstore::executor", function, tx_id = ledger.tx_id(), args = args.len(), "invoke");
        let result = self
            .routes
            .get(function)
            .and_then(|route| {
                if route.is_guarded() {
                    convert_result(self.config.gate.check(ledger))?;
                }
                route.bind(args, &self.registry)
            })
            .and_then(|cmd| self.execute(ledger, cmd))
            .and_then(|output| output.to_payload());
        if let Err(e) = &result {
            warn!(target: "ledgerstore::executor", function, code = e.code(), error = %e, "invoke failed");
        }
        result
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute<L: LedgerAdapter + ?Sized>(&self, ledger: &L, cmd: Command) -> Result<Output> {
        debug!(target: "ledgerstore::executor", command = cmd.name(), write = cmd.is_write(), "execute");
        let store = RecordStore::new(ledger, &self.registry);
        match cmd {
            Command::Read { key } => handlers::record::read(&store, key),
            Command::GuardedRead { key } => {
                handlers::gate::guarded_read(&store, &self.config.gate, key)
            }
            Command::Create { kind, key, fields } => {
                handlers::record::create(&store, kind, key, fields)
            }
            Command::UpdateField { key, field, value } => {
                handlers::record::update_field(&store, key, field, value)
            }
            Command::QueryRange { start, end } => handlers::query::query_range(&store, start, end),
            Command::QueryByIndex { index, value } => {
                handlers::query::query_by_index(&store, index, value)
            }
            Command::History { key } => handlers::history::history(&store, key),
            Command::Seed => handlers::record::seed(&store, &self.config.seed),
        }
    }

    /// Execute commands in order within one transaction.
    ///
    /// Every command runs even if an earlier one failed; the caller decides
    /// whether to commit.
    pub fn execute_many<L: LedgerAdapter + ?Sized>(
        &self,
        ledger: &L,
        cmds: Vec<Command>,
    ) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(ledger, cmd)).collect()
    }
}
