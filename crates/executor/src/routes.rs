//! Route table: function names to typed commands
//!
//! The table is built once from the `[[routes]]` section of the store
//! configuration and is closed afterwards. Building it checks every route
//! against the kind registry, so a misconfigured route fails at startup
//! instead of on the first call. Binding a route turns positional string
//! arguments into a [`Command`], enforcing the route's arity.

use std::collections::BTreeMap;

use ledgerstore_engine::{KindRegistry, RouteConfig};

use crate::{Command, Error, Result};

/// A validated route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `read`: one argument, the key
    Read,
    /// `guarded_read`: one argument, the key
    GuardedRead,
    /// `create`: the key, then one value per field of `kind`
    Create {
        /// Record kind created by this route
        kind: String,
    },
    /// `update_field`: the key and the new value of `field`
    UpdateField {
        /// Field overwritten by this route
        field: String,
    },
    /// `query_range`: no arguments with fixed bounds, otherwise start and end
    QueryRange {
        /// Fixed `(start, end)` bounds
        bounds: Option<(String, String)>,
    },
    /// `query_by_index`: one argument, the indexed value
    QueryByIndex {
        /// Index queried by this route
        index: String,
    },
    /// `history`: the key; further arguments are ignored
    History,
    /// `seed`: no arguments
    Seed,
}

fn config_error(route: &RouteConfig, reason: impl std::fmt::Display) -> Error {
    Error::Config {
        reason: format!("route '{}': {}", route.name, reason),
    }
}

fn arity(expected: usize, args: &[String]) -> Result<()> {
    if args.len() != expected {
        return Err(Error::InvalidArgument {
            reason: format!("Incorrect number of arguments. Expecting {}", expected),
        });
    }
    Ok(())
}

impl Route {
    /// Validate one configured route
    pub fn from_config(config: &RouteConfig, registry: &KindRegistry) -> Result<Route> {
        let allowed: &[&str] = match config.op.as_str() {
            "create" => &["kind"],
            "update_field" => &["field"],
            "query_range" => &["start", "end"],
            "query_by_index" => &["index"],
            _ => &[],
        };
        let present = [
            ("kind", config.kind.is_some()),
            ("index", config.index.is_some()),
            ("field", config.field.is_some()),
            ("start", config.start.is_some()),
            ("end", config.end.is_some()),
        ];
        if let Some((param, _)) = present
            .iter()
            .find(|(param, set)| *set && !allowed.contains(param))
        {
            return Err(config_error(
                config,
                format!("'{}' does not apply to op '{}'", param, config.op),
            ));
        }

        let route = match config.op.as_str() {
            "read" => Route::Read,
            "guarded_read" => Route::GuardedRead,
            "history" => Route::History,
            "seed" => Route::Seed,
            "create" => {
                let kind = config
                    .kind
                    .as_deref()
                    .ok_or_else(|| config_error(config, "op 'create' requires 'kind'"))?;
                if !registry.contains(kind) {
                    return Err(config_error(config, format!("undeclared kind '{}'", kind)));
                }
                Route::Create {
                    kind: kind.to_string(),
                }
            }
            "update_field" => {
                let field = config
                    .field
                    .as_deref()
                    .ok_or_else(|| config_error(config, "op 'update_field' requires 'field'"))?;
                if !registry.kinds().any(|k| k.fields.iter().any(|f| f == field)) {
                    return Err(config_error(
                        config,
                        format!("no kind declares field '{}'", field),
                    ));
                }
                Route::UpdateField {
                    field: field.to_string(),
                }
            }
            "query_range" => match (&config.start, &config.end) {
                (Some(start), Some(end)) => Route::QueryRange {
                    bounds: Some((start.clone(), end.clone())),
                },
                (None, None) => Route::QueryRange { bounds: None },
                _ => {
                    return Err(config_error(
                        config,
                        "op 'query_range' needs both 'start' and 'end' or neither",
                    ))
                }
            },
            "query_by_index" => {
                let index = config.index.as_deref().ok_or_else(|| {
                    config_error(config, "op 'query_by_index' requires 'index'")
                })?;
                if registry.index_owner(index).is_none() {
                    return Err(config_error(config, format!("undeclared index '{}'", index)));
                }
                Route::QueryByIndex {
                    index: index.to_string(),
                }
            }
            other => return Err(config_error(config, format!("unknown op '{}'", other))),
        };
        Ok(route)
    }

    /// Whether the caller must pass the access gate before arguments are
    /// bound
    pub fn is_guarded(&self) -> bool {
        matches!(self, Route::GuardedRead)
    }

    /// Bind positional arguments into a command
    pub fn bind(&self, args: &[String], registry: &KindRegistry) -> Result<Command> {
        match self {
            Route::Read => {
                arity(1, args)?;
                Ok(Command::Read {
                    key: args[0].clone(),
                })
            }
            Route::GuardedRead => {
                arity(1, args)?;
                Ok(Command::GuardedRead {
                    key: args[0].clone(),
                })
            }
            Route::Create { kind } => {
                let record_kind = registry.get(kind)?;
                arity(record_kind.fields.len() + 1, args)?;
                let fields = record_kind.fields_from_args(&args[1..])?;
                Ok(Command::Create {
                    kind: kind.clone(),
                    key: args[0].clone(),
                    fields,
                })
            }
            Route::UpdateField { field } => {
                arity(2, args)?;
                Ok(Command::UpdateField {
                    key: args[0].clone(),
                    field: field.clone(),
                    value: args[1].clone(),
                })
            }
            Route::QueryRange {
                bounds: Some((start, end)),
            } => {
                arity(0, args)?;
                Ok(Command::QueryRange {
                    start: start.clone(),
                    end: end.clone(),
                })
            }
            Route::QueryRange { bounds: None } => {
                arity(2, args)?;
                Ok(Command::QueryRange {
                    start: args[0].clone(),
                    end: args[1].clone(),
                })
            }
            Route::QueryByIndex { index } => {
                arity(1, args)?;
                Ok(Command::QueryByIndex {
                    index: index.clone(),
                    value: args[0].clone(),
                })
            }
            Route::History => match args.first() {
                Some(key) => Ok(Command::History { key: key.clone() }),
                None => Err(Error::InvalidArgument {
                    reason: "Incorrect number of arguments. Expecting 1".to_string(),
                }),
            },
            Route::Seed => {
                arity(0, args)?;
                Ok(Command::Seed)
            }
        }
    }
}

/// Closed mapping from function names to routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, Route>,
}

impl RouteTable {
    /// Validate every configured route and build the table
    pub fn build(configs: &[RouteConfig], registry: &KindRegistry) -> Result<Self> {
        let mut routes = BTreeMap::new();
        for config in configs {
            if config.name.is_empty() {
                return Err(Error::Config {
                    reason: "route name cannot be empty".to_string(),
                });
            }
            let route = Route::from_config(config, registry)?;
            if routes.insert(config.name.clone(), route).is_some() {
                return Err(config_error(config, "declared twice"));
            }
        }
        Ok(RouteTable { routes })
    }

    /// Look up a function name
    pub fn get(&self, name: &str) -> Result<&Route> {
        self.routes.get(name).ok_or_else(|| Error::UnknownFunction {
            name: name.to_string(),
        })
    }

    /// Function names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.keys().map(String::as_str)
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the table has no routes
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
