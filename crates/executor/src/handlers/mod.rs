//! Command handlers organized by concern.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `record` | Read, Create, UpdateField, Seed |
//! | `query` | QueryRange, QueryByIndex |
//! | `history` | History |
//! | `gate` | GuardedRead |

pub mod gate;
pub mod history;
pub mod query;
pub mod record;
