//! dm-migrate - Version engine for datamigrate
//!
//! Moves the data migration cursor up (loading CSV data) or down (truncating
//! tables) against any [`dm_db::Database`], and scaffolds new descriptors from
//! schema migrations.

pub mod engine;
pub mod error;
pub mod scaffold;

pub use engine::{MigrationReport, Migrator, ProgressFn, Status, StepReport};
pub use error::{EngineError, EngineResult};
pub use scaffold::{create_descriptor, Scaffold};
