//! Session snapshot stores.

pub mod memory;
pub mod pg_snapshot_repository;
pub mod schema;

pub use memory::InMemorySnapshotRepository;
pub use pg_snapshot_repository::PgSnapshotRepository;
