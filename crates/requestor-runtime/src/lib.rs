//! # requestor-runtime
//!
//! Schema collection and data export for the AI requestor service.
//!
//! Both operations are written against the [`DataSource`] trait so they can
//! run over a live MySQL catalog (`requestor-adapter-mysql`) or the
//! [`memory::MemoryDataSource`] used in tests.

pub mod collector;
pub mod exporter;
pub mod memory;
pub mod source;

pub use collector::collect_schema;
pub use exporter::export_data;
pub use source::DataSource;
