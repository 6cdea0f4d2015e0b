//! # Approval Gate Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── queue_benchmarks.rs   # Queue throughput
//! └── src/integration/          # Cross-crate flows
//!     ├── approval_flows.rs     # queue + bus + arbiter, end to end
//!     └── surface_flows.rs      # single-flight popup behaviour
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ag-tests
//! cargo test -p ag-tests integration::surface_flows
//! cargo bench -p ag-tests
//! ```

pub mod integration;
