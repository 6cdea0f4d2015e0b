//! Cross-crate integration flows.
//!
//! Every test wires the real mirror bus, surface arbiter and in-memory
//! window host through `ApprovalContainer`; nothing is mocked.

pub mod approval_flows;
pub mod surface_flows;
