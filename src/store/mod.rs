//! External store contracts and reference implementations
//!
//! The resolver's two optional reads (workflow → project, credential →
//! project) and the relational membership table live behind traits here.
//! The in-memory implementations back the CLI and the test suites.

pub mod fixtures;
pub mod memory;
pub mod sharing;

pub use fixtures::{FixtureSet, MembershipRow};
pub use memory::{InMemoryMembershipStore, InMemorySharingStore};
pub use sharing::{MembershipStore, SharedMembershipStore, SharedSharingStore, SharingStore};
