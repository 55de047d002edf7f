//! Domain model for task allocations.

mod allocation;
mod error;
mod ids;
mod status;

pub use allocation::TaskAllocation;
pub use error::{AllocationDomainError, ParseAllocationStatusError};
pub use ids::AllocationId;
pub use status::AllocationStatus;
