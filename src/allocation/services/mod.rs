//! Allocation engine services.

mod engine;

pub use engine::{
    AllocationEngine, AllocationError, AllocationResult, DEFAULT_REMOVAL_GRACE_SECONDS,
    PlanAllocationRequest,
};
