//! Application services for routine deployment.

mod instantiator;

pub use instantiator::{Deployment, RoutineError, RoutineInstantiator, RoutineResult};
