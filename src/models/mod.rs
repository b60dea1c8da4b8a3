pub mod outcome;

pub use outcome::{Lookup, Method, NotFoundReason, ResolveOutcome};
