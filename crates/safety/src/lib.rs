//! Safety Filter — the gate that blocks or substitutes unsafe learner input
//! before it reaches response generation.

mod filter;

pub use filter::SafetyFilter;
