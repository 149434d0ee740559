pub mod action;
pub mod action_queue;
pub mod ai;
pub mod calculators;
pub mod combatant;
pub mod engine;
pub mod events;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod tests;
