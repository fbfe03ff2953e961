//! Guard-then-act helpers shared by the pipeline stages.
//!
//! Every stage keeps an explicit state enum. On each tick the stage gathers
//! what it can observe (its own balances, the ICA address, the block time)
//! and asks the current state whether that observation allows a transition.
//! The check is pure so it can be unit tested without any chain context.

use cosmwasm_std::Attribute;

pub trait StateMachine {
    /// Everything the stage can observe when a tick lands
    type Observation;

    /// Whether `observed` allows the state to advance. Returning `false`
    /// means the tick is a no-op.
    fn precondition(&self, observed: &Self::Observation) -> bool;

    /// Position in the progress order. Transitions never decrease it.
    fn ordinal(&self) -> u8;

    fn is_terminal(&self) -> bool;

    /// Whether moving from `self` to `next` respects the progress order
    fn can_advance_to(&self, next: &Self) -> bool {
        next.ordinal() >= self.ordinal()
    }
}

pub fn noop_attributes(method: &str, reason: &str) -> Vec<Attribute> {
    vec![
        Attribute::new("method", method),
        Attribute::new("status", "noop"),
        Attribute::new("reason", reason),
    ]
}
