use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};


/// Asserts that `$x` is an error whose full chain mentions `$e`.
/// A macro keeps the failing line in the trace.
macro_rules! is_error {
    ($x:expr, $e:expr) => {
        assert!(format!("{:#}", $x.unwrap_err()).contains($e))
    };
}
pub(crate) use is_error;

pub fn clock_contract() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        )
        .with_reply(crate::contract::reply)
        .with_migrate(crate::contract::migrate),
    )
}

/// Tick receiver that either counts ticks or fails them
pub fn clock_tester_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        covenant_clock_tester::contract::execute,
        covenant_clock_tester::contract::instantiate,
        covenant_clock_tester::contract::query,
    ))
}
