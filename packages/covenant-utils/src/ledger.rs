//! Chain balances are shared, process-wide state that no stage owns.
//! Stages read and move funds only through this interface.

use cosmwasm_std::{BankMsg, Coin, CustomQuery, QuerierWrapper, StdError, StdResult, Uint128};

pub trait Ledger {
    fn balance_of(&self, addr: &str, denom: &str) -> StdResult<Uint128>;

    /// Inbound leg: message crediting `coins` to `to`
    fn credit(&self, to: &str, coins: Vec<Coin>) -> BankMsg {
        BankMsg::Send {
            to_address: to.to_string(),
            amount: coins,
        }
    }

    /// Outbound leg: fails unless `from` holds every coin in `coins`
    fn debit(&self, from: &str, coins: Vec<Coin>) -> StdResult<Vec<Coin>> {
        for coin in coins.iter() {
            let held = self.balance_of(from, &coin.denom)?;
            if held < coin.amount {
                return Err(StdError::generic_err(format!(
                    "insufficient {} balance of {from}: {held} < {}",
                    coin.denom, coin.amount
                )));
            }
        }
        Ok(coins)
    }

    /// Debits `from`, which must be the executing contract, and credits `to`
    fn transfer(&self, from: &str, to: &str, coins: Vec<Coin>) -> StdResult<BankMsg> {
        let debited = self.debit(from, coins)?;
        Ok(self.credit(to, debited))
    }

    /// Balances of every listed denom, skipping the empty ones
    fn non_zero_balances(&self, addr: &str, denoms: &[String]) -> StdResult<Vec<Coin>> {
        let mut balances = vec![];
        for denom in denoms {
            let amount = self.balance_of(addr, denom)?;
            if !amount.is_zero() {
                balances.push(Coin {
                    denom: denom.to_string(),
                    amount,
                });
            }
        }
        Ok(balances)
    }
}

/// Ledger backed by the host chain bank module. Balances of interchain
/// accounts are not visible here, see `icq`.
pub struct BankLedger<'a, C: CustomQuery> {
    querier: QuerierWrapper<'a, C>,
}

impl<'a, C: CustomQuery> BankLedger<'a, C> {
    pub fn new(querier: QuerierWrapper<'a, C>) -> Self {
        Self { querier }
    }
}

impl<'a, C: CustomQuery> Ledger for BankLedger<'a, C> {
    fn balance_of(&self, addr: &str, denom: &str) -> StdResult<Uint128> {
        Ok(self.querier.query_balance(addr, denom)?.amount)
    }
}
