use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Attribute, BankMsg, Coin, CosmosMsg, Decimal, Fraction, StdError, StdResult, Uint128,
};

#[cw_serde]
pub struct SplitConfig {
    /// map receiver address to its share of the split
    pub receivers: BTreeMap<String, Decimal>,
}

impl SplitConfig {
    /// Replaces the two party receivers with the routers that will
    /// deliver to them, preserving their shares.
    pub fn remap_receivers_to_routers(
        &self,
        receiver_a: &str,
        router_a: String,
        receiver_b: &str,
        router_b: String,
    ) -> StdResult<SplitConfig> {
        let share_a = self
            .receivers
            .get(receiver_a)
            .ok_or_else(|| StdError::not_found(format!("receiver {receiver_a:?}")))?;
        let share_b = self
            .receivers
            .get(receiver_b)
            .ok_or_else(|| StdError::not_found(format!("receiver {receiver_b:?}")))?;

        Ok(SplitConfig {
            receivers: BTreeMap::from([(router_a, *share_a), (router_b, *share_b)]),
        })
    }

    /// Validate that all shares are added to one
    pub fn validate_shares(&self) -> StdResult<()> {
        if self.receivers.is_empty() {
            return Err(StdError::generic_err("split must have at least one receiver"));
        }

        let mut total_shares = Decimal::zero();
        for share in self.receivers.values() {
            total_shares = total_shares.checked_add(*share)?;
        }

        if total_shares != Decimal::one() {
            return Err(StdError::generic_err(format!(
                "shares must add up to 1.0, got {total_shares}"
            )));
        }

        Ok(())
    }

    /// Apportions `amount` by weight. Flooring leaves dust behind, which
    /// goes to the last receiver so the whole amount is always distributed.
    pub fn split_amount(&self, amount: Uint128) -> StdResult<Vec<(String, Uint128)>> {
        let mut remaining = amount;
        let mut entitlements = Vec::with_capacity(self.receivers.len());
        let last_index = self.receivers.len().saturating_sub(1);

        for (i, (addr, share)) in self.receivers.iter().enumerate() {
            let entitlement = if i == last_index {
                remaining
            } else {
                amount
                    .checked_multiply_ratio(share.numerator(), share.denominator())
                    .map_err(|e| StdError::generic_err(e.to_string()))?
            };
            remaining = remaining.checked_sub(entitlement)?;
            entitlements.push((addr.to_string(), entitlement));
        }

        Ok(entitlements)
    }

    pub fn get_transfer_messages(&self, amount: Uint128, denom: &str) -> StdResult<Vec<CosmosMsg>> {
        Ok(self
            .split_amount(amount)?
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(to_address, amount)| {
                CosmosMsg::Bank(BankMsg::Send {
                    to_address,
                    amount: vec![Coin {
                        denom: denom.to_string(),
                        amount,
                    }],
                })
            })
            .collect())
    }

    pub fn get_response_attribute(&self, denom: String) -> Attribute {
        let receivers = self
            .receivers
            .iter()
            .map(|(receiver, share)| format!("({receiver}:{share})"))
            .collect::<Vec<String>>()
            .join(",");
        Attribute::new(denom, format!("[{receivers}]"))
    }
}

pub fn remap_splits(
    splits: BTreeMap<String, SplitConfig>,
    (party_a_receiver, party_a_router): (String, String),
    (party_b_receiver, party_b_router): (String, String),
) -> StdResult<BTreeMap<String, SplitConfig>> {
    splits
        .into_iter()
        .map(|(denom, split)| {
            let remapped = split.remap_receivers_to_routers(
                &party_a_receiver,
                party_a_router.clone(),
                &party_b_receiver,
                party_b_router.clone(),
            )?;
            Ok((denom, remapped))
        })
        .collect()
}
