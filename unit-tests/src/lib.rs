#![allow(clippy::too_many_arguments)]
#![allow(dead_code)]

#[cfg(test)]
pub mod setup;

#[cfg(test)]
pub mod test_native_router;
#[cfg(test)]
pub mod test_stride_liquid_staker;
#[cfg(test)]
pub mod test_two_party_covenant;
