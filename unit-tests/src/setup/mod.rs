use const_format::concatcp;
use cosmwasm_std::MemoryStorage;
use cw_multi_test::{addons::MockApiBech32, App, BankKeeper, WasmKeeper};
use neutron_sdk::bindings::{msg::NeutronMsg, query::NeutronQuery};

use self::custom_module::NeutronKeeper;

pub mod base_suite;
pub mod instantiates;

pub type CustomApp = App<
    BankKeeper,
    MockApiBech32,
    MemoryStorage,
    NeutronKeeper,
    WasmKeeper<NeutronMsg, NeutronQuery>,
>;

// Denoms
pub const DENOM_FALLBACK: &str = "ufallback";
pub const DENOM_ATOM: &str = "uatom";
pub const DENOM_NTRN: &str = "untrn";

// Addrs
pub const FAUCET: &str = "faucet_addr";
pub const ADMIN: &str = "admin_addr";

// Salts for easier use (can append a number if more then 1 contract is needed)
pub const CLOCK_SALT: &str = "clock";
pub const IBC_FORWARDER_SALT: &str = "ibc_forwarder";
pub const REMOTE_CHAIN_SPLITTER_SALT: &str = "remote_chain_splitter";
pub const STRIDE_STAKER_SALT: &str = "stride_staker";
pub const ASTRO_LIQUID_POOLER_SALT: &str = "astro_liquid_pooler";
pub const HOLDER_SALT: &str = "holder";
pub const NATIVE_SPLITTER_SALT: &str = "native_splitter";
pub const NATIVE_ROUTER_SALT: &str = "native_router";
pub const INTERCHAIN_ROUTER_SALT: &str = "interchain_router";
pub const TWO_PARTY_COVENANT_SALT: &str = "two_party_pol_covenant";
pub const SINGLE_PARTY_COVENANT_SALT: &str = "single_party_pol_covenant";
pub const SWAP_HOLDER_SALT: &str = "swap_holder";
pub const SWAP_COVENANT_SALT: &str = "swap_covenant";

// Channels between the chains
pub const NTRN_HUB_CHANNEL: (&str, &str) = ("channel-1", "channel-100");
pub const NTRN_STRIDE_CHANNEL: (&str, &str) = ("channel-4", "channel-400");
pub const HUB_STRIDE_CHANNEL: (&str, &str) = ("channel-5", "channel-500");

// IBC denoms

/// ntrn -> hub
pub const DENOM_FALLBACK_ON_HUB: &'static str = concatcp!(NTRN_HUB_CHANNEL.1, "/", DENOM_FALLBACK);
/// hub -> ntrn
pub const DENOM_ATOM_ON_NTRN: &'static str = concatcp!(NTRN_HUB_CHANNEL.0, "/", DENOM_ATOM);
/// ntrn -> hub
pub const DENOM_NTRN_ON_HUB: &'static str = concatcp!(NTRN_HUB_CHANNEL.1, "/", DENOM_NTRN);
/// hub -> stride, liquid staked through autopilot
pub const DENOM_LS_ATOM_ON_STRIDE: &'static str =
    concatcp!(HUB_STRIDE_CHANNEL.1, "/", DENOM_ATOM);
/// hub -> stride -> ntrn
pub const DENOM_LS_ATOM_ON_NTRN: &'static str =
    concatcp!(NTRN_STRIDE_CHANNEL.0, "/", DENOM_LS_ATOM_ON_STRIDE);

/// This is used to fund the fuacet with all possible denoms we have.
/// so funding accounts and addresses can be done using the transfer msg
/// To fund the fuacet with another denom, just add the denom to the array
pub const ALL_DENOMS: &'static [&'static str] = &[
    DENOM_ATOM,
    DENOM_NTRN,
    DENOM_FALLBACK,
    DENOM_ATOM_ON_NTRN,
    DENOM_LS_ATOM_ON_STRIDE,
    DENOM_LS_ATOM_ON_NTRN,
];
