pub mod astro_liquid_pooler;
pub mod holder;
pub mod native_splitter;
pub mod remote_chain_splitter;
pub mod single_party_covenant;
pub mod swap_covenant;
