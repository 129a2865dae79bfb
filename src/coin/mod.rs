pub mod codec;
pub mod coin_trait;
pub mod moac;
pub mod rpc;
