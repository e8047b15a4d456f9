//! Seeded random graph generators implementing [`tyro_core::GraphSource`].
//!
//! Every generator validates its parameters up front and rebuilds the same
//! graph from its seed on each load, so one source can feed several strategy
//! runs with identical starting conditions.

mod barabasi_albert;
mod erdos_renyi;
mod errors;
mod watts_strogatz;

pub use crate::{
    barabasi_albert::{BarabasiAlbert, BarabasiAlbertConfig},
    erdos_renyi::{ErdosRenyi, ErdosRenyiConfig},
    errors::SyntheticError,
    watts_strogatz::{WattsStrogatz, WattsStrogatzConfig},
};
