pub mod cir_client;
pub mod pubchem_client;

pub use cir_client::CirClient;
pub use pubchem_client::PubChemClient;
