pub mod branch;
pub mod credential;
pub mod plafond;

pub use branch::PostgresBranchRepository;
pub use credential::PostgresCredentialStore;
pub use plafond::PostgresPlafondRepository;
