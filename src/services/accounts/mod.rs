pub mod lookup;
pub mod memory;
pub mod postgres;

pub use lookup::{Account, AccountKind, AccountLookup, LookupError, account_id_is_well_formed};
pub use memory::InMemoryAccounts;
pub use postgres::PgAccounts;
