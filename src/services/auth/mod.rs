pub mod clock;
pub mod credentials;
pub mod factory;
pub mod token_codec;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::AdminCredentials;
pub use factory::build_state;
pub use token_codec::{Claims, TokenCodec, TokenError};
