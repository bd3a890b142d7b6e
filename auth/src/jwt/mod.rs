pub mod claims;
pub mod clock;
pub mod codec;
pub mod errors;
pub mod provider;

pub use claims::Claims;
pub use claims::Header;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use codec::DecodedToken;
pub use errors::TokenError;
pub use provider::TokenProvider;
