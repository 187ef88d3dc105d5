pub mod html;
pub mod util;

mod errors;
pub use errors::ProviderError;

mod compliance;
pub use compliance::{COMPLIANCE_VERSION, Compliance};

mod challenge;
pub use challenge::{RemoteChallenge, RemoteDocument};

mod pages;
pub use pages::{ChallengePage, DEFAULT_LISTING_LIMIT, Leader, parse_challenge_page, parse_listing};

mod client;
pub use client::{DEFAULT_HOST, GolfClient};
