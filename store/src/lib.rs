mod error;
pub use error::StoreError;

mod paths;
pub use paths::Paths;

mod challenges;
pub use challenges::FsChallengeStore;

mod lookup;
pub use lookup::IdLookup;

mod credentials;
pub use credentials::ApiKey;
