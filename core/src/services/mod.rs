//! Business services containing the credential lifecycle logic.

pub mod access;
pub mod cache;
pub mod clock;
pub mod context;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use access::{PermissionResolver, PermissionResolverConfig};
pub use cache::{CacheStore, MemoryCacheStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::OpContext;
pub use otp::{OtpService, OtpServiceConfig};
pub use token::{
    JtiGenerator, SequentialJtiGenerator, TokenService, TokenServiceConfig, UuidJtiGenerator,
};
