// Submodules
pub mod core;
pub mod encrypt;
pub mod error;
pub mod general;
pub mod read_write_split;
pub mod sharding;

pub use core::{Config, RuleConfig};
pub use encrypt::{Encrypt, EncryptColumn, EncryptTable, Encryptor, EncryptorKind};
pub use error::Error;
pub use general::General;
pub use read_write_split::{ReadWriteSplit, ReadWriteStrategy};
pub use sharding::{ShardedTable, Sharding};
