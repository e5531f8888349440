use xxhash_rust::xxh64::xxh64;

/// Bumped whenever the identity format or hash function changes, so cache
/// keys from an older scheme can never alias new ones.
pub const IDENTITY_HASH_VERSION: u32 = 1;

/// "PRCL" tag in the high half, scheme version in the low half.
const IDENTITY_HASH_SEED: u64 = (0x5052_434C_u64 << 32) | IDENTITY_HASH_VERSION as u64;

/// Content-addressed cache key of a variant identity string.
///
/// xxHash64 with a fixed seed: stable across runs, platforms and toolchains,
/// unlike `std`'s randomly keyed `DefaultHasher`.
pub fn identity_hash(identity: &str) -> u64 {
    xxh64(identity.as_bytes(), IDENTITY_HASH_SEED)
}
