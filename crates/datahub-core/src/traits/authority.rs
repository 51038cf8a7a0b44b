//! Privileged-key resolution for system-reserved metadata blocks.

/// Decides whether the current actor holds the key that unlocks a
/// system-reserved metadata block.
///
/// General edit permission is resolved before the version workflow runs;
/// this trait covers only the narrower per-block key check.
pub trait PrivilegedKeyAuthority: Send + Sync + std::fmt::Debug + 'static {
    /// Return `true` if `supplied_key` unlocks `block_name`.
    fn actor_has_privileged_key(&self, block_name: &str, supplied_key: Option<&str>) -> bool;
}

/// Authority that never grants a key. Every system block is locked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllKeys;

impl PrivilegedKeyAuthority for DenyAllKeys {
    fn actor_has_privileged_key(&self, _block_name: &str, _supplied_key: Option<&str>) -> bool {
        false
    }
}
