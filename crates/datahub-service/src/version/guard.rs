//! Protection of system-reserved metadata blocks.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use datahub_core::config::VersioningConfig;
use datahub_core::error::AppError;
use datahub_core::result::AppResult;
use datahub_core::traits::authority::PrivilegedKeyAuthority;
use datahub_entity::field::{BlockFields, FieldTree};

use crate::field::FieldNormalizer;

/// Privileged-key authority backed by the `versioning.system_blocks`
/// configuration: a block is unlocked when the supplied key equals the
/// configured one.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredKeyAuthority {
    keys: HashMap<String, String>,
}

impl ConfiguredKeyAuthority {
    /// Creates an authority from block name → key pairs.
    pub fn new(keys: HashMap<String, String>) -> Self {
        Self { keys }
    }
}

impl PrivilegedKeyAuthority for ConfiguredKeyAuthority {
    fn actor_has_privileged_key(&self, block_name: &str, supplied_key: Option<&str>) -> bool {
        match (self.keys.get(block_name), supplied_key) {
            (Some(expected), Some(supplied)) => expected == supplied,
            _ => false,
        }
    }
}

/// Rejects changes to system-reserved blocks unless the actor holds the
/// block's privileged key.
#[derive(Debug, Clone)]
pub struct SystemMetadataGuard {
    system_blocks: BTreeSet<String>,
    authority: Arc<dyn PrivilegedKeyAuthority>,
    normalizer: FieldNormalizer,
}

impl SystemMetadataGuard {
    /// Creates a guard for `system_blocks`, consulting `authority` for keys.
    pub fn new<I, S>(system_blocks: I, authority: Arc<dyn PrivilegedKeyAuthority>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            system_blocks: system_blocks.into_iter().map(Into::into).collect(),
            authority,
            normalizer: FieldNormalizer::new(),
        }
    }

    /// Builds a guard whose blocks and keys come from configuration.
    pub fn from_config(config: &VersioningConfig) -> Self {
        Self::new(
            config.system_blocks.keys().cloned(),
            Arc::new(ConfiguredKeyAuthority::new(config.system_blocks.clone())),
        )
    }

    /// Whether `block_name` is system-reserved.
    pub fn is_system_block(&self, block_name: &str) -> bool {
        self.system_blocks.contains(block_name)
    }

    /// Whether any system block differs between `old` and `new`.
    pub fn diff_touches_system_block(&self, old: &FieldTree, new: &FieldTree) -> bool {
        !self.touched_system_blocks(old, new).is_empty()
    }

    /// System blocks whose tidied content differs between `old` and `new`.
    /// Placeholders and surrounding whitespace do not count as changes.
    pub fn touched_system_blocks(&self, old: &FieldTree, new: &FieldTree) -> Vec<String> {
        self.system_blocks
            .iter()
            .filter(|block| self.tidied(old, block) != self.tidied(new, block))
            .cloned()
            .collect()
    }

    /// Fails with an authorization error if `new` changes a system block
    /// relative to `old` and `privileged_key` does not unlock it.
    pub fn check(
        &self,
        old: &FieldTree,
        new: &FieldTree,
        privileged_key: Option<&str>,
    ) -> AppResult<()> {
        for block in self.touched_system_blocks(old, new) {
            if !self.authority.actor_has_privileged_key(&block, privileged_key) {
                warn!(block = %block, "System metadata change without a valid key");
                return Err(AppError::authorization(format!(
                    "Metadata block '{block}' is system-reserved and requires a valid key to change"
                )));
            }
            debug!(block = %block, "System metadata change authorized");
        }
        Ok(())
    }

    fn tidied(&self, tree: &FieldTree, block: &str) -> Option<BlockFields> {
        let fields = tree.block(block)?.clone();
        let mut single = FieldTree::new();
        *single.block_entry(block) = fields;
        self.normalizer.normalize(&mut single, true);
        single.block(block).cloned()
    }
}
