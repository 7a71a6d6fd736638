//! Program registry: exact-match lookup from program id to its IDL.
//!
//! The set of known interface definitions is supplied by the caller before
//! decoding begins; the registry never fetches or caches IDLs itself.

use std::collections::HashMap;

use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::models::Idl;

#[derive(Debug, Clone, Default)]
pub struct ProgramRegistry {
    programs: HashMap<Pubkey, Idl>,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, program_id: Pubkey, idl: Idl) {
        debug!("registering IDL '{}' for program {}", idl.name, program_id);
        self.programs.insert(program_id, idl);
    }

    /// Exact-equality lookup. `None` means the caller never supplied an IDL
    /// for this program; there is no partial or fuzzy matching and no
    /// versioning.
    pub fn find(&self, program_id: &Pubkey) -> Option<&Idl> {
        self.programs.get(program_id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl FromIterator<(Pubkey, Idl)> for ProgramRegistry {
    fn from_iter<I: IntoIterator<Item = (Pubkey, Idl)>>(iter: I) -> Self {
        Self {
            programs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_returns_registered_idl() {
        let program_id = Pubkey::new_unique();
        let mut registry = ProgramRegistry::new();
        registry.register(program_id, Idl::new("escrow", vec![]));

        let found = registry.find(&program_id).unwrap();
        assert_eq!(found.name, "escrow");
    }

    #[test]
    fn test_collects_from_idl_pairs() {
        let escrow = Pubkey::new_unique();
        let counter = Pubkey::new_unique();
        let registry: ProgramRegistry = [
            (escrow, Idl::new("escrow", vec![])),
            (counter, Idl::new("counter", vec![])),
        ]
        .into_iter()
        .collect();

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find(&counter).unwrap().name, "counter");
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(ProgramRegistry::new().is_empty());
    }

    #[test]
    fn test_find_misses_unknown_program() {
        let mut registry = ProgramRegistry::new();
        registry.register(Pubkey::new_unique(), Idl::new("escrow", vec![]));

        assert!(registry.find(&Pubkey::new_unique()).is_none());
        assert_eq!(registry.len(), 1);
    }
}
