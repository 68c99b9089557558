//! Owner authorization
//!
//! The ledger has exactly one privileged role. It is fixed at
//! construction and has no transfer path.

use crowdfund_types::ids::AccountId;

/// Single-owner access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownable {
    owner: AccountId,
}

impl Ownable {
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Check if a caller is the owner.
    pub fn is_owner(&self, caller: &AccountId) -> bool {
        !caller.is_nil() && *caller == self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_recognized() {
        let alice = AccountId::new();
        let ownable = Ownable::new(alice);
        assert!(ownable.is_owner(&alice));
        assert_eq!(ownable.owner(), alice);
    }

    #[test]
    fn test_other_callers_rejected() {
        let ownable = Ownable::new(AccountId::new());
        assert!(!ownable.is_owner(&AccountId::new()));
        assert!(!ownable.is_owner(&AccountId::nil()));
    }
}
