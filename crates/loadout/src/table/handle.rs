//! Container handles and the transfer semantics between them.

use std::fmt;
use std::str::FromStr;

use crate::error::{LoadoutError, TransferError};

/// Which kind of container a table represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handle {
    /// The master catalog. Never mutated by transfers.
    Base,
    /// A transient working list with its own save callback.
    Kit,
    /// A live external container mutated through callbacks.
    Inventory,
}

impl Handle {
    pub const ALL: [Handle; 3] = [Handle::Base, Handle::Kit, Handle::Inventory];

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Base => "base",
            Handle::Kit => "kit",
            Handle::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handle {
    type Err = LoadoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LoadoutError::configuration(format!("unknown container '{s}'")))
    }
}

/// What a drop does, decided by the (origin, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropAction {
    /// Copy into the destination kit, bumping the quantity of known records.
    AddCopy,
    /// Evict from the origin's backing store. The catalog is untouched.
    RemoveFromOrigin,
    /// Hand the record to the destination's live add callback.
    AddLive,
}

impl DropAction {
    /// Resolves the transfer semantics for a pair of containers.
    pub fn resolve(origin: Handle, destination: Handle) -> Result<DropAction, TransferError> {
        match (origin, destination) {
            (Handle::Base, Handle::Kit) => Ok(DropAction::AddCopy),
            (Handle::Base, Handle::Inventory) => Ok(DropAction::AddLive),
            (Handle::Kit, Handle::Base) | (Handle::Inventory, Handle::Base) => {
                Ok(DropAction::RemoveFromOrigin)
            }
            (Handle::Base, Handle::Base)
            | (Handle::Kit, Handle::Kit)
            | (Handle::Kit, Handle::Inventory)
            | (Handle::Inventory, Handle::Kit)
            | (Handle::Inventory, Handle::Inventory) => Err(TransferError::Unsupported {
                origin,
                destination,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("Kit".parse::<Handle>().unwrap(), Handle::Kit);
        assert_eq!(" inventory ".parse::<Handle>().unwrap(), Handle::Inventory);
        assert!("attic".parse::<Handle>().is_err());
        assert_eq!(Handle::Base.to_string(), "base");
    }

    #[test]
    fn transfer_matrix() {
        use DropAction::*;
        use Handle::*;

        assert_eq!(DropAction::resolve(Base, Kit), Ok(AddCopy));
        assert_eq!(DropAction::resolve(Base, Inventory), Ok(AddLive));
        assert_eq!(DropAction::resolve(Kit, Base), Ok(RemoveFromOrigin));
        assert_eq!(DropAction::resolve(Inventory, Base), Ok(RemoveFromOrigin));

        for (origin, destination) in [(Kit, Inventory), (Inventory, Kit), (Kit, Kit)] {
            assert_eq!(
                DropAction::resolve(origin, destination),
                Err(TransferError::Unsupported {
                    origin,
                    destination
                })
            );
        }
    }
}
