//! Error types for simulation commands.
//!
//! Every command either succeeds immediately or fails immediately with one of
//! these conditions. None of them is fatal to the simulation: the caller
//! reports the message and carries on. The `Display` text is what a command
//! front end shows to the user.

use thiserror::Error;

/// Errors raised by ships, islands, and the registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    // === Movement ===
    #[error("Ship cannot move!")]
    CannotMove,

    #[error("Ship cannot go that fast!")]
    ExcessiveSpeed,

    #[error("Negative speed entered!")]
    NegativeSpeed,

    #[error("Invalid heading entered!")]
    InvalidCourse,

    // === Docking and fuel ===
    #[error("Can't dock!")]
    CannotDock,

    #[error("Must be docked!")]
    MustBeDocked,

    // === Combat ===
    #[error("Cannot attack!")]
    CannotAttack,

    #[error("Warship may not attack itself!")]
    SelfAttack,

    #[error("Already attacking this target!")]
    AlreadyAttacking,

    #[error("Was not attacking!")]
    NotAttacking,

    // === Cargo ===
    #[error("Tanker has cargo destinations!")]
    HasCargoDestinations,

    #[error("Load and unload cargo destinations are the same!")]
    SameDestinations,

    /// A fat-interface command the ship's role does not implement.
    #[error("Cannot {0}!")]
    Unsupported(&'static str),

    // === Registry ===
    #[error("Ship not found!")]
    ShipNotFound(String),

    #[error("Island not found!")]
    IslandNotFound(String),

    #[error("Name is already in use!")]
    NameInUse(String),

    #[error("Trying to create ship of unknown type: {0}")]
    UnknownShipType(String),
}

/// Result type for simulation commands.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(SimError::CannotMove.to_string(), "Ship cannot move!");
        assert_eq!(SimError::CannotDock.to_string(), "Can't dock!");
        assert_eq!(
            SimError::Unsupported("load at a destination").to_string(),
            "Cannot load at a destination!"
        );
        assert_eq!(
            SimError::UnknownShipType("Frigate".into()).to_string(),
            "Trying to create ship of unknown type: Frigate"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimError>();
    }
}
