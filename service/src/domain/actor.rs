//! [`Actor`] definitions.

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

define_text! {
    /// Name of whoever performed a change: a [`User`] name, or
    /// [`Actor::SYSTEM`] when the change is unattributed.
    Actor(max_len = 512)
}

impl Actor {
    /// Name used for changes not attributed to any [`User`].
    pub const SYSTEM: &'static str = "System";

    /// Returns the [`Actor`] of unattributed changes.
    #[must_use]
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_owned())
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

impl From<user::Name> for Actor {
    fn from(name: user::Name) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::user;

    use super::Actor;

    #[test]
    fn defaults_to_system() {
        assert_eq!(Actor::default().to_string(), "System");
        assert_eq!(Actor::system(), Actor::default());
    }

    #[test]
    fn takes_user_name() {
        let name = user::Name::new("Maria Santos").unwrap();

        assert_eq!(Actor::from(name).to_string(), "Maria Santos");
    }
}
