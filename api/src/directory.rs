//! Static user and permission directories loaded from a JSON seed file
//!
//! The identity and role stores are owned by other services. Until an
//! adapter for them exists, the server reads a fixed list of users and
//! their permission keys at startup:
//!
//! ```json
//! { "users": [ { "id": "<uuid>", "email": "ops@example.com", "permissions": ["tokens.revoke"] } ] }
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

use kw_core::{MockPermissionDirectory, MockUserDirectory, User};

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySeed {
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// In-memory directories populated from a seed
pub struct SeededDirectories {
    pub users: MockUserDirectory,
    pub permissions: MockPermissionDirectory,
}

impl DirectorySeed {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let seed: Self = serde_json::from_str(json).context("malformed directory seed")?;

        let mut ids = std::collections::HashSet::new();
        if let Some(duplicate) = seed.users.iter().find(|u| !ids.insert(u.id)) {
            anyhow::bail!("duplicate user {} in directory seed", duplicate.id);
        }
        Ok(seed)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read directory seed {}", path.display()))?;
        Self::from_json(&json)
    }

    pub async fn into_directories(self) -> SeededDirectories {
        let users = MockUserDirectory::new();
        let permissions = MockPermissionDirectory::new();

        for seed_user in self.users {
            let keys: Vec<&str> = seed_user.permissions.iter().map(String::as_str).collect();
            permissions.grant(seed_user.id, &keys).await;
            users.insert(User::new(seed_user.id, seed_user.email)).await;
        }

        SeededDirectories { users, permissions }
    }
}
