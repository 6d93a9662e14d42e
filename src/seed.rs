//! Demo data seeding
//!
//! Populates the store with a set of demo users (shared default password,
//! first account forced to Developer so there is always an admin to log in
//! with) and the starter tag catalog.

use rand::seq::SliceRandom;
use tracing::info;

use crate::auth::hash_password;
use crate::store::schemas::{Role, Site, TagRecord, TagType, UserRecord};
use crate::store::MemoryStore;
use crate::types::Result;

/// Password every seeded account starts with
pub const DEFAULT_PASSWORD: &str = "password123";

const FIRST_NAMES: &[&str] = &[
    "Ava", "Ben", "Carla", "Deshawn", "Elena", "Frank", "Grace", "Hiro", "Imani", "Jonas",
    "Kira", "Luis", "Mara", "Noah", "Priya", "Quinn", "Rosa", "Sam", "Tessa", "Victor",
];

const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brooks", "Chen", "Dawson", "Eriksen", "Flores", "Gupta", "Hansen", "Ito",
    "Johnson", "Kowalski", "Lindgren", "Moreau", "Novak", "Okafor", "Price", "Reyes", "Singh",
    "Tran", "Weber",
];

const SITES: &[Site] = &[Site::NewYork, Site::Minneapolis, Site::Dallas, Site::Seattle];

const ROLES: &[Role] = &[Role::User, Role::Manager, Role::Executive, Role::Developer];

const TAGS: &[(&str, Option<TagType>)] = &[
    ("Safety", Some(TagType::SiteSpecific)),
    ("Quality", Some(TagType::Global)),
    ("Throughput", Some(TagType::Regional)),
    ("Morale", Some(TagType::Impactful)),
    ("Training", Some(TagType::ProfileSpecific)),
    ("Maintenance", None),
];

/// Seed demo users and the tag catalog
pub fn seed(store: &MemoryStore, user_count: usize) -> Result<()> {
    info!("Seeding store with {} demo users", user_count);

    for (name, tag_type) in TAGS {
        store.insert_tag(TagRecord {
            id: 0,
            name: name.to_string(),
            tag_type: *tag_type,
        })?;
    }

    // Hash once; every demo account shares the default password
    let hashed_password = hash_password(DEFAULT_PASSWORD)?;
    let mut rng = rand::thread_rng();

    for i in 0..user_count {
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Ava");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Alvarez");
        let email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            i
        );
        let site = SITES.choose(&mut rng).copied().unwrap_or(Site::NewYork);

        let role = if i == 0 {
            info!("**** Developer account created: username = {} ****", email);
            Role::Developer
        } else {
            ROLES.choose(&mut rng).copied().unwrap_or(Role::User)
        };

        store.insert_user(UserRecord {
            id: 0,
            username: email.clone(),
            email,
            full_name: Some(format!("{first} {last}")),
            hashed_password: hashed_password.clone(),
            disabled: false,
            role,
            region: site.region(),
            site,
        })?;
    }

    info!(
        "Seeding finished: {} users, {} tags",
        store.user_count(),
        store.tags().len()
    );
    Ok(())
}
