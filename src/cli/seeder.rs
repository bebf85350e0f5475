//! Database seeding: the four roles plus a set of known users for local
//! development and demos.
//!
//! The same password hash (low cost, dev only) is reused for every seeded
//! user, and seeding is idempotent thanks to `ON CONFLICT` guards.

use anyhow::Result;
use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::roles::model::well_known;

pub struct UserSeed {
    pub given_name: &'static str,
    pub family_name: &'static str,
    pub preferred_name: &'static str,
    pub pronouns: &'static str,
    pub email: &'static str,
    pub role_id: Uuid,
}

pub fn seed_users() -> Vec<UserSeed> {
    vec![
        UserSeed {
            given_name: "Administrator",
            family_name: "Ad",
            preferred_name: "Administrator",
            pronouns: "they/them",
            email: "admin@example.com",
            role_id: well_known::SUPER_ADMIN,
        },
        UserSeed {
            given_name: "Cat",
            family_name: "A'Tonic",
            preferred_name: "Cat",
            pronouns: "she/her",
            email: "cat.atonic@example.com",
            role_id: well_known::ADMIN,
        },
        UserSeed {
            given_name: "Adrian",
            family_name: "Gould",
            preferred_name: "Adrian",
            pronouns: "he/him",
            email: "adrian.gould@example.com",
            role_id: well_known::STAFF,
        },
        UserSeed {
            given_name: "Dee",
            family_name: "Mouser",
            preferred_name: "Dee",
            pronouns: "they/them",
            email: "dee.mouser@example.com",
            role_id: well_known::STUDENT,
        },
        UserSeed {
            given_name: "Staff1",
            family_name: "User1",
            preferred_name: "Staff1",
            pronouns: "he/him",
            email: "test1@example.com",
            role_id: well_known::STAFF,
        },
        UserSeed {
            given_name: "Student2",
            family_name: "User2",
            preferred_name: "Student2",
            pronouns: "she/her",
            email: "test2@example.com",
            role_id: well_known::STUDENT,
        },
        UserSeed {
            given_name: "Student3",
            family_name: "User3",
            preferred_name: "Student3",
            pronouns: "they/them",
            email: "test3@example.com",
            role_id: well_known::STUDENT,
        },
        UserSeed {
            given_name: "Student4",
            family_name: "User4",
            preferred_name: "Student4",
            pronouns: "they/them",
            email: "test4@example.com",
            role_id: well_known::STUDENT,
        },
    ]
}

/// Seeds roles and known users. Safe to run repeatedly.
pub async fn seed_database(db: &PgPool) -> Result<()> {
    println!("🌱 Seeding roles and users...");

    for (role_id, name) in well_known::all() {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(role_id)
            .bind(name)
            .execute(db)
            .await?;
    }

    // Hash once and reuse; cost 4 keeps seeding fast and is fine for dev data.
    let password_hash = hash("Password1", 4)?;

    let users = seed_users();
    for seed in &users {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (given_name, family_name, preferred_name, pronouns, email, password, email_verified_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             ON CONFLICT (email) DO UPDATE SET updated_at = NOW()
             RETURNING id",
        )
        .bind(seed.given_name)
        .bind(seed.family_name)
        .bind(seed.preferred_name)
        .bind(seed.pronouns)
        .bind(seed.email)
        .bind(&password_hash)
        .fetch_one(db)
        .await?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(seed.role_id)
        .execute(db)
        .await?;
    }

    println!("✅ Seeded {} users", users.len());
    println!("📝 Default password for all seeded users: Password1");

    Ok(())
}

/// Removes the seeded users (their role assignments cascade).
pub async fn clear_seeded_data(db: &PgPool) -> Result<()> {
    let emails: Vec<&str> = seed_users().iter().map(|seed| seed.email).collect();

    let result = sqlx::query("DELETE FROM users WHERE email = ANY($1)")
        .bind(emails.iter().map(|e| e.to_string()).collect::<Vec<_>>())
        .execute(db)
        .await?;

    println!("🧹 Removed {} seeded users", result.rows_affected());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_users_emails_unique() {
        let users = seed_users();
        let mut emails: Vec<&str> = users.iter().map(|seed| seed.email).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), users.len());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_seed_database_idempotent(pool: PgPool) {
        seed_database(&pool).await.unwrap();
        seed_database(&pool).await.unwrap();

        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(user_count, 8);

        let role_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(role_count, 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_seeded_users_are_verified_with_roles(pool: PgPool) {
        seed_database(&pool).await.unwrap();

        let unverified: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email_verified_at IS NULL")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(unverified, 0);

        let staff_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_roles WHERE role_id = $1",
        )
        .bind(well_known::STAFF)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(staff_count, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_clear_seeded_data(pool: PgPool) {
        seed_database(&pool).await.unwrap();
        clear_seeded_data(&pool).await.unwrap();

        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(user_count, 0);

        // Roles survive a clear.
        let role_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(role_count, 4);
    }
}
