//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let guild = factory::guild::create_guild(&db).await?;
//!
//!     // Customize via the builder
//!     let member = factory::member::MemberFactory::new(&db)
//!         .guild_id(&guild.guild_id)
//!         .experience(1200)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod guild;
pub mod helpers;
pub mod member;

// Re-export commonly used factory functions for concise usage
pub use guild::create_guild;
pub use member::create_member;
