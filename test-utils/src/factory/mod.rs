//! Factory methods for creating test data.
//!
//! Factories create rows with sensible defaults, reducing boilerplate in tests, and
//! take care of the foreign keys a row depends on.
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
//!     let user = factory::create_user(&db).await?;
//!     let category = factory::create_game_category(&db).await?;
//!     let party = factory::create_party(&db, &user.discord_id, &category.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let category = factory::game_category::GameCategoryFactory::new(&db)
//!     .name("Chess")
//!     .voice_id("3000")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `game_category` - Create game category entities
//! - `party` - Create party entities
//! - `habitue` - Create habitué entities
//! - `helpers` - ID generation and dependency helpers

pub mod game_category;
pub mod habitue;
pub mod helpers;
pub mod party;
pub mod user;

pub use game_category::create_game_category;
pub use habitue::create_habitue;
pub use party::create_party;
pub use user::create_user;
