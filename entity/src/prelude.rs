pub use super::game_category::Entity as GameCategory;
pub use super::habitue::Entity as Habitue;
pub use super::party::Entity as Party;
pub use super::user::Entity as User;
