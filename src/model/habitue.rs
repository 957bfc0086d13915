//! Habitué domain models.

use crate::{error::AppError, model::color::Rgb, util::parse::parse_u64_from_string};

/// Name template of a habitué's personal colour role.
pub fn color_role_name(display_name: &str) -> String {
    format!("couleur {}", display_name)
}

/// Habitué with their stored colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Habitue {
    /// Discord ID of the habitué
    pub discord_id: u64,
    /// Current colour of their colour role.
    pub color: Rgb,
}

impl Habitue {
    /// Converts an entity model to a habitué domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Habitue)` - The converted domain model
    /// - `Err(AppError)` - Stored ID or colour is malformed
    pub fn from_entity(entity: entity::habitue::Model) -> Result<Self, AppError> {
        let color = Rgb::from_hex(&entity.color).map_err(|_| {
            AppError::InternalError(format!(
                "Stored colour '{}' for habitue {} is not a #rrggbb value",
                entity.color, entity.discord_id
            ))
        })?;

        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            color,
        })
    }
}
