use crate::{data::party::PartyRepository, error::AppError, model::party::CreatePartyParam};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get;
mod insert;
mod migrated_schema;
