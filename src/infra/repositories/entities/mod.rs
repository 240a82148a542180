//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod member;

#[allow(unused_imports)]
pub use member::{ActiveModel as MemberActiveModel, Entity as MemberEntity, Model as MemberModel};
