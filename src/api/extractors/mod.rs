//! Custom extractors.

mod session;
mod validated_json;

pub use session::{MemberAdmin, MemberId, MemberReader};
pub use validated_json::ValidatedJson;
