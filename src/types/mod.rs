//! Shared response types.

mod response;

pub use response::{Created, ErrorResponse, MemberResponse, MembersResponse, OkResponse};
