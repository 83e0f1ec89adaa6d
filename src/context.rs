use uuid::Uuid;

use crate::utils::jwt::TokenClaims;

/// Scoping for one request: which school the caller may see and, when the
/// caller is a teacher, which teacher identity drives permission checks.
/// `school_id: None` means no tenant filter (super-admin / legacy calls).
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext {
    pub school_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
}

impl RequestContext {
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            school_id: claims.school_id,
            teacher_id: claims.teacher_id,
        }
    }
}
