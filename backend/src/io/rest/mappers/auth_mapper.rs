use shared::{LoginResponse, SessionInfo};

use crate::domain::models::Session;

pub struct AuthMapper;

impl AuthMapper {
    pub fn to_login_response(session: &Session) -> LoginResponse {
        LoginResponse {
            token: session.token.clone(),
            username: session.username.clone(),
            role: session.role,
        }
    }

    pub fn to_session_info(session: &Session) -> SessionInfo {
        SessionInfo {
            username: session.username.clone(),
            role: session.role,
            created_at: session.created_at.to_rfc3339(),
        }
    }
}
