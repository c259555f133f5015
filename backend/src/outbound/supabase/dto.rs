//! Wire DTOs for the auth and REST endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    AccessRequestReply, AuthSession, AuthUser, ProfileMetadata, SignUpRequest, StaffAccessRequest,
};

#[derive(Debug, Serialize)]
pub(super) struct SignUpBodyDto<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadataDto<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadataDto<'a> {
    full_name: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
}

impl<'a> From<&'a SignUpRequest> for SignUpBodyDto<'a> {
    fn from(request: &'a SignUpRequest) -> Self {
        Self {
            email: &request.email,
            password: &request.password,
            data: SignUpMetadataDto {
                full_name: &request.full_name,
                name: &request.full_name,
                username: request.username.as_deref(),
            },
        }
    }
}

/// Sign-up reply. With confirmation enabled the backend returns the bare
/// user, so `access_token` is absent and `user` is not nested.
#[derive(Debug, Deserialize)]
pub(super) struct SignUpResponseDto {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<UserDto>,
}

impl SignUpResponseDto {
    pub(super) fn into_session(self) -> Option<AuthSession> {
        let access_token = self.access_token.filter(|token| !token.is_empty())?;
        Some(AuthSession {
            access_token,
            user: self.user?.into_domain(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadataDto,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadataDto {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> AuthUser {
        let UserMetadataDto {
            full_name,
            name,
            username,
        } = self.user_metadata;
        AuthUser {
            id: self.id,
            email: self.email,
            metadata: ProfileMetadata {
                full_name: full_name.or(name),
                username,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AccessRequestBodyDto<'a> {
    token: &'a str,
    name: &'a str,
    username: Option<&'a str>,
}

impl<'a> From<&'a StaffAccessRequest> for AccessRequestBodyDto<'a> {
    fn from(request: &'a StaffAccessRequest) -> Self {
        Self {
            token: request.token.as_str(),
            name: &request.name,
            username: request.username.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AccessReplyDto {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl From<AccessReplyDto> for AccessRequestReply {
    fn from(dto: AccessReplyDto) -> Self {
        Self {
            ok: dto.ok,
            error: dto.error,
        }
    }
}
