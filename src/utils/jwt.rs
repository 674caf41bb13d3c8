use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// JWT Claims 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (User No)
    pub sub: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// 닉네임
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// 카카오 사용자 여부
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_kakao_user: Option<bool>,
    /// Token Type (access)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Access Token 생성
pub fn encode_access_token(
    user_no: i64,
    nickname: &str,
    is_kakao_user: bool,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::InternalError("토큰 만료 시각 계산에 실패했습니다.".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_no.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
        nickname: Some(nickname.to_string()),
        is_kakao_user: Some(is_kakao_user),
        token_type: Some("access".to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// Access Token 검증 및 디코딩
///
/// token_type이 access가 아닌 토큰은 거부한다.
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("토큰이 만료되었습니다.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 토큰입니다.".into()),
    })?;

    if claims.token_type.as_deref() != Some("access") {
        return Err(AppError::Unauthorized(
            "Access Token이 아닙니다.".to_string(),
        ));
    }

    Ok(claims)
}
