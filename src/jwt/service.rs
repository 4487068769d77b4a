use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{JwtConfig, SessionClaims};
use crate::access::Principal;
use crate::crypto::generate_token;
use crate::{AdminError, Employee, EmployeeRole};

/// Length of the JWT ID (jti) in characters.
const JTI_LENGTH: usize = 16;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds, also used as the cookie max-age.
    pub expires_in: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.expose_secret().as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Signs a token for `employee` holding a copy of `role`'s capabilities.
    pub fn issue(&self, employee: &Employee, role: &EmployeeRole) -> Result<IssuedToken, AdminError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.config.expiry())
            .ok_or_else(|| AdminError::Internal("session token expiry out of range".to_owned()))?;

        let claims = SessionClaims {
            sub: employee.id.clone(),
            email: employee.email.clone(),
            role: role.name.clone(),
            role_id: role.id.clone(),
            capabilities: role.capabilities.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: generate_token(JTI_LENGTH),
            iss: self.config.issuer.clone(),
        };

        let token = self.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.config.expiry().num_seconds(),
        })
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, AdminError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AdminError::Internal(format!("failed to sign session token: {e}")))
    }

    /// Any failure (bad signature, malformed, expired) is `Unauthorized`.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AdminError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        if let Some(ref iss) = self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        let token_data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                log::debug!(
                    target: "backoffice",
                    "msg=\"session token rejected\" reason=\"{:?}\"",
                    e.kind()
                );
                AdminError::Unauthorized
            })?;

        Ok(token_data.claims)
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AdminError> {
        self.decode(token)?.into_principal()
    }

    pub fn expiry(&self) -> chrono::Duration {
        self.config.expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessAction, ActionSet, CapabilityMatrix};

    const SECRET: &str = "test-secret-32-bytes-long-key-01";

    fn role() -> EmployeeRole {
        EmployeeRole::mock_with(
            "Editor",
            CapabilityMatrix::builder()
                .grant("Gender", ActionSet::only(&[AccessAction::View, AccessAction::Update]))
                .build(),
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let role = role();
        let employee = Employee::mock_with_role(&role.id);

        let issued = service.issue(&employee, &role).unwrap();
        assert_eq!(issued.expires_in, 24 * 3600);

        let principal = service.verify(&issued.token).unwrap();
        assert_eq!(principal.employee_id, employee.id);
        assert_eq!(principal.role, "Editor");
        assert_eq!(principal.role_id, role.id);
        assert!(principal.can("Gender", AccessAction::Update));
        assert!(!principal.can("Gender", AccessAction::Delete));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let config = JwtConfig::new(SECRET)
            .unwrap()
            .with_expiry(chrono::Duration::weeks(15_000_000));
        let service = JwtService::new(config);
        let role = role();

        let err = service
            .issue(&Employee::mock_with_role(&role.id), &role)
            .unwrap_err();
        assert!(matches!(err, AdminError::Internal(_)));
    }

    #[test]
    fn test_unique_jti() {
        let service = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let role = role();
        let employee = Employee::mock_with_role(&role.id);

        let a = service.decode(&service.issue(&employee, &role).unwrap().token).unwrap();
        let b = service.decode(&service.issue(&employee, &role).unwrap().token).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_malformed_token() {
        let service = JwtService::new(JwtConfig::new(SECRET).unwrap());
        assert_eq!(service.decode("not.a.jwt"), Err(AdminError::Unauthorized));
    }

    #[test]
    fn test_wrong_secret() {
        let signer = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let verifier = JwtService::new(JwtConfig::new("test-secret-32-bytes-long-key-02").unwrap());
        let role = role();
        let token = signer
            .issue(&Employee::mock_with_role(&role.id), &role)
            .unwrap()
            .token;

        assert_eq!(verifier.decode(&token), Err(AdminError::Unauthorized));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "65f1a2b3c4d5e6f708192a3b".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "Super Admin".to_owned(),
            role_id: "65f1a2b3c4d5e6f708192a3c".to_owned(),
            capabilities: CapabilityMatrix::full(),
            iat: now - 7200,
            exp: now - 3600,
            jti: "expired-jti".to_owned(),
            iss: None,
        };
        let token = service.encode(&claims).unwrap();

        assert_eq!(service.decode(&token), Err(AdminError::Unauthorized));
    }

    #[test]
    fn test_spliced_payload_rejected() {
        let service = JwtService::new(JwtConfig::new(SECRET).unwrap());
        let attacker = JwtService::new(JwtConfig::new("attacker-secret-32-bytes-long-key").unwrap());

        let viewer = role();
        let admin = EmployeeRole::mock_with("Super Admin", CapabilityMatrix::full());
        let employee = Employee::mock_with_role(&viewer.id);

        let genuine = service.issue(&employee, &viewer).unwrap().token;
        let forged_source = attacker.issue(&employee, &admin).unwrap().token;

        let genuine_parts: Vec<&str> = genuine.split('.').collect();
        let forged_parts: Vec<&str> = forged_source.split('.').collect();
        let spliced = format!("{}.{}.{}", genuine_parts[0], forged_parts[1], genuine_parts[2]);

        assert_eq!(service.decode(&spliced), Err(AdminError::Unauthorized));
    }
}
