use crate::access::Principal;
use crate::jwt::JwtService;
use crate::AdminError;

/// Turns a presented session token into a [`Principal`]. Purely
/// cryptographic: no storage is consulted.
pub struct VerifySessionAction {
    jwt_service: JwtService,
}

impl VerifySessionAction {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }

    pub fn execute(&self, token: Option<&str>) -> Result<Principal, AdminError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AdminError::Unauthorized)?;
        self.jwt_service.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::CapabilityMatrix;
    use crate::actions::test_support::jwt_service;
    use crate::{Employee, EmployeeRole};

    #[test]
    fn test_missing_token() {
        let action = VerifySessionAction::new(jwt_service());
        assert_eq!(action.execute(None), Err(AdminError::Unauthorized));
        assert_eq!(action.execute(Some("")), Err(AdminError::Unauthorized));
        assert_eq!(action.execute(Some("garbage")), Err(AdminError::Unauthorized));
    }

    #[test]
    fn test_valid_token() {
        let role = EmployeeRole::new("Auditor", CapabilityMatrix::new());
        let employee = Employee::mock_with_role(&role.id);
        let token = jwt_service().issue(&employee, &role).unwrap().token;

        let principal = VerifySessionAction::new(jwt_service())
            .execute(Some(&token))
            .unwrap();
        assert_eq!(principal.role, "Auditor");
        assert!(principal.capabilities.is_empty());
    }
}
