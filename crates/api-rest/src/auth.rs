use axum::http::{HeaderMap, StatusCode};
use hms_core::{Operator, Permission, Role};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const OPERATOR_ID_HEADER: &str = "x-operator-id";
pub const OPERATOR_NAME_HEADER: &str = "x-operator-name";
pub const OPERATOR_ROLE_HEADER: &str = "x-operator-role";

pub type AuthError = (StatusCode, &'static str);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Validates the provided API key against the configured key.
pub fn validate_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AuthError> {
    let provided = header(headers, API_KEY_HEADER)
        .ok_or((StatusCode::UNAUTHORIZED, "Missing x-api-key header"))?;

    if provided == expected {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "Invalid API key"))
    }
}

/// Builds the calling operator from the `x-operator-*` headers.
pub fn operator_from_headers(headers: &HeaderMap) -> Result<Operator, AuthError> {
    let missing = (StatusCode::UNAUTHORIZED, "Missing operator headers");
    let id = header(headers, OPERATOR_ID_HEADER).ok_or(missing)?;
    let name = header(headers, OPERATOR_NAME_HEADER).ok_or(missing)?;
    let role = header(headers, OPERATOR_ROLE_HEADER).ok_or(missing)?;

    let role: Role = role
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Unknown operator role"))?;
    Operator::new(id, name, role).map_err(|_| (StatusCode::BAD_REQUEST, "Operator name is empty"))
}

/// API key, operator identity, then `permission`, in that order.
pub fn authorise(
    headers: &HeaderMap,
    api_key: &str,
    permission: Permission,
) -> Result<Operator, AuthError> {
    validate_api_key(headers, api_key)?;
    let operator = operator_from_headers(headers)?;

    if !operator.can(permission) {
        tracing::warn!(
            operator_id = %operator.id,
            role = %operator.role,
            ?permission,
            "operator lacks permission"
        );
        return Err((StatusCode::FORBIDDEN, "Operator role lacks permission"));
    }
    Ok(operator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn api_key_must_match() {
        assert_eq!(
            validate_api_key(&headers(&[]), "k").unwrap_err().1,
            "Missing x-api-key header"
        );
        assert_eq!(
            validate_api_key(&headers(&[(API_KEY_HEADER, "nope")]), "k")
                .unwrap_err()
                .0,
            StatusCode::UNAUTHORIZED
        );
        validate_api_key(&headers(&[(API_KEY_HEADER, "k")]), "k").unwrap();
    }

    #[test]
    fn operator_headers_are_parsed() {
        let op = operator_from_headers(&headers(&[
            (OPERATOR_ID_HEADER, "u-7"),
            (OPERATOR_NAME_HEADER, "Nurse Joy"),
            (OPERATOR_ROLE_HEADER, "staff-nurse"),
        ]))
        .unwrap();
        assert_eq!(op.role, Role::StaffNurse);
        assert_eq!(op.name.as_str(), "Nurse Joy");
    }

    #[test]
    fn unknown_role_is_a_bad_request() {
        let err = operator_from_headers(&headers(&[
            (OPERATOR_ID_HEADER, "u-7"),
            (OPERATOR_NAME_HEADER, "Sam"),
            (OPERATOR_ROLE_HEADER, "janitor"),
        ]))
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn permission_is_checked_last() {
        let h = headers(&[
            (API_KEY_HEADER, "k"),
            (OPERATOR_ID_HEADER, "u-1"),
            (OPERATOR_NAME_HEADER, "Front Desk"),
            (OPERATOR_ROLE_HEADER, "receptionist"),
        ]);
        assert_eq!(
            authorise(&h, "k", Permission::RecordVitals).unwrap_err().0,
            StatusCode::FORBIDDEN
        );
        authorise(&h, "k", Permission::OpdQueue).unwrap();
    }
}
