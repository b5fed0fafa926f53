use log::warn;

use crate::config::ServiceKey;
use crate::error::{LookupError, Result};
use crate::models::{LookupQuery, LookupRequest};

/// Checks the credential and the three required parameters.
///
/// The credential is checked first so a misconfigured deployment never
/// reaches the network. Values are passed through verbatim; weekday mapping
/// happens later.
pub fn validate<'k>(
    query: &LookupQuery,
    service_key: Option<&'k ServiceKey>,
) -> Result<(LookupRequest, &'k ServiceKey)> {
    let service_key = service_key.ok_or(LookupError::MissingCredential)?;

    let fields = [
        ("Q0", &query.region),
        ("Q1", &query.sub_region),
        ("DG", &query.weekday),
    ];
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        warn!("Rejecting lookup, missing parameters: {:?}", missing);
        return Err(LookupError::MissingParameters(missing));
    }

    let request = LookupRequest {
        region: query.region.clone().unwrap_or_default(),
        sub_region: query.sub_region.clone().unwrap_or_default(),
        weekday: query.weekday.clone().unwrap_or_default(),
    };
    Ok((request, service_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ServiceKey {
        ServiceKey::new("test-key").unwrap()
    }

    #[test]
    fn accepts_complete_query() {
        let key = key();
        let query = LookupQuery::new("서울특별시", "강남구", "월요일");
        let (request, used_key) = validate(&query, Some(&key)).unwrap();
        assert_eq!(request.region, "서울특별시");
        assert_eq!(request.sub_region, "강남구");
        assert_eq!(request.weekday, "월요일");
        assert_eq!(used_key.expose(), "test-key");
    }

    #[test]
    fn missing_credential_wins_over_missing_parameters() {
        let result = validate(&LookupQuery::default(), None);
        assert!(matches!(result, Err(LookupError::MissingCredential)));
    }

    #[test]
    fn reports_each_missing_parameter() {
        let key = key();
        let query = LookupQuery {
            region: Some("서울특별시".into()),
            sub_region: None,
            weekday: Some(String::new()),
        };
        match validate(&query, Some(&key)) {
            Err(LookupError::MissingParameters(names)) => assert_eq!(names, vec!["Q1", "DG"]),
            other => panic!("expected MissingParameters, got {:?}", other),
        }
    }

    #[test]
    fn values_are_not_trimmed_or_checked() {
        let key = key();
        let query = LookupQuery::new(" anything ", "%$#", "99");
        let (request, _) = validate(&query, Some(&key)).unwrap();
        assert_eq!(request.region, " anything ");
        assert_eq!(request.sub_region, "%$#");
        assert_eq!(request.weekday, "99");
    }
}
