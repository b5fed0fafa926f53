use log::{info, warn};

use crate::config::ServiceKey;
use crate::error::{LookupError, Result};
use crate::models::{LookupQuery, PharmacyList};
use crate::normalize::extract_items;
use crate::translate::translate_upstream_failure;
use crate::upstream::PharmacySource;
use crate::validate::validate;
use crate::weekday::WeekdayTable;
use crate::xml::to_json;

/// Runs one lookup: validate, map the weekday, call upstream once, normalize.
///
/// Nothing reaches `source` unless the credential and all three parameters
/// are present.
pub async fn lookup_pharmacies<S>(
    source: &S,
    service_key: Option<&ServiceKey>,
    weekdays: &WeekdayTable,
    query: &LookupQuery,
) -> Result<PharmacyList>
where
    S: PharmacySource + ?Sized,
{
    let (mut request, service_key) = validate(query, service_key)?;
    request.weekday = weekdays.resolve(&request.weekday);

    info!(
        "Looking up pharmacies: Q0={:?} Q1={:?} DG={:?} key={}",
        request.region, request.sub_region, request.weekday, service_key
    );

    let body = source
        .fetch(service_key, &request)
        .await
        .map_err(translate_upstream_failure)?;

    let document = to_json(&body).map_err(|err| {
        warn!("Upstream success body is not valid XML: {}", err);
        LookupError::from(err)
    })?;

    let pharmacies = extract_items(&document);
    info!("Lookup returned {} pharmacies", pharmacies.len());
    Ok(pharmacies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::test_utils::mock_pharmacy_source::MockPharmacySource;

    const TWO_ITEMS: &str = "<response><body><items>\
        <item><dutyName>A약국</dutyName></item>\
        <item><dutyName>B약국</dutyName></item>\
        </items></body></response>";

    fn key() -> ServiceKey {
        ServiceKey::new("test-key").unwrap()
    }

    #[tokio::test]
    async fn missing_parameters_never_reach_upstream() {
        let source = MockPharmacySource::with_body(TWO_ITEMS);
        let key = key();
        let query = LookupQuery {
            weekday: None,
            ..LookupQuery::new("서울특별시", "강남구", "월요일")
        };

        let result = lookup_pharmacies(&source, Some(&key), &WeekdayTable::default(), &query).await;

        assert!(matches!(result, Err(LookupError::MissingParameters(_))));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_credential_never_reaches_upstream() {
        let source = MockPharmacySource::with_body(TWO_ITEMS);
        let query = LookupQuery::new("서울특별시", "강남구", "월요일");

        let result = lookup_pharmacies(&source, None, &WeekdayTable::default(), &query).await;

        assert!(matches!(result, Err(LookupError::MissingCredential)));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn sends_mapped_weekday_and_returns_items() {
        let source = MockPharmacySource::with_body(TWO_ITEMS);
        let key = key();
        let query = LookupQuery::new("서울특별시", "강남구", "화요일");

        let list = lookup_pharmacies(&source, Some(&key), &WeekdayTable::default(), &query)
            .await
            .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["dutyName"], "A약국");
        let calls = source.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].weekday, "2");
        assert_eq!(calls[0].region, "서울특별시");
    }

    #[tokio::test]
    async fn unknown_weekday_is_sent_verbatim() {
        let source = MockPharmacySource::with_body(TWO_ITEMS);
        let key = key();
        let query = LookupQuery::new("서울특별시", "강남구", "someday");

        lookup_pharmacies(&source, Some(&key), &WeekdayTable::default(), &query)
            .await
            .unwrap();

        assert_eq!(source.calls()[0].weekday, "someday");
    }

    #[tokio::test]
    async fn malformed_success_body_is_reported() {
        let source = MockPharmacySource::with_body("<response><body>");
        let key = key();
        let query = LookupQuery::new("서울특별시", "강남구", "1");

        let result = lookup_pharmacies(&source, Some(&key), &WeekdayTable::default(), &query).await;

        assert!(matches!(result, Err(LookupError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn upstream_failures_are_translated() {
        let source = MockPharmacySource::with_error(UpstreamError::Status {
            status: 429,
            body: Some(
                "<response><header><resultCode>22</resultCode><resultMsg>LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS ERROR.</resultMsg></header></response>"
                    .to_string(),
            ),
        });
        let key = key();
        let query = LookupQuery::new("서울특별시", "강남구", "1");

        let result = lookup_pharmacies(&source, Some(&key), &WeekdayTable::default(), &query).await;

        match result {
            Err(LookupError::UpstreamRejected { status, code, .. }) => {
                assert_eq!(status, 429);
                assert_eq!(code.as_deref(), Some("22"));
            }
            other => panic!("expected UpstreamRejected, got {:?}", other),
        }
        assert_eq!(source.call_count(), 1);
    }
}
