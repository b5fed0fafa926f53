use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

/// Helper function to extract JSON from an Axum response
///
/// This is useful in tests to easily parse and assert on JSON responses.
pub async fn response_to_json(response: Response) -> Value {
    let body = response.into_body();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wraps pharmacy records in the upstream's XML envelope.
///
/// Each entry becomes one `<item>` whose children are the given fields.
pub fn pharmacy_xml(items: &[&[(&str, &str)]]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <response><header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header><body>",
    );
    if !items.is_empty() {
        xml.push_str("<items>");
        for fields in items {
            xml.push_str("<item>");
            for (name, value) in fields.iter() {
                xml.push_str(&format!("<{name}>{value}</{name}>"));
            }
            xml.push_str("</item>");
        }
        xml.push_str("</items>");
    }
    xml.push_str(&format!(
        "<numOfRows>100</numOfRows><pageNo>1</pageNo><totalCount>{}</totalCount></body></response>",
        items.len()
    ));
    xml
}

/// Builds an upstream error document carrying `resultCode` and `resultMsg`.
pub fn upstream_error_xml(code: &str, message: &str) -> String {
    format!(
        "<response><header><resultCode>{code}</resultCode><resultMsg>{message}</resultMsg></header></response>"
    )
}
