pub mod http_test_utils;
pub mod mock_pharmacy_source;
pub mod test_logging;
