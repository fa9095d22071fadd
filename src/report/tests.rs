//! Tests for report discovery and retrieval

use super::*;
use crate::auth::Credentials;
use crate::decode::CsvDecoder;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::schema::{AccountScope, KeyStyle, StreamKind};
use crate::types::{CsvStrictness, RawRow};
use chrono::NaiveDate;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SETTLEMENT_PATH: &str =
    "/reports/download/MerchantAccount/AcmeEU/settlement_detail_report_batch";
const PAYMENTS_PATH: &str = "/reports/download/MerchantAccount/AcmeEU/payments_accounting_report";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn client() -> HttpClient {
    HttpClient::with_credentials(
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(5))
            .build(),
        Credentials::new("user", "pass"),
    )
    .unwrap()
}

fn settlement_location(base: &str) -> ReportLocation {
    ReportLocation::for_stream(
        base,
        StreamKind::SettlementDetails.definition(),
        "AcmeCorp",
        "AcmeEU",
    )
    .unwrap()
}

fn payments_location(base: &str) -> ReportLocation {
    ReportLocation::for_stream(
        base,
        StreamKind::PaymentAccounting.definition(),
        "AcmeCorp",
        "AcmeEU",
    )
    .unwrap()
}

async fn mount_head(server: &MockServer, url_path: String, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// ============================================================================
// ProbeKey
// ============================================================================

#[test]
fn test_probe_key_next() {
    assert_eq!(ProbeKey::Batch(5).next(), Some(ProbeKey::Batch(6)));
    assert_eq!(
        ProbeKey::Date(date(2020, 12, 31)).next(),
        Some(ProbeKey::Date(date(2021, 1, 1)))
    );
    assert_eq!(
        ProbeKey::Date(date(2024, 2, 28)).next(),
        Some(ProbeKey::Date(date(2024, 2, 29)))
    );
    assert_eq!(ProbeKey::Batch(u64::MAX).next(), None);
}

#[test]
fn test_probe_key_url_fragment() {
    assert_eq!(ProbeKey::Batch(42).url_fragment(), "42");
    assert_eq!(ProbeKey::Date(date(2021, 1, 5)).url_fragment(), "2021_01_05");
}

#[test]
fn test_record_id_layout() {
    assert_eq!(ProbeKey::Batch(5).record_id(0).unwrap(), 50_000_000_000);
    assert_eq!(ProbeKey::Batch(5).record_id(12).unwrap(), 50_000_000_012);
    assert_eq!(
        ProbeKey::Date(date(2021, 1, 1)).record_id(3).unwrap(),
        202_101_010_000_000_003
    );
}

#[test]
fn test_record_ids_increase_across_artifacts() {
    let last_of_first = ProbeKey::Batch(5).record_id(9_999).unwrap();
    let first_of_next = ProbeKey::Batch(6).record_id(0).unwrap();
    assert!(first_of_next > last_of_first);

    let day_one = ProbeKey::Date(date(2021, 1, 31)).record_id(500).unwrap();
    let day_two = ProbeKey::Date(date(2021, 2, 1)).record_id(0).unwrap();
    assert!(day_two > day_one);
}

#[test]
fn test_record_id_overflow() {
    assert!(matches!(
        ProbeKey::Batch(5).record_id(ID_KEY_FACTOR as u64),
        Err(Error::RecordId { .. })
    ));
    assert!(matches!(
        ProbeKey::Batch(u64::MAX).record_id(0),
        Err(Error::RecordId { .. })
    ));
}

#[test_case(KeyStyle::Batch, 60_000_000_004, ProbeKey::Batch(6) ; "batch")]
#[test_case(KeyStyle::Date, 202_101_310_000_000_000, ProbeKey::Date(date(2021, 1, 31)) ; "date")]
fn test_key_from_record_id(style: KeyStyle, id: i64, expected: ProbeKey) {
    assert_eq!(ProbeKey::from_record_id(style, id).unwrap(), expected);
}

#[test]
fn test_key_from_invalid_record_id() {
    assert!(ProbeKey::from_record_id(KeyStyle::Date, 202_113_450_000_000_000).is_err());
    assert!(ProbeKey::from_record_id(KeyStyle::Batch, -1_000_000_000_000).is_err());
}

#[test]
fn test_checkpoint_values() {
    assert_eq!(ProbeKey::Batch(7).to_checkpoint(), json!(7));
    assert_eq!(
        ProbeKey::Date(date(2021, 1, 2)).to_checkpoint(),
        json!("2021-01-02")
    );

    assert_eq!(
        ProbeKey::from_checkpoint(KeyStyle::Batch, &json!(7)).unwrap(),
        ProbeKey::Batch(7)
    );
    assert_eq!(
        ProbeKey::from_checkpoint(KeyStyle::Batch, &json!("7")).unwrap(),
        ProbeKey::Batch(7)
    );
    assert_eq!(
        ProbeKey::from_checkpoint(KeyStyle::Date, &json!("2021-01-02T00:00:00Z")).unwrap(),
        ProbeKey::Date(date(2021, 1, 2))
    );
    assert!(ProbeKey::from_checkpoint(KeyStyle::Date, &json!(20_210_102)).is_err());
    assert!(ProbeKey::from_checkpoint(KeyStyle::Batch, &json!(-3)).is_err());
}

#[test_case("2021-01-31", date(2021, 1, 31) ; "plain date")]
#[test_case(" 2021-01-31 ", date(2021, 1, 31) ; "padded")]
#[test_case("2021-01-31T23:00:00+02:00", date(2021, 1, 31) ; "rfc3339")]
fn test_parse_start_date(input: &str, expected: NaiveDate) {
    assert_eq!(parse_start_date(input).unwrap(), expected);
}

#[test]
fn test_parse_start_date_rejects_garbage() {
    let err = parse_start_date("31/01/2021").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

// ============================================================================
// ReportLocation
// ============================================================================

#[test]
fn test_report_urls() {
    let settlement = settlement_location(Environment::Live.base_url());
    assert_eq!(
        settlement.url_for(ProbeKey::Batch(5)).unwrap().as_str(),
        "https://ca-live.adyen.com/reports/download/MerchantAccount/AcmeEU/settlement_detail_report_batch_5.csv"
    );

    let disputes = ReportLocation::for_stream(
        Environment::Test.base_url(),
        StreamKind::DisputeTransactionDetails.definition(),
        "AcmeCorp",
        "AcmeEU",
    )
    .unwrap();
    assert_eq!(
        disputes
            .url_for(ProbeKey::Date(date(2021, 1, 2)))
            .unwrap()
            .as_str(),
        "https://ca-test.adyen.com/reports/download/Company/AcmeCorp/dispute_report_2021_01_02.csv"
    );
}

#[test]
fn test_report_url_encodes_account() {
    let location = ReportLocation::new(
        "https://ca-test.adyen.com/",
        AccountScope::Merchant,
        "Acme EU/1",
        "payments_accounting_report",
    )
    .unwrap();
    let url = location.url_for(ProbeKey::Date(date(2021, 1, 2))).unwrap();
    assert_eq!(
        url.path(),
        "/reports/download/MerchantAccount/Acme%20EU%2F1/payments_accounting_report_2021_01_02.csv"
    );
}

#[test]
fn test_environment_from_flag() {
    assert_eq!(Environment::from_test_flag(true), Environment::Test);
    assert_eq!(Environment::from_test_flag(false), Environment::Live);
    assert_eq!(Environment::default(), Environment::Live);
}

#[test]
fn test_invalid_base_url() {
    assert!(ReportLocation::new("not a url", AccountScope::Company, "A", "r").is_err());
    assert!(ReportLocation::new("mailto:x@y", AccountScope::Company, "A", "r").is_err());
}

// ============================================================================
// ReportLocator
// ============================================================================

#[tokio::test]
async fn test_locate_batches_until_not_found() {
    let server = MockServer::start().await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_5.csv"), 200).await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_6.csv"), 200).await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_7.csv"), 404).await;

    let client = client();
    let location = settlement_location(&server.uri());
    let locator = ReportLocator::new(&client, &location);

    let handles: Vec<ReportHandle> = locator
        .locate(ProbeKey::Batch(5))
        .try_collect()
        .await
        .unwrap();

    let keys: Vec<ProbeKey> = handles.iter().map(|h| h.key).collect();
    assert_eq!(keys, vec![ProbeKey::Batch(5), ProbeKey::Batch(6)]);
    assert!(handles[1].url.path().ends_with("settlement_detail_report_batch_6.csv"));
}

#[tokio::test]
async fn test_locate_dates_until_not_found() {
    let server = MockServer::start().await;
    mount_head(&server, format!("{PAYMENTS_PATH}_2021_01_01.csv"), 200).await;

    let client = client();
    let location = payments_location(&server.uri());
    let locator = ReportLocator::new(&client, &location);

    let handles: Vec<ReportHandle> = locator
        .locate(ProbeKey::Date(date(2021, 1, 1)))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].key, ProbeKey::Date(date(2021, 1, 1)));
}

#[tokio::test]
async fn test_locate_immediate_not_found_is_empty() {
    let server = MockServer::start().await;

    let client = client();
    let location = settlement_location(&server.uri());
    let locator = ReportLocator::new(&client, &location);

    let handles: Vec<ReportHandle> = locator
        .locate(ProbeKey::Batch(100))
        .try_collect()
        .await
        .unwrap();
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_locate_sends_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client();
    let location = settlement_location(&server.uri());
    let found = ReportLocator::new(&client, &location)
        .probe(ProbeKey::Batch(1))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_locate_unexpected_status_is_fatal() {
    let server = MockServer::start().await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_5.csv"), 200).await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_6.csv"), 500).await;

    let client = client();
    let location = settlement_location(&server.uri());
    let locator = ReportLocator::new(&client, &location);

    let results: Vec<_> = futures::StreamExt::collect(locator.locate(ProbeKey::Batch(5))).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().key, ProbeKey::Batch(5));
    match &results[1] {
        Err(Error::UnexpectedStatus { url, status }) => {
            assert_eq!(*status, 500);
            assert!(url.ends_with("settlement_detail_report_batch_6.csv"));
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_locate_unauthorized_is_fatal() {
    let server = MockServer::start().await;
    mount_head(&server, format!("{SETTLEMENT_PATH}_1.csv"), 401).await;

    let client = client();
    let location = settlement_location(&server.uri());
    let err = ReportLocator::new(&client, &location)
        .probe(ProbeKey::Batch(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_locate_transport_failure_ends_quietly() {
    let client = client();
    let location = settlement_location("http://127.0.0.1:9");
    let locator = ReportLocator::new(&client, &location);

    let handles: Vec<ReportHandle> = locator
        .locate(ProbeKey::Batch(1))
        .try_collect()
        .await
        .unwrap();
    assert!(handles.is_empty());
}

// ============================================================================
// ReportRetriever
// ============================================================================

fn handle_for(server: &MockServer, key: ProbeKey) -> ReportHandle {
    let location = settlement_location(&server.uri());
    ReportHandle {
        url: location.url_for(key).unwrap(),
        key,
    }
}

#[tokio::test]
async fn test_fetch_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SETTLEMENT_PATH}_5.csv")))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Company Account,Merchant Account,Batch Number\nAcmeCorp,AcmeEU,5\nAcmeCorp,AcmeEU,5\n",
        ))
        .mount(&server)
        .await;

    let client = client();
    let retriever = ReportRetriever::new(&client, CsvDecoder::new());
    let rows: Vec<RawRow> = retriever
        .fetch(&handle_for(&server, ProbeKey::Batch(5)))
        .await
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Batch Number"], "5");
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client();
    let retriever = ReportRetriever::new(&client, CsvDecoder::new());
    let mut rows = retriever
        .fetch(&handle_for(&server, ProbeKey::Batch(5)))
        .await
        .unwrap();
    assert!(rows.next().is_none());
}

#[tokio::test]
async fn test_fetch_error_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client();
    let retriever = ReportRetriever::new(&client, CsvDecoder::new());
    let err = retriever
        .fetch(&handle_for(&server, ProbeKey::Batch(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 403, .. }));
}

#[tokio::test]
async fn test_fetch_malformed_row_respects_strictness() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("A,B\n1,2\n3\n4,5\n"))
        .mount(&server)
        .await;

    let client = client();
    let handle = handle_for(&server, ProbeKey::Batch(5));

    let strict = ReportRetriever::new(&client, CsvDecoder::new());
    let mut rows = strict.fetch(&handle).await.unwrap();
    assert!(rows.next().unwrap().is_ok());
    assert!(matches!(
        rows.next(),
        Some(Err(Error::MalformedRow { line: 3, .. }))
    ));

    let lenient = ReportRetriever::new(
        &client,
        CsvDecoder::new().with_strictness(CsvStrictness::Lenient),
    );
    let mut rows = lenient.fetch(&handle).await.unwrap();
    assert_eq!(rows.by_ref().filter(Result::is_ok).count(), 2);
    assert_eq!(rows.skipped(), 1);
}
