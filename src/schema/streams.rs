//! Column mappings of the three report types
//!
//! Column names follow the CSV headers of the reports exactly.

use super::definition::{
    AccountScope, FieldMapping, KeyStyle, ScalarKind, StreamDefinition, StreamKind,
};
use crate::types::ReplicationMethod;

/// Synthetic record id, filled in by the row cleaner
const RECORD_ID: FieldMapping = FieldMapping {
    source: "id",
    target: "id",
    kind: Some(ScalarKind::Integer),
    nullable: false,
};

pub static SETTLEMENT_DETAILS: StreamDefinition = StreamDefinition {
    kind: StreamKind::SettlementDetails,
    replication_method: ReplicationMethod::Incremental,
    replication_key: "id",
    bookmark_field: "batch_number",
    report_type: "settlement_detail_report_batch",
    account_scope: AccountScope::Merchant,
    key_style: KeyStyle::Batch,
    timezone_columns: &[("Creation Date", "TimeZone")],
    fields: SETTLEMENT_DETAILS_FIELDS,
};

pub static PAYMENT_ACCOUNTING: StreamDefinition = StreamDefinition {
    kind: StreamKind::PaymentAccounting,
    replication_method: ReplicationMethod::Incremental,
    replication_key: "id",
    bookmark_field: "start_date",
    report_type: "payments_accounting_report",
    account_scope: AccountScope::Merchant,
    key_style: KeyStyle::Date,
    timezone_columns: &[("Booking Date", "TimeZone")],
    fields: PAYMENT_ACCOUNTING_FIELDS,
};

pub static DISPUTE_TRANSACTION_DETAILS: StreamDefinition = StreamDefinition {
    kind: StreamKind::DisputeTransactionDetails,
    replication_method: ReplicationMethod::Incremental,
    replication_key: "id",
    bookmark_field: "start_date",
    report_type: "dispute_report",
    account_scope: AccountScope::Company,
    key_style: KeyStyle::Date,
    timezone_columns: &[
        ("Record Date", "Record Date TimeZone"),
        ("Payment Date", "Payment Date TimeZone"),
        ("Dispute Date", "Dispute Date TimeZone"),
        ("Dispute End Date", "Dispute End Date TimeZone"),
    ],
    fields: DISPUTE_TRANSACTION_DETAILS_FIELDS,
};

const SETTLEMENT_DETAILS_FIELDS: &[FieldMapping] = &[
    RECORD_ID,
    FieldMapping::required("Company Account", "company_account"),
    FieldMapping::required("Merchant Account", "merchant_account"),
    FieldMapping::text("Psp Reference", "psp_reference"),
    FieldMapping::text("Merchant Reference", "merchant_reference"),
    FieldMapping::text("Payment Method", "payment_method"),
    FieldMapping::typed("Creation Date", "creation_date", ScalarKind::Timestamp),
    FieldMapping::required("TimeZone", "timezone"),
    FieldMapping::required("Type", "type"),
    FieldMapping::text("Modification Reference", "modification_reference"),
    FieldMapping::text("Gross Currency", "gross_currency"),
    FieldMapping::typed("Gross Debit (GC)", "gross_debit", ScalarKind::Decimal),
    FieldMapping::typed("Gross Credit (GC)", "gross_credit", ScalarKind::Decimal),
    FieldMapping::typed("Exchange Rate", "exchange_rate", ScalarKind::Decimal),
    FieldMapping::text("Net Currency", "net_currency"),
    FieldMapping::typed("Net Debit (NC)", "net_debit", ScalarKind::Decimal),
    FieldMapping::typed("Net Credit (NC)", "net_credit", ScalarKind::Decimal),
    FieldMapping::typed("Commission (NC)", "commission", ScalarKind::Decimal),
    FieldMapping::typed("Markup (NC)", "markup", ScalarKind::Decimal),
    FieldMapping::typed("Scheme Fees (NC)", "scheme_fees", ScalarKind::Decimal),
    FieldMapping::typed("Interchange (NC)", "interchange", ScalarKind::Decimal),
    FieldMapping::text("Payment Method Variant", "payment_method_variant"),
    FieldMapping::typed("Batch Number", "batch_number", ScalarKind::Integer),
    FieldMapping::text("Modification Merchant Reference", "modification_merchant_reference"),
];

const PAYMENT_ACCOUNTING_FIELDS: &[FieldMapping] = &[
    RECORD_ID,
    FieldMapping::required("Company Account", "company_account"),
    FieldMapping::required("Merchant Account", "merchant_account"),
    FieldMapping::text("Psp Reference", "psp_reference"),
    FieldMapping::text("Merchant Reference", "merchant_reference"),
    FieldMapping::text("Payment Method", "payment_method"),
    FieldMapping::typed("Booking Date", "booking_date", ScalarKind::Timestamp),
    FieldMapping::required("TimeZone", "timezone"),
    FieldMapping::text("Main Currency", "main_currency"),
    FieldMapping::typed("Main Amount", "main_amount", ScalarKind::Decimal),
    FieldMapping::text("Record Type", "record_type"),
    FieldMapping::text("Payment Currency", "payment_currency"),
    FieldMapping::typed("Received (PC)", "received", ScalarKind::Decimal),
    FieldMapping::typed("Authorised (PC)", "authorised", ScalarKind::Decimal),
    FieldMapping::typed("Captured (PC)", "captured", ScalarKind::Decimal),
    FieldMapping::text("Settlement Currency", "settlement_currency"),
    FieldMapping::typed("Payable (SC)", "payable", ScalarKind::Decimal),
    FieldMapping::typed("Commission (SC)", "commission", ScalarKind::Decimal),
    FieldMapping::typed("Markup (SC)", "markup", ScalarKind::Decimal),
    FieldMapping::typed("Scheme Fees (SC)", "scheme_fees", ScalarKind::Decimal),
    FieldMapping::typed("Interchange (SC)", "interchange", ScalarKind::Decimal),
    FieldMapping::text("Processing Fee Currency", "processing_fee_currency"),
    FieldMapping::typed("Processing Fee (FC)", "processing_fee", ScalarKind::Decimal),
    FieldMapping::text("User Name", "user_name"),
    FieldMapping::text("Payment Method Variant", "payment_method_variant"),
    FieldMapping::text("Modification Merchant Reference", "modification_merchant_reference"),
];

const DISPUTE_TRANSACTION_DETAILS_FIELDS: &[FieldMapping] = &[
    RECORD_ID,
    FieldMapping::required("Company Account", "company_account"),
    FieldMapping::required("Merchant Account", "merchant_account"),
    FieldMapping::text("Psp Reference", "psp_reference"),
    FieldMapping::text("Merchant Reference", "merchant_reference"),
    FieldMapping::text("Payment Method", "payment_method"),
    FieldMapping::typed("Record Date", "record_date", ScalarKind::Timestamp),
    FieldMapping::required("Record Date TimeZone", "record_date_timezone"),
    FieldMapping::required("Dispute Currency", "dispute_currency"),
    FieldMapping::typed("Dispute Amount", "dispute_amount", ScalarKind::Decimal),
    FieldMapping::text("Record Type", "record_type"),
    FieldMapping::text("Dispute PSP Reference", "dispute_psp_reference"),
    FieldMapping::text("Dispute Reason", "dispute_reason"),
    FieldMapping::text("RFI Scheme Code", "rfi_scheme_code"),
    FieldMapping::text("RFI Reason Code", "rfi_reason_code"),
    FieldMapping::text("CB Scheme Code", "cb_scheme_code"),
    FieldMapping::text("CB Reason Code", "cb_reason_code"),
    FieldMapping::text("NoF Scheme Code", "nof_scheme_code"),
    FieldMapping::text("NoF Reason Code", "nof_reason_code"),
    FieldMapping::typed("Payment Date", "payment_date", ScalarKind::Timestamp),
    FieldMapping::text("Payment Date TimeZone", "payment_date_timezone"),
    FieldMapping::text("Payment Currency", "payment_currency"),
    FieldMapping::typed("Payment Amount", "payment_amount", ScalarKind::Decimal),
    FieldMapping::typed("Dispute Date", "dispute_date", ScalarKind::Timestamp),
    FieldMapping::text("Dispute Date TimeZone", "dispute_date_timezone"),
    FieldMapping::text("Dispute ARN", "dispute_arn"),
    FieldMapping::text("User Name", "user_name"),
    FieldMapping::typed("Risk Scoring", "risk_scoring", ScalarKind::Integer),
    FieldMapping::text("Shopper Interaction", "shopper_interaction"),
    FieldMapping::text("Shopper Name", "shopper_name"),
    FieldMapping::text("Shopper Email", "shopper_email"),
    FieldMapping::text("Shopper Reference", "shopper_reference"),
    FieldMapping::text("Shopper PAN", "shopper_pan"),
    FieldMapping::text("Iban", "iban"),
    FieldMapping::text("Bic", "bic"),
    FieldMapping::text("Shopper IP", "shopper_ip"),
    FieldMapping::text("Shopper Country", "shopper_country"),
    FieldMapping::text("Issuer Country", "issuer_country"),
    FieldMapping::text("Issuer Id", "issuer_id"),
    FieldMapping::text("3D Directory Response", "3d_directory_response"),
    FieldMapping::text("3D Authentication Response", "3d_authentication_response"),
    FieldMapping::typed("CVC2 Response", "cvc2_response", ScalarKind::Integer),
    FieldMapping::typed("AVS Response", "avs_response", ScalarKind::Integer),
    FieldMapping::typed("Dispute Auto Defended", "dispute_auto_defended", ScalarKind::Boolean),
    FieldMapping::typed("Dispute End Date", "dispute_end_date", ScalarKind::Timestamp),
    FieldMapping::text("Dispute End Date TimeZone", "dispute_end_date_timezone"),
];
