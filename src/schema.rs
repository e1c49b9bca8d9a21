//! Column names of the orders dataset.
//!
//! The pipeline is written against one fixed schema; these constants are the
//! only place the names are spelled out.

/// Order lifecycle timestamps, not used as numeric features.
pub const TIMESTAMP_COLUMNS: [&str; 5] = [
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
    "order_purchase_timestamp",
];

/// Numeric columns whose missing values are replaced by the column median.
pub const MEDIAN_IMPUTED_COLUMNS: [&str; 7] = [
    "product_weight_g",
    "product_length_cm",
    "product_height_cm",
    "product_width_cm",
    "price",
    "freight_value",
    "product_photos_qty",
];

/// Free-text review column.
pub const REVIEW_COMMENT_COLUMN: &str = "review_comment_message";

/// Fill value for reviews left without a comment.
pub const NO_REVIEW_SENTINEL: &str = "No review";

/// Identifier-like numeric columns with no predictive value.
pub const IDENTIFIER_COLUMNS: [&str; 2] = ["customer_zip_code_prefix", "order_item_id"];

/// Regression target.
pub const LABEL_COLUMN: &str = "review_score";
