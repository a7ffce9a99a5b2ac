//! Integration tests against a live MinIO deployment.
//!
//! Ignored by default. Run with a reachable server, e.g.:
//!
//! ```text
//! STRATA_MINIO_ENDPOINT=localhost \
//! STRATA_MINIO_PORT=9000 \
//! STRATA_MINIO_ACCESS_KEY=minioadmin \
//! STRATA_MINIO_SECRET_KEY=minioadmin \
//! cargo test -p strata-minio --test live -- --ignored
//! ```
//!
//! Variables may also come from a `.env` file in the workspace root.

use futures::StreamExt;
use strata_minio::{
    Connector, ConnectorConfig, Credentials, Error, OperationArgs, OperationValue,
};

fn live_config() -> Option<ConnectorConfig> {
    dotenvy::dotenv().ok();

    let end_point = std::env::var("STRATA_MINIO_ENDPOINT").ok()?;
    let access_key = std::env::var("STRATA_MINIO_ACCESS_KEY").ok()?;
    let secret_key = std::env::var("STRATA_MINIO_SECRET_KEY").ok()?;

    let mut config = ConnectorConfig::new(end_point, Credentials::new(access_key, secret_key));
    if let Ok(port) = std::env::var("STRATA_MINIO_PORT") {
        config = config.with_port(port.parse().expect("STRATA_MINIO_PORT must be a u16"));
    }
    if let Ok(ssl) = std::env::var("STRATA_MINIO_USE_SSL") {
        config = config.with_ssl(ssl == "true" || ssl == "1");
    }
    Some(config)
}

async fn live_connector() -> Connector {
    let config = live_config().expect("STRATA_MINIO_* environment variables are not set");
    let connector = Connector::new(config);
    connector.connect().await.expect("connect failed");
    connector
}

fn test_bucket(suffix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("strata-live-{suffix}-{nanos}")
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn bucket_round_trip() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("bucket");

    table
        .invoke("makeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();

    let exists = table
        .invoke("bucketExists", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
    assert_eq!(exists.as_bool(), Some(true));

    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();

    let exists = table
        .invoke("bucketExists", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
    assert_eq!(exists.as_bool(), Some(false));
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn make_bucket_accepts_a_region_argument() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("region");

    // Region-present variant; bucket_round_trip covers the plain one.
    // us-east-1 is the default region of a stock deployment.
    table
        .invoke(
            "makeBucket",
            OperationArgs::new().bucket(&bucket).region("us-east-1"),
        )
        .await
        .unwrap();

    let exists = table
        .invoke("bucketExists", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
    assert_eq!(exists.as_bool(), Some(true));

    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn object_content_survives_upload_and_download() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("object");

    table
        .invoke("makeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();

    let body = b"hello from the live test".as_slice();
    let receipt = table
        .invoke(
            "putObject",
            OperationArgs::new()
                .bucket(&bucket)
                .object("greeting.txt")
                .data(body.to_vec()),
        )
        .await
        .unwrap();
    let receipt = receipt.as_json().unwrap();
    assert_eq!(receipt["size"], body.len());

    let downloaded = table
        .invoke(
            "getObject",
            OperationArgs::new().bucket(&bucket).object("greeting.txt"),
        )
        .await
        .unwrap();
    assert_eq!(downloaded.as_bytes().unwrap().as_ref(), body);

    let stat = table
        .invoke(
            "statObject",
            OperationArgs::new().bucket(&bucket).object("greeting.txt"),
        )
        .await
        .unwrap();
    assert_eq!(stat.as_json().unwrap()["size"], body.len());

    table
        .invoke(
            "removeObject",
            OperationArgs::new().bucket(&bucket).object("greeting.txt"),
        )
        .await
        .unwrap();
    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn listing_resolves_before_the_stream_is_drained() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("list");

    table
        .invoke("makeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
    for name in ["a.txt", "b.txt", "nested/c.txt"] {
        table
            .invoke(
                "putObject",
                OperationArgs::new()
                    .bucket(&bucket)
                    .object(name)
                    .data(b"x".to_vec()),
            )
            .await
            .unwrap();
    }

    let value = table
        .invoke(
            "listObjects",
            OperationArgs::new().bucket(&bucket).recursive(true),
        )
        .await
        .unwrap();
    assert!(value.is_stream());

    let mut names = Vec::new();
    if let OperationValue::ObjectStream(mut stream) = value {
        while let Some(page) = stream.next().await {
            let page = page.unwrap();
            names.extend(page.contents.into_iter().map(|entry| entry.name));
        }
    }
    names.sort();
    assert_eq!(names, ["a.txt", "b.txt", "nested/c.txt"]);

    table
        .invoke(
            "removeObjects",
            OperationArgs::new()
                .bucket(&bucket)
                .objects(["a.txt", "b.txt", "nested/c.txt"]),
        )
        .await
        .unwrap();
    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn backend_failure_surfaces_with_the_operation_name() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("missing");

    table
        .invoke("makeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();

    // statObject on an absent key fails on the backend, not locally.
    let err = table
        .invoke(
            "statObject",
            OperationArgs::new().bucket(&bucket).object("no-such-key"),
        )
        .await
        .unwrap_err();
    assert!(err.is_operation_error());
    assert_eq!(err.operation_name(), Some("statObject"));
    assert!(matches!(err, Error::Operation { .. }));

    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn presigned_get_url_names_the_object() {
    let connector = live_connector().await;
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();
    let bucket = test_bucket("presign");

    table
        .invoke("makeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();

    let value = table
        .invoke(
            "presignedGetObject",
            OperationArgs::new()
                .bucket(&bucket)
                .object("download.bin")
                .expiry_seconds(600),
        )
        .await
        .unwrap();
    let url = value.as_text().unwrap();
    assert!(url.contains(&bucket));
    assert!(url.contains("download.bin"));
    assert!(url.contains("X-Amz-Signature"));

    table
        .invoke("removeBucket", OperationArgs::new().bucket(&bucket))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a live MinIO deployment"]
async fn default_bucket_fills_in_for_omitted_arguments() {
    let mut config = live_config().expect("STRATA_MINIO_* environment variables are not set");
    let scratch = test_bucket("default");
    config = config.with_bucket(&scratch);

    let connector = Connector::new(config);
    let connection = connector.connect().await.unwrap();
    let table = connection.operations();

    // No bucket argument anywhere below; the configured default applies.
    table.invoke("makeBucket", OperationArgs::new()).await.unwrap();
    let exists = table
        .invoke("bucketExists", OperationArgs::new())
        .await
        .unwrap();
    assert_eq!(exists.as_bool(), Some(true));
    table
        .invoke("removeBucket", OperationArgs::new())
        .await
        .unwrap();
}
