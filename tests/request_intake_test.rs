use anyhow::Result;
use region_intake::core::auth::issue_token;
use region_intake::{ApiResponse, LocalStore, RequestIntake, TokenVerifier};
use serde_json::{json, Value};
use tempfile::TempDir;

const SECRET: &str = "integration-secret";

struct Fixture {
    dir: TempDir,
    store: LocalStore,
    verifier: TokenVerifier,
}

impl Fixture {
    fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let regions = json!([{"zipCode": "10115", "region": "BE"}]);
        std::fs::write(dir.path().join("regions.json"), regions.to_string())?;

        let store = LocalStore::new(dir.path().to_str().unwrap().to_string());
        Ok(Self {
            dir,
            store,
            verifier: TokenVerifier::new(SECRET),
        })
    }

    async fn submit(&self, body: &Value) -> ApiResponse {
        RequestIntake::new(&self.store, &self.verifier)
            .handle(Some(body))
            .await
    }
}

fn valid_body() -> Result<Value> {
    Ok(json!({
        "token": issue_token(SECRET, "hotline", 600)?,
        "phone": "030123456",
        "zip": "10115",
        "request": 5
    }))
}

#[tokio::test]
async fn test_successful_intake_writes_one_record() -> Result<()> {
    let fixture = Fixture::new()?;
    let response = fixture.submit(&valid_body()?).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        serde_json::from_str::<Value>(&response.to_json())?,
        json!({"success": 1, "content": {"message": "Successfully added call."}})
    );

    let stored = fixture.store.read_requests().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].phone.as_str(), "030123456");
    assert_eq!(stored[0].province_id, "BE");
    assert_eq!(stored[0].schema_version, 1);
    Ok(())
}

/// 同一份請求送兩次會產生兩筆紀錄
#[tokio::test]
async fn test_duplicate_submissions_are_not_deduplicated() -> Result<()> {
    let fixture = Fixture::new()?;
    let body = valid_body()?;

    assert!(fixture.submit(&body).await.is_success());
    assert!(fixture.submit(&body).await.is_success());

    let stored = fixture.store.read_requests().await?;
    assert_eq!(stored.len(), 2);
    assert_ne!(stored[0].id, stored[1].id);
    Ok(())
}

#[tokio::test]
async fn test_unmapped_zip_returns_404_without_writing() -> Result<()> {
    let fixture = Fixture::new()?;
    let mut body = valid_body()?;
    body["zip"] = json!("80331");

    let response = fixture.submit(&body).await;
    assert_eq!(response, ApiResponse::error(404, "provinceID was not found"));
    assert!(fixture.store.read_requests().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_premium_number_via_country_code_rejected() -> Result<()> {
    let fixture = Fixture::new()?;
    let mut body = valid_body()?;
    body["phone"] = json!("00499001234567");

    let response = fixture.submit(&body).await;
    assert_eq!(
        response,
        ApiResponse::error(400, "This phone number is not allowed")
    );
    assert!(fixture.store.read_requests().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_expired_token_rejected() -> Result<()> {
    let fixture = Fixture::new()?;
    let mut body = valid_body()?;
    body["token"] = json!(issue_token(SECRET, "hotline", -120)?);

    let response = fixture.submit(&body).await;
    assert_eq!(
        response,
        ApiResponse::error(401, "Could not authenticate token")
    );
    Ok(())
}

#[tokio::test]
async fn test_store_write_failure_is_500() -> Result<()> {
    let fixture = Fixture::new()?;
    // 以目錄佔用 requests.jsonl 的路徑，使追加寫入失敗
    std::fs::create_dir(fixture.dir.path().join("requests.jsonl"))?;

    let response = fixture.submit(&valid_body()?).await;
    assert_eq!(response, ApiResponse::error(500, "Something went wrong"));
    Ok(())
}
