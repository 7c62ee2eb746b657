use anyhow::Result;
use region_intake::core::resolver::pick_zip;
use region_intake::{ApiResponse, LocalStore, ZipResolver};
use serde_json::json;
use tempfile::TempDir;

fn seeded_store() -> Result<(TempDir, LocalStore)> {
    let temp_dir = TempDir::new()?;
    let regions = json!([
        {"zipCode": "10115", "region": "BE"},
        {"zipCode": "01067", "region": "SN"}
    ]);
    std::fs::write(temp_dir.path().join("regions.json"), regions.to_string())?;

    let store = LocalStore::new(temp_dir.path().to_str().unwrap().to_string());
    Ok((temp_dir, store))
}

/// 已知郵遞區號回傳 provinceId
#[tokio::test]
async fn test_known_zip_round_trip() -> Result<()> {
    let (_dir, store) = seeded_store()?;
    let response = ZipResolver::new(&store).handle(Some(&json!("10115"))).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&response.to_json())?,
        json!({"success": 1, "content": {"provinceId": "BE"}})
    );
    Ok(())
}

#[tokio::test]
async fn test_leading_zero_zip_is_kept() -> Result<()> {
    let (_dir, store) = seeded_store()?;
    let response = ZipResolver::new(&store).handle(Some(&json!("01067"))).await;
    assert_eq!(response, ApiResponse::province("SN"));
    Ok(())
}

#[tokio::test]
async fn test_query_parameter_wins_over_body() -> Result<()> {
    let (_dir, store) = seeded_store()?;
    let body = json!({"zip": "01067"});
    let zip = pick_zip(Some("10115"), Some(&body));

    let response = ZipResolver::new(&store).handle(zip.as_ref()).await;
    assert_eq!(response, ApiResponse::province("BE"));
    Ok(())
}

#[tokio::test]
async fn test_error_responses() -> Result<()> {
    let (_dir, store) = seeded_store()?;
    let resolver = ZipResolver::new(&store);

    let missing = resolver.handle(None).await;
    assert_eq!(missing, ApiResponse::error(400, "No ZIP code given!"));

    let short = resolver.handle(Some(&json!("1234"))).await;
    assert_eq!(short, ApiResponse::error(400, "Not a valid zip code"));

    let unknown = resolver.handle(Some(&json!("80331"))).await;
    assert_eq!(unknown, ApiResponse::error(404, "provinceID was not found"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_store_is_500() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = LocalStore::new(temp_dir.path().join("missing").to_str().unwrap().to_string());

    let response = ZipResolver::new(&store).handle(Some(&json!("10115"))).await;
    assert_eq!(response, ApiResponse::error(500, "Something went wrong"));
    Ok(())
}
