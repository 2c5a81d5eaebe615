//! API integration tests
//!
//! These run against a live server with its default admin account:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api";

/// Helper to get an authenticated session token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Unique 8-digit subscriber number so runs do not collide
fn unique_subscriber() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .subsec_nanos();
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_millis();
    format!("{:08}", (millis as u32).wrapping_add(nanos) % 100_000_000)
}

async fn check_in(client: &Client, body: Value) -> Value {
    let response = client
        .post(format!("{}/visitors/check-in", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send check-in request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse check-in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/visitors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_check_in_creates_visitor_and_visit() {
    let client = Client::new();
    let subscriber = unique_subscriber();

    let body = check_in(
        &client,
        json!({
            "full_name": "Jean Mukendi",
            "year_of_birth": 1990,
            "sex": "male",
            "phone_number": format!("0{}8", subscriber),
            "purpose": "Meeting"
        }),
    )
    .await;

    assert_eq!(body["returning"], false);
    assert!(body["visitor"]["id"].is_number());
    assert_eq!(body["visitor"]["visit_count"], 1);
    assert_eq!(body["visit"]["active"], true);
    assert!(body["visit"]["check_out_time"].is_null());
    assert_eq!(body["visit"]["purpose"], "Meeting");

    // Badge id is a formatted rendering of the numeric id
    let id = body["visitor"]["id"].as_i64().unwrap();
    assert_eq!(
        body["badge_id"].as_str().unwrap(),
        format!("V-{:06}", id)
    );
}

#[tokio::test]
#[ignore]
async fn test_returning_visitor_matched_by_normalized_phone() {
    let client = Client::new();
    let subscriber = unique_subscriber();

    // First visit with local number format
    let first = check_in(
        &client,
        json!({
            "full_name": "Marie Kabila",
            "year_of_birth": 1985,
            "phone_number": format!("08{}", subscriber),
            "purpose": "Delivery"
        }),
    )
    .await;
    let visitor_id = first["visitor"]["id"].as_i64().unwrap();

    // Second visit, same line in international format
    let second = check_in(
        &client,
        json!({
            "full_name": "Marie Kabila",
            "year_of_birth": 1985,
            "phone_number": format!("+2438{}", subscriber),
            "purpose": "Meeting"
        }),
    )
    .await;

    assert_eq!(second["returning"], true);
    assert_eq!(second["visitor"]["id"].as_i64().unwrap(), visitor_id);
    assert_eq!(second["visitor"]["visit_count"], 2);
    // A new visit was created, not a new visitor
    assert_ne!(
        second["visit"]["id"].as_i64().unwrap(),
        first["visit"]["id"].as_i64().unwrap()
    );
    // Profile refresh stored the newly submitted phone format
    assert_eq!(
        second["visitor"]["phone_number"].as_str().unwrap(),
        format!("+2438{}", subscriber)
    );
}

#[tokio::test]
#[ignore]
async fn test_email_match_wins_over_phone() {
    let client = Client::new();
    let subscriber = unique_subscriber();
    let email = format!("amani.{}@example.org", subscriber);

    let first = check_in(
        &client,
        json!({
            "full_name": "Amani Tshisekedi",
            "year_of_birth": 1978,
            "email": email,
            "phone_number": format!("08{}", subscriber)
        }),
    )
    .await;

    // Same email, entirely different phone number
    let second = check_in(
        &client,
        json!({
            "full_name": "Amani Tshisekedi",
            "year_of_birth": 1978,
            "email": email,
            "phone_number": format!("09{}", unique_subscriber())
        }),
    )
    .await;

    assert_eq!(second["returning"], true);
    assert_eq!(
        second["visitor"]["id"].as_i64().unwrap(),
        first["visitor"]["id"].as_i64().unwrap()
    );
}

#[tokio::test]
#[ignore]
async fn test_double_checkout_fails() {
    let client = Client::new();

    let body = check_in(
        &client,
        json!({
            "full_name": "Pascal Ilunga",
            "year_of_birth": 1995,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let visit_id = body["visit"]["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/visitors/check-out", BASE_URL))
        .json(&json!({ "visit_id": visit_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let checked_out: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(checked_out["active"], false);
    let first_timestamp = checked_out["check_out_time"].as_str().unwrap().to_string();

    // Second checkout is a state conflict, not an overwrite
    let response = client
        .post(format!("{}/visitors/check-out", BASE_URL))
        .json(&json!({ "visit_id": visit_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Original checkout timestamp is unchanged
    let token = get_auth_token(&client).await;
    let response = client
        .get(format!(
            "{}/admin/visits?visitor_id={}",
            BASE_URL,
            body["visitor"]["id"].as_i64().unwrap()
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let visits: Value = response.json().await.expect("Failed to parse response");
    let visit = visits["visits"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"].as_i64() == Some(visit_id))
        .expect("Visit missing from listing");
    assert_eq!(visit["check_out_time"].as_str().unwrap(), first_timestamp);
}

#[tokio::test]
#[ignore]
async fn test_checkout_of_unknown_visit_is_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/visitors/check-out", BASE_URL))
        .json(&json!({ "visit_id": 999_999_999 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_trash_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let body = check_in(
        &client,
        json!({
            "full_name": "Grace Mbuyi",
            "year_of_birth": 2000,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let visitor_id = body["visitor"]["id"].as_i64().unwrap();
    let visit_id = body["visit"]["id"].as_i64().unwrap();

    // Deletion is blocked while a visit is active
    let response = client
        .delete(format!("{}/admin/delete-visitor/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Check out, then deletion succeeds
    let response = client
        .post(format!("{}/visitors/check-out", BASE_URL))
        .json(&json!({ "visit_id": visit_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/admin/delete-visitor/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Trashed: present in the trash listing, absent from the normal listing
    let trash: Value = client
        .get(format!("{}/admin/trash", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(trash
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["id"].as_i64() == Some(visitor_id)));

    // Restore clears the flag
    let response = client
        .post(format!("{}/admin/restore-visitor/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let restored: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(restored["deleted"], false);

    let trash: Value = client
        .get(format!("{}/admin/trash", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(!trash
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["id"].as_i64() == Some(visitor_id)));

    // Cleanup
    let _ = client
        .delete(format!("{}/admin/permanently-delete/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_partner_link_symmetry() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let first = check_in(
        &client,
        json!({
            "full_name": "Didier Kasongo",
            "year_of_birth": 1982,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let second = check_in(
        &client,
        json!({
            "full_name": "Sylvie Kasongo",
            "year_of_birth": 1984,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;

    let visit_a = first["visit"]["id"].as_i64().unwrap();
    let visit_b = second["visit"]["id"].as_i64().unwrap();

    // Link: both sides must point at each other
    let response = client
        .post(format!("{}/admin/set-visit-partner", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "visit_id": visit_a, "partner_id": visit_b }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let linked: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(linked["partner_visit_id"].as_i64(), Some(visit_b));

    let fetch_visit = |visitor_id: i64, visit_id: i64| {
        let client = client.clone();
        let token = token.clone();
        async move {
            let visits: Value = client
                .get(format!("{}/admin/visits?visitor_id={}", BASE_URL, visitor_id))
                .header("Authorization", format!("Bearer {}", token))
                .send()
                .await
                .expect("Failed to send request")
                .json()
                .await
                .expect("Failed to parse response");
            visits["visits"]
                .as_array()
                .unwrap()
                .iter()
                .find(|v| v["id"].as_i64() == Some(visit_id))
                .cloned()
                .expect("Visit missing from listing")
        }
    };

    let b = fetch_visit(second["visitor"]["id"].as_i64().unwrap(), visit_b).await;
    assert_eq!(b["partner_visit_id"].as_i64(), Some(visit_a));

    // Clear on one side clears the reciprocal pointer too
    let response = client
        .post(format!("{}/admin/set-visit-partner", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "visit_id": visit_a, "partner_id": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let cleared: Value = response.json().await.expect("Failed to parse response");
    assert!(cleared["partner_visit_id"].is_null());

    let b = fetch_visit(second["visitor"]["id"].as_i64().unwrap(), visit_b).await;
    assert!(b["partner_visit_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_check_out_all() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    for _ in 0..2 {
        check_in(
            &client,
            json!({
                "full_name": "Walk-in Visitor",
                "year_of_birth": 1999,
                "phone_number": format!("08{}", unique_subscriber())
            }),
        )
        .await;
    }

    let response = client
        .post(format!("{}/admin/auto-checkout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["checked_out"].as_i64().unwrap() >= 2);

    // Nothing left to close
    let response = client
        .post(format!("{}/admin/auto-checkout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["checked_out"].as_i64().unwrap(), 0);

    // The bulk action landed in the audit trail with the acting admin
    let logs: Value = client
        .get(format!("{}/admin/system-logs?action=auto_checkout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let latest = &logs["logs"].as_array().unwrap()[0];
    assert!(latest["admin_id"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_verify_visitor() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let body = check_in(
        &client,
        json!({
            "full_name": "Honore Mwamba",
            "year_of_birth": 1970,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let visitor_id = body["visitor"]["id"].as_i64().unwrap();
    assert_eq!(body["visitor"]["verified"], false);

    let response = client
        .post(format!("{}/admin/verify-visitor", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "visitor_id": visitor_id, "verified": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let verified: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(verified["verified"], true);
}

#[tokio::test]
#[ignore]
async fn test_check_in_validation() {
    let client = Client::new();

    // Missing phone number
    let response = client
        .post(format!("{}/visitors/check-in", BASE_URL))
        .json(&json!({
            "full_name": "No Phone",
            "year_of_birth": 1990
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_client_error());

    // Year of birth out of range
    let response = client
        .post(format!("{}/visitors/check-in", BASE_URL))
        .json(&json!({
            "full_name": "Time Traveler",
            "year_of_birth": 1650,
            "phone_number": "0812345678"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_settings_read_and_update() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Public read works without a session
    let response = client
        .get(format!("{}/settings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let settings: Value = response.json().await.expect("Failed to parse response");
    assert!(settings["app_name"].is_string());
    assert!(settings["country_code"].is_string());

    // Admin update
    let response = client
        .put(format!("{}/admin/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "header_name": "Karibu Reception" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["header_name"], "Karibu Reception");

    // Invalid logo payload is rejected before the store
    let response = client
        .put(format!("{}/admin/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "logo_data": "data:image/png;base64,@@not-base64@@" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_report_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let body = check_in(
        &client,
        json!({
            "full_name": "Reported Visitor",
            "year_of_birth": 1991,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let visitor_id = body["visitor"]["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/admin/reports", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "visitor_id": visitor_id,
            "report_type": "behavior",
            "description": "Refused to sign out",
            "severity": "medium"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let report: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(report["status"], "open");
    assert!(report["resolved_at"].is_null());
    let report_id = report["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/admin/reports/{}", BASE_URL, report_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "status": "resolved",
            "resolution_notes": "Spoke with the visitor"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let resolved: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(resolved["status"], "resolved");
    assert!(resolved["resolved_at"].is_string());

    // Visitor-scoped listing includes it
    let reports: Value = client
        .get(format!("{}/admin/visitors/{}/reports", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(reports
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"].as_i64() == Some(report_id)));
}

#[tokio::test]
#[ignore]
async fn test_empty_bin_is_permanent() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let body = check_in(
        &client,
        json!({
            "full_name": "Short Lived",
            "year_of_birth": 1960,
            "phone_number": format!("08{}", unique_subscriber())
        }),
    )
    .await;
    let visitor_id = body["visitor"]["id"].as_i64().unwrap();
    let visit_id = body["visit"]["id"].as_i64().unwrap();

    client
        .post(format!("{}/visitors/check-out", BASE_URL))
        .json(&json!({ "visit_id": visit_id }))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .delete(format!("{}/admin/delete-visitor/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/admin/empty-bin", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["deleted"].as_i64().unwrap() >= 1);

    // Gone for good
    let response = client
        .get(format!("{}/admin/visitors/{}", BASE_URL, visitor_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["visitors"]["total"].is_number());
    assert!(body["visits"]["active"].is_number());
    assert!(body["reports"]["unresolved"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_logout_invalidates_session() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/admin/logout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/admin/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}
