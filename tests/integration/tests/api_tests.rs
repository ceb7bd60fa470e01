//! HTTP API tests over in-memory repositories and a stubbed remote API
//!
//! These run without PostgreSQL; readiness is expected to report the
//! database as unreachable.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start(stub: &StubRemote) -> TestServer {
    let config = test_config(&stub.base_url(), &[]).expect("config");
    TestServer::start_in_memory(config).await.expect("server")
}

// ============================================================================
// Health probes
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/health").await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/health/ready").await.unwrap();
        let body: Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
            .await
            .unwrap();
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["checks"]["database"], "unhealthy");
    }
}

// ============================================================================
// Read endpoints
// ============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/leaderboard?mode=team").await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["mode"], "team");
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_leaderboard_limit_is_clamped() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/leaderboard?limit=5000").await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["pagination"]["limit"], 100);
    }

    #[tokio::test]
    async fn test_leaderboard_rejects_bad_query() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/leaderboard?mode=ffa").await.unwrap();
        let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(code, "INVALID_QUERY_PARAMETER");

        let response = server.get("/api/v1/leaderboard?page=0").await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_player_not_found() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/players/31337").await.unwrap();
        let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
        assert_eq!(code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_placeholder_player_id_rejected() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/players/temp_12").await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sync_status_is_public() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/sync/status").await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["running"], false);
        assert_eq!(body["season"], server.season.into_inner());
        assert_eq!(body["settings"]["item_delay_ms"], 0);
        assert!(body["last_cycle"].is_null());
        assert_eq!(body["cache_health"]["total"], 0);
    }

    #[tokio::test]
    async fn test_cache_health() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.get("/api/v1/cache/health").await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["total"], 0);
        assert!(body["generated_at"].is_string());
    }
}

// ============================================================================
// Admin authentication
// ============================================================================

mod admin_auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server.post("/api/v1/sync/run").await.unwrap();
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_wrong_token() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server
            .post_auth("/api/v1/sync/run", "not-the-token")
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "INVALID_TOKEN");
        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn test_control_surface_disabled_without_token() {
        let stub = StubRemote::start().await.unwrap();
        let config = test_config(&stub.base_url(), &[("ADMIN_TOKEN", "")]).unwrap();
        let server = TestServer::start_in_memory(config).await.unwrap();

        let response = server
            .post_auth("/api/v1/sync/run", TEST_ADMIN_TOKEN)
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(code, "ADMIN_DISABLED");

        // Reads stay available
        let response = server.get("/api/v1/sync/status").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ============================================================================
// Forced runs and settings
// ============================================================================

mod control_tests {
    use super::*;

    #[tokio::test]
    async fn test_forced_run_caches_new_account() {
        let stub = StubRemote::start().await.unwrap();
        stub.add_player("5001", "Stubby", 1250.0, 20);
        let server = start(&stub).await;
        server.accounts().add_account("5001");

        let response = server
            .post_auth("/api/v1/sync/run", TEST_ADMIN_TOKEN)
            .await
            .unwrap();
        let report: Value = assert_json(response, StatusCode::OK).await.unwrap();

        let phases = report["phases"].as_array().unwrap();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0]["phase"], "new_accounts");
        assert_eq!(phases[0]["status"], "completed");
        assert_eq!(phases[0]["selected"], 1);
        assert_eq!(phases[0]["result"]["success_count"], 1);
        assert_eq!(stub.hits(), 1);

        let cached = server.cache().get("5001", server.season).unwrap();
        assert_eq!(cached.display_name, "Stubby");
        assert_eq!(cached.solo_rating, Some(1250));

        let response = server.get("/api/v1/players/5001").await.unwrap();
        let player: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(player["display_name"], "Stubby");
        assert_eq!(player["tier"], "Tier-B1");
        assert_eq!(player["solo_elo"], 1330);
        assert_eq!(player["group_tag"], "STB");

        let response = server.get("/api/v1/leaderboard").await.unwrap();
        let board: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(board["data"][0]["rank"], 1);
        assert_eq!(board["data"][0]["player_id"], "5001");

        let response = server.get("/api/v1/sync/status").await.unwrap();
        let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(status["last_cycle"], report);
        assert_eq!(status["cache_health"]["total"], 1);
    }

    #[tokio::test]
    async fn test_forced_run_outlives_client_timeout() {
        let stub = StubRemote::start().await.unwrap();
        let config = test_config(&stub.base_url(), &[("SYNC_ITEM_DELAY_MS", "250")]).unwrap();
        let server = TestServer::start_in_memory(config).await.unwrap();
        for id in ["5101", "5102", "5103"] {
            stub.add_player(id, "Paced", 1000.0, 5);
            server.accounts().add_account(id);
        }

        let sent = server
            .client
            .post(format!("{}/api/v1/sync/run", server.base_url()))
            .header("Authorization", format!("Bearer {TEST_ADMIN_TOKEN}"))
            .timeout(Duration::from_millis(300))
            .send()
            .await;
        assert!(sent.is_err());

        let mut status = Value::Null;
        for _ in 0..40 {
            let response = server.get("/api/v1/sync/status").await.unwrap();
            status = assert_json(response, StatusCode::OK).await.unwrap();
            if status["running"] == false {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        assert_eq!(status["running"], false);
        assert_eq!(status["last_cycle"]["phases"][0]["result"]["success_count"], 3);
        assert_eq!(stub.hits(), 3);
        for id in ["5101", "5102", "5103"] {
            assert!(server.cache().get(id, server.season).is_some());
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_not_fatal() {
        let stub = StubRemote::start().await.unwrap();
        stub.add_player("5002", "Good", 1100.0, 10);
        stub.respond("5003", StubResponse::html("<html>oops</html>"));
        let server = start(&stub).await;
        server.accounts().add_account("5002");
        server.accounts().add_account("5003");

        let response = server
            .post_auth("/api/v1/sync/run", TEST_ADMIN_TOKEN)
            .await
            .unwrap();
        let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
        let result = &report["phases"][0]["result"];
        assert_eq!(result["success_count"], 1);
        assert_eq!(result["failure_count"], 1);

        let failed: Vec<&Value> = result["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["status"] == "error")
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0]["player_id"], "5003");
        assert!(server.cache().get("5003", server.season).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_run_conflicts() {
        let stub = StubRemote::start().await.unwrap();
        stub.add_player("5004", "Slow", 1000.0, 4);
        stub.set_latency(Duration::from_millis(800));
        let server = start(&stub).await;
        server.accounts().add_account("5004");

        let url = format!("{}/api/v1/sync/run", server.base_url());
        let client = server.client.clone();
        let first = tokio::spawn(async move {
            client
                .post(&url)
                .header("Authorization", format!("Bearer {TEST_ADMIN_TOKEN}"))
                .send()
                .await
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        let response = server.get("/api/v1/sync/status").await.unwrap();
        let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(status["running"], true);

        let second = server
            .post_auth("/api/v1/sync/run", TEST_ADMIN_TOKEN)
            .await
            .unwrap();
        let code = assert_error(second, StatusCode::CONFLICT).await.unwrap();
        assert_eq!(code, "CONFLICT");

        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(stub.hits(), 1);
    }

    #[tokio::test]
    async fn test_update_settings() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server
            .patch_auth(
                "/api/v1/sync/settings",
                TEST_ADMIN_TOKEN,
                &json!({ "enabled": false, "max_items": 10 }),
            )
            .await
            .unwrap();
        let settings: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(settings["enabled"], false);
        assert_eq!(settings["max_items"], 10);

        let response = server.get("/api/v1/sync/status").await.unwrap();
        let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(status["settings"]["max_items"], 10);
        assert_eq!(status["settings"]["enabled"], false);
    }

    #[tokio::test]
    async fn test_update_settings_rejects_out_of_range() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server
            .patch_auth(
                "/api/v1/sync/settings",
                TEST_ADMIN_TOKEN,
                &json!({ "max_items": 5000 }),
            )
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(code, "VALIDATION_ERROR");

        let response = server
            .patch_auth(
                "/api/v1/sync/settings",
                TEST_ADMIN_TOKEN,
                &json!({ "batch_size": 5 }),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = server.get("/api/v1/sync/status").await.unwrap();
        let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_ne!(status["settings"]["max_items"], 5000);
    }

    #[tokio::test]
    async fn test_update_settings_requires_token() {
        let stub = StubRemote::start().await.unwrap();
        let server = start(&stub).await;

        let response = server
            .patch_auth("/api/v1/sync/settings", "nope", &json!({ "enabled": false }))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
