//! Integration specifications for the blend optimization workflow.
//!
//! Scenarios exercise the public service facade and HTTP router end to end:
//! search behavior over small catalogs, the diversified selection policy,
//! and the error taxonomy surfaced to callers.

mod common {
    use std::sync::{Arc, Mutex};

    use profit_mix::catalog::{CatalogRepository, Fund, RepositoryError};
    use profit_mix::optimizer::{
        BlendService, BlendSize, ExposureTarget, MetricWeights, OptimizeRequest, ServiceScores,
    };

    pub(super) fn fund(
        name: &str,
        provider: &str,
        exposures: [f64; 4],
        sharpe: f64,
    ) -> Fund {
        Fund {
            sheet: "general".to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            equity: exposures[0],
            abroad: exposures[1],
            fx: exposures[2],
            illiquid: exposures[3],
            sharpe,
        }
    }

    /// FundX/FundY from the midpoint scenario: the target sits exactly
    /// halfway between them on equity, abroad, and fx.
    pub(super) fn midpoint_pair() -> Vec<Fund> {
        vec![
            fund("FundX", "A", [50.0, 50.0, 20.0, 5.0], 1.0),
            fund("FundY", "B", [30.0, 70.0, 40.0, 10.0], 0.8),
        ]
    }

    pub(super) fn spread_catalog() -> Vec<Fund> {
        vec![
            fund("א1", "כלל", [42.0, 55.0, 28.0, 12.0], 1.1),
            fund("ב1", "מור", [38.0, 48.0, 22.0, 15.0], 0.9),
            fund("ג1", "מיטב", [8.0, 25.0, 10.0, 6.0], 0.6),
            fund("ד1", "אנליסט", [92.0, 80.0, 55.0, 5.0], 1.4),
            fund("ה1", "הראל", [60.0, 65.0, 35.0, 9.0], 1.0),
            fund("ו1", "מגדל", [25.0, 40.0, 18.0, 20.0], 0.7),
        ]
    }

    pub(super) fn request(size: BlendSize) -> OptimizeRequest {
        OptimizeRequest {
            target: ExposureTarget {
                equity: 40.0,
                abroad: 60.0,
                fx: 30.0,
                illiquid: 7.0,
            },
            metric_weights: MetricWeights::default(),
            sharpe_weight: 0.0,
            service_weight: 0.0,
            service_scores: ServiceScores::new(70.0),
            same_provider_only: false,
            size,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        funds: Arc<Mutex<Vec<Fund>>>,
    }

    impl MemoryRepository {
        pub(super) fn with_funds(funds: Vec<Fund>) -> Self {
            Self {
                funds: Arc::new(Mutex::new(funds)),
            }
        }
    }

    impl CatalogRepository for MemoryRepository {
        fn funds(&self) -> Result<Vec<Fund>, RepositoryError> {
            Ok(self.funds.lock().expect("lock").clone())
        }

        fn replace(&self, funds: Vec<Fund>) -> Result<usize, RepositoryError> {
            let mut guard = self.funds.lock().expect("lock");
            *guard = funds;
            Ok(guard.len())
        }
    }

    pub(super) fn build_service(funds: Vec<Fund>) -> BlendService<MemoryRepository> {
        BlendService::new(Arc::new(MemoryRepository::with_funds(funds)))
    }
}

mod search {
    use super::common::*;
    use profit_mix::optimizer::{BlendOptimizer, BlendSize, OptimizeError};

    #[test]
    fn midpoint_target_lands_near_even_split() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Pair));
        let alternatives = optimizer
            .optimize(&midpoint_pair())
            .expect("two funds suffice");

        assert_eq!(alternatives.len(), 1);
        let best = &alternatives[0];
        assert!(
            (best.weights[0] - 0.5).abs() <= 0.05,
            "expected ~0.5, got {}",
            best.weights[0]
        );
        assert!(best.deviation < 1.0);
        assert!((best.weights[0] + best.weights[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn insufficient_catalog_is_an_error_not_a_crash() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Pair));
        let funds = vec![fund("solo", "A", [40.0, 60.0, 30.0, 7.0], 1.0)];

        let error = optimizer.optimize(&funds).expect_err("one fund is too few");
        assert_eq!(
            error,
            OptimizeError::InsufficientCatalog {
                needed: 2,
                available: 1
            }
        );
        assert!(error.to_string().contains("at least 2"));
    }

    #[test]
    fn provider_filter_with_disjoint_providers_reports_no_combinations() {
        let mut req = request(BlendSize::Pair);
        req.same_provider_only = true;
        let optimizer = BlendOptimizer::new(req);

        let error = optimizer
            .optimize(&midpoint_pair())
            .expect_err("no same-provider pair exists");
        assert_eq!(error, OptimizeError::NoValidCombinations);
    }

    #[test]
    fn triple_blends_weight_sums_stay_within_tolerance() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Triple));
        let alternatives = optimizer
            .optimize(&spread_catalog())
            .expect("catalog supports triples");

        for candidate in &alternatives {
            assert_eq!(candidate.funds.len(), 3);
            let total: f64 = candidate.weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-3, "weights sum to {total}");
        }
    }

    #[test]
    fn single_blend_reproduces_fund_profile_exactly() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Single));
        let funds = midpoint_pair();
        let alternatives = optimizer.optimize(&funds).expect("single blends");

        let by_name = |name: &str| {
            alternatives
                .iter()
                .find(|c| c.funds[0].name == name)
                .expect("fund present in shortlist")
        };
        let x = by_name("FundX");
        assert_eq!(x.weights, vec![1.0]);
        assert_eq!(x.profile.equity, 50.0);
        assert_eq!(x.profile.abroad, 50.0);
        assert_eq!(x.profile.fx, 20.0);
        assert_eq!(x.profile.illiquid, 5.0);
        assert_eq!(x.profile.sharpe, 1.0);
    }
}

mod scoring {
    use super::common::*;
    use profit_mix::optimizer::{BlendOptimizer, BlendSize, ServiceScores};

    #[test]
    fn stored_scores_are_consistent_with_their_components() {
        let mut req = request(BlendSize::Pair);
        req.sharpe_weight = 1.5;
        req.service_weight = 4.0;
        let mut scores = ServiceScores::new(65.0);
        scores.insert("כלל".to_string(), 88.0);
        req.service_scores = scores;

        let optimizer = BlendOptimizer::new(req);
        let alternatives = optimizer
            .optimize(&spread_catalog())
            .expect("catalog supports pairs");
        assert!(!alternatives.is_empty());

        for candidate in &alternatives {
            let recomputed = candidate.deviation
                - 1.5 * candidate.profile.sharpe
                - 4.0 * (candidate.service / 100.0);
            assert!(
                (candidate.score - recomputed).abs() < 1e-12,
                "stored score {} diverges from recomputed {}",
                candidate.score,
                recomputed
            );
        }
    }

    #[test]
    fn service_credit_can_reorder_otherwise_equal_funds() {
        // Two identical profiles; only provider service differs.
        let funds = vec![
            fund("twin-a", "low-service", [40.0, 60.0, 30.0, 7.0], 1.0),
            fund("twin-b", "high-service", [40.0, 60.0, 30.0, 7.0], 1.0),
        ];

        let mut req = request(BlendSize::Single);
        req.service_weight = 4.0;
        let mut scores = ServiceScores::new(50.0);
        scores.insert("high-service".to_string(), 95.0);
        req.service_scores = scores;

        let alternatives = BlendOptimizer::new(req)
            .optimize(&funds)
            .expect("single blends");
        assert_eq!(alternatives[0].funds[0].name, "twin-b");
    }
}

mod selection {
    use super::common::*;
    use profit_mix::optimizer::{BlendOptimizer, BlendSize, MAX_ALTERNATIVES};
    use std::collections::BTreeSet;

    #[test]
    fn shortlist_never_repeats_fund_names() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Pair));
        let alternatives = optimizer
            .optimize(&spread_catalog())
            .expect("catalog supports pairs");

        assert_eq!(alternatives.len(), MAX_ALTERNATIVES);

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for candidate in &alternatives {
            for fund in &candidate.funds {
                assert!(seen.insert(fund.name.as_str()), "{} repeated", fund.name);
            }
        }
    }

    #[test]
    fn strict_pass_yields_disjoint_providers_when_possible() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Pair));
        let alternatives = optimizer
            .optimize(&spread_catalog())
            .expect("catalog supports pairs");

        let mut providers: BTreeSet<&str> = BTreeSet::new();
        for candidate in &alternatives {
            for fund in &candidate.funds {
                assert!(
                    providers.insert(fund.provider.as_str()),
                    "{} repeated across alternatives",
                    fund.provider
                );
            }
        }
    }

    #[test]
    fn small_pools_return_fewer_than_three() {
        let optimizer = BlendOptimizer::new(request(BlendSize::Pair));
        let alternatives = optimizer
            .optimize(&midpoint_pair())
            .expect("one pair exists");
        assert_eq!(alternatives.len(), 1);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use profit_mix::optimizer::optimizer_router;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn build_router(funds: Vec<profit_mix::catalog::Fund>) -> axum::Router {
        optimizer_router(Arc::new(build_service(funds)))
    }

    fn optimize_payload(funds: u8) -> Value {
        json!({
            "target": { "equity": 40.0, "abroad": 60.0, "fx": 30.0, "illiquid": 7.0 },
            "sharpe_weight": 0.0,
            "service_weight": 0.0,
            "funds": funds,
        })
    }

    async fn post_optimize(router: axum::Router, payload: Value) -> (StatusCode, Value) {
        use tower::ServiceExt;

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/blends/optimize")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).expect("json"))
    }

    #[tokio::test]
    async fn optimize_endpoint_returns_ranked_alternatives() {
        let router = build_router(spread_catalog());
        let (status, payload) = post_optimize(router, optimize_payload(2)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload.get("funds_considered").and_then(Value::as_u64),
            Some(6)
        );

        let alternatives = payload
            .get("alternatives")
            .and_then(Value::as_array)
            .expect("alternatives array");
        assert_eq!(alternatives.len(), 3);
        assert_eq!(
            alternatives[0].get("badge").and_then(Value::as_str),
            Some("Primary pick")
        );
        assert!(alternatives[0].get("profile").is_some());
        assert!(alternatives[0]
            .get("legs")
            .and_then(Value::as_array)
            .map(|legs| legs.len() == 2)
            .unwrap_or(false));
    }

    #[tokio::test]
    async fn optimize_endpoint_surfaces_insufficient_catalog_as_warning() {
        let router = build_router(vec![fund("solo", "A", [40.0, 60.0, 30.0, 7.0], 1.0)]);
        let (status, payload) = post_optimize(router, optimize_payload(2)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .expect("error message");
        assert!(message.contains("at least 2"));
    }

    #[tokio::test]
    async fn optimize_endpoint_rejects_invalid_blend_size() {
        let router = build_router(spread_catalog());
        let (status, payload) = post_optimize(router, optimize_payload(4)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("blend size"));
    }

    #[tokio::test]
    async fn catalog_endpoint_returns_transparency_snapshot() {
        use tower::ServiceExt;

        let router = build_router(spread_catalog());
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/catalog")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");

        assert_eq!(payload.get("fund_count").and_then(Value::as_u64), Some(6));
        assert_eq!(
            payload.get("provider_count").and_then(Value::as_u64),
            Some(6)
        );
        assert_eq!(
            payload
                .get("funds")
                .and_then(Value::as_array)
                .map(Vec::len),
            Some(6)
        );
    }
}
