//! Lifestyle survey and eco-challenge goals.
//!
//! Two small authenticated surfaces outside the marketplace: the footprint
//! survey (computed server-side, the stored record comes back with the
//! result) and the goal center's list/accept pair.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Goal, SurveyRecord, SurveyRequest};

impl ApiClient {
    /// Submit the footprint survey for the signed-in user.
    pub async fn submit_survey(&self, survey: &SurveyRequest) -> Result<SurveyRecord> {
        let response = self.send(self.post("/api/survey/survey").json(survey)).await?;
        Ok(response.json().await?)
    }

    pub async fn list_goals(&self) -> Result<Vec<Goal>> {
        let response = self.send(self.get("/api/goals")).await?;
        Ok(response.json().await?)
    }

    /// Accept an eco-challenge for the given user.
    pub async fn accept_goal(&self, user_id: i64, goal_id: i64) -> Result<()> {
        let builder = self.post("/api/goals/assign").query(&[
            ("userId", user_id.to_string()),
            ("goalId", goal_id.to_string()),
        ]);
        self.send(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DietType;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn survey_submission_carries_bearer_token_end_to_end() {
        let seen_auth: Arc<Mutex<Option<String>>> = Arc::default();
        let seen = seen_auth.clone();
        let app = Router::new()
            .route(
                "/auth/login",
                post(|| async { Json(serde_json::json!({ "jwt": "survey-token" })) }),
            )
            .route(
                "/api/survey/survey",
                post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                    let seen = seen.clone();
                    async move {
                        *seen.lock().unwrap() = headers
                            .get("authorization")
                            .and_then(|value| value.to_str().ok())
                            .map(String::from);
                        Json(serde_json::json!({
                            "id": 1,
                            "monthlyMileage": body["monthlyMileage"],
                            "electricityBill": body["electricityBill"],
                            "dietType": body["dietType"],
                            "carbonFootprint": 182.4
                        }))
                    }
                }),
            );
        let base = serve(app).await;

        let mut client = ApiClient::new(base);
        client.login("lena", "hunter2").await.unwrap();

        let record = client
            .submit_survey(&SurveyRequest {
                monthly_mileage: 100.0,
                electricity_bill: 50.0,
                diet_type: DietType::Vegan,
            })
            .await
            .unwrap();

        assert_eq!(
            seen_auth.lock().unwrap().as_deref(),
            Some("Bearer survey-token")
        );
        assert_eq!(record.monthly_mileage, 100.0);
        assert_eq!(record.electricity_bill, 50.0);
        assert_eq!(record.diet_type, "Vegan");
        assert_eq!(record.carbon_footprint, Some(182.4));
    }

    #[tokio::test]
    async fn accept_goal_sends_both_ids_as_query() {
        let app = Router::new().route(
            "/api/goals/assign",
            post(
                |axum::extract::Query(params): axum::extract::Query<
                    std::collections::HashMap<String, String>,
                >| async move {
                    assert_eq!(params["userId"], "5");
                    assert_eq!(params["goalId"], "12");
                    "Goal assigned"
                },
            ),
        );
        let base = serve(app).await;
        let client = ApiClient::new(base);

        client.accept_goal(5, 12).await.unwrap();
    }
}
