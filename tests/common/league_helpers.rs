// tests/common/league_helpers.rs
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::{json_body, TestApp};

fn id_of(body: &Value) -> Uuid {
    body["data"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Response has no id")
}

pub async fn create_team(app: &TestApp, admin_token: &str, name: &str) -> Uuid {
    let response = app
        .post_json(
            "/api/v1/admin/teams",
            Some(admin_token),
            &json!({ "name": name, "stadium": format!("{} Stadium", name), "city": "Jakarta" }),
        )
        .await;
    assert_eq!(201, response.status().as_u16(), "failed to create team {}", name);
    id_of(&json_body(response).await)
}

pub async fn add_player(app: &TestApp, admin_token: &str, team_id: Uuid, name: &str, jersey_number: i32) -> Uuid {
    let response = app
        .post_json(
            &format!("/api/v1/admin/teams/{}/players", team_id),
            Some(admin_token),
            &json!({
                "name": name,
                "position": "forward",
                "jersey_number": jersey_number,
                "height": 178,
                "weight": 72
            }),
        )
        .await;
    assert_eq!(201, response.status().as_u16(), "failed to add player {}", name);
    id_of(&json_body(response).await)
}

pub async fn create_match(app: &TestApp, admin_token: &str, home: Uuid, away: Uuid, date: &str, time: &str) -> Uuid {
    let response = app
        .post_json(
            "/api/v1/admin/matches",
            Some(admin_token),
            &json!({
                "home_team_id": home,
                "away_team_id": away,
                "match_date": date,
                "match_time": time
            }),
        )
        .await;
    assert_eq!(201, response.status().as_u16(), "failed to create match");
    id_of(&json_body(response).await)
}

/// `(player_id, credited_team_id, minute, is_own_goal)`
pub type GoalTuple = (Uuid, Uuid, i32, bool);

pub fn goals_json(goals: &[GoalTuple]) -> Value {
    Value::Array(
        goals
            .iter()
            .map(|(player_id, team_id, minute, is_own_goal)| {
                json!({
                    "player_id": player_id,
                    "team_id": team_id,
                    "minute": minute,
                    "is_own_goal": is_own_goal
                })
            })
            .collect(),
    )
}

pub async fn record_result(
    app: &TestApp,
    admin_token: &str,
    match_id: Uuid,
    home_score: i32,
    away_score: i32,
    goals: &[GoalTuple],
) -> reqwest::Response {
    app.post_json(
        &format!("/api/v1/admin/matches/{}/result", match_id),
        Some(admin_token),
        &json!({
            "home_score": home_score,
            "away_score": away_score,
            "goals": goals_json(goals)
        }),
    )
    .await
}

/// Two teams with one striker each, ready for fixtures.
pub struct TwoClubs {
    pub home: Uuid,
    pub away: Uuid,
    pub home_striker: Uuid,
    pub away_striker: Uuid,
}

pub async fn two_clubs(app: &TestApp, admin_token: &str, home_name: &str, away_name: &str) -> TwoClubs {
    let home = create_team(app, admin_token, home_name).await;
    let away = create_team(app, admin_token, away_name).await;
    let home_striker = add_player(app, admin_token, home, &format!("{} Striker", home_name), 9).await;
    let away_striker = add_player(app, admin_token, away, &format!("{} Striker", away_name), 9).await;
    TwoClubs { home, away, home_striker, away_striker }
}
