use serde_json::json;

use crate::common::{json_of, spawn_server};

async fn create(client: &reqwest::Client, base: &str, body: serde_json::Value) -> serde_json::Value {
    let res = client
        .post(format!("{base}/journal"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let (status, entry) = json_of(res).await;
    assert_eq!(status, 201);
    entry
}

#[tokio::test(flavor = "multi_thread")]
async fn journal_crud_round_trip() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let entry = create(
        &client,
        &base,
        json!({ "description": "Lost in a house with endless rooms", "tags": ["anxious"] }),
    )
    .await;
    let id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["mood"], "anxious");
    assert!(entry["title"].as_str().unwrap().starts_with("Dream on "));
    assert_eq!(entry["favorite"], false);

    let (status, got) = json_of(client.get(format!("{base}/journal/{id}")).send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(got, entry);

    let (status, updated) = json_of(
        client
            .put(format!("{base}/journal/{id}"))
            .json(&json!({ "title": "The house", "mood": "curious" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "The house");
    assert_eq!(updated["mood"], "curious");
    assert_eq!(updated["description"], entry["description"]);

    let (_, fav) = json_of(
        client
            .post(format!("{base}/journal/{id}/favorite"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(fav["favorite"], true);

    let res = client.delete(format!("{base}/journal/{id}")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 204);

    let (status, body) = json_of(client.get(format!("{base}/journal/{id}")).send().await.unwrap()).await;
    assert_eq!(status, 404);
    assert!(body["error"].as_str().unwrap().contains(&id));

    let res = client.delete(format!("{base}/journal/{id}")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn journal_rejects_blank_description() {
    let base = spawn_server().await;
    let res = reqwest::Client::new()
        .post(format!("{base}/journal"))
        .json(&json!({ "description": "  " }))
        .send()
        .await
        .unwrap();
    let (status, body) = json_of(res).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn journal_list_filters_by_query() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, json!({ "description": "snake in the grass", "mood": "afraid", "tags": ["animals"] })).await;
    let water = create(&client, &base, json!({ "description": "calm water", "mood": "calm", "tags": ["water"] })).await;
    let id = water["id"].as_str().unwrap();
    client
        .post(format!("{base}/journal/{id}/favorite"))
        .send()
        .await
        .unwrap();

    let (_, all) = json_of(client.get(format!("{base}/journal")).send().await.unwrap()).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], water["id"]);

    let (_, calm) = json_of(
        client
            .get(format!("{base}/journal?mood=CALM"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(calm.as_array().unwrap().len(), 1);

    let (_, favorites) = json_of(
        client
            .get(format!("{base}/journal?favorite=true"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(favorites[0]["id"], water["id"]);

    let (_, snakes) = json_of(
        client
            .get(format!("{base}/journal?q=Snake&tag=animals"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(snakes.as_array().unwrap().len(), 1);

    let res = client
        .get(format!("{base}/journal?favorite=maybe"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn journal_stats_count_entries() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, empty) = json_of(client.get(format!("{base}/journal/stats")).send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(empty["totalDreams"], 0);
    assert_eq!(empty["mostCommonMood"], "None");
    assert_eq!(empty["lastDream"], "No dreams yet");

    create(&client, &base, json!({ "description": "one", "mood": "joy" })).await;
    let last = create(&client, &base, json!({ "description": "two", "mood": "joy", "title": "Second" })).await;

    let (_, stats) = json_of(client.get(format!("{base}/journal/stats")).send().await.unwrap()).await;
    assert_eq!(stats["totalDreams"], 2);
    assert_eq!(stats["dreamsThisMonth"], 2);
    assert_eq!(stats["averagePerWeek"], 0.5);
    assert_eq!(stats["mostCommonMood"], "joy");
    assert_eq!(stats["lastDream"], last["title"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn visualize_entry_stores_image() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let entry = create(&client, &base, json!({ "description": "a glowing moon over the sea" })).await;
    let id = entry["id"].as_str().unwrap();

    let (status, updated) = json_of(
        client
            .post(format!("{base}/journal/{id}/visualize"))
            .json(&json!({ "style": "ink" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert!(updated["visualizationUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
    assert!(!updated["visualization"].as_str().unwrap().is_empty());

    let res = client
        .post(format!("{base}/journal/missing/visualize"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
